// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{get_setting, set_setting, unset_setting};
use crate::error::{Error, Result};
use crate::health::HealthScorer;
use rusqlite::Connection;

pub const HISTORY_LIMIT: &str = "health.history_limit";
pub const CLAMP_SCORE: &str = "health.clamp";

pub const KEYS: [&str; 2] = [HISTORY_LIMIT, CLAMP_SCORE];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub clamp_score: bool,
    /// Unbounded when `None`.
    pub history_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clamp_score: true,
            history_limit: None,
        }
    }
}

fn parse_bool(key: &str, v: &str) -> Result<bool> {
    match v.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(Error::InvalidSetting {
            key: key.into(),
            value: v.into(),
        }),
    }
}

fn parse_limit(key: &str, v: &str) -> Result<usize> {
    v.trim()
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| Error::InvalidSetting {
            key: key.into(),
            value: v.into(),
        })
}

impl Config {
    pub fn load(conn: &Connection) -> Result<Self> {
        let mut cfg = Config::default();
        if let Some(v) = get_setting(conn, CLAMP_SCORE)? {
            cfg.clamp_score = parse_bool(CLAMP_SCORE, &v)?;
        }
        if let Some(v) = get_setting(conn, HISTORY_LIMIT)? {
            cfg.history_limit = Some(parse_limit(HISTORY_LIMIT, &v)?);
        }
        Ok(cfg)
    }

    pub fn scorer(&self) -> HealthScorer {
        HealthScorer::new(self.clamp_score, self.history_limit)
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            CLAMP_SCORE => Ok(self.clamp_score.to_string()),
            HISTORY_LIMIT => Ok(self
                .history_limit
                .map(|n| n.to_string())
                .unwrap_or_else(|| "unlimited".into())),
            other => Err(Error::UnknownSetting(other.into())),
        }
    }
}

/// Validates and stores a setting. `unlimited` clears the history limit.
pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
    match key {
        CLAMP_SCORE => {
            let v = parse_bool(key, value)?;
            set_setting(conn, key, &v.to_string())
        }
        HISTORY_LIMIT if value.trim().eq_ignore_ascii_case("unlimited") => {
            unset_setting(conn, key)
        }
        HISTORY_LIMIT => {
            let v = parse_limit(key, value)?;
            set_setting(conn, key, &v.to_string())
        }
        other => Err(Error::UnknownSetting(other.into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;

    #[test]
    fn defaults_then_overrides() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        assert_eq!(Config::load(&conn).unwrap(), Config::default());

        set(&conn, CLAMP_SCORE, "off").unwrap();
        set(&conn, HISTORY_LIMIT, "30").unwrap();
        let cfg = Config::load(&conn).unwrap();
        assert!(!cfg.clamp_score);
        assert_eq!(cfg.history_limit, Some(30));

        set(&conn, HISTORY_LIMIT, "unlimited").unwrap();
        assert_eq!(Config::load(&conn).unwrap().history_limit, None);
    }

    #[test]
    fn rejects_bad_values_and_keys() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        assert!(matches!(
            set(&conn, HISTORY_LIMIT, "0"),
            Err(Error::InvalidSetting { .. })
        ));
        assert!(matches!(
            set(&conn, "theme", "dark"),
            Err(Error::UnknownSetting(_))
        ));
    }
}

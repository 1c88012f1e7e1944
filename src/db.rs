// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Local key-value persistence on SQLite. The whole [`Snapshot`] is one
//! JSON value under [`STORAGE_KEY`]; settings sit next to it.

use crate::error::{Error, Result};
use crate::models::Snapshot;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Fintrack", "fintrack"));

pub const STORAGE_KEY: &str = "fintrack-storage";
const SETTING_PREFIX: &str = "setting.";

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or(Error::DataDir)?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir)?;
    Ok(data_dir.join("fintrack.sqlite"))
}

/// Opens `path`, or the platform data dir database when `None`.
pub fn open_or_init(path: Option<&Path>) -> Result<Connection> {
    let path = match path {
        Some(p) => {
            if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            p.to_path_buf()
        }
        None => db_path()?,
    };
    debug!(path = %path.display(), "opening database");
    let conn = Connection::open(&path)?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS kv(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v = conn
        .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

fn put(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO kv(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

/// `None` on first run.
pub fn load_snapshot(conn: &Connection) -> Result<Option<Snapshot>> {
    match get(conn, STORAGE_KEY)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub fn save_snapshot(conn: &Connection, snapshot: &Snapshot) -> Result<()> {
    let raw = serde_json::to_string(snapshot)?;
    put(conn, STORAGE_KEY, &raw)?;
    debug!(bytes = raw.len(), "snapshot saved");
    Ok(())
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    get(conn, &format!("{}{}", SETTING_PREFIX, key))
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    put(conn, &format!("{}{}", SETTING_PREFIX, key), value)
}

pub fn unset_setting(conn: &Connection, key: &str) -> Result<()> {
    conn.execute(
        "DELETE FROM kv WHERE key=?1",
        params![format!("{}{}", SETTING_PREFIX, key)],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mem() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn first_run_has_no_snapshot() {
        let conn = mem();
        assert!(load_snapshot(&conn).unwrap().is_none());
    }

    #[test]
    fn snapshot_overwrites_in_place() {
        let conn = mem();
        let mut snap = Snapshot::default();
        save_snapshot(&conn, &snap).unwrap();
        snap.user.name = "Ada".into();
        save_snapshot(&conn, &snap).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(load_snapshot(&conn).unwrap().unwrap().user.name, "Ada");
    }

    #[test]
    fn settings_do_not_collide_with_storage() {
        let conn = mem();
        set_setting(&conn, STORAGE_KEY, "x").unwrap();
        assert!(load_snapshot(&conn).unwrap().is_none());
        assert_eq!(get_setting(&conn, STORAGE_KEY).unwrap().as_deref(), Some("x"));
        unset_setting(&conn, STORAGE_KEY).unwrap();
        assert!(get_setting(&conn, STORAGE_KEY).unwrap().is_none());
    }
}

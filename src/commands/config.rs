// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required;
use crate::config::{self, Config, KEYS};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::collections::BTreeMap;

/// Settings apply from the next invocation on.
pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => {
            let cfg = Config::load(conn)?;
            println!("{}", cfg.get(required(sub, "key")?)?);
        }
        Some(("set", sub)) => {
            let key = required(sub, "key")?;
            let value = required(sub, "value")?;
            config::set(conn, key, value).with_context(|| format!("setting {}", key))?;
            println!("{} = {}", key, value);
        }
        Some(("list", sub)) => {
            let cfg = Config::load(conn)?;
            let mut all = BTreeMap::new();
            for key in KEYS {
                all.insert(key, cfg.get(key)?);
            }
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &all)? {
                let rows = all
                    .into_iter()
                    .map(|(k, v)| vec![k.to_string(), v])
                    .collect();
                println!("{}", pretty_table(&["Key", "Value"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}

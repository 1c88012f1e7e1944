// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use fintrack::cli;
use fintrack::commands::{
    budgets, categories, expenses, exporter, forecasts, goals, incomes, invest, profile, reports,
};
use fintrack::health::HealthScorer;
use fintrack::store::{Clock, Store};

pub fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 8, 20)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// Empty store pinned to 2025-08-20 with the health scorer attached.
pub fn store() -> Store {
    let mut store = Store::default().with_clock(Clock::Fixed(now()));
    store.subscribe(Box::new(HealthScorer::default()));
    store
}

/// Parses `args` like the binary does and hands the matches to the handler.
pub fn run(store: &mut Store, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["fintrack"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("category", m)) => categories::handle(store, m),
        Some(("budget", m)) => budgets::handle(store, m),
        Some(("expense", m)) => expenses::handle(store, m),
        Some(("income", m)) => incomes::handle(store, m),
        Some(("goal", m)) => goals::handle(store, m),
        Some(("invest", m)) => invest::handle(store, m),
        Some(("forecast", m)) => forecasts::handle(store, m),
        Some(("report", m)) => reports::handle(store, m),
        Some(("profile", m)) => profile::handle(store, m),
        Some(("export", m)) => exporter::handle(store, m),
        other => panic!("unexpected subcommand {:?}", other.map(|(n, _)| n)),
    }
}

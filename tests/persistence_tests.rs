// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{now, run, store};
use fintrack::config::{self, Config};
use fintrack::db;
use fintrack::models::IncomeDraft;
use fintrack::seed;
use fintrack::store::{Clock, Store};
use rust_decimal::Decimal;
use tempfile::tempdir;

#[test]
fn first_run_seeds_and_round_trips_through_sqlite() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data").join("fintrack.sqlite");

    {
        let conn = db::open_or_init(Some(path.as_path())).unwrap();
        assert!(db::load_snapshot(&conn).unwrap().is_none());
        let mut s = store();
        seed::populate(&mut s);
        assert!(s.is_dirty());
        db::save_snapshot(&conn, s.snapshot()).unwrap();
    }

    let conn = db::open_or_init(Some(path.as_path())).unwrap();
    let loaded = db::load_snapshot(&conn).unwrap().unwrap();
    assert_eq!(loaded.categories.len(), 8);
    assert_eq!(loaded.savings_goals.len(), 3);
    assert_eq!(loaded.financial_health_scores.len(), 1);

    let mut again = Store::new(loaded.clone()).with_clock(Clock::Fixed(now()));
    assert!(!again.is_dirty());
    run(&mut again, &["profile", "set", "--name", "Ada", "--currency", "€"]).unwrap();
    db::save_snapshot(&conn, again.snapshot()).unwrap();

    let reloaded = db::load_snapshot(&conn).unwrap().unwrap();
    assert_eq!(reloaded.user.name, "Ada");
    assert_eq!(reloaded.user.currency, "€");
    assert_eq!(reloaded.expenses, loaded.expenses);
    assert_eq!(reloaded.budgets, loaded.budgets);
}

#[test]
fn missing_collections_load_as_empty() {
    let dir = tempdir().unwrap();
    let conn = db::open_or_init(Some(dir.path().join("f.sqlite").as_path())).unwrap();
    conn.execute(
        "INSERT INTO kv(key, value) VALUES(?1, ?2)",
        rusqlite::params![db::STORAGE_KEY, r#"{"user":{"id":"1","name":"Sam","email":"","currency":"$","theme":"dark","notifications":false,"monthlyAlerts":true}}"#],
    )
    .unwrap();
    let snap = db::load_snapshot(&conn).unwrap().unwrap();
    assert_eq!(snap.user.name, "Sam");
    assert!(snap.expenses.is_empty());
    assert!(snap.is_empty());
}

#[test]
fn history_limit_setting_caps_recorded_scores() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    config::set(&conn, config::HISTORY_LIMIT, "2").unwrap();
    let cfg = Config::load(&conn).unwrap();

    let mut s = Store::default().with_clock(Clock::Fixed(now()));
    s.subscribe(Box::new(cfg.scorer()));
    for _ in 0..4 {
        s.add_income(IncomeDraft::new(Decimal::from(100), now().date(), "Gift"));
    }
    assert_eq!(s.snapshot().financial_health_scores.len(), 2);
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{now, run, store};
use fintrack::health::{HealthScorer, HealthStatus, health_status};
use fintrack::models::{ExpenseDraft, IncomeDraft};
use fintrack::store::{Clock, Store};
use rust_decimal::Decimal;

#[test]
fn every_ledger_change_records_a_score() {
    let mut s = store();
    run(&mut s, &["category", "add", "Food"]).unwrap();
    assert!(s.snapshot().financial_health_scores.is_empty());

    run(&mut s, &["income", "add", "--amount", "5000", "--source", "Salary"]).unwrap();
    run(&mut s, &["expense", "add", "--amount", "3750", "--category", "Food"]).unwrap();

    let scores = &s.snapshot().financial_health_scores;
    assert_eq!(scores.len(), 2);
    let latest = scores.last().unwrap();
    assert_eq!(latest.score, 61);
    assert_eq!(latest.savings_ratio, 0.25);
    assert_eq!(latest.budget_adherence, 1.0);
    assert_eq!(latest.date, now());
    assert_eq!(health_status(latest.score), HealthStatus::Good);
}

#[test]
fn other_months_do_not_move_the_score() {
    let mut s = store();
    s.add_income(IncomeDraft::new(Decimal::from(1000), now().date(), "Salary"));
    let before = s.snapshot().financial_health_scores[0].score;
    s.add_expense(ExpenseDraft::new(
        Decimal::from(900),
        chrono::NaiveDate::from_ymd_opt(2025, 7, 3).unwrap(),
        "x",
    ));
    assert_eq!(s.snapshot().financial_health_scores[1].score, before);
}

#[test]
fn overspending_is_clamped_unless_disabled() {
    let heavy = |scorer: HealthScorer| {
        let mut s = Store::default().with_clock(Clock::Fixed(now()));
        s.subscribe(Box::new(scorer));
        s.batch(|s| {
            s.add_income(IncomeDraft::new(Decimal::from(100), now().date(), "Gift"));
            s.add_expense(ExpenseDraft::new(Decimal::from(5000), now().date(), "x"));
        });
        s.snapshot().financial_health_scores[0].score
    };
    assert_eq!(heavy(HealthScorer::new(true, None)), 0);
    assert!(heavy(HealthScorer::new(false, None)) < 0);
}

#[test]
fn refresh_recomputes_without_data_change() {
    let mut s = store();
    s.refresh();
    let scores = &s.snapshot().financial_health_scores;
    assert_eq!(scores.len(), 1);
    // no income, no budgets: 0.3 + 0.12 + 0.09
    assert_eq!(scores[0].score, 51);
}

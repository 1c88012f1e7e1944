// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{run, store};
use fintrack::models::CalculationKind;
use rust_decimal::Decimal;

#[test]
fn saved_sip_lands_in_history() {
    let mut s = store();
    run(
        &mut s,
        &["invest", "sip", "--monthly", "5000", "--rate", "12", "--years", "10", "--save"],
    )
    .unwrap();
    let calcs = &s.snapshot().investment_calculations;
    assert_eq!(calcs.len(), 1);
    assert_eq!(calcs[0].kind, CalculationKind::Sip);
    assert_eq!(calcs[0].duration, 120);
    assert_eq!(calcs[0].result, 1_161_695);
    assert_eq!(calcs[0].amount, Decimal::from(5000));
    // calculations are not ledger changes
    assert!(s.snapshot().financial_health_scores.is_empty());

    let id = calcs[0].id.clone();
    run(&mut s, &["invest", "rm", &id]).unwrap();
    assert!(s.snapshot().investment_calculations.is_empty());
}

#[test]
fn unsaved_calculations_leave_the_store_clean() {
    let mut s = store();
    run(
        &mut s,
        &["invest", "lumpsum", "--amount", "100000", "--rate", "12", "--years", "10", "--series"],
    )
    .unwrap();
    run(
        &mut s,
        &["invest", "fv", "--principal", "1000", "--monthly", "100", "--rate", "8", "--years", "5", "--json"],
    )
    .unwrap();
    assert!(!s.is_dirty());
}

#[test]
fn retirement_saves_the_required_corpus() {
    let mut s = store();
    run(
        &mut s,
        &[
            "invest",
            "retirement",
            "--current-age",
            "30",
            "--retirement-age",
            "60",
            "--monthly-expense",
            "50000",
            "--current-savings",
            "500000",
            "--rate",
            "8",
            "--save",
        ],
    )
    .unwrap();
    let calc = &s.snapshot().investment_calculations[0];
    assert_eq!(calc.kind, CalculationKind::Retirement);
    assert_eq!(calc.duration, 360);
    let expected = 50_000.0 * (1.0 + 6.0 / 100.0f64).powf(30.0) * 12.0 * 25.0;
    assert_eq!(calc.result, (expected + 0.5).floor() as i64);
}

#[test]
fn forecasts_are_saved_and_removed() {
    let mut s = store();
    run(
        &mut s,
        &["forecast", "add", "--name", "Base case", "--income-growth", "5", "--returns", "10", "--years", "10"],
    )
    .unwrap();
    let f = &s.snapshot().financial_forecasts[0];
    assert_eq!(f.name, "Base case");
    assert_eq!(f.inflation, 6.0);
    assert_eq!(f.years, 10);
    let id = f.id.clone();
    run(&mut s, &["forecast", "rm", &id]).unwrap();
    assert!(s.snapshot().financial_forecasts.is_empty());
}

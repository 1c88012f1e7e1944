// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{run, store};
use fintrack::aggregate::{budget_overview, budget_totals};
use rust_decimal::Decimal;

fn food_store() -> fintrack::store::Store {
    let mut s = store();
    run(&mut s, &["category", "add", "Food", "--icon", "utensils", "--color", "#ef4444"]).unwrap();
    run(&mut s, &["category", "add", "Rent", "--icon", "home"]).unwrap();
    run(&mut s, &["budget", "set", "--category", "Food", "--amount", "500"]).unwrap();
    s
}

#[test]
fn food_budget_end_to_end() {
    let mut s = food_store();
    run(
        &mut s,
        &["expense", "add", "--amount", "450", "--category", "food", "--date", "2025-08-05"],
    )
    .unwrap();

    let data = s.snapshot();
    let food = data.category_by_name("Food").unwrap();
    assert_eq!(
        data.budget_for(&food.id, "2025-08").unwrap().spent,
        Decimal::from(450)
    );

    let lines = budget_overview(data, "2025-08");
    let line = lines.iter().find(|l| l.category_name == "Food").unwrap();
    assert_eq!(line.spent, Decimal::from(450));
    assert_eq!(line.amount, Decimal::from(500));
    assert_eq!(line.progress, 90);
    assert!(!line.is_over_budget);

    // a category without a budget reports zero progress
    let rent = lines.iter().find(|l| l.category_name == "Rent").unwrap();
    assert_eq!(rent.progress, 0);
    assert!(rent.budget_id.is_none());

    let totals = budget_totals(&lines);
    assert_eq!(totals.overall_progress, 90.0);
    assert!(!totals.is_over_budget);
}

#[test]
fn expense_without_budget_creates_nothing() {
    let mut s = food_store();
    run(
        &mut s,
        &["expense", "add", "--amount", "1200", "--category", "Rent", "--date", "2025-08-01"],
    )
    .unwrap();
    assert_eq!(s.snapshot().budgets.len(), 1);
}

#[test]
fn setting_twice_updates_the_amount() {
    let mut s = food_store();
    run(&mut s, &["budget", "set", "--category", "Food", "--amount", "650"]).unwrap();
    let budgets = &s.snapshot().budgets;
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].amount, Decimal::from(650));
}

#[test]
fn non_positive_amounts_are_ignored() {
    let mut s = food_store();
    run(&mut s, &["budget", "set", "--category", "Rent", "--amount", "abc"]).unwrap();
    assert_eq!(s.snapshot().budgets.len(), 1);
}

#[test]
fn copy_last_fills_missing_categories() {
    let mut s = food_store();
    run(
        &mut s,
        &["budget", "set", "--category", "Rent", "--amount", "1200", "--month", "2025-07"],
    )
    .unwrap();
    run(&mut s, &["budget", "copy-last", "--month", "2025-08"]).unwrap();

    let data = s.snapshot();
    let rent = data.category_by_name("rent").unwrap();
    let copied = data.budget_for(&rent.id, "2025-08").unwrap();
    assert_eq!(copied.amount, Decimal::from(1200));
    assert_eq!(copied.spent, Decimal::ZERO);
    assert_eq!(data.budgets.iter().filter(|b| b.month == "2025-08").count(), 2);
}

#[test]
fn unknown_category_is_an_error() {
    let mut s = food_store();
    assert!(run(&mut s, &["budget", "set", "--category", "Travel", "--amount", "10"]).is_err());
}

#[test]
fn bad_month_is_rejected() {
    let mut s = food_store();
    let err = run(&mut s, &["budget", "report", "--month", "2025-13"]).unwrap_err();
    assert!(err.to_string().contains("2025-13"));
}

#[test]
fn unpadded_month_lands_on_the_padded_key() {
    let mut s = store();
    run(&mut s, &["category", "add", "Food"]).unwrap();
    run(&mut s, &["budget", "set", "--category", "Food", "--amount", "500", "--month", "2025-8"]).unwrap();
    run(
        &mut s,
        &["expense", "add", "--amount", "450", "--category", "Food", "--date", "2025-08-05"],
    )
    .unwrap();

    let data = s.snapshot();
    assert_eq!(data.budgets.len(), 1);
    assert_eq!(data.budgets[0].month, "2025-08");
    assert_eq!(data.budgets[0].spent, Decimal::from(450));
    let lines = budget_overview(data, "2025-08");
    assert_eq!(lines[0].amount, Decimal::from(500));
    assert_eq!(lines[0].progress, 90);

    // the same month spelled either way updates the one budget
    run(&mut s, &["budget", "set", "--category", "Food", "--amount", "600", "--month", "2025-08"]).unwrap();
    run(&mut s, &["budget", "copy-last", "--month", "2025-9"]).unwrap();
    let months: Vec<&str> = s.snapshot().budgets.iter().map(|b| b.month.as_str()).collect();
    assert_eq!(months, ["2025-08", "2025-09"]);
    assert_eq!(s.snapshot().budgets[0].amount, Decimal::from(600));
}

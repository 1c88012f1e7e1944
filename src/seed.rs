// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Sample dataset inserted on first run so reports have something to show.

use crate::models::*;
use crate::store::Store;
use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use tracing::info;

const CATEGORIES: [(&str, &str, &str); 8] = [
    ("Food", "utensils", "#ef4444"),
    ("Transport", "car", "#f97316"),
    ("Rent", "home", "#eab308"),
    ("Utilities", "bolt", "#22c55e"),
    ("Entertainment", "film", "#3b82f6"),
    ("Shopping", "shopping-bag", "#a855f7"),
    ("Health", "heart", "#ec4899"),
    ("Education", "book", "#06b6d4"),
];

fn on_day(first: NaiveDate, day: u32) -> NaiveDate {
    first.with_day(day).unwrap_or(first)
}

fn first_of_month(today: NaiveDate, back: u32) -> NaiveDate {
    let first = today.with_day(1).unwrap_or(today);
    first.checked_sub_months(Months::new(back)).unwrap_or(first)
}

fn expense(
    amount: i64,
    date: NaiveDate,
    category: &Id,
    notes: &str,
    frequency: Option<Frequency>,
    one_time: bool,
    planned: bool,
) -> ExpenseDraft {
    ExpenseDraft {
        amount: Decimal::from(amount),
        date,
        category_id: category.clone(),
        notes: Some(notes.to_string()),
        is_recurring: frequency.is_some(),
        recurring_frequency: frequency,
        is_one_time: one_time,
        is_planned: planned,
        receipt_image: None,
    }
}

fn income(amount: i64, date: NaiveDate, source: &str, notes: &str, monthly: bool) -> IncomeDraft {
    IncomeDraft {
        amount: Decimal::from(amount),
        date,
        source: source.into(),
        notes: Some(notes.into()),
        is_recurring: monthly,
        recurring_frequency: monthly.then_some(Frequency::Monthly),
    }
}

/// Fills an empty store. Runs as one batch so a single health score is
/// recorded at the end.
pub fn populate(store: &mut Store) {
    let today = store.today();
    let month = store.current_month();
    // months[0] is five months ago, months[5] the current month
    let months: Vec<NaiveDate> = (0..6).rev().map(|b| first_of_month(today, b)).collect();
    let current = months[5];

    store.batch(|s| {
        let cats: Vec<Id> = CATEGORIES
            .iter()
            .map(|(name, icon, color)| {
                s.add_category(CategoryDraft {
                    name: (*name).into(),
                    icon: (*icon).into(),
                    color: (*color).into(),
                })
            })
            .collect();
        let [food, transport, rent, utilities, fun, shopping, health, education] =
            [0, 1, 2, 3, 4, 5, 6, 7].map(|i| &cats[i]);
        let monthly = Some(Frequency::Monthly);

        for draft in [
            expense(450, on_day(current, 5), food, "Grocery shopping", None, false, true),
            expense(120, on_day(current, 10), transport, "Fuel", monthly, false, true),
            expense(1200, on_day(current, 1), rent, "Monthly rent", monthly, false, true),
            expense(85, on_day(current, 15), utilities, "Electricity bill", monthly, false, true),
            expense(200, on_day(current, 20), fun, "Concert tickets", None, true, false),
            expense(350, on_day(current, 18), shopping, "New clothes", None, false, true),
        ] {
            s.add_expense(draft);
        }

        for (i, first) in months[..5].iter().enumerate() {
            let i = i as i64;
            for draft in [
                expense(400 + (i * 23) % 100, on_day(*first, 5), food, "Grocery shopping", None, false, true),
                expense(100 + (i * 11) % 50, on_day(*first, 10), transport, "Fuel", monthly, false, true),
                expense(1200, on_day(*first, 1), rent, "Monthly rent", monthly, false, true),
                expense(70 + (i * 7) % 30, on_day(*first, 15), utilities, "Electricity bill", monthly, false, true),
                expense(150 + (i * 37) % 100, on_day(*first, 20), fun, "Entertainment", None, false, true),
            ] {
                s.add_expense(draft);
            }
        }

        s.add_expense(expense(1500, on_day(months[3], 12), shopping, "New smartphone", None, true, true));
        s.add_expense(expense(800, on_day(months[1], 22), health, "Emergency dental work", None, true, false));
        s.add_expense(expense(2500, on_day(current, 8), education, "Course enrollment", None, true, true));

        s.add_income(income(5000, on_day(current, 1), "Salary", "Monthly salary", true));
        s.add_income(income(500, on_day(current, 15), "Freelance", "Website design project", false));
        for first in &months[..5] {
            s.add_income(income(5000, on_day(*first, 1), "Salary", "Monthly salary", true));
        }
        s.add_income(income(1000, on_day(months[2], 10), "Bonus", "Performance bonus", false));
        s.add_income(income(300, on_day(months[1], 20), "Refund", "Tax refund", false));

        for (cat, amount, spent) in [
            (food, 500, 450),
            (transport, 150, 120),
            (rent, 1200, 1200),
            (utilities, 100, 85),
            (fun, 200, 200),
            (shopping, 300, 350),
        ] {
            s.add_budget(BudgetDraft {
                category_id: cat.clone(),
                amount: Decimal::from(amount),
                month: month.clone(),
                spent: Decimal::from(spent),
            });
        }

        let target = |years: u32, extra_months: u32| {
            current
                .checked_add_months(Months::new(years * 12 + extra_months))
                .unwrap_or(current)
        };
        for (name, target_amount, current_amount, deposit, start, target_date, icon, color) in [
            ("Emergency Fund", 10_000, 6_500, 500, months[0], target(1, 0), "shield", "#ef4444"),
            ("Vacation", 3_000, 1_800, 300, months[2], target(0, 4), "plane", "#3b82f6"),
            ("New Car", 25_000, 8_500, 800, months[1], target(2, 0), "car", "#22c55e"),
        ] {
            s.add_savings_goal(SavingsGoalDraft {
                name: name.into(),
                target_amount: Decimal::from(target_amount),
                current_amount: Decimal::from(current_amount),
                monthly_deposit: Decimal::from(deposit),
                start_date: start,
                target_date,
                icon: icon.into(),
                color: color.into(),
            });
        }
    });

    let data = store.snapshot();
    info!(
        categories = data.categories.len(),
        expenses = data.expenses.len(),
        incomes = data.incomes.len(),
        "sample data inserted"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::HealthScorer;
    use crate::store::Clock;

    #[test]
    fn seeding_records_exactly_one_score() {
        let now = NaiveDate::from_ymd_opt(2025, 3, 31)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let mut store = Store::default().with_clock(Clock::Fixed(now));
        store.subscribe(Box::new(HealthScorer::default()));
        populate(&mut store);

        let data = store.snapshot();
        assert_eq!(data.categories.len(), 8);
        assert_eq!(data.financial_health_scores.len(), 1);
        assert_eq!(data.budgets.len(), 6);
        assert!(data.budgets.iter().all(|b| b.month == "2025-03"));
        // expenses were inserted before budgets, so presets are untouched
        let food = data.category_by_name("food").unwrap();
        assert_eq!(
            data.budget_for(&food.id, "2025-03").unwrap().spent,
            Decimal::from(450)
        );
        assert!(data.expenses.iter().any(|e| e.date == NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()));
    }
}

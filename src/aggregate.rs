// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only views derived from a [`Snapshot`].
//!
//! Nothing here is cached: every call walks the collections again.

use crate::models::{Expense, Id, SavingsGoal, Snapshot};
use crate::utils::{add_months, month_key, round_half_up, shift_month, sum_amounts, to_f64};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use std::collections::BTreeMap;

/// `min(100, round(current / target * 100))`, or 0 for a zero target.
pub fn calculate_percentage(current: Decimal, target: Decimal) -> i64 {
    if target.is_zero() {
        return 0;
    }
    round_half_up(to_f64(current) / to_f64(target) * 100.0).min(100)
}

fn in_month(date: NaiveDate, month: &str) -> bool {
    month_key(date) == month
}

pub fn month_income(data: &Snapshot, month: &str) -> Decimal {
    let amounts = data
        .incomes
        .iter()
        .filter(|i| in_month(i.date, month))
        .map(|i| i.amount);
    sum_amounts(amounts)
}

pub fn month_expenses(data: &Snapshot, month: &str) -> Decimal {
    let amounts = data
        .expenses
        .iter()
        .filter(|e| in_month(e.date, month))
        .map(|e| e.amount);
    sum_amounts(amounts)
}

pub fn category_spend(data: &Snapshot, month: &str) -> BTreeMap<Id, Decimal> {
    let mut out = BTreeMap::new();
    for e in data.expenses.iter().filter(|e| in_month(e.date, month)) {
        let total = out.entry(e.category_id.clone()).or_insert(Decimal::ZERO);
        *total = total.saturating_add(e.amount);
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLine {
    pub budget_id: Option<Id>,
    pub category_id: Id,
    pub category_name: String,
    pub category_color: String,
    pub amount: Decimal,
    pub spent: Decimal,
    pub progress: i64,
    pub is_over_budget: bool,
}

/// One line per category; spend comes from the expenses themselves, not
/// from `Budget::spent`.
pub fn budget_overview(data: &Snapshot, month: &str) -> Vec<BudgetLine> {
    let spend = category_spend(data, month);
    data.categories
        .iter()
        .map(|c| {
            let budget = data.budget_for(&c.id, month);
            let amount = budget.map(|b| b.amount).unwrap_or(Decimal::ZERO);
            let spent = spend.get(&c.id).copied().unwrap_or(Decimal::ZERO);
            let has_ceiling = amount > Decimal::ZERO;
            BudgetLine {
                budget_id: budget.map(|b| b.id.clone()),
                category_id: c.id.clone(),
                category_name: c.name.clone(),
                category_color: c.color.clone(),
                amount,
                spent,
                progress: if has_ceiling {
                    calculate_percentage(spent, amount)
                } else {
                    0
                },
                is_over_budget: has_ceiling && spent > amount,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetTotals {
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    /// Not capped at 100.
    pub overall_progress: f64,
    pub is_over_budget: bool,
}

pub fn budget_totals(lines: &[BudgetLine]) -> BudgetTotals {
    let total_budget = sum_amounts(lines.iter().map(|l| l.amount));
    let total_spent = sum_amounts(lines.iter().map(|l| l.spent));
    let overall_progress = if total_budget > Decimal::ZERO {
        to_f64(total_spent) / to_f64(total_budget) * 100.0
    } else {
        0.0
    };
    BudgetTotals {
        total_budget,
        total_spent,
        overall_progress,
        is_over_budget: total_spent > total_budget,
    }
}

/// Lifetime income minus lifetime expenses plus what sits in savings goals.
/// Goal deposits drawn from counted income are counted twice.
pub fn net_worth(data: &Snapshot) -> Decimal {
    let income = sum_amounts(data.incomes.iter().map(|i| i.amount));
    let expenses = sum_amounts(data.expenses.iter().map(|e| e.amount));
    let goals = sum_amounts(data.savings_goals.iter().map(|g| g.current_amount));
    income.saturating_sub(expenses).saturating_add(goals)
}

/// The last `n` month keys ending with `today`'s month, oldest first.
pub fn month_range(n: usize, today: NaiveDate) -> Vec<String> {
    (0..n as i32).rev().map(|i| shift_month(today, -i)).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthFlow {
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub savings: Decimal,
}

pub fn monthly_cashflow(data: &Snapshot, months: &[String]) -> Vec<MonthFlow> {
    months
        .iter()
        .map(|m| {
            let income = month_income(data, m);
            let expenses = month_expenses(data, m);
            MonthFlow {
                month: m.clone(),
                income,
                expenses,
                savings: income.saturating_sub(expenses),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub name: String,
    pub color: String,
    pub value: Decimal,
}

/// Month spend per category, largest first. Orphaned ids show as "Other".
pub fn expense_breakdown(data: &Snapshot, month: &str) -> Vec<CategoryShare> {
    let mut out: Vec<CategoryShare> = category_spend(data, month)
        .into_iter()
        .map(|(cid, value)| match data.category(&cid) {
            Some(c) => CategoryShare {
                name: c.name.clone(),
                color: c.color.clone(),
                value,
            },
            None => CategoryShare {
                name: "Other".into(),
                color: "#888888".into(),
                value,
            },
        })
        .collect();
    out.sort_by(|a, b| b.value.cmp(&a.value));
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OneTimeCategory {
    pub category_id: Id,
    pub name: String,
    pub planned: Decimal,
    pub unplanned: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OneTimeSummary {
    pub planned_total: Decimal,
    pub unplanned_total: Decimal,
    pub by_category: Vec<OneTimeCategory>,
}

pub fn one_time_summary(data: &Snapshot) -> OneTimeSummary {
    let mut per_cat: BTreeMap<Id, (Decimal, Decimal)> = BTreeMap::new();
    let mut planned_total = Decimal::ZERO;
    let mut unplanned_total = Decimal::ZERO;
    for e in data.expenses.iter().filter(|e| e.is_one_time) {
        let entry = per_cat
            .entry(e.category_id.clone())
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        if e.is_planned {
            planned_total = planned_total.saturating_add(e.amount);
            entry.0 = entry.0.saturating_add(e.amount);
        } else {
            unplanned_total = unplanned_total.saturating_add(e.amount);
            entry.1 = entry.1.saturating_add(e.amount);
        }
    }
    let by_category = per_cat
        .into_iter()
        .map(|(cid, (planned, unplanned))| OneTimeCategory {
            name: data
                .category(&cid)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "Other".into()),
            category_id: cid,
            planned,
            unplanned,
        })
        .collect();
    OneTimeSummary {
        planned_total,
        unplanned_total,
        by_category,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Date,
    Amount,
}

#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub month: Option<String>,
    pub category_id: Option<Id>,
    pub one_time_only: bool,
    pub planned: Option<bool>,
    pub sort: SortField,
    pub ascending: bool,
    pub limit: Option<usize>,
}

pub fn filter_expenses<'a>(data: &'a Snapshot, f: &ExpenseFilter) -> Vec<&'a Expense> {
    let mut out: Vec<&Expense> = data
        .expenses
        .iter()
        .filter(|e| f.month.as_deref().is_none_or(|m| in_month(e.date, m)))
        .filter(|e| f.category_id.as_deref().is_none_or(|c| e.category_id == c))
        .filter(|e| !f.one_time_only || e.is_one_time)
        .filter(|e| f.planned.is_none_or(|p| e.is_planned == p))
        .collect();
    match f.sort {
        SortField::Date => out.sort_by(|a, b| a.date.cmp(&b.date)),
        SortField::Amount => out.sort_by(|a, b| a.amount.cmp(&b.amount)),
    }
    if !f.ascending {
        out.reverse();
    }
    if let Some(limit) = f.limit {
        out.truncate(limit);
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsOverview {
    pub total_savings: Decimal,
    /// Percent of lifetime income kept.
    pub savings_rate: f64,
    pub monthly: Vec<MonthFlow>,
    pub tips: Vec<String>,
}

pub fn savings_overview(data: &Snapshot, today: NaiveDate) -> SavingsOverview {
    let monthly = monthly_cashflow(data, &month_range(12, today));
    let income = sum_amounts(data.incomes.iter().map(|i| i.amount));
    let expenses = sum_amounts(data.expenses.iter().map(|e| e.amount));
    let total_savings = income.saturating_sub(expenses);
    let savings_rate = if income > Decimal::ZERO {
        to_f64(total_savings) / to_f64(income) * 100.0
    } else {
        0.0
    };
    let tips = savings_tips(data, &monthly, savings_rate);
    SavingsOverview {
        total_savings,
        savings_rate,
        monthly,
        tips,
    }
}

fn savings_tips(data: &Snapshot, monthly: &[MonthFlow], rate: f64) -> Vec<String> {
    let mut tips = vec![
        "Aim to save at least 20% of your monthly income.".to_string(),
        "Set up automatic transfers to your savings account on payday.".to_string(),
    ];

    if rate < 10.0 {
        tips.push("Your savings rate is below 10%. Try to reduce non-essential expenses.".into());
    } else if rate >= 20.0 {
        tips.push("Great job! You're saving more than 20% of your income.".into());
    }

    if let [.., a, b, c] = monthly {
        if a.savings > b.savings && b.savings > c.savings {
            tips.push(
                "Your savings have been declining for the last 3 months. Review your spending habits."
                    .into(),
            );
        }
    }

    // first-seen order, so a tie goes to the category spent in first
    let mut per_cat: Vec<(&str, Decimal)> = Vec::new();
    for e in &data.expenses {
        match per_cat.iter_mut().find(|(cid, _)| *cid == e.category_id) {
            Some((_, total)) => *total = total.saturating_add(e.amount),
            None => per_cat.push((e.category_id.as_str(), e.amount)),
        }
    }
    let top = per_cat
        .into_iter()
        .reduce(|best, next| if next.1 > best.1 { next } else { best });
    if let Some(category) = top.and_then(|(cid, _)| data.category(cid)) {
        tips.push(format!(
            "Your highest spending category is {}. Consider setting a budget for this category.",
            category.name
        ));
    }
    tips
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub goal_id: Id,
    pub name: String,
    pub progress: i64,
    /// `None` when nothing is deposited each month.
    pub months_to_goal: Option<u32>,
    pub projected_date: Option<NaiveDate>,
}

pub fn goal_progress(goal: &SavingsGoal, today: NaiveDate) -> GoalProgress {
    let remaining = goal.target_amount.saturating_sub(goal.current_amount);
    let months_to_goal = if remaining <= Decimal::ZERO {
        Some(0)
    } else if goal.monthly_deposit <= Decimal::ZERO {
        None
    } else {
        remaining
            .checked_div(goal.monthly_deposit)
            .and_then(|m| m.ceil().to_u32())
    };
    GoalProgress {
        goal_id: goal.id.clone(),
        name: goal.name.clone(),
        progress: calculate_percentage(goal.current_amount, goal.target_amount),
        months_to_goal,
        projected_date: months_to_goal.and_then(|m| add_months(today, m)),
    }
}

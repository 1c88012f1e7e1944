// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Financial health score: a 0-100 composite of the current month's
//! savings ratio, budget adherence and two fixed placeholder ratios.

use crate::aggregate::{month_expenses, month_income};
use crate::models::{Budget, FinancialHealthScore, Snapshot};
use crate::store::{LedgerEvent, LedgerObserver};
use crate::utils::{month_key, round_half_up, to_f64};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

/// No debt tracking exists, so the debt component is fixed.
pub const DEBT_RATIO: f64 = 0.8;
/// No investment tracking exists, so the investment component is fixed.
pub const INVESTMENT_RATIO: f64 = 0.6;

const SAVINGS_WEIGHT: f64 = 0.4;
const BUDGET_WEIGHT: f64 = 0.3;
const DEBT_WEIGHT: f64 = 0.15;
const INVESTMENT_WEIGHT: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthBreakdown {
    /// Unclamped weighted sum, rounded.
    pub raw_score: i64,
    pub savings_ratio: f64,
    pub budget_adherence: f64,
    pub debt_ratio: f64,
    pub investment_ratio: f64,
}

impl HealthBreakdown {
    pub fn score(&self, clamp: bool) -> i64 {
        if clamp {
            self.raw_score.clamp(0, 100)
        } else {
            self.raw_score
        }
    }
}

/// Can go negative when spending exceeds income.
pub fn savings_ratio(income: Decimal, expenses: Decimal) -> f64 {
    if income > Decimal::ZERO {
        to_f64(income.saturating_sub(expenses)) / to_f64(income)
    } else {
        0.0
    }
}

/// Capped at 1 but not floored: heavy overspend drives it below zero.
pub fn budget_adherence<'a>(budgets: impl IntoIterator<Item = &'a Budget>) -> f64 {
    let mut any = false;
    let mut total_amount = Decimal::ZERO;
    let mut total_spent = Decimal::ZERO;
    for b in budgets {
        any = true;
        total_amount = total_amount.saturating_add(b.amount);
        total_spent = total_spent.saturating_add(b.spent);
    }
    if !any || total_amount <= Decimal::ZERO {
        return 1.0;
    }
    let amount = to_f64(total_amount);
    ((amount - to_f64(total_spent)) / amount + 0.5).min(1.0)
}

pub fn compute_health_score<'a>(
    income: Decimal,
    expenses: Decimal,
    budgets: impl IntoIterator<Item = &'a Budget>,
) -> HealthBreakdown {
    let savings_ratio = savings_ratio(income, expenses);
    let budget_adherence = budget_adherence(budgets);
    let weighted = savings_ratio * SAVINGS_WEIGHT
        + budget_adherence * BUDGET_WEIGHT
        + DEBT_RATIO * DEBT_WEIGHT
        + INVESTMENT_RATIO * INVESTMENT_WEIGHT;
    HealthBreakdown {
        raw_score: round_half_up(weighted * 100.0),
        savings_ratio,
        budget_adherence,
        debt_ratio: DEBT_RATIO,
        investment_ratio: INVESTMENT_RATIO,
    }
}

/// Scores the month containing `now` from the snapshot's ledger and budgets.
pub fn score_snapshot(data: &Snapshot, now: NaiveDateTime) -> HealthBreakdown {
    let month = month_key(now.date());
    compute_health_score(
        month_income(data, &month),
        month_expenses(data, &month),
        data.budgets.iter().filter(|b| b.month == month),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthStatus {
    Excellent,
    Good,
    Fair,
    NeedsAttention,
}

impl HealthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsAttention => "Needs Attention",
        }
    }
}

pub fn health_status(score: i64) -> HealthStatus {
    match score {
        s if s >= 80 => HealthStatus::Excellent,
        s if s >= 60 => HealthStatus::Good,
        s if s >= 40 => HealthStatus::Fair,
        _ => HealthStatus::NeedsAttention,
    }
}

/// Appends a score record on every ledger change.
#[derive(Debug, Clone)]
pub struct HealthScorer {
    clamp: bool,
    history_limit: Option<usize>,
}

impl Default for HealthScorer {
    fn default() -> Self {
        Self {
            clamp: true,
            history_limit: None,
        }
    }
}

impl HealthScorer {
    pub fn new(clamp: bool, history_limit: Option<usize>) -> Self {
        Self {
            clamp,
            history_limit,
        }
    }

    pub fn record(&self, data: &mut Snapshot, now: NaiveDateTime) -> FinancialHealthScore {
        let b = score_snapshot(data, now);
        let entry = FinancialHealthScore {
            score: b.score(self.clamp),
            date: now,
            savings_ratio: b.savings_ratio,
            budget_adherence: b.budget_adherence,
            debt_ratio: b.debt_ratio,
            investment_ratio: b.investment_ratio,
        };
        data.financial_health_scores.push(entry.clone());
        if let Some(limit) = self.history_limit {
            let len = data.financial_health_scores.len();
            if len > limit {
                data.financial_health_scores.drain(..len - limit);
            }
        }
        debug!(score = entry.score, raw = b.raw_score, "health score recorded");
        entry
    }
}

impl LedgerObserver for HealthScorer {
    fn on_ledger_change(&mut self, data: &mut Snapshot, event: &LedgerEvent) {
        self.record(data, event.at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn budget(amount: &str, spent: &str) -> Budget {
        Budget {
            id: "b".into(),
            category_id: "c".into(),
            amount: dec(amount),
            month: "2025-08".into(),
            spent: dec(spent),
        }
    }

    #[test]
    fn quarter_savings_no_budgets_scores_61() {
        let none: [Budget; 0] = [];
        let b = compute_health_score(dec("5000"), dec("3750"), &none);
        assert_eq!(b.savings_ratio, 0.25);
        assert_eq!(b.budget_adherence, 1.0);
        assert_eq!(b.raw_score, 61);
        assert_eq!(health_status(b.score(true)), HealthStatus::Good);
    }

    #[test]
    fn adherence_caps_at_one_and_can_go_negative() {
        let under = [budget("1000", "100")];
        assert_eq!(budget_adherence(&under), 1.0);
        let over = [budget("100", "300")];
        assert!((budget_adherence(&over) - (-1.5)).abs() < 1e-12);
        let zero = [budget("0", "50")];
        assert_eq!(budget_adherence(&zero), 1.0);
    }

    #[test]
    fn pathological_inputs_clamp_only_when_asked() {
        let none: [Budget; 0] = [];
        let b = compute_health_score(dec("100"), dec("1000"), &none);
        assert!(b.raw_score < 0);
        assert_eq!(b.score(true), 0);
        assert_eq!(b.score(false), b.raw_score);
    }

    #[test]
    fn history_limit_drops_oldest() {
        let scorer = HealthScorer::new(true, Some(2));
        let mut data = Snapshot::default();
        let t = |d: u32| {
            chrono::NaiveDate::from_ymd_opt(2025, 8, d)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap()
        };
        for d in 1..=3 {
            scorer.record(&mut data, t(d));
        }
        assert_eq!(data.financial_health_scores.len(), 2);
        assert_eq!(data.financial_health_scores[0].date, t(2));
    }

    #[test]
    fn no_income_means_zero_savings_ratio() {
        let none: [Budget; 0] = [];
        let b = compute_health_score(Decimal::ZERO, dec("40"), &none);
        assert_eq!(b.savings_ratio, 0.0);
        // 0*0.4 + 0.3 + 0.12 + 0.09
        assert_eq!(b.raw_score, 51);
        assert_eq!(health_status(b.raw_score), HealthStatus::Fair);
    }
}

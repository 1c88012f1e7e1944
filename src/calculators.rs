// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Time-value-of-money calculators. Rates are annual percentages,
//! durations are years; results are rounded once, at the end.

use crate::utils::round_half_up;
use serde::Serialize;

pub const YEARS_IN_RETIREMENT: f64 = 25.0;
pub const INFLATION_PCT: f64 = 6.0;

fn monthly_rate(rate_pct: f64) -> f64 {
    rate_pct / 100.0 / 12.0
}

/// Value after `months` of contributions of 1 made at the start of each
/// month. Falls back to the zero-rate limit instead of dividing by zero.
fn annuity_due_factor(r: f64, months: f64) -> f64 {
    if r == 0.0 {
        return months;
    }
    ((1.0 + r).powf(months) - 1.0) / r * (1.0 + r)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub maturity_amount: i64,
    pub total_investment: i64,
    pub total_returns: i64,
}

/// Month-by-month compounding of a starting principal plus a monthly
/// contribution: `fv = (fv + C) * (1 + r)` for every month.
pub fn future_value(principal: f64, monthly: f64, rate_pct: f64, years: f64) -> i64 {
    let r = monthly_rate(rate_pct);
    let months = years * 12.0;
    let mut fv = principal;
    let mut i = 0.0;
    while i < months {
        fv = (fv + monthly) * (1.0 + r);
        i += 1.0;
    }
    round_half_up(fv)
}

pub fn sip(monthly: f64, rate_pct: f64, years: f64) -> Projection {
    let n = years * 12.0;
    let maturity = monthly * annuity_due_factor(monthly_rate(rate_pct), n);
    let invested = monthly * n;
    Projection {
        maturity_amount: round_half_up(maturity),
        total_investment: round_half_up(invested),
        total_returns: round_half_up(maturity - invested),
    }
}

pub fn lumpsum(principal: f64, rate_pct: f64, years: f64) -> Projection {
    let maturity = principal * (1.0 + rate_pct / 100.0).powf(years);
    Projection {
        maturity_amount: round_half_up(maturity),
        total_investment: round_half_up(principal),
        total_returns: round_half_up(maturity - principal),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetirementInput {
    pub current_age: f64,
    pub retirement_age: f64,
    pub monthly_expense: f64,
    pub current_savings: f64,
    pub expected_rate_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementPlan {
    pub years_to_retirement: f64,
    pub future_monthly_expense: i64,
    pub required_corpus: i64,
    pub future_value_of_current_savings: i64,
    /// Negative when current savings already cover the corpus.
    pub additional_corpus_needed: i64,
    /// Never negative; 0 when there is nothing left to save or no time left.
    pub required_monthly_sip: i64,
}

pub fn retirement(input: RetirementInput) -> RetirementPlan {
    let years = input.retirement_age - input.current_age;
    let future_monthly_expense =
        input.monthly_expense * (1.0 + INFLATION_PCT / 100.0).powf(years);
    let required_corpus = future_monthly_expense * 12.0 * YEARS_IN_RETIREMENT;
    let future_savings = input.current_savings * (1.0 + input.expected_rate_pct / 100.0).powf(years);
    let additional = required_corpus - future_savings;

    let months = years * 12.0;
    let required_monthly_sip = if additional <= 0.0 || months <= 0.0 {
        0.0
    } else {
        additional / annuity_due_factor(monthly_rate(input.expected_rate_pct), months)
    };

    RetirementPlan {
        years_to_retirement: years,
        future_monthly_expense: round_half_up(future_monthly_expense),
        required_corpus: round_half_up(required_corpus),
        future_value_of_current_savings: round_half_up(future_savings),
        additional_corpus_needed: round_half_up(additional),
        required_monthly_sip: round_half_up(required_monthly_sip),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Sip,
    Lumpsum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearPoint {
    pub year: u32,
    pub invested: i64,
    pub returns: i64,
    pub total: i64,
}

/// One point per whole year, each recomputed from scratch.
pub fn growth_series(kind: SeriesKind, amount: f64, rate_pct: f64, years: f64) -> Vec<YearPoint> {
    let mut out = Vec::new();
    let mut year = 1u32;
    while f64::from(year) <= years {
        let p = match kind {
            SeriesKind::Sip => sip(amount, rate_pct, f64::from(year)),
            SeriesKind::Lumpsum => lumpsum(amount, rate_pct, f64::from(year)),
        };
        out.push(YearPoint {
            year,
            invested: p.total_investment,
            returns: p.total_returns,
            total: p.maturity_amount,
        });
        year += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sip_of_nothing_is_nothing() {
        for rate in [0.0, 5.0, 12.0] {
            for years in [0.0, 1.0, 30.0] {
                assert_eq!(sip(0.0, rate, years).maturity_amount, 0);
            }
        }
    }

    #[test]
    fn sip_matches_closed_form() {
        // 5000/month, 12%, 10 years
        let p = sip(5000.0, 12.0, 10.0);
        assert_eq!(p.total_investment, 600_000);
        assert_eq!(p.maturity_amount, 1_161_695);
        assert_eq!(p.total_returns, p.maturity_amount - p.total_investment);
    }

    #[test]
    fn zero_rate_sip_is_the_sum_of_contributions() {
        let p = sip(1000.0, 0.0, 2.0);
        assert_eq!(p.maturity_amount, 24_000);
        assert_eq!(p.total_returns, 0);
    }

    #[test]
    fn lumpsum_without_rate_does_not_grow() {
        for years in [0.0, 1.0, 7.0, 40.0] {
            assert_eq!(lumpsum(100_000.0, 0.0, years).maturity_amount, 100_000);
        }
        let p = lumpsum(100_000.0, 12.0, 10.0);
        assert_eq!(p.maturity_amount, 310_585);
        assert_eq!(p.total_returns, 210_585);
    }

    #[test]
    fn future_value_iterates_monthly() {
        assert_eq!(future_value(1000.0, 0.0, 0.0, 5.0), 1000);
        assert_eq!(future_value(0.0, 100.0, 0.0, 1.0), 1200);
        // same cash flows as a SIP when there is no principal
        assert_eq!(
            future_value(0.0, 5000.0, 12.0, 10.0),
            sip(5000.0, 12.0, 10.0).maturity_amount
        );
    }

    #[test]
    fn retirement_example() {
        let plan = retirement(RetirementInput {
            current_age: 30.0,
            retirement_age: 60.0,
            monthly_expense: 50_000.0,
            current_savings: 500_000.0,
            expected_rate_pct: 8.0,
        });
        assert_eq!(plan.years_to_retirement, 30.0);
        assert!((plan.future_monthly_expense - 287_174).abs() <= 1);
        let expected_corpus = 50_000.0 * 1.06f64.powf(30.0) * 12.0 * 25.0;
        assert_eq!(plan.required_corpus, round_half_up(expected_corpus));
        assert!(plan.required_monthly_sip > 0);
    }

    #[test]
    fn surplus_savings_need_no_sip() {
        let plan = retirement(RetirementInput {
            current_age: 50.0,
            retirement_age: 55.0,
            monthly_expense: 1000.0,
            current_savings: 10_000_000.0,
            expected_rate_pct: 8.0,
        });
        assert!(plan.additional_corpus_needed < 0);
        assert_eq!(plan.required_monthly_sip, 0);
    }

    #[test]
    fn series_recomputes_each_year() {
        let s = growth_series(SeriesKind::Lumpsum, 1000.0, 10.0, 3.0);
        let totals: Vec<i64> = s.iter().map(|p| p.total).collect();
        assert_eq!(totals, [1100, 1210, 1331]);
        assert_eq!(s[2].invested, 1000);

        let s = growth_series(SeriesKind::Sip, 100.0, 0.0, 2.5);
        assert_eq!(s.len(), 2);
        assert_eq!(s[1].invested, 2400);
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{report_missing, required};
use crate::calculators::{
    Projection, RetirementInput, SeriesKind, future_value, growth_series, lumpsum, retirement, sip,
};
use crate::models::{CalculationKind, InvestmentCalculationDraft};
use crate::store::Store;
use crate::utils::{from_f64, maybe_print_json, parse_number, pretty_table, round_half_up};
use anyhow::Result;
use serde_json::json;

fn number(sub: &clap::ArgMatches, name: &str) -> Result<f64> {
    Ok(parse_number(required(sub, name)?))
}

fn months(years: f64) -> u32 {
    round_half_up(years * 12.0).max(0) as u32
}

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("fv", sub)) => {
            let value = future_value(
                number(sub, "principal")?,
                number(sub, "monthly")?,
                number(sub, "rate")?,
                number(sub, "years")?,
            );
            if !maybe_print_json(
                sub.get_flag("json"),
                sub.get_flag("jsonl"),
                &json!({ "futureValue": value }),
            )? {
                println!("Future value: {}", value);
            }
        }
        Some(("sip", sub)) => {
            let monthly = number(sub, "monthly")?;
            let (rate, years) = (number(sub, "rate")?, number(sub, "years")?);
            let p = sip(monthly, rate, years);
            projection(store, sub, CalculationKind::Sip, SeriesKind::Sip, monthly, rate, years, p)?;
        }
        Some(("lumpsum", sub)) => {
            let amount = number(sub, "amount")?;
            let (rate, years) = (number(sub, "rate")?, number(sub, "years")?);
            let p = lumpsum(amount, rate, years);
            projection(
                store,
                sub,
                CalculationKind::Lumpsum,
                SeriesKind::Lumpsum,
                amount,
                rate,
                years,
                p,
            )?;
        }
        Some(("retirement", sub)) => retire(store, sub)?,
        Some(("history", sub)) => {
            let data = store.snapshot();
            let calcs = &data.investment_calculations;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), calcs)? {
                let rows = calcs
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.clone(),
                            c.kind.to_string(),
                            c.amount.to_string(),
                            format!("{} mo", c.duration),
                            format!("{}%", c.interest_rate),
                            c.result.to_string(),
                            c.created_at.format("%Y-%m-%d %H:%M").to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["Id", "Type", "Amount", "Duration", "Rate", "Result", "Created"],
                        rows
                    )
                );
            }
        }
        Some(("rm", sub)) => {
            let id = required(sub, "id")?;
            let found = store.delete_investment_calculation(id);
            report_missing(found, "calculation", id);
        }
        _ => {}
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn projection(
    store: &mut Store,
    sub: &clap::ArgMatches,
    kind: CalculationKind,
    series_kind: SeriesKind,
    amount: f64,
    rate: f64,
    years: f64,
    p: Projection,
) -> Result<()> {
    if sub.get_flag("save") {
        let id = store.add_investment_calculation(InvestmentCalculationDraft {
            kind,
            amount: from_f64(amount),
            duration: months(years),
            interest_rate: rate,
            result: p.maturity_amount,
        });
        tracing::info!(%id, %kind, "calculation saved");
    }

    let series = if sub.get_flag("series") {
        growth_series(series_kind, amount, rate, years)
    } else {
        Vec::new()
    };
    let (json_flag, jsonl_flag) = (sub.get_flag("json"), sub.get_flag("jsonl"));
    if !series.is_empty() && jsonl_flag {
        maybe_print_json(false, true, &series)?;
        return Ok(());
    }
    if maybe_print_json(
        json_flag,
        jsonl_flag,
        &json!({ "projection": p, "series": series }),
    )? {
        return Ok(());
    }

    println!(
        "{}",
        pretty_table(
            &["Invested", "Returns", "Maturity"],
            vec![vec![
                p.total_investment.to_string(),
                p.total_returns.to_string(),
                p.maturity_amount.to_string(),
            ]]
        )
    );
    if !series.is_empty() {
        let rows = series
            .iter()
            .map(|y| {
                vec![
                    y.year.to_string(),
                    y.invested.to_string(),
                    y.returns.to_string(),
                    y.total.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Year", "Invested", "Returns", "Total"], rows)
        );
    }
    Ok(())
}

fn retire(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let input = RetirementInput {
        current_age: number(sub, "current-age")?,
        retirement_age: number(sub, "retirement-age")?,
        monthly_expense: number(sub, "monthly-expense")?,
        current_savings: number(sub, "current-savings")?,
        expected_rate_pct: number(sub, "rate")?,
    };
    let plan = retirement(input);

    if sub.get_flag("save") {
        store.add_investment_calculation(InvestmentCalculationDraft {
            kind: CalculationKind::Retirement,
            amount: from_f64(input.monthly_expense),
            duration: months(plan.years_to_retirement),
            interest_rate: input.expected_rate_pct,
            result: plan.required_corpus,
        });
    }

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &plan)? {
        return Ok(());
    }
    let rows = vec![
        vec!["Years to retirement".into(), plan.years_to_retirement.to_string()],
        vec![
            "Monthly expense at retirement".into(),
            plan.future_monthly_expense.to_string(),
        ],
        vec!["Required corpus".into(), plan.required_corpus.to_string()],
        vec![
            "Current savings grown".into(),
            plan.future_value_of_current_savings.to_string(),
        ],
        vec![
            "Additional corpus needed".into(),
            plan.additional_corpus_needed.to_string(),
        ],
        vec![
            "Required monthly SIP".into(),
            plan.required_monthly_sip.to_string(),
        ],
    ];
    println!("{}", pretty_table(&["", "Value"], rows));
    Ok(())
}

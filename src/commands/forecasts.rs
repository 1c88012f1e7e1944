// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{report_missing, required};
use crate::models::FinancialForecastDraft;
use crate::store::Store;
use crate::utils::{maybe_print_json, parse_amount, parse_number, pretty_table};
use anyhow::Result;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = required(sub, "name")?;
            let id = store.add_financial_forecast(FinancialForecastDraft {
                name: name.to_string(),
                income_growth: parse_number(required(sub, "income-growth")?),
                inflation: parse_number(required(sub, "inflation")?),
                investment_returns: parse_number(required(sub, "returns")?),
                additional_savings: parse_amount(required(sub, "additional-savings")?),
                additional_investment: parse_amount(required(sub, "additional-investment")?),
                years: sub.get_one::<u32>("years").copied().unwrap_or(5),
            });
            println!("Saved forecast '{}' ({})", name, id);
        }
        Some(("list", sub)) => {
            let forecasts = &store.snapshot().financial_forecasts;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), forecasts)? {
                let rows = forecasts
                    .iter()
                    .map(|f| {
                        vec![
                            f.id.clone(),
                            f.name.clone(),
                            format!("{}%", f.income_growth),
                            format!("{}%", f.inflation),
                            format!("{}%", f.investment_returns),
                            f.additional_savings.to_string(),
                            f.additional_investment.to_string(),
                            f.years.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &[
                            "Id",
                            "Name",
                            "Income growth",
                            "Inflation",
                            "Returns",
                            "Extra savings",
                            "Extra investment",
                            "Years",
                        ],
                        rows
                    )
                );
            }
        }
        Some(("rm", sub)) => {
            let id = required(sub, "id")?;
            let found = store.delete_financial_forecast(id);
            report_missing(found, "forecast", id);
        }
        _ => {}
    }
    Ok(())
}

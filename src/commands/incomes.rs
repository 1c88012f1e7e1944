// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{date_or_today, frequency, opt_amount, opt_date, report_missing, required};
use crate::models::{IncomeDraft, IncomePatch};
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, month_key, parse_amount, parse_month, pretty_table};
use anyhow::Result;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let amount = parse_amount(required(sub, "amount")?);
            let source = required(sub, "source")?;
            let date = date_or_today(store, sub)?;
            let recurring = frequency(sub)?;
            let mut draft = IncomeDraft::new(amount, date, source);
            draft.notes = sub.get_one::<String>("notes").cloned();
            draft.is_recurring = recurring.is_some();
            draft.recurring_frequency = recurring;
            let id = store.add_income(draft);
            println!("Recorded income {} from {} ({})", amount, source, id);
        }
        Some(("list", sub)) => {
            let data = store.snapshot();
            let month = sub.get_one::<String>("month").map(|s| parse_month(s)).transpose()?;
            let mut incomes: Vec<_> = data
                .incomes
                .iter()
                .filter(|i| month.as_deref().is_none_or(|m| month_key(i.date) == m))
                .collect();
            incomes.sort_by(|a, b| b.date.cmp(&a.date));
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &incomes)? {
                let sym = &data.user.currency;
                let rows = incomes
                    .iter()
                    .map(|i| {
                        vec![
                            i.id.clone(),
                            i.date.to_string(),
                            i.source.clone(),
                            fmt_money(&i.amount, sym),
                            i.recurring_frequency
                                .map(|f| f.to_string())
                                .unwrap_or_default(),
                            i.notes.clone().unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Id", "Date", "Source", "Amount", "Recurring", "Notes"], rows)
                );
            }
        }
        Some(("edit", sub)) => {
            let id = required(sub, "id")?;
            let recurring = frequency(sub)?;
            let found = store.update_income(
                id,
                IncomePatch {
                    amount: opt_amount(sub, "amount"),
                    date: opt_date(sub, "date")?,
                    source: sub.get_one::<String>("source").cloned(),
                    notes: sub.get_one::<String>("notes").map(|n| Some(n.clone())),
                    is_recurring: recurring.map(|_| true),
                    recurring_frequency: recurring.map(Some),
                },
            );
            report_missing(found, "income", id);
        }
        Some(("rm", sub)) => {
            let id = required(sub, "id")?;
            let found = store.delete_income(id);
            report_missing(found, "income", id);
        }
        _ => {}
    }
    Ok(())
}

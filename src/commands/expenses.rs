// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{
    category_name, date_or_today, frequency, opt_amount, opt_date, report_missing, required,
    resolve_category,
};
use crate::aggregate::{ExpenseFilter, SortField, filter_expenses, one_time_summary};
use crate::models::{ExpenseDraft, ExpensePatch};
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_month, pretty_table};
use anyhow::Result;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => {
            let id = required(sub, "id")?;
            let found = store.delete_expense(id);
            report_missing(found, "expense", id);
            if found {
                println!("Removed expense {}", id);
            }
        }
        Some(("one-time", sub)) => one_time(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_amount(required(sub, "amount")?);
    let category_id = resolve_category(store.snapshot(), required(sub, "category")?)?;
    let date = date_or_today(store, sub)?;
    let recurring = frequency(sub)?;

    let mut draft = ExpenseDraft::new(amount, date, category_id);
    draft.notes = sub.get_one::<String>("notes").cloned();
    draft.is_recurring = recurring.is_some();
    draft.recurring_frequency = recurring;
    draft.is_one_time = sub.get_flag("one-time");
    draft.is_planned = sub.get_flag("planned");
    draft.receipt_image = sub.get_one::<String>("receipt").cloned();

    let id = store.add_expense(draft);
    println!("Recorded expense {} on {} ({})", amount, date, id);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let data = store.snapshot();
    let filter = ExpenseFilter {
        month: sub.get_one::<String>("month").map(|s| parse_month(s)).transpose()?,
        category_id: sub
            .get_one::<String>("category")
            .map(|c| resolve_category(data, c))
            .transpose()?,
        one_time_only: sub.get_flag("one-time"),
        planned: if sub.get_flag("planned") {
            Some(true)
        } else if sub.get_flag("unplanned") {
            Some(false)
        } else {
            None
        },
        sort: match sub.get_one::<String>("sort").map(String::as_str) {
            Some("amount") => SortField::Amount,
            _ => SortField::Date,
        },
        ascending: sub.get_flag("asc"),
        limit: sub.get_one::<usize>("limit").copied(),
    };
    let rows = filter_expenses(data, &filter);

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        return Ok(());
    }
    let sym = &data.user.currency;
    let table = rows
        .iter()
        .map(|e| {
            let kind = match (e.is_one_time, e.is_planned) {
                (true, true) => "one-time, planned".to_string(),
                (true, false) => "one-time, unplanned".to_string(),
                _ => e
                    .recurring_frequency
                    .map(|f| f.to_string())
                    .unwrap_or_default(),
            };
            vec![
                e.id.clone(),
                e.date.to_string(),
                category_name(data, &e.category_id),
                fmt_money(&e.amount, sym),
                kind,
                e.notes.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Date", "Category", "Amount", "Kind", "Notes"], table)
    );
    Ok(())
}

fn edit(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let category_id = sub
        .get_one::<String>("category")
        .map(|c| resolve_category(store.snapshot(), c))
        .transpose()?;
    let recurring = frequency(sub)?;
    let patch = ExpensePatch {
        amount: opt_amount(sub, "amount"),
        date: opt_date(sub, "date")?,
        category_id,
        notes: sub.get_one::<String>("notes").map(|n| Some(n.clone())),
        is_recurring: recurring.map(|_| true),
        recurring_frequency: recurring.map(Some),
        is_one_time: sub.get_one::<bool>("one-time").copied(),
        is_planned: sub.get_one::<bool>("planned").copied(),
        receipt_image: None,
    };
    let found = store.update_expense(id, patch);
    report_missing(found, "expense", id);
    if found {
        println!("Updated expense {}", id);
    }
    Ok(())
}

fn one_time(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let data = store.snapshot();
    let summary = one_time_summary(data);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary)? {
        return Ok(());
    }
    let sym = &data.user.currency;
    let rows = summary
        .by_category
        .iter()
        .map(|c| {
            vec![
                c.name.clone(),
                fmt_money(&c.planned, sym),
                fmt_money(&c.unplanned, sym),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Planned", "Unplanned"], rows));
    println!(
        "Planned: {}  Unplanned: {}",
        fmt_money(&summary.planned_total, sym),
        fmt_money(&summary.unplanned_total, sym)
    );
    Ok(())
}

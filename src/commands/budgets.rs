// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{category_name, month_or_current, opt_amount, report_missing, required, resolve_category};
use crate::aggregate::{budget_overview, budget_totals};
use crate::models::{BudgetDraft, BudgetPatch};
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_month, pretty_table};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde_json::json;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("report", sub)) => report(store, sub)?,
        Some(("copy-last", sub)) => {
            let month = month_or_current(store, sub)?;
            let copied = store
                .copy_previous_month_budgets(&month)
                .context("copying budgets")?;
            println!("Copied {} budget(s) into {}", copied, month);
        }
        Some(("edit", sub)) => {
            let id = required(sub, "id")?;
            let category_id = match sub.get_one::<String>("category") {
                Some(c) => Some(resolve_category(store.snapshot(), c)?),
                None => None,
            };
            let month = sub.get_one::<String>("month").map(|s| parse_month(s)).transpose()?;
            let found = store.update_budget(
                id,
                BudgetPatch {
                    category_id,
                    amount: opt_amount(sub, "amount"),
                    month,
                    spent: opt_amount(sub, "spent"),
                },
            );
            report_missing(found, "budget", id);
        }
        Some(("rm", sub)) => {
            let id = required(sub, "id")?;
            let found = store.delete_budget(id);
            report_missing(found, "budget", id);
        }
        _ => {}
    }
    Ok(())
}

/// Updates the amount when the category already has a budget that month.
fn set(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(store, sub)?;
    let cat = required(sub, "category")?;
    let amount = parse_amount(required(sub, "amount")?);
    if amount <= Decimal::ZERO {
        println!("Budget amount must be positive, nothing set");
        return Ok(());
    }
    let cat_id = resolve_category(store.snapshot(), cat)?;
    let existing = store
        .snapshot()
        .budget_for(&cat_id, &month)
        .map(|b| b.id.clone());
    match existing {
        Some(id) => {
            store.update_budget(
                &id,
                BudgetPatch {
                    amount: Some(amount),
                    ..Default::default()
                },
            );
        }
        None => {
            store.add_budget(BudgetDraft {
                category_id: cat_id,
                amount,
                month: month.clone(),
                spent: Decimal::ZERO,
            });
        }
    }
    println!("Budget set for {} / {} = {}", month, cat, amount);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let data = store.snapshot();
    let month = sub.get_one::<String>("month").map(|s| parse_month(s)).transpose()?;
    let mut budgets: Vec<_> = data
        .budgets
        .iter()
        .filter(|b| month.as_deref().is_none_or(|m| b.month == m))
        .collect();
    budgets.sort_by(|a, b| b.month.cmp(&a.month));

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &budgets)? {
        return Ok(());
    }
    let sym = &data.user.currency;
    let rows = budgets
        .iter()
        .map(|b| {
            vec![
                b.id.clone(),
                b.month.clone(),
                category_name(data, &b.category_id),
                fmt_money(&b.amount, sym),
                fmt_money(&b.spent, sym),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Month", "Category", "Budget", "Spent"], rows)
    );
    Ok(())
}

fn report(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(store, sub)?;
    let data = store.snapshot();
    let lines = budget_overview(data, &month);
    let totals = budget_totals(&lines);

    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if jsonl_flag {
        maybe_print_json(false, true, &lines)?;
        return Ok(());
    }
    if maybe_print_json(
        json_flag,
        false,
        &json!({ "month": month, "lines": lines, "totals": totals }),
    )? {
        return Ok(());
    }

    let sym = &data.user.currency;
    let rows = lines
        .iter()
        .map(|l| {
            let status = if l.amount <= Decimal::ZERO {
                "no budget".to_string()
            } else if l.is_over_budget {
                format!("{} over", fmt_money(&l.spent.saturating_sub(l.amount), sym))
            } else {
                format!("{} left", fmt_money(&l.amount.saturating_sub(l.spent), sym))
            };
            vec![
                l.category_name.clone(),
                fmt_money(&l.amount, sym),
                fmt_money(&l.spent, sym),
                format!("{}%", l.progress),
                status,
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Budget", "Spent", "Progress", "Status"], rows)
    );
    println!(
        "{}: {} spent of {} budgeted ({:.0}%){}",
        month,
        fmt_money(&totals.total_spent, sym),
        fmt_money(&totals.total_budget, sym),
        totals.overall_progress,
        if totals.is_over_budget { ", over budget" } else { "" }
    );
    Ok(())
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{category_name, required};
use crate::error;
use crate::models::Snapshot;
use crate::store::Store;
use anyhow::{Context, Result};
use serde_json::json;
use std::path::Path;
use tracing::info;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("json", sub)) => {
            let out = required(sub, "out")?;
            export_json(store.snapshot(), Path::new(out))
                .with_context(|| format!("writing {}", out))?;
            println!("Exported data to {}", out);
        }
        Some(("csv", sub)) => {
            let out = required(sub, "out")?;
            let n = export_expenses_csv(store.snapshot(), Path::new(out))
                .with_context(|| format!("writing {}", out))?;
            println!("Exported {} expenses to {}", n, out);
        }
        _ => {}
    }
    Ok(())
}

/// Investment calculations and forecasts are not part of the export.
pub fn export_json(data: &Snapshot, out: &Path) -> error::Result<()> {
    let doc = json!({
        "user": data.user,
        "categories": data.categories,
        "budgets": data.budgets,
        "expenses": data.expenses,
        "incomes": data.incomes,
        "savingsGoals": data.savings_goals,
        "financialHealthScores": data.financial_health_scores,
    });
    std::fs::write(out, serde_json::to_string_pretty(&doc)?)?;
    info!(path = %out.display(), "json export written");
    Ok(())
}

pub fn export_expenses_csv(data: &Snapshot, out: &Path) -> error::Result<usize> {
    let mut wtr = csv::Writer::from_path(out)?;
    wtr.write_record([
        "id", "date", "category", "amount", "notes", "recurring", "one_time", "planned",
    ])?;
    let mut expenses: Vec<_> = data.expenses.iter().collect();
    expenses.sort_by(|a, b| a.date.cmp(&b.date));
    for e in &expenses {
        wtr.write_record([
            e.id.clone(),
            e.date.to_string(),
            category_name(data, &e.category_id),
            e.amount.to_string(),
            e.notes.clone().unwrap_or_default(),
            e.recurring_frequency
                .map(|f| f.to_string())
                .unwrap_or_default(),
            e.is_one_time.to_string(),
            e.is_planned.to_string(),
        ])?;
    }
    wtr.flush()?;
    info!(path = %out.display(), rows = expenses.len(), "csv export written");
    Ok(expenses.len())
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod categories;
pub mod config;
pub mod expenses;
pub mod exporter;
pub mod forecasts;
pub mod goals;
pub mod incomes;
pub mod invest;
pub mod profile;
pub mod reports;

use crate::models::{Frequency, Id, Snapshot};
use crate::store::Store;
use crate::utils::{parse_amount, parse_date, parse_month};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub(crate) fn required<'a>(m: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    m.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing argument '{}'", name))
}

pub(crate) fn month_or_current(store: &Store, m: &clap::ArgMatches) -> Result<String> {
    match m.get_one::<String>("month") {
        Some(s) => Ok(parse_month(s)?),
        None => Ok(store.current_month()),
    }
}

pub(crate) fn date_or_today(store: &Store, m: &clap::ArgMatches) -> Result<NaiveDate> {
    match m.get_one::<String>("date") {
        Some(s) => Ok(parse_date(s)?),
        None => Ok(store.today()),
    }
}

pub(crate) fn opt_amount(m: &clap::ArgMatches, name: &str) -> Option<Decimal> {
    m.get_one::<String>(name).map(|s| parse_amount(s))
}

pub(crate) fn opt_date(m: &clap::ArgMatches, name: &str) -> Result<Option<NaiveDate>> {
    m.get_one::<String>(name)
        .map(|s| parse_date(s))
        .transpose()
        .map_err(Into::into)
}

pub(crate) fn frequency(m: &clap::ArgMatches) -> Result<Option<Frequency>> {
    m.get_one::<String>("recurring")
        .map(|s| s.parse::<Frequency>().map_err(|e| anyhow!(e)))
        .transpose()
}

/// Accepts a category id or a (case-insensitive) name.
pub(crate) fn resolve_category(data: &Snapshot, key: &str) -> Result<Id> {
    data.category(key)
        .or_else(|| data.category_by_name(key))
        .map(|c| c.id.clone())
        .with_context(|| format!("Unknown category '{}'", key))
}

pub(crate) fn category_name(data: &Snapshot, id: &str) -> String {
    data.category(id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "Other".into())
}

pub(crate) fn report_missing(found: bool, what: &str, id: &str) {
    if !found {
        println!("No {} with id '{}', nothing to do", what, id);
    }
}

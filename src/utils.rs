// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{Error, Result};
use chrono::{Datelike, Months, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

/// Largest magnitude a single typed amount may carry.
pub const AMOUNT_LIMIT: i64 = 1_000_000_000_000_000;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| Error::InvalidDate(s.to_string()))
}

/// Validates a `YYYY-MM` key and returns it zero-padded, so `2025-8` becomes `2025-08`.
pub fn parse_month(s: &str) -> Result<String> {
    let s = s.trim();
    let first = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .map_err(|_| Error::InvalidMonth(s.to_string()))?;
    Ok(month_key(first))
}

/// Leading run of `s` that reads as a number: optional sign, digits with an
/// optional fraction, then an optional exponent. Empty when nothing matches.
fn numeric_prefix(s: &str) -> &str {
    let b = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        i
    };
    let start = usize::from(matches!(b.first(), Some(b'+' | b'-')));
    let mut end = digits_from(start);
    let mut seen_digit = end > start;
    if b.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if frac_end > end + 1 {
            end = frac_end;
            seen_digit = true;
        }
    }
    if !seen_digit {
        return "";
    }
    if matches!(b.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(b.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(end + 1 + sign);
        if exp_end > end + 1 + sign {
            end = exp_end;
        }
    }
    &s[..end]
}

fn clamp_amount(d: Decimal, input: &str) -> Decimal {
    let limit = Decimal::from(AMOUNT_LIMIT);
    if d.abs() > limit {
        tracing::warn!(input, %limit, "amount out of range, clamping");
        if d.is_sign_negative() {
            -limit
        } else {
            limit
        }
    } else {
        d
    }
}

/// Amounts typed by the user never fail. The leading number is used and
/// trailing text dropped (`12abc` is 12, `1e3` is 1000); input with no
/// leading number counts as zero. Magnitudes are capped at [`AMOUNT_LIMIT`].
pub fn parse_amount(s: &str) -> Decimal {
    let trimmed = s.trim();
    let prefix = numeric_prefix(trimmed);
    let exact = if prefix.contains(['e', 'E']) {
        Decimal::from_scientific(prefix).ok()
    } else {
        prefix.parse::<Decimal>().ok()
    };
    let parsed = exact.or_else(|| {
        let limit = AMOUNT_LIMIT as f64;
        prefix
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .and_then(|v| Decimal::from_f64(v.clamp(-2.0 * limit, 2.0 * limit)))
    });
    match parsed {
        Some(d) => {
            if prefix.len() < trimmed.len() {
                tracing::warn!(input = s, used = prefix, "ignoring trailing text in amount");
            }
            clamp_amount(d, s)
        }
        None => {
            tracing::warn!(input = s, "unparsable amount, using 0");
            Decimal::ZERO
        }
    }
}

pub fn parse_number(s: &str) -> f64 {
    let trimmed = s.trim();
    let prefix = numeric_prefix(trimmed);
    match prefix.parse::<f64>() {
        Ok(v) if v.is_finite() => {
            if prefix.len() < trimmed.len() {
                tracing::warn!(input = s, used = prefix, "ignoring trailing text in number");
            }
            v
        }
        _ => {
            tracing::warn!(input = s, "unparsable number, using 0");
            0.0
        }
    }
}

/// Adds amounts without panicking; totals saturate at the `Decimal` bounds.
pub fn sum_amounts<I: IntoIterator<Item = Decimal>>(amounts: I) -> Decimal {
    amounts.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

pub fn to_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

pub fn from_f64(v: f64) -> Decimal {
    Decimal::from_f64_retain(v).unwrap_or(Decimal::ZERO)
}

/// Rounds halves toward positive infinity, so -2.5 becomes -2.
pub fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Month key `delta` months before (negative) or after `date`.
pub fn shift_month(date: NaiveDate, delta: i32) -> String {
    let first = date.with_day(1).unwrap_or(date);
    let shifted = if delta >= 0 {
        first.checked_add_months(Months::new(delta as u32))
    } else {
        first.checked_sub_months(Months::new(delta.unsigned_abs()))
    };
    month_key(shifted.unwrap_or(first))
}

pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

pub fn fmt_money(d: &Decimal, symbol: &str) -> String {
    let rounded = d.round_dp(2);
    if rounded.is_sign_negative() {
        format!("-{}{:.2}", symbol, rounded.abs())
    } else {
        format!("{}{:.2}", symbol, rounded)
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> anyhow::Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

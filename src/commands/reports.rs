// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::month_or_current;
use crate::aggregate::{
    budget_overview, budget_totals, expense_breakdown, goal_progress, month_expenses,
    month_income, month_range, monthly_cashflow, net_worth, savings_overview,
};
use crate::health::{health_status, score_snapshot};
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use serde_json::json;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("dashboard", sub)) => dashboard(store, sub)?,
        Some(("cashflow", sub)) => cashflow(store, sub)?,
        Some(("spend-by-category", sub)) => spend_by_category(store, sub)?,
        Some(("net-worth", sub)) => {
            let data = store.snapshot();
            let value = net_worth(data);
            if !maybe_print_json(
                sub.get_flag("json"),
                sub.get_flag("jsonl"),
                &json!({ "netWorth": value }),
            )? {
                println!("Net worth: {}", fmt_money(&value, &data.user.currency));
            }
        }
        Some(("savings", sub)) => savings(store, sub)?,
        Some(("health", sub)) => health(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn dashboard(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let data = store.snapshot();
    let month = month_or_current(store, sub)?;
    let income = month_income(data, &month);
    let expenses = month_expenses(data, &month);
    let totals = budget_totals(&budget_overview(data, &month));
    let score = data
        .financial_health_scores
        .last()
        .map(|s| s.score)
        .unwrap_or(0);
    let goals: Vec<_> = data
        .savings_goals
        .iter()
        .map(|g| goal_progress(g, store.today()))
        .collect();

    let v = json!({
        "month": month,
        "income": income,
        "expenses": expenses,
        "savings": income.saturating_sub(expenses),
        "netWorth": net_worth(data),
        "financialScore": score,
        "budget": totals,
        "goals": goals,
    });
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &v)? {
        return Ok(());
    }

    let sym = &data.user.currency;
    let rows = vec![
        vec!["Income".into(), fmt_money(&income, sym)],
        vec!["Expenses".into(), fmt_money(&expenses, sym)],
        vec!["Savings".into(), fmt_money(&income.saturating_sub(expenses), sym)],
        vec!["Net worth".into(), fmt_money(&net_worth(data), sym)],
        vec![
            "Budget used".into(),
            format!(
                "{} of {}",
                fmt_money(&totals.total_spent, sym),
                fmt_money(&totals.total_budget, sym)
            ),
        ],
        vec![
            "Health score".into(),
            format!("{} ({})", score, health_status(score).label()),
        ],
    ];
    println!("Welcome back, {}. Overview for {}", data.user.name, month);
    println!("{}", pretty_table(&["", "Value"], rows));
    if !goals.is_empty() {
        let rows = goals
            .iter()
            .map(|g| vec![g.name.clone(), format!("{}%", g.progress)])
            .collect();
        println!("{}", pretty_table(&["Goal", "Progress"], rows));
    }
    Ok(())
}

fn cashflow(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let data = store.snapshot();
    let n = sub.get_one::<usize>("months").copied().unwrap_or(6);
    let flows = monthly_cashflow(data, &month_range(n, store.today()));
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &flows)? {
        return Ok(());
    }
    let sym = &data.user.currency;
    let rows = flows
        .iter()
        .map(|f| {
            vec![
                f.month.clone(),
                fmt_money(&f.income, sym),
                fmt_money(&f.expenses, sym),
                fmt_money(&f.savings, sym),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expenses", "Savings"], rows)
    );
    Ok(())
}

fn spend_by_category(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let data = store.snapshot();
    let month = month_or_current(store, sub)?;
    let shares = expense_breakdown(data, &month);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &shares)? {
        return Ok(());
    }
    let sym = &data.user.currency;
    let rows = shares
        .iter()
        .map(|s| vec![s.name.clone(), fmt_money(&s.value, sym)])
        .collect();
    println!("{}", pretty_table(&["Category", "Spent"], rows));
    Ok(())
}

fn savings(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let data = store.snapshot();
    let overview = savings_overview(data, store.today());
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &overview)? {
        return Ok(());
    }
    let sym = &data.user.currency;
    println!(
        "Total savings: {}  Savings rate: {:.1}%",
        fmt_money(&overview.total_savings, sym),
        overview.savings_rate
    );
    let rows = overview
        .monthly
        .iter()
        .map(|f| vec![f.month.clone(), fmt_money(&f.savings, sym)])
        .collect();
    println!("{}", pretty_table(&["Month", "Saved"], rows));
    for tip in &overview.tips {
        println!("- {}", tip);
    }
    Ok(())
}

fn health(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let data = store.snapshot();
    let (json_flag, jsonl_flag) = (sub.get_flag("json"), sub.get_flag("jsonl"));

    if sub.get_flag("history") {
        let history = &data.financial_health_scores;
        if !maybe_print_json(json_flag, jsonl_flag, history)? {
            let rows = history
                .iter()
                .map(|s| {
                    vec![
                        s.date.format("%Y-%m-%d %H:%M").to_string(),
                        s.score.to_string(),
                        format!("{:.2}", s.savings_ratio),
                        format!("{:.2}", s.budget_adherence),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["Date", "Score", "Savings ratio", "Budget adherence"], rows)
            );
        }
        return Ok(());
    }

    // the live breakdown of the current month next to the last recorded score
    let live = score_snapshot(data, store.clock().now());
    let latest = data.financial_health_scores.last();
    let score = latest.map(|s| s.score).unwrap_or(0);
    let v = json!({
        "score": score,
        "status": health_status(score).label(),
        "recordedAt": latest.map(|s| s.date),
        "current": live,
    });
    if maybe_print_json(json_flag, jsonl_flag, &v)? {
        return Ok(());
    }
    let rows = vec![
        vec!["Score".into(), format!("{} ({})", score, health_status(score).label())],
        vec!["Savings ratio".into(), format!("{:.2}", live.savings_ratio)],
        vec!["Budget adherence".into(), format!("{:.2}", live.budget_adherence)],
        vec!["Debt ratio".into(), format!("{:.2}", live.debt_ratio)],
        vec!["Investment ratio".into(), format!("{:.2}", live.investment_ratio)],
    ];
    println!("{}", pretty_table(&["Component", "Value"], rows));
    Ok(())
}

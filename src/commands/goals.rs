// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{opt_amount, opt_date, report_missing, required};
use crate::aggregate::goal_progress;
use crate::models::{SavingsGoalDraft, SavingsGoalPatch};
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_date, pretty_table};
use anyhow::Result;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = required(sub, "name")?;
            let start_date = opt_date(sub, "start-date")?.unwrap_or_else(|| store.today());
            let id = store.add_savings_goal(SavingsGoalDraft {
                name: name.to_string(),
                target_amount: parse_amount(required(sub, "target")?),
                current_amount: parse_amount(required(sub, "current")?),
                monthly_deposit: parse_amount(required(sub, "deposit")?),
                start_date,
                target_date: parse_date(required(sub, "target-date")?)?,
                icon: required(sub, "icon")?.to_string(),
                color: required(sub, "color")?.to_string(),
            });
            println!("Added goal '{}' ({})", name, id);
        }
        Some(("list", sub)) => {
            let data = store.snapshot();
            let goals = &data.savings_goals;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), goals)? {
                let sym = &data.user.currency;
                let rows = goals
                    .iter()
                    .map(|g| {
                        vec![
                            g.id.clone(),
                            g.name.clone(),
                            fmt_money(&g.current_amount, sym),
                            fmt_money(&g.target_amount, sym),
                            fmt_money(&g.monthly_deposit, sym),
                            g.target_date.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["Id", "Goal", "Saved", "Target", "Monthly", "Target date"],
                        rows
                    )
                );
            }
        }
        Some(("edit", sub)) => {
            let id = required(sub, "id")?;
            let found = store.update_savings_goal(
                id,
                SavingsGoalPatch {
                    name: sub.get_one::<String>("name").cloned(),
                    target_amount: opt_amount(sub, "target"),
                    current_amount: opt_amount(sub, "current"),
                    monthly_deposit: opt_amount(sub, "deposit"),
                    start_date: opt_date(sub, "start-date")?,
                    target_date: opt_date(sub, "target-date")?,
                    icon: sub.get_one::<String>("icon").cloned(),
                    color: sub.get_one::<String>("color").cloned(),
                },
            );
            report_missing(found, "goal", id);
        }
        Some(("rm", sub)) => {
            let id = required(sub, "id")?;
            let found = store.delete_savings_goal(id);
            report_missing(found, "goal", id);
        }
        Some(("plan", sub)) => {
            let today = store.today();
            let plans: Vec<_> = store
                .snapshot()
                .savings_goals
                .iter()
                .map(|g| goal_progress(g, today))
                .collect();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &plans)? {
                let rows = plans
                    .iter()
                    .map(|p| {
                        vec![
                            p.name.clone(),
                            format!("{}%", p.progress),
                            p.months_to_goal
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| "never".into()),
                            p.projected_date
                                .map(|d| d.to_string())
                                .unwrap_or_else(|| "-".into()),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Goal", "Progress", "Months left", "Projected"], rows)
                );
            }
        }
        _ => {}
    }
    Ok(())
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Theme, UserPatch};
use crate::store::Store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Result, anyhow};

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let user = &store.snapshot().user;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), user)? {
                let theme = match user.theme {
                    Theme::Light => "light",
                    Theme::Dark => "dark",
                };
                let rows = vec![
                    vec!["Name".into(), user.name.clone()],
                    vec!["Email".into(), user.email.clone()],
                    vec!["Currency".into(), user.currency.clone()],
                    vec!["Theme".into(), theme.to_string()],
                    vec!["Notifications".into(), user.notifications.to_string()],
                    vec!["Monthly alerts".into(), user.monthly_alerts.to_string()],
                ];
                println!("{}", pretty_table(&["Field", "Value"], rows));
            }
        }
        Some(("set", sub)) => {
            let theme = sub
                .get_one::<String>("theme")
                .map(|t| t.parse::<Theme>().map_err(|e| anyhow!(e)))
                .transpose()?;
            store.update_user(UserPatch {
                name: sub.get_one::<String>("name").cloned(),
                email: sub.get_one::<String>("email").cloned(),
                currency: sub.get_one::<String>("currency").cloned(),
                theme,
                notifications: sub.get_one::<bool>("notifications").copied(),
                monthly_alerts: sub.get_one::<bool>("monthly-alerts").copied(),
            });
            println!("Profile updated");
        }
        _ => {}
    }
    Ok(())
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{required, resolve_category};
use crate::models::{CategoryDraft, CategoryPatch};
use crate::store::Store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = required(sub, "name")?;
            if store.snapshot().category_by_name(name).is_some() {
                println!("Category '{}' already exists", name);
                return Ok(());
            }
            let id = store.add_category(CategoryDraft {
                name: name.to_string(),
                icon: required(sub, "icon")?.to_string(),
                color: required(sub, "color")?.to_string(),
            });
            println!("Added category '{}' ({})", name, id);
        }
        Some(("list", sub)) => {
            let cats = &store.snapshot().categories;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), cats)? {
                let data = cats
                    .iter()
                    .map(|c| vec![c.id.clone(), c.name.clone(), c.icon.clone(), c.color.clone()])
                    .collect();
                println!("{}", pretty_table(&["Id", "Category", "Icon", "Color"], data));
            }
        }
        Some(("edit", sub)) => {
            let id = resolve_category(store.snapshot(), required(sub, "category")?)?;
            store.update_category(
                &id,
                CategoryPatch {
                    name: sub.get_one::<String>("name").cloned(),
                    icon: sub.get_one::<String>("icon").cloned(),
                    color: sub.get_one::<String>("color").cloned(),
                },
            );
            println!("Updated category {}", id);
        }
        Some(("rm", sub)) => {
            let key = required(sub, "category")?;
            match resolve_category(store.snapshot(), key) {
                Ok(id) => {
                    store.delete_category(&id);
                    println!("Removed category '{}'", key);
                }
                Err(_) => println!("No category '{}', nothing to do", key),
            }
        }
        _ => {}
    }
    Ok(())
}

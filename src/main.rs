// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use fintrack::config::Config;
use fintrack::store::Store;
use fintrack::{cli, commands, db, seed};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    init_tracing();

    let db_path = matches.get_one::<String>("db").map(PathBuf::from);
    let conn = db::open_or_init(db_path.as_deref()).context("opening database")?;

    // settings are managed without touching the snapshot
    if let Some(("config", sub)) = matches.subcommand() {
        return commands::config::handle(&conn, sub);
    }

    let config = Config::load(&conn).context("loading settings")?;
    let stored = db::load_snapshot(&conn).context("loading data")?;
    let first_run = stored.is_none();
    let mut store = Store::new(stored.unwrap_or_default());
    store.subscribe(Box::new(config.scorer()));
    if first_run {
        seed::populate(&mut store);
    }

    match matches.subcommand() {
        Some(("init", _)) => match &db_path {
            Some(p) => println!("Database initialized at {}", p.display()),
            None => println!("Database initialized at {}", db::db_path()?.display()),
        },
        Some(("seed", _)) => {
            if first_run {
                println!("Sample data inserted");
            } else if store.snapshot().is_empty() {
                seed::populate(&mut store);
                println!("Sample data inserted");
            } else {
                println!("Store already has data, nothing to seed");
            }
        }
        Some(("category", sub)) => commands::categories::handle(&mut store, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut store, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&mut store, sub)?,
        Some(("income", sub)) => commands::incomes::handle(&mut store, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&mut store, sub)?,
        Some(("invest", sub)) => commands::invest::handle(&mut store, sub)?,
        Some(("forecast", sub)) => commands::forecasts::handle(&mut store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        Some(("profile", sub)) => commands::profile::handle(&mut store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }

    if store.is_dirty() {
        db::save_snapshot(&conn, store.snapshot()).context("saving data")?;
        store.mark_clean();
    }
    Ok(())
}

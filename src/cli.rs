// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .help("Month key YYYY-MM (default: current month)")
}

fn id_arg(what: &str) -> Arg {
    Arg::new("id").required(true).help(format!("{} id", what))
}

fn frequency_arg() -> Arg {
    Arg::new("recurring")
        .long("recurring")
        .value_parser(["daily", "weekly", "monthly", "yearly"])
        .help("Mark as recurring with the given frequency")
}

fn category_cmd() -> Command {
    Command::new("category")
        .about("Manage spending categories")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("name").required(true))
                .arg(Arg::new("icon").long("icon").default_value("tag"))
                .arg(Arg::new("color").long("color").default_value("#888888")),
        )
        .subcommand(json_flags(Command::new("list")))
        .subcommand(
            Command::new("edit")
                .arg(Arg::new("category").required(true).help("Name or id"))
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("icon").long("icon"))
                .arg(Arg::new("color").long("color")),
        )
        .subcommand(Command::new("rm").arg(Arg::new("category").required(true).help("Name or id")))
}

fn budget_cmd() -> Command {
    Command::new("budget")
        .about("Monthly budgets per category")
        .subcommand(
            Command::new("set")
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(month_arg()),
        )
        .subcommand(json_flags(Command::new("list").arg(month_arg())))
        .subcommand(json_flags(Command::new("report").arg(month_arg())))
        .subcommand(
            Command::new("copy-last")
                .about("Copy last month's budgets into the month")
                .arg(month_arg()),
        )
        .subcommand(
            Command::new("edit")
                .arg(id_arg("Budget"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("spent").long("spent"))
                .arg(Arg::new("month").long("month")),
        )
        .subcommand(Command::new("rm").arg(id_arg("Budget")))
}

fn expense_cmd() -> Command {
    Command::new("expense")
        .about("Record and inspect expenses")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("date").long("date").help("YYYY-MM-DD (default: today)"))
                .arg(Arg::new("notes").long("notes"))
                .arg(frequency_arg())
                .arg(
                    Arg::new("one-time")
                        .long("one-time")
                        .action(ArgAction::SetTrue),
                )
                .arg(Arg::new("planned").long("planned").action(ArgAction::SetTrue))
                .arg(
                    Arg::new("receipt")
                        .long("receipt")
                        .help("Receipt image as a data URI"),
                ),
        )
        .subcommand(json_flags(
            Command::new("list")
                .arg(month_arg())
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("one-time")
                        .long("one-time")
                        .action(ArgAction::SetTrue),
                )
                .arg(Arg::new("planned").long("planned").action(ArgAction::SetTrue))
                .arg(
                    Arg::new("unplanned")
                        .long("unplanned")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("planned"),
                )
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .value_parser(["date", "amount"])
                        .default_value("date"),
                )
                .arg(Arg::new("asc").long("asc").action(ArgAction::SetTrue))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("edit")
                .arg(id_arg("Expense"))
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("date").long("date"))
                .arg(Arg::new("notes").long("notes"))
                .arg(frequency_arg())
                .arg(
                    Arg::new("one-time")
                        .long("one-time")
                        .value_parser(value_parser!(bool)),
                )
                .arg(
                    Arg::new("planned")
                        .long("planned")
                        .value_parser(value_parser!(bool)),
                ),
        )
        .subcommand(Command::new("rm").arg(id_arg("Expense")))
        .subcommand(json_flags(
            Command::new("one-time").about("Planned vs unplanned one-time spending"),
        ))
}

fn income_cmd() -> Command {
    Command::new("income")
        .about("Record and inspect income")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("source").long("source").required(true))
                .arg(Arg::new("date").long("date").help("YYYY-MM-DD (default: today)"))
                .arg(Arg::new("notes").long("notes"))
                .arg(frequency_arg()),
        )
        .subcommand(json_flags(Command::new("list").arg(month_arg())))
        .subcommand(
            Command::new("edit")
                .arg(id_arg("Income"))
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("source").long("source"))
                .arg(Arg::new("date").long("date"))
                .arg(Arg::new("notes").long("notes"))
                .arg(frequency_arg()),
        )
        .subcommand(Command::new("rm").arg(id_arg("Income")))
}

fn goal_cmd() -> Command {
    Command::new("goal")
        .about("Savings goals")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("target").long("target").required(true))
                .arg(Arg::new("current").long("current").default_value("0"))
                .arg(Arg::new("deposit").long("deposit").default_value("0"))
                .arg(Arg::new("start-date").long("start-date"))
                .arg(Arg::new("target-date").long("target-date").required(true))
                .arg(Arg::new("icon").long("icon").default_value("piggy-bank"))
                .arg(Arg::new("color").long("color").default_value("#22c55e")),
        )
        .subcommand(json_flags(Command::new("list")))
        .subcommand(
            Command::new("edit")
                .arg(id_arg("Goal"))
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("target").long("target"))
                .arg(Arg::new("current").long("current"))
                .arg(Arg::new("deposit").long("deposit"))
                .arg(Arg::new("start-date").long("start-date"))
                .arg(Arg::new("target-date").long("target-date"))
                .arg(Arg::new("icon").long("icon"))
                .arg(Arg::new("color").long("color")),
        )
        .subcommand(Command::new("rm").arg(id_arg("Goal")))
        .subcommand(json_flags(
            Command::new("plan").about("Progress and projected completion per goal"),
        ))
}

fn calc_flags(cmd: Command) -> Command {
    json_flags(
        cmd.arg(
            Arg::new("save")
                .long("save")
                .action(ArgAction::SetTrue)
                .help("Record the calculation in the history"),
        )
        .arg(
            Arg::new("series")
                .long("series")
                .action(ArgAction::SetTrue)
                .help("Show year-by-year growth"),
        ),
    )
}

fn invest_cmd() -> Command {
    Command::new("invest")
        .about("Investment calculators")
        .subcommand(json_flags(
            Command::new("fv")
                .about("Future value of a principal plus monthly contributions")
                .arg(Arg::new("principal").long("principal").default_value("0"))
                .arg(Arg::new("monthly").long("monthly").default_value("0"))
                .arg(Arg::new("rate").long("rate").required(true))
                .arg(Arg::new("years").long("years").required(true)),
        ))
        .subcommand(calc_flags(
            Command::new("sip")
                .about("Systematic investment plan")
                .arg(Arg::new("monthly").long("monthly").required(true))
                .arg(Arg::new("rate").long("rate").required(true))
                .arg(Arg::new("years").long("years").required(true)),
        ))
        .subcommand(calc_flags(
            Command::new("lumpsum")
                .about("One-time investment")
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("rate").long("rate").required(true))
                .arg(Arg::new("years").long("years").required(true)),
        ))
        .subcommand(json_flags(
            Command::new("retirement")
                .about("Corpus and monthly SIP needed for retirement")
                .arg(Arg::new("current-age").long("current-age").required(true))
                .arg(
                    Arg::new("retirement-age")
                        .long("retirement-age")
                        .required(true),
                )
                .arg(
                    Arg::new("monthly-expense")
                        .long("monthly-expense")
                        .required(true),
                )
                .arg(
                    Arg::new("current-savings")
                        .long("current-savings")
                        .default_value("0"),
                )
                .arg(Arg::new("rate").long("rate").required(true))
                .arg(Arg::new("save").long("save").action(ArgAction::SetTrue)),
        ))
        .subcommand(json_flags(Command::new("history")))
        .subcommand(Command::new("rm").arg(id_arg("Calculation")))
}

fn forecast_cmd() -> Command {
    Command::new("forecast")
        .about("Saved forecast scenarios")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("income-growth").long("income-growth").default_value("0"))
                .arg(Arg::new("inflation").long("inflation").default_value("6"))
                .arg(Arg::new("returns").long("returns").default_value("0"))
                .arg(
                    Arg::new("additional-savings")
                        .long("additional-savings")
                        .default_value("0"),
                )
                .arg(
                    Arg::new("additional-investment")
                        .long("additional-investment")
                        .default_value("0"),
                )
                .arg(
                    Arg::new("years")
                        .long("years")
                        .value_parser(value_parser!(u32))
                        .default_value("5"),
                ),
        )
        .subcommand(json_flags(Command::new("list")))
        .subcommand(Command::new("rm").arg(id_arg("Forecast")))
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Summaries and charts data")
        .subcommand(json_flags(Command::new("dashboard").arg(month_arg())))
        .subcommand(json_flags(
            Command::new("cashflow").arg(
                Arg::new("months")
                    .long("months")
                    .value_parser(value_parser!(usize))
                    .default_value("6"),
            ),
        ))
        .subcommand(json_flags(Command::new("spend-by-category").arg(month_arg())))
        .subcommand(json_flags(Command::new("net-worth")))
        .subcommand(json_flags(Command::new("savings")))
        .subcommand(json_flags(
            Command::new("health").arg(
                Arg::new("history")
                    .long("history")
                    .action(ArgAction::SetTrue)
                    .help("List recorded scores instead of the latest"),
            ),
        ))
}

fn profile_cmd() -> Command {
    Command::new("profile")
        .about("User profile and preferences")
        .subcommand(json_flags(Command::new("show")))
        .subcommand(
            Command::new("set")
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("email").long("email"))
                .arg(Arg::new("currency").long("currency").help("Display symbol, e.g. $"))
                .arg(
                    Arg::new("theme")
                        .long("theme")
                        .value_parser(["light", "dark"]),
                )
                .arg(
                    Arg::new("notifications")
                        .long("notifications")
                        .value_parser(value_parser!(bool)),
                )
                .arg(
                    Arg::new("monthly-alerts")
                        .long("monthly-alerts")
                        .value_parser(value_parser!(bool)),
                ),
        )
}

fn export_cmd() -> Command {
    Command::new("export")
        .about("Write data to files")
        .subcommand(
            Command::new("json").arg(
                Arg::new("out")
                    .long("out")
                    .default_value("fintrack-data.json"),
            ),
        )
        .subcommand(
            Command::new("csv").arg(
                Arg::new("out")
                    .long("out")
                    .default_value("fintrack-expenses.csv"),
            ),
        )
}

fn config_cmd() -> Command {
    Command::new("config")
        .about("Application settings")
        .subcommand(Command::new("get").arg(Arg::new("key").required(true)))
        .subcommand(
            Command::new("set")
                .arg(Arg::new("key").required(true))
                .arg(Arg::new("value").required(true)),
        )
        .subcommand(json_flags(Command::new("list")))
}

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .about("Personal finance tracker: budgets, expenses, income, goals and calculators")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .env("FINTRACK_DB")
                .global(true)
                .help("Path to the SQLite database"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(Command::new("seed").about("Insert the sample dataset into an empty store"))
        .subcommand(category_cmd())
        .subcommand(budget_cmd())
        .subcommand(expense_cmd())
        .subcommand(income_cmd())
        .subcommand(goal_cmd())
        .subcommand(invest_cmd())
        .subcommand(forecast_cmd())
        .subcommand(report_cmd())
        .subcommand(profile_cmd())
        .subcommand(export_cmd())
        .subcommand(config_cmd())
}

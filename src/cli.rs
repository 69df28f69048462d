// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, value_parser, Arg, ArgAction, Command};

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print as pretty JSON")
}

fn jsonl_flag() -> Arg {
    Arg::new("jsonl")
        .long("jsonl")
        .action(ArgAction::SetTrue)
        .help("Print as JSON lines")
}

fn account_cmd() -> Command {
    Command::new("account")
        .about("Manage accounts")
        .subcommand(
            Command::new("add")
                .about("Add an account")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("color")
                        .long("color")
                        .default_value("#4e79a7")
                        .help("Hex color used for charts"),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("List accounts")
                .arg(json_flag())
                .arg(jsonl_flag()),
        )
}

fn event_cmd() -> Command {
    Command::new("event")
        .about("Manage recurring financial events")
        .subcommand(
            Command::new("add")
                .about("Add an event")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("category").long("category").default_value("general"))
                .arg(
                    Arg::new("account")
                        .long("account")
                        .required(true)
                        .help("Account ID the event applies to"),
                )
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .value_parser(value_parser!(i64))
                        .help("Amount in minor units"),
                )
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .value_parser(["income", "expense"]),
                )
                .arg(
                    Arg::new("start")
                        .long("start")
                        .required(true)
                        .help("First occurrence date, YYYY-MM-DD"),
                )
                .arg(
                    Arg::new("rrule")
                        .long("rrule")
                        .help("Recurrence rule, e.g. FREQ=MONTHLY;BYMONTHDAY=1"),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("List events")
                .arg(json_flag())
                .arg(jsonl_flag()),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete an event")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(
            Command::new("update")
                .about("Update an event in place")
                .arg(Arg::new("id").required(true))
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("account").long("account"))
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .value_parser(value_parser!(i64)),
                )
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["income", "expense"]),
                )
                .arg(Arg::new("start").long("start"))
                .arg(Arg::new("rrule").long("rrule"))
                .arg(
                    Arg::new("clear-rrule")
                        .long("clear-rrule")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("rrule")
                        .help("Turn a recurring event into a one-off"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show the event behind an occurrence")
                .arg(
                    Arg::new("occurrence")
                        .long("occurrence")
                        .required(true)
                        .help("Occurrence ID, as shown by 'schedule list'"),
                ),
        )
}

fn exception_cmd() -> Command {
    Command::new("exception")
        .about("Manage per-date exceptions on events")
        .subcommand(
            Command::new("add")
                .about("Skip or override a single occurrence")
                .arg(Arg::new("event").required(true).help("Event ID"))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .required(true)
                        .help("Occurrence date, YYYY-MM-DD"),
                )
                .arg(
                    Arg::new("skip")
                        .long("skip")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("amount")
                        .help("Drop the occurrence on that date (the default)"),
                )
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .value_parser(value_parser!(i64))
                        .help("Override amount for that date instead of skipping"),
                ),
        )
        .subcommand(
            Command::new("rm")
                .about("Remove an exception")
                .arg(Arg::new("event").required(true).help("Event ID"))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .required(true)
                        .help("Exception date, YYYY-MM-DD"),
                ),
        )
}

fn schedule_cmd() -> Command {
    Command::new("schedule")
        .about("Projected event occurrences")
        .subcommand(
            Command::new("list")
                .about("List projected occurrences")
                .arg(Arg::new("from").long("from").help("Earliest date, YYYY-MM-DD"))
                .arg(Arg::new("to").long("to").help("Latest date, YYYY-MM-DD"))
                .arg(Arg::new("account").long("account").help("Filter by account ID"))
                .arg(json_flag())
                .arg(jsonl_flag()),
        )
        .subcommand(
            Command::new("preview")
                .about("Expand a rule locally without creating anything")
                .arg(
                    Arg::new("start")
                        .long("start")
                        .required(true)
                        .help("First occurrence date, YYYY-MM-DD"),
                )
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .value_parser(["income", "expense"]),
                )
                .arg(Arg::new("rrule").long("rrule"))
                .arg(Arg::new("name").long("name").default_value("preview"))
                .arg(
                    Arg::new("years")
                        .long("years")
                        .value_parser(value_parser!(u32).range(1..=100))
                        .help("Projection horizon in years"),
                ),
        )
}

fn balances_cmd() -> Command {
    Command::new("balances")
        .about("Projected account balances within the chart window")
        .arg(
            Arg::new("months")
                .long("months")
                .value_parser(value_parser!(u32).range(1..=120))
                .help("Months ahead to include"),
        )
        .arg(Arg::new("account").long("account").help("Filter by account ID"))
        .arg(json_flag())
        .arg(jsonl_flag())
}

fn config_cmd() -> Command {
    Command::new("config")
        .about("Local configuration")
        .subcommand(Command::new("show").about("Show the config file and its contents"))
        .subcommand(
            Command::new("set-server")
                .about("Set the server URL")
                .arg(Arg::new("url").required(true)),
        )
}

pub fn build_cli() -> Command {
    Command::new("cashplan")
        .version(crate_version!())
        .about("Cashplan: accounts, recurring events, exceptions, and balance forecasts")
        .arg(
            Arg::new("server")
                .long("server")
                .global(true)
                .value_name("URL")
                .help("Server URL (overrides CASHPLAN_SERVER and the config file)"),
        )
        .subcommand(account_cmd())
        .subcommand(event_cmd())
        .subcommand(exception_cmd())
        .subcommand(schedule_cmd())
        .subcommand(balances_cmd())
        .subcommand(config_cmd())
        .subcommand(Command::new("doctor").about("Check the server and stored data for problems"))
}

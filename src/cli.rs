// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .short('t')
        .required(true)
        .value_parser(["income", "expense"])
        .help("Which records to work with")
}

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

pub fn build_cli() -> Command {
    Command::new("notion-finance")
        .version(clap::crate_version!())
        .about("Track incomes and expenses stored in a Notion database")
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("PATH")
                .help("Config file (default: platform config dir, or $NOTION_FINANCE_CONFIG)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("More logging on stderr (-v info, -vv debug)"),
        )
        .subcommand(json_args(
            Command::new("list")
                .about("List incomes or expenses")
                .arg(type_arg())
                .arg(
                    Arg::new("page-size")
                        .long("page-size")
                        .value_parser(value_parser!(u32).range(1..=100))
                        .help("Fetch a single page of at most this many records"),
                )
                .arg(
                    Arg::new("cursor")
                        .long("cursor")
                        .help("Start the single page at this record id"),
                )
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .value_parser(["asc", "desc"])
                        .help("Sort a single page by date"),
                ),
        ))
        .subcommand(
            Command::new("add")
                .about("Record a new income or expense")
                .arg(type_arg())
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .allow_hyphen_values(true)
                        .help("Negative or zero for expenses, positive for incomes"),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("YYYY-MM-DD or RFC 3339 timestamp (default: now)"),
                )
                .arg(Arg::new("comment").long("comment").default_value(""))
                .arg(
                    Arg::new("category")
                        .long("category")
                        .required(true)
                        .help("Expense: Transport, Education, Subscription, Entertainment, Food; income: Work, Parent, Claim"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the stored record as JSON"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write every income or expense to a file")
                .arg(type_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .value_parser(["csv", "json"]),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::Result;

use notion_finance::config::Config;
use notion_finance::error::exit_code;
use notion_finance::ledger::LedgerClient;
use notion_finance::notion::NotionClient;
use notion_finance::{cli, commands, utils};

fn main() {
    let matches = cli::build_cli().get_matches();
    let verbosity = matches
        .subcommand()
        .map(|(_, sub)| sub.get_count("verbose"))
        .unwrap_or(0)
        .max(matches.get_count("verbose"));
    utils::init_tracing(verbosity);

    if let Err(err) = run(&matches) {
        eprintln!("Error: {:#}", err);
        std::process::exit(exit_code(&err));
    }
}

fn run(matches: &clap::ArgMatches) -> Result<()> {
    let Some((name, sub)) = matches.subcommand() else {
        cli::build_cli().print_help()?;
        println!();
        return Ok(());
    };

    let config_path = sub
        .get_one::<String>("config")
        .or_else(|| matches.get_one::<String>("config"));
    let config = Config::load(config_path.map(Path::new))?;
    let client = NotionClient::new(&config.notion)?;
    let ledger = LedgerClient::new(client, config.notion.database_ids.finance.as_str());

    match name {
        "list" => commands::list::handle(&ledger, sub)?,
        "add" => commands::add::handle(&ledger, sub)?,
        "export" => commands::export::handle(&ledger, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

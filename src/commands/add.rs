// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::Utc;

use crate::commands::kind_of;
use crate::ledger::LedgerClient;
use crate::models::{Category, CreateInput, ExpenseCategory, IncomeCategory, Kind, Record};
use crate::notion::NotionService;
use crate::utils::{fmt_date, parse_decimal, parse_timestamp};

pub fn handle<S: NotionService>(ledger: &LedgerClient<S>, m: &clap::ArgMatches) -> Result<()> {
    match kind_of(m)? {
        Kind::Expense => report(&create::<ExpenseCategory, S>(ledger, m)?, m),
        Kind::Income => report(&create::<IncomeCategory, S>(ledger, m)?, m),
    }
}

pub fn input_from_args<C: Category>(m: &clap::ArgMatches) -> Result<CreateInput<C>> {
    let name = m.get_one::<String>("name").context("--name is required")?;
    let amount = parse_decimal(m.get_one::<String>("amount").context("--amount is required")?)?;
    let date = match m.get_one::<String>("date") {
        Some(raw) => parse_timestamp(raw)?,
        None => Utc::now(),
    };
    let comment = m.get_one::<String>("comment").cloned().unwrap_or_default();
    let category = m.get_one::<String>("category").cloned().unwrap_or_default();
    if !C::known().contains(&category.as_str()) {
        tracing::warn!(
            %category,
            known = ?C::known(),
            "category is not one of the known {} categories",
            C::KIND
        );
    }
    Ok(CreateInput {
        name: name.trim().to_string(),
        amount,
        date,
        comment,
        category: C::from(category),
    })
}

pub fn create<C: Category, S: NotionService>(
    ledger: &LedgerClient<S>,
    m: &clap::ArgMatches,
) -> Result<Record<C>> {
    let input = input_from_args::<C>(m)?;
    ledger
        .create(input)
        .with_context(|| format!("Creating {}", C::KIND))
}

fn report<C: Category>(record: &Record<C>, m: &clap::ArgMatches) -> Result<()> {
    if m.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }
    println!(
        "Recorded {} '{}' of {} on {} ({})",
        C::KIND,
        record.name,
        record.amount,
        fmt_date(record.date.start),
        record.category
    );
    Ok(())
}

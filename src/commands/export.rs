// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::commands::kind_of;
use crate::ledger::LedgerClient;
use crate::models::{Category, ExpenseCategory, IncomeCategory, Kind, Record};
use crate::notion::NotionService;

pub fn handle<S: NotionService>(ledger: &LedgerClient<S>, m: &clap::ArgMatches) -> Result<()> {
    let count = match kind_of(m)? {
        Kind::Expense => export_kind::<ExpenseCategory, S>(ledger, m)?,
        Kind::Income => export_kind::<IncomeCategory, S>(ledger, m)?,
    };
    println!(
        "Exported {} records to {}",
        count,
        m.get_one::<String>("out").map(String::as_str).unwrap_or("")
    );
    Ok(())
}

fn export_kind<C: Category, S: NotionService>(
    ledger: &LedgerClient<S>,
    m: &clap::ArgMatches,
) -> Result<usize> {
    let fmt = m
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "csv".to_string());
    let out = m.get_one::<String>("out").context("--out is required")?;

    let records = ledger
        .list_all::<C>()
        .with_context(|| format!("Listing all {} records", C::KIND))?;

    match fmt.as_str() {
        "csv" => write_csv(out, &records)?,
        "json" => std::fs::write(out, serde_json::to_string_pretty(&records)?)
            .with_context(|| format!("Writing {}", out))?,
        other => anyhow::bail!("Unknown format: {} (use csv|json)", other),
    }
    Ok(records.len())
}

fn write_csv<C: Category>(out: &str, records: &[Record<C>]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(out).with_context(|| format!("Creating {}", out))?;
    wtr.write_record(["start", "end", "name", "amount", "category", "comment"])?;
    for r in records {
        wtr.write_record([
            r.date.start.map(|d| d.to_rfc3339()).unwrap_or_default(),
            r.date.end.map(|d| d.to_rfc3339()).unwrap_or_default(),
            r.name.clone(),
            r.amount.to_string(),
            r.category.to_string(),
            r.comment.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

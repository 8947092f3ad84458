// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::commands::kind_of;
use crate::ledger::{LedgerClient, ListOptions};
use crate::models::{Category, ExpenseCategory, IncomeCategory, Kind, Record, PROP_DATE};
use crate::notion::{NotionService, Sort, SortDirection};
use crate::utils::{fmt_date, maybe_print_json, pretty_table};

pub fn handle<S: NotionService>(ledger: &LedgerClient<S>, m: &clap::ArgMatches) -> Result<()> {
    match kind_of(m)? {
        Kind::Expense => print_records(&query_records::<ExpenseCategory, S>(ledger, m)?, m),
        Kind::Income => print_records(&query_records::<IncomeCategory, S>(ledger, m)?, m),
    }
}

/// `list_all` unless the caller asked for an explicit page.
pub fn query_records<C: Category, S: NotionService>(
    ledger: &LedgerClient<S>,
    m: &clap::ArgMatches,
) -> Result<Vec<Record<C>>> {
    let page_size = m.get_one::<u32>("page-size").copied();
    let cursor = m.get_one::<String>("cursor").cloned();

    if page_size.is_none() && cursor.is_none() {
        return ledger
            .list_all::<C>()
            .with_context(|| format!("Listing all {} records", C::KIND));
    }

    let direction = match m.get_one::<String>("sort").map(String::as_str) {
        Some("asc") => SortDirection::Ascending,
        _ => SortDirection::Descending,
    };
    let opts = ListOptions {
        cursor,
        page_size,
        sorts: vec![Sort {
            property: PROP_DATE.to_string(),
            direction,
        }],
    };
    ledger
        .list::<C>(opts)
        .with_context(|| format!("Listing a page of {} records", C::KIND))
}

pub fn record_rows<C: Category>(records: &[Record<C>]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|r| {
            vec![
                fmt_date(r.date.start),
                r.name.clone(),
                r.amount.to_string(),
                r.category.to_string(),
                r.comment.clone(),
            ]
        })
        .collect()
}

fn print_records<C: Category>(records: &[Record<C>], m: &clap::ArgMatches) -> Result<()> {
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &records)? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["Date", "Name", "Amount", "Category", "Comment"],
            record_rows(records),
        )
    );
    Ok(())
}

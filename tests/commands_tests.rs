// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{expense_page, income_page, StubNotion};
use notion_finance::commands::{add, export, list};
use notion_finance::error::exit_code;
use notion_finance::ledger::LedgerClient;
use notion_finance::models::{ExpenseCategory, IncomeCategory};
use notion_finance::notion::SortDirection;
use notion_finance::{cli, models::Category};
use rust_decimal::Decimal;
use tempfile::tempdir;

fn sub_matches(args: &[&str]) -> clap::ArgMatches {
    let matches = cli::build_cli().get_matches_from(args);
    match matches.subcommand() {
        Some((_, sub)) => sub.clone(),
        None => panic!("no subcommand"),
    }
}

fn three_expenses() -> StubNotion {
    StubNotion::default()
        .with_page(
            None,
            vec![
                expense_page("e1", "Bus", -250, "Transport"),
                expense_page("e2", "Lunch", -1200, "Food"),
            ],
            true,
        )
        .with_page(
            Some("e2"),
            vec![
                expense_page("e2", "Lunch", -1200, "Food"),
                expense_page("e3", "Spotify", -999, "Subscription"),
            ],
            false,
        )
}

#[test]
fn list_without_paging_fetches_everything() {
    let stub = three_expenses();
    let ledger = LedgerClient::new(&stub, "db");
    let m = sub_matches(&["notion-finance", "list", "--type", "expense"]);

    let rows = list::query_records::<ExpenseCategory, _>(&ledger, &m).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(stub.queries.borrow().len(), 2);

    let table = list::record_rows(&rows);
    assert_eq!(
        table[2],
        vec!["2022-08-01", "Spotify", "-9.99", "Subscription", ""]
    );
}

#[test]
fn list_with_page_size_fetches_one_page() {
    let stub = three_expenses();
    let ledger = LedgerClient::new(&stub, "db");
    let m = sub_matches(&[
        "notion-finance",
        "list",
        "--type",
        "expense",
        "--page-size",
        "2",
        "--sort",
        "asc",
    ]);

    let rows = list::query_records::<ExpenseCategory, _>(&ledger, &m).unwrap();
    assert_eq!(rows.len(), 2);
    let queries = stub.queries.borrow();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].1.page_size, Some(2));
    assert_eq!(queries[0].1.sorts[0].property, "Date");
    assert_eq!(queries[0].1.sorts[0].direction, SortDirection::Ascending);
}

#[test]
fn list_handler_prints_incomes() {
    let stub = StubNotion::default().with_page(
        None,
        vec![income_page("i1", "Salary", 300000, "Work")],
        false,
    );
    let ledger = LedgerClient::new(&stub, "db");
    let m = sub_matches(&["notion-finance", "list", "--type", "income", "--jsonl"]);
    list::handle(&ledger, &m).unwrap();
    assert_eq!(stub.queries.borrow().len(), 1);
}

#[test]
fn add_builds_input_from_arguments() {
    let m = sub_matches(&[
        "notion-finance",
        "add",
        "--type",
        "income",
        "--name",
        " Freelance ",
        "--amount",
        "120.50",
        "--date",
        "2022-09-02",
        "--category",
        "Work",
        "--comment",
        "logo design",
    ]);
    let input = add::input_from_args::<IncomeCategory>(&m).unwrap();
    assert_eq!(input.name, "Freelance");
    assert_eq!(input.amount, Decimal::new(12050, 2));
    assert_eq!(input.date.to_rfc3339(), "2022-09-02T00:00:00+00:00");
    assert_eq!(input.category, IncomeCategory::Work);
    assert_eq!(input.comment, "logo design");
}

#[test]
fn add_creates_expense_with_unknown_category() {
    let stub = StubNotion::default();
    let ledger = LedgerClient::new(&stub, "db");
    let m = sub_matches(&[
        "notion-finance",
        "add",
        "--type",
        "expense",
        "--name",
        "Gift",
        "--amount",
        "-35",
        "--category",
        "Gifts",
    ]);
    let rec = add::create::<ExpenseCategory, _>(&ledger, &m).unwrap();
    assert_eq!(rec.category.as_str(), "Gifts");
    assert_eq!(rec.amount, Decimal::new(-35, 0));
    assert_eq!(stub.creates.borrow().len(), 1);
}

#[test]
fn add_positive_expense_exits_with_validation_code() {
    let stub = StubNotion::default();
    let ledger = LedgerClient::new(&stub, "db");
    let m = sub_matches(&[
        "notion-finance",
        "add",
        "--type",
        "expense",
        "--name",
        "Oops",
        "--amount",
        "10",
        "--category",
        "Food",
    ]);
    let err = add::handle(&ledger, &m).unwrap_err();
    assert_eq!(exit_code(&err), 3);
    assert!(stub.creates.borrow().is_empty());
}

#[test]
fn export_writes_csv() {
    let stub = three_expenses();
    let ledger = LedgerClient::new(&stub, "db");
    let dir = tempdir().unwrap();
    let out = dir.path().join("expenses.csv");
    let out_str = out.to_string_lossy().to_string();
    let m = sub_matches(&[
        "notion-finance",
        "export",
        "--type",
        "expense",
        "--out",
        &out_str,
    ]);
    export::handle(&ledger, &m).unwrap();

    let written = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "start,end,name,amount,category,comment");
    assert_eq!(lines[1], "2022-08-01T00:00:00+00:00,,Bus,-2.50,Transport,");
}

#[test]
fn export_writes_json() {
    let stub = StubNotion::default().with_page(
        None,
        vec![income_page("i1", "Salary", 300000, "Work")],
        false,
    );
    let ledger = LedgerClient::new(&stub, "db");
    let dir = tempdir().unwrap();
    let out = dir.path().join("incomes.json");
    let out_str = out.to_string_lossy().to_string();
    let m = sub_matches(&[
        "notion-finance",
        "export",
        "--type",
        "income",
        "--format",
        "json",
        "--out",
        &out_str,
    ]);
    export::handle(&ledger, &m).unwrap();

    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(v[0]["name"], "Salary");
    assert_eq!(v[0]["amount"], "3000.00");
    assert_eq!(v[0]["category"], "Work");
    assert_eq!(v[0]["date"]["start"], "2022-08-31T00:00:00Z");
    assert!(v[0]["date"]["end"].is_null());
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use notion_finance::codec::{encode, page_from_properties};
use notion_finance::error::QueryError;
use notion_finance::models::{CreateInput, ExpenseCategory, IncomeCategory};
use notion_finance::notion::{
    DatabaseQuery, NotionService, Page, PageCreateRequest, QueryResponse,
};
use rust_decimal::Decimal;

/// In-memory stand-in for the Notion API. Query responses are keyed by the
/// requested start cursor.
#[derive(Default)]
pub struct StubNotion {
    pub responses: HashMap<Option<String>, QueryResponse>,
    pub queries: RefCell<Vec<(String, DatabaseQuery)>>,
    pub creates: RefCell<Vec<PageCreateRequest>>,
    pub fail_with: Option<fn() -> QueryError>,
    pub create_override: Option<Page>,
}

impl StubNotion {
    pub fn with_page(mut self, cursor: Option<&str>, results: Vec<Page>, has_more: bool) -> Self {
        self.responses.insert(
            cursor.map(str::to_string),
            QueryResponse {
                results,
                has_more,
                next_cursor: None,
            },
        );
        self
    }

    /// Like [`StubNotion::with_page`], but also reports a service cursor.
    pub fn with_next_cursor(
        mut self,
        cursor: Option<&str>,
        results: Vec<Page>,
        next_cursor: &str,
    ) -> Self {
        self.responses.insert(
            cursor.map(str::to_string),
            QueryResponse {
                results,
                has_more: true,
                next_cursor: Some(next_cursor.to_string()),
            },
        );
        self
    }

    pub fn cursors(&self) -> Vec<Option<String>> {
        self.queries
            .borrow()
            .iter()
            .map(|(_, q)| q.start_cursor.clone())
            .collect()
    }
}

impl NotionService for StubNotion {
    fn query_database(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
    ) -> Result<QueryResponse, QueryError> {
        self.queries
            .borrow_mut()
            .push((database_id.to_string(), query.clone()));
        if let Some(fail) = self.fail_with {
            return Err(fail());
        }
        self.responses
            .get(&query.start_cursor)
            .cloned()
            .ok_or(QueryError::Status(400))
    }

    fn create_page(&self, request: &PageCreateRequest) -> Result<Page, QueryError> {
        self.creates.borrow_mut().push(request.clone());
        if let Some(fail) = self.fail_with {
            return Err(fail());
        }
        if let Some(page) = &self.create_override {
            return Ok(page.clone());
        }
        let id = format!("created-{}", self.creates.borrow().len());
        Ok(page_from_properties(id, &request.properties))
    }
}

pub fn expense_page(id: &str, name: &str, cents: i64, category: &str) -> Page {
    let input = CreateInput {
        name: name.to_string(),
        amount: Decimal::new(cents, 2),
        date: Utc.with_ymd_and_hms(2022, 8, 1, 0, 0, 0).unwrap(),
        comment: String::new(),
        category: ExpenseCategory::from(category),
    };
    page_from_properties(id, &encode(&input))
}

pub fn income_page(id: &str, name: &str, cents: i64, category: &str) -> Page {
    let input = CreateInput {
        name: name.to_string(),
        amount: Decimal::new(cents, 2),
        date: Utc.with_ymd_and_hms(2022, 8, 31, 0, 0, 0).unwrap(),
        comment: format!("{} payout", name),
        category: IncomeCategory::from(category),
    };
    page_from_properties(id, &encode(&input))
}

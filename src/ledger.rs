// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashSet;

use crate::codec;
use crate::error::{LedgerError, QueryError};
use crate::models::{Category, CreateInput, Record};
use crate::notion::{DatabaseQuery, NotionService, Page, PageCreateRequest, Parent, Sort};

/// Explicit paging for a single-page [`LedgerClient::list`].
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub cursor: Option<String>,
    pub page_size: Option<u32>,
    pub sorts: Vec<Sort>,
}

/// Income and expense access over the shared finance table.
pub struct LedgerClient<S> {
    service: S,
    database_id: String,
}

impl<S: NotionService> LedgerClient<S> {
    pub fn new(service: S, database_id: impl Into<String>) -> Self {
        LedgerClient {
            service,
            database_id: database_id.into(),
        }
    }

    /// Fetches every record of kind `C`, following the cursor until the
    /// service reports no more results.
    pub fn list_all<C: Category>(&self) -> Result<Vec<Record<C>>, LedgerError> {
        let mut query = DatabaseQuery {
            filter: Some(C::KIND.amount_filter()),
            ..DatabaseQuery::default()
        };
        let mut results: Vec<Page> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        loop {
            let resp = self.service.query_database(&self.database_id, &query)?;
            let fresh = resp.results.iter().filter(|p| !seen.contains(&p.id)).count();
            tracing::debug!(
                kind = %C::KIND,
                fetched = resp.results.len(),
                fresh,
                has_more = resp.has_more,
                "queried finance page"
            );
            seen.extend(resp.results.iter().map(|p| p.id.clone()));
            results.extend(resp.results);

            if !resp.has_more {
                break;
            }
            // The start cursor is inclusive, so the next page begins with
            // the record we continue from; dedup below drops it. A page of
            // only seen records can never move a record-id cursor forward.
            let stalled = QueryError::StalledPagination {
                fetched: seen.len(),
            };
            let next = match results.last() {
                Some(_) if fresh == 0 => return Err(stalled.into()),
                Some(last) => last.id.clone(),
                None => match resp.next_cursor {
                    Some(cursor) => cursor,
                    None => return Err(stalled.into()),
                },
            };
            query.start_cursor = Some(next);
        }

        let pages = dedup_by_id(results);
        Ok(codec::decode_many(&pages)?)
    }

    /// One page of records of kind `C`. No dedup, no continuation.
    pub fn list<C: Category>(&self, opts: ListOptions) -> Result<Vec<Record<C>>, LedgerError> {
        let query = DatabaseQuery {
            filter: Some(C::KIND.amount_filter()),
            sorts: opts.sorts,
            start_cursor: opts.cursor,
            page_size: opts.page_size,
        };
        let resp = self.service.query_database(&self.database_id, &query)?;
        tracing::debug!(kind = %C::KIND, fetched = resp.results.len(), "queried single page");
        Ok(codec::decode_many(&resp.results)?)
    }

    /// Stores a new record and returns it as the service saved it.
    pub fn create<C: Category>(&self, input: CreateInput<C>) -> Result<Record<C>, LedgerError> {
        C::KIND.check_amount(input.amount)?;

        let request = PageCreateRequest {
            parent: Parent {
                database_id: self.database_id.clone(),
            },
            properties: codec::encode(&input),
        };
        let page = self.service.create_page(&request)?;
        tracing::info!(kind = %C::KIND, page = %page.id, "created finance record");
        Ok(codec::decode(&page)?)
    }
}

/// Stable dedup: keeps the first page seen for each id.
fn dedup_by_id(pages: Vec<Page>) -> Vec<Page> {
    let mut seen = HashSet::with_capacity(pages.len());
    pages
        .into_iter()
        .filter(|p| seen.insert(p.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(id: &str) -> Page {
        Page {
            id: id.to_string(),
            properties: Default::default(),
        }
    }

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        let pages = vec![bare("a"), bare("b"), bare("b"), bare("c"), bare("a")];
        let ids: Vec<String> = dedup_by_id(pages).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }
}

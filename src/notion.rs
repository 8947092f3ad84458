// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Wire model of the Notion database API and a blocking client for it.
//!
//! Property values are decoded once, here, into the [`PropertyValue`] sum
//! type; everything above this module matches on variants instead of
//! inspecting raw JSON.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::blocking::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::NotionConfig;
use crate::error::QueryError;
use crate::utils::http_client;

pub const NOTION_API_URL: &str = "https://api.notion.com/v1";
pub const NOTION_VERSION: &str = "2022-06-28";

pub type Properties = BTreeMap<String, PropertyValue>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        title: Vec<RichText>,
    },
    RichText {
        rich_text: Vec<RichText>,
    },
    Number {
        #[serde(
            default,
            serialize_with = "rust_decimal::serde::float_option::serialize",
            deserialize_with = "number_from_json"
        )]
        number: Option<Decimal>,
    },
    Select {
        select: Option<SelectOption>,
    },
    Date {
        date: Option<DateValue>,
    },
    /// Any property type finance pages never use (formula, relation, ...).
    #[serde(other)]
    Unsupported,
}

/// Notion sends numbers as JSON floats or `null`. Tagged enums buffer the
/// value first, so this goes through `Option<f64>` rather than a
/// `Decimal` visitor.
fn number_from_json<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer)?
        .map(|f| Decimal::try_from(f).map_err(serde::de::Error::custom))
        .transpose()
}

impl PropertyValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Title { .. } => "title",
            PropertyValue::RichText { .. } => "rich_text",
            PropertyValue::Number { .. } => "number",
            PropertyValue::Select { .. } => "select",
            PropertyValue::Date { .. } => "date",
            PropertyValue::Unsupported => "unsupported",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub plain_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
}

impl RichText {
    /// A plain text segment as sent in create requests.
    pub fn text(content: impl Into<String>) -> Self {
        RichText {
            plain_text: String::new(),
            text: Some(TextContent {
                content: content.into(),
            }),
        }
    }

    pub fn plain(&self) -> &str {
        if !self.plain_text.is_empty() {
            return &self.plain_text;
        }
        self.text.as_ref().map(|t| t.content.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateValue {
    pub start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub properties: Properties,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberCondition {
    GreaterThan(#[serde(serialize_with = "rust_decimal::serde::float::serialize")] Decimal),
    LessThanOrEqualTo(#[serde(serialize_with = "rust_decimal::serde::float::serialize")] Decimal),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyFilter {
    pub property: String,
    pub number: NumberCondition,
}

impl PropertyFilter {
    pub fn number(property: &str, condition: NumberCondition) -> Self {
        PropertyFilter {
            property: property.to_string(),
            number: condition,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sort {
    pub property: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatabaseQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<PropertyFilter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<Sort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<Page>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parent {
    pub database_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageCreateRequest {
    pub parent: Parent,
    pub properties: Properties,
}

/// The two calls the ledger needs from the database service.
pub trait NotionService {
    fn query_database(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
    ) -> Result<QueryResponse, QueryError>;

    fn create_page(&self, request: &PageCreateRequest) -> Result<Page, QueryError>;
}

impl<S: NotionService + ?Sized> NotionService for &S {
    fn query_database(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
    ) -> Result<QueryResponse, QueryError> {
        (**self).query_database(database_id, query)
    }

    fn create_page(&self, request: &PageCreateRequest) -> Result<Page, QueryError> {
        (**self).create_page(request)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    status: u16,
    code: String,
    message: String,
}

pub struct NotionClient {
    http: Client,
    base_url: String,
    token: String,
}

impl NotionClient {
    pub fn new(config: &NotionConfig) -> Result<Self, QueryError> {
        let http = http_client(Duration::from_secs(config.timeout_secs))?;
        Ok(NotionClient {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.integration_token.clone(),
        })
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, QueryError> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, "POST");
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(body)
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(api_error(status.as_u16(), &body));
        }
        Ok(resp.json()?)
    }
}

impl NotionService for NotionClient {
    fn query_database(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
    ) -> Result<QueryResponse, QueryError> {
        self.post(&format!("databases/{}/query", database_id), query)
    }

    fn create_page(&self, request: &PageCreateRequest) -> Result<Page, QueryError> {
        self.post("pages", request)
    }
}

fn api_error(status: u16, body: &str) -> QueryError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(e) => QueryError::Api {
            status: e.status,
            code: e.code,
            message: e.message,
        },
        Err(_) => QueryError::Status(status),
    }
}

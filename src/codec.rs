// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Mapping between finance pages and typed records.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::error::DecodeError;
use crate::models::{
    Category, CreateInput, DateRange, Record, PROP_AMOUNT, PROP_COMMENT, PROP_DATE, PROP_NAME,
};
use crate::notion::{DateValue, Page, Properties, PropertyValue, RichText, SelectOption};

fn property<'a>(page: &'a Page, name: &'static str) -> Result<&'a PropertyValue, DecodeError> {
    page.properties.get(name).ok_or_else(|| DecodeError::Missing {
        page: page.id.clone(),
        property: name,
    })
}

fn wrong_type(page: &Page, name: &'static str, expected: &'static str, found: &PropertyValue) -> DecodeError {
    DecodeError::WrongType {
        page: page.id.clone(),
        property: name,
        expected,
        found: found.type_name(),
    }
}

fn join_text(parts: &[RichText]) -> String {
    parts.iter().map(RichText::plain).collect()
}

fn parse_timestamp(page: &Page, raw: &str) -> Result<DateTime<Utc>, DecodeError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| DecodeError::InvalidDate {
            page: page.id.clone(),
            property: PROP_DATE,
            value: raw.to_string(),
        })
}

/// Decodes one finance page into a record of kind `C::KIND`.
pub fn decode<C: Category>(page: &Page) -> Result<Record<C>, DecodeError> {
    let name = match property(page, PROP_NAME)? {
        PropertyValue::Title { title } => join_text(title),
        other => return Err(wrong_type(page, PROP_NAME, "title", other)),
    };

    let amount = match property(page, PROP_AMOUNT)? {
        PropertyValue::Number { number } => number.unwrap_or(Decimal::ZERO),
        other => return Err(wrong_type(page, PROP_AMOUNT, "number", other)),
    };

    let category_prop = C::KIND.category_property();
    let category = match property(page, category_prop)? {
        PropertyValue::Select { select } => {
            C::from(select.as_ref().map(|s| s.name.clone()).unwrap_or_default())
        }
        other => return Err(wrong_type(page, category_prop, "select", other)),
    };

    let date = match property(page, PROP_DATE)? {
        PropertyValue::Date { date: Some(d) } => DateRange {
            start: Some(parse_timestamp(page, &d.start)?),
            end: d.end.as_deref().map(|e| parse_timestamp(page, e)).transpose()?,
        },
        PropertyValue::Date { date: None } => DateRange::default(),
        other => return Err(wrong_type(page, PROP_DATE, "date", other)),
    };

    let comment = match property(page, PROP_COMMENT)? {
        PropertyValue::RichText { rich_text } => join_text(rich_text),
        other => return Err(wrong_type(page, PROP_COMMENT, "rich_text", other)),
    };

    Ok(Record {
        name,
        amount,
        date,
        comment,
        category,
    })
}

/// All-or-nothing: the first page that fails to decode fails the batch.
pub fn decode_many<C: Category>(pages: &[Page]) -> Result<Vec<Record<C>>, DecodeError> {
    pages.iter().map(decode::<C>).collect()
}

pub fn encode<C: Category>(input: &CreateInput<C>) -> Properties {
    let mut props = Properties::new();
    props.insert(
        PROP_NAME.to_string(),
        PropertyValue::Title {
            title: vec![RichText::text(input.name.clone())],
        },
    );
    props.insert(
        PROP_AMOUNT.to_string(),
        PropertyValue::Number {
            number: Some(input.amount),
        },
    );
    props.insert(
        PROP_DATE.to_string(),
        PropertyValue::Date {
            date: Some(DateValue {
                start: input.date.to_rfc3339(),
                end: None,
            }),
        },
    );
    let comment = if input.comment.is_empty() {
        Vec::new()
    } else {
        vec![RichText::text(input.comment.clone())]
    };
    props.insert(
        PROP_COMMENT.to_string(),
        PropertyValue::RichText { rich_text: comment },
    );
    props.insert(
        C::KIND.category_property().to_string(),
        PropertyValue::Select {
            select: Some(SelectOption {
                name: input.category.as_str().to_string(),
            }),
        },
    );
    props
}

/// Builds the page the service hands back after storing `properties`:
/// text segments get their rendered `plain_text` filled in.
pub fn page_from_properties(id: impl Into<String>, properties: &Properties) -> Page {
    let render = |parts: &[RichText]| -> Vec<RichText> {
        parts
            .iter()
            .map(|p| RichText {
                plain_text: p.plain().to_string(),
                text: p.text.clone(),
            })
            .collect()
    };
    let properties = properties
        .iter()
        .map(|(k, v)| {
            let v = match v {
                PropertyValue::Title { title } => PropertyValue::Title {
                    title: render(title),
                },
                PropertyValue::RichText { rich_text } => PropertyValue::RichText {
                    rich_text: render(rich_text),
                },
                other => other.clone(),
            };
            (k.clone(), v)
        })
        .collect();
    Page {
        id: id.into(),
        properties,
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Once;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::Decimal;

const UA: &str = concat!(
    "notion-finance/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/notion-finance)"
);

static TRACING_INIT: Once = Once::new();

/// Installs the stderr subscriber once. `RUST_LOG` wins over `verbosity`.
pub fn init_tracing(verbosity: u8) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let level = match verbosity {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("notion_finance={}", level)));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}

pub fn http_client(timeout: Duration) -> reqwest::Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(UA)
        .build()
}

/// Accepts `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }
    let day = NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| {
        format!("Invalid date '{}', expected YYYY-MM-DD or RFC 3339", s)
    })?;
    Ok(day.and_time(chrono::NaiveTime::MIN).and_utc())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_date(d: Option<DateTime<Utc>>) -> String {
    match d {
        Some(ts) if ts.time() == chrono::NaiveTime::MIN => ts.format("%Y-%m-%d").to_string(),
        Some(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
        None => String::new(),
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamps_from_day_or_rfc3339() {
        assert_eq!(
            parse_timestamp("2022-08-01").unwrap(),
            Utc.with_ymd_and_hms(2022, 8, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_timestamp("2022-08-01T10:15:00+02:00").unwrap(),
            Utc.with_ymd_and_hms(2022, 8, 1, 8, 15, 0).unwrap()
        );
        assert!(parse_timestamp("01/08/2022").is_err());
    }

    #[test]
    fn date_column_drops_midnight() {
        assert_eq!(fmt_date(Some(Utc.with_ymd_and_hms(2022, 8, 1, 0, 0, 0).unwrap())), "2022-08-01");
        assert_eq!(
            fmt_date(Some(Utc.with_ymd_and_hms(2022, 8, 1, 9, 5, 0).unwrap())),
            "2022-08-01 09:05"
        );
        assert_eq!(fmt_date(None), "");
    }
}

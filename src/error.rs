// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Caller input that breaks a local invariant. Raised before any request
/// is sent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("amount for an expense must be less than or equal to 0 (got {0})")]
    ExpenseAmountPositive(Decimal),
    #[error("amount for an income must be greater than 0 (got {0})")]
    IncomeAmountNotPositive(Decimal),
}

/// A page whose properties do not have the shape a finance record needs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("page {page} has no '{property}' property")]
    Missing { page: String, property: &'static str },
    #[error("'{property}' property of page {page} is {found}, expected {expected}")]
    WrongType {
        page: String,
        property: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("'{property}' property of page {page} has invalid date '{value}'")]
    InvalidDate {
        page: String,
        property: &'static str,
        value: String,
    },
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("request to Notion failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Notion API error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
    #[error("Notion returned HTTP {0}")]
    Status(u16),
    #[error("pagination stalled after {fetched} results: service reports more but no cursor advances")]
    StalledPagination { fetched: usize },
}

/// Everything a ledger operation can fail with.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Query(#[from] QueryError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid env file {path}: {source}")]
    DotEnv {
        path: String,
        #[source]
        source: dotenvy::Error,
    },
    #[error("environment variable {0} referenced by the config is not set")]
    UnsetVariable(String),
    #[error("missing {0} (set it in the config file or the environment)")]
    MissingValue(&'static str),
    #[error("could not determine platform-specific config dir")]
    NoConfigDir,
}

/// Process exit code for a failed command, picked from the first
/// recognised error in the chain. Usage errors exit with clap's code 2.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<LedgerError>() {
            return match e {
                LedgerError::Validation(_) => 3,
                LedgerError::Decode(_) => 4,
                LedgerError::Query(_) => 5,
            };
        }
        if cause.is::<ValidationError>() {
            return 3;
        }
        if cause.is::<DecodeError>() {
            return 4;
        }
        if cause.is::<QueryError>() {
            return 5;
        }
        if cause.is::<ConfigError>() {
            return 6;
        }
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn exit_codes_follow_error_category() {
        let validation: anyhow::Error =
            LedgerError::from(ValidationError::ExpenseAmountPositive(Decimal::TEN)).into();
        assert_eq!(exit_code(&validation), 3);

        let decode = Err::<(), _>(LedgerError::from(DecodeError::Missing {
            page: "p".into(),
            property: "Name",
        }))
        .context("listing expenses")
        .unwrap_err();
        assert_eq!(exit_code(&decode), 4);

        let query: anyhow::Error = LedgerError::from(QueryError::Status(500)).into();
        assert_eq!(exit_code(&query), 5);

        let config: anyhow::Error = ConfigError::MissingValue("notion.integration_token").into();
        assert_eq!(exit_code(&config), 6);

        assert_eq!(exit_code(&anyhow::anyhow!("boom")), 1);
    }
}

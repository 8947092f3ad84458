// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::error::ValidationError;
use crate::notion::{NumberCondition, PropertyFilter};

pub const PROP_NAME: &str = "Name";
pub const PROP_AMOUNT: &str = "Amount";
pub const PROP_CATEGORY_EXPENSE: &str = "Category (Expense)";
pub const PROP_CATEGORY_INCOME: &str = "Category (Income)";
pub const PROP_DATE: &str = "Date";
pub const PROP_COMMENT: &str = "Comment";

/// Which half of the shared ledger a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Expense,
    Income,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Expense => "expense",
            Kind::Income => "income",
        }
    }

    /// Select property holding this kind's category. The other kind's
    /// select is never read or written.
    pub fn category_property(self) -> &'static str {
        match self {
            Kind::Expense => PROP_CATEGORY_EXPENSE,
            Kind::Income => PROP_CATEGORY_INCOME,
        }
    }

    /// Expenses are `Amount <= 0`, incomes are `Amount > 0`.
    pub fn amount_filter(self) -> PropertyFilter {
        let condition = match self {
            Kind::Expense => NumberCondition::LessThanOrEqualTo(Decimal::ZERO),
            Kind::Income => NumberCondition::GreaterThan(Decimal::ZERO),
        };
        PropertyFilter::number(PROP_AMOUNT, condition)
    }

    pub fn check_amount(self, amount: Decimal) -> Result<(), ValidationError> {
        match self {
            Kind::Expense if amount > Decimal::ZERO => {
                Err(ValidationError::ExpenseAmountPositive(amount))
            }
            Kind::Income if amount <= Decimal::ZERO => {
                Err(ValidationError::IncomeAmountNotPositive(amount))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Ok(Kind::Expense),
            "income" => Ok(Kind::Income),
            other => Err(format!("unknown record type '{}' (use income|expense)", other)),
        }
    }
}

/// A category enum tied to one record kind.
///
/// Conversion from the raw select value never fails: names outside the
/// known set are kept verbatim so new select options in the database keep
/// decoding.
pub trait Category: Clone + fmt::Debug + fmt::Display + PartialEq + Serialize + From<String> {
    const KIND: Kind;

    fn as_str(&self) -> &str;

    fn known() -> &'static [&'static str];
}

macro_rules! category_enum {
    ($(#[$meta:meta])* $name:ident, $kind:expr, [$($variant:ident),+ $(,)?]) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                match raw.as_str() {
                    $(stringify!($variant) => $name::$variant,)+
                    _ => $name::Other(raw),
                }
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                $name::from(raw.to_string())
            }
        }

        impl Category for $name {
            const KIND: Kind = $kind;

            fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => stringify!($variant),)+
                    $name::Other(raw) => raw,
                }
            }

            fn known() -> &'static [&'static str] {
                &[$(stringify!($variant)),+]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

category_enum!(
    /// What an expense was spent on.
    ExpenseCategory,
    Kind::Expense,
    [Transport, Education, Subscription, Entertainment, Food]
);

category_enum!(
    /// Where an income came from.
    IncomeCategory,
    Kind::Income,
    [Work, Parent, Claim]
);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// One row of the finance table, typed by its category enum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record<C> {
    pub name: String,
    pub amount: Decimal,
    pub date: DateRange,
    pub comment: String,
    pub category: C,
}

pub type Expense = Record<ExpenseCategory>;
pub type Income = Record<IncomeCategory>;

/// Payload for creating a record. Carries a single timestamp; the stored
/// record comes back with it as the range start.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateInput<C> {
    pub name: String,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    pub comment: String,
    pub category: C,
}

pub type CreateExpenseInput = CreateInput<ExpenseCategory>;
pub type CreateIncomeInput = CreateInput<IncomeCategory>;

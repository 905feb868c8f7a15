//! Transaction record types shared by the loader, the query engine and the summary

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Category assigned when an export row carries none
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// A recorded expense, as handed over by the storage layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Identifier assigned by the store (row position for exports without ids)
    pub id: i64,
    /// Free-form description, usually the merchant
    pub description: String,
    /// Non-negative, currency-agnostic amount
    pub amount: f64,
    /// User-defined or default category label
    pub category: String,
    /// When the transaction happened
    pub timestamp: NaiveDateTime,
}

impl Transaction {
    pub fn new(
        id: i64,
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            amount,
            category: category.into(),
            timestamp,
        }
    }

    /// Calendar day of the transaction
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// Anything the query engine can evaluate a search against.
///
/// The engine only ever reads these three attributes, so callers can search
/// their own record types without converting to [`Transaction`].
pub trait Searchable {
    fn description(&self) -> &str;
    fn category(&self) -> &str;
    fn amount(&self) -> f64;
}

impl Searchable for Transaction {
    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn amount(&self) -> f64 {
        self.amount
    }
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn description(&self) -> &str {
        (**self).description()
    }

    fn category(&self) -> &str {
        (**self).category()
    }

    fn amount(&self) -> f64 {
        (**self).amount()
    }
}

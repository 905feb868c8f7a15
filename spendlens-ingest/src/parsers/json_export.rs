//! JSON transaction exports: an array of objects as returned by the
//! transaction listing, e.g.
//!
//!   [{"id": 1, "description": "Coffee", "amount": 5.5,
//!     "category": "Dining", "timestamp": "2026-02-18 09:30:00"}]
//!
//! `amount` may be a number or a string.

use anyhow::{Context, Result};
use serde::Deserialize;
use spendlens_core::Transaction;
use std::path::Path;

use crate::fields::{FieldParser, RawRow};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonAmount {
    Number(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct JsonRow {
    #[serde(default)]
    id: Option<i64>,
    description: String,
    amount: JsonAmount,
    #[serde(default)]
    category: Option<String>,
    #[serde(alias = "date")]
    timestamp: String,
}

/// Parse a JSON export file.
pub fn parse_transactions_json(path: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    let s = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("reading {}", path.as_ref().display()))?;
    parse_transactions_json_str(&s).with_context(|| format!("parsing {}", path.as_ref().display()))
}

pub fn parse_transactions_json_str(s: &str) -> Result<Vec<Transaction>> {
    let rows: Vec<JsonRow> = serde_json::from_str(s).context("expected an array of transactions")?;
    let parser = FieldParser::new()?;

    Ok(rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| {
            let (amount, amount_text) = match &row.amount {
                JsonAmount::Number(n) => (Some(*n), ""),
                JsonAmount::Text(t) => (None, t.as_str()),
            };
            RawRow {
                id: row.id,
                description: &row.description,
                amount,
                amount_text,
                category: row.category.as_deref(),
                timestamp: &row.timestamp,
            }
            .into_transaction(&parser, i + 1)
        })
        .collect())
}

//! Normalization of raw export cells into [`Transaction`] fields.

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use spendlens_core::{DEFAULT_CATEGORY, Transaction};

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses the loosely formatted cells found in exports.
pub struct FieldParser {
    amount_re: Regex,
}

impl FieldParser {
    pub fn new() -> Result<Self> {
        // "$1,234.50", "1234.5", "-12", ".99"
        let amount_re = Regex::new(concat!(
            r"^(?P<sign>-)?\s*\$?\s*",
            r"(?P<num>\d[\d,]*(?:\.\d+)?|\.\d+)$"
        ))?;
        Ok(Self { amount_re })
    }

    pub fn amount(&self, raw: &str) -> Option<f64> {
        let caps = self.amount_re.captures(raw.trim())?;
        let value: f64 = caps["num"].replace(',', "").parse().ok()?;
        Some(if caps.name("sign").is_some() { -value } else { value })
    }
}

/// `YYYY-MM-DD HH:MM:SS` (space or `T`, optional fraction) or a bare date,
/// which maps to midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// One export row before validation
#[derive(Debug, Clone, Default)]
pub struct RawRow<'a> {
    pub id: Option<i64>,
    pub description: &'a str,
    pub amount: Option<f64>,
    pub amount_text: &'a str,
    pub category: Option<&'a str>,
    pub timestamp: &'a str,
}

impl RawRow<'_> {
    /// Validate the row. `position` is the 1-based data row number, used as
    /// the id when the export has none and in log messages.
    pub fn into_transaction(self, parser: &FieldParser, position: usize) -> Option<Transaction> {
        let amount = match self.amount.or_else(|| parser.amount(self.amount_text)) {
            Some(a) if a >= 0.0 => a,
            Some(a) => {
                tracing::warn!(row = position, amount = a, "skipping row with negative amount");
                return None;
            }
            None => {
                tracing::warn!(row = position, raw = self.amount_text, "skipping row with unreadable amount");
                return None;
            }
        };

        let Some(timestamp) = parse_timestamp(self.timestamp) else {
            tracing::warn!(row = position, raw = self.timestamp, "skipping row with unreadable timestamp");
            return None;
        };

        let category = self
            .category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY);

        Some(Transaction::new(
            self.id.unwrap_or(position as i64),
            self.description.trim(),
            amount,
            category,
            timestamp,
        ))
    }
}

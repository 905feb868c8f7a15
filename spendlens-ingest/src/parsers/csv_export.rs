//! CSV transaction exports.
//!
//! Expects a header row; column names are matched case-insensitively:
//!   id (optional), description, amount, category (optional), timestamp | date
//!
//!   id,description,amount,category,timestamp
//!   1,Coffee,5.50,Dining,2026-02-18 09:30:00

use anyhow::{Context, Result, bail};
use spendlens_core::Transaction;
use std::io::Read;
use std::path::Path;

use crate::fields::{FieldParser, RawRow};

struct Columns {
    id: Option<usize>,
    description: usize,
    amount: usize,
    category: Option<usize>,
    timestamp: usize,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
        };

        let Some(description) = find(&["description"]) else {
            bail!("missing 'description' column");
        };
        let Some(amount) = find(&["amount"]) else {
            bail!("missing 'amount' column");
        };
        let Some(timestamp) = find(&["timestamp", "date"]) else {
            bail!("missing 'timestamp' column");
        };

        Ok(Self {
            id: find(&["id"]),
            description,
            amount,
            category: find(&["category"]),
            timestamp,
        })
    }
}

/// Parse a CSV export file.
pub fn parse_transactions_csv(path: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    let file = std::fs::File::open(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    parse_transactions_csv_reader(file)
        .with_context(|| format!("parsing {}", path.as_ref().display()))
}

/// Parse CSV export content from any reader.
pub fn parse_transactions_csv_reader(reader: impl Read) -> Result<Vec<Transaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?)?;
    let parser = FieldParser::new()?;
    let mut txns = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        // Blank trailing lines
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let cell = |idx: usize| record.get(idx).unwrap_or("");
        let row = RawRow {
            id: columns.id.and_then(|c| cell(c).trim().parse().ok()),
            description: cell(columns.description),
            amount: None,
            amount_text: cell(columns.amount),
            category: columns.category.map(cell),
            timestamp: cell(columns.timestamp),
        };

        if let Some(txn) = row.into_transaction(&parser, i + 1) {
            txns.push(txn);
        }
    }

    Ok(txns)
}

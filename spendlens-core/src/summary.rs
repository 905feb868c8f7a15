//! Spending totals over a set of transactions, grouped the way the dashboard
//! and the chat assistant report them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::transaction::Transaction;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    /// One row per transaction, largest first
    None,
    #[default]
    Category,
    /// Grouped by description
    Merchant,
    /// Grouped by calendar day, oldest first
    Day,
}

impl FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(GroupBy::None),
            "category" => Ok(GroupBy::Category),
            "merchant" => Ok(GroupBy::Merchant),
            "day" => Ok(GroupBy::Day),
            other => Err(format!(
                "unknown grouping '{other}' (expected none, category, merchant or day)"
            )),
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GroupBy::None => "none",
            GroupBy::Category => "category",
            GroupBy::Merchant => "merchant",
            GroupBy::Day => "day",
        })
    }
}

/// One line of a spending summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpendingRow {
    pub key: String,
    pub total: f64,
    pub count: usize,
}

pub fn total_spent<'a, I>(txns: I) -> f64
where
    I: IntoIterator<Item = &'a Transaction>,
{
    txns.into_iter().map(|t| t.amount).sum()
}

/// Group and total `txns`. `limit` keeps only the first rows.
///
/// Ties keep the order in which keys were first seen.
pub fn summarize<'a, I>(txns: I, group_by: GroupBy, limit: Option<usize>) -> Vec<SpendingRow>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut rows = match group_by {
        GroupBy::None => {
            let mut rows: Vec<SpendingRow> = txns
                .into_iter()
                .map(|t| SpendingRow {
                    key: t.description.clone(),
                    total: t.amount,
                    count: 1,
                })
                .collect();
            sort_by_total_desc(&mut rows);
            rows
        }
        GroupBy::Category => {
            let mut rows = group(txns, |t| t.category.clone());
            sort_by_total_desc(&mut rows);
            rows
        }
        GroupBy::Merchant => {
            let mut rows = group(txns, |t| t.description.clone());
            sort_by_total_desc(&mut rows);
            rows
        }
        GroupBy::Day => {
            let mut rows = group(txns, |t| t.day().format("%Y-%m-%d").to_string());
            rows.sort_by(|a, b| a.key.cmp(&b.key));
            rows
        }
    };

    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    rows
}

fn group<'a, I, F>(txns: I, key_of: F) -> Vec<SpendingRow>
where
    I: IntoIterator<Item = &'a Transaction>,
    F: Fn(&Transaction) -> String,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<SpendingRow> = Vec::new();

    for t in txns {
        let key = key_of(t);
        match index.get(&key) {
            Some(&i) => {
                rows[i].total += t.amount;
                rows[i].count += 1;
            }
            None => {
                index.insert(key.clone(), rows.len());
                rows.push(SpendingRow {
                    key,
                    total: t.amount,
                    count: 1,
                });
            }
        }
    }

    rows
}

// Stable: equal totals stay in first-seen order.
fn sort_by_total_desc(rows: &mut [SpendingRow]) {
    rows.sort_by(|a, b| b.total.total_cmp(&a.total));
}

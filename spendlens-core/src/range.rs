//! Coarse pre-filter applied before the search query: date range, category
//! and minimum amount, the way the transaction listing narrows a store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::transaction::Transaction;

/// Category value meaning "no category constraint"
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFilter {
    /// First day included
    pub start: Option<NaiveDate>,
    /// Last day included, whole day
    pub end: Option<NaiveDate>,
    /// Exact category label; [`ALL_CATEGORIES`] disables the check
    pub category: Option<String>,
    pub min_amount: Option<f64>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(mut self, day: NaiveDate) -> Self {
        self.start = Some(day);
        self
    }

    pub fn end(mut self, day: NaiveDate) -> Self {
        self.end = Some(day);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn min_amount(mut self, amount: f64) -> Self {
        self.min_amount = Some(amount);
        self
    }

    pub fn accepts(&self, txn: &Transaction) -> bool {
        // Compared by calendar day so sub-second timestamps on the end day stay in.
        let day = txn.day();
        if let Some(start) = self.start {
            if day < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if day > end {
                return false;
            }
        }
        if let Some(category) = self.category.as_deref() {
            if category != ALL_CATEGORIES && txn.category != category {
                return false;
            }
        }
        if let Some(min) = self.min_amount {
            if txn.amount < min {
                return false;
            }
        }
        true
    }

    /// Transactions passing the filter, in input order.
    pub fn apply<'a>(&self, txns: &'a [Transaction]) -> Vec<&'a Transaction> {
        txns.iter().filter(|t| self.accepts(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    fn txn(id: i64, m: u32, d: u32, hms: (u32, u32, u32), category: &str, amount: f64) -> Transaction {
        let ts = day(m, d).and_hms_opt(hms.0, hms.1, hms.2).unwrap();
        Transaction::new(id, format!("txn {id}"), amount, category, ts)
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn(1, 1, 31, (23, 0, 0), "Dining", 20.0),
            txn(2, 2, 1, (0, 0, 0), "Transport", 5.0),
            txn(3, 2, 14, (23, 59, 59), "Dining", 60.0),
            txn(4, 2, 15, (0, 0, 1), "Housing", 900.0),
        ]
    }

    fn ids(v: Vec<&Transaction>) -> Vec<i64> {
        v.into_iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_empty_filter_keeps_all() {
        let txns = sample();
        assert_eq!(ids(TransactionFilter::new().apply(&txns)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_end_day_is_inclusive() {
        let txns = sample();
        let f = TransactionFilter::new().start(day(2, 1)).end(day(2, 14));
        assert_eq!(ids(f.apply(&txns)), vec![2, 3]);
    }

    #[test]
    fn test_end_day_keeps_fractional_last_second() {
        let ts = day(2, 14).and_hms_milli_opt(23, 59, 59, 500).unwrap();
        let txns = vec![Transaction::new(9, "late", 1.0, "Dining", ts)];
        let f = TransactionFilter::new().start(day(2, 14)).end(day(2, 14));
        assert_eq!(ids(f.apply(&txns)), vec![9]);
    }

    #[test]
    fn test_category_exact_and_all() {
        let txns = sample();
        assert_eq!(ids(TransactionFilter::new().category("Dining").apply(&txns)), vec![1, 3]);
        assert!(TransactionFilter::new().category("dining").apply(&txns).is_empty());
        assert_eq!(TransactionFilter::new().category("All").apply(&txns).len(), 4);
    }

    #[test]
    fn test_min_amount() {
        let txns = sample();
        let f = TransactionFilter::new().min_amount(20.0);
        assert_eq!(ids(f.apply(&txns)), vec![1, 3, 4]);
    }
}

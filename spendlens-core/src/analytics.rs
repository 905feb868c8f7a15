//! Period-over-period comparison and monthly budget status.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::range::TransactionFilter;
use crate::summary::total_spent;
use crate::transaction::Transaction;

/// Share of a budget above which a category is flagged, in percent
pub const WARNING_PERCENT: f64 = 80.0;

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Inclusive day range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodTotal {
    #[serde(flatten)]
    pub period: Period,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Higher,
    Lower,
    Same,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingComparison {
    pub current: PeriodTotal,
    pub previous: PeriodTotal,
    pub difference: f64,
    /// Relative to the previous total, one decimal; 0 when that total is 0
    pub percent_change: f64,
    pub verdict: Verdict,
}

fn period_total(txns: &[Transaction], period: Period, category: Option<&str>) -> PeriodTotal {
    let mut filter = TransactionFilter::new().start(period.start).end(period.end);
    if let Some(category) = category {
        filter = filter.category(category);
    }
    PeriodTotal {
        period,
        total: total_spent(filter.apply(txns)),
    }
}

/// Total spending of `current` against `previous`, optionally for one category.
pub fn compare_spending(
    txns: &[Transaction],
    current: Period,
    previous: Period,
    category: Option<&str>,
) -> SpendingComparison {
    let current = period_total(txns, current, category);
    let previous = period_total(txns, previous, category);

    let difference = current.total - previous.total;
    let percent_change = if previous.total > 0.0 {
        round1(difference / previous.total * 100.0)
    } else {
        0.0
    };
    let verdict = if difference > 0.0 {
        Verdict::Higher
    } else if difference < 0.0 {
        Verdict::Lower
    } else {
        Verdict::Same
    };

    SpendingComparison {
        current,
        previous,
        difference,
        percent_change,
        verdict,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetState {
    #[serde(rename = "On Track")]
    OnTrack,
    Warning,
    #[serde(rename = "Over Budget")]
    OverBudget,
}

impl BudgetState {
    pub fn label(&self) -> &'static str {
        match self {
            BudgetState::OnTrack => "On Track",
            BudgetState::Warning => "Warning",
            BudgetState::OverBudget => "Over Budget",
        }
    }

    fn classify(spent: f64, budget: f64, percent_used: f64) -> Self {
        if spent > budget {
            BudgetState::OverBudget
        } else if percent_used > WARNING_PERCENT {
            BudgetState::Warning
        } else {
            BudgetState::OnTrack
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub category: String,
    pub budget: f64,
    pub spent: f64,
    pub remaining: f64,
    /// One decimal; 0 for a zero budget
    pub percent_used: f64,
    pub status: BudgetState,
}

/// Spending per budgeted category in the month containing `month`.
///
/// One line per entry of `budgets`, in key order; categories without a
/// budget are not reported.
pub fn budget_status(
    txns: &[Transaction],
    month: NaiveDate,
    budgets: &BTreeMap<String, f64>,
) -> Vec<BudgetLine> {
    let mut spent_by_category: BTreeMap<&str, f64> = BTreeMap::new();
    for t in txns {
        let day = t.day();
        if day.year() == month.year() && day.month() == month.month() {
            *spent_by_category.entry(t.category.as_str()).or_insert(0.0) += t.amount;
        }
    }

    budgets
        .iter()
        .map(|(category, &budget)| {
            let spent = spent_by_category.get(category.as_str()).copied().unwrap_or(0.0);
            let percent_used = if budget > 0.0 {
                spent / budget * 100.0
            } else {
                0.0
            };
            BudgetLine {
                category: category.clone(),
                budget,
                spent,
                remaining: budget - spent,
                percent_used: round1(percent_used),
                status: BudgetState::classify(spent, budget, percent_used),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    fn txn(id: i64, m: u32, d: u32, category: &str, amount: f64) -> Transaction {
        let ts = day(m, d).and_hms_opt(12, 0, 0).unwrap();
        Transaction::new(id, format!("txn {id}"), amount, category, ts)
    }

    fn january() -> Period {
        Period::new(day(1, 1), day(1, 31))
    }

    fn february() -> Period {
        Period::new(day(2, 1), day(2, 28))
    }

    #[test]
    fn test_compare_higher_with_percent() {
        let txns = vec![
            txn(1, 1, 5, "Dining", 30.0),
            txn(2, 1, 20, "Transport", 10.0),
            txn(3, 2, 3, "Dining", 45.0),
            txn(4, 2, 28, "Dining", 5.0),
        ];
        let cmp = compare_spending(&txns, february(), january(), None);
        assert_eq!(cmp.current.total, 50.0);
        assert_eq!(cmp.previous.total, 40.0);
        assert_eq!(cmp.difference, 10.0);
        assert_eq!(cmp.percent_change, 25.0);
        assert_eq!(cmp.verdict, Verdict::Higher);
    }

    #[test]
    fn test_compare_category_and_rounding() {
        let txns = vec![
            txn(1, 1, 5, "Dining", 30.0),
            txn(2, 1, 20, "Transport", 10.0),
            txn(3, 2, 3, "Dining", 20.0),
        ];
        let cmp = compare_spending(&txns, february(), january(), Some("Dining"));
        assert_eq!(cmp.previous.total, 30.0);
        assert_eq!(cmp.percent_change, -33.3);
        assert_eq!(cmp.verdict, Verdict::Lower);
    }

    #[test]
    fn test_compare_zero_previous_total() {
        let txns = vec![txn(1, 2, 3, "Dining", 20.0)];
        let cmp = compare_spending(&txns, february(), january(), None);
        assert_eq!(cmp.previous.total, 0.0);
        assert_eq!(cmp.percent_change, 0.0);
        assert_eq!(cmp.verdict, Verdict::Higher);

        let empty = compare_spending(&[], february(), january(), None);
        assert_eq!(empty.verdict, Verdict::Same);
        assert_eq!(empty.percent_change, 0.0);
    }

    fn budgets(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_budget_thresholds() {
        let txns = vec![
            txn(1, 2, 1, "Dining", 80.0),
            txn(2, 2, 2, "Transport", 81.0),
            txn(3, 2, 3, "Housing", 100.5),
            txn(4, 2, 4, "Fun", 100.0),
            // Other month, ignored
            txn(5, 1, 31, "Dining", 500.0),
        ];
        let b = budgets(&[
            ("Dining", 100.0),
            ("Fun", 100.0),
            ("Housing", 100.0),
            ("Transport", 100.0),
        ]);
        let lines = budget_status(&txns, day(2, 15), &b);
        let status: Vec<(&str, BudgetState)> =
            lines.iter().map(|l| (l.category.as_str(), l.status)).collect();
        assert_eq!(
            status,
            vec![
                // exactly 80% is not above the threshold
                ("Dining", BudgetState::OnTrack),
                // spent == budget is a warning, not over
                ("Fun", BudgetState::Warning),
                ("Housing", BudgetState::OverBudget),
                ("Transport", BudgetState::Warning),
            ]
        );
        assert_eq!(lines[0].remaining, 20.0);
        assert_eq!(lines[2].percent_used, 100.5);
    }

    #[test]
    fn test_budget_without_spending_or_with_zero_budget() {
        let txns = vec![txn(1, 2, 1, "Gifts", 10.0)];
        let b = budgets(&[("Gifts", 0.0), ("Health", 50.0)]);
        let lines = budget_status(&txns, day(2, 1), &b);
        assert_eq!(lines[0].percent_used, 0.0);
        assert_eq!(lines[0].status, BudgetState::OverBudget);
        assert_eq!(lines[1].spent, 0.0);
        assert_eq!(lines[1].remaining, 50.0);
        assert_eq!(lines[1].status, BudgetState::OnTrack);
    }

    #[test]
    fn test_state_labels_serialize() {
        assert_eq!(
            serde_json::to_value(BudgetState::OverBudget).unwrap(),
            "Over Budget"
        );
        assert_eq!(BudgetState::OnTrack.label(), "On Track");
        assert_eq!(serde_json::to_value(Verdict::Same).unwrap(), "Same");
    }
}

use chrono::NaiveDate;
use spendlens_core::{Transaction, filter_transactions};

fn txn(id: i64, description: &str, category: &str, amount: f64) -> Transaction {
    let ts = NaiveDate::from_ymd_opt(2026, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + chrono::Duration::hours(id);
    Transaction::new(id, description, amount, category, ts)
}

fn ledger() -> Vec<Transaction> {
    vec![
        txn(1, "Coffee", "Dining", 5.50),
        txn(2, "Taxi", "Transport", 12.00),
        txn(3, "Coffee shop", "Dining", 10.0),
        txn(4, "Monthly rent", "Housing", 100.0),
        txn(5, "Dinner with team", "Dining", 50.0),
        txn(6, "Bus pass", "Transport", 50.0),
        txn(7, "Coffee beans", "Groceries", 18.25),
    ]
}

const QUERIES: &[&str] = &[
    "",
    "coffee",
    "cat=dining",
    "amount>=50",
    "amt<12",
    "desc!=taxi",
    "description=\"coffee shop\"",
    "bogusfield=xyz",
    "amount>notanumber",
    "dining amount>5",
    "\"coffee\" cat=groceries",
    "amount>",
    "transport",
];

fn ids(txns: &[Transaction]) -> Vec<i64> {
    txns.iter().map(|t| t.id).collect()
}

fn is_ordered_subsequence(sub: &[Transaction], of: &[Transaction]) -> bool {
    let mut it = of.iter();
    sub.iter().all(|s| it.any(|o| o == s))
}

#[test]
fn test_empty_queries_are_identity() {
    let t = ledger();
    for q in ["", " ", "\t\n", "     "] {
        assert_eq!(filter_transactions(&t, q), t, "query {q:?}");
    }
}

#[test]
fn test_result_is_ordered_subsequence() {
    let t = ledger();
    for q in QUERIES {
        let out = filter_transactions(&t, q);
        assert!(is_ordered_subsequence(&out, &t), "query {q:?}");
    }
}

#[test]
fn test_filtering_is_idempotent() {
    let t = ledger();
    for q in QUERIES {
        let once = filter_transactions(&t, q);
        let twice = filter_transactions(&once, q);
        assert_eq!(once, twice, "query {q:?}");
    }
}

#[test]
fn test_space_join_is_intersection() {
    let t = ledger();
    let singles = ["coffee", "cat=dining", "amount>=10", "desc!=taxi", "transport"];
    for a in singles {
        for b in singles {
            let joined = filter_transactions(&t, &format!("{a} {b}"));
            let by_a = filter_transactions(&t, a);
            let by_b = filter_transactions(&t, b);
            let intersection: Vec<Transaction> =
                by_a.into_iter().filter(|x| by_b.contains(x)).collect();
            assert_eq!(joined, intersection, "{a} + {b}");
        }
    }
}

#[test]
fn test_case_insensitive_filters() {
    let t = ledger();
    assert_eq!(
        filter_transactions(&t, "CATEGORY=Dining"),
        filter_transactions(&t, "category=dining")
    );
    assert_eq!(filter_transactions(&t, "COFFEE"), filter_transactions(&t, "coffee"));
}

#[test]
fn test_permissive_filters_keep_everything() {
    let t = ledger();
    assert_eq!(filter_transactions(&t, "bogusfield=xyz"), t);
    assert_eq!(filter_transactions(&t, "amount>notanumber"), t);
}

#[test]
fn test_quoted_value_embedded_space() {
    let t = ledger();
    assert_eq!(ids(&filter_transactions(&t, "description=\"coffee shop\"")), vec![3]);
}

#[test]
fn test_numeric_ge() {
    let t = vec![
        txn(1, "a", "x", 10.0),
        txn(2, "b", "x", 50.0),
        txn(3, "c", "x", 100.0),
    ];
    assert_eq!(ids(&filter_transactions(&t, "amount>=50")), vec![2, 3]);
}

#[test]
fn test_two_record_scenario() {
    let t = vec![
        txn(1, "Coffee", "Dining", 5.50),
        txn(2, "Taxi", "Transport", 12.00),
    ];
    assert_eq!(ids(&filter_transactions(&t, "category=Dining")), vec![1]);
    assert_eq!(ids(&filter_transactions(&t, "amount>10")), vec![2]);
    assert_eq!(ids(&filter_transactions(&t, "coffee")), vec![1]);
    assert_eq!(filter_transactions(&t, ""), t);
}

#[test]
fn test_inputs_untouched() {
    let t = ledger();
    let before = t.clone();
    let _ = filter_transactions(&t, "coffee amount>1");
    assert_eq!(t, before);
}

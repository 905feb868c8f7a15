//! Search-bar filtering of transactions.
//!
//! A query is a whitespace-separated list of tokens (see [`crate::lexer`]);
//! a record is kept when it satisfies every token. Nothing here fails:
//! unresolvable tokens simply match everything, so a half-typed query never
//! empties the list by accident.

use crate::lexer::parse_query;
use crate::matcher::Predicate;
use crate::token::SearchToken;
use crate::transaction::Searchable;

/// A parsed search string, reusable across many records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    tokens: Vec<SearchToken>,
    predicates: Vec<Predicate>,
}

impl Query {
    pub fn parse(query: &str) -> Self {
        if query.trim().is_empty() {
            return Self::default();
        }
        Self::from_tokens(parse_query(query))
    }

    /// Build a query from tokens assembled by hand, e.g. ones using the
    /// reserved `contains` operator.
    pub fn from_tokens(tokens: Vec<SearchToken>) -> Self {
        let predicates = tokens.iter().map(Predicate::compile).collect();
        Self { tokens, predicates }
    }

    pub fn tokens(&self) -> &[SearchToken] {
        &self.tokens
    }

    /// True when the query has no tokens and keeps every record
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Does `record` satisfy every token?
    pub fn matches<S: Searchable + ?Sized>(&self, record: &S) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }

    /// Matching records, in their original order.
    pub fn filter<'a, T: Searchable>(&self, records: &'a [T]) -> Vec<&'a T> {
        records.iter().filter(|r| self.matches(*r)).collect()
    }
}

/// Return the transactions matching `query`, keeping their relative order.
///
/// An empty or all-whitespace query returns the input as is.
pub fn filter_transactions<T: Searchable + Clone>(transactions: &[T], query: &str) -> Vec<T> {
    if query.trim().is_empty() {
        return transactions.to_vec();
    }

    let parsed = Query::parse(query);
    let matched: Vec<T> = parsed.filter(transactions).into_iter().cloned().collect();

    tracing::debug!(
        query,
        tokens = parsed.tokens().len(),
        total = transactions.len(),
        matched = matched.len(),
        "filtered transactions"
    );

    matched
}

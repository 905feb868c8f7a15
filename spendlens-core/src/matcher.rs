//! Evaluation of search tokens against a record.
//!
//! Matching is best-effort: a token that cannot be resolved (unknown field,
//! value that is not a number, operator without meaning for the field) matches
//! every record instead of raising an error.

use crate::token::{Operator, SearchToken};
use crate::transaction::Searchable;

/// Record attribute a filter token refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Category,
    Description,
    Amount,
}

impl Field {
    /// Resolve a (lowercased) field name or alias.
    pub fn resolve(name: &str) -> Option<Field> {
        match name {
            "category" | "cat" => Some(Field::Category),
            "description" | "desc" => Some(Field::Description),
            "amount" | "amt" => Some(Field::Amount),
            _ => None,
        }
    }
}

/// String attributes a filter can compare against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrField {
    Category,
    Description,
}

/// A token with its field resolved, its value lowercased or parsed, ready to
/// run against many records.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Vacuously satisfied
    Always,
    /// Lowercased needle searched in description and category
    Text(String),
    /// Case-insensitive comparison on a string attribute
    Str {
        field: StrField,
        operator: Operator,
        expected: String,
    },
    /// Numeric comparison on the amount
    Amount { operator: Operator, value: f64 },
}

impl Predicate {
    pub fn compile(token: &SearchToken) -> Predicate {
        match token {
            SearchToken::Text { value } => Predicate::Text(value.to_lowercase()),
            SearchToken::Filter {
                field,
                operator,
                value,
            } => match Field::resolve(field) {
                None => Predicate::Always,
                Some(Field::Amount) => match parse_number(value) {
                    Some(value) if *operator != Operator::Contains => {
                        Predicate::Amount {
                            operator: *operator,
                            value,
                        }
                    }
                    _ => Predicate::Always,
                },
                Some(Field::Category) => Predicate::string(StrField::Category, *operator, value),
                Some(Field::Description) => {
                    Predicate::string(StrField::Description, *operator, value)
                }
            },
        }
    }

    fn string(field: StrField, operator: Operator, value: &str) -> Predicate {
        Predicate::Str {
            field,
            operator,
            expected: value.to_lowercase(),
        }
    }

    pub fn matches<S: Searchable + ?Sized>(&self, record: &S) -> bool {
        match self {
            Predicate::Always => true,
            Predicate::Text(needle) => {
                contains_lowercase(record.description(), needle)
                    || contains_lowercase(record.category(), needle)
            }
            Predicate::Str {
                field,
                operator,
                expected,
            } => {
                let actual = match field {
                    StrField::Category => record.category(),
                    StrField::Description => record.description(),
                };
                compare_strings(&actual.to_lowercase(), *operator, expected)
            }
            Predicate::Amount { operator, value } => operator
                .compare_numbers(record.amount(), *value)
                .unwrap_or(true),
        }
    }
}

/// Evaluate a single token against a record.
pub fn token_matches<S: Searchable + ?Sized>(token: &SearchToken, record: &S) -> bool {
    Predicate::compile(token).matches(record)
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

fn contains_lowercase(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

// Strings have no ordering here: `>`, `>=`, `<`, `<=` compare for equality.
fn compare_strings(actual: &str, operator: Operator, expected: &str) -> bool {
    match operator {
        Operator::NotEq => actual != expected,
        Operator::Contains => actual.contains(expected),
        Operator::Eq | Operator::Gt | Operator::Ge | Operator::Lt | Operator::Le => {
            actual == expected
        }
    }
}

//! Search tokens produced by the query scanner

use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operator of a field filter
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Operator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    /// Substring test on string fields. Reserved: the scanner has no symbol
    /// for it, so it is only reachable through [`SearchToken::filter`].
    #[serde(rename = "contains")]
    Contains,
}

impl Operator {
    /// Operators the scanner recognizes, two-character symbols first.
    pub const SCANNED: [Operator; 6] = [
        Operator::Ge,
        Operator::Le,
        Operator::NotEq,
        Operator::Eq,
        Operator::Gt,
        Operator::Lt,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::NotEq => "!=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Contains => "contains",
        }
    }

    /// Apply the operator to two numbers.
    ///
    /// Returns `None` for operators without numeric meaning.
    pub fn compare_numbers(&self, lhs: f64, rhs: f64) -> Option<bool> {
        match self {
            Operator::Eq => Some(lhs == rhs),
            Operator::NotEq => Some(lhs != rhs),
            Operator::Gt => Some(lhs > rhs),
            Operator::Ge => Some(lhs >= rhs),
            Operator::Lt => Some(lhs < rhs),
            Operator::Le => Some(lhs <= rhs),
            Operator::Contains => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One unit of a parsed search string
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SearchToken {
    /// `field<op>value`, constraining one attribute
    Filter {
        field: String,
        operator: Operator,
        value: String,
    },
    /// Bare keyword matched against description and category
    Text { value: String },
}

impl SearchToken {
    /// Build a filter token. The field name is lowercased the same way the
    /// scanner does it.
    pub fn filter(field: impl AsRef<str>, operator: Operator, value: impl Into<String>) -> Self {
        SearchToken::Filter {
            field: field.as_ref().to_lowercase(),
            operator,
            value: value.into(),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        SearchToken::Text {
            value: value.into(),
        }
    }

    /// Raw value as typed, without surrounding quotes
    pub fn value(&self) -> &str {
        match self {
            SearchToken::Filter { value, .. } | SearchToken::Text { value } => value,
        }
    }
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty() || value.chars().any(char::is_whitespace)
}

impl fmt::Display for SearchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchToken::Filter {
                field,
                operator: Operator::Contains,
                value,
            } => write!(f, "{field} contains \"{value}\""),
            SearchToken::Filter {
                field,
                operator,
                value,
            } => {
                if needs_quotes(value) {
                    write!(f, "{field}{operator}\"{value}\"")
                } else {
                    write!(f, "{field}{operator}{value}")
                }
            }
            SearchToken::Text { value } => {
                if needs_quotes(value) {
                    write!(f, "\"{value}\"")
                } else {
                    f.write_str(value)
                }
            }
        }
    }
}

//! Hand-rolled scanner turning a search-bar string into [`SearchToken`]s.
//!
//! At each position the scanner tries, in order:
//! 1) a field filter: `name<op>value`, where `name` is a run of letters or
//!    underscores, `<op>` is matched longest symbol first and `value` is a
//!    closed double-quoted string or a run of non-whitespace
//! 2) a bare text term: a closed double-quoted string or a run of
//!    non-whitespace
//!
//! Whitespace only separates tokens. Every other character ends up in exactly
//! one token, so the scan always terminates and never fails.

use crate::token::{Operator, SearchToken};

/// Split `query` into search tokens, left to right.
pub fn parse_query(query: &str) -> Vec<SearchToken> {
    Scanner::new(query).collect()
}

/// Cursor over the query text. Positions are byte offsets on char boundaries.
struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }
}

impl Iterator for Scanner<'_> {
    type Item = SearchToken;

    fn next(&mut self) -> Option<SearchToken> {
        self.skip_whitespace();
        let rest = self.rest();
        if rest.is_empty() {
            return None;
        }

        if let Some((token, len)) = field_filter(rest) {
            self.pos += len;
            return Some(token);
        }

        let (value, len) = bare_term(rest);
        self.pos += len;
        Some(SearchToken::text(value))
    }
}

/// Try `name<op>value` at the start of `input`.
fn field_filter(input: &str) -> Option<(SearchToken, usize)> {
    let name_len = input
        .find(|c: char| !(c.is_alphabetic() || c == '_'))
        .unwrap_or(input.len());
    if name_len == 0 {
        return None;
    }

    // Commit to the first (longest) symbol that matches: `>=` followed by
    // nothing is not retried as `>` with the value `=`.
    let after_name = &input[name_len..];
    let operator = Operator::SCANNED
        .into_iter()
        .find(|op| after_name.starts_with(op.symbol()))?;

    let value_start = name_len + operator.symbol().len();
    let (value, value_len) = filter_value(&input[value_start..])?;

    Some((
        SearchToken::filter(&input[..name_len], operator, value),
        value_start + value_len,
    ))
}

fn filter_value(input: &str) -> Option<(&str, usize)> {
    if let Some(quoted) = quoted(input) {
        return Some(quoted);
    }
    let (value, len) = unquoted_run(input);
    (len > 0).then_some((value, len))
}

/// Fallback capture. `input` starts with a non-whitespace char, so this
/// always consumes at least one char.
fn bare_term(input: &str) -> (&str, usize) {
    quoted(input).unwrap_or_else(|| unquoted_run(input))
}

/// `"..."` closed by the next quote. Returns the contents and the length
/// consumed including both quotes.
fn quoted(input: &str) -> Option<(&str, usize)> {
    let body = input.strip_prefix('"')?;
    let close = body.find('"')?;
    Some((&body[..close], close + 2))
}

fn unquoted_run(input: &str) -> (&str, usize) {
    let len = input.find(char::is_whitespace).unwrap_or(input.len());
    (&input[..len], len)
}

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {column} value '{value}': {reason}")]
pub struct ParseError {
    pub column: String,
    pub value: String,
    pub reason: String,
}

impl ParseError {
    fn new(column: &str, value: &str, reason: impl ToString) -> Self {
        ParseError {
            column: column.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Parses a numeric export field such as `$1,234.56`.
///
/// Only the first `$` and the first `,` are removed; a blank field is zero.
pub fn parse_decimal(column: &str, raw: &str) -> Result<Decimal, ParseError> {
    let cleaned = raw.trim().replacen('$', "", 1).replacen(',', "", 1);
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(&cleaned).map_err(|e| ParseError::new(column, raw, e))
}

/// A date pattern resolved once from the configuration file.
///
/// Patterns containing `%` are chrono format strings. Anything else is read as a
/// reference-date layout (`2006-01-02`, `01/02/2006`, `Jan 2, 2006`) and translated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
}

impl DateFormat {
    pub fn new(layout: &str) -> Self {
        let pattern = if layout.contains('%') {
            layout.to_string()
        } else {
            translate_layout(layout)
        };
        DateFormat { pattern }
    }

    /// The chrono pattern used for parsing.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn parse(&self, column: &str, raw: &str) -> Result<NaiveDate, ParseError> {
        NaiveDate::parse_from_str(raw.trim(), &self.pattern)
            .map_err(|e| ParseError::new(column, raw, e))
    }
}

// Longest tokens first so that `January` wins over `Jan` and `2006` over `2`.
const LAYOUT_TOKENS: &[(&str, &str)] = &[
    ("January", "%B"),
    ("Monday", "%A"),
    ("2006", "%Y"),
    ("Jan", "%b"),
    ("Mon", "%a"),
    ("_2", "%e"),
    ("01", "%m"),
    ("02", "%d"),
    ("06", "%y"),
    ("15", "%H"),
    ("03", "%I"),
    ("04", "%M"),
    ("05", "%S"),
    ("PM", "%p"),
    ("1", "%m"),
    ("2", "%d"),
    ("3", "%I"),
];

fn translate_layout(layout: &str) -> String {
    let mut pattern = String::with_capacity(layout.len() * 2);
    let mut rest = layout;
    'outer: while let Some(ch) = rest.chars().next() {
        for (token, spec) in LAYOUT_TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                pattern.push_str(spec);
                rest = tail;
                continue 'outer;
            }
        }
        pattern.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    pattern
}

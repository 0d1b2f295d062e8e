//! Domain models for the case ledger.

mod case;
mod filter;
mod late_case;

pub use case::*;
pub use filter::*;
pub use late_case::*;

use thiserror::Error;

/// Errors raised while parsing values supplied at the boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unknown {kind}: {value:?}")]
    UnknownLabel { kind: &'static str, value: String },

    #[error("Invalid date {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(s: &str) -> Result<chrono::NaiveDate, ParseError> {
    chrono::NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ParseError::InvalidDate(s.to_string()))
}

/// Upper-case a last name.
pub fn normalize_last_name(s: &str) -> String {
    s.trim().to_uppercase()
}

/// Capitalise a first name: first character upper-cased, the rest lower-cased.
pub fn normalize_first_name(s: &str) -> String {
    let mut chars = s.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

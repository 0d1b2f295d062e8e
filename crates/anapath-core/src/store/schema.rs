//! Table schemas and the row codec shared by both ledgers.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};

use super::{StoreError, StoreResult};

/// Column layout of the case ledger.
pub const CASE_COLUMNS: &[&str] = &[
    "id",
    "dossier_number",
    "last_name",
    "first_name",
    "phone",
    "collection_date",
    "reception_date",
    "diagnostic",
    "status",
    "picked_up",
    "comment",
    "created_at",
    "updated_at",
];

/// Column layout of the late-case ledger.
pub const LATE_CASE_COLUMNS: &[&str] = &[
    "case_id",
    "dossier_number",
    "last_name",
    "first_name",
    "phone",
    "diagnostic",
    "delay_reason",
    "actions_taken",
    "comment",
    "declared_at",
    "updated_at",
];

/// Timestamps are written with microsecond precision in local time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

const TIMESTAMP_INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The two durable tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Cases,
    LateCases,
}

impl TableKind {
    pub fn name(&self) -> &'static str {
        match self {
            TableKind::Cases => "cases",
            TableKind::LateCases => "late_cases",
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            TableKind::Cases => CASE_COLUMNS,
            TableKind::LateCases => LATE_CASE_COLUMNS,
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A record type persisted as one row of a table.
///
/// `from_row` is only called with rows holding exactly
/// `KIND.columns().len()` fields.
pub trait Table: Sized {
    const KIND: TableKind;

    fn to_row(&self) -> Vec<String>;

    fn from_row(row: &[String]) -> StoreResult<Self>;
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn parse_timestamp(column: &'static str, value: &str) -> StoreResult<NaiveDateTime> {
    TIMESTAMP_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| invalid(column, value))
}

pub(crate) fn parse_date(column: &'static str, value: &str) -> StoreResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid(column, value))
}

/// Parse any `FromStr` value, reporting the offending column on failure.
pub(crate) fn parse_field<T: FromStr>(column: &'static str, value: &str) -> StoreResult<T> {
    value.parse().map_err(|_| invalid(column, value))
}

fn invalid(column: &'static str, value: &str) -> StoreError {
    StoreError::InvalidValue {
        column,
        value: value.to_string(),
    }
}

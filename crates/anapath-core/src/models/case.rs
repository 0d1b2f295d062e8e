//! Case record models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::ParseError;

/// Processing status of a case.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CaseStatus {
    /// Analysis in progress
    Pending,
    /// Result available
    Done,
    /// Declared late
    Late,
}

impl CaseStatus {
    pub const ALL: [CaseStatus; 3] = [CaseStatus::Pending, CaseStatus::Done, CaseStatus::Late];

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Pending => "Pending",
            CaseStatus::Done => "Done",
            CaseStatus::Late => "Late",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = ParseError;

    /// Accepts the English names (any case) and the French labels of the
    /// laboratory's paper forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let status = match s {
            "En cours" => CaseStatus::Pending,
            "Terminé" => CaseStatus::Done,
            "En retard" => CaseStatus::Late,
            _ => CaseStatus::ALL
                .into_iter()
                .find(|status| status.as_str().eq_ignore_ascii_case(s))
                .ok_or_else(|| ParseError::UnknownLabel {
                    kind: "case status",
                    value: s.to_string(),
                })?,
        };
        Ok(status)
    }
}

/// Parse a pickup flag (`Yes`/`No`, `Oui`/`Non`, `true`/`false`).
pub fn parse_pickup_flag(s: &str) -> Result<bool, ParseError> {
    match s.trim().to_lowercase().as_str() {
        "yes" | "oui" | "true" => Ok(true),
        "no" | "non" | "false" => Ok(false),
        other => Err(ParseError::UnknownLabel {
            kind: "pickup flag",
            value: other.to_string(),
        }),
    }
}

/// Storage label of a pickup flag.
pub fn pickup_flag_label(picked_up: bool) -> &'static str {
    if picked_up {
        "Yes"
    } else {
        "No"
    }
}

/// A pathology case in the main ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseRecord {
    /// Sequential identifier (record count + 1 at intake)
    pub id: u32,
    /// `ANA-YYYYMMDD-NNN`, unique and immutable
    pub dossier_number: String,
    /// Patient last name (upper-cased)
    pub last_name: String,
    /// Patient first name (capitalised)
    pub first_name: String,
    /// Contact phone
    pub phone: String,
    /// Date the sample was collected
    pub collection_date: NaiveDate,
    /// Date the sample reached the lab
    pub reception_date: NaiveDate,
    /// Free-text diagnostic
    pub diagnostic: String,
    pub status: CaseStatus,
    /// Whether the patient has collected the result
    pub picked_up: bool,
    pub comment: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl CaseRecord {
    /// Check whether the free-text search term matches this case.
    ///
    /// Case-insensitive substring match against the dossier number, last
    /// name or first name. `needle` must already be lower-cased.
    pub fn matches_text(&self, needle: &str) -> bool {
        [&self.dossier_number, &self.last_name, &self.first_name]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }

    /// Set the updated_at timestamp.
    pub fn touch(&mut self, now: NaiveDateTime) {
        self.updated_at = now;
    }
}

/// Intake form for a new case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCase {
    pub last_name: String,
    pub first_name: String,
    pub phone: String,
    pub collection_date: NaiveDate,
    pub reception_date: NaiveDate,
    pub diagnostic: String,
    pub comment: String,
}

impl NewCase {
    /// Create an intake form with both dates set to `today` and no comment.
    pub fn new(
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        phone: impl Into<String>,
        diagnostic: impl Into<String>,
        today: NaiveDate,
    ) -> Self {
        Self {
            last_name: last_name.into(),
            first_name: first_name.into(),
            phone: phone.into(),
            collection_date: today,
            reception_date: today,
            diagnostic: diagnostic.into(),
            comment: String::new(),
        }
    }
}

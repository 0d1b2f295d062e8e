//! Search filter for the case ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CaseRecord, CaseStatus};

/// Filter applied by [`crate::ledger::CaseLedger::query_cases`].
///
/// Every field left at `None` passes all records through; supplied fields
/// combine with logical AND.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CaseFilter {
    /// Substring searched in dossier number, last name and first name
    pub text: Option<String>,
    pub status: Option<CaseStatus>,
    pub picked_up: Option<bool>,
    pub reception_date: Option<NaiveDate>,
}

impl CaseFilter {
    /// Filter that matches everything.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_status(mut self, status: CaseStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_picked_up(mut self, picked_up: bool) -> Self {
        self.picked_up = Some(picked_up);
        self
    }

    pub fn with_reception_date(mut self, date: NaiveDate) -> Self {
        self.reception_date = Some(date);
        self
    }

    /// Lower-cased search term, `None` when absent or blank.
    fn needle(&self) -> Option<String> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }

    /// Check a single record against every supplied criterion.
    pub fn matches(&self, case: &CaseRecord) -> bool {
        if let Some(needle) = self.needle() {
            if !case.matches_text(&needle) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if case.status != status {
                return false;
            }
        }
        if let Some(picked_up) = self.picked_up {
            if case.picked_up != picked_up {
                return false;
            }
        }
        if let Some(date) = self.reception_date {
            if case.reception_date != date {
                return false;
            }
        }
        true
    }

    /// Apply the filter, preserving input order.
    pub fn apply(&self, cases: Vec<CaseRecord>) -> Vec<CaseRecord> {
        cases.into_iter().filter(|case| self.matches(case)).collect()
    }
}

//! Late-case declaration models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::ParseError;

/// Why a case is running late.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DelayReason {
    TechnicalIssue,
    SampleDelay,
    ComplexAnalysis,
    Other,
}

impl DelayReason {
    pub const ALL: [DelayReason; 4] = [
        DelayReason::TechnicalIssue,
        DelayReason::SampleDelay,
        DelayReason::ComplexAnalysis,
        DelayReason::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DelayReason::TechnicalIssue => "TechnicalIssue",
            DelayReason::SampleDelay => "SampleDelay",
            DelayReason::ComplexAnalysis => "ComplexAnalysis",
            DelayReason::Other => "Other",
        }
    }
}

impl fmt::Display for DelayReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for DelayReason {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let reason = match s {
            "Problème technique" => DelayReason::TechnicalIssue,
            "Retard prélèvement" => DelayReason::SampleDelay,
            "Analyse complexe" => DelayReason::ComplexAnalysis,
            "Autre" => DelayReason::Other,
            _ => DelayReason::ALL
                .into_iter()
                .find(|reason| reason.as_str().eq_ignore_ascii_case(s))
                .ok_or_else(|| ParseError::UnknownLabel {
                    kind: "delay reason",
                    value: s.to_string(),
                })?,
        };
        Ok(reason)
    }
}

/// An entry in the late-case ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LateCaseRecord {
    /// Id of the matching case record, resolved by dossier number when the
    /// declaration was made. `None` for orphan declarations.
    pub case_id: Option<u32>,
    pub dossier_number: String,
    pub last_name: String,
    pub first_name: String,
    pub phone: String,
    pub diagnostic: String,
    pub delay_reason: DelayReason,
    pub actions_taken: String,
    pub comment: String,
    pub declared_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl LateCaseRecord {
    /// Whether the declaration was linked to a case at declaration time.
    pub fn is_linked(&self) -> bool {
        self.case_id.is_some()
    }
}

/// Declaration form for a late case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewLateCase {
    pub dossier_number: String,
    pub last_name: String,
    pub first_name: String,
    pub phone: String,
    pub diagnostic: String,
    pub delay_reason: DelayReason,
    pub actions_taken: String,
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_reason_parse() {
        assert_eq!(
            "TechnicalIssue".parse::<DelayReason>().unwrap(),
            DelayReason::TechnicalIssue
        );
        assert_eq!(
            "sampledelay".parse::<DelayReason>().unwrap(),
            DelayReason::SampleDelay
        );
        assert_eq!(
            "Analyse complexe".parse::<DelayReason>().unwrap(),
            DelayReason::ComplexAnalysis
        );
        assert_eq!("Autre".parse::<DelayReason>().unwrap(), DelayReason::Other);
        assert!("Weather".parse::<DelayReason>().is_err());
    }

    #[test]
    fn test_delay_reason_display_roundtrip() {
        for reason in DelayReason::ALL {
            assert_eq!(reason.to_string().parse::<DelayReason>().unwrap(), reason);
        }
    }
}

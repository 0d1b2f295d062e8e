//! Anapath Core Library
//!
//! Intake, search and status tracking for pathology laboratory cases, with a
//! secondary ledger of late-case declarations.
//!
//! # Architecture
//!
//! ```text
//!   UI / CLI ──► AnapathCore (single lock)
//!                     │
//!          ┌──────────┴───────────┐
//!          ▼                      ▼
//!     CaseLedger  ◄──────  LateCaseLedger
//!          │   dossier number      │
//!          │   lookup + Late flag  │
//!          ▼                      ▼
//!   anapath_db.csv         late_cases.csv
//! ```
//!
//! # Core Principle
//!
//! **Every mutation rewrites the whole table.** There is no incremental
//! append and no cross-process locking; one operator at a time.
//!
//! # Modules
//!
//! - [`store`]: CSV-backed tables with lenient reads and atomic writes
//! - [`models`]: Domain types (CaseRecord, LateCaseRecord, CaseFilter, etc.)
//! - [`ledger`]: Case ledger and late-case services, dossier numbering

pub mod ledger;
pub mod models;
pub mod store;

// Re-export commonly used types
pub use ledger::{CaseLedger, LateCaseLedger, LedgerError, LedgerResult};
pub use models::{
    CaseFilter, CaseRecord, CaseStatus, DelayReason, LateCaseRecord, NewCase, NewLateCase,
};
pub use store::{Store, StoreError, StoreResult};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum AnapathError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<LedgerError> for AnapathError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::Validation(_) => AnapathError::Validation(e.to_string()),
            LedgerError::NotFound(dossier) => AnapathError::NotFound(dossier),
            LedgerError::Storage(inner) => AnapathError::Storage(inner.to_string()),
        }
    }
}

impl From<StoreError> for AnapathError {
    fn from(e: StoreError) -> Self {
        AnapathError::Storage(e.to_string())
    }
}

impl From<models::ParseError> for AnapathError {
    fn from(e: models::ParseError) -> Self {
        AnapathError::InvalidInput(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for AnapathError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        AnapathError::Storage(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create the ledgers in a data directory.
#[uniffi::export]
pub fn open_store(data_dir: String) -> Result<Arc<AnapathCore>, AnapathError> {
    let store = Store::open(&data_dir)?;
    Ok(Arc::new(AnapathCore::new(store)))
}

/// Open or create the ledgers at explicit file paths.
#[uniffi::export]
pub fn open_store_with_paths(
    cases_path: String,
    late_cases_path: String,
) -> Result<Arc<AnapathCore>, AnapathError> {
    let store = Store::with_paths(cases_path, late_cases_path)?;
    Ok(Arc::new(AnapathCore::new(store)))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe ledger handle for UI front ends.
///
/// All operations run under one lock, so a multi-threaded caller in a single
/// process cannot interleave two read-modify-write cycles.
#[derive(uniffi::Object)]
pub struct AnapathCore {
    store: Arc<Mutex<Store>>,
}

impl AnapathCore {
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}

#[uniffi::export]
impl AnapathCore {
    // =========================================================================
    // Case Operations
    // =========================================================================

    /// Register a new case.
    pub fn create_case(&self, new: FfiNewCase) -> Result<FfiCase, AnapathError> {
        let store = self.store.lock()?;
        let new = new.into_new_case(ledger::local_now().date())?;
        let case = CaseLedger::new(&store).create_case(new)?;
        Ok(case.into())
    }

    /// Search cases. Empty or absent filter fields match everything.
    pub fn query_cases(&self, filter: FfiCaseFilter) -> Result<Vec<FfiCase>, AnapathError> {
        let store = self.store.lock()?;
        let filter = CaseFilter::try_from(filter)?;
        let cases = CaseLedger::new(&store).query_cases(&filter);
        Ok(cases.into_iter().map(|c| c.into()).collect())
    }

    /// Get a case by dossier number.
    pub fn get_case(&self, dossier_number: String) -> Result<Option<FfiCase>, AnapathError> {
        let store = self.store.lock()?;
        let case = CaseLedger::new(&store).get_case(&dossier_number);
        Ok(case.map(|c| c.into()))
    }

    /// Set the status and pickup flag of a case.
    pub fn update_status(
        &self,
        dossier_number: String,
        status: String,
        picked_up: bool,
    ) -> Result<FfiCase, AnapathError> {
        let store = self.store.lock()?;
        let status: CaseStatus = status.parse()?;
        let case = CaseLedger::new(&store).update_status(&dossier_number, status, picked_up)?;
        Ok(case.into())
    }

    /// Dossier number the next case registered today would receive.
    pub fn next_dossier_number(&self) -> Result<String, AnapathError> {
        let store = self.store.lock()?;
        Ok(CaseLedger::new(&store).next_dossier_number(ledger::local_now().date()))
    }

    // =========================================================================
    // Late-Case Operations
    // =========================================================================

    /// Declare a case late.
    pub fn declare_late(&self, new: FfiNewLateCase) -> Result<FfiLateCase, AnapathError> {
        let store = self.store.lock()?;
        let new = NewLateCase::try_from(new)?;
        let record = LateCaseLedger::new(&store).declare_late(new)?;
        Ok(record.into())
    }

    /// All late-case declarations, in insertion order.
    pub fn list_late_cases(&self) -> Result<Vec<FfiLateCase>, AnapathError> {
        let store = self.store.lock()?;
        let records = LateCaseLedger::new(&store).list_late_cases();
        Ok(records.into_iter().map(|r| r.into()).collect())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe case record. Dates are `YYYY-MM-DD`, timestamps as stored.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCase {
    pub id: u32,
    pub dossier_number: String,
    pub last_name: String,
    pub first_name: String,
    pub phone: String,
    pub collection_date: String,
    pub reception_date: String,
    pub diagnostic: String,
    pub status: String,
    pub picked_up: bool,
    pub comment: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CaseRecord> for FfiCase {
    fn from(case: CaseRecord) -> Self {
        Self {
            id: case.id,
            collection_date: store::format_date(&case.collection_date),
            reception_date: store::format_date(&case.reception_date),
            status: case.status.to_string(),
            created_at: store::format_timestamp(&case.created_at),
            updated_at: store::format_timestamp(&case.updated_at),
            dossier_number: case.dossier_number,
            last_name: case.last_name,
            first_name: case.first_name,
            phone: case.phone,
            diagnostic: case.diagnostic,
            picked_up: case.picked_up,
            comment: case.comment,
        }
    }
}

/// FFI-safe intake form. Missing dates default to today.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewCase {
    pub last_name: String,
    pub first_name: String,
    pub phone: String,
    pub collection_date: Option<String>,
    pub reception_date: Option<String>,
    pub diagnostic: String,
    pub comment: String,
}

impl FfiNewCase {
    fn into_new_case(self, today: NaiveDate) -> Result<NewCase, models::ParseError> {
        let date_or_today = |value: Option<String>| match value.as_deref().map(str::trim) {
            None | Some("") => Ok(today),
            Some(s) => models::parse_date(s),
        };
        Ok(NewCase {
            collection_date: date_or_today(self.collection_date)?,
            reception_date: date_or_today(self.reception_date)?,
            last_name: self.last_name,
            first_name: self.first_name,
            phone: self.phone,
            diagnostic: self.diagnostic,
            comment: self.comment,
        })
    }
}

/// FFI-safe search filter. `None` (or a blank string) means "any".
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiCaseFilter {
    pub text: Option<String>,
    pub status: Option<String>,
    pub picked_up: Option<bool>,
    pub reception_date: Option<String>,
}

impl TryFrom<FfiCaseFilter> for CaseFilter {
    type Error = models::ParseError;

    fn try_from(filter: FfiCaseFilter) -> Result<Self, Self::Error> {
        let non_blank = |value: Option<String>| value.filter(|s| !s.trim().is_empty());
        Ok(CaseFilter {
            text: non_blank(filter.text),
            status: non_blank(filter.status).map(|s| s.parse()).transpose()?,
            picked_up: filter.picked_up,
            reception_date: non_blank(filter.reception_date)
                .map(|s| models::parse_date(&s))
                .transpose()?,
        })
    }
}

/// FFI-safe late-case record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiLateCase {
    pub case_id: Option<u32>,
    pub dossier_number: String,
    pub last_name: String,
    pub first_name: String,
    pub phone: String,
    pub diagnostic: String,
    pub delay_reason: String,
    pub actions_taken: String,
    pub comment: String,
    pub declared_at: String,
    pub updated_at: String,
}

impl From<LateCaseRecord> for FfiLateCase {
    fn from(record: LateCaseRecord) -> Self {
        Self {
            case_id: record.case_id,
            delay_reason: record.delay_reason.to_string(),
            declared_at: store::format_timestamp(&record.declared_at),
            updated_at: store::format_timestamp(&record.updated_at),
            dossier_number: record.dossier_number,
            last_name: record.last_name,
            first_name: record.first_name,
            phone: record.phone,
            diagnostic: record.diagnostic,
            actions_taken: record.actions_taken,
            comment: record.comment,
        }
    }
}

/// FFI-safe late-case declaration form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewLateCase {
    pub dossier_number: String,
    pub last_name: String,
    pub first_name: String,
    pub phone: String,
    pub diagnostic: String,
    pub delay_reason: String,
    pub actions_taken: String,
    pub comment: String,
}

impl TryFrom<FfiNewLateCase> for NewLateCase {
    type Error = models::ParseError;

    fn try_from(new: FfiNewLateCase) -> Result<Self, Self::Error> {
        Ok(NewLateCase {
            delay_reason: new.delay_reason.parse()?,
            dossier_number: new.dossier_number,
            last_name: new.last_name,
            first_name: new.first_name,
            phone: new.phone,
            diagnostic: new.diagnostic,
            actions_taken: new.actions_taken,
            comment: new.comment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open(dir: &TempDir) -> Arc<AnapathCore> {
        open_store(dir.path().to_string_lossy().into_owned()).unwrap()
    }

    fn intake(last: &str) -> FfiNewCase {
        FfiNewCase {
            last_name: last.into(),
            first_name: "awa".into(),
            phone: "+225 07 00 00 00".into(),
            collection_date: Some("2024-01-01".into()),
            reception_date: None,
            diagnostic: "benign".into(),
            comment: String::new(),
        }
    }

    #[test]
    fn test_create_and_query() {
        let dir = TempDir::new().unwrap();
        let core = open(&dir);

        let case = core.create_case(intake("kouassi")).unwrap();
        assert_eq!(case.id, 1);
        assert_eq!(case.last_name, "KOUASSI");
        assert_eq!(case.first_name, "Awa");
        assert_eq!(case.status, "Pending");
        assert_eq!(case.collection_date, "2024-01-01");
        assert!(case.dossier_number.starts_with("ANA-"));

        let all = core.query_cases(FfiCaseFilter::default()).unwrap();
        assert_eq!(all.len(), 1);

        let none = core
            .query_cases(FfiCaseFilter {
                status: Some("Done".into()),
                ..Default::default()
            })
            .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_invalid_date_rejected() {
        let dir = TempDir::new().unwrap();
        let core = open(&dir);

        let mut new = intake("kouassi");
        new.reception_date = Some("01/02/2024".into());
        let err = core.create_case(new).unwrap_err();
        assert!(matches!(err, AnapathError::InvalidInput(_)));

        let err = core
            .query_cases(FfiCaseFilter {
                reception_date: Some("tomorrow".into()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, AnapathError::InvalidInput(_)));
    }

    #[test]
    fn test_validation_error_surfaces() {
        let dir = TempDir::new().unwrap();
        let core = open(&dir);

        let mut new = intake("kouassi");
        new.phone = String::new();
        let err = core.create_case(new).unwrap_err();
        match err {
            AnapathError::Validation(msg) => assert!(msg.contains("phone")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_update_status_via_facade() {
        let dir = TempDir::new().unwrap();
        let core = open(&dir);
        let case = core.create_case(intake("kouassi")).unwrap();

        let updated = core
            .update_status(case.dossier_number.clone(), "Terminé".into(), true)
            .unwrap();
        assert_eq!(updated.status, "Done");
        assert!(updated.picked_up);

        let err = core
            .update_status(case.dossier_number.clone(), "Lost".into(), true)
            .unwrap_err();
        assert!(matches!(err, AnapathError::InvalidInput(_)));

        let err = core
            .update_status("ANA-00000000-000".into(), "Done".into(), false)
            .unwrap_err();
        assert!(matches!(err, AnapathError::NotFound(_)));
    }

    #[test]
    fn test_declare_late_via_facade() {
        let dir = TempDir::new().unwrap();
        let core = open(&dir);
        let case = core.create_case(intake("kouassi")).unwrap();

        let record = core
            .declare_late(FfiNewLateCase {
                dossier_number: case.dossier_number.clone(),
                last_name: "kouassi".into(),
                first_name: "awa".into(),
                phone: case.phone.clone(),
                diagnostic: "benign".into(),
                delay_reason: "SampleDelay".into(),
                actions_taken: String::new(),
                comment: String::new(),
            })
            .unwrap();

        assert_eq!(record.case_id, Some(case.id));
        assert_eq!(record.delay_reason, "SampleDelay");

        let refreshed = core.get_case(case.dossier_number).unwrap().unwrap();
        assert_eq!(refreshed.status, "Late");
        assert_eq!(core.list_late_cases().unwrap().len(), 1);
    }

    #[test]
    fn test_next_dossier_number_advances() {
        let dir = TempDir::new().unwrap();
        let core = open(&dir);

        let preview = core.next_dossier_number().unwrap();
        let case = core.create_case(intake("kouassi")).unwrap();
        assert_eq!(case.dossier_number, preview);
        assert_ne!(core.next_dossier_number().unwrap(), preview);
    }
}

//! Case intake, search and status updates.

use chrono::{NaiveDate, NaiveDateTime};

use super::{local_now, next_dossier_number, require, LedgerError, LedgerResult};
use crate::models::{
    normalize_first_name, normalize_last_name, CaseFilter, CaseRecord, CaseStatus, NewCase,
};
use crate::store::Store;

/// Service over the main case ledger.
pub struct CaseLedger<'a> {
    store: &'a Store,
}

impl<'a> CaseLedger<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Register a new case, stamped with the current local time.
    pub fn create_case(&self, new: NewCase) -> LedgerResult<CaseRecord> {
        self.create_case_at(new, local_now())
    }

    /// Register a new case as of `now`.
    ///
    /// The case gets `id = record count + 1`, a fresh dossier number for
    /// `now`'s date, status `Pending` and pickup flag cleared.
    pub fn create_case_at(&self, new: NewCase, now: NaiveDateTime) -> LedgerResult<CaseRecord> {
        require(&[
            ("last_name", &new.last_name),
            ("first_name", &new.first_name),
            ("phone", &new.phone),
            ("diagnostic", &new.diagnostic),
        ])?;

        let mut cases = self.store.load_cases();
        let case = CaseRecord {
            id: cases.len() as u32 + 1,
            dossier_number: next_dossier_number(&cases, now.date()),
            last_name: normalize_last_name(&new.last_name),
            first_name: normalize_first_name(&new.first_name),
            phone: new.phone.trim().to_string(),
            collection_date: new.collection_date,
            reception_date: new.reception_date,
            diagnostic: new.diagnostic.trim().to_string(),
            status: CaseStatus::Pending,
            picked_up: false,
            comment: new.comment.trim().to_string(),
            created_at: now,
            updated_at: now,
        };

        cases.push(case.clone());
        self.store.save_cases(&cases)?;

        tracing::info!(
            id = case.id,
            dossier_number = %case.dossier_number,
            "Case registered"
        );
        Ok(case)
    }

    /// Cases matching `filter`, in stored order.
    pub fn query_cases(&self, filter: &CaseFilter) -> Vec<CaseRecord> {
        filter.apply(self.store.load_cases())
    }

    /// Look up a case by dossier number.
    pub fn get_case(&self, dossier_number: &str) -> Option<CaseRecord> {
        let dossier_number = dossier_number.trim();
        self.store
            .load_cases()
            .into_iter()
            .find(|case| case.dossier_number == dossier_number)
    }

    /// Set status and pickup flag of a case.
    pub fn update_status(
        &self,
        dossier_number: &str,
        status: CaseStatus,
        picked_up: bool,
    ) -> LedgerResult<CaseRecord> {
        self.update_status_at(dossier_number, status, picked_up, local_now())
    }

    /// Set status and pickup flag of a case as of `now`.
    ///
    /// Fails with [`LedgerError::NotFound`] without touching the table when
    /// no case carries `dossier_number`.
    pub fn update_status_at(
        &self,
        dossier_number: &str,
        status: CaseStatus,
        picked_up: bool,
        now: NaiveDateTime,
    ) -> LedgerResult<CaseRecord> {
        let dossier_number = dossier_number.trim();
        let mut cases = self.store.load_cases();

        let case = cases
            .iter_mut()
            .find(|case| case.dossier_number == dossier_number)
            .ok_or_else(|| LedgerError::NotFound(dossier_number.to_string()))?;

        case.status = status;
        case.picked_up = picked_up;
        case.touch(now);
        let updated = case.clone();

        self.store.save_cases(&cases)?;

        tracing::info!(
            dossier_number = %updated.dossier_number,
            status = %updated.status,
            picked_up = updated.picked_up,
            "Case status updated"
        );
        Ok(updated)
    }

    /// The dossier number the next case created on `today` would receive.
    pub fn next_dossier_number(&self, today: NaiveDate) -> String {
        next_dossier_number(&self.store.load_cases(), today)
    }
}

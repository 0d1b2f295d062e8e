//! Late-case declarations.

use chrono::NaiveDateTime;

use super::{local_now, require, LedgerResult};
use crate::models::{
    normalize_first_name, normalize_last_name, CaseStatus, LateCaseRecord, NewLateCase,
};
use crate::store::Store;

/// Service over the late-case ledger.
///
/// Declaring a late case also flags the matching case (same dossier number)
/// as `Late` in the main ledger. Declarations for unknown dossier numbers are
/// kept as orphans with no back-reference.
pub struct LateCaseLedger<'a> {
    store: &'a Store,
}

impl<'a> LateCaseLedger<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn declare_late(&self, new: NewLateCase) -> LedgerResult<LateCaseRecord> {
        self.declare_late_at(new, local_now())
    }

    pub fn declare_late_at(
        &self,
        new: NewLateCase,
        now: NaiveDateTime,
    ) -> LedgerResult<LateCaseRecord> {
        require(&[
            ("dossier_number", &new.dossier_number),
            ("last_name", &new.last_name),
            ("first_name", &new.first_name),
            ("phone", &new.phone),
            ("diagnostic", &new.diagnostic),
        ])?;

        let dossier_number = new.dossier_number.trim().to_string();

        let mut cases = self.store.load_cases();
        let position = cases
            .iter()
            .position(|case| case.dossier_number == dossier_number);
        let case_id = match position {
            Some(index) => {
                let case = &mut cases[index];
                case.status = CaseStatus::Late;
                case.touch(now);
                let id = case.id;
                self.store.save_cases(&cases)?;
                Some(id)
            }
            None => {
                tracing::warn!(
                    dossier_number = %dossier_number,
                    "Late case declared for unknown dossier number"
                );
                None
            }
        };

        let record = LateCaseRecord {
            case_id,
            dossier_number,
            last_name: normalize_last_name(&new.last_name),
            first_name: normalize_first_name(&new.first_name),
            phone: new.phone.trim().to_string(),
            diagnostic: new.diagnostic.trim().to_string(),
            delay_reason: new.delay_reason,
            actions_taken: new.actions_taken.trim().to_string(),
            comment: new.comment.trim().to_string(),
            declared_at: now,
            updated_at: now,
        };

        let mut late_cases = self.store.load_late_cases();
        late_cases.push(record.clone());
        self.store.save_late_cases(&late_cases)?;

        tracing::info!(
            dossier_number = %record.dossier_number,
            case_id = ?record.case_id,
            reason = %record.delay_reason,
            "Late case declared"
        );
        Ok(record)
    }

    /// Every declaration, in insertion order.
    pub fn list_late_cases(&self) -> Vec<LateCaseRecord> {
        self.store.load_late_cases()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{CaseLedger, LedgerError};
    use crate::models::{DelayReason, NewCase};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn declaration(dossier: &str) -> NewLateCase {
        NewLateCase {
            dossier_number: dossier.into(),
            last_name: "smith".into(),
            first_name: "john".into(),
            phone: "+225 01 02 03 04".into(),
            diagnostic: "benign".into(),
            delay_reason: DelayReason::TechnicalIssue,
            actions_taken: "microtome repaired".into(),
            comment: String::new(),
        }
    }

    #[test]
    fn test_declare_late_links_existing_case() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path()).unwrap();
        let created = at(1, 9);
        let case = CaseLedger::new(&store)
            .create_case_at(
                NewCase::new("SMITH", "John", "0102", "benign", created.date()),
                created,
            )
            .unwrap();

        let ledger = LateCaseLedger::new(&store);
        let declared = at(5, 11);
        let record = ledger
            .declare_late_at(declaration(&case.dossier_number), declared)
            .unwrap();

        assert_eq!(record.case_id, Some(case.id));
        assert_eq!(record.last_name, "SMITH");
        assert_eq!(record.first_name, "John");
        assert_eq!(record.declared_at, declared);

        let cases = store.load_cases();
        assert_eq!(cases[0].status, CaseStatus::Late);
        assert_eq!(cases[0].updated_at, declared);
        assert_eq!(ledger.list_late_cases(), vec![record]);
    }

    #[test]
    fn test_declare_late_orphan_leaves_cases_untouched() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path()).unwrap();
        let created = at(1, 9);
        CaseLedger::new(&store)
            .create_case_at(
                NewCase::new("SMITH", "John", "0102", "benign", created.date()),
                created,
            )
            .unwrap();
        let before = store.load_cases();

        let record = LateCaseLedger::new(&store)
            .declare_late_at(declaration("ANA-20231212-042"), at(2, 8))
            .unwrap();

        assert_eq!(record.case_id, None);
        assert_eq!(store.load_cases(), before);
        assert_eq!(store.load_late_cases().len(), 1);
    }

    #[test]
    fn test_declare_late_requires_dossier_number() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path()).unwrap();

        let err = LateCaseLedger::new(&store)
            .declare_late_at(declaration(""), at(2, 8))
            .unwrap_err();

        assert!(matches!(err, LedgerError::Validation(ref m) if m == &vec!["dossier_number"]));
        assert!(store.load_late_cases().is_empty());
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path()).unwrap();
        let ledger = LateCaseLedger::new(&store);

        ledger.declare_late_at(declaration("ANA-1"), at(3, 8)).unwrap();
        ledger.declare_late_at(declaration("ANA-2"), at(2, 8)).unwrap();
        ledger.declare_late_at(declaration("ANA-3"), at(4, 8)).unwrap();

        let dossiers: Vec<_> = ledger
            .list_late_cases()
            .into_iter()
            .map(|r| r.dossier_number)
            .collect();
        assert_eq!(dossiers, vec!["ANA-1", "ANA-2", "ANA-3"]);
    }
}

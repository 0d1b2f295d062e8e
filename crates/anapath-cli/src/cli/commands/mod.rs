//! Command implementations
//!
//! Each command returns a process exit code: 0 on success, 1 when the
//! operator input was rejected (missing fields, unknown dossier number).

pub mod cases;
pub mod init;
pub mod late;

use anapath_core::{LedgerError, Store};
use anyhow::Context;

use crate::config::AnapathConfig;

/// Exit code for rejected operator input.
pub const EXIT_REJECTED: i32 = 1;

/// Open the ledgers described by the configuration.
pub fn open_store(config: &AnapathConfig) -> anyhow::Result<Store> {
    let cases_path = config.storage.cases_path();
    let late_cases_path = config.storage.late_cases_path();
    Store::with_paths(&cases_path, &late_cases_path).with_context(|| {
        format!(
            "Failed to open ledgers {} and {}",
            cases_path.display(),
            late_cases_path.display()
        )
    })
}

/// Turn operator-facing ledger errors into an exit code; storage failures
/// stay errors.
fn rejected(err: LedgerError) -> anyhow::Result<i32> {
    match err {
        LedgerError::Validation(_) | LedgerError::NotFound(_) => {
            eprintln!("❌ {err}");
            Ok(EXIT_REJECTED)
        }
        LedgerError::Storage(_) => Err(err.into()),
    }
}

/// Render `Yes`/`No` for the pickup flag.
fn yes_no(value: bool) -> &'static str {
    anapath_core::models::pickup_flag_label(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anapath_core::StoreError;

    #[test]
    fn test_rejected_maps_operator_errors_to_exit_code() {
        let code = rejected(LedgerError::Validation(vec!["phone"])).unwrap();
        assert_eq!(code, EXIT_REJECTED);

        let code = rejected(LedgerError::NotFound("ANA-20240101-001".into())).unwrap();
        assert_eq!(code, EXIT_REJECTED);
    }

    #[test]
    fn test_rejected_keeps_storage_errors_fatal() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = LedgerError::Storage(StoreError::Io(io));
        assert!(rejected(err).is_err());
    }
}

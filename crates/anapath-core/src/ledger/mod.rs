//! Case ledger services.
//!
//! Every operation is a synchronous read-modify-write against the flat-file
//! tables: load the full table, mutate in memory, rewrite the full table.

mod cases;
pub mod dossier;
mod late;

pub use cases::*;
pub use dossier::next_dossier_number;
pub use late::*;

use chrono::{NaiveDateTime, SubsecRound};
use thiserror::Error;

use crate::store::StoreError;

/// Ledger errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Missing required fields: {}", .0.join(", "))]
    Validation(Vec<&'static str>),

    #[error("No case with dossier number {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Current local wall-clock time, as stored in the tables.
pub fn local_now() -> NaiveDateTime {
    // Tables store microseconds.
    chrono::Local::now().naive_local().trunc_subsecs(6)
}

/// Fail with the names of every field whose value is blank.
fn require(fields: &[(&'static str, &str)]) -> LedgerResult<()> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(LedgerError::Validation(missing))
    }
}

//! Flat-file storage for the case and late-case ledgers.
//!
//! Each table is a CSV file with a fixed header. Every save rewrites the
//! whole file; reads that fail for any reason degrade to an empty table.

mod cases;
pub mod csv;
mod late_cases;
mod schema;

pub use schema::*;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// File name of the case ledger inside the data directory.
pub const DEFAULT_CASES_FILE: &str = "anapath_db.csv";
/// File name of the late-case ledger inside the data directory.
pub const DEFAULT_LATE_CASES_FILE: &str = "late_cases.csv";

/// Storage errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt {table} table at line {line}: {reason}")]
    Corrupt {
        table: TableKind,
        line: usize,
        reason: String,
    },

    #[error("Invalid value for column {column}: {value:?}")]
    InvalidValue { column: &'static str, value: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Handle on the two ledger files.
#[derive(Debug, Clone)]
pub struct Store {
    cases_path: PathBuf,
    late_cases_path: PathBuf,
}

impl Store {
    /// Open the ledgers in `data_dir` using the default file names, creating
    /// them if needed.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> StoreResult<Self> {
        let dir = data_dir.as_ref();
        Self::with_paths(dir.join(DEFAULT_CASES_FILE), dir.join(DEFAULT_LATE_CASES_FILE))
    }

    /// Open the ledgers at explicit paths, creating them if needed.
    pub fn with_paths<P: Into<PathBuf>, Q: Into<PathBuf>>(
        cases_path: P,
        late_cases_path: Q,
    ) -> StoreResult<Self> {
        let store = Self {
            cases_path: cases_path.into(),
            late_cases_path: late_cases_path.into(),
        };
        store.ensure_initialized()?;
        Ok(store)
    }

    /// Write a header-only file for every table whose file is absent.
    pub fn ensure_initialized(&self) -> StoreResult<()> {
        for kind in [TableKind::Cases, TableKind::LateCases] {
            let path = self.path(kind);
            if path.exists() {
                continue;
            }
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let mut contents = String::new();
            csv::write_row(&mut contents, kind.columns());
            write_atomic(path, &contents)?;
            tracing::info!(table = %kind, path = %path.display(), "Created table");
        }
        Ok(())
    }

    /// Path of the file backing `kind`.
    pub fn path(&self, kind: TableKind) -> &Path {
        match kind {
            TableKind::Cases => &self.cases_path,
            TableKind::LateCases => &self.late_cases_path,
        }
    }

    /// Read a full table, failing on any I/O or format problem.
    pub fn try_load<T: Table>(&self) -> StoreResult<Vec<T>> {
        let kind = T::KIND;
        let contents = fs::read_to_string(self.path(kind))?;
        let mut rows = csv::parse(&contents)
            .map_err(|e| StoreError::Corrupt {
                table: kind,
                line: e.line,
                reason: e.reason.to_string(),
            })?
            .into_iter();

        let header = rows.next().ok_or_else(|| StoreError::Corrupt {
            table: kind,
            line: 1,
            reason: "missing header".into(),
        })?;
        if header.fields != kind.columns() {
            return Err(StoreError::Corrupt {
                table: kind,
                line: header.line,
                reason: format!("unexpected header {:?}", header.fields),
            });
        }

        let width = kind.columns().len();
        let mut records = Vec::new();
        for row in rows {
            if row.fields.len() != width {
                return Err(StoreError::Corrupt {
                    table: kind,
                    line: row.line,
                    reason: format!("expected {} fields, found {}", width, row.fields.len()),
                });
            }
            let record = T::from_row(&row.fields).map_err(|e| StoreError::Corrupt {
                table: kind,
                line: row.line,
                reason: e.to_string(),
            })?;
            records.push(record);
        }

        tracing::debug!(table = %kind, rows = records.len(), "Loaded table");
        Ok(records)
    }

    /// Read a full table. Unreadable or corrupt tables load as empty.
    pub fn load<T: Table>(&self) -> Vec<T> {
        self.try_load().unwrap_or_else(|e| {
            tracing::warn!(table = %T::KIND, error = %e, "Table unreadable, treating as empty");
            Vec::new()
        })
    }

    /// Rewrite a full table from `records`.
    pub fn save<T: Table>(&self, records: &[T]) -> StoreResult<()> {
        let kind = T::KIND;
        let mut contents = String::new();
        csv::write_row(&mut contents, kind.columns());
        for record in records {
            csv::write_row(&mut contents, &record.to_row());
        }
        write_atomic(self.path(kind), &contents)?;
        tracing::debug!(table = %kind, rows = records.len(), "Saved table");
        Ok(())
    }
}

/// Write to a sibling temp file, then rename over the target.
fn write_atomic(path: &Path, contents: &str) -> StoreResult<()> {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    drop(file);

    fs::rename(&tmp_path, path)?;
    Ok(())
}

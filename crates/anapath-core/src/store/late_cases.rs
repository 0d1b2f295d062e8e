//! Late-case ledger table.

use super::schema::{format_timestamp, parse_field, parse_timestamp, Table, TableKind};
use super::{Store, StoreResult};
use crate::models::LateCaseRecord;

impl Table for LateCaseRecord {
    const KIND: TableKind = TableKind::LateCases;

    fn to_row(&self) -> Vec<String> {
        vec![
            self.case_id.map(|id| id.to_string()).unwrap_or_default(),
            self.dossier_number.clone(),
            self.last_name.clone(),
            self.first_name.clone(),
            self.phone.clone(),
            self.diagnostic.clone(),
            self.delay_reason.to_string(),
            self.actions_taken.clone(),
            self.comment.clone(),
            format_timestamp(&self.declared_at),
            format_timestamp(&self.updated_at),
        ]
    }

    fn from_row(row: &[String]) -> StoreResult<Self> {
        let case_id = match row[0].trim() {
            "" => None,
            id => Some(parse_field("case_id", id)?),
        };
        Ok(LateCaseRecord {
            case_id,
            dossier_number: row[1].clone(),
            last_name: row[2].clone(),
            first_name: row[3].clone(),
            phone: row[4].clone(),
            diagnostic: row[5].clone(),
            delay_reason: parse_field("delay_reason", &row[6])?,
            actions_taken: row[7].clone(),
            comment: row[8].clone(),
            declared_at: parse_timestamp("declared_at", &row[9])?,
            updated_at: parse_timestamp("updated_at", &row[10])?,
        })
    }
}

impl Store {
    /// Load the late-case ledger (empty if unreadable).
    pub fn load_late_cases(&self) -> Vec<LateCaseRecord> {
        self.load()
    }

    /// Rewrite the late-case ledger.
    pub fn save_late_cases(&self, late_cases: &[LateCaseRecord]) -> StoreResult<()> {
        self.save(late_cases)
    }
}

//! Case ledger table.

use super::schema::{
    format_date, format_timestamp, parse_date, parse_field, parse_timestamp, Table, TableKind,
};
use super::{Store, StoreError, StoreResult};
use crate::models::{parse_pickup_flag, pickup_flag_label, CaseRecord};

impl Table for CaseRecord {
    const KIND: TableKind = TableKind::Cases;

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.dossier_number.clone(),
            self.last_name.clone(),
            self.first_name.clone(),
            self.phone.clone(),
            format_date(&self.collection_date),
            format_date(&self.reception_date),
            self.diagnostic.clone(),
            self.status.to_string(),
            pickup_flag_label(self.picked_up).to_string(),
            self.comment.clone(),
            format_timestamp(&self.created_at),
            format_timestamp(&self.updated_at),
        ]
    }

    fn from_row(row: &[String]) -> StoreResult<Self> {
        Ok(CaseRecord {
            id: parse_field("id", &row[0])?,
            dossier_number: row[1].clone(),
            last_name: row[2].clone(),
            first_name: row[3].clone(),
            phone: row[4].clone(),
            collection_date: parse_date("collection_date", &row[5])?,
            reception_date: parse_date("reception_date", &row[6])?,
            diagnostic: row[7].clone(),
            status: parse_field("status", &row[8])?,
            picked_up: parse_pickup_flag(&row[9]).map_err(|_| StoreError::InvalidValue {
                column: "picked_up",
                value: row[9].clone(),
            })?,
            comment: row[10].clone(),
            created_at: parse_timestamp("created_at", &row[11])?,
            updated_at: parse_timestamp("updated_at", &row[12])?,
        })
    }
}

impl Store {
    /// Load the case ledger (empty if unreadable).
    pub fn load_cases(&self) -> Vec<CaseRecord> {
        self.load()
    }

    /// Rewrite the case ledger.
    pub fn save_cases(&self, cases: &[CaseRecord]) -> StoreResult<()> {
        self.save(cases)
    }
}

//! Late-case commands.

use anapath_core::{DelayReason, LateCaseLedger, LateCaseRecord, NewLateCase};
use clap::Args;

use super::{open_store, rejected};
use crate::config::AnapathConfig;

/// Arguments for the declare-late command
#[derive(Args, Debug)]
pub struct DeclareLateArgs {
    /// Dossier number of the late case
    #[arg(long, default_value = "")]
    pub dossier_number: String,

    /// Patient last name
    #[arg(long, default_value = "")]
    pub last_name: String,

    /// Patient first name
    #[arg(long, default_value = "")]
    pub first_name: String,

    /// Contact phone
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Diagnostic text
    #[arg(long, default_value = "")]
    pub diagnostic: String,

    /// Delay reason (TechnicalIssue, SampleDelay, ComplexAnalysis, Other)
    #[arg(long)]
    pub reason: DelayReason,

    /// Actions taken so far
    #[arg(long, default_value = "")]
    pub actions: String,

    /// Additional comments
    #[arg(long, default_value = "")]
    pub comment: String,
}

impl DeclareLateArgs {
    /// Execute the declare-late command
    pub fn execute(&self, config: &AnapathConfig) -> anyhow::Result<i32> {
        let store = open_store(config)?;

        let new = NewLateCase {
            dossier_number: self.dossier_number.clone(),
            last_name: self.last_name.clone(),
            first_name: self.first_name.clone(),
            phone: self.phone.clone(),
            diagnostic: self.diagnostic.clone(),
            delay_reason: self.reason,
            actions_taken: self.actions.clone(),
            comment: self.comment.clone(),
        };

        match LateCaseLedger::new(&store).declare_late(new) {
            Ok(record) => {
                println!("⚠️  Late case declared: {}", record.dossier_number);
                if !record.is_linked() {
                    println!("   No case with this dossier number; the declaration is not linked.");
                }
                Ok(0)
            }
            Err(e) => rejected(e),
        }
    }
}

/// Arguments for the late-list command
#[derive(Args, Debug)]
pub struct LateListArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl LateListArgs {
    /// Execute the late-list command
    pub fn execute(&self, config: &AnapathConfig) -> anyhow::Result<i32> {
        let store = open_store(config)?;
        let records = LateCaseLedger::new(&store).list_late_cases();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&records)?);
        } else if records.is_empty() {
            println!("No late case declared yet");
        } else {
            print_late_table(&records);
        }
        Ok(0)
    }
}

fn print_late_table(records: &[LateCaseRecord]) {
    println!(
        "{:<18} {:<16} {:<14} {:<18} {:<16} {:<16} ACTIONS",
        "DOSSIER", "LAST NAME", "FIRST NAME", "PHONE", "REASON", "DECLARED"
    );
    for record in records {
        println!(
            "{:<18} {:<16} {:<14} {:<18} {:<16} {:<16} {}",
            record.dossier_number,
            record.last_name,
            record.first_name,
            record.phone,
            record.delay_reason.as_str(),
            record.declared_at.format("%Y-%m-%d %H:%M").to_string(),
            record.actions_taken
        );
    }
}

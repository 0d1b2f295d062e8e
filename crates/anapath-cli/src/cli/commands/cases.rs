//! Case ledger commands: intake, search, show and status updates.

use anapath_core::ledger::local_now;
use anapath_core::models::parse_pickup_flag;
use anapath_core::{CaseFilter, CaseLedger, CaseRecord, CaseStatus, NewCase};
use chrono::NaiveDate;
use clap::{ArgAction, Args};

use super::{open_store, rejected, yes_no, EXIT_REJECTED};
use crate::config::AnapathConfig;

/// Arguments for the new command
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Patient last name (stored upper-cased)
    #[arg(long, default_value = "")]
    pub last_name: String,

    /// Patient first name (stored capitalised)
    #[arg(long, default_value = "")]
    pub first_name: String,

    /// Contact phone, e.g. "+225 XX XX XX XX"
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Full diagnostic text
    #[arg(long, default_value = "")]
    pub diagnostic: String,

    /// Sample collection date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub collection_date: Option<NaiveDate>,

    /// Sample reception date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub reception_date: Option<NaiveDate>,

    /// Additional comments
    #[arg(long, default_value = "")]
    pub comment: String,
}

impl NewArgs {
    /// Execute the new command
    pub fn execute(&self, config: &AnapathConfig) -> anyhow::Result<i32> {
        let store = open_store(config)?;
        let now = local_now();
        let today = now.date();

        let new = NewCase {
            last_name: self.last_name.clone(),
            first_name: self.first_name.clone(),
            phone: self.phone.clone(),
            collection_date: self.collection_date.unwrap_or(today),
            reception_date: self.reception_date.unwrap_or(today),
            diagnostic: self.diagnostic.clone(),
            comment: self.comment.clone(),
        };

        match CaseLedger::new(&store).create_case_at(new, now) {
            Ok(case) => {
                println!("✅ Case registered: {}", case.dossier_number);
                Ok(0)
            }
            Err(e) => rejected(e),
        }
    }
}

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Match dossier number, last name or first name (case-insensitive)
    #[arg(short, long)]
    pub text: Option<String>,

    /// Only cases with this status (Pending, Done, Late)
    #[arg(long)]
    pub status: Option<CaseStatus>,

    /// Only cases whose result was (yes) or was not (no) picked up
    #[arg(long, value_parser = parse_pickup_flag, action = ArgAction::Set)]
    pub picked_up: Option<bool>,

    /// Only cases received on this date (YYYY-MM-DD)
    #[arg(long)]
    pub reception_date: Option<NaiveDate>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    fn filter(&self) -> CaseFilter {
        CaseFilter {
            text: self.text.clone(),
            status: self.status,
            picked_up: self.picked_up,
            reception_date: self.reception_date,
        }
    }

    /// Execute the search command
    pub fn execute(&self, config: &AnapathConfig) -> anyhow::Result<i32> {
        let store = open_store(config)?;
        let filter = self.filter();
        tracing::debug!(?filter, "Searching cases");

        let cases = CaseLedger::new(&store).query_cases(&filter);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&cases)?);
        } else if cases.is_empty() {
            println!("No case found");
        } else {
            print_case_table(&cases);
            println!();
            println!("{} case(s) found", cases.len());
        }
        Ok(0)
    }
}

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Dossier number, e.g. ANA-20240101-001
    pub dossier_number: String,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl ShowArgs {
    /// Execute the show command
    pub fn execute(&self, config: &AnapathConfig) -> anyhow::Result<i32> {
        let store = open_store(config)?;
        let Some(case) = CaseLedger::new(&store).get_case(&self.dossier_number) else {
            eprintln!("❌ No case with dossier number {}", self.dossier_number.trim());
            return Ok(EXIT_REJECTED);
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&case)?);
        } else {
            print_case_details(&case);
        }
        Ok(0)
    }
}

/// Arguments for the update-status command
#[derive(Args, Debug)]
pub struct UpdateStatusArgs {
    /// Dossier number of the case to update
    pub dossier_number: String,

    /// New status (Pending, Done, Late); keeps the current one if omitted
    #[arg(long)]
    pub status: Option<CaseStatus>,

    /// New pickup flag (yes/no); keeps the current one if omitted
    #[arg(long, value_parser = parse_pickup_flag, action = ArgAction::Set)]
    pub picked_up: Option<bool>,
}

impl UpdateStatusArgs {
    /// Execute the update-status command
    pub fn execute(&self, config: &AnapathConfig) -> anyhow::Result<i32> {
        let store = open_store(config)?;
        let ledger = CaseLedger::new(&store);

        // Unspecified values default to the current ones, like the
        // pre-filled update form.
        let current = ledger.get_case(&self.dossier_number);
        let status = self
            .status
            .or(current.as_ref().map(|c| c.status))
            .unwrap_or(CaseStatus::Pending);
        let picked_up = self
            .picked_up
            .or(current.as_ref().map(|c| c.picked_up))
            .unwrap_or(false);

        match ledger.update_status(&self.dossier_number, status, picked_up) {
            Ok(case) => {
                println!(
                    "✅ {}: status {}, picked up {}",
                    case.dossier_number,
                    case.status,
                    yes_no(case.picked_up)
                );
                Ok(0)
            }
            Err(e) => rejected(e),
        }
    }
}

/// Print the next dossier number without registering anything.
pub fn next_number(config: &AnapathConfig) -> anyhow::Result<i32> {
    let store = open_store(config)?;
    println!(
        "{}",
        CaseLedger::new(&store).next_dossier_number(local_now().date())
    );
    Ok(0)
}

fn print_case_table(cases: &[CaseRecord]) {
    println!(
        "{:<18} {:<16} {:<14} {:<18} {:<10} {:<8} PICKED UP",
        "DOSSIER", "LAST NAME", "FIRST NAME", "PHONE", "RECEIVED", "STATUS"
    );
    for case in cases {
        println!(
            "{:<18} {:<16} {:<14} {:<18} {:<10} {:<8} {}",
            case.dossier_number,
            case.last_name,
            case.first_name,
            case.phone,
            case.reception_date.to_string(),
            case.status.as_str(),
            yes_no(case.picked_up)
        );
    }
}

fn print_case_details(case: &CaseRecord) {
    println!("Dossier:         {}", case.dossier_number);
    println!("Patient:         {} {}", case.last_name, case.first_name);
    println!("Phone:           {}", case.phone);
    println!("Collected:       {}", case.collection_date);
    println!("Received:        {}", case.reception_date);
    println!("Status:          {}", case.status);
    println!("Picked up:       {}", yes_no(case.picked_up));
    println!("Diagnostic:      {}", case.diagnostic);
    if !case.comment.is_empty() {
        println!("Comment:         {}", case.comment);
    }
    println!("Created:         {}", case.created_at.format("%Y-%m-%d %H:%M"));
    println!("Updated:         {}", case.updated_at.format("%Y-%m-%d %H:%M"));
}

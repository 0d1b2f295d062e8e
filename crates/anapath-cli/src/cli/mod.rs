//! CLI interface and argument parsing

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Anapath - pathology case ledger
#[derive(Parser, Debug)]
#[command(name = "anapath")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "anapath.toml", env = "ANAPATH_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ANAPATH_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Directory holding the ledger files (overrides the configuration)
    #[arg(long, env = "ANAPATH_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the ledger files (and optionally a configuration file)
    Init(commands::init::InitArgs),

    /// Register a new case
    New(commands::cases::NewArgs),

    /// Search cases
    Search(commands::cases::SearchArgs),

    /// Show a single case
    Show(commands::cases::ShowArgs),

    /// Change the status and pickup flag of a case
    UpdateStatus(commands::cases::UpdateStatusArgs),

    /// Print the dossier number the next case would receive
    NextNumber,

    /// Declare a case late
    DeclareLate(commands::late::DeclareLateArgs),

    /// List late-case declarations
    LateList(commands::late::LateListArgs),
}

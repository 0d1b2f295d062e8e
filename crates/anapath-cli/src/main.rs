use std::process;

use anapath_cli::cli::{commands, Cli, Commands};
use anapath_cli::config::{load_config, AnapathConfig};
use anapath_cli::logging::init_logging;
use clap::Parser;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            process::exit(2); // Configuration error exit code
        }
    };
    if let Some(data_dir) = &cli.data_dir {
        config.storage.data_dir = data_dir.clone();
    }

    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    if let Err(e) = init_logging(&log_level, &config.logging) {
        eprintln!("❌ {e}");
        process::exit(2);
    }

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        data_dir = %config.storage.data_dir.display(),
        "Anapath case ledger"
    );

    let exit_code = match execute_command(&cli, &config) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e:#}");
            5 // Fatal error exit code
        }
    };

    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli, config: &AnapathConfig) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Init(args) => args.execute(config, &cli.config),
        Commands::New(args) => args.execute(config),
        Commands::Search(args) => args.execute(config),
        Commands::Show(args) => args.execute(config),
        Commands::UpdateStatus(args) => args.execute(config),
        Commands::NextNumber => commands::cases::next_number(config),
        Commands::DeclareLate(args) => args.execute(config),
        Commands::LateList(args) => args.execute(config),
    }
}

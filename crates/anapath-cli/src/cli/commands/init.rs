//! Init command implementation

use std::fs;
use std::path::Path;

use anapath_core::store::TableKind;
use clap::Args;

use super::open_store;
use crate::config::{sample_config, AnapathConfig};

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Also write a sample configuration file at the --config path
    #[arg(long)]
    pub write_config: bool,

    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self, config: &AnapathConfig, config_path: &str) -> anyhow::Result<i32> {
        if self.write_config {
            if Path::new(config_path).exists() && !self.force {
                println!("❌ Configuration file already exists: {}", config_path);
                println!("   Use --force to overwrite");
                return Ok(2);
            }
            fs::write(config_path, sample_config())?;
            println!("✅ Configuration file created: {}", config_path);
        }

        let store = open_store(config)?;
        tracing::info!(data_dir = %config.storage.data_dir.display(), "Ledgers ready");

        println!("✅ Case ledger:      {}", store.path(TableKind::Cases).display());
        println!("✅ Late-case ledger: {}", store.path(TableKind::LateCases).display());
        Ok(0)
    }
}

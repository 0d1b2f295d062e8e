//! Configuration loading with TOML parsing and environment variable overrides
//!
//! Every section has defaults, so a missing configuration file is not an
//! error. Overrides use the `ANAPATH_<SECTION>_<KEY>` pattern.

use std::fs;
use std::path::{Path, PathBuf};

use anapath_core::store::{DEFAULT_CASES_FILE, DEFAULT_LATE_CASES_FILE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Configuration validation failed: {0}")]
    Invalid(String),
}

/// Root configuration, mapped to the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnapathConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl AnapathConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.storage.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Where the two ledger files live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub cases_file: String,
    pub late_cases_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            cases_file: DEFAULT_CASES_FILE.to_string(),
            late_cases_file: DEFAULT_LATE_CASES_FILE.to_string(),
        }
    }
}

impl StorageConfig {
    pub fn cases_path(&self) -> PathBuf {
        self.data_dir.join(&self.cases_file)
    }

    pub fn late_cases_path(&self) -> PathBuf {
        self.data_dir.join(&self.late_cases_file)
    }

    fn validate(&self) -> Result<(), String> {
        if self.cases_file.trim().is_empty() {
            return Err("storage.cases_file cannot be empty".to_string());
        }
        if self.late_cases_file.trim().is_empty() {
            return Err("storage.late_cases_file cannot be empty".to_string());
        }
        if self.cases_file == self.late_cases_file {
            return Err("storage.cases_file and storage.late_cases_file must differ".to_string());
        }
        Ok(())
    }
}

/// Logging output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        crate::logging::parse_log_level(&self.level)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

/// Load configuration from `path`, falling back to defaults when the file
/// does not exist, then apply environment overrides and validate.
pub fn load_config(path: impl AsRef<Path>) -> Result<AnapathConfig, ConfigError> {
    let path = path.as_ref();

    let mut config = if path.exists() {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents)?
    } else {
        AnapathConfig::default()
    };

    apply_env_overrides(&mut config)?;

    config.validate().map_err(ConfigError::Invalid)?;

    Ok(config)
}

/// Applies `ANAPATH_*` environment variable overrides.
fn apply_env_overrides(config: &mut AnapathConfig) -> Result<(), ConfigError> {
    if let Ok(val) = std::env::var("ANAPATH_STORAGE_DATA_DIR") {
        config.storage.data_dir = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("ANAPATH_STORAGE_CASES_FILE") {
        config.storage.cases_file = val;
    }
    if let Ok(val) = std::env::var("ANAPATH_STORAGE_LATE_CASES_FILE") {
        config.storage.late_cases_file = val;
    }
    if let Ok(val) = std::env::var("ANAPATH_LOGGING_LEVEL") {
        config.logging.level = val;
    }
    if let Ok(val) = std::env::var("ANAPATH_LOGGING_JSON") {
        config.logging.json = val.trim().to_lowercase().parse().map_err(|_| {
            ConfigError::Invalid(format!(
                "ANAPATH_LOGGING_JSON must be true or false, got {val:?}"
            ))
        })?;
    }
    Ok(())
}

/// Sample configuration written by `anapath init --write-config`.
pub fn sample_config() -> String {
    r#"# Anapath configuration
# Every key is optional; the values below are the defaults.

[storage]
# Directory holding both ledger files (created if missing)
data_dir = "data"
cases_file = "anapath_db.csv"
late_cases_file = "late_cases.csv"

[logging]
# trace, debug, info, warn, error (RUST_LOG takes precedence)
level = "info"
json = false
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnapathConfig::default();
        assert_eq!(config.storage.data_dir, PathBuf::from("data"));
        assert_eq!(config.storage.cases_path(), PathBuf::from("data/anapath_db.csv"));
        assert_eq!(
            config.storage.late_cases_path(),
            PathBuf::from("data/late_cases.csv")
        );
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sample_config_parses_to_defaults() {
        let config: AnapathConfig = toml::from_str(&sample_config()).unwrap();
        assert_eq!(config, AnapathConfig::default());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: AnapathConfig = toml::from_str("[logging]\njson = true\n").unwrap();
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = AnapathConfig::default();
        config.logging.level = "verbose".into();
        assert!(config.validate().is_err());

        let mut config = AnapathConfig::default();
        config.storage.late_cases_file = config.storage.cases_file.clone();
        assert!(config.validate().is_err());

        let mut config = AnapathConfig::default();
        config.storage.cases_file = " ".into();
        assert!(config.validate().is_err());
    }
}

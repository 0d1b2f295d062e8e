//! Integration tests for configuration loading
//!
//! Tests that modify environment variables hold ENV_MUTEX.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use anapath_cli::config::{load_config, ConfigError};
use tempfile::NamedTempFile;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    std::env::remove_var("ANAPATH_STORAGE_DATA_DIR");
    std::env::remove_var("ANAPATH_STORAGE_CASES_FILE");
    std::env::remove_var("ANAPATH_STORAGE_LATE_CASES_FILE");
    std::env::remove_var("ANAPATH_LOGGING_LEVEL");
    std::env::remove_var("ANAPATH_LOGGING_JSON");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_missing_file_uses_defaults() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let config = load_config("/nonexistent/anapath.toml").unwrap();
    assert_eq!(config.storage.data_dir, PathBuf::from("data"));
    assert_eq!(config.storage.cases_file, "anapath_db.csv");
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_load_complete_config() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[storage]
data_dir = "/var/lib/anapath"
cases_file = "cases.csv"
late_cases_file = "late.csv"

[logging]
level = "debug"
json = true
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(
        config.storage.cases_path(),
        PathBuf::from("/var/lib/anapath/cases.csv")
    );
    assert_eq!(
        config.storage.late_cases_path(),
        PathBuf::from("/var/lib/anapath/late.csv")
    );
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json);
}

#[test]
fn test_env_overrides() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config("[storage]\ndata_dir = \"from-file\"\n");
    std::env::set_var("ANAPATH_STORAGE_DATA_DIR", "from-env");
    std::env::set_var("ANAPATH_LOGGING_LEVEL", "warn");

    let config = load_config(file.path());
    cleanup_env_vars();

    let config = config.unwrap();
    assert_eq!(config.storage.data_dir, PathBuf::from("from-env"));
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn test_invalid_toml() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config("[storage\ndata_dir = 1\n");
    assert!(matches!(load_config(file.path()), Err(ConfigError::Parse(_))));
}

#[test]
fn test_invalid_log_level() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config("[logging]\nlevel = \"chatty\"\n");
    assert!(matches!(load_config(file.path()), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_logging_json_env_override() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    std::env::set_var("ANAPATH_LOGGING_JSON", "TRUE");
    let enabled = load_config("/nonexistent/anapath.toml");
    std::env::set_var("ANAPATH_LOGGING_JSON", "yes");
    let rejected = load_config("/nonexistent/anapath.toml");
    cleanup_env_vars();

    assert!(enabled.unwrap().logging.json);
    assert!(matches!(rejected, Err(ConfigError::Invalid(_))));
}

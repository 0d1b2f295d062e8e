//! Structured logging setup using tracing
//!
//! Logs go to stderr so command output on stdout stays machine-readable.

use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Initialize the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise the anapath crates log at `level`.
pub fn init_logging(level: &str, config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(level)?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "anapath={level},anapath_cli={level},anapath_core={level}"
        ))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| anyhow!("Failed to initialize logging: {e}"))?;

    tracing::debug!(level = %level, json = config.json, "Logging initialized");
    Ok(())
}

/// Parse log level from string
pub fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(anyhow!(
            "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
            level_str
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
        assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
        assert_eq!(parse_log_level("Warn").unwrap(), Level::WARN);
        assert!(parse_log_level("loud").is_err());
    }
}

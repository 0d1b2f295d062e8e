//! Anapath command-line front end.
//!
//! - [`cli`]: argument parsing and command implementations
//! - [`config`]: TOML configuration with `ANAPATH_*` overrides
//! - [`logging`]: tracing subscriber setup

pub mod cli;
pub mod config;
pub mod logging;

//! CLI module for memrest
//!
//! Provides command-line interface for:
//! - serve: Load configuration and run the HTTP server until Ctrl-C
//! - config: Print the effective configuration

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{effective_config, run, run_command, serve, show_config, Overrides};
pub use errors::{CliError, CliErrorCode, CliResult};

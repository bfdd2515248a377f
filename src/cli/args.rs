//! CLI argument definitions using clap
//!
//! Commands:
//! - memrest serve [--config <path>] [--host <ip>] [--port <n>] [--static-dir <dir>]
//! - memrest config [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// memrest - in-memory task and joke REST service
#[derive(Parser, Debug)]
#[command(name = "memrest")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to a JSON configuration file; defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the bind address
        #[arg(long)]
        host: Option<String>,

        /// Override the port
        #[arg(long)]
        port: Option<u16>,

        /// Override the static asset directory
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Print the effective configuration as JSON and exit
    Config {
        /// Path to a JSON configuration file; defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let args = ["memrest", "serve", "--port", "9000", "--host", "127.0.0.1"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Serve { config, host, port, static_dir } => {
                assert!(config.is_none());
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(9000));
                assert!(static_dir.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_config_command() {
        let cli = Cli::try_parse_from(["memrest", "config", "--config", "memrest.json"]).unwrap();
        assert!(matches!(cli.command, Command::Config { config: Some(_) }));
    }

    #[test]
    fn test_bad_port_rejected() {
        assert!(Cli::try_parse_from(["memrest", "serve", "--port", "99999"]).is_err());
    }
}

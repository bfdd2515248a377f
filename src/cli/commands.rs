//! CLI command implementations

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::http_server::{HttpServer, ServiceConfig};
use crate::observability::Logger;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments and run the chosen command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}

pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve {
            config,
            host,
            port,
            static_dir,
        } => {
            let overrides = Overrides {
                host,
                port,
                static_dir,
            };
            serve(config.as_deref(), overrides)
        }
        Command::Config { config } => show_config(config.as_deref()),
    }
}

/// Command-line values that replace their config file counterparts
#[derive(Debug, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub static_dir: Option<PathBuf>,
}

/// Config file (or defaults) with overrides applied, validated
pub fn effective_config(path: Option<&Path>, overrides: Overrides) -> CliResult<ServiceConfig> {
    let mut config = match path {
        Some(path) => ServiceConfig::load(path)?,
        None => ServiceConfig::default(),
    };

    if let Some(host) = overrides.host {
        config.host = host;
    }
    if let Some(port) = overrides.port {
        config.port = port;
    }
    if let Some(dir) = overrides.static_dir {
        config.static_dir = Some(dir);
    }

    config.validate()?;
    Ok(config)
}

/// Boot the server and block until it shuts down
pub fn serve(path: Option<&Path>, overrides: Overrides) -> CliResult<()> {
    let config = effective_config(path, overrides)?;
    Logger::set_min_severity(config.severity()?);

    let server = HttpServer::with_config(config)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::io_error(format!("cannot start runtime: {}", e)))?;

    runtime
        .block_on(server.start())
        .map_err(|e| CliError::serve_failed(e.to_string()))
}

/// Print the effective configuration to stdout
pub fn show_config(path: Option<&Path>) -> CliResult<()> {
    let config = effective_config(path, Overrides::default())?;

    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, &config)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}

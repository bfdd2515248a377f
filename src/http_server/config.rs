//! HTTP Server Configuration
//!
//! Loaded from a JSON file; every field has a default, so `{}` is a valid
//! configuration.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::Severity;
use crate::resources::{TaskDraft, TaskStatus};
use crate::rest_api::{CorsPolicy, FetchPolicy};
use crate::upstream::DEFAULT_JOKE_API_URL;

/// Configuration errors; all are fatal at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {}", .path.display(), .message)]
    Io { path: PathBuf, message: String },

    #[error("cannot parse config: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// IP address to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served for non-API paths; `null` disables static files
    #[serde(default = "default_static_dir")]
    pub static_dir: Option<PathBuf>,

    #[serde(default)]
    pub cors: CorsConfig,

    /// Upstream joke endpoint
    #[serde(default = "default_joke_api_url")]
    pub joke_api_url: String,

    /// Upper bound on one upstream fetch (default: 5000)
    #[serde(default = "default_upstream_timeout_ms")]
    pub upstream_timeout_ms: u64,

    /// Fetched jokes kept in history (default: 50)
    #[serde(default = "default_joke_history_limit")]
    pub joke_history_limit: usize,

    /// Larger request bodies read as missing (default: 1 MiB)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// trace | info | warn | error (default: info)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Tasks inserted at startup, in order
    #[serde(default)]
    pub seed_tasks: Vec<SeedTask>,
}

/// Cross-origin settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Answer OPTIONS preflights and attach CORS headers (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Value of `Access-Control-Allow-Origin` (default: "*")
    #[serde(default = "default_allow_origin")]
    pub allow_origin: String,
}

/// A task present from startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedTask {
    pub title: String,
    pub description: String,
    #[serde(default = "default_seed_status")]
    pub status: TaskStatus,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_static_dir() -> Option<PathBuf> {
    Some(PathBuf::from("./static"))
}

fn default_joke_api_url() -> String {
    DEFAULT_JOKE_API_URL.to_string()
}

fn default_upstream_timeout_ms() -> u64 {
    5000
}

fn default_joke_history_limit() -> usize {
    50
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_allow_origin() -> String {
    "*".to_string()
}

fn default_seed_status() -> TaskStatus {
    TaskStatus::Open
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            allow_origin: default_allow_origin(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            cors: CorsConfig::default(),
            joke_api_url: default_joke_api_url(),
            upstream_timeout_ms: default_upstream_timeout_ms(),
            joke_history_limit: default_joke_history_limit(),
            max_body_bytes: default_max_body_bytes(),
            log_level: default_log_level(),
            seed_tasks: Vec::new(),
        }
    }
}

impl ServiceConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Read and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let config: Self =
            serde_json::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;
        self.severity()?;
        self.cors_policy()?;

        if self.upstream_timeout_ms == 0 {
            return Err(ConfigError::Invalid("upstream_timeout_ms must be positive".to_string()));
        }
        if self.joke_history_limit == 0 {
            return Err(ConfigError::Invalid("joke_history_limit must be positive".to_string()));
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid("max_body_bytes must be positive".to_string()));
        }

        for (i, seed) in self.seed_tasks.iter().enumerate() {
            if seed.title.trim().is_empty() || seed.description.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "seed_tasks[{}] needs a non-blank title and description",
                    i
                )));
            }
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| {
                ConfigError::Invalid(format!("cannot bind to {}:{}", self.host, self.port))
            })
    }

    pub fn severity(&self) -> Result<Severity, ConfigError> {
        self.log_level.parse().map_err(ConfigError::Invalid)
    }

    /// `None` when CORS is disabled
    pub fn cors_policy(&self) -> Result<Option<CorsPolicy>, ConfigError> {
        if !self.cors.enabled {
            return Ok(None);
        }
        CorsPolicy::with_origin(&self.cors.allow_origin)
            .map(Some)
            .map_err(|_| {
                ConfigError::Invalid(format!("bad allow_origin {:?}", self.cors.allow_origin))
            })
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }

    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy {
            timeout: self.upstream_timeout(),
            history_limit: self.joke_history_limit,
        }
    }

    /// Seed tasks with trimmed fields
    pub fn seed_drafts(&self) -> Vec<TaskDraft> {
        self.seed_tasks
            .iter()
            .map(|seed| TaskDraft {
                title: seed.title.trim().to_string(),
                description: seed.description.trim().to_string(),
                status: seed.status,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert!(config.cors.enabled);
        assert_eq!(config.static_dir, Some(PathBuf::from("./static")));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: ServiceConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn test_socket_addr() {
        let config = ServiceConfig::with_port(8080);
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "port": 9001,
                "static_dir": null,
                "cors": {{"allow_origin": "http://localhost:5173"}},
                "seed_tasks": [
                    {{"title": " Learn Rust ", "description": "basics", "status": "in progress"}},
                    {{"title": "Build", "description": "a todo app"}}
                ]
            }}"#
        )
        .unwrap();

        let config = ServiceConfig::load(file.path()).unwrap();
        assert_eq!(config.port, 9001);
        assert_eq!(config.static_dir, None);
        assert!(config.cors.enabled);

        let seeds = config.seed_drafts();
        assert_eq!(seeds[0].title, "Learn Rust");
        assert_eq!(seeds[0].status, TaskStatus::InProgress);
        assert_eq!(seeds[1].status, TaskStatus::Open);
    }

    #[test]
    fn test_missing_file() {
        let err = ServiceConfig::load(Path::new("/nonexistent/memrest.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_invalid_values() {
        let mut config = ServiceConfig::default();
        config.upstream_timeout_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ServiceConfig::default();
        config.log_level = "loud".to_string();
        assert!(config.validate().is_err());

        let mut config = ServiceConfig::default();
        config.host = "not a host".to_string();
        assert!(config.validate().is_err());

        let mut config = ServiceConfig::default();
        config.seed_tasks.push(SeedTask {
            title: "  ".to_string(),
            description: "x".to_string(),
            status: TaskStatus::Open,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cors_disabled() {
        let mut config = ServiceConfig::default();
        config.cors.enabled = false;
        assert!(config.cors_policy().unwrap().is_none());
    }
}

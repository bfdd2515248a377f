//! # HTTP Server Module
//!
//! Configuration and process-level server for the REST API.
//!
//! # Endpoints
//!
//! - `/api/tasks`, `/api/tasks/:id` - Todo tasks
//! - `/api/joke`, `/api/joke/history` - Upstream jokes
//! - `/api/saved`, `/api/saved/:id` - Saved jokes
//! - `/api/health`, `/api/metrics` - Observability
//! - everything else - Static assets

pub mod config;
pub mod server;

pub use config::{ConfigError, CorsConfig, SeedTask, ServiceConfig};
pub use server::HttpServer;

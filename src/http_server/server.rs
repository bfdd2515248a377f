//! # HTTP Server
//!
//! Builds the application state from a [`ServiceConfig`], binds the listener
//! and runs the REST router until Ctrl-C.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::observability::Logger;
use crate::rest_api::{AppState, RestServer, RouteTable};
use crate::upstream::{JokeApiClient, JokeSource};

use super::config::{ConfigError, ServiceConfig};

/// HTTP server for the task and joke API
pub struct HttpServer {
    addr: SocketAddr,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_config(ServiceConfig::default())
    }

    /// Create a server talking to the configured upstream joke API
    pub fn with_config(config: ServiceConfig) -> Result<Self, ConfigError> {
        let client = JokeApiClient::new(config.joke_api_url.clone(), config.upstream_timeout())
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Self::with_joke_source(config, Arc::new(client))
    }

    /// Create a server with an explicit joke source
    pub fn with_joke_source(
        config: ServiceConfig,
        joke_source: Arc<dyn JokeSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let addr = config.socket_addr()?;
        let cors = config.cors_policy()?;

        let mut state = AppState::new(joke_source)
            .with_routes(RouteTable::standard(cors.is_some()))
            .with_fetch_policy(config.fetch_policy())
            .with_max_body_bytes(config.max_body_bytes);
        if let Some(dir) = &config.static_dir {
            state = state.with_static_dir(dir);
        }

        let seeded = state
            .seed_tasks(config.seed_drafts())
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if seeded > 0 {
            Logger::info("SEED_LOADED", &[("tasks", seeded.to_string().as_str())]);
        }

        let mut server = RestServer::new(state);
        if let Some(cors) = cors {
            server = server.with_cors(cors);
        }

        Ok(Self {
            addr,
            router: server.router(),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.addr).await?;
        let local = listener.local_addr()?.to_string();

        Logger::info("SERVER_START", &[("addr", local.as_str())]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Logger::info("SERVER_STOP", &[("addr", local.as_str())]);
        Ok(())
    }
}

async fn shutdown_signal() {
    // If the handler cannot be installed, run until killed.
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

//! # REST API Module
//!
//! HTTP endpoints for the task and joke collections: route resolution,
//! handlers, the response envelope and the axum server glue.

pub mod errors;
pub mod handler;
pub mod response;
pub mod router;
pub mod server;

pub use errors::{ApiError, RestResult};
pub use handler::FetchPolicy;
pub use response::{encode, Envelope, Outcome, Reply};
pub use router::{Endpoint, Resolution, RouteTable};
pub use server::{AppState, CorsPolicy, RestServer};

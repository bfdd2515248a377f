//! memrest - an in-memory REST service for todo tasks and saved jokes
//!
//! Layers, bottom-up:
//! - `store`: generic id-keyed collections
//! - `resources`: tasks and jokes stored in them
//! - `validation`: request bodies to typed commands
//! - `upstream`: the external joke API
//! - `rest_api`: routing, handlers and the response envelope
//! - `http_server`: configuration and process-level server
//! - `cli`: command-line entry point

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod resources;
pub mod rest_api;
pub mod store;
pub mod upstream;
pub mod validation;

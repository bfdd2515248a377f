//! # Upstream Joke Source
//!
//! The external joke API sits behind [`JokeSource`] so the fetch handler can
//! be exercised without network access.

mod joke_api;

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

pub use joke_api::{JokeApiClient, DEFAULT_JOKE_API_URL};

/// Boxed future returned by [`JokeSource::fetch`]
pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ExternalJoke, UpstreamError>> + Send + 'a>>;

/// A joke as delivered by the upstream service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalJoke {
    pub external_id: Option<u64>,
    pub category: String,
    pub text: String,
}

/// Upstream failures; all of them surface to the client as 502
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    #[error("joke API request failed: {0}")]
    Transport(String),

    #[error("joke API responded with HTTP {0}")]
    Status(u16),

    #[error("joke API returned an error: {0}")]
    Reported(String),

    #[error("joke API returned an unexpected payload: {0}")]
    Malformed(String),

    #[error("joke API did not respond within {0} ms")]
    Timeout(u64),
}

/// Something that can produce one joke per call
///
/// Implementations make a single attempt; retry cadence is the caller's
/// business.
pub trait JokeSource: Send + Sync {
    fn fetch(&self) -> FetchFuture<'_>;
}

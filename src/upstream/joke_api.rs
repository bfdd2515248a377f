//! HTTP client for JokeAPI (v2.jokeapi.dev)

use std::time::Duration;

use serde::Deserialize;

use super::{ExternalJoke, FetchFuture, JokeSource, UpstreamError};

/// Single-part, safe programming jokes
pub const DEFAULT_JOKE_API_URL: &str =
    "https://v2.jokeapi.dev/joke/Programming?type=single&safe=true";

/// Response body of a JokeAPI `type=single` request
#[derive(Debug, Deserialize)]
struct JokeApiPayload {
    #[serde(default)]
    error: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    joke: Option<String>,
    #[serde(default)]
    id: Option<u64>,
}

impl JokeApiPayload {
    fn into_joke(self) -> Result<ExternalJoke, UpstreamError> {
        if self.error {
            return Err(UpstreamError::Reported(
                self.message.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        let text = self
            .joke
            .filter(|j| !j.trim().is_empty())
            .ok_or_else(|| UpstreamError::Malformed("missing `joke`".to_string()))?;

        Ok(ExternalJoke {
            external_id: self.id,
            category: self.category.unwrap_or_else(|| "Unknown".to_string()),
            text,
        })
    }
}

/// Fetches jokes over HTTP
pub struct JokeApiClient {
    client: reqwest::Client,
    url: String,
}

impl JokeApiClient {
    /// Build a client whose every request is bounded by `timeout`
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_once(&self) -> Result<ExternalJoke, UpstreamError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let payload: JokeApiPayload = response
            .json()
            .await
            .map_err(|e| UpstreamError::Malformed(e.to_string()))?;

        payload.into_joke()
    }
}

impl JokeSource for JokeApiClient {
    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(self.fetch_once())
    }
}

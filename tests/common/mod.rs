//! Shared helpers for the HTTP-level tests

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use memrest::rest_api::{AppState, CorsPolicy, RestServer};
use memrest::upstream::{ExternalJoke, FetchFuture, JokeSource, UpstreamError};

/// Hands out numbered jokes, one per fetch
pub struct CountingJokes {
    served: AtomicU64,
}

impl CountingJokes {
    pub fn new() -> Self {
        Self {
            served: AtomicU64::new(0),
        }
    }
}

impl JokeSource for CountingJokes {
    fn fetch(&self) -> FetchFuture<'_> {
        let n = self.served.fetch_add(1, Ordering::SeqCst) + 1;
        Box::pin(async move {
            Ok(ExternalJoke {
                external_id: Some(n),
                category: "Programming".to_string(),
                text: format!("joke #{}", n),
            })
        })
    }
}

/// Always fails like an unreachable API
pub struct BrokenJokes;

impl JokeSource for BrokenJokes {
    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(async { Err(UpstreamError::Status(500)) })
    }
}

/// Router with CORS, no static files and a working joke source
pub fn app() -> Router {
    app_with(AppState::new(Arc::new(CountingJokes::new())))
}

pub fn app_with(state: AppState) -> Router {
    RestServer::new(state).with_cors(CorsPolicy::permissive()).router()
}

pub fn app_serving(dir: &Path) -> Router {
    app_with(AppState::new(Arc::new(CountingJokes::new())).with_static_dir(dir))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub bytes: Vec<u8>,
}

impl TestResponse {
    /// Body parsed as JSON; panics on anything else
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.bytes).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.bytes.clone()).unwrap()
    }

    pub fn data(&self) -> Value {
        let body = self.json();
        assert_eq!(body["ok"], true, "expected success envelope, got {}", body);
        body["data"].clone()
    }

    pub fn error_message(&self) -> String {
        let body = self.json();
        assert_eq!(body["ok"], false, "expected failure envelope, got {}", body);
        body["error"]["message"].as_str().unwrap().to_string()
    }
}

pub async fn send_raw(app: &Router, method: Method, path: &str, body: Body) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse { status, headers, bytes }
}

pub async fn send(app: &Router, method: Method, path: &str, body: Option<Value>) -> TestResponse {
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    send_raw(app, method, path, body).await
}

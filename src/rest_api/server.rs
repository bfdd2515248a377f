//! # REST API HTTP Server
//!
//! Axum glue: a single fallback handler resolves every request against the
//! [`RouteTable`], runs the matching handler and encodes its outcome. Paths
//! outside `/api` are handed to the static file service.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use uuid::Uuid;

use crate::observability::{Logger, ServiceMetrics};
use crate::resources::{FetchedJoke, SavedJoke, Task, TaskDraft};
use crate::store::{Collection, StoreResult};
use crate::upstream::JokeSource;

use super::errors::ApiError;
use super::handler::{self, FetchPolicy};
use super::response::{encode, Outcome};
use super::router::{Endpoint, Resolution, RouteTable};

/// Header carrying the per-request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Default cap on request bodies
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Everything a request may touch
///
/// Built once at startup and shared behind an `Arc`; tests construct their
/// own isolated instance per case.
pub struct AppState {
    pub tasks: Collection<Task>,
    pub saved_jokes: Collection<SavedJoke>,
    pub fetched_jokes: Collection<FetchedJoke>,
    pub metrics: ServiceMetrics,
    joke_source: Arc<dyn JokeSource>,
    routes: RouteTable,
    static_files: Option<ServeDir>,
    fetch_policy: FetchPolicy,
    max_body_bytes: usize,
}

impl AppState {
    /// Empty collections, standard routes with preflight, no static files
    pub fn new(joke_source: Arc<dyn JokeSource>) -> Self {
        Self {
            tasks: Collection::new(),
            saved_jokes: Collection::new(),
            fetched_jokes: Collection::new(),
            metrics: ServiceMetrics::new(),
            joke_source,
            routes: RouteTable::standard(true),
            static_files: None,
            fetch_policy: FetchPolicy::default(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    /// Serve non-API paths from `dir`; `/` maps to `index.html`
    pub fn with_static_dir(mut self, dir: impl AsRef<std::path::Path>) -> Self {
        self.static_files = Some(ServeDir::new(dir));
        self
    }

    pub fn with_fetch_policy(mut self, policy: FetchPolicy) -> Self {
        self.fetch_policy = policy;
        self
    }

    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    /// Insert initial tasks, in order; returns how many were added
    pub fn seed_tasks(&self, drafts: impl IntoIterator<Item = TaskDraft>) -> StoreResult<usize> {
        let mut count = 0;
        for draft in drafts {
            self.tasks.insert(draft)?;
            count += 1;
        }
        Ok(count)
    }

    async fn handle(&self, endpoint: Endpoint, param: &str, body: Option<&Value>) -> Outcome {
        match endpoint {
            Endpoint::Health => handler::health(),
            Endpoint::Metrics => handler::metrics(&self.metrics),
            Endpoint::ListTasks => handler::list_tasks(&self.tasks),
            Endpoint::CreateTask => handler::create_task(&self.tasks, body),
            Endpoint::UpdateTaskStatus => handler::update_task_status(&self.tasks, param, body),
            Endpoint::DeleteTask => handler::delete_task(&self.tasks, param),
            Endpoint::FetchJoke => {
                handler::fetch_joke(
                    self.joke_source.as_ref(),
                    &self.fetched_jokes,
                    self.fetch_policy,
                )
                .await
            }
            Endpoint::JokeHistory => handler::joke_history(&self.fetched_jokes),
            Endpoint::ListSavedJokes => handler::list_saved_jokes(&self.saved_jokes),
            Endpoint::SaveJoke => handler::save_joke(&self.saved_jokes, body),
            Endpoint::DeleteSavedJoke => handler::delete_saved_joke(&self.saved_jokes, param),
        }
    }

    /// Update counters and log failures worth an operator's attention
    fn record(&self, endpoint: Option<Endpoint>, outcome: &Outcome) {
        let name = endpoint.map(Endpoint::name).unwrap_or("route_not_found");

        if endpoint == Some(Endpoint::FetchJoke) {
            self.metrics.increment_upstream_fetches();
        }

        match outcome {
            Ok(_) => match endpoint {
                Some(Endpoint::CreateTask | Endpoint::SaveJoke) => self.metrics.increment_created(),
                Some(Endpoint::UpdateTaskStatus) => self.metrics.increment_updated(),
                Some(Endpoint::DeleteTask | Endpoint::DeleteSavedJoke) => {
                    self.metrics.increment_deleted()
                }
                _ => {}
            },
            Err(ApiError::InvalidInput(_)) => self.metrics.increment_rejected(),
            Err(ApiError::NotFound(_)) => self.metrics.increment_not_found(),
            Err(ApiError::UpstreamFailure(message)) => {
                self.metrics.increment_upstream_failures();
                Logger::warn(
                    "UPSTREAM_FAILURE",
                    &[("endpoint", name), ("message", message.as_str())],
                );
            }
            Err(ApiError::Unhandled(detail)) => {
                self.metrics.increment_internal_errors();
                Logger::error("INTERNAL_ERROR", &[("endpoint", name), ("detail", detail.as_str())]);
            }
        }
    }
}

/// CORS headers attached to every response
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allow_origin: HeaderValue,
}

impl CorsPolicy {
    pub const ALLOW_METHODS: &'static str = "GET, POST, PUT, DELETE, OPTIONS";
    pub const ALLOW_HEADERS: &'static str = "Content-Type";

    /// Any origin
    pub fn permissive() -> Self {
        Self {
            allow_origin: HeaderValue::from_static("*"),
        }
    }

    pub fn with_origin(origin: &str) -> Result<Self, header::InvalidHeaderValue> {
        Ok(Self {
            allow_origin: HeaderValue::from_str(origin)?,
        })
    }

    fn apply(self, router: Router) -> Router {
        router
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                self.allow_origin,
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(Self::ALLOW_METHODS),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static(Self::ALLOW_HEADERS),
            ))
    }
}

/// REST API server
pub struct RestServer {
    state: Arc<AppState>,
    cors: Option<CorsPolicy>,
}

impl RestServer {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
            cors: None,
        }
    }

    pub fn with_cors(mut self, cors: CorsPolicy) -> Self {
        self.cors = Some(cors);
        self
    }

    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    /// Build the Axum router
    pub fn router(self) -> Router {
        let router = Router::new()
            .fallback(dispatch)
            .layer(middleware::from_fn(log_requests))
            .with_state(self.state);

        match self.cors {
            Some(cors) => cors.apply(router),
            None => router,
        }
    }
}

/// Resolve, run and encode a single request
async fn dispatch(State(state): State<Arc<AppState>>, request: Request) -> Response {
    state.metrics.increment_requests();

    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let resolution = state.routes.resolve(&method, &path);
    Logger::trace(
        "ROUTE_RESOLVED",
        &[
            ("method", method.as_str()),
            ("path", path.as_str()),
            ("target", resolution.target()),
        ],
    );

    match resolution {
        Resolution::Preflight => StatusCode::NO_CONTENT.into_response(),
        Resolution::Static => serve_static(&state, request).await,
        Resolution::ApiNotFound => {
            let outcome = Err(ApiError::route_not_found());
            state.record(None, &outcome);
            encode(outcome)
        }
        Resolution::Endpoint { endpoint, param } => {
            let body = if endpoint.takes_body() {
                read_json(request.into_body(), state.max_body_bytes).await
            } else {
                None
            };

            let outcome = state.handle(endpoint, param.unwrap_or(""), body.as_ref()).await;
            state.record(Some(endpoint), &outcome);
            encode(outcome)
        }
    }
}

/// Body as JSON; empty, oversized or malformed bodies all read as `None`
async fn read_json(body: Body, limit: usize) -> Option<Value> {
    let bytes = axum::body::to_bytes(body, limit).await.ok()?;
    if bytes.is_empty() {
        return None;
    }
    serde_json::from_slice(&bytes).ok()
}

/// Files are only ever read; any other method is a plain miss
async fn serve_static(state: &AppState, request: Request) -> Response {
    let Some(files) = state.static_files.clone() else {
        return plain_not_found();
    };
    let method = request.method();
    if method != Method::GET && method != Method::HEAD {
        return plain_not_found();
    }

    match files.oneshot(request).await {
        Ok(response) => match response.status() {
            StatusCode::NOT_FOUND | StatusCode::METHOD_NOT_ALLOWED => plain_not_found(),
            _ => response.into_response(),
        },
        Err(never) => match never {},
    }
}

fn plain_not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

/// Tag each request with an id and log one line when it completes
async fn log_requests(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let mut response = next.run(request).await;

    let status = response.status().as_u16().to_string();
    let duration_ms = started.elapsed().as_millis().to_string();
    Logger::info(
        "HTTP_REQUEST",
        &[
            ("method", method.as_str()),
            ("path", path.as_str()),
            ("status", status.as_str()),
            ("duration_ms", duration_ms.as_str()),
            ("request_id", request_id.as_str()),
        ],
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    response
}

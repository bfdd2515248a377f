//! # Route Table
//!
//! Routes are tested in declaration order and the first match wins, so the
//! order of [`RouteTable::standard`] is part of the API contract: a
//! collection's exact routes come before its `/:id` prefix routes.
//!
//! Resolution never touches the store. It only decides which endpoint (if
//! any) owns a request and which trailing segment is its path parameter.

use axum::http::Method;

/// Prefix shared by every API path
pub const API_PREFIX: &str = "/api";

/// Operations reachable through the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Health,
    Metrics,
    ListTasks,
    CreateTask,
    UpdateTaskStatus,
    DeleteTask,
    FetchJoke,
    JokeHistory,
    ListSavedJokes,
    SaveJoke,
    DeleteSavedJoke,
}

impl Endpoint {
    /// Stable name used in logs
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Health => "health",
            Endpoint::Metrics => "metrics",
            Endpoint::ListTasks => "list_tasks",
            Endpoint::CreateTask => "create_task",
            Endpoint::UpdateTaskStatus => "update_task_status",
            Endpoint::DeleteTask => "delete_task",
            Endpoint::FetchJoke => "fetch_joke",
            Endpoint::JokeHistory => "joke_history",
            Endpoint::ListSavedJokes => "list_saved_jokes",
            Endpoint::SaveJoke => "save_joke",
            Endpoint::DeleteSavedJoke => "delete_saved_joke",
        }
    }

    /// Whether the handler reads a request body
    pub fn takes_body(&self) -> bool {
        matches!(
            self,
            Endpoint::CreateTask | Endpoint::UpdateTaskStatus | Endpoint::SaveJoke
        )
    }
}

/// How a route matches a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPattern {
    /// The whole path, verbatim
    Exact(&'static str),
    /// `prefix` followed by at least a trailing segment, e.g. `/api/tasks/`
    Prefix(&'static str),
}

#[derive(Debug, Clone)]
pub struct Route {
    pub method: Method,
    pub pattern: PathPattern,
    pub endpoint: Endpoint,
}

impl Route {
    pub fn exact(method: Method, path: &'static str, endpoint: Endpoint) -> Self {
        Self {
            method,
            pattern: PathPattern::Exact(path),
            endpoint,
        }
    }

    pub fn prefix(method: Method, prefix: &'static str, endpoint: Endpoint) -> Self {
        Self {
            method,
            pattern: PathPattern::Prefix(prefix),
            endpoint,
        }
    }

    /// Match `path`, yielding the path parameter for prefix routes
    fn matches<'p>(&self, method: &Method, path: &'p str) -> Option<Option<&'p str>> {
        if self.method != *method {
            return None;
        }

        match self.pattern {
            PathPattern::Exact(exact) => (path == exact).then_some(None),
            PathPattern::Prefix(prefix) => path
                .strip_prefix(prefix)
                .map(|_| Some(trailing_segment(path))),
        }
    }
}

/// Last `/`-separated segment of a path
pub fn trailing_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Outcome of route resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'p> {
    /// CORS preflight; answered with 204 and no body
    Preflight,
    /// A declared route matched
    Endpoint {
        endpoint: Endpoint,
        param: Option<&'p str>,
    },
    /// Under `/api` but no route matched
    ApiNotFound,
    /// Outside `/api`; handed to the static asset service
    Static,
}

impl Resolution<'_> {
    /// Short label for logs
    pub fn target(&self) -> &'static str {
        match self {
            Resolution::Preflight => "preflight",
            Resolution::Endpoint { endpoint, .. } => endpoint.name(),
            Resolution::ApiNotFound => "route_not_found",
            Resolution::Static => "static",
        }
    }
}

/// Ordered list of routes
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    preflight: bool,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>, preflight: bool) -> Self {
        Self { routes, preflight }
    }

    /// The service's routes; `preflight` answers OPTIONS on every path
    pub fn standard(preflight: bool) -> Self {
        Self::new(
            vec![
                Route::exact(Method::GET, "/api/health", Endpoint::Health),
                Route::exact(Method::GET, "/api/metrics", Endpoint::Metrics),
                Route::exact(Method::GET, "/api/tasks", Endpoint::ListTasks),
                Route::exact(Method::POST, "/api/tasks", Endpoint::CreateTask),
                Route::prefix(Method::PUT, "/api/tasks/", Endpoint::UpdateTaskStatus),
                Route::prefix(Method::DELETE, "/api/tasks/", Endpoint::DeleteTask),
                Route::exact(Method::GET, "/api/joke", Endpoint::FetchJoke),
                Route::exact(Method::GET, "/api/joke/history", Endpoint::JokeHistory),
                Route::exact(Method::GET, "/api/saved", Endpoint::ListSavedJokes),
                Route::exact(Method::POST, "/api/saved", Endpoint::SaveJoke),
                Route::prefix(Method::DELETE, "/api/saved/", Endpoint::DeleteSavedJoke),
            ],
            preflight,
        )
    }

    pub fn resolve<'p>(&self, method: &Method, path: &'p str) -> Resolution<'p> {
        if self.preflight && *method == Method::OPTIONS {
            return Resolution::Preflight;
        }

        for route in &self.routes {
            if let Some(param) = route.matches(method, path) {
                return Resolution::Endpoint {
                    endpoint: route.endpoint,
                    param,
                };
            }
        }

        if is_api_path(path) {
            Resolution::ApiNotFound
        } else {
            Resolution::Static
        }
    }
}

/// `/api` itself or anything below `/api/`
pub fn is_api_path(path: &str) -> bool {
    match path.strip_prefix(API_PREFIX) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

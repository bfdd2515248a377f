//! Service counters
//!
//! - Counters only, monotonic, reset on process start
//! - Relaxed atomics; exact totals, no cross-counter consistency

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for the REST service
#[derive(Debug, Default)]
pub struct ServiceMetrics {
    /// Requests that reached the router
    requests: AtomicU64,
    /// Resources inserted by create handlers
    resources_created: AtomicU64,
    /// Resources mutated by update handlers
    resources_updated: AtomicU64,
    /// Resources removed by delete handlers
    resources_deleted: AtomicU64,
    /// Requests answered with 400
    rejected_inputs: AtomicU64,
    /// Requests answered with 404 from the API
    not_found: AtomicU64,
    /// Upstream fetch attempts
    upstream_fetches: AtomicU64,
    /// Upstream fetch attempts that failed
    upstream_failures: AtomicU64,
    /// Requests answered with 500
    internal_errors: AtomicU64,
}

impl ServiceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_requests(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_created(&self) {
        self.resources_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_updated(&self) {
        self.resources_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_deleted(&self) {
        self.resources_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_rejected(&self) {
        self.rejected_inputs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_upstream_fetches(&self) {
        self.upstream_fetches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_upstream_failures(&self) {
        self.upstream_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_internal_errors(&self) {
        self.internal_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            resources_created: self.resources_created.load(Ordering::Relaxed),
            resources_updated: self.resources_updated.load(Ordering::Relaxed),
            resources_deleted: self.resources_deleted.load(Ordering::Relaxed),
            rejected_inputs: self.rejected_inputs.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            upstream_fetches: self.upstream_fetches.load(Ordering::Relaxed),
            upstream_failures: self.upstream_failures.load(Ordering::Relaxed),
            internal_errors: self.internal_errors.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of every counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub resources_created: u64,
    pub resources_updated: u64,
    pub resources_deleted: u64,
    pub rejected_inputs: u64,
    pub not_found: u64,
    pub upstream_fetches: u64,
    pub upstream_failures: u64,
    pub internal_errors: u64,
}

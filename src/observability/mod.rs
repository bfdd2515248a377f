//! Observability for the REST service
//!
//! - Structured logging (JSON lines)
//! - Monotonic counters
//!
//! ```ignore
//! use memrest::observability::{Logger, ServiceMetrics};
//!
//! Logger::info("SERVER_START", &[("addr", "0.0.0.0:8000")]);
//!
//! let metrics = ServiceMetrics::new();
//! metrics.increment_requests();
//! ```

mod logger;
mod metrics;

pub use logger::{Logger, Severity};
pub use metrics::{MetricsSnapshot, ServiceMetrics};

//! # REST API Handlers
//!
//! One function per operation. Each validates its input, acts on a
//! collection and returns an [`Outcome`]; nothing here touches HTTP types
//! beyond the status code carried by [`Reply`].

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::observability::ServiceMetrics;
use crate::resources::{
    timestamp, FetchedJoke, FetchedJokeDraft, JokeTimestamp, SavedJoke, Task, TaskUpdate,
};
use crate::store::{Collection, Resource};
use crate::upstream::{JokeSource, UpstreamError};
use crate::validation;

use super::response::{Outcome, Reply};

/// Limits applied to every upstream joke fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Upper bound on a single fetch attempt
    pub timeout: Duration,
    /// Number of fetched jokes kept in the history cache
    pub history_limit: usize,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            history_limit: 50,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub fn health() -> Outcome {
    Reply::ok(&HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn metrics(metrics: &ServiceMetrics) -> Outcome {
    Reply::ok(&metrics.snapshot())
}

/// Remove the resource named by `segment` from any collection
pub fn delete_resource<R: Resource>(collection: &Collection<R>, segment: &str) -> Outcome {
    let command = validation::delete_resource(segment)?;
    collection.remove_by_id(command.id)?;
    Ok(Reply::no_content())
}

// ==================
// Tasks
// ==================

pub fn list_tasks(tasks: &Collection<Task>) -> Outcome {
    Reply::ok(&tasks.list()?)
}

pub fn create_task(tasks: &Collection<Task>, body: Option<&Value>) -> Outcome {
    let command = validation::create_task(body)?;
    let task = tasks.insert(command.into_draft())?;
    Reply::created(&task)
}

/// The id is checked before the body, and both before the store is read
pub fn update_task_status(
    tasks: &Collection<Task>,
    segment: &str,
    body: Option<&Value>,
) -> Outcome {
    let id = validation::resource_id(segment)?;
    let command = validation::update_status(body)?;

    let task = tasks.update_field(id, TaskUpdate::Status(command.status))?;
    Reply::ok(&task)
}

pub fn delete_task(tasks: &Collection<Task>, segment: &str) -> Outcome {
    delete_resource(tasks, segment)
}

// ==================
// Jokes
// ==================

/// Saved jokes, most recently fetched first
pub fn list_saved_jokes(saved: &Collection<SavedJoke>) -> Outcome {
    Reply::ok(&saved.list_sorted_by_desc(JokeTimestamp::FetchedAt)?)
}

pub fn save_joke(saved: &Collection<SavedJoke>, body: Option<&Value>) -> Outcome {
    let command = validation::save_joke(body)?;
    let joke = saved.insert(command.into_draft(timestamp::now()))?;
    Reply::created(&joke)
}

pub fn delete_saved_joke(saved: &Collection<SavedJoke>, segment: &str) -> Outcome {
    delete_resource(saved, segment)
}

/// Jokes fetched so far, newest first
pub fn joke_history(fetched: &Collection<FetchedJoke>) -> Outcome {
    Reply::ok(&fetched.list_newest_first(JokeTimestamp::FetchedAt)?)
}

/// Fetch one joke from upstream and cache it
///
/// Exactly one attempt, bounded by `policy.timeout`. The cache is written
/// only once the fetch has fully succeeded, so a failed, timed out or
/// cancelled fetch leaves it untouched.
pub async fn fetch_joke(
    source: &dyn JokeSource,
    fetched: &Collection<FetchedJoke>,
    policy: FetchPolicy,
) -> Outcome {
    let joke = match tokio::time::timeout(policy.timeout, source.fetch()).await {
        Ok(result) => result?,
        Err(_) => return Err(UpstreamError::Timeout(policy.timeout.as_millis() as u64).into()),
    };

    let cached = fetched.insert(FetchedJokeDraft {
        external_id: joke.external_id,
        category: joke.category,
        text: joke.text,
        fetched_at: timestamp::now(),
    })?;
    fetched.retain_newest(policy.history_limit)?;

    Reply::ok(&cached)
}

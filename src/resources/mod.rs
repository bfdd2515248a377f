//! # Resource Types
//!
//! The concrete records served by the API: tasks, saved jokes and the cache
//! of jokes fetched from the upstream API.

pub mod joke;
pub mod task;
pub mod timestamp;

pub use joke::{FetchedJoke, FetchedJokeDraft, JokeTimestamp, SavedJoke, SavedJokeDraft};
pub use task::{Task, TaskDraft, TaskStatus, TaskUpdate};

//! Store error types

use thiserror::Error;

use super::ResourceId;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a [`Collection`](super::Collection)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No resource with the given id exists in the collection
    #[error("{collection} {id} not found")]
    NotFound {
        collection: &'static str,
        id: ResourceId,
    },

    /// The id counter cannot mint another identifier
    #[error("{0} id space exhausted")]
    IdSpaceExhausted(&'static str),

    /// A writer panicked while holding the collection lock
    #[error("{0} lock poisoned")]
    Poisoned(&'static str),
}

//! Reasons a request payload is refused

use thiserror::Error;

/// Why a payload could not be turned into a command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// No body, an empty body, or a body that is not JSON
    #[error("request body is missing or is not valid JSON")]
    MissingBody,

    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` must be a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("field `{0}` must not be blank")]
    Blank(&'static str),

    #[error("invalid status {0:?}, expected one of: open, in progress, done")]
    InvalidStatus(String),

    #[error("field `{0}` must be an ISO-8601 timestamp")]
    InvalidTimestamp(&'static str),

    #[error("invalid id {0:?} in URL")]
    InvalidId(String),
}

//! # Response Formatting
//!
//! Every API response body uses one envelope:
//!
//! ```text
//! { "ok": true,  "data": ... }
//! { "ok": false, "error": { "message": "..." } }
//! ```
//!
//! The status code travels as the HTTP status. A success without data (204)
//! has no body at all.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use super::errors::{ApiError, RestResult};

/// Successful handler result
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub data: Option<Value>,
}

impl Reply {
    /// Serialize `data` into a reply with the given status
    pub fn with_status<T: Serialize>(status: StatusCode, data: &T) -> RestResult<Self> {
        Ok(Self {
            status,
            data: Some(serde_json::to_value(data)?),
        })
    }

    pub fn ok<T: Serialize>(data: &T) -> RestResult<Self> {
        Self::with_status(StatusCode::OK, data)
    }

    pub fn created<T: Serialize>(data: &T) -> RestResult<Self> {
        Self::with_status(StatusCode::CREATED, data)
    }

    pub fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            data: None,
        }
    }
}

/// What every handler returns
pub type Outcome = RestResult<Reply>;

/// Wire envelope, produced exactly once per API request
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Success {
        status: StatusCode,
        data: Option<Value>,
    },
    Failure {
        status: StatusCode,
        message: String,
    },
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
}

#[derive(Serialize)]
struct WireEnvelope<'a> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorBody<'a>>,
}

impl Envelope {
    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Envelope::Failure {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Envelope::Success { status, .. } | Envelope::Failure { status, .. } => *status,
        }
    }

    /// JSON body, or `None` for a bodiless success
    pub fn body(&self) -> Option<Value> {
        let wire = match self {
            Envelope::Success { data: None, .. } => return None,
            Envelope::Success { data, .. } => WireEnvelope {
                ok: true,
                data: data.as_ref(),
                error: None,
            },
            Envelope::Failure { message, .. } => WireEnvelope {
                ok: false,
                data: None,
                error: Some(ErrorBody { message }),
            },
        };
        serde_json::to_value(wire).ok()
    }
}

impl From<Outcome> for Envelope {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Ok(reply) => Envelope::Success {
                status: reply.status,
                data: reply.data,
            },
            Err(err) => Envelope::failure(err.status_code(), err.public_message()),
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status = self.status();
        match self.body() {
            Some(body) => (status, Json(body)).into_response(),
            None => status.into_response(),
        }
    }
}

/// Turn a handler outcome into an HTTP response
pub fn encode(outcome: Outcome) -> Response {
    Envelope::from(outcome).into_response()
}

impl From<Reply> for Envelope {
    fn from(reply: Reply) -> Self {
        Envelope::from(Ok::<_, ApiError>(reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;
    use serde_json::json;

    #[test]
    fn test_success_envelope() {
        let envelope = Envelope::from(Reply::ok(&json!([1, 2])).unwrap());
        assert_eq!(envelope.status(), StatusCode::OK);
        assert_eq!(envelope.body(), Some(json!({"ok": true, "data": [1, 2]})));
    }

    #[test]
    fn test_failure_envelope_has_message_only() {
        let envelope = Envelope::from(Err::<Reply, _>(ApiError::route_not_found()));
        assert_eq!(envelope.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            envelope.body(),
            Some(json!({"ok": false, "error": {"message": "route not found"}}))
        );
    }

    #[test]
    fn test_no_content_has_no_body() {
        let envelope = Envelope::from(Reply::no_content());
        assert_eq!(envelope.status(), StatusCode::NO_CONTENT);
        assert_eq!(envelope.body(), None);
    }

    #[test]
    fn test_encode_sets_json_content_type() {
        let response = encode(Reply::created(&json!({"id": 1})));
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_unhandled_error_is_generic() {
        let outcome: Outcome = Err(ApiError::Unhandled("secret detail".to_string()));
        let envelope = Envelope::from(outcome);
        let body = envelope.body().unwrap();
        assert_eq!(body["error"]["message"], "internal server error");
    }
}

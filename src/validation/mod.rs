//! # Request Validation
//!
//! Turns untyped JSON payloads and path segments into typed commands.
//!
//! Every function either returns a complete command or a [`Rejection`];
//! there are no partially filled commands. Strings are trimmed before they
//! are accepted and must be non-empty afterwards. A body that failed to parse
//! as JSON reaches these functions as `None`.

mod rejection;

use serde_json::{Map, Value};

use crate::resources::{timestamp, SavedJokeDraft, TaskDraft, TaskStatus};
use crate::store::ResourceId;

pub use rejection::Rejection;

/// Result type for validation
pub type Validated<T> = Result<T, Rejection>;

/// Create a task: `{ title: string, description: string }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTask {
    pub title: String,
    pub description: String,
}

impl CreateTask {
    /// New tasks always start out open
    pub fn into_draft(self) -> TaskDraft {
        TaskDraft {
            title: self.title,
            description: self.description,
            status: TaskStatus::Open,
        }
    }
}

/// Change a task's status: `{ status: "open" | "in progress" | "done" }`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateStatus {
    pub status: TaskStatus,
}

/// Save a joke: `{ text: string, category: string, fetchedAt?: string }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveJoke {
    pub text: String,
    pub category: String,
    /// Normalized timestamp, if the client sent one
    pub fetched_at: Option<String>,
}

impl SaveJoke {
    /// `saved_at` also stands in for `fetched_at` when none was given
    pub fn into_draft(self, saved_at: String) -> SavedJokeDraft {
        SavedJokeDraft {
            category: self.category,
            text: self.text,
            fetched_at: self.fetched_at.unwrap_or_else(|| saved_at.clone()),
            saved_at,
        }
    }
}

/// Remove the resource named by the trailing path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteResource {
    pub id: ResourceId,
}

pub fn create_task(body: Option<&Value>) -> Validated<CreateTask> {
    let fields = object(body)?;

    Ok(CreateTask {
        title: required_string(fields, "title")?,
        description: required_string(fields, "description")?,
    })
}

pub fn update_status(body: Option<&Value>) -> Validated<UpdateStatus> {
    let fields = object(body)?;

    let literal = match fields.get("status") {
        None | Some(Value::Null) => return Err(Rejection::MissingField("status")),
        Some(Value::String(s)) => s,
        Some(_) => {
            return Err(Rejection::WrongType {
                field: "status",
                expected: "string",
            })
        }
    };

    let status =
        TaskStatus::parse(literal).ok_or_else(|| Rejection::InvalidStatus(literal.clone()))?;
    Ok(UpdateStatus { status })
}

pub fn save_joke(body: Option<&Value>) -> Validated<SaveJoke> {
    let fields = object(body)?;

    let text = required_string(fields, "text")?;
    let category = required_string(fields, "category")?;

    let fetched_at = match optional_string(fields, "fetchedAt")? {
        Some(raw) => {
            let normalized = timestamp::normalize(&raw);
            Some(normalized.ok_or(Rejection::InvalidTimestamp("fetchedAt"))?)
        }
        None => None,
    };

    Ok(SaveJoke {
        text,
        category,
        fetched_at,
    })
}

/// Parse an identifier path segment; ids are positive integers
pub fn resource_id(segment: &str) -> Validated<ResourceId> {
    segment
        .parse::<u64>()
        .ok()
        .and_then(ResourceId::from_raw)
        .ok_or_else(|| Rejection::InvalidId(segment.to_string()))
}

pub fn delete_resource(segment: &str) -> Validated<DeleteResource> {
    resource_id(segment).map(|id| DeleteResource { id })
}

fn object(body: Option<&Value>) -> Validated<&Map<String, Value>> {
    match body {
        None | Some(Value::Null) => Err(Rejection::MissingBody),
        Some(Value::Object(fields)) => Ok(fields),
        Some(_) => Err(Rejection::NotAnObject),
    }
}

fn required_string(fields: &Map<String, Value>, field: &'static str) -> Validated<String> {
    optional_string(fields, field)?.ok_or(Rejection::MissingField(field))
}

/// Absent and `null` both count as missing; blank strings are rejected
fn optional_string(fields: &Map<String, Value>, field: &'static str) -> Validated<Option<String>> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(Rejection::Blank(field));
            }
            Ok(Some(trimmed.to_string()))
        }
        Some(_) => Err(Rejection::WrongType {
            field,
            expected: "string",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_task_trims_fields() {
        let body = json!({"title": "  A ", "description": "\tB\n"});
        let command = create_task(Some(&body)).unwrap();
        assert_eq!(command.title, "A");
        assert_eq!(command.description, "B");
        assert_eq!(command.into_draft().status, TaskStatus::Open);
    }

    #[test]
    fn test_create_task_rejections() {
        assert_eq!(create_task(None), Err(Rejection::MissingBody));
        assert_eq!(create_task(Some(&json!([1, 2]))), Err(Rejection::NotAnObject));
        assert_eq!(
            create_task(Some(&json!({}))),
            Err(Rejection::MissingField("title"))
        );
        assert_eq!(
            create_task(Some(&json!({"title": "A", "description": "   "}))),
            Err(Rejection::Blank("description"))
        );
        assert_eq!(
            create_task(Some(&json!({"title": 5, "description": "B"}))),
            Err(Rejection::WrongType {
                field: "title",
                expected: "string"
            })
        );
    }

    #[test]
    fn test_update_status_closed_set() {
        let done = update_status(Some(&json!({"status": "done"}))).unwrap();
        assert_eq!(done.status, TaskStatus::Done);

        let progress = update_status(Some(&json!({"status": "in progress"}))).unwrap();
        assert_eq!(progress.status, TaskStatus::InProgress);

        assert_eq!(
            update_status(Some(&json!({"status": "archived"}))),
            Err(Rejection::InvalidStatus("archived".to_string()))
        );
        assert_eq!(
            update_status(Some(&json!({"status": true}))),
            Err(Rejection::WrongType {
                field: "status",
                expected: "string"
            })
        );
        assert_eq!(
            update_status(Some(&json!({}))),
            Err(Rejection::MissingField("status"))
        );
    }

    #[test]
    fn test_save_joke_requires_category() {
        let body = json!({"text": "a joke"});
        assert_eq!(save_joke(Some(&body)), Err(Rejection::MissingField("category")));
    }

    #[test]
    fn test_save_joke_normalizes_fetched_at() {
        let body = json!({
            "text": "a joke",
            "category": "Programming",
            "fetchedAt": "2024-05-01T12:00:00+02:00"
        });
        let command = save_joke(Some(&body)).unwrap();
        assert_eq!(command.fetched_at.as_deref(), Some("2024-05-01T10:00:00.000Z"));
    }

    #[test]
    fn test_save_joke_rejects_bad_timestamp() {
        let body = json!({"text": "a", "category": "b", "fetchedAt": "last tuesday"});
        assert_eq!(
            save_joke(Some(&body)),
            Err(Rejection::InvalidTimestamp("fetchedAt"))
        );
    }

    #[test]
    fn test_save_joke_defaults_fetched_at_to_save_time() {
        let command = save_joke(Some(&json!({"text": "a", "category": "b"}))).unwrap();
        let draft = command.into_draft("2024-05-01T10:00:00.000Z".to_string());
        assert_eq!(draft.fetched_at, draft.saved_at);
    }

    #[test]
    fn test_resource_id_segments() {
        assert_eq!(resource_id("12").map(ResourceId::get), Ok(12));
        for bad in ["", "0", "-1", "abc", "1.5", "tasks"] {
            assert_eq!(resource_id(bad), Err(Rejection::InvalidId(bad.to_string())));
        }
        assert_eq!(delete_resource("3").map(|c| c.id.get()), Ok(3));
    }
}

//! Todo tasks

use std::convert::Infallible;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::store::{Resource, ResourceId};

/// Lifecycle state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "open")]
    Open,
    #[serde(rename = "in progress", alias = "in-progress")]
    InProgress,
    #[serde(rename = "done")]
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Open, TaskStatus::InProgress, TaskStatus::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Open => "open",
            TaskStatus::InProgress => "in progress",
            TaskStatus::Done => "done",
        }
    }

    /// Match a literal against the closed set of statuses
    ///
    /// `in-progress` is accepted as a spelling of `in progress`.
    pub fn parse(literal: &str) -> Option<Self> {
        match literal {
            "open" => Some(TaskStatus::Open),
            "in progress" | "in-progress" => Some(TaskStatus::InProgress),
            "done" => Some(TaskStatus::Done),
            _ => None,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: ResourceId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

/// Fields of a task before an id is minted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

/// In-place task mutations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskUpdate {
    Status(TaskStatus),
}

impl Resource for Task {
    type Draft = TaskDraft;
    type Update = TaskUpdate;
    // Tasks are only ever listed in insertion order.
    type SortField = Infallible;

    const KIND: &'static str = "task";

    fn mint(id: ResourceId, draft: TaskDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            status: draft.status,
        }
    }

    fn id(&self) -> ResourceId {
        self.id
    }

    fn apply(&mut self, update: TaskUpdate) {
        match update {
            TaskUpdate::Status(status) => self.status = status,
        }
    }

    fn sort_key(&self, field: Infallible) -> &str {
        match field {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_serialization() {
        let task = Task::mint(
            ResourceId::from_raw(1).unwrap(),
            TaskDraft {
                title: "A".to_string(),
                description: "B".to_string(),
                status: TaskStatus::Open,
            },
        );

        assert_eq!(
            serde_json::to_value(&task).unwrap(),
            json!({"id": 1, "title": "A", "description": "B", "status": "open"})
        );
    }

    #[test]
    fn test_status_literals() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
            assert_eq!(serde_json::to_value(status).unwrap(), json!(status.as_str()));
        }
        assert_eq!(TaskStatus::parse("in-progress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::parse("Done"), None);
        assert_eq!(TaskStatus::parse("closed"), None);
    }

    #[test]
    fn test_status_update_touches_only_status() {
        let mut task = Task::mint(
            ResourceId::from_raw(4).unwrap(),
            TaskDraft {
                title: "A".to_string(),
                description: "B".to_string(),
                status: TaskStatus::Open,
            },
        );
        task.apply(TaskUpdate::Status(TaskStatus::Done));

        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(task.title, "A");
        assert_eq!(task.id.get(), 4);
    }
}

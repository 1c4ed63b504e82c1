//! Request bodies the board client sends to the task store API.

use crate::task::domain::{Priority, Subject, Task, TaskId, TaskOrder, TaskStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTaskPayload {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Priority.
    pub priority: Priority,
    /// Subject.
    pub subject: Subject,
    /// Due date; `null` when unset.
    pub due_date: Option<DateTime<Utc>>,
    /// Initial column.
    pub status: TaskStatus,
}

/// Full edit of a task, sent as a replace request.
///
/// Every field is sent, so an unset due date clears the stored one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskEdit {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Completion flag.
    pub completed: bool,
    /// Priority.
    pub priority: Priority,
    /// Due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Category.
    pub category: String,
    /// Subject.
    pub subject: Subject,
    /// Column.
    pub status: TaskStatus,
}

impl TaskEdit {
    /// Starts an edit from the task's current values.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            completed: task.completed(),
            priority: task.priority(),
            due_date: task.due_date(),
            category: task.category().to_owned(),
            subject: task.subject(),
            status: task.status(),
        }
    }
}

/// Status patch produced by a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusMove {
    /// Dragged task.
    #[serde(skip)]
    pub task_id: TaskId,
    /// Destination column.
    pub status: TaskStatus,
    /// Destination index within the column.
    pub order: TaskOrder,
}

//! Board columns and drag-and-drop planning.

use super::StatusMove;
use crate::task::domain::{Task, TaskId, TaskOrder, TaskStatus};

/// Tasks grouped into the three fixed status columns.
///
/// List order is preserved within each column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardColumns {
    to_do: Vec<Task>,
    in_progress: Vec<Task>,
    completed: Vec<Task>,
}

impl BoardColumns {
    /// Splits a task list by status.
    #[must_use]
    pub fn partition(tasks: &[Task]) -> Self {
        let mut columns = Self::default();
        for task in tasks {
            columns.column_mut(task.status()).push(task.clone());
        }
        columns
    }

    /// Returns one column.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::ToDo => &self.to_do,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Completed => &self.completed,
        }
    }

    /// Iterates the columns left to right.
    pub fn iter(&self) -> impl Iterator<Item = (TaskStatus, &[Task])> {
        TaskStatus::ALL
            .into_iter()
            .map(move |status| (status, self.column(status)))
    }

    fn column_mut(&mut self, status: TaskStatus) -> &mut Vec<Task> {
        match status {
            TaskStatus::ToDo => &mut self.to_do,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Completed => &mut self.completed,
        }
    }
}

/// A column and index on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DropLocation {
    /// Column.
    pub status: TaskStatus,
    /// Zero-based index within the column.
    pub index: usize,
}

impl DropLocation {
    /// Creates a location.
    #[must_use]
    pub const fn new(status: TaskStatus, index: usize) -> Self {
        Self { status, index }
    }
}

/// Result of a finished drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragOutcome {
    /// Dragged task.
    pub task_id: TaskId,
    /// Where the drag started.
    pub source: DropLocation,
    /// Where it ended; `None` when released outside every column.
    pub destination: Option<DropLocation>,
}

/// Turns a drag into the status patch to send.
///
/// Returns `None` when the task was dropped outside a column, dropped where
/// it started, or is not in `tasks`. Only the dragged task's order changes;
/// siblings keep their stored order.
#[must_use]
pub fn plan_move(outcome: &DragOutcome, tasks: &[Task]) -> Option<StatusMove> {
    let destination = outcome.destination?;
    if destination == outcome.source {
        return None;
    }
    let task = tasks.iter().find(|task| task.id() == outcome.task_id)?;

    Some(StatusMove {
        task_id: task.id(),
        status: destination.status,
        order: TaskOrder::from_index(destination.index),
    })
}

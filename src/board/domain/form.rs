//! The quick-add form.

use super::NewTaskPayload;
use crate::task::domain::{Priority, Subject, TaskDomainError, TaskStatus, parse_due_date};
use chrono::{DateTime, Utc};

/// Quick-add form state.
///
/// A single text field becomes both title and description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTaskForm {
    /// Task text.
    pub text: String,
    /// Selected priority.
    pub priority: Priority,
    /// Selected subject.
    pub subject: Subject,
    /// Selected due date.
    pub due_date: Option<DateTime<Utc>>,
}

impl NewTaskForm {
    /// Sets the due date from date-picker text; blank text clears it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDueDate`] for unparseable text and
    /// leaves the current value unchanged.
    pub fn set_due_date_text(&mut self, text: &str) -> Result<(), TaskDomainError> {
        self.due_date = parse_due_date(text)?;
        Ok(())
    }

    /// Builds the create body, or `None` when the text is blank.
    #[must_use]
    pub fn to_request(&self) -> Option<NewTaskPayload> {
        if self.text.trim().is_empty() {
            return None;
        }
        Some(NewTaskPayload {
            title: self.text.clone(),
            description: self.text.clone(),
            priority: self.priority,
            subject: self.subject,
            due_date: self.due_date,
            status: TaskStatus::ToDo,
        })
    }

    /// Restores the defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

//! Task aggregate root and the inputs that create or change it.

use super::{Priority, Subject, TaskDomainError, TaskId, TaskOrder, TaskStatus};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Category assigned when none is supplied.
pub const DEFAULT_CATEGORY: &str = "general";

/// Whether a status change also rewrites the completion flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CompletionPolicy {
    /// `completed` becomes `status == Completed` on every status patch.
    #[default]
    DeriveFromStatus,
    /// Status patches leave `completed` untouched.
    Independent,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id", alias = "id")]
    id: TaskId,
    title: String,
    description: String,
    completed: bool,
    priority: Priority,
    #[serde(default)]
    due_date: Option<DateTime<Utc>>,
    category: String,
    subject: Subject,
    status: TaskStatus,
    order: TaskOrder,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted free-text category.
    pub category: String,
    /// Persisted subject.
    pub subject: Subject,
    /// Persisted board column.
    pub status: TaskStatus,
    /// Persisted position within the column.
    pub order: TaskOrder,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    description: String,
    priority: Priority,
    due_date: Option<DateTime<Utc>>,
    category: String,
    subject: Subject,
    status: TaskStatus,
}

impl NewTask {
    /// Creates task input with the required text fields and default
    /// priority, category, subject and status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] or
    /// [`TaskDomainError::EmptyDescription`] when either value is blank.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, TaskDomainError> {
        let (title_text, description_text) = validate_text(title.into(), description.into())?;
        Ok(Self {
            title: title_text,
            description: description_text,
            priority: Priority::default(),
            due_date: None,
            category: DEFAULT_CATEGORY.to_owned(),
            subject: Subject::default(),
            status: TaskStatus::default(),
        })
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets or clears the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = due_date;
        self
    }

    /// Sets the category; a blank category falls back to `general`.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = normalize_category(category.into());
        self
    }

    /// Sets the subject.
    #[must_use]
    pub const fn with_subject(mut self, subject: Subject) -> Self {
        self.subject = subject;
        self
    }

    /// Sets the initial board column.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
}

/// Validated replacement of a task's mutable fields.
///
/// Title and description are always replaced. Optional fields replace the
/// stored value only when set; `due_date` distinguishes "leave unchanged"
/// (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    title: String,
    description: String,
    completed: Option<bool>,
    priority: Option<Priority>,
    due_date: Option<Option<DateTime<Utc>>>,
    category: Option<String>,
    subject: Option<Subject>,
    status: Option<TaskStatus>,
}

impl TaskChanges {
    /// Creates a change set replacing title and description only.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] or
    /// [`TaskDomainError::EmptyDescription`] when either value is blank.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, TaskDomainError> {
        let (title_text, description_text) = validate_text(title.into(), description.into())?;
        Ok(Self {
            title: title_text,
            description: description_text,
            completed: None,
            priority: None,
            due_date: None,
            category: None,
            subject: None,
            status: None,
        })
    }

    /// Replaces the completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the due date; `None` clears it.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Replaces the category; a blank category falls back to `general`.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(normalize_category(category.into()));
        self
    }

    /// Replaces the subject.
    #[must_use]
    pub const fn with_subject(mut self, subject: Subject) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Replaces the board column.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }
}

impl Task {
    /// Creates a new, not yet completed task at the top of its column.
    #[must_use]
    pub fn create(new_task: NewTask, clock: &(impl Clock + ?Sized)) -> Self {
        let timestamp = clock.utc();
        let NewTask {
            title,
            description,
            priority,
            due_date,
            category,
            subject,
            status,
        } = new_task;

        Self {
            id: TaskId::new(),
            title,
            description,
            completed: false,
            priority,
            due_date,
            category,
            subject,
            status,
            order: TaskOrder::default(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            completed: data.completed,
            priority: data.priority,
            due_date: data.due_date,
            category: data.category,
            subject: data.subject,
            status: data.status,
            order: data.order,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns whether the task is marked done.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the free-text category.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the subject.
    #[must_use]
    pub const fn subject(&self) -> Subject {
        self.subject
    }

    /// Returns the board column.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the position within the board column.
    #[must_use]
    pub const fn order(&self) -> TaskOrder {
        self.order
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a full update of the mutable fields.
    ///
    /// `completed` and `status` are written independently; no derivation
    /// happens here.
    pub fn apply_changes(&mut self, changes: TaskChanges, clock: &(impl Clock + ?Sized)) {
        let TaskChanges {
            title,
            description,
            completed,
            priority,
            due_date,
            category,
            subject,
            status,
        } = changes;

        self.title = title;
        self.description = description;
        if let Some(value) = completed {
            self.completed = value;
        }
        if let Some(value) = priority {
            self.priority = value;
        }
        if let Some(value) = due_date {
            self.due_date = value;
        }
        if let Some(value) = category {
            self.category = value;
        }
        if let Some(value) = subject {
            self.subject = value;
        }
        if let Some(value) = status {
            self.status = value;
        }
        self.touch(clock);
    }

    /// Moves the task to a board column, optionally at a new position.
    pub fn move_to(
        &mut self,
        status: TaskStatus,
        order: Option<TaskOrder>,
        policy: CompletionPolicy,
        clock: &(impl Clock + ?Sized),
    ) {
        self.status = status;
        if let Some(position) = order {
            self.order = position;
        }
        if policy == CompletionPolicy::DeriveFromStatus {
            self.completed = status.is_completed();
        }
        self.touch(clock);
    }

    /// Flips the completion flag.
    pub fn toggle_completed(&mut self, clock: &(impl Clock + ?Sized)) {
        self.completed = !self.completed;
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &(impl Clock + ?Sized)) {
        self.updated_at = clock.utc();
    }
}

fn validate_text(title: String, description: String) -> Result<(String, String), TaskDomainError> {
    if title.trim().is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    if description.trim().is_empty() {
        return Err(TaskDomainError::EmptyDescription);
    }
    Ok((title, description))
}

fn normalize_category(category: String) -> String {
    if category.trim().is_empty() {
        DEFAULT_CATEGORY.to_owned()
    } else {
        category
    }
}

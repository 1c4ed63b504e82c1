//! Service layer for the task CRUD contract.

use crate::task::{
    domain::{
        CompletionPolicy, NewTask, Priority, Subject, Task, TaskChanges, TaskDomainError, TaskId,
        TaskOrder, TaskQuery, TaskStatus, parse_due_date,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Unvalidated input for creating a task.
///
/// Absent or empty optional fields fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTaskRequest {
    /// Required title.
    pub title: Option<String>,
    /// Required description.
    pub description: Option<String>,
    /// Priority label.
    pub priority: Option<String>,
    /// Due date as RFC 3339 or `YYYY-MM-DD`.
    pub due_date: Option<String>,
    /// Free-text category.
    pub category: Option<String>,
    /// Subject label.
    pub subject: Option<String>,
    /// Initial status label.
    pub status: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request carrying only the required text fields.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            ..Self::default()
        }
    }
}

/// Unvalidated input for a full update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaceTaskRequest {
    /// Required title.
    pub title: Option<String>,
    /// Required description.
    pub description: Option<String>,
    /// Completion flag; kept when absent.
    pub completed: Option<bool>,
    /// Priority label; kept when absent.
    pub priority: Option<String>,
    /// Outer `None` keeps the due date, `Some(None)` clears it.
    pub due_date: Option<Option<String>>,
    /// Category; kept when absent.
    pub category: Option<String>,
    /// Subject label; kept when absent.
    pub subject: Option<String>,
    /// Status label; kept when absent.
    pub status: Option<String>,
}

impl ReplaceTaskRequest {
    /// Creates a request replacing only title and description.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            ..Self::default()
        }
    }
}

/// Unvalidated input for moving a task between columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusChange {
    /// Target status label.
    pub status: Option<String>,
    /// New position within the target column.
    pub order: Option<i64>,
}

impl StatusChange {
    /// Creates a change to `status`, optionally at `order`.
    #[must_use]
    pub fn new(status: TaskStatus, order: Option<u32>) -> Self {
        Self {
            status: Some(status.as_str().to_owned()),
            order: order.map(i64::from),
        }
    }
}

/// How deleting an unknown task is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DeletePolicy {
    /// Unknown ids succeed.
    #[default]
    Idempotent,
    /// Unknown ids are reported as not found.
    Strict,
}

/// Result of a successful delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeleteOutcome {
    /// A stored task was removed.
    Deleted,
    /// No task had the identifier.
    AlreadyAbsent,
}

/// Behaviour switches applied by [`TaskService`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TaskBehavior {
    /// Whether status patches derive the completion flag.
    pub completion: CompletionPolicy,
    /// Whether deleting an unknown id fails.
    pub delete: DeletePolicy,
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// No task has the identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Service type with both collaborators erased, as held by the HTTP layer.
pub type SharedTaskService = TaskService<dyn TaskRepository, dyn Clock + Send + Sync>;

/// Task CRUD orchestration service.
pub struct TaskService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync + ?Sized,
{
    repository: Arc<R>,
    clock: Arc<C>,
    behavior: TaskBehavior,
}

impl<R, C> Clone for TaskService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            behavior: self.behavior,
        }
    }
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync + ?Sized,
{
    /// Creates a service with default behaviour.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            behavior: TaskBehavior::default(),
        }
    }

    /// Replaces the behaviour switches.
    #[must_use]
    pub const fn with_behavior(mut self, behavior: TaskBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Returns the active behaviour switches.
    #[must_use]
    pub const fn behavior(&self) -> TaskBehavior {
        self.behavior
    }

    /// Lists tasks matching the query, in its sort order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store fails.
    pub async fn list(&self, query: &TaskQuery) -> TaskServiceResult<Vec<Task>> {
        let tasks = self.repository.find(query).await?;
        tracing::debug!(count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Validates and stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when validation fails, in which
    /// case nothing is stored, or [`TaskServiceError::Repository`] when the
    /// store rejects the write.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let CreateTaskRequest {
            title,
            description,
            priority,
            due_date,
            category,
            subject,
            status,
        } = request;

        let mut new_task = NewTask::new(
            title.unwrap_or_default(),
            description.unwrap_or_default(),
        )?;
        if let Some(value) = parse_label::<Priority>(priority.as_deref())? {
            new_task = new_task.with_priority(value);
        }
        if let Some(text) = due_date.as_deref() {
            new_task = new_task.with_due_date(parse_due_date(text)?);
        }
        if let Some(text) = category {
            new_task = new_task.with_category(text);
        }
        if let Some(value) = parse_label::<Subject>(subject.as_deref())? {
            new_task = new_task.with_subject(value);
        }
        if let Some(value) = parse_label::<TaskStatus>(status.as_deref())? {
            new_task = new_task.with_status(value);
        }

        let task = Task::create(new_task, &*self.clock);
        self.repository.store(&task).await?;
        tracing::info!(task_id = %task.id(), status = %task.status(), "task created");
        Ok(task)
    }

    /// Replaces a task's title and description and any supplied field.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when validation fails,
    /// [`TaskServiceError::NotFound`] when the id is unknown, or
    /// [`TaskServiceError::Repository`] when the store fails.
    pub async fn replace(&self, id: TaskId, request: ReplaceTaskRequest) -> TaskServiceResult<Task> {
        let changes = build_changes(request)?;
        let mut task = self.load(id).await?;
        task.apply_changes(changes, &*self.clock);
        self.persist(&task).await?;
        tracing::info!(task_id = %id, "task replaced");
        Ok(task)
    }

    /// Moves a task to a status column and optionally repositions it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for a missing or unknown status
    /// or an out-of-range order, [`TaskServiceError::NotFound`] when the id
    /// is unknown, or [`TaskServiceError::Repository`] when the store fails.
    pub async fn patch_status(&self, id: TaskId, change: StatusChange) -> TaskServiceResult<Task> {
        let status = parse_label::<TaskStatus>(change.status.as_deref())?
            .ok_or(TaskDomainError::MissingStatus)?;
        let order = change.order.map(TaskOrder::new).transpose()?;

        let mut task = self.load(id).await?;
        task.move_to(status, order, self.behavior.completion, &*self.clock);
        self.persist(&task).await?;
        tracing::info!(
            task_id = %id,
            status = %status,
            order = task.order().value(),
            completed = task.completed(),
            "task moved"
        );
        Ok(task)
    }

    /// Flips a task's completion flag.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the id is unknown or
    /// [`TaskServiceError::Repository`] when the store fails.
    pub async fn toggle(&self, id: TaskId) -> TaskServiceResult<Task> {
        let mut task = self.load(id).await?;
        task.toggle_completed(&*self.clock);
        self.persist(&task).await?;
        tracing::info!(task_id = %id, completed = task.completed(), "task toggled");
        Ok(task)
    }

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] for an unknown id under
    /// [`DeletePolicy::Strict`], or [`TaskServiceError::Repository`] when
    /// the store fails.
    pub async fn delete(&self, id: TaskId) -> TaskServiceResult<DeleteOutcome> {
        if self.repository.delete(id).await? {
            tracing::info!(task_id = %id, "task deleted");
            return Ok(DeleteOutcome::Deleted);
        }
        match self.behavior.delete {
            DeletePolicy::Idempotent => {
                tracing::debug!(task_id = %id, "delete of absent task ignored");
                Ok(DeleteOutcome::AlreadyAbsent)
            }
            DeletePolicy::Strict => Err(TaskServiceError::NotFound(id)),
        }
    }

    async fn load(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))
    }

    /// Writes back a loaded task; a concurrent delete surfaces as not found.
    async fn persist(&self, task: &Task) -> TaskServiceResult<()> {
        self.repository.update(task).await.map_err(|err| match err {
            TaskRepositoryError::NotFound(id) => TaskServiceError::NotFound(id),
            other => TaskServiceError::Repository(other),
        })
    }
}

fn build_changes(request: ReplaceTaskRequest) -> Result<TaskChanges, TaskDomainError> {
    let ReplaceTaskRequest {
        title,
        description,
        completed,
        priority,
        due_date,
        category,
        subject,
        status,
    } = request;

    let mut changes = TaskChanges::new(
        title.unwrap_or_default(),
        description.unwrap_or_default(),
    )?;
    if let Some(value) = completed {
        changes = changes.with_completed(value);
    }
    if let Some(value) = parse_label::<Priority>(priority.as_deref())? {
        changes = changes.with_priority(value);
    }
    if let Some(value) = due_date {
        let parsed = value.as_deref().map(parse_due_date).transpose()?;
        changes = changes.with_due_date(parsed.flatten());
    }
    if let Some(text) = category {
        changes = changes.with_category(text);
    }
    if let Some(value) = parse_label::<Subject>(subject.as_deref())? {
        changes = changes.with_subject(value);
    }
    if let Some(value) = parse_label::<TaskStatus>(status.as_deref())? {
        changes = changes.with_status(value);
    }
    Ok(changes)
}

/// Parses an optional label; absent and blank values yield `None`.
fn parse_label<T>(value: Option<&str>) -> Result<Option<T>, TaskDomainError>
where
    T: for<'a> TryFrom<&'a str, Error = TaskDomainError>,
{
    match value {
        Some(text) if !text.trim().is_empty() => T::try_from(text).map(Some),
        _ => Ok(None),
    }
}

//! Port for the task store API as seen from the board client.

use crate::board::domain::{NewTaskPayload, StatusMove, TaskEdit};
use crate::task::domain::{Task, TaskId, TaskQuery};
use async_trait::async_trait;
use std::fmt;

/// Result type for task API calls.
pub type TaskApiResult<T> = Result<T, TaskApiError>;

/// Remote task store operations.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Fetches the filtered, sorted task list.
    async fn list(&self, query: &TaskQuery) -> TaskApiResult<Vec<Task>>;

    /// Creates a task and returns the stored document.
    async fn create(&self, payload: &NewTaskPayload) -> TaskApiResult<Task>;

    /// Replaces a task's fields and returns the stored document.
    async fn update(&self, id: TaskId, edit: &TaskEdit) -> TaskApiResult<Task>;

    /// Moves a task to a column and position.
    async fn patch_status(&self, change: &StatusMove) -> TaskApiResult<Task>;

    /// Flips a task's completion flag.
    async fn toggle(&self, id: TaskId) -> TaskApiResult<Task>;

    /// Deletes a task.
    async fn delete(&self, id: TaskId) -> TaskApiResult<()>;
}

/// Broad category of a failed API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskApiErrorKind {
    /// The request timed out.
    Timeout,
    /// The server could not be reached.
    Connect,
    /// The request could not be built or sent.
    Request,
    /// The response body could not be decoded.
    Decode,
    /// The server answered with a non-success status.
    Status,
}

impl TaskApiErrorKind {
    /// Returns the kind name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Request => "request",
            Self::Decode => "decode",
            Self::Status => "status",
        }
    }
}

impl fmt::Display for TaskApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failed task API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskApiError {
    kind: TaskApiErrorKind,
    status: Option<u16>,
    url: Option<String>,
    message: String,
}

impl TaskApiError {
    /// Creates an error.
    #[must_use]
    pub fn new(kind: TaskApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            url: None,
            message: message.into(),
        }
    }

    /// Attaches the HTTP status.
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attaches the request URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Returns the failure category.
    #[must_use]
    pub const fn kind(&self) -> TaskApiErrorKind {
        self.kind
    }

    /// Returns the HTTP status, if a response arrived.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns the request URL.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Returns the detail message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TaskApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task api error kind={}", self.kind)?;
        if let Some(status) = self.status {
            write!(f, " status={status}")?;
        }
        if let Some(url) = &self.url {
            write!(f, " url={url}")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for TaskApiError {}

//! Wire models and the error envelope for the task store API.

use crate::task::{
    domain::{SortDirection, SortField, TaskDomainError, TaskFilter, TaskQuery, TaskSort},
    services::{CreateTaskRequest, ReplaceTaskRequest, StatusChange, TaskServiceError},
};
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Body of `POST /tasks`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskBody {
    /// Required title.
    pub title: Option<String>,
    /// Required description.
    pub description: Option<String>,
    /// Priority label.
    pub priority: Option<String>,
    /// Due date text.
    pub due_date: Option<String>,
    /// Category.
    pub category: Option<String>,
    /// Subject label.
    pub subject: Option<String>,
    /// Status label.
    pub status: Option<String>,
}

impl From<CreateTaskBody> for CreateTaskRequest {
    fn from(body: CreateTaskBody) -> Self {
        Self {
            title: body.title,
            description: body.description,
            priority: body.priority,
            due_date: body.due_date,
            category: body.category,
            subject: body.subject,
            status: body.status,
        }
    }
}

/// Body of `PUT /tasks/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceTaskBody {
    /// Required title.
    pub title: Option<String>,
    /// Required description.
    pub description: Option<String>,
    /// Completion flag.
    pub completed: Option<bool>,
    /// Priority label.
    pub priority: Option<String>,
    /// Absent keeps the date, `null` clears it.
    #[serde(default, deserialize_with = "present")]
    pub due_date: Option<Option<String>>,
    /// Category.
    pub category: Option<String>,
    /// Subject label.
    pub subject: Option<String>,
    /// Status label.
    pub status: Option<String>,
}

impl From<ReplaceTaskBody> for ReplaceTaskRequest {
    fn from(body: ReplaceTaskBody) -> Self {
        Self {
            title: body.title,
            description: body.description,
            completed: body.completed,
            priority: body.priority,
            due_date: body.due_date,
            category: body.category,
            subject: body.subject,
            status: body.status,
        }
    }
}

/// Marks a field that appeared in the body, even as `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Body of `PATCH /tasks/{id}/status`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusBody {
    /// Target status label.
    pub status: Option<String>,
    /// New position within the column.
    pub order: Option<i64>,
}

impl From<StatusBody> for StatusChange {
    fn from(body: StatusBody) -> Self {
        Self {
            status: body.status,
            order: body.order,
        }
    }
}

/// Query string of `GET /tasks`. Empty values count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Sort field wire name.
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    pub sort_order: Option<String>,
    /// Subject filter.
    pub subject: Option<String>,
    /// Status filter.
    pub status: Option<String>,
    /// Priority filter.
    pub priority: Option<String>,
    /// Free-text search.
    pub search: Option<String>,
}

impl ListParams {
    /// Converts the query string into a validated list query.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] for an unknown sort field, direction or
    /// filter label.
    pub fn to_query(&self) -> Result<TaskQuery, TaskDomainError> {
        let mut filter = TaskFilter::default();
        if let Some(label) = non_empty(self.subject.as_deref()) {
            filter = filter.with_subject(label.try_into()?);
        }
        if let Some(label) = non_empty(self.status.as_deref()) {
            filter = filter.with_status(label.try_into()?);
        }
        if let Some(label) = non_empty(self.priority.as_deref()) {
            filter = filter.with_priority(label.try_into()?);
        }
        if let Some(text) = non_empty(self.search.as_deref()) {
            filter = filter.with_search(text);
        }

        let field = non_empty(self.sort_by.as_deref())
            .map(SortField::try_from)
            .transpose()?
            .unwrap_or_default();
        let direction = non_empty(self.sort_order.as_deref())
            .map(SortDirection::try_from)
            .transpose()?
            .unwrap_or_default();

        Ok(TaskQuery::new(filter, TaskSort::new(field, direction)))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

/// Plain message response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests.
    pub status: String,
    /// Current time, RFC 3339.
    pub timestamp: String,
    /// Process start time, RFC 3339.
    pub started_at: String,
}

/// Errors returned by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed body, query or path, or a validation failure.
    #[error("{0}")]
    InvalidRequest(String),
    /// No task has the identifier.
    #[error("{0}")]
    NotFound(String),
    /// Store failure.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<TaskDomainError> for ApiError {
    fn from(err: TaskDomainError) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::Domain(domain) => domain.into(),
            TaskServiceError::NotFound(_) => Self::NotFound(err.to_string()),
            TaskServiceError::Repository(repository) => Self::Internal(repository.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = serde_json::json!({
            "error": self.to_string(),
            "code": self.code(),
        });
        (status, Json(body)).into_response()
    }
}

//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or querying domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is missing or empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task description is missing or empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// The priority label is not one of `low`, `medium` or `high`.
    #[error("unknown priority: {0}")]
    InvalidPriority(String),

    /// The subject label is not in the fixed subject list.
    #[error("unknown subject: {0}")]
    InvalidSubject(String),

    /// The status label is not one of the three board columns.
    #[error("unknown status: {0}")]
    InvalidStatus(String),

    /// A status change did not name a target column.
    #[error("status is required")]
    MissingStatus,

    /// The due date could not be parsed.
    #[error("invalid due date '{0}', expected RFC 3339 or YYYY-MM-DD")]
    InvalidDueDate(String),

    /// The column order is negative or exceeds the persisted range.
    #[error("invalid order {0}, expected an integer between 0 and 2147483647")]
    InvalidOrder(i64),

    /// The task identifier is not a valid UUID.
    #[error("invalid task identifier: {0}")]
    InvalidTaskId(String),

    /// The sort field does not name a stored task field.
    #[error("unknown sort field: {0}")]
    InvalidSortField(String),

    /// The sort direction is neither ascending nor descending.
    #[error("unknown sort order '{0}', expected asc or desc")]
    InvalidSortDirection(String),
}

//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
///
/// Field order matches the column order of [`tasks::table`].
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Title text.
    pub title: String,
    /// Description text.
    pub description: String,
    /// Completion flag.
    pub completed: bool,
    /// Priority rank.
    pub priority: i16,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Free-text category.
    pub category: String,
    /// Subject rank.
    pub subject: i16,
    /// Status column rank.
    pub status: i16,
    /// Position within the status column.
    pub board_order: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert and full-overwrite model for task records.
///
/// `id` is skipped by the changeset derive; a `None` due date writes `NULL`.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskRecord {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Title text.
    pub title: String,
    /// Description text.
    pub description: String,
    /// Completion flag.
    pub completed: bool,
    /// Priority rank.
    pub priority: i16,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Free-text category.
    pub category: String,
    /// Subject rank.
    pub subject: i16,
    /// Status column rank.
    pub status: i16,
    /// Position within the status column.
    pub board_order: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

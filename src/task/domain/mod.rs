//! Domain model for task tracking.
//!
//! The task domain models a single to-do entity, its closed value sets, and
//! the list query vocabulary while keeping all infrastructure concerns
//! outside of the domain boundary.

mod error;
mod fields;
mod ids;
mod query;
mod task;

pub use error::TaskDomainError;
pub use fields::{Priority, Subject, TaskOrder, TaskStatus, parse_due_date};
pub use ids::TaskId;
pub use query::{SortDirection, SortField, TaskFilter, TaskQuery, TaskSort};
pub use task::{
    CompletionPolicy, DEFAULT_CATEGORY, NewTask, PersistedTaskData, Task, TaskChanges,
};

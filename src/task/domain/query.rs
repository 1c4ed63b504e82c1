//! Filter and sort directives for listing tasks.
//!
//! Repository adapters translate these into their own query language; the
//! in-memory adapter evaluates them directly through [`TaskQuery::matches`]
//! and [`TaskSort::compare`]. Both must agree on the ordering rules below:
//!
//! - enumerated fields order by declaration rank,
//! - text fields order by code point,
//! - a missing due date is the smallest value, so it comes first when
//!   ascending and last when descending,
//! - ties keep store order.

use super::{Priority, Subject, Task, TaskDomainError, TaskStatus};
use std::cmp::Ordering;
use std::fmt;

/// Stored field a task list can be sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortField {
    /// Creation timestamp.
    #[default]
    CreatedAt,
    /// Latest mutation timestamp.
    UpdatedAt,
    /// Title text.
    Title,
    /// Description text.
    Description,
    /// Due date, missing dates first.
    DueDate,
    /// Priority rank.
    Priority,
    /// Subject rank.
    Subject,
    /// Category text.
    Category,
    /// Status column rank.
    Status,
    /// Position within the column.
    Order,
    /// Completion flag, open tasks first.
    Completed,
}

impl SortField {
    /// Every sortable field.
    pub const ALL: [Self; 11] = [
        Self::CreatedAt,
        Self::UpdatedAt,
        Self::Title,
        Self::Description,
        Self::DueDate,
        Self::Priority,
        Self::Subject,
        Self::Category,
        Self::Status,
        Self::Order,
        Self::Completed,
    ];

    /// Returns the wire name used in the `sortBy` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
            Self::Title => "title",
            Self::Description => "description",
            Self::DueDate => "dueDate",
            Self::Priority => "priority",
            Self::Subject => "subject",
            Self::Category => "category",
            Self::Status => "status",
            Self::Order => "order",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for SortField {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == value.trim())
            .ok_or_else(|| TaskDomainError::InvalidSortField(value.to_owned()))
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    #[default]
    Descending,
}

impl SortDirection {
    /// Returns the wire name used in the `sortOrder` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl TryFrom<&str> for SortDirection {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(TaskDomainError::InvalidSortDirection(value.to_owned())),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort directive; defaults to newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TaskSort {
    /// Field to sort by.
    pub field: SortField,
    /// Direction to sort in.
    pub direction: SortDirection,
}

impl TaskSort {
    /// Creates a sort directive.
    #[must_use]
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Orders two tasks according to this directive.
    #[must_use]
    pub fn compare(&self, left: &Task, right: &Task) -> Ordering {
        let ascending = match self.field {
            SortField::CreatedAt => left.created_at().cmp(&right.created_at()),
            SortField::UpdatedAt => left.updated_at().cmp(&right.updated_at()),
            SortField::Title => left.title().cmp(right.title()),
            SortField::Description => left.description().cmp(right.description()),
            SortField::DueDate => left.due_date().cmp(&right.due_date()),
            SortField::Priority => left.priority().cmp(&right.priority()),
            SortField::Subject => left.subject().cmp(&right.subject()),
            SortField::Category => left.category().cmp(right.category()),
            SortField::Status => left.status().cmp(&right.status()),
            SortField::Order => left.order().cmp(&right.order()),
            SortField::Completed => left.completed().cmp(&right.completed()),
        };
        match self.direction {
            SortDirection::Ascending => ascending,
            SortDirection::Descending => ascending.reverse(),
        }
    }
}

/// Exact-match filters plus a free-text search. Unset filters match all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    subject: Option<Subject>,
    status: Option<TaskStatus>,
    priority: Option<Priority>,
    search: Option<String>,
}

impl TaskFilter {
    /// Restricts results to one subject.
    #[must_use]
    pub const fn with_subject(mut self, subject: Subject) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Restricts results to one status column.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts results to one priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Restricts results to tasks whose title or description contains the
    /// text, ignoring case. Blank text leaves the filter unset.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let text = search.into();
        self.search = (!text.trim().is_empty()).then_some(text);
        self
    }

    /// Returns the subject filter.
    #[must_use]
    pub const fn subject(&self) -> Option<Subject> {
        self.subject
    }

    /// Returns the status filter.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the priority filter.
    #[must_use]
    pub const fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Returns the search text.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Returns `true` when the task satisfies every set filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.subject.is_none_or(|subject| task.subject() == subject)
            && self.status.is_none_or(|status| task.status() == status)
            && self.priority.is_none_or(|priority| task.priority() == priority)
            && self
                .search
                .as_deref()
                .is_none_or(|needle| matches_search(task, needle))
    }
}

fn matches_search(task: &Task, needle: &str) -> bool {
    let lowered = needle.to_lowercase();
    task.title().to_lowercase().contains(&lowered)
        || task.description().to_lowercase().contains(&lowered)
}

/// Full list request: filters plus sort directive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    filter: TaskFilter,
    sort: TaskSort,
}

impl TaskQuery {
    /// Creates a query from filters and a sort directive.
    #[must_use]
    pub const fn new(filter: TaskFilter, sort: TaskSort) -> Self {
        Self { filter, sort }
    }

    /// Returns the filters.
    #[must_use]
    pub const fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    /// Returns the sort directive.
    #[must_use]
    pub const fn sort(&self) -> TaskSort {
        self.sort
    }

    /// Returns `true` when the task passes the filters.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.filter.matches(task)
    }

    /// Filters and stably sorts tasks according to this query.
    #[must_use]
    pub fn apply<'a>(&self, tasks: impl IntoIterator<Item = &'a Task>) -> Vec<Task> {
        let mut selected: Vec<Task> = tasks
            .into_iter()
            .filter(|task| self.matches(task))
            .cloned()
            .collect();
        selected.sort_by(|left, right| self.sort.compare(left, right));
        selected
    }
}

//! Closed value sets and validated scalars stored on a task.

use super::TaskDomainError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task urgency.
///
/// Variants are declared in ascending urgency; the derived ordering and
/// [`Priority::rank`] follow that declaration order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Default urgency.
    #[default]
    Medium,
    /// Needs attention first.
    High,
}

impl Priority {
    /// Every priority in ascending order.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Returns the wire and storage label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Returns the persisted sort rank.
    #[must_use]
    pub const fn rank(self) -> i16 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }

    /// Looks up a priority by persisted rank.
    #[must_use]
    pub fn from_rank(rank: i16) -> Option<Self> {
        Self::ALL.into_iter().find(|priority| priority.rank() == rank)
    }
}

impl TryFrom<&str> for Priority {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == value.trim())
            .ok_or_else(|| TaskDomainError::InvalidPriority(value.to_owned()))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// School subject a task belongs to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Subject {
    /// English.
    English,
    /// Physics.
    Physics,
    /// Chemistry.
    Chemistry,
    /// Biology.
    Biology,
    /// Maths.
    Maths,
    /// Second language.
    #[serde(rename = "Second Language")]
    SecondLanguage,
    /// Geography.
    Geography,
    /// History.
    History,
    /// Economics.
    Economics,
    /// Computer.
    Computer,
    /// Not tied to a subject.
    #[default]
    #[serde(rename = "general")]
    General,
}

impl Subject {
    /// Every subject in declaration order.
    pub const ALL: [Self; 11] = [
        Self::English,
        Self::Physics,
        Self::Chemistry,
        Self::Biology,
        Self::Maths,
        Self::SecondLanguage,
        Self::Geography,
        Self::History,
        Self::Economics,
        Self::Computer,
        Self::General,
    ];

    /// Returns the wire and storage label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Physics => "Physics",
            Self::Chemistry => "Chemistry",
            Self::Biology => "Biology",
            Self::Maths => "Maths",
            Self::SecondLanguage => "Second Language",
            Self::Geography => "Geography",
            Self::History => "History",
            Self::Economics => "Economics",
            Self::Computer => "Computer",
            Self::General => "general",
        }
    }

    /// Returns the persisted sort rank.
    #[must_use]
    pub const fn rank(self) -> i16 {
        match self {
            Self::English => 0,
            Self::Physics => 1,
            Self::Chemistry => 2,
            Self::Biology => 3,
            Self::Maths => 4,
            Self::SecondLanguage => 5,
            Self::Geography => 6,
            Self::History => 7,
            Self::Economics => 8,
            Self::Computer => 9,
            Self::General => 10,
        }
    }

    /// Looks up a subject by persisted rank.
    #[must_use]
    pub fn from_rank(rank: i16) -> Option<Self> {
        Self::ALL.into_iter().find(|subject| subject.rank() == rank)
    }
}

impl TryFrom<&str> for Subject {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|subject| subject.as_str() == value.trim())
            .ok_or_else(|| TaskDomainError::InvalidSubject(value.to_owned()))
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Board column a task sits in.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TaskStatus {
    /// Not started.
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    /// Being worked on.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Finished.
    #[serde(rename = "Completed")]
    Completed,
}

impl TaskStatus {
    /// The three board columns, left to right.
    pub const ALL: [Self; 3] = [Self::ToDo, Self::InProgress, Self::Completed];

    /// Returns the wire and storage label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// Returns the persisted sort rank.
    #[must_use]
    pub const fn rank(self) -> i16 {
        match self {
            Self::ToDo => 0,
            Self::InProgress => 1,
            Self::Completed => 2,
        }
    }

    /// Looks up a status by persisted rank.
    #[must_use]
    pub fn from_rank(rank: i16) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.rank() == rank)
    }

    /// Returns `true` for the completed column.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value.trim())
            .ok_or_else(|| TaskDomainError::InvalidStatus(value.to_owned()))
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a task within its status column.
///
/// Not unique and not contiguous: the last status patch wins.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TaskOrder(u32);

impl TaskOrder {
    /// Largest order representable in the current `PostgreSQL` schema.
    const MAX_PERSISTED_VALUE: i64 = i32::MAX as i64;

    /// Creates a validated column order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidOrder`] when the value is negative
    /// or exceeds `i32::MAX`.
    pub fn new(value: i64) -> Result<Self, TaskDomainError> {
        if !(0..=Self::MAX_PERSISTED_VALUE).contains(&value) {
            return Err(TaskDomainError::InvalidOrder(value));
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| TaskDomainError::InvalidOrder(value))
    }

    /// Creates an order from a board index.
    ///
    /// Indexes past the persisted range saturate at `i32::MAX`.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        let bounded = i32::try_from(index).unwrap_or(i32::MAX);
        Self(bounded.unsigned_abs())
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns the value as stored in an `INTEGER` column.
    #[must_use]
    pub fn to_persisted(self) -> i32 {
        i32::try_from(self.0).unwrap_or(i32::MAX)
    }
}

impl fmt::Display for TaskOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses a due date supplied by a client.
///
/// Accepts an RFC 3339 timestamp or a bare `YYYY-MM-DD` date, which is
/// taken as midnight UTC. A blank value means "no due date".
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidDueDate`] for any other input.
pub fn parse_due_date(value: &str) -> Result<Option<DateTime<Utc>>, TaskDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(Some(timestamp.with_timezone(&Utc)));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Some(midnight.and_utc()))
        .ok_or_else(|| TaskDomainError::InvalidDueDate(value.to_owned()))
}

//! Presentation helpers: priority colours and the evening reminder.

use crate::task::domain::Priority;
use chrono::{NaiveTime, Timelike};
use mockable::Clock;

/// Colour tone used to badge a priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriorityTone {
    /// High priority.
    Error,
    /// Medium priority.
    Warning,
    /// Low priority.
    Success,
}

impl PriorityTone {
    /// Returns the tone name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Success => "success",
        }
    }
}

impl From<Priority> for PriorityTone {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::High => Self::Error,
            Priority::Medium => Self::Warning,
            Priority::Low => Self::Success,
        }
    }
}

/// Hour the "pack your bag" reminder starts, local time.
const REMINDER_START_HOUR: u32 = 21;
/// Hour the reminder stops, local time.
const REMINDER_END_HOUR: u32 = 1;

/// Returns `true` between 21:00 and 01:00 local time.
#[must_use]
pub fn late_night_reminder_due(clock: &(impl Clock + ?Sized)) -> bool {
    reminder_due_at(clock.local().time())
}

/// Returns `true` when `time` falls in the reminder window.
#[must_use]
pub fn reminder_due_at(time: NaiveTime) -> bool {
    let hour = time.hour();
    hour >= REMINDER_START_HOUR || hour < REMINDER_END_HOUR
}

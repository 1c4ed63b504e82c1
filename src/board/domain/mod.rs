//! Client-side model of the task board.
//!
//! Pure state and rules: no I/O happens here. The controller in
//! [`crate::board::services`] performs API calls and feeds responses back
//! into [`BoardState`].

mod columns;
mod display;
mod form;
mod payload;
mod state;

pub use columns::{BoardColumns, DragOutcome, DropLocation, plan_move};
pub use display::{PriorityTone, late_night_reminder_due, reminder_due_at};
pub use form::NewTaskForm;
pub use payload::{NewTaskPayload, StatusMove, TaskEdit};
pub use state::{BoardFilters, BoardState, ViewMode};

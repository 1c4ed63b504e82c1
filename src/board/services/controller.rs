//! Board controller: user actions in, API calls out, state reconciled from
//! responses.

use crate::board::{
    domain::{
        BoardColumns, BoardFilters, BoardState, DragOutcome, TaskEdit, late_night_reminder_due,
        plan_move,
    },
    ports::{TaskApi, TaskApiError},
};
use crate::task::domain::{SortDirection, SortField, TaskId};
use mockable::Clock;
use std::sync::Arc;

/// What happened to a user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionOutcome {
    /// The API call succeeded and local state was reconciled.
    Applied,
    /// Nothing was sent.
    Skipped,
    /// The API call failed; the banner is set and local state is unchanged.
    Failed,
}

/// Drives the board from user actions.
///
/// Each action makes one API call and merges the response into local state.
/// Updates are never optimistic and failures are never rolled back or
/// retried.
pub struct BoardController<A, C>
where
    A: TaskApi + ?Sized,
    C: Clock + Send + Sync + ?Sized,
{
    api: Arc<A>,
    clock: Arc<C>,
    state: BoardState,
}

impl<A, C> BoardController<A, C>
where
    A: TaskApi + ?Sized,
    C: Clock + Send + Sync + ?Sized,
{
    /// Creates a controller with empty state.
    #[must_use]
    pub fn new(api: Arc<A>, clock: Arc<C>) -> Self {
        Self {
            api,
            clock,
            state: BoardState::default(),
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &BoardState {
        &self.state
    }

    /// Returns the state for direct form edits.
    pub const fn state_mut(&mut self) -> &mut BoardState {
        &mut self.state
    }

    /// Returns the current tasks grouped into board columns.
    #[must_use]
    pub fn columns(&self) -> BoardColumns {
        BoardColumns::partition(self.state.tasks())
    }

    /// Loads the initial list.
    pub async fn mount(&mut self) -> ActionOutcome {
        self.refresh().await
    }

    /// Re-fetches the whole list for the current search, sort and filters.
    ///
    /// A failed fetch keeps the previous list.
    pub async fn refresh(&mut self) -> ActionOutcome {
        if late_night_reminder_due(&*self.clock) {
            self.state.show_reminder();
        }

        let query = self.state.query();
        match self.api.list(&query).await {
            Ok(tasks) => {
                tracing::debug!(count = tasks.len(), "tasks refreshed");
                self.state.replace_all(tasks);
                self.succeed()
            }
            Err(err) => self.fail("Failed to load tasks", &err),
        }
    }

    /// Changes the search text and re-fetches.
    pub async fn set_search(&mut self, search: impl Into<String> + Send) -> ActionOutcome {
        self.state.set_search(search);
        self.refresh().await
    }

    /// Changes the sort field and re-fetches.
    pub async fn set_sort_field(&mut self, field: SortField) -> ActionOutcome {
        self.state.set_sort_field(field);
        self.refresh().await
    }

    /// Changes the sort direction and re-fetches.
    pub async fn set_sort_direction(&mut self, direction: SortDirection) -> ActionOutcome {
        self.state.set_sort_direction(direction);
        self.refresh().await
    }

    /// Replaces the filters and re-fetches.
    pub async fn set_filters(&mut self, filters: BoardFilters) -> ActionOutcome {
        self.state.set_filters(filters);
        self.refresh().await
    }

    /// Clears every filter and re-fetches.
    pub async fn clear_filters(&mut self) -> ActionOutcome {
        self.set_filters(BoardFilters::default()).await
    }

    /// Switches between list and board layouts without fetching.
    pub const fn toggle_view(&mut self) {
        self.state.toggle_view();
    }

    /// Hides the evening reminder.
    pub const fn dismiss_reminder(&mut self) {
        self.state.dismiss_reminder();
    }

    /// Creates a task from the quick-add form.
    ///
    /// Blank text sends nothing. On success the task is prepended and the
    /// form reset.
    pub async fn add_task(&mut self) -> ActionOutcome {
        let Some(payload) = self.state.form().to_request() else {
            return ActionOutcome::Skipped;
        };
        match self.api.create(&payload).await {
            Ok(task) => {
                tracing::info!(task_id = %task.id(), "task added");
                self.state.prepend(task);
                self.state.form_mut().reset();
                self.succeed()
            }
            Err(err) => self.fail("Failed to add task", &err),
        }
    }

    /// Saves an edit of a task.
    pub async fn edit_task(&mut self, id: TaskId, edit: TaskEdit) -> ActionOutcome {
        match self.api.update(id, &edit).await {
            Ok(task) => {
                self.state.replace(task);
                self.succeed()
            }
            Err(err) => self.fail("Failed to update task", &err),
        }
    }

    /// Deletes a task.
    pub async fn delete_task(&mut self, id: TaskId) -> ActionOutcome {
        match self.api.delete(id).await {
            Ok(()) => {
                self.state.remove(id);
                self.succeed()
            }
            Err(err) => self.fail("Failed to delete task", &err),
        }
    }

    /// Flips a task's completion flag.
    pub async fn toggle_task(&mut self, id: TaskId) -> ActionOutcome {
        match self.api.toggle(id).await {
            Ok(task) => {
                self.state.replace(task);
                self.succeed()
            }
            Err(err) => self.fail("Failed to toggle task", &err),
        }
    }

    /// Applies the end of a drag gesture.
    ///
    /// Drops outside a column, drops in place and unknown tasks send
    /// nothing.
    pub async fn drag_end(&mut self, outcome: DragOutcome) -> ActionOutcome {
        let Some(change) = plan_move(&outcome, self.state.tasks()) else {
            return ActionOutcome::Skipped;
        };
        match self.api.patch_status(&change).await {
            Ok(task) => {
                self.state.replace(task);
                self.succeed()
            }
            Err(err) => self.fail("Failed to move task", &err),
        }
    }

    fn succeed(&mut self) -> ActionOutcome {
        self.state.clear_banner();
        ActionOutcome::Applied
    }

    fn fail(&mut self, banner: &str, err: &TaskApiError) -> ActionOutcome {
        tracing::error!(error = %err, url = err.url(), "{banner}");
        self.state.set_banner(banner);
        ActionOutcome::Failed
    }
}

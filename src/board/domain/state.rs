//! Client-side board state and its reconciliation rules.

use super::NewTaskForm;
use crate::task::domain::{
    Priority, SortDirection, SortField, Subject, Task, TaskFilter, TaskId, TaskQuery, TaskSort,
    TaskStatus,
};

/// How tasks are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// Flat list.
    #[default]
    List,
    /// Three status columns.
    Board,
}

impl ViewMode {
    /// Returns the other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::List => Self::Board,
            Self::Board => Self::List,
        }
    }
}

/// Optional exact-match filters chosen in the UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BoardFilters {
    /// Priority filter.
    pub priority: Option<Priority>,
    /// Subject filter.
    pub subject: Option<Subject>,
    /// Status filter.
    pub status: Option<TaskStatus>,
}

/// Everything the board renders from.
///
/// The task list is only ever replaced with, or merged from, server
/// responses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    tasks: Vec<Task>,
    search: String,
    sort: TaskSort,
    filters: BoardFilters,
    view: ViewMode,
    form: NewTaskForm,
    banner: Option<String>,
    reminder_visible: bool,
}

impl BoardState {
    /// Returns the tasks in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the search text.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Returns the sort directive.
    #[must_use]
    pub const fn sort(&self) -> TaskSort {
        self.sort
    }

    /// Returns the active filters.
    #[must_use]
    pub const fn filters(&self) -> BoardFilters {
        self.filters
    }

    /// Returns the layout.
    #[must_use]
    pub const fn view(&self) -> ViewMode {
        self.view
    }

    /// Returns the quick-add form.
    #[must_use]
    pub const fn form(&self) -> &NewTaskForm {
        &self.form
    }

    /// Returns the quick-add form for editing.
    pub const fn form_mut(&mut self) -> &mut NewTaskForm {
        &mut self.form
    }

    /// Returns the error banner, if any.
    #[must_use]
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Returns whether the evening reminder is showing.
    #[must_use]
    pub const fn reminder_visible(&self) -> bool {
        self.reminder_visible
    }

    /// Builds the list query sent on every fetch.
    #[must_use]
    pub fn query(&self) -> TaskQuery {
        let mut filter = TaskFilter::default().with_search(self.search.clone());
        if let Some(priority) = self.filters.priority {
            filter = filter.with_priority(priority);
        }
        if let Some(subject) = self.filters.subject {
            filter = filter.with_subject(subject);
        }
        if let Some(status) = self.filters.status {
            filter = filter.with_status(status);
        }
        TaskQuery::new(filter, self.sort)
    }

    /// Sets the search text.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Sets the sort field, keeping the direction.
    pub const fn set_sort_field(&mut self, field: SortField) {
        self.sort.field = field;
    }

    /// Sets the sort direction, keeping the field.
    pub const fn set_sort_direction(&mut self, direction: SortDirection) {
        self.sort.direction = direction;
    }

    /// Replaces the filters.
    pub const fn set_filters(&mut self, filters: BoardFilters) {
        self.filters = filters;
    }

    /// Switches between list and board layouts.
    pub const fn toggle_view(&mut self) {
        self.view = self.view.toggled();
    }

    /// Shows an error banner.
    pub fn set_banner(&mut self, message: impl Into<String>) {
        self.banner = Some(message.into());
    }

    /// Hides the error banner.
    pub fn clear_banner(&mut self) {
        self.banner = None;
    }

    /// Shows the evening reminder.
    pub const fn show_reminder(&mut self) {
        self.reminder_visible = true;
    }

    /// Hides the evening reminder.
    pub const fn dismiss_reminder(&mut self) {
        self.reminder_visible = false;
    }

    /// Replaces the whole list with a fetch result.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Adds a newly created task at the top.
    pub fn prepend(&mut self, task: Task) {
        self.tasks.insert(0, task);
    }

    /// Swaps in the server's copy of a task, matched by id.
    ///
    /// Returns `false` when no local task has that id.
    pub fn replace(&mut self, task: Task) -> bool {
        let Some(slot) = self.tasks.iter_mut().find(|local| local.id() == task.id()) else {
            return false;
        };
        *slot = task;
        true
    }

    /// Drops a task by id. Returns `false` when it was not listed.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id() != id);
        self.tasks.len() != before
    }
}

//! Shared world state for task store BDD scenarios.

use std::sync::Arc;

use collabtask::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{DeleteOutcome, TaskService, TaskServiceError},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestTaskService = TaskService<InMemoryTaskRepository, DefaultClock>;

/// Scenario world for task store behaviour tests.
pub struct TaskWorld {
    pub service: TestTaskService,
    pub current_task: Option<Task>,
    pub last_error: Option<TaskServiceError>,
    pub last_listing: Option<Vec<Task>>,
    pub last_delete: Option<DeleteOutcome>,
}

impl TaskWorld {
    /// Creates a world backed by an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let service = TaskService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(DefaultClock),
        );
        Self {
            service,
            current_task: None,
            last_error: None,
            last_listing: None,
            last_delete: None,
        }
    }

    /// Returns the task the scenario is working on.
    pub fn current(&self) -> Result<&Task, eyre::Report> {
        self.current_task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing current task in scenario world"))
    }
}

impl Default for TaskWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskWorld {
    TaskWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

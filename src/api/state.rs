//! Shared state handed to every handler.

use crate::task::{
    ports::TaskRepository,
    services::{SharedTaskService, TaskBehavior, TaskService},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Task CRUD service.
    pub service: Arc<SharedTaskService>,
    /// Process start time.
    pub started_at: DateTime<Utc>,
    /// Clock for response timestamps.
    pub clock: Arc<dyn Clock + Send + Sync>,
}

impl AppState {
    /// Wraps a service, stamping the start time from its clock.
    #[must_use]
    pub fn new(
        repository: Arc<dyn TaskRepository>,
        clock: Arc<dyn Clock + Send + Sync>,
        behavior: TaskBehavior,
    ) -> Self {
        let started_at = clock.utc();
        let service =
            TaskService::new(repository, Arc::clone(&clock)).with_behavior(behavior);
        Self {
            service: Arc::new(service),
            started_at,
            clock,
        }
    }
}

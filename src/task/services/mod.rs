//! Application services for the task store.

mod tasks;

pub use tasks::{
    CreateTaskRequest, DeleteOutcome, DeletePolicy, ReplaceTaskRequest, SharedTaskService,
    StatusChange, TaskBehavior, TaskService, TaskServiceError, TaskServiceResult,
};

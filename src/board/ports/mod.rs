//! Port contracts for the board client.

pub mod task_api;

pub use task_api::{TaskApi, TaskApiError, TaskApiErrorKind, TaskApiResult};

//! HTTP/JSON surface of the task store.
//!
//! An axum router exposes [`crate::task::services::TaskService`] with
//! request logging, CORS and a JSON error envelope
//! (`{"error": ..., "code": ...}`).

pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;

pub use models::{ApiError, HealthResponse, MessageResponse};
pub use routes::create_router;
pub use server::{connect_store, serve};
pub use state::AppState;

//! Route table and handlers for the task store API.

use super::{
    middleware::{cors_layer, request_logger},
    models::{
        ApiError, CreateTaskBody, HealthResponse, ListParams, MessageResponse, ReplaceTaskBody,
        StatusBody,
    },
    state::AppState,
};
use crate::{
    config::CorsPolicy,
    task::domain::{Task, TaskId},
};
use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    middleware,
    routing::{get, patch, put},
};
use chrono::SecondsFormat;

/// Builds the router with logging and CORS applied.
pub fn create_router(state: AppState, cors: &CorsPolicy) -> Router {
    Router::new()
        .route("/", get(welcome_handler))
        .route("/health", get(health_handler))
        .route("/tasks", get(list_handler).post(create_handler))
        .route("/tasks/:id", put(replace_handler).delete(delete_handler))
        .route("/tasks/:id/status", patch(status_handler))
        .route("/tasks/:id/toggle", patch(toggle_handler))
        .with_state(state)
        .layer(middleware::from_fn(request_logger))
        .layer(cors_layer(cors))
}

/// GET /
async fn welcome_handler() -> Json<MessageResponse> {
    Json(MessageResponse::new("Welcome to CollabTask API"))
}

/// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
        timestamp: state.clock.utc().to_rfc3339_opts(SecondsFormat::Millis, true),
        started_at: state
            .started_at
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// GET /tasks
async fn list_handler(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let Query(list_params) = params?;
    let query = list_params.to_query()?;
    let tasks = state.service.list(&query).await?;
    Ok(Json(tasks))
}

/// POST /tasks
async fn create_handler(
    State(state): State<AppState>,
    body: Result<Json<CreateTaskBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(request) = body?;
    let task = state.service.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /tasks/{id}
async fn replace_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<ReplaceTaskBody>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_id(&raw_id)?;
    let Json(request) = body?;
    let task = state.service.replace(id, request.into()).await?;
    Ok(Json(task))
}

/// PATCH /tasks/{id}/status
async fn status_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<StatusBody>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_id(&raw_id)?;
    let Json(change) = body?;
    let task = state.service.patch_status(id, change.into()).await?;
    Ok(Json(task))
}

/// PATCH /tasks/{id}/toggle
async fn toggle_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_id(&raw_id)?;
    let task = state.service.toggle(id).await?;
    Ok(Json(task))
}

/// DELETE /tasks/{id}
async fn delete_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&raw_id)?;
    state.service.delete(id).await?;
    Ok(Json(MessageResponse::new("Task deleted")))
}

fn parse_id(raw: &str) -> Result<TaskId, ApiError> {
    Ok(raw.parse::<TaskId>()?)
}

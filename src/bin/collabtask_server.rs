//! Runs the task store API.
//!
//! Usage:
//!
//! ```text
//! collabtask_server [--host 0.0.0.0] [--port 5000] [--database-url URL]
//!                   [--cors-origins ORIGINS] [--completion-policy derive]
//!                   [--delete-policy idempotent]
//! ```
//!
//! Every flag falls back to an environment variable of the same name in
//! upper case (`HOST`, `PORT`, `DATABASE_URL`, ...). Without a database URL
//! the server keeps tasks in memory.

use std::sync::Arc;

use clap::Parser;
use collabtask::api::{AppState, connect_store, create_router, serve};
use collabtask::config::ServerArgs;
use mockable::DefaultClock;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerArgs::parse().into_config()?;
    let repository = connect_store(&config).await;
    let state = AppState::new(repository, Arc::new(DefaultClock), config.behavior);
    let behavior = state.service.behavior();
    tracing::info!(
        completion = ?behavior.completion,
        delete = ?behavior.delete,
        "task policies configured"
    );
    let router = create_router(state, &config.cors);

    let listener = TcpListener::bind(config.bind_address()).await?;
    serve(listener, router).await?;
    Ok(())
}

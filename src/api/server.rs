//! Server lifecycle: store connection, binding and graceful shutdown.

use crate::{
    config::AppConfig,
    task::{
        adapters::{
            memory::InMemoryTaskRepository,
            postgres::{PostgresTaskRepository, TaskPgPool},
        },
        ports::TaskRepository,
    },
};
use axum::Router;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Builds the task repository selected by the configuration.
///
/// Without a database URL the in-memory store is used. When the database
/// cannot be reached the failure is logged and an unchecked pool is kept,
/// so the process still serves requests and store calls fail individually.
pub async fn connect_store(config: &AppConfig) -> Arc<dyn TaskRepository> {
    let Some(url) = config.database_url.clone() else {
        warn!("DATABASE_URL not set, tasks are kept in memory and lost on exit");
        return Arc::new(InMemoryTaskRepository::new());
    };

    let repository = PostgresTaskRepository::new(build_pool(url).await);
    match repository.ensure_schema().await {
        Ok(()) => info!("connected to PostgreSQL"),
        Err(err) => error!(error = %err, "PostgreSQL schema setup failed"),
    }
    Arc::new(repository)
}

async fn build_pool(url: String) -> TaskPgPool {
    let checked = tokio::task::spawn_blocking({
        let database_url = url.clone();
        move || {
            Pool::builder()
                .connection_timeout(CONNECT_TIMEOUT)
                .build(ConnectionManager::<PgConnection>::new(database_url))
        }
    })
    .await;

    match checked {
        Ok(Ok(pool)) => pool,
        Ok(Err(err)) => {
            error!(error = %err, "PostgreSQL connection failed");
            unchecked_pool(url)
        }
        Err(err) => {
            error!(error = %err, "PostgreSQL connection task failed");
            unchecked_pool(url)
        }
    }
}

fn unchecked_pool(url: String) -> TaskPgPool {
    Pool::builder()
        .connection_timeout(CONNECT_TIMEOUT)
        .build_unchecked(ConnectionManager::<PgConnection>::new(url))
}

/// Serves the router until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve(listener: TcpListener, router: Router) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "task store API listening");
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    tokio::select! {
        () = wait_for_ctrl_c() => info!("received Ctrl+C"),
        () = wait_for_sigterm() => info!("received SIGTERM"),
    }
}

async fn wait_for_ctrl_c() {
    if let Err(err) = signal::ctrl_c().await {
        warn!(error = %err, "Ctrl+C handler unavailable");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn wait_for_sigterm() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(err) => {
            warn!(error = %err, "SIGTERM handler unavailable");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_sigterm() {
    std::future::pending::<()>().await;
}

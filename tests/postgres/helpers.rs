//! Shared helpers for `PostgreSQL` integration tests.

use collabtask::task::adapters::postgres::{PostgresTaskRepository, TaskPgPool};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use eyre::WrapErr;
use std::env;

/// Variable naming the test database.
pub const DATABASE_URL_ENV: &str = "COLLABTASK_TEST_DATABASE_URL";

/// Connects to the test database and applies the schema.
///
/// Returns `None` when [`DATABASE_URL_ENV`] is unset or blank.
///
/// # Errors
///
/// Returns an error when the database is configured but unreachable or the
/// schema cannot be applied.
pub async fn connected_repository() -> eyre::Result<Option<PostgresTaskRepository>> {
    let Some(url) = env::var(DATABASE_URL_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
    else {
        return Ok(None);
    };

    let pool = tokio::task::spawn_blocking(move || build_pool(url))
        .await
        .wrap_err("join pool builder")??;
    let repository = PostgresTaskRepository::new(pool);
    repository
        .ensure_schema()
        .await
        .wrap_err("apply tasks schema")?;
    Ok(Some(repository))
}

fn build_pool(url: String) -> eyre::Result<TaskPgPool> {
    Pool::builder()
        .max_size(4)
        .build(ConnectionManager::<PgConnection>::new(url))
        .wrap_err("connect to test database")
}

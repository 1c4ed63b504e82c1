//! Repository contract and service flows against `PostgreSQL`.

use std::sync::Arc;

use super::helpers::connected_repository;
use crate::repository_contract::{self as contract, CheckResult};
use collabtask::task::{
    domain::{TaskFilter, TaskQuery, TaskSort, TaskStatus},
    services::{CreateTaskRequest, DeleteOutcome, StatusChange, TaskService},
};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::rstest;
use uuid::Uuid;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stored_tasks_round_trip() -> CheckResult {
    let Some(repository) = connected_repository().await? else {
        return Ok(());
    };
    contract::store_and_find_round_trip(&repository).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn updates_overwrite_and_report_missing() -> CheckResult {
    let Some(repository) = connected_repository().await? else {
        return Ok(());
    };
    contract::update_overwrites_and_reports_missing(&repository).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_reports_removal() -> CheckResult {
    let Some(repository) = connected_repository().await? else {
        return Ok(());
    };
    contract::delete_reports_removal(&repository).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sorts_by_rank_and_due_date() -> CheckResult {
    let Some(repository) = connected_repository().await? else {
        return Ok(());
    };
    contract::sorts_by_rank_and_due_date(&repository).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sorts_text_by_code_point() -> CheckResult {
    let Some(repository) = connected_repository().await? else {
        return Ok(());
    };
    contract::sorts_text_by_code_point(&repository).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn filters_and_literal_search() -> CheckResult {
    let Some(repository) = connected_repository().await? else {
        return Ok(());
    };
    contract::filters_and_literal_search(&repository).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn schema_setup_is_repeatable() -> CheckResult {
    let Some(repository) = connected_repository().await? else {
        return Ok(());
    };
    repository.ensure_schema().await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn service_lifecycle_over_postgres() -> CheckResult {
    let Some(repository) = connected_repository().await? else {
        return Ok(());
    };
    let service = TaskService::new(Arc::new(repository), Arc::new(DefaultClock));
    let token = Uuid::new_v4().simple().to_string();

    let created = service
        .create(CreateTaskRequest::new(format!("{token} lab report"), "Methods section"))
        .await?;
    let moved = service
        .patch_status(created.id(), StatusChange::new(TaskStatus::Completed, Some(2)))
        .await?;
    ensure!(moved.completed(), "derived completion not persisted");
    ensure!(moved.order().value() == 2, "order not persisted");

    let toggled = service.toggle(created.id()).await?;
    ensure!(!toggled.completed(), "toggle not persisted");

    let query = TaskQuery::new(TaskFilter::default().with_search(token), TaskSort::default());
    let listed = service.list(&query).await?;
    ensure!(listed.len() == 1, "expected one tagged task, found {}", listed.len());

    ensure!(
        service.delete(created.id()).await? == DeleteOutcome::Deleted,
        "delete should remove the task"
    );
    ensure!(
        service.delete(created.id()).await? == DeleteOutcome::AlreadyAbsent,
        "repeat delete should be idempotent"
    );
    Ok(())
}

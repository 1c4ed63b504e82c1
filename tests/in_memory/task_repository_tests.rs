//! Repository contract checks for the in-memory adapter.

use crate::repository_contract::{self as contract, CheckResult};
use collabtask::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{NewTask, Task},
    ports::TaskRepository,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn repository() -> InMemoryTaskRepository {
    InMemoryTaskRepository::new()
}

#[rstest]
#[tokio::test]
async fn stored_tasks_round_trip(repository: InMemoryTaskRepository) -> CheckResult {
    contract::store_and_find_round_trip(&repository).await
}

#[rstest]
#[tokio::test]
async fn updates_overwrite_and_report_missing(repository: InMemoryTaskRepository) -> CheckResult {
    contract::update_overwrites_and_reports_missing(&repository).await
}

#[rstest]
#[tokio::test]
async fn delete_reports_removal(repository: InMemoryTaskRepository) -> CheckResult {
    contract::delete_reports_removal(&repository).await
}

#[rstest]
#[tokio::test]
async fn sorts_by_rank_and_due_date(repository: InMemoryTaskRepository) -> CheckResult {
    contract::sorts_by_rank_and_due_date(&repository).await
}

#[rstest]
#[tokio::test]
async fn sorts_text_by_code_point(repository: InMemoryTaskRepository) -> CheckResult {
    contract::sorts_text_by_code_point(&repository).await
}

#[rstest]
#[tokio::test]
async fn filters_and_literal_search(repository: InMemoryTaskRepository) -> CheckResult {
    contract::filters_and_literal_search(&repository).await
}

#[rstest]
#[tokio::test]
async fn clones_share_state(repository: InMemoryTaskRepository) -> CheckResult {
    let clone = repository.clone();
    let task = Task::create(NewTask::new("Shared", "Seen by every clone")?, &DefaultClock);

    clone.store(&task).await?;
    let found = repository.find_by_id(task.id()).await?;
    eyre::ensure!(found == Some(task), "original handle did not see the write");
    Ok(())
}

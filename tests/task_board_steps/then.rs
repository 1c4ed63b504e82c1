//! Then steps for task store BDD scenarios.

use super::world::{TaskWorld, run_async};
use collabtask::task::{
    domain::TaskQuery,
    services::{DeleteOutcome, TaskServiceError},
};
use rstest_bdd_macros::then;

#[then(r#"the task has priority "{priority}", subject "{subject}" and status "{status}""#)]
fn task_has_defaults(
    world: &TaskWorld,
    priority: String,
    subject: String,
    status: String,
) -> Result<(), eyre::Report> {
    let task = world.current()?;
    let actual = (
        task.priority().as_str(),
        task.subject().as_str(),
        task.status().as_str(),
    );
    if actual != (priority.as_str(), subject.as_str(), status.as_str()) {
        return Err(eyre::eyre!(
            "expected ({priority}, {subject}, {status}), found {actual:?}"
        ));
    }
    Ok(())
}

#[then(r#"the task has status "{status}""#)]
fn task_has_status(world: &TaskWorld, status: String) -> Result<(), eyre::Report> {
    let actual = world.current()?.status().as_str();
    if actual != status {
        return Err(eyre::eyre!("expected status {status}, found {actual}"));
    }
    Ok(())
}

#[then("the task is completed")]
fn task_is_completed(world: &TaskWorld) -> Result<(), eyre::Report> {
    if !world.current()?.completed() {
        return Err(eyre::eyre!("expected the task to be completed"));
    }
    Ok(())
}

#[then("the task is not completed")]
fn task_is_not_completed(world: &TaskWorld) -> Result<(), eyre::Report> {
    if world.current()?.completed() {
        return Err(eyre::eyre!("expected the task not to be completed"));
    }
    Ok(())
}

#[then("the task order is {order:u32}")]
fn task_order_is(world: &TaskWorld, order: u32) -> Result<(), eyre::Report> {
    let actual = world.current()?.order().value();
    if actual != order {
        return Err(eyre::eyre!("expected order {order}, found {actual}"));
    }
    Ok(())
}

#[then("listing tasks returns {count:usize} task")]
fn listing_returns(world: &TaskWorld, count: usize) -> Result<(), eyre::Report> {
    let listed = run_async(world.service.list(&TaskQuery::default()))
        .map_err(|err| eyre::eyre!("list failed: {err}"))?;
    if listed.len() != count {
        return Err(eyre::eyre!("expected {count} tasks, found {}", listed.len()));
    }
    Ok(())
}

#[then(r#"the search returns only "{title}""#)]
fn search_returns_only(world: &TaskWorld, title: String) -> Result<(), eyre::Report> {
    let listing = world
        .last_listing
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing search result in scenario world"))?;
    let titles: Vec<&str> = listing.iter().map(|task| task.title()).collect();
    if titles != [title.as_str()] {
        return Err(eyre::eyre!("expected only {title}, found {titles:?}"));
    }
    Ok(())
}

#[then("the delete reports the task was already absent")]
fn delete_already_absent(world: &TaskWorld) -> Result<(), eyre::Report> {
    match world.last_delete {
        Some(DeleteOutcome::AlreadyAbsent) => Ok(()),
        other => Err(eyre::eyre!("expected AlreadyAbsent, found {other:?}")),
    }
}

#[then("the operation fails with not found")]
fn operation_not_found(world: &TaskWorld) -> Result<(), eyre::Report> {
    if !matches!(world.last_error, Some(TaskServiceError::NotFound(_))) {
        return Err(eyre::eyre!(
            "expected a not found error, found {:?}",
            world.last_error
        ));
    }
    Ok(())
}

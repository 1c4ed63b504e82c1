//! When steps for task store BDD scenarios.

use super::world::{TaskWorld, run_async};
use collabtask::task::{
    domain::{Task, TaskFilter, TaskId, TaskQuery, TaskSort, TaskStatus},
    services::{CreateTaskRequest, StatusChange, TaskServiceResult},
};
use eyre::WrapErr;
use rstest_bdd_macros::when;

fn record(world: &mut TaskWorld, result: TaskServiceResult<Task>) {
    match result {
        Ok(task) => {
            world.current_task = Some(task);
            world.last_error = None;
        }
        Err(err) => world.last_error = Some(err),
    }
}

#[when(r#"a task titled "{title}" is created"#)]
fn create_task(world: &mut TaskWorld, title: String) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(title.clone(), title);
    let created = run_async(world.service.create(request)).wrap_err("create task")?;
    world.current_task = Some(created);
    Ok(())
}

#[when(r#"the task is moved to "{label}" at position {order:u32}"#)]
fn move_task(world: &mut TaskWorld, label: String, order: u32) -> Result<(), eyre::Report> {
    let id = world.current()?.id();
    let status = TaskStatus::try_from(label.as_str()).wrap_err("parse status label")?;
    let result = run_async(
        world
            .service
            .patch_status(id, StatusChange::new(status, Some(order))),
    );
    record(world, result);
    Ok(())
}

#[when(r#"an unknown task is moved to "{label}" at position {order:u32}"#)]
fn move_unknown_task(
    world: &mut TaskWorld,
    label: String,
    order: u32,
) -> Result<(), eyre::Report> {
    let status = TaskStatus::try_from(label.as_str()).wrap_err("parse status label")?;
    let result = run_async(
        world
            .service
            .patch_status(TaskId::new(), StatusChange::new(status, Some(order))),
    );
    record(world, result);
    Ok(())
}

#[when("the task completion is toggled")]
fn toggle_task(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    let id = world.current()?.id();
    let result = run_async(world.service.toggle(id));
    record(world, result);
    Ok(())
}

#[when(r#"tasks are searched for "{text}""#)]
fn search_tasks(world: &mut TaskWorld, text: String) -> Result<(), eyre::Report> {
    let query = TaskQuery::new(TaskFilter::default().with_search(text), TaskSort::default());
    let listing = run_async(world.service.list(&query)).wrap_err("search tasks")?;
    world.last_listing = Some(listing);
    Ok(())
}

#[when("an unknown task is deleted")]
fn delete_unknown_task(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    let outcome = run_async(world.service.delete(TaskId::new())).wrap_err("delete task")?;
    world.last_delete = Some(outcome);
    Ok(())
}

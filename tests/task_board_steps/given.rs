//! Given steps for task store BDD scenarios.

use super::world::{TaskWorld, run_async};
use collabtask::task::services::CreateTaskRequest;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("an empty task store")]
fn empty_task_store(world: &mut TaskWorld) {
    world.current_task = None;
}

#[given(r#"a stored task titled "{title}""#)]
fn stored_task(world: &mut TaskWorld, title: String) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(title.clone(), format!("{title} notes"));
    let created = run_async(world.service.create(request))
        .wrap_err_with(|| format!("create task '{title}'"))?;
    world.current_task = Some(created);
    Ok(())
}

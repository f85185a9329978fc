//! When steps for assignment policy scenarios.

use super::world::{AssignmentWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#"task "{name}" is assigned"#)]
fn task_is_assigned(world: &mut AssignmentWorld, name: String) -> Result<(), eyre::Report> {
    let task_id = world.task(&name)?.id();
    world.last_result = Some(run_async(world.assigner.assign(task_id)));
    Ok(())
}

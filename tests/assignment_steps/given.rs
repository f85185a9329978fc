//! Given steps for assignment policy scenarios.

use super::world::{AssignmentWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use task_tracker::{
    employee::services::CreateEmployeeRequest, task::services::CreateTaskRequest,
};

#[given(r#"employee "{label}" carrying {count:u64} tasks"#)]
fn employee_carrying_tasks(
    world: &mut AssignmentWorld,
    label: String,
    count: u64,
) -> Result<(), eyre::Report> {
    let employee = run_async(world.directory.create(CreateEmployeeRequest::new(
        format!("{label}@example.com"),
        "Volkov",
        label.clone(),
    )))
    .wrap_err("hire scenario employee")?;

    for index in 0..count {
        run_async(
            world.registry.create(
                CreateTaskRequest::new(format!("{label} backlog {index}"), "filler")
                    .with_employee(employee.id()),
            ),
        )
        .wrap_err("load scenario employee")?;
    }
    world.employees.insert(label, employee);
    Ok(())
}

#[given(r#"a parent task "{name}" assigned to "{label}""#)]
fn parent_task_assigned_to(
    world: &mut AssignmentWorld,
    name: String,
    label: String,
) -> Result<(), eyre::Report> {
    let owner = world.employee(&label)?.id();
    let task = run_async(
        world
            .registry
            .create(CreateTaskRequest::new(name.clone(), "parent").with_employee(owner)),
    )
    .wrap_err("create parent task")?;
    world.tasks.insert(name, task);
    Ok(())
}

#[given(r#"a child task "{name}" of "{parent}""#)]
fn child_task_of(
    world: &mut AssignmentWorld,
    name: String,
    parent: String,
) -> Result<(), eyre::Report> {
    let parent_id = world.task(&parent)?.id();
    let task = run_async(
        world
            .registry
            .create(CreateTaskRequest::new(name.clone(), "child").with_parent(parent_id)),
    )
    .wrap_err("create child task")?;
    world.tasks.insert(name, task);
    Ok(())
}

#[given(r#"an unassigned task "{name}""#)]
fn unassigned_task(world: &mut AssignmentWorld, name: String) -> Result<(), eyre::Report> {
    let task = run_async(world.registry.create(CreateTaskRequest::new(name.clone(), "loose")))
        .wrap_err("create unassigned task")?;
    world.tasks.insert(name, task);
    Ok(())
}

//! Constraint violations surfaced as port errors.

use crate::postgres::helpers::postgres_store;
use crate::test_helpers::{employee, plain_task, task};
use rstest::rstest;
use task_tracker::{
    employee::{
        domain::EmployeeId,
        ports::{EmployeeRepository, EmployeeRepositoryError},
    },
    task::{
        domain::TaskId,
        ports::{TaskRepository, TaskRepositoryError},
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a Docker daemon"]
async fn duplicate_email_and_name_are_reported() {
    let db = postgres_store().await.expect("postgres fixture");
    EmployeeRepository::store(&db.store, &employee("same@example.com").expect("employee"))
        .await
        .expect("first employee");
    TaskRepository::store(&db.store, &plain_task("Same").expect("task"))
        .await
        .expect("first task");

    let email_clash =
        EmployeeRepository::store(&db.store, &employee("same@example.com").expect("employee"))
            .await;
    let name_clash = TaskRepository::store(&db.store, &plain_task("Same").expect("task")).await;

    assert!(matches!(
        email_clash,
        Err(EmployeeRepositoryError::DuplicateEmail(_))
    ));
    assert!(matches!(
        name_clash,
        Err(TaskRepositoryError::DuplicateName(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a Docker daemon"]
async fn dangling_references_are_reported() {
    let db = postgres_store().await.expect("postgres fixture");
    let ghost_parent = TaskId::new();
    let ghost_employee = EmployeeId::new();

    let orphan = TaskRepository::store(
        &db.store,
        &task("Orphan", |draft| draft.with_parent(ghost_parent)).expect("task"),
    )
    .await;
    let unowned = TaskRepository::store(
        &db.store,
        &task("Unowned", |draft| draft.with_employee(ghost_employee)).expect("task"),
    )
    .await;

    assert!(matches!(
        orphan,
        Err(TaskRepositoryError::ParentNotFound(id)) if id == ghost_parent
    ));
    assert!(matches!(
        unowned,
        Err(TaskRepositoryError::EmployeeNotFound(id)) if id == ghost_employee
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a Docker daemon"]
async fn missing_rows_are_not_found() {
    let db = postgres_store().await.expect("postgres fixture");
    let unsaved_employee = employee("ghost@example.com").expect("employee");
    let unsaved_task = plain_task("Ghost").expect("task");

    assert!(matches!(
        EmployeeRepository::update(&db.store, &unsaved_employee).await,
        Err(EmployeeRepositoryError::NotFound(_))
    ));
    assert!(matches!(
        EmployeeRepository::delete(&db.store, unsaved_employee.id()).await,
        Err(EmployeeRepositoryError::NotFound(_))
    ));
    assert!(matches!(
        TaskRepository::update(&db.store, &unsaved_task).await,
        Err(TaskRepositoryError::NotFound(_))
    ));
    assert!(matches!(
        TaskRepository::delete(&db.store, unsaved_task.id()).await,
        Err(TaskRepositoryError::NotFound(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a Docker daemon"]
async fn employee_with_tasks_cannot_be_deleted() {
    let db = postgres_store().await.expect("postgres fixture");
    let holder = employee("holder@example.com").expect("employee");
    EmployeeRepository::store(&db.store, &holder)
        .await
        .expect("store holder");
    for name in ["First", "Second"] {
        TaskRepository::store(
            &db.store,
            &task(name, |draft| draft.with_employee(holder.id())).expect("task"),
        )
        .await
        .expect("store task");
    }

    let result = EmployeeRepository::delete(&db.store, holder.id()).await;

    assert!(matches!(
        result,
        Err(EmployeeRepositoryError::HasAssignedTasks { id, task_count: 2 }) if id == holder.id()
    ));
}

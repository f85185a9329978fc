//! Locked assignment transactions over `PostgreSQL`.

use crate::postgres::helpers::postgres_store;
use crate::test_helpers::{employee, plain_task, task};
use chrono::Utc;
use rstest::rstest;
use task_tracker::{
    assignment::{
        domain::{AssignmentPolicy, AssignmentPolicyError, SelectionReason},
        ports::{AssignmentRepository, AssignmentRepositoryError},
    },
    employee::ports::EmployeeRepository,
    task::{
        domain::{TaskId, TaskStatus},
        ports::TaskRepository,
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a Docker daemon"]
async fn assignment_follows_parent_and_persists() {
    let db = postgres_store().await.expect("postgres fixture");
    let owner = employee("owner@example.com").expect("employee");
    let other = employee("other@example.com").expect("employee");
    EmployeeRepository::store(&db.store, &owner)
        .await
        .expect("store owner");
    EmployeeRepository::store(&db.store, &other)
        .await
        .expect("store other");
    let parent = task("Parent", |draft| draft.with_employee(owner.id())).expect("task");
    let sibling = task("Sibling", |draft| draft.with_employee(other.id())).expect("task");
    let child = task("Child", |draft| draft.with_parent(parent.id())).expect("task");
    for record in [&parent, &sibling, &child] {
        TaskRepository::store(&db.store, record)
            .await
            .expect("store task");
    }

    let assignment = db
        .store
        .assign_task(child.id(), AssignmentPolicy::default(), Utc::now())
        .await
        .expect("assignment should succeed");

    assert_eq!(assignment.selection().employee_id(), owner.id());
    assert_eq!(
        assignment.selection().reason(),
        SelectionReason::ParentAffinity
    );
    let stored = TaskRepository::find_by_id(&db.store, child.id())
        .await
        .expect("lookup")
        .expect("task should exist");
    assert_eq!(stored.employee_id(), Some(owner.id()));
    assert_eq!(stored.status(), TaskStatus::InProgress);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a Docker daemon"]
async fn failed_assignment_leaves_rows_untouched() {
    let db = postgres_store().await.expect("postgres fixture");
    let pending = plain_task("Pending").expect("task");
    TaskRepository::store(&db.store, &pending)
        .await
        .expect("store task");

    let no_staff = db
        .store
        .assign_task(pending.id(), AssignmentPolicy::default(), Utc::now())
        .await;
    let missing = db
        .store
        .assign_task(TaskId::new(), AssignmentPolicy::default(), Utc::now())
        .await;

    assert!(matches!(
        no_staff,
        Err(AssignmentRepositoryError::Policy(
            AssignmentPolicyError::NoEmployees
        ))
    ));
    assert!(matches!(
        missing,
        Err(AssignmentRepositoryError::TaskNotFound(_))
    ));
    let stored = TaskRepository::find_by_id(&db.store, pending.id())
        .await
        .expect("lookup");
    assert_eq!(stored, Some(pending));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a Docker daemon"]
async fn concurrent_assignments_balance_load() {
    let db = postgres_store().await.expect("postgres fixture");
    for email in ["first@example.com", "second@example.com"] {
        EmployeeRepository::store(&db.store, &employee(email).expect("employee"))
            .await
            .expect("store employee");
    }
    let mut handles = Vec::new();
    for index in 0..6 {
        let record = plain_task(&format!("Parallel {index}")).expect("task");
        TaskRepository::store(&db.store, &record)
            .await
            .expect("store task");
        let store = db.store.clone();
        handles.push(tokio::spawn(async move {
            store
                .assign_task(record.id(), AssignmentPolicy::default(), Utc::now())
                .await
        }));
    }
    for handle in handles {
        handle
            .await
            .expect("join")
            .expect("assignment should succeed");
    }

    let workloads = db.store.list_workloads().await.expect("workloads");
    assert!(workloads.iter().all(|workload| workload.load() == 3));
}

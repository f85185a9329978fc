//! Assignment port behaviour of [`InMemoryTrackerStore`].

use crate::in_memory::helpers::{runtime, store};
use crate::test_helpers::{employee, plain_task, task};
use chrono::Utc;
use rstest::rstest;
use std::io;
use task_tracker::{
    adapters::memory::InMemoryTrackerStore,
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
use tokio::runtime::Runtime;

/// The chosen employee and the promoted status are persisted.
#[rstest]
fn assignment_persists_task(runtime: io::Result<Runtime>, store: InMemoryTrackerStore) {
    let rt = runtime.expect("runtime creation");
    let worker = employee("worker@example.com").expect("employee");
    rt.block_on(EmployeeRepository::store(&store, &worker))
        .expect("store worker");
    let pending = plain_task("Pending").expect("task");
    rt.block_on(TaskRepository::store(&store, &pending))
        .expect("store task");

    let assignment = rt
        .block_on(store.assign_task(pending.id(), AssignmentPolicy::default(), Utc::now()))
        .expect("assignment");

    let stored = rt
        .block_on(TaskRepository::find_by_id(&store, pending.id()))
        .expect("lookup")
        .expect("task should exist");
    assert_eq!(assignment.selection().employee_id(), worker.id());
    assert_eq!(&stored, assignment.task());
    assert_eq!(stored.employee_id(), Some(worker.id()));
    assert_eq!(stored.status(), TaskStatus::InProgress);
}

/// Failed assignments leave the task untouched.
#[rstest]
fn failed_assignment_writes_nothing(runtime: io::Result<Runtime>, store: InMemoryTrackerStore) {
    let rt = runtime.expect("runtime creation");
    let pending = plain_task("Pending").expect("task");
    rt.block_on(TaskRepository::store(&store, &pending))
        .expect("store task");

    let no_staff =
        rt.block_on(store.assign_task(pending.id(), AssignmentPolicy::default(), Utc::now()));
    let missing =
        rt.block_on(store.assign_task(TaskId::new(), AssignmentPolicy::default(), Utc::now()));

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
    let stored = rt
        .block_on(TaskRepository::find_by_id(&store, pending.id()))
        .expect("lookup");
    assert_eq!(stored, Some(pending));
}

/// The parent's assignee is read from the same state as the loads.
#[rstest]
fn assignment_sees_parent_assignee(runtime: io::Result<Runtime>, store: InMemoryTrackerStore) {
    let rt = runtime.expect("runtime creation");
    let owner = employee("owner@example.com").expect("employee");
    let other = employee("other@example.com").expect("employee");
    rt.block_on(EmployeeRepository::store(&store, &owner))
        .expect("store owner");
    rt.block_on(EmployeeRepository::store(&store, &other))
        .expect("store other");
    let parent = task("Parent", |draft| draft.with_employee(owner.id())).expect("task");
    let sibling = task("Sibling", |draft| draft.with_employee(other.id())).expect("task");
    let child = task("Child", |draft| draft.with_parent(parent.id())).expect("task");
    for record in [&parent, &sibling, &child] {
        rt.block_on(TaskRepository::store(&store, record))
            .expect("store task");
    }

    let assignment = rt
        .block_on(store.assign_task(child.id(), AssignmentPolicy::default(), Utc::now()))
        .expect("assignment");

    assert_eq!(assignment.selection().employee_id(), owner.id());
    assert_eq!(
        assignment.selection().reason(),
        SelectionReason::ParentAffinity
    );
}

/// Parallel assignments never see the same loads.
#[rstest]
fn concurrent_assignments_are_serialized(store: InMemoryTrackerStore) {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .expect("runtime creation");
    let first = employee("first@example.com").expect("employee");
    let second = employee("second@example.com").expect("employee");
    rt.block_on(EmployeeRepository::store(&store, &first))
        .expect("store first");
    rt.block_on(EmployeeRepository::store(&store, &second))
        .expect("store second");
    let tasks: Vec<_> = (0..4)
        .map(|index| plain_task(&format!("Parallel {index}")).expect("task"))
        .collect();
    for record in &tasks {
        rt.block_on(TaskRepository::store(&store, record))
            .expect("store task");
    }

    let handles: Vec<_> = tasks
        .iter()
        .map(|record| {
            let shared = store.clone();
            let task_id = record.id();
            rt.spawn(async move {
                shared
                    .assign_task(task_id, AssignmentPolicy::default(), Utc::now())
                    .await
            })
        })
        .collect();
    for handle in handles {
        rt.block_on(handle)
            .expect("join")
            .expect("assignment");
    }

    let workloads = rt
        .block_on(store.list_workloads())
        .expect("workload listing");
    assert!(workloads.iter().all(|workload| workload.load() == 2));
}

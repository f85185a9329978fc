//! Employee port behaviour of [`InMemoryTrackerStore`].

use crate::in_memory::helpers::{runtime, store};
use crate::test_helpers::{employee, task};
use mockable::DefaultClock;
use rstest::rstest;
use std::io;
use task_tracker::{
    adapters::memory::InMemoryTrackerStore,
    employee::{
        domain::{EmailAddress, EmployeeChanges},
        ports::{EmployeeRepository, EmployeeRepositoryError},
    },
    task::ports::TaskRepository,
};
use tokio::runtime::Runtime;

/// A changed email frees the old address for someone else.
#[rstest]
fn email_change_releases_previous_address(
    runtime: io::Result<Runtime>,
    store: InMemoryTrackerStore,
) {
    let rt = runtime.expect("runtime creation");
    let mut first = employee("old@example.com").expect("first employee");
    rt.block_on(EmployeeRepository::store(&store, &first)).expect("store first");

    first.apply(
        EmployeeChanges {
            email: Some(EmailAddress::new("new@example.com").expect("valid email")),
            ..EmployeeChanges::default()
        },
        &DefaultClock,
    );
    rt.block_on(EmployeeRepository::update(&store, &first))
        .expect("update first");

    let second = employee("old@example.com").expect("second employee");
    rt.block_on(EmployeeRepository::store(&store, &second))
        .expect("old address should be reusable");
    let clash = employee("new@example.com").expect("clashing employee");
    let result = rt.block_on(EmployeeRepository::store(&store, &clash));
    assert!(
        matches!(result, Err(EmployeeRepositoryError::DuplicateEmail(_))),
        "new address should now be taken"
    );
}

/// Email uniqueness ignores the case of the domain part.
#[rstest]
fn email_uniqueness_ignores_domain_case(runtime: io::Result<Runtime>, store: InMemoryTrackerStore) {
    let rt = runtime.expect("runtime creation");
    rt.block_on(EmployeeRepository::store(&store, &employee("case@Example.COM").expect("employee")))
        .expect("store first");

    let result = rt.block_on(EmployeeRepository::store(&store, &employee("case@example.com").expect("employee")));

    assert!(matches!(
        result,
        Err(EmployeeRepositoryError::DuplicateEmail(_))
    ));
}

/// Workloads count only tasks assigned to each employee.
#[rstest]
fn workloads_count_assigned_tasks(runtime: io::Result<Runtime>, store: InMemoryTrackerStore) {
    let rt = runtime.expect("runtime creation");
    let busy = employee("busy@example.com").expect("busy");
    let idle = employee("idle@example.com").expect("idle");
    rt.block_on(EmployeeRepository::store(&store, &busy)).expect("store busy");
    rt.block_on(EmployeeRepository::store(&store, &idle)).expect("store idle");
    for name in ["One", "Two"] {
        let assigned = task(name, |draft| draft.with_employee(busy.id())).expect("task");
        rt.block_on(TaskRepository::store(&store, &assigned))
            .expect("store task");
    }
    rt.block_on(TaskRepository::store(
        &store,
        &task("Loose", |draft| draft).expect("task"),
    ))
    .expect("store loose task");

    let workloads = rt
        .block_on(store.list_workloads())
        .expect("workload listing");

    let load_of = |id| {
        workloads
            .iter()
            .find(|workload| workload.employee().id() == id)
            .map(|workload| workload.load())
    };
    assert_eq!(workloads.len(), 2);
    assert_eq!(load_of(busy.id()), Some(2));
    assert_eq!(load_of(idle.id()), Some(0));
}

/// An employee holding tasks cannot be deleted; one without tasks can.
#[rstest]
fn delete_is_guarded_by_assigned_tasks(runtime: io::Result<Runtime>, store: InMemoryTrackerStore) {
    let rt = runtime.expect("runtime creation");
    let holder = employee("holder@example.com").expect("holder");
    rt.block_on(EmployeeRepository::store(&store, &holder)).expect("store holder");
    let held = task("Held", |draft| draft.with_employee(holder.id())).expect("task");
    rt.block_on(TaskRepository::store(&store, &held))
        .expect("store task");

    let refused = rt.block_on(EmployeeRepository::delete(&store, holder.id()));
    assert!(matches!(
        refused,
        Err(EmployeeRepositoryError::HasAssignedTasks { id, task_count: 1 }) if id == holder.id()
    ));

    rt.block_on(TaskRepository::delete(&store, held.id()))
        .expect("delete task");
    rt.block_on(EmployeeRepository::delete(&store, holder.id()))
        .expect("delete should succeed once free");
    let found = rt
        .block_on(EmployeeRepository::find_by_id(&store, holder.id()))
        .expect("lookup");
    assert!(found.is_none());
}

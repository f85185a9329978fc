//! Task port behaviour of [`InMemoryTrackerStore`].

use crate::in_memory::helpers::{runtime, store};
use crate::test_helpers::{employee, plain_task, task};
use mockable::DefaultClock;
use rstest::rstest;
use std::io;
use task_tracker::{
    adapters::memory::InMemoryTrackerStore,
    employee::{domain::EmployeeId, ports::EmployeeRepository},
    task::{
        domain::{PageRequest, TaskChanges, TaskId, TaskName, TaskStatus},
        ports::{TaskRepository, TaskRepositoryError},
    },
    update_value::UpdateValue,
};
use tokio::runtime::Runtime;

/// Renaming a task frees its old name.
#[rstest]
fn rename_releases_previous_name(runtime: io::Result<Runtime>, store: InMemoryTrackerStore) {
    let rt = runtime.expect("runtime creation");
    let mut original = plain_task("Draft").expect("task");
    rt.block_on(TaskRepository::store(&store, &original))
        .expect("store original");

    original
        .apply(
            TaskChanges {
                name: Some(TaskName::new("Final").expect("valid name")),
                ..TaskChanges::default()
            },
            &DefaultClock,
        )
        .expect("rename");
    rt.block_on(TaskRepository::update(&store, &original))
        .expect("update original");

    rt.block_on(TaskRepository::store(
        &store,
        &plain_task("Draft").expect("task"),
    ))
    .expect("old name should be reusable");
    let clash = rt.block_on(TaskRepository::store(
        &store,
        &plain_task("Final").expect("task"),
    ));
    assert!(matches!(clash, Err(TaskRepositoryError::DuplicateName(_))));
}

/// Dangling parent and employee references are rejected.
#[rstest]
fn dangling_references_are_rejected(runtime: io::Result<Runtime>, store: InMemoryTrackerStore) {
    let rt = runtime.expect("runtime creation");
    let ghost_parent = TaskId::new();
    let ghost_employee = EmployeeId::new();

    let orphan = task("Orphan", |draft| draft.with_parent(ghost_parent)).expect("task");
    let unowned = task("Unowned", |draft| draft.with_employee(ghost_employee)).expect("task");

    assert!(matches!(
        rt.block_on(TaskRepository::store(&store, &orphan)),
        Err(TaskRepositoryError::ParentNotFound(id)) if id == ghost_parent
    ));
    assert!(matches!(
        rt.block_on(TaskRepository::store(&store, &unowned)),
        Err(TaskRepositoryError::EmployeeNotFound(id)) if id == ghost_employee
    ));
}

/// Deleting a parent keeps its children and clears their parent link.
#[rstest]
fn delete_detaches_children(runtime: io::Result<Runtime>, store: InMemoryTrackerStore) {
    let rt = runtime.expect("runtime creation");
    let parent = plain_task("Parent").expect("task");
    let child = task("Child", |draft| draft.with_parent(parent.id())).expect("task");
    rt.block_on(TaskRepository::store(&store, &parent))
        .expect("store parent");
    rt.block_on(TaskRepository::store(&store, &child))
        .expect("store child");

    rt.block_on(TaskRepository::delete(&store, parent.id()))
        .expect("delete parent");

    let survivor = rt
        .block_on(TaskRepository::find_by_id(&store, child.id()))
        .expect("lookup")
        .expect("child should remain");
    assert_eq!(survivor.parent_id(), None);
}

/// The important view filters before paginating.
#[rstest]
fn important_view_paginates_filtered_rows(
    runtime: io::Result<Runtime>,
    store: InMemoryTrackerStore,
) {
    let rt = runtime.expect("runtime creation");
    let started = task("Started", |draft| draft.with_status(TaskStatus::InProgress)).expect("task");
    rt.block_on(TaskRepository::store(&store, &started))
        .expect("store started");
    for index in 0..3 {
        let noise = plain_task(&format!("Noise {index}")).expect("task");
        rt.block_on(TaskRepository::store(&store, &noise))
            .expect("store noise");
        let blocked = task(&format!("Blocked {index}"), |draft| {
            draft.with_parent(started.id())
        })
        .expect("task");
        rt.block_on(TaskRepository::store(&store, &blocked))
            .expect("store blocked");
    }

    let first = rt
        .block_on(store.list_important(PageRequest::new(2, 1).expect("page")))
        .expect("first page");
    let second = rt
        .block_on(store.list_important(PageRequest::new(2, 2).expect("page")))
        .expect("second page");

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 1);
    assert!(
        first
            .iter()
            .chain(&second)
            .all(|task| task.parent_id() == Some(started.id()))
    );
}

/// Only tasks with an assignee appear in the assigned listing.
#[rstest]
fn assigned_listing_skips_unowned_tasks(runtime: io::Result<Runtime>, store: InMemoryTrackerStore) {
    let rt = runtime.expect("runtime creation");
    let owner = employee("owner@example.com").expect("employee");
    rt.block_on(EmployeeRepository::store(&store, &owner))
        .expect("store owner");
    let owned = task("Owned", |draft| draft.with_employee(owner.id())).expect("task");
    rt.block_on(TaskRepository::store(&store, &owned))
        .expect("store owned");
    rt.block_on(TaskRepository::store(
        &store,
        &plain_task("Unowned").expect("task"),
    ))
    .expect("store unowned");

    let assigned = rt.block_on(store.list_assigned()).expect("listing");

    assert_eq!(assigned, vec![owned]);
}

/// Pages far beyond the data are empty rather than an error.
#[rstest]
fn far_pages_are_empty(runtime: io::Result<Runtime>, store: InMemoryTrackerStore) {
    let rt = runtime.expect("runtime creation");
    rt.block_on(TaskRepository::store(
        &store,
        &plain_task("Only").expect("task"),
    ))
    .expect("store task");
    let far = PageRequest::new(u32::MAX, u32::MAX).expect("page");

    assert!(rt.block_on(store.list(far)).expect("listing").is_empty());
    assert!(rt.block_on(store.list_open(far)).expect("listing").is_empty());
    assert!(rt.block_on(store.list_important(far)).expect("listing").is_empty());
}

/// Long and space-padded names are stored exactly as given.
#[rstest]
fn names_are_kept_verbatim(runtime: io::Result<Runtime>, store: InMemoryTrackerStore) {
    let rt = runtime.expect("runtime creation");
    let padded = plain_task(" Epic ").expect("task");
    let long = plain_task(&"n".repeat(300)).expect("task");
    for record in [&padded, &long] {
        rt.block_on(TaskRepository::store(&store, record))
            .expect("store task");
    }

    for record in [&padded, &long] {
        let loaded = rt
            .block_on(TaskRepository::find_by_id(&store, record.id()))
            .expect("lookup")
            .expect("task should exist");
        assert_eq!(loaded.name(), record.name());
    }
}

/// Placing a task under its own descendant is refused and nothing changes.
#[rstest]
fn parent_loops_are_rejected(runtime: io::Result<Runtime>, store: InMemoryTrackerStore) {
    let rt = runtime.expect("runtime creation");
    let mut root = plain_task("Root").expect("task");
    let child = task("Child", |draft| draft.with_parent(root.id())).expect("task");
    let grandchild = task("Grandchild", |draft| draft.with_parent(child.id())).expect("task");
    for record in [&root, &child, &grandchild] {
        rt.block_on(TaskRepository::store(&store, record))
            .expect("store task");
    }

    root.apply(
        TaskChanges {
            parent_id: UpdateValue::Set(grandchild.id()),
            ..TaskChanges::default()
        },
        &DefaultClock,
    )
    .expect("single-step change is valid");
    let result = rt.block_on(TaskRepository::update(&store, &root));

    assert!(matches!(
        result,
        Err(TaskRepositoryError::ParentCycle { task: moved, parent: target })
            if moved == root.id() && target == grandchild.id()
    ));
    let stored = rt
        .block_on(TaskRepository::find_by_id(&store, root.id()))
        .expect("lookup")
        .expect("root should exist");
    assert_eq!(stored.parent_id(), None);
}

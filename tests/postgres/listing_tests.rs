//! Filtered and paginated views over `PostgreSQL`.

use crate::postgres::helpers::postgres_store;
use crate::test_helpers::{employee, plain_task, task};
use rstest::rstest;
use task_tracker::{
    employee::ports::EmployeeRepository,
    task::{
        domain::{PageRequest, Task, TaskId, TaskStatus},
        ports::TaskRepository,
    },
};

fn ids(tasks: &[Task]) -> Vec<TaskId> {
    tasks.iter().map(Task::id).collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a Docker daemon"]
async fn list_pages_follow_creation_order() {
    let db = postgres_store().await.expect("postgres fixture");
    for index in 0..5 {
        let record = plain_task(&format!("Task {index}")).expect("task");
        TaskRepository::store(&db.store, &record)
            .await
            .expect("store task");
    }

    let everything = db
        .store
        .list(PageRequest::new(10, 1).expect("page"))
        .await
        .expect("listing");
    let second = db
        .store
        .list(PageRequest::new(2, 2).expect("page"))
        .await
        .expect("listing");
    let beyond = db
        .store
        .list(PageRequest::new(2, 4).expect("page"))
        .await
        .expect("listing");

    assert_eq!(everything.len(), 5);
    assert_eq!(ids(&second), ids(everything.get(2..4).expect("five tasks")));
    assert!(beyond.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a Docker daemon"]
async fn far_pages_are_empty() {
    let db = postgres_store().await.expect("postgres fixture");
    let record = plain_task("Only").expect("task");
    TaskRepository::store(&db.store, &record)
        .await
        .expect("store task");
    let far = PageRequest::new(u32::MAX, u32::MAX).expect("page");

    assert!(db.store.list(far).await.expect("listing").is_empty());
    assert!(db.store.list_open(far).await.expect("listing").is_empty());
    assert!(db.store.list_important(far).await.expect("listing").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a Docker daemon"]
async fn open_and_important_views_filter_before_paging() {
    let db = postgres_store().await.expect("postgres fixture");
    let started = task("Started", |draft| draft.with_status(TaskStatus::InProgress)).expect("task");
    let idle = plain_task("Idle").expect("task");
    TaskRepository::store(&db.store, &started)
        .await
        .expect("store started");
    TaskRepository::store(&db.store, &idle)
        .await
        .expect("store idle");
    for index in 0..3 {
        let blocked =
            task(&format!("Blocked {index}"), |draft| draft.with_parent(started.id())).expect("task");
        TaskRepository::store(&db.store, &blocked)
            .await
            .expect("store blocked");
    }
    let waiting = task("Waiting", |draft| draft.with_parent(idle.id())).expect("task");
    TaskRepository::store(&db.store, &waiting)
        .await
        .expect("store waiting");

    let important_first = db
        .store
        .list_important(PageRequest::new(2, 1).expect("page"))
        .await
        .expect("listing");
    let important_second = db
        .store
        .list_important(PageRequest::new(2, 2).expect("page"))
        .await
        .expect("listing");
    let open = db
        .store
        .list_open(PageRequest::new(10, 1).expect("page"))
        .await
        .expect("listing");

    assert_eq!(important_first.len(), 2);
    assert_eq!(important_second.len(), 1);
    assert!(
        important_first
            .iter()
            .chain(&important_second)
            .all(|record| record.parent_id() == Some(started.id()))
    );
    assert_eq!(open.len(), 5);
    assert!(open.iter().all(|record| record.status() == TaskStatus::Open));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a Docker daemon"]
async fn workloads_and_assigned_tasks_agree() {
    let db = postgres_store().await.expect("postgres fixture");
    let busy = employee("busy@example.com").expect("employee");
    let idle = employee("idle@example.com").expect("employee");
    EmployeeRepository::store(&db.store, &busy)
        .await
        .expect("store busy");
    EmployeeRepository::store(&db.store, &idle)
        .await
        .expect("store idle");
    for name in ["One", "Two", "Three"] {
        TaskRepository::store(
            &db.store,
            &task(name, |draft| draft.with_employee(busy.id())).expect("task"),
        )
        .await
        .expect("store task");
    }
    TaskRepository::store(&db.store, &plain_task("Loose").expect("task"))
        .await
        .expect("store loose");

    let workloads = db.store.list_workloads().await.expect("workloads");
    let assigned = db.store.list_assigned().await.expect("assigned");

    let load_of = |id| {
        workloads
            .iter()
            .find(|workload| workload.employee().id() == id)
            .map(|workload| workload.load())
    };
    assert_eq!(load_of(busy.id()), Some(3));
    assert_eq!(load_of(idle.id()), Some(0));
    assert_eq!(assigned.len(), 3);
    assert!(
        assigned
            .iter()
            .all(|record| record.employee_id() == Some(busy.id()))
    );
}

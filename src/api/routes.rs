//! Router and shared handler state.

use super::handlers::{employees, overview, tasks};
use crate::assignment::{
    domain::AssignmentPolicy, ports::AssignmentRepository, services::AssignmentService,
};
use crate::employee::{ports::EmployeeRepository, services::EmployeeDirectoryService};
use crate::task::{ports::TaskRepository, services::TaskRegistryService};
use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use mockable::DefaultClock;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Employee directory used by the handlers.
pub type EmployeeDirectory = EmployeeDirectoryService<dyn EmployeeRepository, DefaultClock>;

/// Task registry used by the handlers.
pub type TaskRegistry = TaskRegistryService<dyn TaskRepository, DefaultClock>;

/// Assignment service used by the handlers.
pub type Assigner = AssignmentService<dyn AssignmentRepository, DefaultClock>;

/// Services shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Employee CRUD and workload queries.
    pub employees: EmployeeDirectory,
    /// Task CRUD and listings.
    pub tasks: TaskRegistry,
    /// Assignment policy runner.
    pub assignments: Assigner,
}

impl AppState {
    /// Builds the services over one store implementing every port.
    #[must_use]
    pub fn from_store<S>(store: Arc<S>, policy: AssignmentPolicy) -> Self
    where
        S: EmployeeRepository + TaskRepository + AssignmentRepository + 'static,
    {
        let clock = Arc::new(DefaultClock);
        let employee_repository: Arc<dyn EmployeeRepository> = store.clone();
        let task_repository: Arc<dyn TaskRepository> = store.clone();
        let assignment_repository: Arc<dyn AssignmentRepository> = store;

        Self {
            employees: EmployeeDirectoryService::new(employee_repository, Arc::clone(&clock)),
            tasks: TaskRegistryService::new(task_repository, Arc::clone(&clock)),
            assignments: AssignmentService::new(assignment_repository, clock, policy),
        }
    }
}

/// Builds the HTTP router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(overview::workload_overview))
        .route("/health", get(overview::health))
        .route("/employees/", get(employees::list))
        .route("/employees/get/{id}", get(employees::get))
        .route("/employees/create", post(employees::create))
        .route("/employees/update/{id}", patch(employees::update))
        .route("/employees/del/{id}", delete(employees::remove))
        .route("/employees/busy", get(employees::busy))
        .route("/employees/free", get(employees::free))
        .route("/tasks/", get(tasks::list))
        .route("/tasks/get/{id}", get(tasks::get))
        .route("/tasks/create/", post(tasks::create))
        .route("/tasks/update/{id}", patch(tasks::update))
        .route("/tasks/del/{id}", delete(tasks::remove))
        .route("/tasks/important", get(tasks::important))
        .route("/tasks/free", get(tasks::free))
        .route("/tasks/set_employee/{id}", patch(tasks::set_employee))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

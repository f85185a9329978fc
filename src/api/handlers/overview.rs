//! Workload overview and liveness probe.

use crate::api::{
    ApiError, AppState,
    response::{EmployeeList, Success, WorkloadEntry},
};
use crate::employee::domain::EmployeeId;
use crate::task::domain::Task;
use axum::{Json, extract::State};
use serde_json::{Value, json};
use std::collections::HashMap;

/// `GET /`
///
/// Every employee with its load and assigned tasks, busiest first.
///
/// # Errors
///
/// Returns [`ApiError::Internal`] when workloads or tasks cannot be read.
pub async fn workload_overview(
    State(state): State<AppState>,
) -> Result<Success<EmployeeList<WorkloadEntry>>, ApiError> {
    let workloads = state.employees.workloads().await?;
    let mut by_employee: HashMap<EmployeeId, Vec<Task>> = HashMap::new();
    for task in state.tasks.assigned().await? {
        if let Some(employee_id) = task.employee_id() {
            by_employee.entry(employee_id).or_default().push(task);
        }
    }

    let entries: Vec<WorkloadEntry> = workloads
        .into_iter()
        .map(|workload| {
            let tasks = by_employee
                .remove(&workload.employee().id())
                .unwrap_or_default();
            WorkloadEntry { workload, tasks }
        })
        .collect();
    Ok(Success::new(entries.into()))
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

//! Success envelopes.

use crate::assignment::domain::Selection;
use crate::employee::domain::{Employee, EmployeeWorkload};
use crate::task::domain::Task;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// `{"status": "success", ...body}` wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct Success<T> {
    status: &'static str,
    #[serde(flatten)]
    body: T,
}

impl<T: Serialize> Success<T> {
    /// Wraps a body.
    #[must_use]
    pub const fn new(body: T) -> Self {
        Self {
            status: "success",
            body,
        }
    }

    /// Renders the envelope with `201 Created`.
    #[must_use]
    pub fn created(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

impl<T: Serialize> IntoResponse for Success<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// One employee under `employee`.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeBody {
    /// The employee.
    pub employee: Employee,
}

/// A list of employee records under `employees`, with a `results` count.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeList<T> {
    /// Number of records in `employees`.
    pub results: usize,
    /// The records.
    pub employees: Vec<T>,
}

impl<T> From<Vec<T>> for EmployeeList<T> {
    fn from(employees: Vec<T>) -> Self {
        Self {
            results: employees.len(),
            employees,
        }
    }
}

/// One task under `task`, plus the selection when an assignment ran.
#[derive(Debug, Clone, Serialize)]
pub struct TaskBody {
    /// The task.
    pub task: Task,
    /// Employee chosen by the assignment policy and the rule that chose it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment: Option<Selection>,
}

impl From<Task> for TaskBody {
    fn from(task: Task) -> Self {
        Self {
            task,
            assignment: None,
        }
    }
}

/// A list of tasks under `tasks`, with a `results` count.
#[derive(Debug, Clone, Serialize)]
pub struct TaskList {
    /// Number of tasks in `tasks`.
    pub results: usize,
    /// The tasks.
    pub tasks: Vec<Task>,
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self {
            results: tasks.len(),
            tasks,
        }
    }
}

/// An employee with its load and the tasks making up that load.
#[derive(Debug, Clone, Serialize)]
pub struct WorkloadEntry {
    /// The employee and its task count.
    #[serde(flatten)]
    pub workload: EmployeeWorkload,
    /// Tasks assigned to the employee.
    pub tasks: Vec<Task>,
}

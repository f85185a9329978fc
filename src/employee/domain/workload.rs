//! Employee paired with the number of tasks assigned to it.

use super::Employee;
use serde::Serialize;

/// An employee together with its load.
///
/// Load is the count of task records whose `employee_id` references the
/// employee. It is derived by the store and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeWorkload {
    #[serde(flatten)]
    employee: Employee,
    #[serde(rename = "task_count")]
    load: u64,
}

impl EmployeeWorkload {
    /// Pairs an employee with its load.
    #[must_use]
    pub const fn new(employee: Employee, load: u64) -> Self {
        Self { employee, load }
    }

    /// Returns the employee.
    #[must_use]
    pub const fn employee(&self) -> &Employee {
        &self.employee
    }

    /// Returns the number of assigned tasks.
    #[must_use]
    pub const fn load(&self) -> u64 {
        self.load
    }

    /// Returns `true` when no task is assigned to the employee.
    #[must_use]
    pub const fn is_free(&self) -> bool {
        self.load == 0
    }

    /// Discards the load and returns the employee.
    #[must_use]
    pub fn into_employee(self) -> Employee {
        self.employee
    }
}

/// Orders workloads by descending load, breaking ties by ascending id.
pub fn sort_busiest_first(workloads: &mut [EmployeeWorkload]) {
    workloads.sort_by(|left, right| {
        right
            .load
            .cmp(&left.load)
            .then_with(|| left.employee.id().cmp(&right.employee.id()))
    });
}

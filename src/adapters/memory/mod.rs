//! In-memory store for tests and local runs.

mod assignment;
mod employee;
mod task;

use crate::employee::domain::{EmailAddress, Employee, EmployeeId};
use crate::task::domain::{PageRequest, Task, TaskId, TaskName};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe in-memory store implementing every repository port.
///
/// Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTrackerStore {
    state: Arc<RwLock<TrackerState>>,
}

#[derive(Debug, Default)]
struct TrackerState {
    employees: HashMap<EmployeeId, Employee>,
    email_index: HashMap<EmailAddress, EmployeeId>,
    tasks: HashMap<TaskId, Task>,
    name_index: HashMap<TaskName, TaskId>,
}

impl InMemoryTrackerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, TrackerState>, std::io::Error> {
        self.state
            .read()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, TrackerState>, std::io::Error> {
        self.state
            .write()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }
}

impl TrackerState {
    fn load_of(&self, employee_id: EmployeeId) -> u64 {
        let count = self
            .tasks
            .values()
            .filter(|task| task.employee_id() == Some(employee_id))
            .count();
        u64::try_from(count).unwrap_or(u64::MAX)
    }

    fn employees_by_id(&self) -> Vec<&Employee> {
        let mut employees: Vec<&Employee> = self.employees.values().collect();
        employees.sort_by_key(|employee| employee.id());
        employees
    }

    fn tasks_in_creation_order(&self) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.values().collect();
        tasks.sort_by_key(|task| (task.created_at(), task.id()));
        tasks
    }
}

fn paginate<'a>(
    tasks: impl Iterator<Item = &'a Task>,
    page: PageRequest,
) -> Vec<Task> {
    let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let take = usize::try_from(page.limit()).unwrap_or(usize::MAX);
    tasks.skip(skip).take(take).cloned().collect()
}

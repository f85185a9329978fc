//! Shared world state for assignment policy scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use task_tracker::{
    adapters::memory::InMemoryTrackerStore,
    assignment::{
        domain::{Assignment, AssignmentPolicy},
        services::{AssignmentError, AssignmentService},
    },
    employee::{domain::Employee, services::EmployeeDirectoryService},
    task::{domain::Task, services::TaskRegistryService},
};

/// Scenario world for assignment behaviour tests.
pub struct AssignmentWorld {
    pub directory: EmployeeDirectoryService<InMemoryTrackerStore, DefaultClock>,
    pub registry: TaskRegistryService<InMemoryTrackerStore, DefaultClock>,
    pub assigner: AssignmentService<InMemoryTrackerStore, DefaultClock>,
    pub employees: HashMap<String, Employee>,
    pub tasks: HashMap<String, Task>,
    pub last_result: Option<Result<Assignment, AssignmentError>>,
}

impl AssignmentWorld {
    /// Creates a world over an empty store with the default policy.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryTrackerStore::new());
        let clock = Arc::new(DefaultClock);
        Self {
            directory: EmployeeDirectoryService::new(Arc::clone(&store), Arc::clone(&clock)),
            registry: TaskRegistryService::new(Arc::clone(&store), Arc::clone(&clock)),
            assigner: AssignmentService::new(store, clock, AssignmentPolicy::default()),
            employees: HashMap::new(),
            tasks: HashMap::new(),
            last_result: None,
        }
    }

    /// Looks up an employee registered under `label`.
    pub fn employee(&self, label: &str) -> Result<&Employee, eyre::Report> {
        self.employees
            .get(label)
            .ok_or_else(|| eyre::eyre!("no employee labelled {label} in scenario world"))
    }

    /// Looks up a task registered under `name`.
    pub fn task(&self, name: &str) -> Result<&Task, eyre::Report> {
        self.tasks
            .get(name)
            .ok_or_else(|| eyre::eyre!("no task named {name} in scenario world"))
    }

    /// Returns the successful assignment from the last `When` step.
    pub fn assignment(&self) -> Result<&Assignment, eyre::Report> {
        self.last_result
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing assignment result in scenario world"))?
            .as_ref()
            .map_err(|err| eyre::eyre!("unexpected assignment failure: {err}"))
    }
}

impl Default for AssignmentWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> AssignmentWorld {
    AssignmentWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

//! Employee repository over the in-memory store.

use super::InMemoryTrackerStore;
use crate::employee::{
    domain::{Employee, EmployeeId, EmployeeWorkload},
    ports::{EmployeeRepository, EmployeeRepositoryError, EmployeeRepositoryResult},
};
use async_trait::async_trait;

#[async_trait]
impl EmployeeRepository for InMemoryTrackerStore {
    async fn store(&self, employee: &Employee) -> EmployeeRepositoryResult<()> {
        let mut state = self.write().map_err(EmployeeRepositoryError::persistence)?;
        if state.employees.contains_key(&employee.id()) {
            return Err(EmployeeRepositoryError::DuplicateEmployee(employee.id()));
        }
        if state.email_index.contains_key(employee.email()) {
            return Err(EmployeeRepositoryError::DuplicateEmail(
                employee.email().clone(),
            ));
        }

        state
            .email_index
            .insert(employee.email().clone(), employee.id());
        state.employees.insert(employee.id(), employee.clone());
        Ok(())
    }

    async fn update(&self, employee: &Employee) -> EmployeeRepositoryResult<()> {
        let mut state = self.write().map_err(EmployeeRepositoryError::persistence)?;
        let old_email = state
            .employees
            .get(&employee.id())
            .ok_or(EmployeeRepositoryError::NotFound(employee.id()))?
            .email()
            .clone();

        let email_owner = state.email_index.get(employee.email()).copied();
        if email_owner.is_some_and(|owner| owner != employee.id()) {
            return Err(EmployeeRepositoryError::DuplicateEmail(
                employee.email().clone(),
            ));
        }

        state.email_index.remove(&old_email);
        state
            .email_index
            .insert(employee.email().clone(), employee.id());
        state.employees.insert(employee.id(), employee.clone());
        Ok(())
    }

    async fn delete(&self, id: EmployeeId) -> EmployeeRepositoryResult<()> {
        let mut state = self.write().map_err(EmployeeRepositoryError::persistence)?;
        if !state.employees.contains_key(&id) {
            return Err(EmployeeRepositoryError::NotFound(id));
        }

        let task_count = state.load_of(id);
        if task_count > 0 {
            return Err(EmployeeRepositoryError::HasAssignedTasks { id, task_count });
        }

        if let Some(removed) = state.employees.remove(&id) {
            state.email_index.remove(removed.email());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: EmployeeId) -> EmployeeRepositoryResult<Option<Employee>> {
        let state = self.read().map_err(EmployeeRepositoryError::persistence)?;
        Ok(state.employees.get(&id).cloned())
    }

    async fn list_all(&self) -> EmployeeRepositoryResult<Vec<Employee>> {
        let state = self.read().map_err(EmployeeRepositoryError::persistence)?;
        Ok(state.employees_by_id().into_iter().cloned().collect())
    }

    async fn list_workloads(&self) -> EmployeeRepositoryResult<Vec<EmployeeWorkload>> {
        let state = self.read().map_err(EmployeeRepositoryError::persistence)?;
        Ok(state
            .employees_by_id()
            .into_iter()
            .map(|employee| EmployeeWorkload::new(employee.clone(), state.load_of(employee.id())))
            .collect())
    }
}

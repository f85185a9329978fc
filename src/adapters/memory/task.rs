//! Task repository over the in-memory store.

use super::{InMemoryTrackerStore, TrackerState, paginate};
use crate::task::{
    domain::{PageRequest, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use std::collections::HashSet;

/// Rejects dangling parent or employee references, mirroring the foreign
/// keys of the relational schema.
fn check_references(state: &TrackerState, task: &Task) -> TaskRepositoryResult<()> {
    if let Some(parent_id) = task
        .parent_id()
        .filter(|parent_id| !state.tasks.contains_key(parent_id))
    {
        return Err(TaskRepositoryError::ParentNotFound(parent_id));
    }
    if let Some(employee_id) = task
        .employee_id()
        .filter(|employee_id| !state.employees.contains_key(employee_id))
    {
        return Err(TaskRepositoryError::EmployeeNotFound(employee_id));
    }
    Ok(())
}

/// Walks up from the task's parent and fails if the walk returns to the
/// task.
fn check_ancestry(state: &TrackerState, task: &Task) -> TaskRepositoryResult<()> {
    let Some(parent_id) = task.parent_id() else {
        return Ok(());
    };
    let mut visited = HashSet::new();
    let mut cursor = Some(parent_id);

    while let Some(current) = cursor {
        if current == task.id() {
            return Err(TaskRepositoryError::ParentCycle {
                task: task.id(),
                parent: parent_id,
            });
        }
        if !visited.insert(current) {
            break;
        }
        cursor = state.tasks.get(&current).and_then(Task::parent_id);
    }
    Ok(())
}

fn is_important(state: &TrackerState, task: &Task) -> bool {
    task.status().is_open()
        && task
            .parent_id()
            .and_then(|parent_id| state.tasks.get(&parent_id))
            .is_some_and(|parent| parent.status() == TaskStatus::InProgress)
}

#[async_trait]
impl TaskRepository for InMemoryTrackerStore {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        if state.name_index.contains_key(task.name()) {
            return Err(TaskRepositoryError::DuplicateName(task.name().clone()));
        }
        check_references(&state, task)?;

        state.name_index.insert(task.name().clone(), task.id());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        let old_name = state
            .tasks
            .get(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?
            .name()
            .clone();

        let name_owner = state.name_index.get(task.name()).copied();
        if name_owner.is_some_and(|owner| owner != task.id()) {
            return Err(TaskRepositoryError::DuplicateName(task.name().clone()));
        }
        check_references(&state, task)?;
        check_ancestry(&state, task)?;

        state.name_index.remove(&old_name);
        state.name_index.insert(task.name().clone(), task.id());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        let removed = state
            .tasks
            .remove(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        state.name_index.remove(removed.name());

        for child in state
            .tasks
            .values_mut()
            .filter(|task| task.parent_id() == Some(id))
        {
            child.detach_from_parent();
        }
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list(&self, page: PageRequest) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(paginate(state.tasks_in_creation_order().into_iter(), page))
    }

    async fn list_open(&self, page: PageRequest) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        let open = state
            .tasks_in_creation_order()
            .into_iter()
            .filter(|task| task.status().is_open());
        Ok(paginate(open, page))
    }

    async fn list_important(&self, page: PageRequest) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        let important = state
            .tasks_in_creation_order()
            .into_iter()
            .filter(|task| is_important(&state, task));
        Ok(paginate(important, page))
    }

    async fn list_assigned(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state
            .tasks_in_creation_order()
            .into_iter()
            .filter(|task| task.employee_id().is_some())
            .cloned()
            .collect())
    }
}

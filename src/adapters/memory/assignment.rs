//! Assignment repository over the in-memory store.
//!
//! The write lock is held from snapshot to update, which serializes
//! concurrent assignments.

use super::InMemoryTrackerStore;
use crate::assignment::{
    domain::{Assignment, AssignmentPolicy, AssignmentSnapshot, Candidate},
    ports::{AssignmentRepository, AssignmentRepositoryError, AssignmentRepositoryResult},
};
use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
impl AssignmentRepository for InMemoryTrackerStore {
    async fn assign_task(
        &self,
        task_id: TaskId,
        policy: AssignmentPolicy,
        assigned_at: DateTime<Utc>,
    ) -> AssignmentRepositoryResult<Assignment> {
        let mut state = self.write().map_err(AssignmentRepositoryError::persistence)?;
        let task = state
            .tasks
            .get(&task_id)
            .cloned()
            .ok_or(AssignmentRepositoryError::TaskNotFound(task_id))?;
        let parent_assignee = task
            .parent_id()
            .and_then(|parent_id| state.tasks.get(&parent_id))
            .and_then(Task::employee_id);
        let candidates = state
            .employees_by_id()
            .into_iter()
            .map(|employee| Candidate::new(employee.id(), state.load_of(employee.id())))
            .collect();

        let assignment =
            AssignmentSnapshot::new(task, parent_assignee, candidates).decide(policy, assigned_at)?;
        state
            .tasks
            .insert(task_id, assignment.task().clone());
        Ok(assignment)
    }
}

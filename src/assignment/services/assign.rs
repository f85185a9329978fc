//! Service layer for running the assignment policy.

use crate::assignment::{
    domain::{Assignment, AssignmentPolicy, AssignmentPolicyError},
    ports::{AssignmentRepository, AssignmentRepositoryError},
};
use crate::task::domain::TaskId;
use chrono::SubsecRound;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

/// Service-level errors for task assignment.
#[derive(Debug, Error)]
pub enum AssignmentError {
    /// The task does not exist.
    #[error("task with id {0} not found")]
    TaskNotFound(TaskId),
    /// No employee could be selected.
    #[error(transparent)]
    Policy(AssignmentPolicyError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(AssignmentRepositoryError),
}

impl From<AssignmentRepositoryError> for AssignmentError {
    fn from(err: AssignmentRepositoryError) -> Self {
        match err {
            AssignmentRepositoryError::TaskNotFound(id) => Self::TaskNotFound(id),
            AssignmentRepositoryError::Policy(policy_err) => Self::Policy(policy_err),
            AssignmentRepositoryError::Persistence(_) => Self::Repository(err),
        }
    }
}

/// Result type for assignment service operations.
pub type AssignmentResult<T> = Result<T, AssignmentError>;

/// Assignment orchestration service.
pub struct AssignmentService<R, C>
where
    R: AssignmentRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    policy: AssignmentPolicy,
}

impl<R, C> Clone for AssignmentService<R, C>
where
    R: AssignmentRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            policy: self.policy,
        }
    }
}

impl<R, C> AssignmentService<R, C>
where
    R: AssignmentRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new assignment service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>, policy: AssignmentPolicy) -> Self {
        Self {
            repository,
            clock,
            policy,
        }
    }

    /// Returns the policy applied by this service.
    #[must_use]
    pub const fn policy(&self) -> AssignmentPolicy {
        self.policy
    }

    /// Assigns a task to the employee chosen by the policy.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::TaskNotFound`] when the task does not exist,
    /// [`AssignmentError::Policy`] when there are no employees, and
    /// [`AssignmentError::Repository`] when persistence fails.
    #[instrument(skip_all, fields(task_id = %task_id))]
    pub async fn assign(&self, task_id: TaskId) -> AssignmentResult<Assignment> {
        let assignment = self
            .repository
            .assign_task(task_id, self.policy, self.clock.utc().trunc_subsecs(6))
            .await?;
        let selection = assignment.selection();
        info!(
            employee_id = %selection.employee_id(),
            load = selection.load(),
            reason = ?selection.reason(),
            "task assigned"
        );
        Ok(assignment)
    }
}

//! Repository port for transactional task assignment.

use crate::assignment::domain::{Assignment, AssignmentPolicy, AssignmentPolicyError};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for assignment repository operations.
pub type AssignmentRepositoryResult<T> = Result<T, AssignmentRepositoryError>;

/// Assignment persistence contract.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Assigns a task atomically.
    ///
    /// Implementations read an
    /// [`AssignmentSnapshot`](crate::assignment::domain::AssignmentSnapshot),
    /// let it decide with `policy`, and persist the assigned task without
    /// letting another assignment observe or modify the same state in
    /// between.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentRepositoryError::TaskNotFound`] when the task does
    /// not exist and [`AssignmentRepositoryError::Policy`] when no employee
    /// can be selected. Nothing is written in either case.
    async fn assign_task(
        &self,
        task_id: TaskId,
        policy: AssignmentPolicy,
        assigned_at: DateTime<Utc>,
    ) -> AssignmentRepositoryResult<Assignment>;
}

/// Errors returned by assignment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AssignmentRepositoryError {
    /// The task was not found.
    #[error("task with id {0} not found")]
    TaskNotFound(TaskId),

    /// The policy could not select an employee.
    #[error(transparent)]
    Policy(#[from] AssignmentPolicyError),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AssignmentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

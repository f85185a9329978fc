//! Repository port for task persistence and listing.

use crate::employee::domain::EmployeeId;
use crate::task::domain::{PageRequest, Task, TaskId, TaskName};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Listings are ordered by creation time, then identifier, so that pages are
/// stable between calls.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the identifier
    /// already exists, [`TaskRepositoryError::DuplicateName`] when the name is
    /// taken, and [`TaskRepositoryError::ParentNotFound`] or
    /// [`TaskRepositoryError::EmployeeNotFound`] when a reference is dangling.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist,
    /// [`TaskRepositoryError::ParentCycle`] when the new parent descends from
    /// the task, plus the name and reference errors of
    /// [`TaskRepository::store`]. The ancestor check and the write are atomic.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Deletes a task. Children of the task lose their parent link.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns one page of all tasks.
    async fn list(&self, page: PageRequest) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns one page of open tasks.
    async fn list_open(&self, page: PageRequest) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns one page of open tasks whose parent is in progress.
    async fn list_important(&self, page: PageRequest) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns every task that has an assignee.
    async fn list_assigned(&self) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// Another task already uses the name.
    #[error("task with name '{0}' already exists")]
    DuplicateName(TaskName),

    /// The task was not found.
    #[error("task with id {0} not found")]
    NotFound(TaskId),

    /// The referenced parent task does not exist.
    #[error("parent task {0} does not exist")]
    ParentNotFound(TaskId),

    /// The new parent is the task itself or one of its descendants.
    #[error("task {task} cannot be placed under its descendant {parent}")]
    ParentCycle {
        /// Task being re-parented.
        task: TaskId,
        /// Requested parent.
        parent: TaskId,
    },

    /// The referenced employee does not exist.
    #[error("employee {0} does not exist")]
    EmployeeNotFound(EmployeeId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

//! Error types for task domain validation.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing or modifying task domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task name is empty or whitespace only.
    #[error("task name must not be empty")]
    EmptyName,

    /// The status code is neither 0 (open) nor 1 (in progress).
    #[error("invalid task status {0}, expected 0 (open) or 1 (in progress)")]
    InvalidStatus(i32),

    /// Pages are numbered from 1.
    #[error("invalid page {0}, pages start at 1")]
    InvalidPage(u32),

    /// The requested parent would make the task its own ancestor.
    #[error("task {task} cannot have {parent} as parent: the link would form a cycle")]
    ParentCycle {
        /// Task being re-parented.
        task: TaskId,
        /// Requested parent.
        parent: TaskId,
    },
}

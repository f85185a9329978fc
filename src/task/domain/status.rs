//! Task status codes.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};

/// Progress state of a task, persisted and exchanged as an integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum TaskStatus {
    /// Work has not started (code 0).
    #[default]
    Open,
    /// Work is under way (code 1).
    InProgress,
}

impl TaskStatus {
    /// Returns the integer code used in storage and on the wire.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Open => 0,
            Self::InProgress => 1,
        }
    }

    /// Returns `true` for [`TaskStatus::Open`].
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl TryFrom<i32> for TaskStatus {
    type Error = TaskDomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Open),
            1 => Ok(Self::InProgress),
            other => Err(TaskDomainError::InvalidStatus(other)),
        }
    }
}

impl From<TaskStatus> for i32 {
    fn from(status: TaskStatus) -> Self {
        status.code()
    }
}

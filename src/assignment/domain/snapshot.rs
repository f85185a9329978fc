//! State read by a store before it assigns a task.

use super::{AssignmentPolicy, AssignmentPolicyError, Candidate, Selection};
use crate::employee::domain::EmployeeId;
use crate::task::domain::Task;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Consistent view of the task, its parent's assignee, and every employee's
/// load, taken inside the assigning transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentSnapshot {
    task: Task,
    parent_assignee: Option<EmployeeId>,
    candidates: Vec<Candidate>,
}

impl AssignmentSnapshot {
    /// Creates a snapshot.
    #[must_use]
    pub const fn new(
        task: Task,
        parent_assignee: Option<EmployeeId>,
        candidates: Vec<Candidate>,
    ) -> Self {
        Self {
            task,
            parent_assignee,
            candidates,
        }
    }

    /// Runs the policy and assigns the task to the selected employee.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentPolicyError::NoEmployees`] when the snapshot holds
    /// no candidates.
    pub fn decide(
        self,
        policy: AssignmentPolicy,
        assigned_at: DateTime<Utc>,
    ) -> Result<Assignment, AssignmentPolicyError> {
        let Self {
            mut task,
            parent_assignee,
            candidates,
        } = self;
        let selection = policy.select(&candidates, parent_assignee)?;
        task.assign(selection.employee_id(), assigned_at);
        Ok(Assignment { task, selection })
    }
}

/// An assigned task together with the selection that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    task: Task,
    selection: Selection,
}

impl Assignment {
    /// Returns the updated task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the policy's selection.
    #[must_use]
    pub const fn selection(&self) -> Selection {
        self.selection
    }

    /// Splits the assignment into its parts.
    #[must_use]
    pub fn into_parts(self) -> (Task, Selection) {
        (self.task, self.selection)
    }
}

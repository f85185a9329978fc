//! Task aggregate root and its creation and update inputs.

use super::{TaskDomainError, TaskId, TaskName, TaskStatus};
use crate::employee::domain::EmployeeId;
use crate::update_value::UpdateValue;
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated attributes of a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    name: TaskName,
    content: String,
    period_of_execution: Option<DateTime<Utc>>,
    parent_id: Option<TaskId>,
    status: TaskStatus,
    employee_id: Option<EmployeeId>,
}

impl TaskDraft {
    /// Creates an open, unassigned, top-level draft.
    #[must_use]
    pub fn new(name: TaskName, content: impl Into<String>) -> Self {
        Self {
            name,
            content: content.into(),
            period_of_execution: None,
            parent_id: None,
            status: TaskStatus::Open,
            employee_id: None,
        }
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_period_of_execution(mut self, period: DateTime<Utc>) -> Self {
        self.period_of_execution = Some(period);
        self
    }

    /// Sets the parent task.
    #[must_use]
    pub const fn with_parent(mut self, parent_id: TaskId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Assigns the task to an employee at creation.
    #[must_use]
    pub const fn with_employee(mut self, employee_id: EmployeeId) -> Self {
        self.employee_id = Some(employee_id);
        self
    }
}

/// Partial modification of a task.
///
/// Required attributes are replaced when `Some`; optional attributes use
/// [`UpdateValue`] so they can also be cleared. Status is never promoted by
/// an update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// Replacement name.
    pub name: Option<TaskName>,
    /// Replacement content.
    pub content: Option<String>,
    /// Deadline update.
    pub period_of_execution: UpdateValue<DateTime<Utc>>,
    /// Parent link update.
    pub parent_id: UpdateValue<TaskId>,
    /// Replacement status.
    pub status: Option<TaskStatus>,
    /// Assignee update.
    pub employee_id: UpdateValue<EmployeeId>,
}

impl TaskChanges {
    /// Returns `true` when no attribute would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.content.is_none()
            && !self.period_of_execution.is_change()
            && !self.parent_id.is_change()
            && self.status.is_none()
            && !self.employee_id.is_change()
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    name: TaskName,
    content: String,
    period_of_execution: Option<DateTime<Utc>>,
    parent_id: Option<TaskId>,
    status: TaskStatus,
    employee_id: Option<EmployeeId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted task name.
    pub name: TaskName,
    /// Persisted description.
    pub content: String,
    /// Persisted deadline, if any.
    pub period_of_execution: Option<DateTime<Utc>>,
    /// Persisted parent link, if any.
    pub parent_id: Option<TaskId>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted assignee, if any.
    pub employee_id: Option<EmployeeId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task from a draft.
    ///
    /// A draft that names an assignee while still open starts in progress.
    #[must_use]
    pub fn new(draft: TaskDraft, clock: &impl Clock) -> Self {
        // Microsecond precision matches TIMESTAMPTZ.
        let timestamp = clock.utc().trunc_subsecs(6);
        let TaskDraft {
            name,
            content,
            period_of_execution,
            parent_id,
            status,
            employee_id,
        } = draft;
        let initial_status = if employee_id.is_some() && status.is_open() {
            TaskStatus::InProgress
        } else {
            status
        };

        Self {
            id: TaskId::new(),
            name,
            content,
            period_of_execution,
            parent_id,
            status: initial_status,
            employee_id,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            content: data.content,
            period_of_execution: data.period_of_execution,
            parent_id: data.parent_id,
            status: data.status,
            employee_id: data.employee_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        &self.name
    }

    /// Returns the task description.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn period_of_execution(&self) -> Option<DateTime<Utc>> {
        self.period_of_execution
    }

    /// Returns the parent task identifier, if any.
    #[must_use]
    pub const fn parent_id(&self) -> Option<TaskId> {
        self.parent_id
    }

    /// Returns the task status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the assigned employee, if any.
    #[must_use]
    pub const fn employee_id(&self) -> Option<EmployeeId> {
        self.employee_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial modification.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ParentCycle`] when the new parent is the
    /// task itself. Deeper cycles need the ancestor chain and are checked by
    /// the repository when the update is written.
    pub fn apply(&mut self, changes: TaskChanges, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if changes.parent_id == UpdateValue::Set(self.id) {
            return Err(TaskDomainError::ParentCycle {
                task: self.id,
                parent: self.id,
            });
        }
        if changes.is_empty() {
            return Ok(());
        }

        let TaskChanges {
            name,
            content,
            period_of_execution,
            parent_id,
            status,
            employee_id,
        } = changes;

        if let Some(new_name) = name {
            self.name = new_name;
        }
        if let Some(new_content) = content {
            self.content = new_content;
        }
        if let Some(new_status) = status {
            self.status = new_status;
        }
        self.period_of_execution = period_of_execution.apply_to(self.period_of_execution);
        self.parent_id = parent_id.apply_to(self.parent_id);
        self.employee_id = employee_id.apply_to(self.employee_id);
        self.touch(clock.utc().trunc_subsecs(6));
        Ok(())
    }

    /// Assigns the task to an employee and marks it in progress.
    pub const fn assign(&mut self, employee_id: EmployeeId, assigned_at: DateTime<Utc>) {
        self.employee_id = Some(employee_id);
        self.status = TaskStatus::InProgress;
        self.touch(assigned_at);
    }

    /// Drops the parent link after the parent task was deleted.
    pub const fn detach_from_parent(&mut self) {
        self.parent_id = None;
    }

    const fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

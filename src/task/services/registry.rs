//! Service layer for task CRUD and listings.

use crate::employee::domain::EmployeeId;
use crate::task::{
    domain::{
        PageRequest, Task, TaskChanges, TaskDomainError, TaskDraft, TaskId, TaskName, TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::update_value::UpdateValue;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    name: String,
    content: String,
    period_of_execution: Option<DateTime<Utc>>,
    parent_id: Option<TaskId>,
    status: Option<i32>,
    employee_id: Option<EmployeeId>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            period_of_execution: None,
            parent_id: None,
            status: None,
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

    /// Sets the raw status code.
    #[must_use]
    pub const fn with_status(mut self, status: i32) -> Self {
        self.status = Some(status);
        self
    }

    /// Assigns the task to an employee at creation.
    #[must_use]
    pub const fn with_employee(mut self, employee_id: EmployeeId) -> Self {
        self.employee_id = Some(employee_id);
        self
    }

    fn into_draft(self) -> Result<TaskDraft, TaskDomainError> {
        let status = self
            .status
            .map(TaskStatus::try_from)
            .transpose()?
            .unwrap_or_default();
        let mut draft = TaskDraft::new(TaskName::new(self.name)?, self.content).with_status(status);
        if let Some(period) = self.period_of_execution {
            draft = draft.with_period_of_execution(period);
        }
        if let Some(parent_id) = self.parent_id {
            draft = draft.with_parent(parent_id);
        }
        if let Some(employee_id) = self.employee_id {
            draft = draft.with_employee(employee_id);
        }
        Ok(draft)
    }
}

/// Request payload for a partial task update.
///
/// Fields left at their default are not modified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    name: Option<String>,
    content: Option<String>,
    period_of_execution: UpdateValue<DateTime<Utc>>,
    parent_id: UpdateValue<TaskId>,
    status: Option<i32>,
    employee_id: UpdateValue<EmployeeId>,
}

impl UpdateTaskRequest {
    /// Creates a request that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Sets or clears the deadline.
    #[must_use]
    pub const fn with_period_of_execution(mut self, period: UpdateValue<DateTime<Utc>>) -> Self {
        self.period_of_execution = period;
        self
    }

    /// Sets or clears the parent link.
    #[must_use]
    pub const fn with_parent(mut self, parent_id: UpdateValue<TaskId>) -> Self {
        self.parent_id = parent_id;
        self
    }

    /// Replaces the raw status code.
    #[must_use]
    pub const fn with_status(mut self, status: i32) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets or clears the assignee.
    #[must_use]
    pub const fn with_employee(mut self, employee_id: UpdateValue<EmployeeId>) -> Self {
        self.employee_id = employee_id;
        self
    }

    fn into_changes(self) -> Result<TaskChanges, TaskDomainError> {
        Ok(TaskChanges {
            name: self.name.map(TaskName::new).transpose()?,
            content: self.content,
            period_of_execution: self.period_of_execution,
            parent_id: self.parent_id,
            status: self.status.map(TaskStatus::try_from).transpose()?,
            employee_id: self.employee_id,
        })
    }
}

/// Service-level errors for task registry operations.
#[derive(Debug, Error)]
pub enum TaskRegistryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task registry service operations.
pub type TaskRegistryResult<T> = Result<T, TaskRegistryError>;

/// Task registry orchestration service.
pub struct TaskRegistryService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for TaskRegistryService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> TaskRegistryService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new task registry service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns one page of all tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Repository`] when the lookup fails.
    pub async fn list(&self, page: PageRequest) -> TaskRegistryResult<Vec<Task>> {
        Ok(self.repository.list(page).await?)
    }

    /// Returns one page of open tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Repository`] when the lookup fails.
    pub async fn free(&self, page: PageRequest) -> TaskRegistryResult<Vec<Task>> {
        Ok(self.repository.list_open(page).await?)
    }

    /// Returns one page of open tasks blocked behind an in-progress parent.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Repository`] when the lookup fails.
    pub async fn important(&self, page: PageRequest) -> TaskRegistryResult<Vec<Task>> {
        Ok(self.repository.list_important(page).await?)
    }

    /// Returns every assigned task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Repository`] when the lookup fails.
    pub async fn assigned(&self) -> TaskRegistryResult<Vec<Task>> {
        Ok(self.repository.list_assigned().await?)
    }

    /// Fetches one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] wrapped in
    /// [`TaskRegistryError::Repository`] when the task does not exist.
    pub async fn get(&self, id: TaskId) -> TaskRegistryResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskRegistryError::Repository(TaskRepositoryError::NotFound(
                id,
            )))
    }

    /// Creates a task.
    ///
    /// An open task created with an assignee is stored in progress.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Domain`] when a field is invalid, or
    /// [`TaskRegistryError::Repository`] when the name is taken, a reference
    /// is dangling, or persistence fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskRegistryResult<Task> {
        let draft = request.into_draft()?;
        let task = Task::new(draft, &*self.clock);
        self.repository.store(&task).await?;
        info!(
            task_id = %task.id(),
            name = %task.name(),
            status = task.status().code(),
            "task created"
        );
        Ok(task)
    }

    /// Applies a partial update to a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Domain`] for invalid values or when the
    /// task would become its own parent, and [`TaskRegistryError::Repository`]
    /// when the task does not exist, the new parent descends from it, the
    /// name is taken, a reference is dangling, or persistence fails.
    pub async fn update(&self, id: TaskId, request: UpdateTaskRequest) -> TaskRegistryResult<Task> {
        let changes = request.into_changes()?;
        let mut task = self.get(id).await?;
        if changes.is_empty() {
            return Ok(task);
        }

        task.apply(changes, &*self.clock)?;
        self.repository.update(&task).await?;
        info!(task_id = %id, "task updated");
        Ok(task)
    }

    /// Deletes a task. Its children become top-level tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] wrapped in
    /// [`TaskRegistryError::Repository`] when the task does not exist.
    pub async fn delete(&self, id: TaskId) -> TaskRegistryResult<()> {
        self.repository.delete(id).await?;
        info!(task_id = %id, "task deleted");
        Ok(())
    }
}


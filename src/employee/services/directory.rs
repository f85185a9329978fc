//! Service layer for employee CRUD and workload queries.

use crate::employee::{
    domain::{
        EmailAddress, Employee, EmployeeChanges, EmployeeDomainError, EmployeeId, EmployeeProfile,
        EmployeeWorkload, PersonName, sort_busiest_first,
    },
    ports::{EmployeeRepository, EmployeeRepositoryError},
};
use crate::update_value::UpdateValue;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for creating an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEmployeeRequest {
    email: String,
    last_name: String,
    first_name: String,
    patronymic: Option<String>,
    post: Option<String>,
}

impl CreateEmployeeRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        last_name: impl Into<String>,
        first_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            last_name: last_name.into(),
            first_name: first_name.into(),
            patronymic: None,
            post: None,
        }
    }

    /// Sets the patronymic.
    #[must_use]
    pub fn with_patronymic(mut self, patronymic: impl Into<String>) -> Self {
        self.patronymic = Some(patronymic.into());
        self
    }

    /// Sets the job title.
    #[must_use]
    pub fn with_post(mut self, post: impl Into<String>) -> Self {
        self.post = Some(post.into());
        self
    }
}

/// Request payload for a partial employee update.
///
/// Fields left at their default are not modified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateEmployeeRequest {
    email: Option<String>,
    last_name: Option<String>,
    first_name: Option<String>,
    patronymic: UpdateValue<String>,
    post: UpdateValue<String>,
}

impl UpdateEmployeeRequest {
    /// Creates a request that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Replaces the last name.
    #[must_use]
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    /// Replaces the first name.
    #[must_use]
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    /// Sets or clears the patronymic.
    #[must_use]
    pub fn with_patronymic(mut self, patronymic: UpdateValue<String>) -> Self {
        self.patronymic = patronymic;
        self
    }

    /// Sets or clears the job title.
    #[must_use]
    pub fn with_post(mut self, post: UpdateValue<String>) -> Self {
        self.post = post;
        self
    }

    fn into_changes(self) -> Result<EmployeeChanges, EmployeeDomainError> {
        Ok(EmployeeChanges {
            email: self.email.map(EmailAddress::new).transpose()?,
            last_name: self
                .last_name
                .map(|value| PersonName::new("last_name", value))
                .transpose()?,
            first_name: self
                .first_name
                .map(|value| PersonName::new("first_name", value))
                .transpose()?,
            patronymic: self.patronymic,
            post: self.post,
        })
    }
}

/// Service-level errors for employee directory operations.
#[derive(Debug, Error)]
pub enum EmployeeDirectoryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] EmployeeDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] EmployeeRepositoryError),
    /// Every employee carries at least one task.
    #[error("no free employees")]
    NoFreeEmployees,
}

/// Result type for employee directory service operations.
pub type EmployeeDirectoryResult<T> = Result<T, EmployeeDirectoryError>;

/// Employee directory orchestration service.
pub struct EmployeeDirectoryService<R, C>
where
    R: EmployeeRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for EmployeeDirectoryService<R, C>
where
    R: EmployeeRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> EmployeeDirectoryService<R, C>
where
    R: EmployeeRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new employee directory service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns every employee.
    ///
    /// # Errors
    ///
    /// Returns [`EmployeeDirectoryError::Repository`] when the lookup fails.
    pub async fn list(&self) -> EmployeeDirectoryResult<Vec<Employee>> {
        Ok(self.repository.list_all().await?)
    }

    /// Fetches one employee.
    ///
    /// # Errors
    ///
    /// Returns [`EmployeeRepositoryError::NotFound`] wrapped in
    /// [`EmployeeDirectoryError::Repository`] when the employee does not exist.
    pub async fn get(&self, id: EmployeeId) -> EmployeeDirectoryResult<Employee> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(EmployeeDirectoryError::Repository(
                EmployeeRepositoryError::NotFound(id),
            ))
    }

    /// Creates an employee.
    ///
    /// # Errors
    ///
    /// Returns [`EmployeeDirectoryError::Domain`] when a field is invalid or
    /// [`EmployeeDirectoryError::Repository`] when the email is taken or
    /// persistence fails.
    pub async fn create(
        &self,
        request: CreateEmployeeRequest,
    ) -> EmployeeDirectoryResult<Employee> {
        let CreateEmployeeRequest {
            email,
            last_name,
            first_name,
            patronymic,
            post,
        } = request;

        let mut profile = EmployeeProfile::new(
            EmailAddress::new(email)?,
            PersonName::new("last_name", last_name)?,
            PersonName::new("first_name", first_name)?,
        );
        if let Some(value) = patronymic {
            profile = profile.with_patronymic(value);
        }
        if let Some(value) = post {
            profile = profile.with_post(value);
        }

        let employee = Employee::new(profile, &*self.clock);
        self.repository.store(&employee).await?;
        info!(employee_id = %employee.id(), email = %employee.email(), "employee created");
        Ok(employee)
    }

    /// Applies a partial update to an employee.
    ///
    /// # Errors
    ///
    /// Returns [`EmployeeDirectoryError::Domain`] when a replacement value is
    /// invalid, or [`EmployeeDirectoryError::Repository`] when the employee
    /// does not exist, the new email is taken, or persistence fails.
    pub async fn update(
        &self,
        id: EmployeeId,
        request: UpdateEmployeeRequest,
    ) -> EmployeeDirectoryResult<Employee> {
        let changes = request.into_changes()?;
        let mut employee = self.get(id).await?;
        if changes.is_empty() {
            return Ok(employee);
        }

        employee.apply(changes, &*self.clock);
        self.repository.update(&employee).await?;
        info!(employee_id = %id, "employee updated");
        Ok(employee)
    }

    /// Deletes an employee that has no assigned tasks.
    ///
    /// # Errors
    ///
    /// Returns [`EmployeeRepositoryError::HasAssignedTasks`] or
    /// [`EmployeeRepositoryError::NotFound`] wrapped in
    /// [`EmployeeDirectoryError::Repository`].
    pub async fn delete(&self, id: EmployeeId) -> EmployeeDirectoryResult<()> {
        self.repository.delete(id).await?;
        info!(employee_id = %id, "employee deleted");
        Ok(())
    }

    /// Returns every employee with its load, busiest first.
    ///
    /// # Errors
    ///
    /// Returns [`EmployeeDirectoryError::Repository`] when the lookup fails.
    pub async fn workloads(&self) -> EmployeeDirectoryResult<Vec<EmployeeWorkload>> {
        let mut workloads = self.repository.list_workloads().await?;
        sort_busiest_first(&mut workloads);
        Ok(workloads)
    }

    /// Returns employees carrying at least one task, busiest first.
    ///
    /// # Errors
    ///
    /// Returns [`EmployeeDirectoryError::Repository`] when the lookup fails.
    pub async fn busy(&self) -> EmployeeDirectoryResult<Vec<EmployeeWorkload>> {
        let mut workloads = self.workloads().await?;
        workloads.retain(|workload| !workload.is_free());
        Ok(workloads)
    }

    /// Returns employees carrying no task.
    ///
    /// # Errors
    ///
    /// Returns [`EmployeeDirectoryError::NoFreeEmployees`] when every employee
    /// has work, including when there are no employees at all.
    pub async fn free(&self) -> EmployeeDirectoryResult<Vec<Employee>> {
        let free: Vec<Employee> = self
            .repository
            .list_workloads()
            .await?
            .into_iter()
            .filter(EmployeeWorkload::is_free)
            .map(EmployeeWorkload::into_employee)
            .collect();

        if free.is_empty() {
            return Err(EmployeeDirectoryError::NoFreeEmployees);
        }
        Ok(free)
    }
}

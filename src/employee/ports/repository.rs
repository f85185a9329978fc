//! Repository port for employee persistence and workload queries.

use crate::employee::domain::{EmailAddress, Employee, EmployeeId, EmployeeWorkload};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for employee repository operations.
pub type EmployeeRepositoryResult<T> = Result<T, EmployeeRepositoryError>;

/// Employee persistence contract.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Stores a new employee.
    ///
    /// # Errors
    ///
    /// Returns [`EmployeeRepositoryError::DuplicateEmployee`] when the
    /// identifier already exists or [`EmployeeRepositoryError::DuplicateEmail`]
    /// when another employee uses the same address.
    async fn store(&self, employee: &Employee) -> EmployeeRepositoryResult<()>;

    /// Persists changes to an existing employee.
    ///
    /// # Errors
    ///
    /// Returns [`EmployeeRepositoryError::NotFound`] when the employee does not
    /// exist or [`EmployeeRepositoryError::DuplicateEmail`] when the new
    /// address belongs to another employee.
    async fn update(&self, employee: &Employee) -> EmployeeRepositoryResult<()>;

    /// Deletes an employee that carries no tasks.
    ///
    /// # Errors
    ///
    /// Returns [`EmployeeRepositoryError::NotFound`] when the employee does not
    /// exist or [`EmployeeRepositoryError::HasAssignedTasks`] when tasks still
    /// reference it. A rejected delete leaves the store untouched.
    async fn delete(&self, id: EmployeeId) -> EmployeeRepositoryResult<()>;

    /// Finds an employee by identifier.
    ///
    /// Returns `None` when the employee does not exist.
    async fn find_by_id(&self, id: EmployeeId) -> EmployeeRepositoryResult<Option<Employee>>;

    /// Returns every employee ordered by identifier.
    async fn list_all(&self) -> EmployeeRepositoryResult<Vec<Employee>>;

    /// Returns every employee with its load, ordered by identifier.
    async fn list_workloads(&self) -> EmployeeRepositoryResult<Vec<EmployeeWorkload>>;
}

/// Errors returned by employee repository implementations.
#[derive(Debug, Clone, Error)]
pub enum EmployeeRepositoryError {
    /// An employee with the same identifier already exists.
    #[error("duplicate employee identifier: {0}")]
    DuplicateEmployee(EmployeeId),

    /// Another employee already uses the email address.
    #[error("employee with email {0} already exists")]
    DuplicateEmail(EmailAddress),

    /// The employee was not found.
    #[error("employee with id {0} not found")]
    NotFound(EmployeeId),

    /// The employee still has tasks assigned.
    #[error("employee {id} has {task_count} assigned task(s) and cannot be deleted")]
    HasAssignedTasks {
        /// Employee whose deletion was rejected.
        id: EmployeeId,
        /// Number of tasks still assigned.
        task_count: u64,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl EmployeeRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

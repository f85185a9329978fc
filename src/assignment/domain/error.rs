//! Error types for the assignment policy.

use thiserror::Error;

/// Errors returned when the policy cannot pick an employee.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssignmentPolicyError {
    /// There is nobody to assign the task to.
    #[error("no employees available")]
    NoEmployees,
}

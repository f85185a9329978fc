//! Error types for employee domain validation.

use thiserror::Error;

/// Errors returned while constructing employee domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmployeeDomainError {
    /// The email address is not of the form `local@domain.tld`.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// A required text field is empty or whitespace only.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

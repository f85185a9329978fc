//! Identifier and validated scalar types for the employee domain.

use super::EmployeeDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an employee record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(Uuid);

impl EmployeeId {
    /// Creates a new random employee identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an employee identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for EmployeeId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for EmployeeId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Syntactically valid email address, unique per employee.
///
/// The domain part is stored in lowercase; the local part is kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`EmployeeDomainError::InvalidEmail`] when the value lacks a
    /// single `@`, has an empty local part, has a domain without a dot or
    /// with empty labels, or contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, EmployeeDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let Some((local, domain)) = normalized.split_once('@') else {
            return Err(EmployeeDomainError::InvalidEmail(raw));
        };

        let is_valid = !local.is_empty()
            && !domain.contains('@')
            && domain.contains('.')
            && domain.split('.').all(|label| !label.is_empty())
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(EmployeeDomainError::InvalidEmail(raw));
        }

        Ok(Self(format!("{local}@{}", domain.to_ascii_lowercase())))
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-blank name component (last name or first name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    /// Creates a validated name component.
    ///
    /// `field` names the attribute being validated and is echoed in the
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`EmployeeDomainError::EmptyField`] when the value is empty
    /// or whitespace only. Other values are kept exactly as given.
    pub fn new(field: &'static str, value: impl Into<String>) -> Result<Self, EmployeeDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(EmployeeDomainError::EmptyField(field));
        }
        Ok(Self(raw))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

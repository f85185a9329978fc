//! Employee aggregate root.

use super::{EmailAddress, EmployeeId, PersonName};
use crate::update_value::UpdateValue;
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated attributes of a new employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeProfile {
    email: EmailAddress,
    last_name: PersonName,
    first_name: PersonName,
    patronymic: Option<String>,
    post: Option<String>,
}

impl EmployeeProfile {
    /// Creates a profile with the required attributes.
    #[must_use]
    pub const fn new(email: EmailAddress, last_name: PersonName, first_name: PersonName) -> Self {
        Self {
            email,
            last_name,
            first_name,
            patronymic: None,
            post: None,
        }
    }

    /// Sets the patronymic. Blank values are treated as absent.
    #[must_use]
    pub fn with_patronymic(mut self, patronymic: impl Into<String>) -> Self {
        self.patronymic = optional_text(patronymic.into());
        self
    }

    /// Sets the job title. Blank values are treated as absent.
    #[must_use]
    pub fn with_post(mut self, post: impl Into<String>) -> Self {
        self.post = optional_text(post.into());
        self
    }
}

/// Partial modification of an employee.
///
/// Required attributes are replaced when `Some`. Optional attributes use
/// [`UpdateValue`] so they can also be cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeChanges {
    /// Replacement email address.
    pub email: Option<EmailAddress>,
    /// Replacement last name.
    pub last_name: Option<PersonName>,
    /// Replacement first name.
    pub first_name: Option<PersonName>,
    /// Patronymic update.
    pub patronymic: UpdateValue<String>,
    /// Job title update.
    pub post: UpdateValue<String>,
}

impl EmployeeChanges {
    /// Returns `true` when no attribute would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.last_name.is_none()
            && self.first_name.is_none()
            && !self.patronymic.is_change()
            && !self.post.is_change()
    }
}

/// Employee aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    id: EmployeeId,
    email: EmailAddress,
    last_name: PersonName,
    first_name: PersonName,
    patronymic: Option<String>,
    post: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedEmployeeData {
    /// Persisted employee identifier.
    pub id: EmployeeId,
    /// Persisted email address.
    pub email: EmailAddress,
    /// Persisted last name.
    pub last_name: PersonName,
    /// Persisted first name.
    pub first_name: PersonName,
    /// Persisted patronymic, if any.
    pub patronymic: Option<String>,
    /// Persisted job title, if any.
    pub post: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Creates a new employee from a validated profile.
    #[must_use]
    pub fn new(profile: EmployeeProfile, clock: &impl Clock) -> Self {
        // Microsecond precision matches TIMESTAMPTZ.
        let timestamp = clock.utc().trunc_subsecs(6);
        let EmployeeProfile {
            email,
            last_name,
            first_name,
            patronymic,
            post,
        } = profile;

        Self {
            id: EmployeeId::new(),
            email,
            last_name,
            first_name,
            patronymic,
            post,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs an employee from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedEmployeeData) -> Self {
        Self {
            id: data.id,
            email: data.email,
            last_name: data.last_name,
            first_name: data.first_name,
            patronymic: data.patronymic,
            post: data.post,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the employee identifier.
    #[must_use]
    pub const fn id(&self) -> EmployeeId {
        self.id
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the last name.
    #[must_use]
    pub const fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    /// Returns the first name.
    #[must_use]
    pub const fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    /// Returns the patronymic, if any.
    #[must_use]
    pub fn patronymic(&self) -> Option<&str> {
        self.patronymic.as_deref()
    }

    /// Returns the job title, if any.
    #[must_use]
    pub fn post(&self) -> Option<&str> {
        self.post.as_deref()
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
    /// The modification timestamp only moves when something changed.
    pub fn apply(&mut self, changes: EmployeeChanges, clock: &impl Clock) {
        if changes.is_empty() {
            return;
        }

        let EmployeeChanges {
            email,
            last_name,
            first_name,
            patronymic,
            post,
        } = changes;

        if let Some(new_email) = email {
            self.email = new_email;
        }
        if let Some(new_last_name) = last_name {
            self.last_name = new_last_name;
        }
        if let Some(new_first_name) = first_name {
            self.first_name = new_first_name;
        }
        self.patronymic = patronymic
            .apply_to(self.patronymic.take())
            .and_then(optional_text);
        self.post = post.apply_to(self.post.take()).and_then(optional_text);
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc().trunc_subsecs(6);
    }
}

fn optional_text(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}

//! Tri-state field updates for partial record changes.
//!
//! A PATCH payload has to tell apart "set this field", "clear this field",
//! and "leave this field alone". [`UpdateValue`] carries that distinction
//! from the HTTP payload down to the domain aggregates.

use serde::{Deserialize, Deserializer};

/// Requested change to an optional field.
///
/// Deserializing a JSON value yields [`UpdateValue::Set`] and an explicit
/// `null` yields [`UpdateValue::Unset`]. A field missing from the payload
/// falls back to [`UpdateValue::NoChange`] when the containing struct marks
/// it `#[serde(default)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateValue<T> {
    /// Replace the field with the value.
    Set(T),
    /// Clear the field.
    Unset,
    /// Leave the field untouched.
    #[default]
    NoChange,
}

impl<T> UpdateValue<T> {
    /// Returns `true` when the update modifies the field.
    #[must_use]
    pub const fn is_change(&self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// Returns the value carried by [`UpdateValue::Set`].
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unset | Self::NoChange => None,
        }
    }

    /// Applies the update to the current value of the field.
    #[must_use]
    pub fn apply_to(self, existing: Option<T>) -> Option<T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unset => None,
            Self::NoChange => existing,
        }
    }

    /// Maps the value carried by [`UpdateValue::Set`].
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> UpdateValue<U> {
        match self {
            Self::Set(value) => UpdateValue::Set(f(value)),
            Self::Unset => UpdateValue::Unset,
            Self::NoChange => UpdateValue::NoChange,
        }
    }

    /// Maps the value carried by [`UpdateValue::Set`] with a fallible
    /// conversion.
    ///
    /// # Errors
    ///
    /// Returns the conversion error unchanged.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<UpdateValue<U>, E> {
        Ok(match self {
            Self::Set(value) => UpdateValue::Set(f(value)?),
            Self::Unset => UpdateValue::Unset,
            Self::NoChange => UpdateValue::NoChange,
        })
    }
}

impl<T> From<Option<T>> for UpdateValue<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unset, Self::Set)
    }
}

impl<'de, T> Deserialize<'de> for UpdateValue<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}

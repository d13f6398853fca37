//! Field-level validation.
//!
//! A [`Validator`] checks a single field value and reports a [`Validation`]
//! outcome. Validators never fail with an error; converting an invalid
//! outcome into [`crate::error::AppError::Validation`] is the caller's
//! decision.

mod rules;

pub use rules::{Alphanumeric, EmailFormat, HexColor, OneOf, Required, StringLength};

use crate::error::{AppError, AppResult};

/// Outcome of a validation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// The value satisfies every constraint.
    Valid,
    /// The value violates a constraint.
    Invalid(String),
}

impl Validation {
    /// Creates an invalid outcome.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    /// Returns `true` when the outcome is valid.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the failure message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(message) => Some(message),
        }
    }

    /// Runs `next` only when this outcome is valid.
    #[must_use]
    pub fn and_then(self, next: impl FnOnce() -> Self) -> Self {
        match self {
            Self::Valid => next(),
            invalid @ Self::Invalid(_) => invalid,
        }
    }

    /// Converts the outcome into a result.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] carrying the failure message.
    pub fn into_result(self) -> AppResult<()> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(message) => Err(AppError::validation(message)),
        }
    }
}

/// A reusable check over a single field value.
pub trait Validator {
    /// Checks `value` against this validator's constraint.
    fn validate(&self, value: &str) -> Validation;

    /// Checks `value` only when it is present.
    fn validate_optional(&self, value: Option<&str>) -> Validation {
        value.map_or(Validation::Valid, |present| self.validate(present))
    }
}

/// Checks that an identifier-like number is positive.
#[must_use]
pub fn positive_id(field: &str, value: u64) -> Validation {
    if value == 0 {
        Validation::invalid(format!("Invalid {field}"))
    } else {
        Validation::Valid
    }
}

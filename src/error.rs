//! Application error taxonomy shared by entities and repositories.
//!
//! Uses `thiserror` for typed variants that callers can inspect. Errors are
//! returned at the point of detection and propagated with `?`; only the
//! presentation boundary turns them into response envelopes.

use crate::entity::EntityId;
use serde_json::{Map, Value, json};
use thiserror::Error;

/// Result type for entity and repository operations.
pub type AppResult<T> = Result<T, AppError>;

/// Errors raised by entity validation and repository operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppError {
    /// Client input failed field or state validation.
    #[error("{message}")]
    Validation {
        /// Human-readable description of the failed constraint.
        message: String,
    },

    /// The referenced entity does not exist.
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Entity kind, for example `Task`.
        resource: &'static str,
        /// Identifier that was looked up.
        id: EntityId,
    },

    /// A named entity could not be found.
    #[error("{resource} '{name}' not found")]
    NameNotFound {
        /// Entity kind, for example `Tag`.
        resource: &'static str,
        /// Name that was looked up.
        name: String,
    },

    /// A uniqueness or state constraint would be violated.
    #[error("{message}")]
    Conflict {
        /// Human-readable description of the conflict.
        message: String,
    },
}

impl AppError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a not-found error for an identifier lookup.
    #[must_use]
    pub const fn not_found(resource: &'static str, id: EntityId) -> Self {
        Self::NotFound { resource, id }
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Returns the machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::NotFound { .. } | Self::NameNotFound { .. } => "NOT_FOUND",
            Self::Conflict { .. } => "CONFLICT",
        }
    }

    /// Returns the HTTP-like status code used by response envelopes.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::NotFound { .. } | Self::NameNotFound { .. } => 404,
            Self::Conflict { .. } => 409,
        }
    }

    /// Returns `true` for [`AppError::NotFound`] and [`AppError::NameNotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NameNotFound { .. })
    }

    /// Serialises the error as `{error_code, message, details}`.
    #[must_use]
    pub fn to_dict(&self) -> Map<String, Value> {
        let details = match self {
            Self::NotFound { resource, id } => json!({ "resource_type": resource, "id": id }),
            Self::NameNotFound { resource, name } => {
                json!({ "resource_type": resource, "name": name })
            }
            Self::Validation { .. } | Self::Conflict { .. } => json!({}),
        };

        let mut map = Map::new();
        map.insert("error_code".to_owned(), Value::from(self.code()));
        map.insert("message".to_owned(), Value::from(self.to_string()));
        map.insert("details".to_owned(), details);
        map
    }
}

//! Uniform success and error envelopes for the presentation boundary.
//!
//! Domain code returns [`AppResult`]; only callers presenting results to a
//! user convert them into an [`ApiResponse`].

use crate::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Outcome label carried by every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    /// A read or generic operation succeeded.
    Success,
    /// An entity was created.
    Created,
    /// An entity was updated.
    Updated,
    /// An entity was deleted.
    Deleted,
    /// The operation failed.
    Error,
}

impl ResponseStatus {
    /// Returns the canonical token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A success or error envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    /// The operation succeeded.
    Success {
        /// Kind of success.
        status: ResponseStatus,
        /// Human-readable summary.
        message: String,
        /// Payload, absent for deletions.
        data: Option<T>,
        /// When the envelope was produced.
        timestamp: DateTime<Utc>,
    },
    /// The operation failed.
    Error {
        /// Human-readable description of the failure.
        message: String,
        /// Machine-readable error code.
        error_code: String,
        /// HTTP-like status code.
        status_code: u16,
        /// When the envelope was produced.
        timestamp: DateTime<Utc>,
    },
}

impl<T> ApiResponse<T> {
    fn succeeded(
        status: ResponseStatus,
        data: Option<T>,
        message: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self::Success {
            status,
            message: message.into(),
            data,
            timestamp: clock.utc(),
        }
    }

    /// Wraps a successful read.
    #[must_use]
    pub fn success(data: T, message: impl Into<String>, clock: &impl Clock) -> Self {
        Self::succeeded(ResponseStatus::Success, Some(data), message, clock)
    }

    /// Wraps a newly created entity.
    #[must_use]
    pub fn created(data: T, message: impl Into<String>, clock: &impl Clock) -> Self {
        Self::succeeded(ResponseStatus::Created, Some(data), message, clock)
    }

    /// Wraps an updated entity.
    #[must_use]
    pub fn updated(data: T, message: impl Into<String>, clock: &impl Clock) -> Self {
        Self::succeeded(ResponseStatus::Updated, Some(data), message, clock)
    }

    /// Reports a deletion; carries no payload.
    #[must_use]
    pub fn deleted(message: impl Into<String>, clock: &impl Clock) -> Self {
        Self::succeeded(ResponseStatus::Deleted, None, message, clock)
    }

    /// Builds an error envelope from its parts.
    #[must_use]
    pub fn error(
        message: impl Into<String>,
        error_code: impl Into<String>,
        status_code: u16,
        clock: &impl Clock,
    ) -> Self {
        Self::Error {
            message: message.into(),
            error_code: error_code.into(),
            status_code,
            timestamp: clock.utc(),
        }
    }

    /// Builds an error envelope describing `err`.
    #[must_use]
    pub fn from_error(err: &AppError, clock: &impl Clock) -> Self {
        Self::error(err.to_string(), err.code(), err.status_code(), clock)
    }

    /// Converts a domain result: `Ok` becomes a success envelope labelled
    /// `status`, `Err` becomes an error envelope.
    ///
    /// A `Deleted` status drops the payload.
    #[must_use]
    pub fn respond(
        result: AppResult<T>,
        status: ResponseStatus,
        message: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        match result {
            Ok(data) => {
                let payload = (status != ResponseStatus::Deleted).then_some(data);
                Self::succeeded(status, payload, message, clock)
            }
            Err(err) => Self::from_error(&err, clock),
        }
    }

    /// Returns the status label.
    #[must_use]
    pub const fn status(&self) -> ResponseStatus {
        match self {
            Self::Success { status, .. } => *status,
            Self::Error { .. } => ResponseStatus::Error,
        }
    }

    /// Returns whether the envelope reports success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the HTTP-like status code.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Success {
                status: ResponseStatus::Created,
                ..
            } => 201,
            Self::Success { .. } => 200,
            Self::Error { status_code, .. } => *status_code,
        }
    }

    /// Returns the payload of a success envelope.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data, .. } => data.as_ref(),
            Self::Error { .. } => None,
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Renders the envelope as a JSON object.
    ///
    /// Success envelopes carry `status`, `message`, `data` (omitted when
    /// absent) and `timestamp`; error envelopes carry `status`, `message`,
    /// `error_code`, `status_code` and `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns the serialisation error when the payload cannot be rendered.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        let mut body = Map::new();
        body.insert("status".to_owned(), Value::from(self.status().as_str()));
        match self {
            Self::Success {
                message,
                data,
                timestamp,
                ..
            } => {
                body.insert("message".to_owned(), Value::from(message.as_str()));
                if let Some(payload) = data {
                    body.insert("data".to_owned(), serde_json::to_value(payload)?);
                }
                body.insert("timestamp".to_owned(), Value::from(timestamp.to_rfc3339()));
            }
            Self::Error {
                message,
                error_code,
                status_code,
                timestamp,
            } => {
                body.insert("message".to_owned(), Value::from(message.as_str()));
                body.insert("error_code".to_owned(), Value::from(error_code.as_str()));
                body.insert("status_code".to_owned(), Value::from(*status_code));
                body.insert("timestamp".to_owned(), Value::from(timestamp.to_rfc3339()));
            }
        }
        Ok(Value::Object(body))
    }
}

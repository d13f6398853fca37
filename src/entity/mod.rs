//! Entity contract and the concrete TODO entities.
//!
//! Every stored record implements two capabilities:
//!
//! - [`Validatable`]: field-level checks against the shared [`AppConfig`]
//! - [`Serializable`]: a deterministic JSON object of all fields
//!
//! [`Entity`] binds both to identity [`Metadata`] and to the draft and patch
//! types a repository uses to create and update the variant.

mod category;
mod change;
mod ids;
mod metadata;
mod notification;
mod project;
mod tag;
mod task;
mod token;

#[cfg(test)]
mod tests;

pub use category::{Category, CategoryDraft, CategoryPatch};
pub use change::Change;
pub use ids::{EntityId, UserId};
pub use metadata::Metadata;
pub use notification::{
    Notification, NotificationDraft, NotificationPatch, NotificationStatus, NotificationType,
};
pub use project::{Project, ProjectDraft, ProjectPatch, ProjectStatus};
pub use tag::{Tag, TagDraft, TagPatch};
pub use task::{Task, TaskDraft, TaskPatch, TaskPriority, TaskStatus};
pub use token::Token;

use crate::{config::AppConfig, error::AppResult, validation::Validation};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Field-level validation capability.
pub trait Validatable {
    /// Checks required fields and field constraints.
    ///
    /// Never fails with an error; an invalid outcome carries the message of
    /// the first violated constraint.
    fn validate(&self, config: &AppConfig) -> Validation;
}

/// Deterministic serialisation capability.
pub trait Serializable {
    /// Returns every field as a primitive JSON value.
    ///
    /// Equal field values always produce equal output.
    fn to_dict(&self) -> Map<String, Value>;

    /// Returns [`Serializable::to_dict`] as a JSON value.
    fn to_json(&self) -> Value {
        Value::Object(self.to_dict())
    }
}

/// A record stored by [`crate::repository::Repository`].
pub trait Entity: Validatable + Serializable + Clone + PartialEq {
    /// Human-readable entity kind used in error messages.
    const KIND: &'static str;

    /// Input used to create a new entity.
    type Draft;

    /// Partial update applied to an existing entity.
    type Patch;

    /// Builds a new entity from its draft.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AppError::Validation`] when a draft value
    /// cannot be represented, such as an unknown status token.
    fn from_draft(metadata: Metadata, draft: Self::Draft, config: &AppConfig) -> AppResult<Self>;

    /// Applies a patch, refreshing `updated_at` to `now`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AppError::Validation`] when a patch value
    /// cannot be represented or a status transition is not permitted.
    fn apply_patch(&mut self, patch: Self::Patch, now: DateTime<Utc>) -> AppResult<()>;

    /// Returns the identity metadata.
    fn metadata(&self) -> &Metadata;

    /// Returns the identity metadata mutably.
    fn metadata_mut(&mut self) -> &mut Metadata;

    /// Returns the value that must be unique across the repository, if any.
    fn unique_key(&self) -> Option<String> {
        None
    }

    /// Returns the entity identifier.
    fn id(&self) -> EntityId {
        self.metadata().id()
    }

    /// Returns the creation timestamp.
    fn created_at(&self) -> DateTime<Utc> {
        self.metadata().created_at()
    }

    /// Returns the latest modification timestamp.
    fn updated_at(&self) -> DateTime<Utc> {
        self.metadata().updated_at()
    }
}

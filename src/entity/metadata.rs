//! Identity and timestamps carried by every entity.

use super::EntityId;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Identity plus creation and modification timestamps.
///
/// `updated_at` never precedes `created_at` and never moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    id: EntityId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Metadata {
    /// Creates metadata for a freshly created entity.
    #[must_use]
    pub const fn new(id: EntityId, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the entity identifier.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
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

    /// Records a modification at `now`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.updated_at {
            self.updated_at = now;
        }
    }

    /// Merges the identity fields with an entity's own JSON object.
    pub(crate) fn dict_with(&self, fields: Value) -> Map<String, Value> {
        let mut dict = match fields {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        dict.insert("id".to_owned(), Value::from(self.id.value()));
        dict.insert(
            "created_at".to_owned(),
            Value::from(self.created_at.to_rfc3339()),
        );
        dict.insert(
            "updated_at".to_owned(),
            Value::from(self.updated_at.to_rfc3339()),
        );
        dict
    }
}

//! Unit tests for entity construction, lifecycles and serialisation.


use crate::entity::{EntityId, Metadata};
use chrono::{DateTime, TimeZone, Utc};

/// Fixed creation instant shared by entity tests.
pub(super) fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Metadata for the first stored entity.
pub(super) fn first_metadata() -> Metadata {
    Metadata::new(EntityId::FIRST, created_at())
}

/// An instant `minutes` after [`created_at`].
pub(super) fn later(minutes: i64) -> DateTime<Utc> {
    created_at() + chrono::TimeDelta::minutes(minutes)
}

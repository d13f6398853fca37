//! Tag lookups, usage counters and popularity ranking.

use super::Repository;
use crate::{
    entity::{Entity, EntityId, Tag},
    error::AppResult,
};
use mockable::Clock;
use std::cmp::Reverse;

impl<C: Clock> Repository<Tag, C> {
    /// Returns tags whose name contains `fragment`, ignoring case.
    #[must_use]
    pub fn find_by_name(&self, fragment: &str) -> Vec<&Tag> {
        let needle = fragment.trim().to_lowercase();
        self.get_all_matching(|tag| tag.name().to_lowercase().contains(&needle))
    }

    /// Returns the tag named exactly `name`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AppError::NameNotFound`] when none matches.
    pub fn get_by_name(&self, name: &str) -> AppResult<&Tag> {
        self.get_by_unique_key(name)
    }

    /// Records one more use of the tag.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AppError::NotFound`] for an unknown tag.
    pub fn increment_usage(&mut self, id: EntityId) -> AppResult<Tag> {
        self.modify(id, |tag, now| {
            tag.increment_usage(now);
            Ok(())
        })
    }

    /// Records one use fewer; the count never drops below zero.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AppError::NotFound`] for an unknown tag.
    pub fn decrement_usage(&mut self, id: EntityId) -> AppResult<Tag> {
        self.modify(id, |tag, now| {
            tag.decrement_usage(now);
            Ok(())
        })
    }

    /// Returns up to `limit` tags by descending usage, ties by identifier.
    #[must_use]
    pub fn popular(&self, limit: usize) -> Vec<&Tag> {
        let mut ranked = self.get_all();
        ranked.sort_by_key(|tag| (Reverse(tag.usage_count()), tag.id()));
        ranked.truncate(limit);
        ranked
    }
}

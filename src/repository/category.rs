//! Category lookups by name and task counters.

use super::Repository;
use crate::{
    entity::{Category, EntityId},
    error::AppResult,
};
use mockable::Clock;

impl<C: Clock> Repository<Category, C> {
    /// Returns categories whose name contains `fragment`, ignoring case.
    #[must_use]
    pub fn find_by_name(&self, fragment: &str) -> Vec<&Category> {
        let needle = fragment.trim().to_lowercase();
        self.get_all_matching(|category| category.name().to_lowercase().contains(&needle))
    }

    /// Returns the category named exactly `name`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AppError::NameNotFound`] when none matches.
    pub fn get_by_name(&self, name: &str) -> AppResult<&Category> {
        self.get_by_unique_key(name)
    }

    /// Records one more task filed under the category.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AppError::NotFound`] for an unknown category.
    pub fn increment_task_count(&mut self, id: EntityId) -> AppResult<Category> {
        self.modify(id, |category, now| {
            category.increment_task_count(now);
            Ok(())
        })
    }

    /// Records one task fewer; the count never drops below zero.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AppError::NotFound`] for an unknown category.
    pub fn decrement_task_count(&mut self, id: EntityId) -> AppResult<Category> {
        self.modify(id, |category, now| {
            category.decrement_task_count(now);
            Ok(())
        })
    }
}

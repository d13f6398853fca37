//! Generic in-memory repository and its per-entity specialisations.
//!
//! [`Repository`] owns every stored entity. Reads hand out borrows; writes
//! work on a copy, validate it against the shared [`AppConfig`], check
//! uniqueness and only then replace the stored value, so a rejected write
//! leaves the store untouched.
//!
//! Variant-specific finders and mutators live in inherent impls on the
//! concrete repository types, one file per entity.

mod category;
mod notification;
mod project;
mod tag;
mod task;

#[cfg(test)]
mod tests;

pub use notification::NotificationStats;

use crate::{
    config::AppConfig,
    entity::{Category, Entity, EntityId, Metadata, Notification, Project, Tag, Task},
    error::{AppError, AppResult},
};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use mockable::{Clock, DefaultClock};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Repository of [`Task`] entities.
pub type TaskRepository<C = DefaultClock> = Repository<Task, C>;

/// Repository of [`Project`] entities.
pub type ProjectRepository<C = DefaultClock> = Repository<Project, C>;

/// Repository of [`Category`] entities.
pub type CategoryRepository<C = DefaultClock> = Repository<Category, C>;

/// Repository of [`Tag`] entities.
pub type TagRepository<C = DefaultClock> = Repository<Tag, C>;

/// Repository of [`Notification`] entities.
pub type NotificationRepository<C = DefaultClock> = Repository<Notification, C>;

/// In-memory store keyed by [`EntityId`].
///
/// Identifiers are assigned in increasing order starting at
/// [`EntityId::FIRST`] and are never reused. Listings are returned in
/// ascending identifier order.
pub struct Repository<E, C = DefaultClock>
where
    E: Entity,
    C: Clock,
{
    items: BTreeMap<EntityId, E>,
    next_id: EntityId,
    config: Arc<AppConfig>,
    clock: C,
}

impl<E: Entity> Repository<E, DefaultClock> {
    /// Creates an empty repository with default limits and the system clock.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(AppConfig::default()), DefaultClock)
    }
}

impl<E: Entity> Default for Repository<E, DefaultClock> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl<E, C> Repository<E, C>
where
    E: Entity,
    C: Clock,
{
    /// Creates an empty repository.
    #[must_use]
    pub const fn new(config: Arc<AppConfig>, clock: C) -> Self {
        Self {
            items: BTreeMap::new(),
            next_id: EntityId::FIRST,
            config,
            clock,
        }
    }

    /// Returns the configuration entities are validated against.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the current time according to the repository clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    /// Creates, validates and stores a new entity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the draft is invalid and
    /// [`AppError::Conflict`] when a unique value is already taken. No
    /// identifier is consumed on failure.
    pub fn create(&mut self, draft: E::Draft) -> AppResult<E> {
        let id = self.next_id;
        let metadata = Metadata::new(id, self.clock.utc());
        let entity = E::from_draft(metadata, draft, &self.config)
            .and_then(|candidate| self.admit(&candidate).map(|()| candidate))
            .inspect_err(|err| warn!("{} create rejected: {err}", E::KIND))?;

        self.next_id = id.next();
        self.items.insert(id, entity.clone());
        info!("{} created: id={id}", E::KIND);
        Ok(entity)
    }

    /// Returns the entity stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no entity has that identifier.
    pub fn get(&self, id: EntityId) -> AppResult<&E> {
        self.items
            .get(&id)
            .ok_or_else(|| AppError::not_found(E::KIND, id))
    }

    /// Returns the entity stored under `id`, if any.
    #[must_use]
    pub fn find(&self, id: EntityId) -> Option<&E> {
        self.items.get(&id)
    }

    /// Returns every stored entity in ascending identifier order.
    #[must_use]
    pub fn get_all(&self) -> Vec<&E> {
        self.items.values().collect()
    }

    /// Returns the stored entities matching `predicate`, in identifier order.
    #[must_use]
    pub fn get_all_matching(&self, predicate: impl Fn(&E) -> bool) -> Vec<&E> {
        let matches: Vec<&E> = self.items.values().filter(|item| predicate(item)).collect();
        debug!("{} scan matched {} of {}", E::KIND, matches.len(), self.items.len());
        matches
    }

    /// Applies `patch` to the entity stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when `id` is unknown,
    /// [`AppError::Validation`] when the patched entity is invalid and
    /// [`AppError::Conflict`] when it would duplicate a unique value.
    pub fn update(&mut self, id: EntityId, patch: E::Patch) -> AppResult<E> {
        self.modify(id, |entity, now| entity.apply_patch(patch, now))
    }

    /// Runs `change` against a copy of the stored entity and stores the
    /// result once it passes validation and uniqueness checks.
    ///
    /// `updated_at` is refreshed only when `change` altered the entity; a
    /// no-op leaves the stored value untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when `id` is unknown, any error
    /// returned by `change`, [`AppError::Validation`] when the result is
    /// invalid and [`AppError::Conflict`] when it would duplicate a unique
    /// value.
    pub fn modify<F>(&mut self, id: EntityId, change: F) -> AppResult<E>
    where
        F: FnOnce(&mut E, DateTime<Utc>) -> AppResult<()>,
    {
        let mut working = self.get(id)?.clone();
        let now = self.clock.utc();
        change(&mut working, now)
            .and_then(|()| self.admit(&working))
            .inspect_err(|err| warn!("{} {id} update rejected: {err}", E::KIND))?;

        if self.items.get(&id) == Some(&working) {
            debug!("{} {id} unchanged", E::KIND);
            return Ok(working);
        }

        working.metadata_mut().touch(now);
        self.items.insert(id, working.clone());
        info!("{} updated: id={id}", E::KIND);
        Ok(working)
    }

    /// Removes the entity stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no entity has that identifier.
    pub fn delete(&mut self, id: EntityId) -> AppResult<()> {
        self.items
            .remove(&id)
            .ok_or_else(|| AppError::not_found(E::KIND, id))?;
        info!("{} deleted: id={id}", E::KIND);
        Ok(())
    }

    /// Returns the number of stored entities.
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns whether an entity is stored under `id`.
    #[must_use]
    pub fn exists(&self, id: EntityId) -> bool {
        self.items.contains_key(&id)
    }

    /// Returns the entity whose unique value equals `key`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NameNotFound`] when nothing matches.
    pub fn get_by_unique_key(&self, key: &str) -> AppResult<&E> {
        let wanted = key.trim().to_lowercase();
        self.items
            .values()
            .find(|item| item.unique_key().as_deref() == Some(wanted.as_str()))
            .ok_or_else(|| AppError::NameNotFound {
                resource: E::KIND,
                name: key.to_owned(),
            })
    }

    /// Checks that `candidate` may be stored.
    fn admit(&self, candidate: &E) -> AppResult<()> {
        candidate.validate(&self.config).into_result()?;
        let Some(key) = candidate.unique_key() else {
            return Ok(());
        };
        let taken = self
            .items
            .values()
            .any(|other| other.id() != candidate.id() && other.unique_key().as_ref() == Some(&key));
        if taken {
            return Err(AppError::conflict(format!(
                "{} '{key}' already exists",
                E::KIND
            )));
        }
        Ok(())
    }
}

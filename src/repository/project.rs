//! Project finders, membership and progress bookkeeping.

use super::Repository;
use crate::{
    entity::{EntityId, Project, ProjectStatus, UserId},
    error::AppResult,
};
use mockable::Clock;

impl<C: Clock> Repository<Project, C> {
    /// Returns projects owned by `owner`.
    #[must_use]
    pub fn find_by_owner(&self, owner: UserId) -> Vec<&Project> {
        self.get_all_matching(|project| project.owner() == Some(owner))
    }

    /// Returns projects in `status`.
    #[must_use]
    pub fn find_by_status(&self, status: ProjectStatus) -> Vec<&Project> {
        self.get_all_matching(|project| project.status() == status)
    }

    /// Returns projects in the `active` status.
    #[must_use]
    pub fn find_active(&self) -> Vec<&Project> {
        self.find_by_status(ProjectStatus::Active)
    }

    /// Returns projects `user` belongs to.
    #[must_use]
    pub fn find_by_member(&self, user: UserId) -> Vec<&Project> {
        self.get_all_matching(|project| project.is_member(user))
    }

    /// Adds `user` to the project members.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AppError::NotFound`] for an unknown project
    /// and [`crate::error::AppError::Validation`] for a zero user id.
    pub fn add_member(&mut self, id: EntityId, user: UserId) -> AppResult<Project> {
        self.modify(id, |project, now| {
            project.add_member(user, now);
            Ok(())
        })
    }

    /// Removes `user` from the project members.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AppError::NotFound`] for an unknown project
    /// and [`crate::error::AppError::Conflict`] when `user` owns it.
    pub fn remove_member(&mut self, id: EntityId, user: UserId) -> AppResult<Project> {
        self.modify(id, |project, now| project.remove_member(user, now).map(|_| ()))
    }

    /// Moves the project to `active`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AppError::NotFound`] for an unknown project
    /// and [`crate::error::AppError::Validation`] when it is archived.
    pub fn activate(&mut self, id: EntityId) -> AppResult<Project> {
        self.modify(id, |project, now| {
            project.transition_to(ProjectStatus::Active, now)
        })
    }

    /// Moves the project to `archived`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AppError::NotFound`] for an unknown project.
    pub fn archive(&mut self, id: EntityId) -> AppResult<Project> {
        self.modify(id, |project, now| {
            project.transition_to(ProjectStatus::Archived, now)
        })
    }

    /// Counts one more task against the project.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AppError::NotFound`] for an unknown project.
    pub fn record_task_added(&mut self, id: EntityId) -> AppResult<Project> {
        self.modify(id, |project, now| {
            project.record_task_added(now);
            Ok(())
        })
    }

    /// Counts one more completed task against the project.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AppError::NotFound`] for an unknown project
    /// and [`crate::error::AppError::Conflict`] when no task is open.
    pub fn record_task_completed(&mut self, id: EntityId) -> AppResult<Project> {
        self.modify(id, |project, now| project.record_task_completed(now))
    }
}

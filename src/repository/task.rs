//! Task finders and lifecycle mutators.

use super::Repository;
use crate::{
    entity::{EntityId, Task, TaskPriority, TaskStatus, UserId},
    error::AppResult,
};
use chrono::{DateTime, Utc};
use mockable::Clock;

impl<C: Clock> Repository<Task, C> {
    /// Returns tasks in `status`.
    #[must_use]
    pub fn find_by_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.get_all_matching(|task| task.status() == status)
    }

    /// Returns tasks with `priority`.
    #[must_use]
    pub fn find_by_priority(&self, priority: TaskPriority) -> Vec<&Task> {
        self.get_all_matching(|task| task.priority() == priority)
    }

    /// Returns tasks belonging to `project_id`.
    #[must_use]
    pub fn find_by_project(&self, project_id: EntityId) -> Vec<&Task> {
        self.get_all_matching(|task| task.project_id() == Some(project_id))
    }

    /// Returns tasks assigned to `user`.
    #[must_use]
    pub fn find_by_assignee(&self, user: UserId) -> Vec<&Task> {
        self.get_all_matching(|task| task.assignee() == Some(user))
    }

    /// Returns tasks carrying `tag`.
    #[must_use]
    pub fn find_by_tag(&self, tag: &str) -> Vec<&Task> {
        self.get_all_matching(|task| task.has_tag(tag))
    }

    /// Returns open tasks whose due date precedes `now`.
    #[must_use]
    pub fn find_overdue(&self, now: DateTime<Utc>) -> Vec<&Task> {
        self.get_all_matching(|task| task.is_overdue(now))
    }

    /// Adds `tag` to the task; adding a present tag changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AppError::NotFound`] for an unknown task and
    /// [`crate::error::AppError::Validation`] for a blank tag.
    pub fn add_tag(&mut self, id: EntityId, tag: &str) -> AppResult<Task> {
        self.modify(id, |task, now| {
            task.add_tag(tag, now);
            Ok(())
        })
    }

    /// Removes `tag` from the task; removing an absent tag changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AppError::NotFound`] for an unknown task.
    pub fn remove_tag(&mut self, id: EntityId, tag: &str) -> AppResult<Task> {
        self.modify(id, |task, now| {
            task.remove_tag(tag, now);
            Ok(())
        })
    }

    /// Starts work on the task.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AppError::NotFound`] for an unknown task and
    /// [`crate::error::AppError::Validation`] when the transition is not
    /// permitted.
    pub fn mark_in_progress(&mut self, id: EntityId) -> AppResult<Task> {
        self.move_to(id, TaskStatus::InProgress)
    }

    /// Completes the task and stamps `completed_at`.
    ///
    /// # Errors
    ///
    /// As [`Repository::mark_in_progress`].
    pub fn mark_completed(&mut self, id: EntityId) -> AppResult<Task> {
        self.move_to(id, TaskStatus::Completed)
    }

    /// Archives the task.
    ///
    /// # Errors
    ///
    /// As [`Repository::mark_in_progress`].
    pub fn archive(&mut self, id: EntityId) -> AppResult<Task> {
        self.move_to(id, TaskStatus::Archived)
    }

    fn move_to(&mut self, id: EntityId, status: TaskStatus) -> AppResult<Task> {
        self.modify(id, |task, now| task.transition_to(status, now))
    }
}

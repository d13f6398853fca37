//! Notification inbox queries and read-state changes.

use super::Repository;
use crate::{
    entity::{EntityId, Notification, NotificationStatus, NotificationType, UserId},
    error::AppResult,
};
use mockable::Clock;
use serde::Serialize;

/// Counts of stored notifications per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NotificationStats {
    /// Every stored notification.
    pub total: usize,
    /// Notifications not yet read.
    pub unread: usize,
    /// Notifications read but not archived.
    pub read: usize,
    /// Archived notifications.
    pub archived: usize,
}

impl<C: Clock> Repository<Notification, C> {
    /// Returns notifications addressed to `user`.
    #[must_use]
    pub fn find_by_user(&self, user: UserId) -> Vec<&Notification> {
        self.get_all_matching(|notification| notification.recipient() == user)
    }

    /// Returns unread notifications addressed to `user`.
    #[must_use]
    pub fn find_unread(&self, user: UserId) -> Vec<&Notification> {
        self.get_all_matching(|notification| {
            notification.recipient() == user && notification.is_unread()
        })
    }

    /// Returns notifications of `kind`.
    #[must_use]
    pub fn find_by_type(&self, kind: NotificationType) -> Vec<&Notification> {
        self.get_all_matching(|notification| notification.kind() == kind)
    }

    /// Returns notifications of `kind` addressed to `user`.
    #[must_use]
    pub fn find_by_type_for_user(&self, kind: NotificationType, user: UserId) -> Vec<&Notification> {
        self.get_all_matching(|notification| {
            notification.kind() == kind && notification.recipient() == user
        })
    }

    /// Returns how many unread notifications `user` has.
    #[must_use]
    pub fn unread_count(&self, user: UserId) -> usize {
        self.find_unread(user).len()
    }

    /// Marks the notification as read.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AppError::NotFound`] for an unknown
    /// notification and [`crate::error::AppError::Validation`] when it is
    /// archived.
    pub fn mark_as_read(&mut self, id: EntityId) -> AppResult<Notification> {
        self.modify(id, |notification, now| {
            notification.transition_to(NotificationStatus::Read, now)
        })
    }

    /// Archives the notification.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AppError::NotFound`] for an unknown
    /// notification.
    pub fn archive(&mut self, id: EntityId) -> AppResult<Notification> {
        self.modify(id, |notification, now| {
            notification.transition_to(NotificationStatus::Archived, now)
        })
    }

    /// Tallies stored notifications by status.
    #[must_use]
    pub fn stats(&self) -> NotificationStats {
        self.get_all()
            .into_iter()
            .fold(NotificationStats::default(), |mut stats, notification| {
                stats.total += 1;
                match notification.status() {
                    NotificationStatus::Unread => stats.unread += 1,
                    NotificationStatus::Read => stats.read += 1,
                    NotificationStatus::Archived => stats.archived += 1,
                }
                stats
            })
    }
}

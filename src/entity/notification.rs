//! Notification entity delivered to a single user.

use super::{Entity, EntityId, Metadata, Serializable, Token, UserId, Validatable};
use crate::{
    config::AppConfig,
    error::{AppError, AppResult},
    validation::{Required, Validation, Validator, positive_id},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;

/// Delivery status of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    /// Not yet seen by the recipient.
    Unread,
    /// Seen by the recipient.
    Read,
    /// Filed away; no further transitions are permitted.
    Archived,
}

impl NotificationStatus {
    /// Returns whether the lifecycle permits moving from `self` to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Unread, Self::Read | Self::Archived) | (Self::Read, Self::Archived)
        )
    }
}

impl Token for NotificationStatus {
    const FIELD: &'static str = "Status";
    const ALL: &'static [Self] = &[Self::Unread, Self::Read, Self::Archived];
    const TOKENS: &'static [&'static str] = &["unread", "read", "archived"];

    fn as_str(self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<NotificationStatus> for String {
    fn from(value: NotificationStatus) -> Self {
        value.as_str().to_owned()
    }
}

/// The event a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    /// A task was assigned to the recipient.
    TaskAssigned,
    /// A task the recipient follows was completed.
    TaskCompleted,
    /// A task's due date is near.
    TaskDueSoon,
    /// A project the recipient belongs to changed.
    ProjectUpdated,
    /// Someone commented on an item the recipient follows.
    CommentAdded,
}

impl Token for NotificationType {
    const FIELD: &'static str = "Notification type";
    const ALL: &'static [Self] = &[
        Self::TaskAssigned,
        Self::TaskCompleted,
        Self::TaskDueSoon,
        Self::ProjectUpdated,
        Self::CommentAdded,
    ];
    const TOKENS: &'static [&'static str] = &[
        "task_assigned",
        "task_completed",
        "task_due_soon",
        "project_updated",
        "comment_added",
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::TaskAssigned => "task_assigned",
            Self::TaskCompleted => "task_completed",
            Self::TaskDueSoon => "task_due_soon",
            Self::ProjectUpdated => "project_updated",
            Self::CommentAdded => "comment_added",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<NotificationType> for String {
    fn from(value: NotificationType) -> Self {
        value.as_str().to_owned()
    }
}

/// Input for creating a [`Notification`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    recipient: UserId,
    message: String,
    kind: String,
    related_entity: Option<(EntityId, String)>,
}

impl NotificationDraft {
    /// Creates a draft for `recipient` with a message and a type token.
    #[must_use]
    pub fn new(recipient: UserId, message: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            recipient,
            message: message.into(),
            kind: kind.into(),
            related_entity: None,
        }
    }

    /// Links the notification to the entity it is about.
    #[must_use]
    pub fn with_related_entity(mut self, id: EntityId, kind: impl Into<String>) -> Self {
        self.related_entity = Some((id, kind.into()));
        self
    }
}

/// Partial update for a [`Notification`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationPatch {
    message: Option<String>,
    status: Option<String>,
}

impl NotificationPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the message.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Requests a status change.
    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// A message addressed to one user about an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    metadata: Metadata,
    recipient: UserId,
    message: String,
    kind: NotificationType,
    status: NotificationStatus,
    related_entity_id: Option<EntityId>,
    related_entity_type: Option<String>,
}

impl Notification {
    /// Returns the recipient.
    #[must_use]
    pub const fn recipient(&self) -> UserId {
        self.recipient
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the notification type.
    #[must_use]
    pub const fn kind(&self) -> NotificationType {
        self.kind
    }

    /// Returns the delivery status.
    #[must_use]
    pub const fn status(&self) -> NotificationStatus {
        self.status
    }

    /// Returns the identifier of the related entity, if any.
    #[must_use]
    pub const fn related_entity_id(&self) -> Option<EntityId> {
        self.related_entity_id
    }

    /// Returns the kind of the related entity, if any.
    #[must_use]
    pub fn related_entity_type(&self) -> Option<&str> {
        self.related_entity_type.as_deref()
    }

    /// Returns whether the recipient has not seen the notification yet.
    #[must_use]
    pub fn is_unread(&self) -> bool {
        self.status == NotificationStatus::Unread
    }

    /// Moves the notification to `next`, enforcing the lifecycle.
    ///
    /// Requesting the current status is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for backwards transitions and for
    /// any transition out of `archived`.
    pub fn transition_to(
        &mut self,
        next: NotificationStatus,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        if next == self.status {
            return Ok(());
        }
        if !self.status.can_transition_to(next) {
            return Err(AppError::validation(format!(
                "invalid notification status transition: {} -> {next}",
                self.status
            )));
        }
        self.status = next;
        self.metadata.touch(now);
        Ok(())
    }
}

impl Validatable for Notification {
    fn validate(&self, config: &AppConfig) -> Validation {
        Required::new("Message")
            .validate(&self.message)
            .and_then(|| {
                config
                    .notification_message
                    .validator("Message")
                    .validate(self.message.trim())
            })
            .and_then(|| positive_id("user_id", self.recipient.value()))
            .and_then(|| {
                self.related_entity_type
                    .as_deref()
                    .map_or(Validation::Valid, |kind| {
                        Required::new("Related entity type").validate(kind)
                    })
            })
    }
}

impl Serializable for Notification {
    fn to_dict(&self) -> Map<String, Value> {
        self.metadata.dict_with(json!({
            "user_id": self.recipient.value(),
            "message": self.message,
            "notification_type": self.kind.as_str(),
            "status": self.status.as_str(),
            "related_entity_id": self.related_entity_id.map(EntityId::value),
            "related_entity_type": self.related_entity_type,
        }))
    }
}

impl Entity for Notification {
    const KIND: &'static str = "Notification";
    type Draft = NotificationDraft;
    type Patch = NotificationPatch;

    fn from_draft(
        metadata: Metadata,
        draft: NotificationDraft,
        config: &AppConfig,
    ) -> AppResult<Self> {
        let kind = NotificationType::parse(&draft.kind)?;
        let (related_entity_id, related_entity_type) = draft
            .related_entity
            .map_or((None, None), |(id, kind_name)| (Some(id), Some(kind_name)));
        Ok(Self {
            metadata,
            recipient: draft.recipient,
            message: draft.message,
            kind,
            status: config.defaults.notification_status,
            related_entity_id,
            related_entity_type,
        })
    }

    fn apply_patch(&mut self, patch: NotificationPatch, now: DateTime<Utc>) -> AppResult<()> {
        if let Some(status) = patch.status.as_deref() {
            self.transition_to(NotificationStatus::parse(status)?, now)?;
        }
        if let Some(message) = patch.message {
            self.message = message;
        }
        self.metadata.touch(now);
        Ok(())
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

//! Project entity and its status enumeration.

use super::{Change, Entity, Metadata, Serializable, Token, UserId, Validatable, token::parse_or};
use crate::{
    config::AppConfig,
    error::{AppError, AppResult},
    validation::{EmailFormat, Required, Validation, Validator, positive_id},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::BTreeSet;
use std::fmt;

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Scoping work before it starts.
    Planning,
    /// Work is being carried out.
    Active,
    /// Temporarily paused.
    OnHold,
    /// All planned work is finished.
    Completed,
    /// Retired; no further transitions are permitted.
    Archived,
}

impl ProjectStatus {
    /// Returns whether the lifecycle permits moving from `self` to `next`.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self != next && !self.is_terminal()
    }

    /// Returns whether no further transitions are permitted.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Archived)
    }
}

impl Token for ProjectStatus {
    const FIELD: &'static str = "Status";
    const ALL: &'static [Self] = &[
        Self::Planning,
        Self::Active,
        Self::OnHold,
        Self::Completed,
        Self::Archived,
    ];
    const TOKENS: &'static [&'static str] =
        &["planning", "active", "on_hold", "completed", "archived"];

    fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Active => "active",
            Self::OnHold => "on_hold",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ProjectStatus> for String {
    fn from(value: ProjectStatus) -> Self {
        value.as_str().to_owned()
    }
}

/// Input for creating a [`Project`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    name: String,
    description: String,
    owner: Option<UserId>,
    contact_email: Option<String>,
    status: Option<String>,
}

impl ProjectDraft {
    /// Creates a draft with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            owner: None,
            contact_email: None,
            status: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the owner, who also becomes the first member.
    #[must_use]
    pub const fn with_owner(mut self, owner: UserId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Sets the contact e-mail address.
    #[must_use]
    pub fn with_contact_email(mut self, email: impl Into<String>) -> Self {
        self.contact_email = Some(email.into());
        self
    }

    /// Sets the initial status token.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Partial update for a [`Project`]; unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    name: Option<String>,
    description: Option<String>,
    contact_email: Change<String>,
    status: Option<String>,
}

impl ProjectPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces or clears the contact e-mail address.
    #[must_use]
    pub fn contact_email(mut self, email: Option<String>) -> Self {
        self.contact_email = Change::from_option(email);
        self
    }

    /// Requests a status change.
    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// A group of tasks with an owner and members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    metadata: Metadata,
    name: String,
    description: String,
    owner: Option<UserId>,
    contact_email: Option<String>,
    status: ProjectStatus,
    members: BTreeSet<UserId>,
    task_count: u32,
    completed_task_count: u32,
}

impl Project {
    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the owner, if any.
    #[must_use]
    pub const fn owner(&self) -> Option<UserId> {
        self.owner
    }

    /// Returns the contact e-mail address, if any.
    #[must_use]
    pub fn contact_email(&self) -> Option<&str> {
        self.contact_email.as_deref()
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns the members in ascending order; includes the owner.
    #[must_use]
    pub const fn members(&self) -> &BTreeSet<UserId> {
        &self.members
    }

    /// Returns whether `user` is a member.
    #[must_use]
    pub fn is_member(&self, user: UserId) -> bool {
        self.members.contains(&user)
    }

    /// Returns the number of tasks recorded against the project.
    #[must_use]
    pub const fn task_count(&self) -> u32 {
        self.task_count
    }

    /// Returns the number of completed tasks recorded against the project.
    #[must_use]
    pub const fn completed_task_count(&self) -> u32 {
        self.completed_task_count
    }

    /// Returns completion as a percentage in `0.0..=100.0`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "progress is a display ratio of two small counters"
    )]
    pub fn progress(&self) -> f64 {
        if self.task_count == 0 {
            return 0.0;
        }
        f64::from(self.completed_task_count) / f64::from(self.task_count) * 100.0
    }

    /// Adds a member; returns `false` when already present.
    pub fn add_member(&mut self, user: UserId, now: DateTime<Utc>) -> bool {
        let inserted = self.members.insert(user);
        if inserted {
            self.metadata.touch(now);
        }
        inserted
    }

    /// Removes a member; the owner cannot be removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when `user` is the owner.
    pub fn remove_member(&mut self, user: UserId, now: DateTime<Utc>) -> AppResult<bool> {
        if self.owner == Some(user) {
            return Err(AppError::conflict(format!(
                "user {user} owns project {} and cannot be removed",
                self.metadata.id()
            )));
        }
        let removed = self.members.remove(&user);
        if removed {
            self.metadata.touch(now);
        }
        Ok(removed)
    }

    /// Moves the project to `next`, enforcing the lifecycle.
    ///
    /// Requesting the current status is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the project is archived.
    pub fn transition_to(&mut self, next: ProjectStatus, now: DateTime<Utc>) -> AppResult<()> {
        if next == self.status {
            return Ok(());
        }
        if !self.status.can_transition_to(next) {
            return Err(AppError::validation(format!(
                "invalid project status transition: {} -> {next}",
                self.status
            )));
        }
        self.status = next;
        self.metadata.touch(now);
        Ok(())
    }

    /// Records a task added to the project.
    pub fn record_task_added(&mut self, now: DateTime<Utc>) {
        self.task_count = self.task_count.saturating_add(1);
        self.metadata.touch(now);
    }

    /// Records a task of the project being completed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when every recorded task is already
    /// completed.
    pub fn record_task_completed(&mut self, now: DateTime<Utc>) -> AppResult<()> {
        if self.completed_task_count >= self.task_count {
            return Err(AppError::conflict(format!(
                "project {} has no open tasks to complete",
                self.metadata.id()
            )));
        }
        self.completed_task_count = self.completed_task_count.saturating_add(1);
        self.metadata.touch(now);
        Ok(())
    }
}

impl Validatable for Project {
    fn validate(&self, config: &AppConfig) -> Validation {
        Required::new("Project name")
            .validate(&self.name)
            .and_then(|| {
                config
                    .project_name
                    .validator("Project name")
                    .validate(self.name.trim())
            })
            .and_then(|| {
                config
                    .project_description
                    .validator("Description")
                    .validate(&self.description)
            })
            .and_then(|| {
                let email = self.contact_email.as_deref();
                config
                    .email
                    .validator("Email")
                    .validate_optional(email)
                    .and_then(|| EmailFormat.validate_optional(email))
            })
            .and_then(|| {
                self.members
                    .iter()
                    .map(|member| positive_id("member id", member.value()))
                    .find(|outcome| !outcome.is_valid())
                    .unwrap_or(Validation::Valid)
            })
    }
}

impl Serializable for Project {
    fn to_dict(&self) -> Map<String, Value> {
        self.metadata.dict_with(json!({
            "name": self.name,
            "description": self.description,
            "owner_id": self.owner.map(UserId::value),
            "contact_email": self.contact_email,
            "status": self.status.as_str(),
            "members": self.members.iter().copied().map(UserId::value).collect::<Vec<_>>(),
            "task_count": self.task_count,
            "completed_task_count": self.completed_task_count,
            "progress": self.progress(),
        }))
    }
}

impl Entity for Project {
    const KIND: &'static str = "Project";
    type Draft = ProjectDraft;
    type Patch = ProjectPatch;

    fn from_draft(
        metadata: Metadata,
        draft: ProjectDraft,
        config: &AppConfig,
    ) -> AppResult<Self> {
        let status = parse_or(draft.status.as_deref(), config.defaults.project_status)?;
        Ok(Self {
            metadata,
            name: draft.name,
            description: draft.description,
            owner: draft.owner,
            contact_email: draft.contact_email,
            status,
            members: draft.owner.into_iter().collect(),
            task_count: 0,
            completed_task_count: 0,
        })
    }

    fn apply_patch(&mut self, patch: ProjectPatch, now: DateTime<Utc>) -> AppResult<()> {
        if let Some(status) = patch.status.as_deref() {
            self.transition_to(ProjectStatus::parse(status)?, now)?;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        patch.contact_email.apply_to(&mut self.contact_email);
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

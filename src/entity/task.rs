//! Task entity and its status and priority enumerations.

use super::{
    Change, Entity, EntityId, Metadata, Serializable, Token, UserId, Validatable, token::parse_or,
};
use crate::{
    config::AppConfig,
    error::{AppError, AppResult},
    validation::{Required, Validation, Validator, positive_id},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::BTreeSet;
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not started.
    Pending,
    /// Work is under way.
    InProgress,
    /// Work is finished.
    Completed,
    /// The task is retired; no further transitions are permitted.
    Archived,
}

impl TaskStatus {
    /// Returns whether the lifecycle permits moving from `self` to `next`.
    ///
    /// Staying in the same status is not a transition and returns `false`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::InProgress | Self::Completed | Self::Archived)
                | (Self::InProgress, Self::Completed | Self::Archived)
                | (Self::Completed, Self::Archived)
        )
    }

    /// Returns whether no further transitions are permitted.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Archived)
    }

    /// Returns whether the task still counts as open work.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}

impl Token for TaskStatus {
    const FIELD: &'static str = "Status";
    const ALL: &'static [Self] = &[
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Archived,
    ];
    const TOKENS: &'static [&'static str] = &["pending", "in_progress", "completed", "archived"];

    fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<TaskStatus> for String {
    fn from(value: TaskStatus) -> Self {
        value.as_str().to_owned()
    }
}

/// Task urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Normal urgency.
    Medium,
    /// Should be handled soon.
    High,
    /// Needs immediate attention.
    Critical,
}

impl Token for TaskPriority {
    const FIELD: &'static str = "Priority";
    const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::High, Self::Critical];
    const TOKENS: &'static [&'static str] = &["low", "medium", "high", "critical"];

    fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<TaskPriority> for String {
    fn from(value: TaskPriority) -> Self {
        value.as_str().to_owned()
    }
}

/// Input for creating a [`Task`].
///
/// Status and priority are raw tokens so that out-of-range values reach
/// validation instead of being unrepresentable at the call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: String,
    project_id: Option<EntityId>,
    status: Option<String>,
    priority: Option<String>,
    due_date: Option<DateTime<Utc>>,
    assignee: Option<UserId>,
    tags: Vec<String>,
}

impl TaskDraft {
    /// Creates a draft with only a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            project_id: None,
            status: None,
            priority: None,
            due_date: None,
            assignee: None,
            tags: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the owning project.
    #[must_use]
    pub const fn with_project(mut self, project_id: EntityId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Sets the initial status token.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the priority token.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Partial update for a [`Task`]; unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<String>,
    description: Option<String>,
    project_id: Change<EntityId>,
    status: Option<String>,
    priority: Option<String>,
    due_date: Change<DateTime<Utc>>,
    assignee: Change<UserId>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces or clears the owning project.
    #[must_use]
    pub fn project(mut self, project_id: Option<EntityId>) -> Self {
        self.project_id = Change::from_option(project_id);
        self
    }

    /// Requests a status change.
    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Replaces or clears the due date.
    #[must_use]
    pub fn due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = Change::from_option(due_date);
        self
    }

    /// Replaces or clears the assignee.
    #[must_use]
    pub fn assignee(mut self, assignee: Option<UserId>) -> Self {
        self.assignee = Change::from_option(assignee);
        self
    }
}

/// A unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    metadata: Metadata,
    title: String,
    description: String,
    project_id: Option<EntityId>,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<DateTime<Utc>>,
    assignee: Option<UserId>,
    tags: BTreeSet<String>,
    completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the owning project, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<EntityId> {
        self.project_id
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    /// Returns the tags in sorted order.
    #[must_use]
    pub const fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Returns whether the task carries `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag.trim())
    }

    /// Returns when the task was completed, if it ever was.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns whether the due date has passed while the task is still open.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status.is_open() && self.due_date.is_some_and(|due| now > due)
    }

    /// Moves the task to `next`, enforcing the lifecycle.
    ///
    /// Requesting the current status is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the lifecycle does not permit
    /// the transition.
    pub fn transition_to(&mut self, next: TaskStatus, now: DateTime<Utc>) -> AppResult<()> {
        if next == self.status {
            return Ok(());
        }
        if !self.status.can_transition_to(next) {
            return Err(AppError::validation(format!(
                "invalid task status transition: {} -> {next}",
                self.status
            )));
        }
        self.status = next;
        if next == TaskStatus::Completed {
            self.completed_at = Some(now);
        }
        self.metadata.touch(now);
        Ok(())
    }

    /// Adds a tag; returns `false` when it was already present.
    pub fn add_tag(&mut self, tag: &str, now: DateTime<Utc>) -> bool {
        let inserted = self.tags.insert(tag.trim().to_owned());
        if inserted {
            self.metadata.touch(now);
        }
        inserted
    }

    /// Removes a tag; returns `false` when it was absent.
    pub fn remove_tag(&mut self, tag: &str, now: DateTime<Utc>) -> bool {
        let removed = self.tags.remove(tag.trim());
        if removed {
            self.metadata.touch(now);
        }
        removed
    }
}

impl Validatable for Task {
    fn validate(&self, config: &AppConfig) -> Validation {
        Required::new("Title")
            .validate(&self.title)
            .and_then(|| config.task_title.validator("Title").validate(self.title.trim()))
            .and_then(|| {
                config
                    .task_description
                    .validator("Description")
                    .validate(&self.description)
            })
            .and_then(|| {
                self.project_id
                    .map_or(Validation::Valid, |id| positive_id("project_id", id.value()))
            })
            .and_then(|| {
                self.assignee
                    .map_or(Validation::Valid, |id| positive_id("assignee_id", id.value()))
            })
            .and_then(|| {
                if self.tags.iter().any(String::is_empty) {
                    Validation::invalid("Tags must not be empty")
                } else {
                    Validation::Valid
                }
            })
    }
}

impl Serializable for Task {
    fn to_dict(&self) -> Map<String, Value> {
        self.metadata.dict_with(json!({
            "title": self.title,
            "description": self.description,
            "project_id": self.project_id.map(EntityId::value),
            "status": self.status.as_str(),
            "priority": self.priority.as_str(),
            "due_date": self.due_date.map(|due| due.to_rfc3339()),
            "assignee_id": self.assignee.map(UserId::value),
            "tags": self.tags,
            "completed_at": self.completed_at.map(|at| at.to_rfc3339()),
        }))
    }
}

impl Entity for Task {
    const KIND: &'static str = "Task";
    type Draft = TaskDraft;
    type Patch = TaskPatch;

    fn from_draft(metadata: Metadata, draft: TaskDraft, config: &AppConfig) -> AppResult<Self> {
        let status = parse_or(draft.status.as_deref(), config.defaults.task_status)?;
        let priority = parse_or(draft.priority.as_deref(), config.defaults.task_priority)?;
        Ok(Self {
            metadata,
            title: draft.title,
            description: draft.description,
            project_id: draft.project_id,
            status,
            priority,
            due_date: draft.due_date,
            assignee: draft.assignee,
            tags: draft.tags.iter().map(|tag| tag.trim().to_owned()).collect(),
            completed_at: (status == TaskStatus::Completed).then_some(metadata.created_at()),
        })
    }

    fn apply_patch(&mut self, patch: TaskPatch, now: DateTime<Utc>) -> AppResult<()> {
        if let Some(status) = patch.status.as_deref() {
            self.transition_to(TaskStatus::parse(status)?, now)?;
        }
        if let Some(priority) = patch.priority.as_deref() {
            self.priority = TaskPriority::parse(priority)?;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        patch.project_id.apply_to(&mut self.project_id);
        patch.due_date.apply_to(&mut self.due_date);
        patch.assignee.apply_to(&mut self.assignee);
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

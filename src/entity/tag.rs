//! Tag entity with usage tracking.

use super::{Change, Entity, Metadata, Serializable, Validatable};
use crate::{
    config::AppConfig,
    error::AppResult,
    validation::{Alphanumeric, HexColor, Required, Validation, Validator},
};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};

/// Input for creating a [`Tag`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDraft {
    name: String,
    color: Option<String>,
}

impl TagDraft {
    /// Creates a draft with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
        }
    }

    /// Sets the `#RRGGBB` colour.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Partial update for a [`Tag`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPatch {
    name: Option<String>,
    color: Change<String>,
}

impl TagPatch {
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

    /// Replaces or clears the colour.
    #[must_use]
    pub fn color(mut self, color: Option<String>) -> Self {
        self.color = Change::from_option(color);
        self
    }
}

/// A short alphanumeric label. Names are unique ignoring case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    metadata: Metadata,
    name: String,
    color: Option<String>,
    usage_count: u32,
}

impl Tag {
    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the colour, if any.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Returns how many times the tag has been applied.
    #[must_use]
    pub const fn usage_count(&self) -> u32 {
        self.usage_count
    }

    /// Records one more use of the tag.
    pub fn increment_usage(&mut self, now: DateTime<Utc>) {
        self.usage_count = self.usage_count.saturating_add(1);
        self.metadata.touch(now);
    }

    /// Records one use fewer; stays at zero.
    pub fn decrement_usage(&mut self, now: DateTime<Utc>) {
        if self.usage_count > 0 {
            self.usage_count -= 1;
            self.metadata.touch(now);
        }
    }
}

impl Validatable for Tag {
    fn validate(&self, config: &AppConfig) -> Validation {
        Required::new("Tag name")
            .validate(&self.name)
            .and_then(|| config.tag_name.validator("Tag name").validate(&self.name))
            .and_then(|| Alphanumeric::new("Tag name").validate(&self.name))
            .and_then(|| HexColor.validate_optional(self.color.as_deref()))
    }
}

impl Serializable for Tag {
    fn to_dict(&self) -> Map<String, Value> {
        self.metadata.dict_with(json!({
            "name": self.name,
            "color": self.color,
            "usage_count": self.usage_count,
        }))
    }
}

impl Entity for Tag {
    const KIND: &'static str = "Tag";
    type Draft = TagDraft;
    type Patch = TagPatch;

    fn from_draft(metadata: Metadata, draft: TagDraft, _config: &AppConfig) -> AppResult<Self> {
        Ok(Self {
            metadata,
            name: draft.name,
            color: draft.color,
            usage_count: 0,
        })
    }

    fn apply_patch(&mut self, patch: TagPatch, now: DateTime<Utc>) -> AppResult<()> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        patch.color.apply_to(&mut self.color);
        self.metadata.touch(now);
        Ok(())
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.name.trim().to_lowercase())
    }
}

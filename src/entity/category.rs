//! Category entity used to group tasks by colour-coded topic.

use super::{Entity, Metadata, Serializable, Validatable};
use crate::{
    config::AppConfig,
    error::AppResult,
    validation::{HexColor, Required, Validation, Validator},
};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};

/// Input for creating a [`Category`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    name: String,
    color: Option<String>,
    description: String,
}

impl CategoryDraft {
    /// Creates a draft with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
            description: String::new(),
        }
    }

    /// Sets the `#RRGGBB` colour.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Partial update for a [`Category`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    name: Option<String>,
    color: Option<String>,
    description: Option<String>,
}

impl CategoryPatch {
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

    /// Replaces the colour.
    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A named, coloured grouping of tasks. Names are unique ignoring case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    metadata: Metadata,
    name: String,
    color: String,
    description: String,
    task_count: u32,
}

impl Category {
    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the `#RRGGBB` colour.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns how many tasks are filed under this category.
    #[must_use]
    pub const fn task_count(&self) -> u32 {
        self.task_count
    }

    /// Records one more task filed under this category.
    pub fn increment_task_count(&mut self, now: DateTime<Utc>) {
        self.task_count = self.task_count.saturating_add(1);
        self.metadata.touch(now);
    }

    /// Records one task fewer; stays at zero.
    pub fn decrement_task_count(&mut self, now: DateTime<Utc>) {
        if self.task_count > 0 {
            self.task_count -= 1;
            self.metadata.touch(now);
        }
    }
}

impl Validatable for Category {
    fn validate(&self, config: &AppConfig) -> Validation {
        Required::new("Category name")
            .validate(&self.name)
            .and_then(|| {
                config
                    .category_name
                    .validator("Category name")
                    .validate(self.name.trim())
            })
            .and_then(|| HexColor.validate(&self.color))
            .and_then(|| {
                config
                    .category_description
                    .validator("Description")
                    .validate(&self.description)
            })
    }
}

impl Serializable for Category {
    fn to_dict(&self) -> Map<String, Value> {
        self.metadata.dict_with(json!({
            "name": self.name,
            "color": self.color,
            "description": self.description,
            "task_count": self.task_count,
        }))
    }
}

impl Entity for Category {
    const KIND: &'static str = "Category";
    type Draft = CategoryDraft;
    type Patch = CategoryPatch;

    fn from_draft(
        metadata: Metadata,
        draft: CategoryDraft,
        config: &AppConfig,
    ) -> AppResult<Self> {
        Ok(Self {
            metadata,
            name: draft.name,
            color: draft
                .color
                .unwrap_or_else(|| config.defaults.category_color.clone()),
            description: draft.description,
            task_count: 0,
        })
    }

    fn apply_patch(&mut self, patch: CategoryPatch, now: DateTime<Utc>) -> AppResult<()> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(description) = patch.description {
            self.description = description;
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

    fn unique_key(&self) -> Option<String> {
        Some(self.name.trim().to_lowercase())
    }
}

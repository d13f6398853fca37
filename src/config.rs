//! Validation limits and default values for every entity variant.
//!
//! [`AppConfig`] is the single catalogue of length bounds, default statuses
//! and colour palette. Repositories receive it at construction time and
//! hand it to [`crate::entity::Validatable::validate`].
//!
//! # Examples
//!
//! ```
//! use taskledger::config::AppConfig;
//!
//! let config = AppConfig::default();
//! assert_eq!(config.task_title.min, 3);
//!
//! let custom = AppConfig::from_json_str(r#"{ "task_title": { "min": 5, "max": 80 } }"#)
//!     .expect("valid config");
//! assert_eq!(custom.task_title.min, 5);
//! assert_eq!(custom.tag_name, AppConfig::default().tag_name);
//! ```

use crate::entity::{NotificationStatus, ProjectStatus, TaskPriority, TaskStatus};
use crate::validation::StringLength;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inclusive character-count bounds for a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthBounds {
    /// Minimum number of characters.
    pub min: usize,
    /// Maximum number of characters.
    pub max: usize,
}

impl LengthBounds {
    /// Creates bounds from a minimum and maximum.
    #[must_use]
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Builds a length validator for the named field.
    #[must_use]
    pub const fn validator(self, field: &'static str) -> StringLength {
        StringLength::new(field, self.min, self.max)
    }
}

/// Default values applied when a draft leaves a field unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Initial task status.
    pub task_status: TaskStatus,
    /// Initial task priority.
    pub task_priority: TaskPriority,
    /// Initial project status.
    pub project_status: ProjectStatus,
    /// Initial notification status.
    pub notification_status: NotificationStatus,
    /// Category colour when none is given.
    pub category_color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            task_status: TaskStatus::Pending,
            task_priority: TaskPriority::Medium,
            project_status: ProjectStatus::Planning,
            notification_status: NotificationStatus::Unread,
            category_color: "#000000".to_owned(),
        }
    }
}

/// Limits and defaults for entity validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Task title length.
    pub task_title: LengthBounds,
    /// Task description length.
    pub task_description: LengthBounds,
    /// Project name length.
    pub project_name: LengthBounds,
    /// Project description length.
    pub project_description: LengthBounds,
    /// Category name length.
    pub category_name: LengthBounds,
    /// Category description length.
    pub category_description: LengthBounds,
    /// Tag name length.
    pub tag_name: LengthBounds,
    /// Notification message length.
    pub notification_message: LengthBounds,
    /// E-mail address length.
    pub email: LengthBounds,
    /// Values used for unset draft fields.
    pub defaults: Defaults,
    /// Predefined category colours offered to callers.
    pub palette: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            task_title: LengthBounds::new(3, 200),
            task_description: LengthBounds::new(0, 5000),
            project_name: LengthBounds::new(3, 100),
            project_description: LengthBounds::new(0, 5000),
            category_name: LengthBounds::new(2, 50),
            category_description: LengthBounds::new(0, 1000),
            tag_name: LengthBounds::new(2, 50),
            notification_message: LengthBounds::new(3, 500),
            email: LengthBounds::new(5, 255),
            defaults: Defaults::default(),
            palette: [
                "#FF5733", "#0066FF", "#00CC66", "#FFCC00", "#9933FF", "#FF9900", "#FF66CC",
                "#00CCFF",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
        }
    }
}

impl AppConfig {
    /// Creates a strict configuration with tighter text limits.
    ///
    /// Useful for callers that render entities in constrained layouts.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            task_title: LengthBounds::new(5, 80),
            task_description: LengthBounds::new(0, 1000),
            project_name: LengthBounds::new(3, 60),
            project_description: LengthBounds::new(0, 1000),
            tag_name: LengthBounds::new(2, 30),
            notification_message: LengthBounds::new(3, 200),
            ..Self::default()
        }
    }

    /// Parses a configuration from JSON; absent keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the document is malformed and
    /// [`ConfigError::InvalidBounds`] when a minimum exceeds its maximum.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.check_bounds()?;
        Ok(config)
    }

    fn check_bounds(&self) -> Result<(), ConfigError> {
        let named = [
            ("task_title", self.task_title),
            ("task_description", self.task_description),
            ("project_name", self.project_name),
            ("project_description", self.project_description),
            ("category_name", self.category_name),
            ("category_description", self.category_description),
            ("tag_name", self.tag_name),
            ("notification_message", self.notification_message),
            ("email", self.email),
        ];
        match named.into_iter().find(|(_, bounds)| bounds.min > bounds.max) {
            Some((field, bounds)) => Err(ConfigError::InvalidBounds {
                field,
                min: bounds.min,
                max: bounds.max,
            }),
            None => Ok(()),
        }
    }
}

/// Errors returned while loading an [`AppConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("invalid configuration document: {0}")]
    Parse(#[source] serde_json::Error),

    /// A length bound has `min > max`.
    #[error("invalid bounds for {field}: min {min} exceeds max {max}")]
    InvalidBounds {
        /// Offending field.
        field: &'static str,
        /// Configured minimum.
        min: usize,
        /// Configured maximum.
        max: usize,
    },
}

//! Loading and applying custom validation limits.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::sync::Arc;

use super::helpers::{StepClock, repository_with};
use rstest::rstest;
use taskledger::{
    config::{AppConfig, ConfigError, LengthBounds},
    entity::{Project, ProjectDraft, ProjectStatus, Task, TaskDraft, TaskStatus},
    error::AppError,
    repository::Repository,
};

#[rstest]
fn json_overrides_merge_with_defaults() {
    let config = AppConfig::from_json_str(
        r#"{
            "task_title": { "min": 10, "max": 20 },
            "defaults": { "task_status": "in_progress" }
        }"#,
    )
    .expect("valid document");

    assert_eq!(config.task_title, LengthBounds::new(10, 20));
    assert_eq!(config.defaults.task_status, TaskStatus::InProgress);
    assert_eq!(config.tag_name, AppConfig::default().tag_name);
    assert_eq!(config.defaults.project_status, ProjectStatus::Planning);
}

#[rstest]
#[case(r#"{ "tag_name": { "min": 9, "max": 3 } }"#)]
#[case("not json")]
fn broken_documents_are_rejected(#[case] raw: &str) {
    let result = AppConfig::from_json_str(raw);
    assert!(matches!(
        result,
        Err(ConfigError::InvalidBounds { .. } | ConfigError::Parse(_))
    ));
}

#[rstest]
fn inverted_bounds_name_the_field() {
    let err = AppConfig::from_json_str(r#"{ "email": { "min": 300, "max": 5 } }"#)
        .expect_err("inverted bounds");
    assert_eq!(
        err.to_string(),
        "invalid bounds for email: min 300 exceeds max 5"
    );
}

#[rstest]
fn repository_applies_custom_limits_and_defaults() {
    let config = Arc::new(
        AppConfig::from_json_str(
            r#"{
                "task_title": { "min": 10, "max": 20 },
                "defaults": { "task_status": "in_progress" }
            }"#,
        )
        .expect("valid document"),
    );
    let mut tasks: Repository<Task, StepClock> = repository_with(&config);

    assert_eq!(
        tasks.create(TaskDraft::new("Too short")),
        Err(AppError::validation("Title must be at least 10 characters"))
    );
    let task = tasks
        .create(TaskDraft::new("Long enough title"))
        .expect("within limits");
    assert_eq!(task.status(), TaskStatus::InProgress);
}

#[rstest]
fn strict_config_tightens_project_names() {
    let config = Arc::new(AppConfig::strict());
    let mut projects: Repository<Project, StepClock> = repository_with(&config);

    let long_name = "p".repeat(61);
    assert_eq!(
        projects.create(ProjectDraft::new(long_name)),
        Err(AppError::validation("Project name cannot exceed 60 characters"))
    );
}

//! Cross-repository flows rendered as response envelopes.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::sync::Arc;

use super::helpers::{StepClock, repository_with};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use taskledger::{
    config::AppConfig,
    entity::{
        Entity, EntityId, Notification, NotificationDraft, NotificationType, Project,
        ProjectDraft, Serializable, Task, TaskDraft, Token, UserId,
    },
    error::AppResult,
    repository::{NotificationStats, Repository},
    response::{ApiResponse, ResponseStatus},
};

struct Workspace {
    projects: Repository<Project, StepClock>,
    tasks: Repository<Task, StepClock>,
    notifications: Repository<Notification, StepClock>,
    clock: StepClock,
}

#[fixture]
fn workspace() -> Workspace {
    let config = Arc::new(AppConfig::default());
    Workspace {
        projects: repository_with(&config),
        tasks: repository_with(&config),
        notifications: repository_with(&config),
        clock: StepClock::new(),
    }
}

fn envelope<E: Serializable>(
    result: AppResult<E>,
    status: ResponseStatus,
    clock: &StepClock,
) -> ApiResponse<Value> {
    ApiResponse::respond(result.map(|entity| entity.to_json()), status, "ok", clock)
}

#[rstest]
fn assigning_and_completing_a_task(mut workspace: Workspace) -> eyre::Result<()> {
    let owner = UserId::new(1);
    let assignee = UserId::new(2);
    let project = workspace
        .projects
        .create(ProjectDraft::new("Release 1.0").with_owner(owner))?;
    workspace.projects.add_member(project.id(), assignee)?;

    let task = workspace.tasks.create(
        TaskDraft::new("Tag the release")
            .with_project(project.id())
            .with_assignee(assignee),
    )?;
    workspace.projects.record_task_added(project.id())?;
    workspace.notifications.create(
        NotificationDraft::new(
            assignee,
            "You were assigned 'Tag the release'",
            NotificationType::TaskAssigned.as_str(),
        )
        .with_related_entity(task.id(), "task"),
    )?;

    workspace.tasks.mark_in_progress(task.id())?;
    workspace.tasks.mark_completed(task.id())?;
    let project_after = workspace.projects.record_task_completed(project.id())?;

    eyre::ensure!(
        project_after.to_dict().get("progress") == Some(&json!(100.0)),
        "project should be fully complete"
    );
    eyre::ensure!(
        workspace.tasks.find_by_project(project.id()).len() == 1,
        "task should be linked to the project"
    );
    eyre::ensure!(
        workspace.notifications.unread_count(assignee) == 1,
        "assignee should have one unread notification"
    );

    let unread: Vec<EntityId> = workspace
        .notifications
        .find_unread(assignee)
        .into_iter()
        .map(Entity::id)
        .collect();
    for id in unread {
        workspace.notifications.mark_as_read(id)?;
    }
    eyre::ensure!(
        workspace.notifications.stats()
            == NotificationStats {
                total: 1,
                unread: 0,
                read: 1,
                archived: 0,
            },
        "notification should be read"
    );
    Ok(())
}

#[rstest]
fn envelopes_report_created_and_errors(mut workspace: Workspace) {
    let created = envelope(
        workspace.tasks.create(TaskDraft::new("Write changelog")),
        ResponseStatus::Created,
        &workspace.clock,
    );
    assert_eq!(created.status_code(), 201);
    assert_eq!(
        created
            .data()
            .and_then(|data| data.get("title"))
            .and_then(Value::as_str),
        Some("Write changelog")
    );

    let invalid = envelope(
        workspace.tasks.create(TaskDraft::new("no")),
        ResponseStatus::Created,
        &workspace.clock,
    );
    assert_eq!(invalid.status_code(), 400);

    let missing = envelope(
        workspace.tasks.get(EntityId::new(77)).cloned(),
        ResponseStatus::Success,
        &workspace.clock,
    );
    let body = missing.to_json().expect("serialisable");
    assert_eq!(body.get("error_code"), Some(&json!("NOT_FOUND")));
    assert_eq!(body.get("message"), Some(&json!("Task not found: 77")));
    assert_eq!(body.get("status"), Some(&json!("error")));
}

#[rstest]
fn deleted_envelope_has_no_payload(mut workspace: Workspace) {
    let task = workspace
        .tasks
        .create(TaskDraft::new("Throwaway"))
        .expect("valid draft");

    let response: ApiResponse<()> = ApiResponse::respond(
        workspace.tasks.delete(task.id()),
        ResponseStatus::Deleted,
        "Task deleted",
        &workspace.clock,
    );

    assert!(response.is_success());
    assert_eq!(response.status_code(), 200);
    let body = response.to_json().expect("serialisable");
    assert_eq!(body.get("status"), Some(&json!("deleted")));
    assert!(body.get("data").is_none());
    assert!(workspace.tasks.find(task.id()).is_none());
}

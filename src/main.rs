//! Walks through every repository with sample data and logs the resulting
//! response envelopes.
//!
//! Set `RUST_LOG` to change verbosity; the default level is `info`.

use std::sync::Arc;

use eyre::Result;
use flexi_logger::Logger;
use log::{info, warn};
use mockable::DefaultClock;
use serde::Serialize;
use serde_json::Value;
use taskledger::{
    config::AppConfig,
    entity::{
        CategoryDraft, Entity, EntityId, NotificationDraft, NotificationType, ProjectDraft,
        Serializable, Tag, TagDraft, TaskDraft, TaskPatch, TaskStatus, Token, UserId,
    },
    error::AppResult,
    repository::{
        CategoryRepository, NotificationRepository, ProjectRepository, TagRepository,
        TaskRepository,
    },
    response::{ApiResponse, ResponseStatus},
};

fn main() -> Result<()> {
    let _logger = Logger::try_with_env_or_str("info")?
        .format(flexi_logger::detailed_format)
        .start()?;

    let config = Arc::new(AppConfig::default());
    let mut projects = ProjectRepository::new(Arc::clone(&config), DefaultClock);
    let mut tasks = TaskRepository::new(Arc::clone(&config), DefaultClock);
    let mut categories = CategoryRepository::new(Arc::clone(&config), DefaultClock);
    let mut tags = TagRepository::new(Arc::clone(&config), DefaultClock);
    let mut notifications = NotificationRepository::new(config, DefaultClock);

    let project_id = demo_projects(&mut projects)?;
    demo_tasks(&mut tasks, &mut projects, project_id)?;
    demo_categories(&mut categories)?;
    demo_tags(&mut tags)?;
    demo_notifications(&mut notifications)?;
    demo_errors(&mut tasks)?;

    info!(
        "done: {} projects, {} tasks, {} categories, {} tags, {} notifications",
        projects.count(),
        tasks.count(),
        categories.count(),
        tags.count(),
        notifications.count()
    );
    Ok(())
}

fn report<T: Serialize>(response: &ApiResponse<T>) -> Result<()> {
    let body = response.to_json()?;
    if response.is_success() {
        info!("{} {body}", response.status_code());
    } else {
        warn!("{} {body}", response.status_code());
    }
    Ok(())
}

fn respond<E: Serializable>(
    result: AppResult<E>,
    status: ResponseStatus,
    message: &str,
) -> Result<()> {
    let response: ApiResponse<Value> = ApiResponse::respond(
        result.map(|entity| entity.to_json()),
        status,
        message,
        &DefaultClock,
    );
    report(&response)
}

fn demo_projects(projects: &mut ProjectRepository) -> Result<EntityId> {
    info!("== projects ==");
    let owner = UserId::new(1);
    let project = projects.create(
        ProjectDraft::new("Website relaunch")
            .with_description("Replace the marketing site")
            .with_owner(owner)
            .with_contact_email("web@example.com"),
    )?;
    respond(Ok(project.clone()), ResponseStatus::Created, "Project created")?;

    respond(
        projects.add_member(project.id(), UserId::new(2)),
        ResponseStatus::Updated,
        "Member added",
    )?;
    respond(
        projects.activate(project.id()),
        ResponseStatus::Updated,
        "Project activated",
    )?;
    info!("active projects: {}", projects.find_active().len());
    Ok(project.id())
}

fn demo_tasks(
    tasks: &mut TaskRepository,
    projects: &mut ProjectRepository,
    project_id: EntityId,
) -> Result<()> {
    info!("== tasks ==");
    let mut created = Vec::new();
    for (title, priority) in [
        ("Draft sitemap", "high"),
        ("Write copy", "medium"),
        ("Pick colour scheme", "low"),
    ] {
        let task = tasks.create(
            TaskDraft::new(title)
                .with_project(project_id)
                .with_priority(priority)
                .with_assignee(UserId::new(2))
                .with_tags(["web"]),
        )?;
        projects.record_task_added(project_id)?;
        created.push(task.id());
    }

    for id in created.iter().take(2) {
        respond(
            tasks.mark_in_progress(*id),
            ResponseStatus::Updated,
            "Task started",
        )?;
    }
    if let Some(first) = created.first() {
        respond(
            tasks.mark_completed(*first),
            ResponseStatus::Updated,
            "Task completed",
        )?;
        let project = projects.record_task_completed(project_id)?;
        info!("project progress: {:.0}%", project.progress());
    }

    info!(
        "in progress: {}, tagged web: {}",
        tasks.find_by_status(TaskStatus::InProgress).len(),
        tasks.find_by_tag("web").len()
    );
    Ok(())
}

fn demo_categories(categories: &mut CategoryRepository) -> Result<()> {
    info!("== categories ==");
    let palette = categories.config().palette.clone();
    for (name, color) in ["Work", "Personal"].into_iter().zip(palette) {
        respond(
            categories.create(CategoryDraft::new(name).with_color(color)),
            ResponseStatus::Created,
            "Category created",
        )?;
    }
    respond(
        categories.create(CategoryDraft::new("work")),
        ResponseStatus::Created,
        "Category created",
    )?;
    let work = categories.get_by_name("WORK")?.id();
    respond(
        categories.increment_task_count(work),
        ResponseStatus::Updated,
        "Category task count updated",
    )?;
    Ok(())
}

fn demo_tags(tags: &mut TagRepository) -> Result<()> {
    info!("== tags ==");
    for name in ["rust", "backend", "urgent"] {
        tags.create(TagDraft::new(name))?;
    }
    let rust = tags.get_by_name("rust")?.id();
    tags.increment_usage(rust)?;
    tags.increment_usage(rust)?;
    respond(
        tags.create(TagDraft::new("Rust")),
        ResponseStatus::Created,
        "Tag created",
    )?;
    let popular: Vec<&str> = tags.popular(2).into_iter().map(Tag::name).collect();
    info!("popular tags: {popular:?}");
    Ok(())
}

fn demo_notifications(notifications: &mut NotificationRepository) -> Result<()> {
    info!("== notifications ==");
    let user = UserId::new(2);
    for (message, kind) in [
        ("You were assigned 'Draft sitemap'", NotificationType::TaskAssigned),
        ("'Draft sitemap' was completed", NotificationType::TaskCompleted),
    ] {
        notifications.create(NotificationDraft::new(user, message, kind.as_str()))?;
    }
    let unread: Vec<EntityId> = notifications
        .find_unread(user)
        .into_iter()
        .map(Entity::id)
        .collect();
    if let Some(first) = unread.first() {
        respond(
            notifications.mark_as_read(*first),
            ResponseStatus::Updated,
            "Notification read",
        )?;
    }
    let stats = notifications.stats();
    report(&ApiResponse::success(stats, "Notification stats", &DefaultClock))?;
    Ok(())
}

fn demo_errors(tasks: &mut TaskRepository) -> Result<()> {
    info!("== error handling ==");
    respond(
        tasks.create(TaskDraft::new("ab")),
        ResponseStatus::Created,
        "Task created",
    )?;
    respond(
        tasks.update(EntityId::new(1), TaskPatch::new().status("blocked")),
        ResponseStatus::Updated,
        "Task updated",
    )?;
    let missing = EntityId::new(999);
    respond(tasks.get(missing).cloned(), ResponseStatus::Success, "Task found")?;
    let deleted: ApiResponse<()> = ApiResponse::respond(
        tasks.delete(missing),
        ResponseStatus::Deleted,
        "Task deleted",
        &DefaultClock,
    );
    report(&deleted)?;
    Ok(())
}

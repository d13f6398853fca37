//! Generic create, read, update and delete behaviour.

use super::{StepClock, repository};
use crate::entity::{
    Entity, EntityId, Notification, NotificationDraft, Project, ProjectDraft, Serializable, Tag,
    TagDraft, Task, TaskDraft, TaskPatch, TaskStatus, UserId,
};
use crate::error::AppError;
use crate::repository::Repository;
use rstest::{fixture, rstest};

type Tasks = Repository<Task, StepClock>;

#[fixture]
fn tasks() -> Tasks {
    repository()
}

#[rstest]
fn default_repository_uses_system_clock() {
    let mut tasks: Repository<Task> = Repository::with_defaults();

    let task = tasks.create(TaskDraft::new("Any title")).expect("valid draft");

    assert_eq!(task.id(), EntityId::FIRST);
    assert_eq!(tasks.config().task_title.min, 3);
}

#[rstest]
fn ids_start_at_one_and_increase(mut tasks: Tasks) {
    let first = tasks.create(TaskDraft::new("First task")).expect("valid draft");
    let second = tasks.create(TaskDraft::new("Second task")).expect("valid draft");

    assert_eq!(first.id(), EntityId::FIRST);
    assert_eq!(second.id(), EntityId::new(2));
    assert_eq!(tasks.count(), 2);
}

#[rstest]
fn ids_are_not_reused_after_delete(mut tasks: Tasks) {
    let first = tasks.create(TaskDraft::new("First task")).expect("valid draft");
    tasks.delete(first.id()).expect("stored task");

    let replacement = tasks.create(TaskDraft::new("Replacement")).expect("valid draft");

    assert_eq!(replacement.id(), EntityId::new(2));
    assert!(!tasks.exists(first.id()));
}

#[rstest]
fn rejected_create_stores_nothing(mut tasks: Tasks) {
    let result = tasks.create(TaskDraft::new("ab"));

    assert_eq!(
        result,
        Err(AppError::validation("Title must be at least 3 characters"))
    );
    assert_eq!(tasks.count(), 0);

    let accepted = tasks.create(TaskDraft::new("Valid title")).expect("valid draft");
    assert_eq!(accepted.id(), EntityId::FIRST);
}

#[rstest]
fn get_returns_stored_entity_or_not_found(mut tasks: Tasks) {
    let created = tasks.create(TaskDraft::new("Look me up")).expect("valid draft");

    assert_eq!(tasks.get(created.id()), Ok(&created));
    assert_eq!(
        tasks.get(EntityId::new(99)),
        Err(AppError::not_found("Task", EntityId::new(99)))
    );
    assert!(tasks.find(EntityId::new(99)).is_none());
}

#[rstest]
fn get_all_is_in_id_order(mut tasks: Tasks) {
    for title in ["Alpha", "Bravo", "Charlie"] {
        tasks.create(TaskDraft::new(title)).expect("valid draft");
    }

    let titles: Vec<&str> = tasks.get_all().into_iter().map(Task::title).collect();

    assert_eq!(titles, ["Alpha", "Bravo", "Charlie"]);
}

#[rstest]
fn update_refreshes_updated_at_only(mut tasks: Tasks) {
    let created = tasks.create(TaskDraft::new("Before")).expect("valid draft");

    let updated = tasks
        .update(created.id(), TaskPatch::new().title("After"))
        .expect("valid patch");

    assert_eq!(updated.title(), "After");
    assert_eq!(updated.created_at(), created.created_at());
    assert!(updated.updated_at() > created.updated_at());
    assert_eq!(tasks.get(created.id()), Ok(&updated));
}

#[rstest]
fn invalid_update_leaves_stored_entity_untouched(mut tasks: Tasks) {
    let created = tasks.create(TaskDraft::new("Keep me")).expect("valid draft");

    let result = tasks.update(created.id(), TaskPatch::new().title(""));

    assert_eq!(result, Err(AppError::validation("Title is required")));
    assert_eq!(tasks.get(created.id()), Ok(&created));
}

#[rstest]
fn failed_transition_leaves_stored_entity_untouched(mut tasks: Tasks) {
    let created = tasks
        .create(TaskDraft::new("Done already").with_status("completed"))
        .expect("valid draft");

    let result = tasks.update(created.id(), TaskPatch::new().status("in_progress"));

    assert!(matches!(result, Err(AppError::Validation { .. })));
    let stored = tasks.get(created.id()).expect("still stored");
    assert_eq!(stored.status(), TaskStatus::Completed);
    assert_eq!(stored.to_dict(), created.to_dict());
}

#[rstest]
fn update_and_delete_of_unknown_id_are_not_found(mut tasks: Tasks) {
    let missing = EntityId::new(42);

    assert!(
        tasks
            .update(missing, TaskPatch::new().title("Nope"))
            .is_err_and(|err| err.is_not_found())
    );
    assert_eq!(
        tasks.delete(missing),
        Err(AppError::not_found("Task", missing))
    );
}

#[rstest]
fn get_all_matching_filters(mut tasks: Tasks) {
    tasks.create(TaskDraft::new("Short")).expect("valid draft");
    tasks.create(TaskDraft::new("A much longer title")).expect("valid draft");

    let long = tasks.get_all_matching(|task| task.title().len() > 10);

    assert_eq!(long.len(), 1);
    assert_eq!(long.first().map(|task| task.id()), Some(EntityId::new(2)));
}

#[rstest]
fn no_op_changes_keep_updated_at() {
    let mut tags: Repository<Tag, StepClock> = repository();
    let tag = tags.create(TagDraft::new("unused")).expect("valid draft");
    let after = tags.decrement_usage(tag.id()).expect("stored tag");
    assert_eq!(after.updated_at(), tag.updated_at());
    assert_eq!(tags.get(tag.id()), Ok(&tag));

    let mut inbox: Repository<Notification, StepClock> = repository();
    let note = inbox
        .create(NotificationDraft::new(UserId::new(1), "Ping", "task_assigned"))
        .expect("valid draft");
    let read = inbox.mark_as_read(note.id()).expect("stored notification");
    let read_again = inbox.mark_as_read(note.id()).expect("stored notification");
    assert!(read.updated_at() > note.updated_at());
    assert_eq!(read_again.updated_at(), read.updated_at());

    let owner = UserId::new(7);
    let mut projects: Repository<Project, StepClock> = repository();
    let project = projects
        .create(ProjectDraft::new("Website").with_owner(owner))
        .expect("valid draft");
    let same = projects.add_member(project.id(), owner).expect("stored project");
    assert_eq!(same.updated_at(), project.updated_at());
}

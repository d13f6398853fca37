//! Task creation, defaults, updates and deletion through the repository.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use super::helpers::{StepClock, repository};
use rstest::{fixture, rstest};
use serde_json::json;
use taskledger::{
    entity::{
        Entity, EntityId, Serializable, Task, TaskDraft, TaskPatch, TaskPriority, TaskStatus,
        Validatable,
    },
    error::AppError,
    repository::Repository,
};

type Tasks = Repository<Task, StepClock>;

#[fixture]
fn tasks() -> Tasks {
    repository()
}

#[rstest]
fn create_assigns_unique_id_and_reflects_fields(mut tasks: Tasks) -> eyre::Result<()> {
    let first = tasks.create(
        TaskDraft::new("Buy groceries")
            .with_description("Milk and bread")
            .with_priority("high"),
    )?;
    let second = tasks.create(TaskDraft::new("Walk the dog"))?;

    eyre::ensure!(first.id() != second.id(), "ids must be unique");
    let dict = first.to_dict();
    eyre::ensure!(
        dict.get("title") == Some(&json!("Buy groceries")),
        "title not reflected"
    );
    eyre::ensure!(
        dict.get("description") == Some(&json!("Milk and bread")),
        "description not reflected"
    );
    eyre::ensure!(
        dict.get("priority") == Some(&json!("high")),
        "priority not reflected"
    );
    Ok(())
}

#[rstest]
fn title_only_create_uses_defaults(mut tasks: Tasks) {
    let task = tasks.create(TaskDraft::new("Minimal")).expect("valid draft");

    assert_eq!(task.status(), TaskStatus::Pending);
    assert_eq!(task.priority(), TaskPriority::Medium);
    assert_eq!(task.created_at(), StepClock::epoch());
}

#[rstest]
fn short_title_mentions_minimum_length(mut tasks: Tasks) {
    let result = tasks.create(TaskDraft::new("Hi"));

    let Err(AppError::Validation { message }) = result else {
        panic!("expected a validation error, got {result:?}");
    };
    assert!(message.contains('3'), "message should mention the minimum: {message}");
}

#[rstest]
#[case::create_status(TaskDraft::new("Bad status").with_status("blocked"))]
#[case::create_priority(TaskDraft::new("Bad priority").with_priority("urgent"))]
fn out_of_set_tokens_fail_create(mut tasks: Tasks, #[case] draft: TaskDraft) {
    assert!(matches!(
        tasks.create(draft),
        Err(AppError::Validation { .. })
    ));
    assert_eq!(tasks.count(), 0);
}

#[rstest]
fn out_of_set_status_fails_update(mut tasks: Tasks) {
    let task = tasks.create(TaskDraft::new("Valid task")).expect("valid draft");

    let result = tasks.update(task.id(), TaskPatch::new().status("blocked"));

    assert!(matches!(result, Err(AppError::Validation { .. })));
    assert_eq!(tasks.get(task.id()), Ok(&task));
}

#[rstest]
fn completing_pending_task_moves_updated_at(mut tasks: Tasks) {
    let task = tasks.create(TaskDraft::new("Finish report")).expect("valid draft");

    let done = tasks
        .update(task.id(), TaskPatch::new().status("completed"))
        .expect("pending -> completed");

    assert_eq!(done.status(), TaskStatus::Completed);
    assert!(done.updated_at() > done.created_at());
    assert_eq!(done.completed_at(), Some(done.updated_at()));
}

#[rstest]
fn get_after_delete_is_not_found(mut tasks: Tasks) {
    let task = tasks.create(TaskDraft::new("Temporary")).expect("valid draft");

    tasks.delete(task.id()).expect("stored task");

    assert_eq!(
        tasks.get(task.id()),
        Err(AppError::not_found("Task", task.id()))
    );
    assert!(tasks.delete(task.id()).is_err_and(|err| err.is_not_found()));
}

#[rstest]
fn get_all_is_stable_without_mutation(mut tasks: Tasks) {
    for title in ["One task", "Two tasks", "Three tasks"] {
        tasks.create(TaskDraft::new(title)).expect("valid draft");
    }

    let first: Vec<_> = tasks.get_all().into_iter().map(Serializable::to_dict).collect();
    let second: Vec<_> = tasks.get_all().into_iter().map(Serializable::to_dict).collect();

    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[rstest]
fn every_stored_task_validates(mut tasks: Tasks) {
    tasks.create(TaskDraft::new("Good one")).expect("valid draft");
    let _rejected = tasks.create(TaskDraft::new(""));
    tasks.create(TaskDraft::new("Good two")).expect("valid draft");

    let config = tasks.config();
    assert!(
        tasks
            .get_all()
            .into_iter()
            .all(|task| task.validate(config).is_valid())
    );
    assert_eq!(
        tasks.get_all().into_iter().map(Entity::id).collect::<Vec<_>>(),
        [EntityId::new(1), EntityId::new(2)]
    );
}

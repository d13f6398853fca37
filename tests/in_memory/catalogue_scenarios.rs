//! Category and tag uniqueness and lookups.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use super::helpers::{StepClock, repository};
use rstest::{fixture, rstest};
use taskledger::{
    entity::{Category, CategoryDraft, Entity, Tag, TagDraft, TagPatch},
    error::AppError,
    repository::Repository,
};

type Tags = Repository<Tag, StepClock>;
type Categories = Repository<Category, StepClock>;

#[fixture]
fn tags() -> Tags {
    repository()
}

#[fixture]
fn categories() -> Categories {
    repository()
}

#[rstest]
fn duplicate_tag_name_is_a_conflict(mut tags: Tags) {
    tags.create(TagDraft::new("urgent")).expect("valid draft");

    let result = tags.create(TagDraft::new("URGENT"));

    assert!(matches!(result, Err(AppError::Conflict { .. })));
    let err = result.expect_err("conflict");
    assert_eq!(err.code(), "CONFLICT");
    assert_eq!(err.status_code(), 409);
    assert_eq!(tags.count(), 1);
}

#[rstest]
fn renaming_tag_to_free_name_succeeds(mut tags: Tags) {
    let tag = tags.create(TagDraft::new("todo")).expect("valid draft");
    tags.create(TagDraft::new("later")).expect("valid draft");

    let renamed = tags
        .update(tag.id(), TagPatch::new().name("someday"))
        .expect("name is free");

    assert_eq!(renamed.name(), "someday");
    assert!(tags.get_by_name("todo").is_err());
    assert_eq!(tags.get_by_name("SOMEDAY").map(Entity::id), Ok(tag.id()));
}

#[rstest]
fn invalid_tag_names_are_rejected(mut tags: Tags) {
    assert_eq!(
        tags.create(TagDraft::new("two words")),
        Err(AppError::validation("Tag name must be alphanumeric"))
    );
    assert_eq!(
        tags.create(TagDraft::new("x")),
        Err(AppError::validation("Tag name must be at least 2 characters"))
    );
}

#[rstest]
fn category_lifecycle(mut categories: Categories) {
    let work = categories
        .create(CategoryDraft::new("Work").with_color("#0066FF"))
        .expect("valid draft");
    categories
        .create(CategoryDraft::new("Workshop"))
        .expect("valid draft");

    assert_eq!(categories.find_by_name("work").len(), 2);
    assert!(matches!(
        categories.create(CategoryDraft::new("WORK")),
        Err(AppError::Conflict { .. })
    ));

    categories.increment_task_count(work.id()).expect("known category");
    let updated = categories.increment_task_count(work.id()).expect("known category");
    assert_eq!(updated.task_count(), 2);

    categories.delete(work.id()).expect("known category");
    categories
        .create(CategoryDraft::new("work"))
        .expect("name is free after delete");
}

#[rstest]
fn bad_category_colour_is_rejected(mut categories: Categories) {
    assert_eq!(
        categories.create(CategoryDraft::new("Errands").with_color("red")),
        Err(AppError::validation("Invalid hex color format (e.g., #FF5733)"))
    );
}

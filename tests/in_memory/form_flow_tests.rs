//! In-memory integration tests for the create and edit flows.

use super::helpers::{OBJECT_BASE_URL, Stores, id, png, stores};
use rstest::rstest;
use taskpad::task::{
    domain::ImageUrl,
    ports::TaskRecordStore,
    services::{FormError, FormState},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_appears_in_list_with_uploaded_image(stores: Stores) {
    let mut form = stores.service.create_form();
    form.draft_mut().set_title("Water plants");
    form.draft_mut().set_detail("balcony only");
    form.draft_mut().set_completed(true);
    form.draft_mut().select_image(png("fern.png"));

    let outcome = form.submit().await.expect("submit succeeds");
    let mut view = stores.service.list_view();
    let tasks = view.load().await.expect("list loads").to_vec();

    assert_eq!(tasks, vec![outcome.task.clone()]);
    let url = outcome
        .task
        .image_url()
        .map(ImageUrl::as_str)
        .expect("image stored");
    assert!(url.starts_with(&format!("{OBJECT_BASE_URL}/task_bk/task-images/")));
    assert!(url.ends_with(".png"));
    assert!(outcome.task.is_completed());
    assert_eq!(outcome.task.detail(), "balcony only");
    assert_eq!(stores.objects.upload_attempts().expect("journal").len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn consecutive_creates_get_distinct_identifiers(stores: Stores) {
    let mut first = stores.service.create_form();
    first.draft_mut().set_title("One");
    let mut second = stores.service.create_form();
    second.draft_mut().set_title("Two");

    let one = first.submit().await.expect("first submit");
    let two = second.submit().await.expect("second submit");

    assert!(one.task.id() < two.task.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_round_trip_preserves_untouched_fields(stores: Stores) {
    stores.seed(4, "Call plumber", Some("http://x/leak.png"));
    let mut form = stores.service.edit_form(id(4));
    form.load().await.expect("task loads");
    form.draft_mut().set_completed(true);

    form.submit().await.expect("submit succeeds");
    let stored = stores
        .records
        .find_by_id(id(4))
        .await
        .expect("lookup succeeds")
        .expect("task exists");

    assert_eq!(stored.title().as_str(), "Call plumber");
    assert_eq!(
        stored.image_url().map(ImageUrl::as_str),
        Some("http://x/leak.png")
    );
    assert!(stored.is_completed());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_deleted_elsewhere_fails_update_with_store_message(stores: Stores) {
    stores.seed(4, "Call plumber", None);
    let mut form = stores.service.edit_form(id(4));
    form.load().await.expect("task loads");
    stores
        .records
        .delete_by_id(id(4))
        .await
        .expect("delete succeeds");

    let err = form.submit().await.expect_err("update rejected");

    assert!(matches!(err, FormError::Persist(_)));
    assert_eq!(err.to_string(), "task not found: 4");
    assert_eq!(form.state(), FormState::Failed);
}

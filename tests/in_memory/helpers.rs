//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;
use std::time::Duration;

use mockable::DefaultClock;
use rstest::fixture;
use taskpad::task::{
    adapters::memory::{InMemoryObjectStore, InMemoryTaskRecordStore},
    domain::{BucketName, ImageUrl, SelectedImage, Task, TaskFields, TaskId, TaskTitle, UploadPrefix},
    services::{ImageAttachmentWorkflow, TaskService},
};

/// Public URL base of the object store used in these tests.
pub const OBJECT_BASE_URL: &str = "memory://objects";

/// Service type wired to in-memory stores.
pub type TestService = TaskService<InMemoryTaskRecordStore, InMemoryObjectStore, DefaultClock>;

/// Task service whose stores stay observable from the test.
pub struct Stores {
    pub records: InMemoryTaskRecordStore,
    pub objects: InMemoryObjectStore,
    pub service: TestService,
}

impl Stores {
    /// Seeds a task with a fixed identifier and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the values are invalid or the store is poisoned.
    pub fn seed(&self, id: i64, title: &str, image_url: Option<&str>) -> Task {
        let fields = TaskFields::new(TaskTitle::new(title).expect("valid title"))
            .with_image_url(image_url.map(|url| ImageUrl::new(url).expect("valid url")));
        let task = Task::new(TaskId::new(id).expect("valid id"), fields);
        self.records.seed(task.clone()).expect("seed task");
        task
    }
}

/// Provides a task service backed by fresh in-memory stores.
#[fixture]
pub fn stores() -> Stores {
    let records = InMemoryTaskRecordStore::new();
    let objects = InMemoryObjectStore::new(OBJECT_BASE_URL);
    let attachments = ImageAttachmentWorkflow::new(
        Arc::new(objects.clone()),
        Arc::new(DefaultClock),
        BucketName::new("task_bk").expect("valid bucket"),
        UploadPrefix::new("task-images").expect("valid prefix"),
    );
    let service = TaskService::new(
        Arc::new(records.clone()),
        attachments,
        Duration::from_secs(5),
    );
    Stores {
        records,
        objects,
        service,
    }
}

/// Builds a small PNG selection.
#[must_use]
pub fn png(name: &str) -> SelectedImage {
    SelectedImage::new(name, vec![0x89, b'P', b'N', b'G']).with_content_type("image/png")
}

/// Builds a task identifier.
///
/// # Panics
///
/// Panics if `value` is not positive.
#[must_use]
pub fn id(value: i64) -> TaskId {
    TaskId::new(value).expect("valid id")
}

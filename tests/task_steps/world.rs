//! Shared world state for task BDD scenarios.

use std::sync::Arc;
use std::time::Duration;

use mockable::DefaultClock;
use rstest::fixture;
use taskpad::task::{
    adapters::memory::{InMemoryObjectStore, InMemoryTaskRecordStore},
    domain::{BucketName, UploadPrefix},
    services::{
        FormError, ImageAttachmentWorkflow, SubmitOutcome, TaskFormController, TaskListError,
        TaskListView, TaskService,
    },
};

/// Service type used by the BDD world.
pub type TestTaskService = TaskService<InMemoryTaskRecordStore, InMemoryObjectStore, DefaultClock>;

/// Form controller type used by the BDD world.
pub type TestForm = TaskFormController<InMemoryTaskRecordStore, InMemoryObjectStore, DefaultClock>;

/// Scenario world for task behaviour tests.
pub struct TaskWorld {
    pub records: InMemoryTaskRecordStore,
    pub objects: InMemoryObjectStore,
    pub service: TestTaskService,
    pub form: Option<TestForm>,
    pub list: Option<TaskListView<InMemoryTaskRecordStore>>,
    pub last_load: Option<Result<(), FormError>>,
    pub last_submit: Option<Result<SubmitOutcome, FormError>>,
    pub last_delete: Option<Result<(), TaskListError>>,
}

impl TaskWorld {
    /// Creates a world backed by empty in-memory stores.
    ///
    /// # Panics
    ///
    /// Panics if the fixed bucket or prefix names are rejected.
    #[must_use]
    pub fn new() -> Self {
        let records = InMemoryTaskRecordStore::new();
        let objects = InMemoryObjectStore::new("memory://objects");
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
        Self {
            records,
            objects,
            service,
            form: None,
            list: None,
            last_load: None,
            last_submit: None,
            last_delete: None,
        }
    }

    /// Returns the open form.
    ///
    /// # Errors
    ///
    /// Returns an error when no form was opened by an earlier step.
    pub fn form_mut(&mut self) -> Result<&mut TestForm, eyre::Report> {
        self.form
            .as_mut()
            .ok_or_else(|| eyre::eyre!("missing task form in scenario world"))
    }

    /// Returns the loaded list view.
    ///
    /// # Errors
    ///
    /// Returns an error when no list was loaded by an earlier step.
    pub fn list_mut(
        &mut self,
    ) -> Result<&mut TaskListView<InMemoryTaskRecordStore>, eyre::Report> {
        self.list
            .as_mut()
            .ok_or_else(|| eyre::eyre!("missing task list in scenario world"))
    }
}

impl Default for TaskWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskWorld {
    TaskWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

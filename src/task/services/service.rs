//! Explicitly constructed handle bundling the task stores.

use super::{ImageAttachmentWorkflow, TaskFormController, TaskListView};
use crate::task::{
    domain::TaskId,
    ports::{ObjectStore, TaskRecordStore},
};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;

/// Entry point for task forms and the task list.
///
/// Cloning is cheap; every clone shares the same store handles.
pub struct TaskService<R, O, C>
where
    R: TaskRecordStore,
    O: ObjectStore,
    C: Clock + Send + Sync,
{
    record_store: Arc<R>,
    attachments: ImageAttachmentWorkflow<O, C>,
    store_timeout: Duration,
}

impl<R, O, C> Clone for TaskService<R, O, C>
where
    R: TaskRecordStore,
    O: ObjectStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            record_store: Arc::clone(&self.record_store),
            attachments: self.attachments.clone(),
            store_timeout: self.store_timeout,
        }
    }
}

impl<R, O, C> TaskService<R, O, C>
where
    R: TaskRecordStore,
    O: ObjectStore,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    ///
    /// `store_timeout` bounds every record-store call made through forms and
    /// list views.
    #[must_use]
    pub const fn new(
        record_store: Arc<R>,
        attachments: ImageAttachmentWorkflow<O, C>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            record_store,
            attachments,
            store_timeout,
        }
    }

    /// Opens an empty form for a new task.
    #[must_use]
    pub fn create_form(&self) -> TaskFormController<R, O, C> {
        TaskFormController::for_create(self.clone())
    }

    /// Opens an edit form for `id`.
    ///
    /// The form starts in the loading state; call
    /// [`TaskFormController::load`] to hydrate it.
    #[must_use]
    pub fn edit_form(&self, id: TaskId) -> TaskFormController<R, O, C> {
        TaskFormController::for_edit(self.clone(), id)
    }

    /// Opens an empty list view; call [`TaskListView::load`] to fill it.
    #[must_use]
    pub fn list_view(&self) -> TaskListView<R> {
        TaskListView::new(Arc::clone(&self.record_store), self.store_timeout)
    }

    /// Returns the record store.
    #[must_use]
    pub const fn record_store(&self) -> &Arc<R> {
        &self.record_store
    }

    /// Returns the image attachment workflow.
    #[must_use]
    pub const fn attachments(&self) -> &ImageAttachmentWorkflow<O, C> {
        &self.attachments
    }

    /// Returns the deadline applied to record-store calls.
    #[must_use]
    pub const fn store_timeout(&self) -> Duration {
        self.store_timeout
    }
}

//! Application services for the task form and list pages.

mod attachment;
mod error;
mod form;
mod list;
mod service;

pub use attachment::{AttachmentOutcome, DEFAULT_STORE_TIMEOUT, ImageAttachmentWorkflow};
pub use error::{PersistError, UploadError};
pub use form::{FormError, FormMode, FormState, Navigation, SubmitOutcome, TaskFormController};
#[cfg(test)]
pub use list::MockDeleteConfirmation;
pub use list::{DeleteConfirmation, DeleteOutcome, TaskListError, TaskListView};
pub use service::TaskService;

//! Task record and its persistable field set.

use super::{ImageUrl, TaskId, TaskTitle};
use serde::Serialize;

/// Every persisted task column except the store-assigned identifier.
///
/// Inserts and full-record updates both take this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskFields {
    /// Validated task title.
    pub title: TaskTitle,
    /// Free-text detail, empty when not provided.
    pub detail: String,
    /// Stored image, `None` when no image is attached.
    pub image_url: Option<ImageUrl>,
    /// Completion flag.
    pub is_completed: bool,
}

impl TaskFields {
    /// Creates a field set with empty detail, no image and an open state.
    #[must_use]
    pub const fn new(title: TaskTitle) -> Self {
        Self {
            title,
            detail: String::new(),
            image_url: None,
            is_completed: false,
        }
    }

    /// Sets the detail text.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    /// Sets the image URL.
    #[must_use]
    pub fn with_image_url(mut self, image_url: Option<ImageUrl>) -> Self {
        self.image_url = image_url;
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub const fn with_completed(mut self, is_completed: bool) -> Self {
        self.is_completed = is_completed;
        self
    }
}

/// Persisted task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    #[serde(flatten)]
    fields: TaskFields,
}

impl Task {
    /// Builds a task from its identifier and stored fields.
    #[must_use]
    pub const fn new(id: TaskId, fields: TaskFields) -> Self {
        Self { id, fields }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.fields.title
    }

    /// Returns the detail text.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.fields.detail
    }

    /// Returns the stored image URL, if any.
    #[must_use]
    pub const fn image_url(&self) -> Option<&ImageUrl> {
        self.fields.image_url.as_ref()
    }

    /// Returns whether the task is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.fields.is_completed
    }

    /// Returns the stored fields.
    #[must_use]
    pub const fn fields(&self) -> &TaskFields {
        &self.fields
    }

    /// Consumes the task, returning its stored fields.
    #[must_use]
    pub fn into_fields(self) -> TaskFields {
        self.fields
    }
}

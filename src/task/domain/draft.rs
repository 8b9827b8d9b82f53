//! In-memory draft of a task being created or edited.

use super::{ImageUrl, SelectedImage, Task, TaskDomainError, TaskFields, TaskTitle};

/// Unvalidated form state for a task.
///
/// The stored image is only ever set by hydrating from a persisted task. A
/// new image is a separate selection, so leaving the file input empty can
/// never clear an existing URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    detail: String,
    is_completed: bool,
    stored_image: Option<ImageUrl>,
    selected_image: Option<SelectedImage>,
}

impl TaskDraft {
    /// Creates an empty draft for a new task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrates a draft from a persisted task.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title().as_str().to_owned(),
            detail: task.detail().to_owned(),
            is_completed: task.is_completed(),
            stored_image: task.image_url().cloned(),
            selected_image: None,
        }
    }

    /// Replaces the title text.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replaces the detail text.
    pub fn set_detail(&mut self, detail: impl Into<String>) {
        self.detail = detail.into();
    }

    /// Sets the completion flag.
    pub const fn set_completed(&mut self, is_completed: bool) {
        self.is_completed = is_completed;
    }

    /// Selects a new image to upload on the next submit.
    pub fn select_image(&mut self, image: SelectedImage) {
        self.selected_image = Some(image);
    }

    /// Discards the pending image selection, keeping the stored image.
    pub fn clear_selected_image(&mut self) {
        self.selected_image = None;
    }

    /// Returns the raw title text.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the detail text.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Returns the completion flag.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Returns the image URL loaded from the persisted task, if any.
    #[must_use]
    pub const fn stored_image(&self) -> Option<&ImageUrl> {
        self.stored_image.as_ref()
    }

    /// Returns the newly selected image, if any.
    #[must_use]
    pub const fn selected_image(&self) -> Option<&SelectedImage> {
        self.selected_image.as_ref()
    }

    /// Validates the draft without touching any store.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is empty after
    /// trimming.
    pub fn validate(&self) -> Result<TaskTitle, TaskDomainError> {
        TaskTitle::new(self.title.clone())
    }

    /// Builds the persistable field set from a validated title and the
    /// resolved image URL.
    #[must_use]
    pub fn to_fields(&self, title: TaskTitle, image_url: Option<ImageUrl>) -> TaskFields {
        TaskFields::new(title)
            .with_detail(self.detail.clone())
            .with_image_url(image_url)
            .with_completed(self.is_completed)
    }
}

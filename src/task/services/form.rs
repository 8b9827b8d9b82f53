//! Task form controller: draft state, validation and the submit state
//! machine shared by the create and edit pages.

use super::error::{PersistError, UploadError, persist_within};
use super::TaskService;
use crate::task::{
    domain::{Task, TaskDomainError, TaskDraft, TaskId},
    ports::{ObjectStore, TaskRecordStore},
};
use mockable::Clock;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Submission state of a task form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormState {
    /// The edit target is being fetched.
    Loading,
    /// The draft is editable and may be submitted.
    Idle,
    /// The draft is being validated.
    Validating,
    /// A newly selected image is being uploaded.
    Uploading,
    /// The record store call is in flight.
    Persisting,
    /// The task was saved; the caller should navigate away.
    Done,
    /// Loading or persisting failed; the draft is kept for correction.
    Failed,
}

impl FormState {
    /// Returns a stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Uploading => "uploading",
            Self::Persisting => "persisting",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    /// Returns whether a submission is in flight.
    #[must_use]
    pub const fn is_in_flight(self) -> bool {
        matches!(self, Self::Uploading | Self::Persisting)
    }
}

impl fmt::Display for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which record-store write a submit performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// Insert a new record.
    Create,
    /// Replace an existing record.
    Edit {
        /// Target record.
        id: TaskId,
        /// Whether the target has been fetched into the draft.
        loaded: bool,
    },
}

/// Where the caller should go after a successful submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The task list.
    TaskList,
}

/// Result of a successful submit.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    /// The record as persisted.
    pub task: Task,
    /// Upload failure that left the previous image in place, if any.
    pub upload_error: Option<UploadError>,
    /// Page to show next.
    pub next: Navigation,
}

/// Errors surfaced by the task form.
#[derive(Debug, Clone, Error)]
pub enum FormError {
    /// The draft failed validation; nothing was sent to any store.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),

    /// The record store rejected the call; the message is the store's own.
    #[error(transparent)]
    Persist(#[from] PersistError),

    /// The edit target does not exist.
    #[error("task not found")]
    NotFound(TaskId),

    /// A submit was attempted while the form could not accept one.
    #[error("form cannot be submitted while {0}")]
    NotSubmittable(FormState),
}

/// Controller behind the add and edit pages.
pub struct TaskFormController<R, O, C>
where
    R: TaskRecordStore,
    O: ObjectStore,
    C: Clock + Send + Sync,
{
    service: TaskService<R, O, C>,
    mode: FormMode,
    draft: TaskDraft,
    state: FormState,
    error: Option<FormError>,
}

impl<R, O, C> TaskFormController<R, O, C>
where
    R: TaskRecordStore,
    O: ObjectStore,
    C: Clock + Send + Sync,
{
    pub(crate) fn for_create(service: TaskService<R, O, C>) -> Self {
        Self {
            service,
            mode: FormMode::Create,
            draft: TaskDraft::new(),
            state: FormState::Idle,
            error: None,
        }
    }

    pub(crate) fn for_edit(service: TaskService<R, O, C>, id: TaskId) -> Self {
        Self {
            service,
            mode: FormMode::Edit { id, loaded: false },
            draft: TaskDraft::new(),
            state: FormState::Loading,
            error: None,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> FormState {
        self.state
    }

    /// Returns the form mode.
    #[must_use]
    pub const fn mode(&self) -> FormMode {
        self.mode
    }

    /// Returns the draft.
    #[must_use]
    pub const fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    /// Returns the draft for editing.
    pub const fn draft_mut(&mut self) -> &mut TaskDraft {
        &mut self.draft
    }

    /// Returns the error surfaced by the last load or submit, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    /// Returns whether the submit control should be enabled.
    ///
    /// Disabled while loading, while a submission is in flight, after a
    /// successful save, and for edit forms whose target was never loaded.
    #[must_use]
    pub const fn is_submit_enabled(&self) -> bool {
        let accepts_state = matches!(self.state, FormState::Idle | FormState::Failed);
        let target_ready = match self.mode {
            FormMode::Create => true,
            FormMode::Edit { loaded, .. } => loaded,
        };
        accepts_state && target_ready
    }

    /// Fetches the edit target into the draft.
    ///
    /// Create forms have nothing to load and return immediately.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NotFound`] when the identifier resolves to no
    /// record, or [`FormError::Persist`] when the lookup fails. The form is
    /// left in [`FormState::Failed`] either way.
    pub async fn load(&mut self) -> Result<(), FormError> {
        let FormMode::Edit { id, .. } = self.mode else {
            return Ok(());
        };
        if self.state.is_in_flight() {
            return Err(FormError::NotSubmittable(self.state));
        }

        self.transition(FormState::Loading);
        let store = self.service.record_store();
        let found = persist_within(self.service.store_timeout(), store.find_by_id(id)).await;

        match found {
            Ok(Some(task)) => {
                self.draft = TaskDraft::from_task(&task);
                self.mode = FormMode::Edit { id, loaded: true };
                self.error = None;
                self.transition(FormState::Idle);
                Ok(())
            }
            Ok(None) => {
                self.transition(FormState::Failed);
                Err(self.surface(FormError::NotFound(id)))
            }
            Err(err) => {
                self.transition(FormState::Failed);
                Err(self.surface(FormError::Persist(err)))
            }
        }
    }

    /// Validates the draft, uploads any selected image and persists the task.
    ///
    /// An upload failure does not abort the submit: the task is saved with
    /// the previous image reference (none for new tasks) and the failure is
    /// reported in [`SubmitOutcome::upload_error`].
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Validation`] without calling any store when the
    /// title is blank, [`FormError::Persist`] when the record store rejects
    /// the write, and [`FormError::NotSubmittable`] or
    /// [`FormError::NotFound`] when the form cannot accept a submit.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, FormError> {
        if !self.is_submit_enabled() {
            return Err(self.refusal());
        }

        self.error = None;
        self.transition(FormState::Validating);
        let title = match self.draft.validate() {
            Ok(title) => title,
            Err(err) => {
                self.transition(FormState::Idle);
                return Err(self.surface(FormError::Validation(err)));
            }
        };

        if self.draft.selected_image().is_some() {
            self.transition(FormState::Uploading);
        }
        let fallback = match self.mode {
            FormMode::Create => None,
            FormMode::Edit { .. } => self.draft.stored_image(),
        };
        let attachment = self
            .service
            .attachments()
            .resolve(self.draft.selected_image(), fallback)
            .await;

        self.transition(FormState::Persisting);
        let fields = self.draft.to_fields(title, attachment.image_url);
        let store = self.service.record_store();
        let timeout = self.service.store_timeout();
        let persisted = match self.mode {
            FormMode::Create => persist_within(timeout, store.insert(&fields)).await,
            FormMode::Edit { id, .. } => {
                let updated = persist_within(timeout, store.update_by_id(id, &fields)).await;
                updated.map(|()| Task::new(id, fields))
            }
        };

        match persisted {
            Ok(task) => {
                self.transition(FormState::Done);
                info!(task_id = %task.id(), "saved task");
                Ok(SubmitOutcome {
                    task,
                    upload_error: attachment.upload_error,
                    next: Navigation::TaskList,
                })
            }
            Err(err) => {
                self.transition(FormState::Failed);
                warn!(error = %err, "task save failed");
                Err(self.surface(FormError::Persist(err)))
            }
        }
    }

    fn refusal(&self) -> FormError {
        match (&self.error, self.mode) {
            (Some(err), FormMode::Edit { loaded: false, .. }) => err.clone(),
            _ => FormError::NotSubmittable(self.state),
        }
    }

    fn surface(&mut self, err: FormError) -> FormError {
        self.error = Some(err.clone());
        err
    }

    fn transition(&mut self, next: FormState) {
        debug!(from = %self.state, to = %next, "task form state change");
        self.state = next;
    }
}

//! Task list view: bulk load and confirmed deletes.

use super::error::{PersistError, persist_within};
use crate::task::{
    domain::{Task, TaskId},
    ports::TaskRecordStore,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Interactive confirmation asked before a delete.
#[cfg_attr(test, mockall::automock)]
pub trait DeleteConfirmation {
    /// Shows `prompt` and returns whether the user agreed.
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> DeleteConfirmation for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Result of a delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The store confirmed the delete and the task left the list.
    Deleted(Task),
    /// The user declined; nothing was sent to the store.
    Cancelled,
}

/// Errors surfaced by the task list.
#[derive(Debug, Clone, Error)]
pub enum TaskListError {
    /// The record store rejected the call.
    #[error(transparent)]
    Persist(#[from] PersistError),

    /// The task is not part of the loaded list.
    #[error("task not found: {0}")]
    NotListed(TaskId),
}

/// In-memory copy of the task table with delete support.
pub struct TaskListView<R>
where
    R: TaskRecordStore,
{
    record_store: Arc<R>,
    timeout: Duration,
    tasks: Vec<Task>,
}

impl<R> TaskListView<R>
where
    R: TaskRecordStore,
{
    /// Creates an empty view.
    #[must_use]
    pub const fn new(record_store: Arc<R>, timeout: Duration) -> Self {
        Self {
            record_store,
            timeout,
            tasks: Vec::new(),
        }
    }

    /// Replaces the view contents with every stored task.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] when the store rejects the read; the previous
    /// contents are kept.
    pub async fn load(&mut self) -> Result<&[Task], PersistError> {
        self.tasks = persist_within(self.timeout, self.record_store.list_all()).await?;
        Ok(&self.tasks)
    }

    /// Returns the loaded tasks.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the loaded task with `id`, if any.
    #[must_use]
    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns the confirmation prompt naming the task with `id`.
    #[must_use]
    pub fn delete_prompt(&self, id: TaskId) -> Option<String> {
        self.find(id).map(|task| {
            format!(
                "Are you sure you want to delete task \"{}\"?",
                task.title()
            )
        })
    }

    /// Asks for confirmation, then deletes the task.
    ///
    /// The task leaves the list only once the store confirms the delete.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::NotListed`] when the task is not loaded, or
    /// [`TaskListError::Persist`] when the store rejects the delete; the list
    /// is unchanged in both cases.
    pub async fn delete(
        &mut self,
        id: TaskId,
        confirmation: &impl DeleteConfirmation,
    ) -> Result<DeleteOutcome, TaskListError> {
        let prompt = self.delete_prompt(id).ok_or(TaskListError::NotListed(id))?;
        if !confirmation.confirm(&prompt) {
            return Ok(DeleteOutcome::Cancelled);
        }

        if let Err(err) = persist_within(self.timeout, self.record_store.delete_by_id(id)).await {
            warn!(task_id = %id, error = %err, "task delete failed");
            return Err(err.into());
        }

        let position = self
            .tasks
            .iter()
            .position(|task| task.id() == id)
            .ok_or(TaskListError::NotListed(id))?;
        let removed = self.tasks.remove(position);
        info!(task_id = %id, "deleted task");
        Ok(DeleteOutcome::Deleted(removed))
    }
}

//! In-memory record store for tests and zero-configuration runs.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{Task, TaskFields, TaskId},
    ports::{RecordStoreError, RecordStoreResult, TaskRecordStore},
};

/// Record-store call observed by [`InMemoryTaskRecordStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOperation {
    /// `insert` with the submitted fields.
    Insert(TaskFields),
    /// `find_by_id` for the identifier.
    FindById(TaskId),
    /// `list_all`.
    ListAll,
    /// `update_by_id` with the identifier and submitted fields.
    UpdateById(TaskId, TaskFields),
    /// `delete_by_id` for the identifier.
    DeleteById(TaskId),
}

impl RecordOperation {
    /// Returns whether the operation writes to the store.
    #[must_use]
    pub const fn is_write(&self) -> bool {
        matches!(
            self,
            Self::Insert(_) | Self::UpdateById(..) | Self::DeleteById(_)
        )
    }
}

/// Thread-safe in-memory task table.
///
/// Every call is appended to an operation journal before it is applied, and
/// an injected failure message makes every subsequent call fail with
/// [`RecordStoreError::Rejected`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRecordStore {
    state: Arc<RwLock<InMemoryRecordState>>,
}

#[derive(Debug, Default)]
struct InMemoryRecordState {
    tasks: BTreeMap<TaskId, Task>,
    last_id: i64,
    journal: Vec<RecordOperation>,
    failure: Option<String>,
}

impl InMemoryRecordState {
    fn record(&mut self, operation: RecordOperation) -> RecordStoreResult<()> {
        self.journal.push(operation);
        match &self.failure {
            Some(message) => Err(RecordStoreError::Rejected(message.clone())),
            None => Ok(()),
        }
    }
}

impl InMemoryTaskRecordStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a task with a caller-chosen identifier, bypassing the journal.
    ///
    /// Later inserts are assigned identifiers above the highest seeded one.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::Persistence`] when the lock is poisoned.
    pub fn seed(&self, task: Task) -> RecordStoreResult<()> {
        let mut state = self.write()?;
        state.last_id = state.last_id.max(task.id().value());
        state.tasks.insert(task.id(), task);
        Ok(())
    }

    /// Makes every subsequent call fail with `message`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::Persistence`] when the lock is poisoned.
    pub fn fail_with(&self, message: impl Into<String>) -> RecordStoreResult<()> {
        self.write()?.failure = Some(message.into());
        Ok(())
    }

    /// Removes an injected failure.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::Persistence`] when the lock is poisoned.
    pub fn clear_failure(&self) -> RecordStoreResult<()> {
        self.write()?.failure = None;
        Ok(())
    }

    /// Returns every call observed so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::Persistence`] when the lock is poisoned.
    pub fn operations(&self) -> RecordStoreResult<Vec<RecordOperation>> {
        Ok(self.read()?.journal.clone())
    }

    /// Returns the write calls observed so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::Persistence`] when the lock is poisoned.
    pub fn writes(&self) -> RecordStoreResult<Vec<RecordOperation>> {
        Ok(self
            .read()?
            .journal
            .iter()
            .filter(|operation| operation.is_write())
            .cloned()
            .collect())
    }

    fn read(&self) -> RecordStoreResult<RwLockReadGuard<'_, InMemoryRecordState>> {
        self.state.read().map_err(|err| {
            RecordStoreError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> RecordStoreResult<RwLockWriteGuard<'_, InMemoryRecordState>> {
        self.state.write().map_err(|err| {
            RecordStoreError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl TaskRecordStore for InMemoryTaskRecordStore {
    async fn insert(&self, fields: &TaskFields) -> RecordStoreResult<Task> {
        let mut state = self.write()?;
        state.record(RecordOperation::Insert(fields.clone()))?;

        let id = TaskId::new(state.last_id + 1).map_err(RecordStoreError::persistence)?;
        let task = Task::new(id, fields.clone());
        state.last_id = id.value();
        state.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn find_by_id(&self, id: TaskId) -> RecordStoreResult<Option<Task>> {
        let mut state = self.write()?;
        state.record(RecordOperation::FindById(id))?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_all(&self) -> RecordStoreResult<Vec<Task>> {
        let mut state = self.write()?;
        state.record(RecordOperation::ListAll)?;
        Ok(state.tasks.values().cloned().collect())
    }

    async fn update_by_id(&self, id: TaskId, fields: &TaskFields) -> RecordStoreResult<()> {
        let mut state = self.write()?;
        state.record(RecordOperation::UpdateById(id, fields.clone()))?;

        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(RecordStoreError::NotFound(id))?;
        *task = Task::new(id, fields.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: TaskId) -> RecordStoreResult<()> {
        let mut state = self.write()?;
        state.record(RecordOperation::DeleteById(id))?;

        state
            .tasks
            .remove(&id)
            .map(drop)
            .ok_or(RecordStoreError::NotFound(id))
    }
}

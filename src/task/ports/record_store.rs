//! Record-store port for task persistence.

use crate::task::domain::{Task, TaskFields, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for record-store operations.
pub type RecordStoreResult<T> = Result<T, RecordStoreError>;

/// Tabular persistence contract for the single task table.
#[async_trait]
pub trait TaskRecordStore: Send + Sync {
    /// Inserts a new record and returns it with its store-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError`] when the store rejects the insert.
    async fn insert(&self, fields: &TaskFields) -> RecordStoreResult<Task>;

    /// Finds a record by identifier.
    ///
    /// Returns `None` when the record does not exist.
    async fn find_by_id(&self, id: TaskId) -> RecordStoreResult<Option<Task>>;

    /// Returns every record in ascending identifier order.
    async fn list_all(&self) -> RecordStoreResult<Vec<Task>>;

    /// Replaces every column of an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::NotFound`] when the record does not exist.
    async fn update_by_id(&self, id: TaskId, fields: &TaskFields) -> RecordStoreResult<()>;

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::NotFound`] when the record does not exist.
    async fn delete_by_id(&self, id: TaskId) -> RecordStoreResult<()>;
}

/// Errors returned by record-store implementations.
#[derive(Debug, Clone, Error)]
pub enum RecordStoreError {
    /// The record was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The store refused the operation with its own message.
    #[error("{0}")]
    Rejected(String),

    /// Persistence-layer failure.
    #[error("{0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RecordStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

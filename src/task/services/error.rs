//! Service-level error types and store-call deadlines.

use crate::task::ports::{ObjectStoreError, ObjectStoreResult, RecordStoreError, RecordStoreResult};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// A record-store call was rejected or did not finish in time.
///
/// Store messages are surfaced verbatim.
#[derive(Debug, Clone, Error)]
pub enum PersistError {
    /// The record store returned an error.
    #[error(transparent)]
    Store(#[from] RecordStoreError),
    /// The record store did not answer before the deadline.
    #[error("record store did not respond within {0:?}")]
    TimedOut(Duration),
}

/// An image upload failed. Never blocks saving the task itself.
#[derive(Debug, Clone, Error)]
pub enum UploadError {
    /// The object store returned an error.
    #[error("image upload failed: {0}")]
    Store(#[from] ObjectStoreError),
    /// The object store did not answer before the deadline.
    #[error("image upload did not finish within {0:?}")]
    TimedOut(Duration),
}

/// Runs a record-store call under `limit`.
pub(crate) async fn persist_within<T>(
    limit: Duration,
    operation: impl Future<Output = RecordStoreResult<T>>,
) -> Result<T, PersistError> {
    let outcome = tokio::time::timeout(limit, operation)
        .await
        .map_err(|_| PersistError::TimedOut(limit))?;
    Ok(outcome?)
}

/// Runs an object-store call under `limit`.
pub(crate) async fn upload_within<T>(
    limit: Duration,
    operation: impl Future<Output = ObjectStoreResult<T>>,
) -> Result<T, UploadError> {
    let outcome = tokio::time::timeout(limit, operation)
        .await
        .map_err(|_| UploadError::TimedOut(limit))?;
    Ok(outcome?)
}

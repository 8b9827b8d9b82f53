//! Object-store port for uploaded task images.

use crate::task::domain::{BucketName, ImageUrl, ObjectPath, SelectedImage};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for object-store operations.
pub type ObjectStoreResult<T> = Result<T, ObjectStoreError>;

/// Blob storage addressed by bucket and path.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Uploads an image to `bucket` at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectStoreError`] when the upload is refused or fails.
    async fn upload(
        &self,
        bucket: &BucketName,
        path: &ObjectPath,
        image: &SelectedImage,
    ) -> ObjectStoreResult<()>;

    /// Resolves the public URL of the object at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectStoreError`] when no URL can be formed.
    async fn public_url(&self, bucket: &BucketName, path: &ObjectPath)
    -> ObjectStoreResult<ImageUrl>;
}

/// Errors returned by object-store implementations.
#[derive(Debug, Clone, Error)]
pub enum ObjectStoreError {
    /// An object already exists at the target path.
    #[error("object already exists: {bucket}/{path}")]
    AlreadyExists {
        /// Target bucket.
        bucket: String,
        /// Target path.
        path: String,
    },

    /// The store refused the operation with its own message.
    #[error("{0}")]
    Rejected(String),

    /// Storage-layer failure.
    #[error("storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl ObjectStoreError {
    /// Wraps a storage error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}

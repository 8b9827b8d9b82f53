//! In-memory object store for tests.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::adapters::public_url_for;
use crate::task::{
    domain::{BucketName, ImageUrl, ObjectPath, SelectedImage},
    ports::{ObjectStore, ObjectStoreError, ObjectStoreResult},
};

/// Object held by [`InMemoryObjectStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Declared MIME type at upload time.
    pub content_type: Option<String>,
    /// Uploaded bytes.
    pub bytes: Vec<u8>,
}

/// Thread-safe in-memory bucket map.
///
/// Uploads never overwrite an existing object. An injected failure message
/// makes every subsequent upload fail with [`ObjectStoreError::Rejected`].
#[derive(Debug, Clone)]
pub struct InMemoryObjectStore {
    base_url: String,
    state: Arc<RwLock<InMemoryObjectState>>,
}

#[derive(Debug, Default)]
struct InMemoryObjectState {
    objects: BTreeMap<String, StoredObject>,
    upload_attempts: Vec<String>,
    failure: Option<String>,
}

impl InMemoryObjectStore {
    /// Creates an empty store whose public URLs start with `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            state: Arc::default(),
        }
    }

    /// Makes every subsequent upload fail with `message`.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectStoreError::Storage`] when the lock is poisoned.
    pub fn fail_uploads_with(&self, message: impl Into<String>) -> ObjectStoreResult<()> {
        self.write()?.failure = Some(message.into());
        Ok(())
    }

    /// Returns every attempted upload key (`bucket/path`), oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectStoreError::Storage`] when the lock is poisoned.
    pub fn upload_attempts(&self) -> ObjectStoreResult<Vec<String>> {
        Ok(self.read()?.upload_attempts.clone())
    }

    /// Returns the object stored at `bucket/path`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectStoreError::Storage`] when the lock is poisoned.
    pub fn object(
        &self,
        bucket: &BucketName,
        path: &ObjectPath,
    ) -> ObjectStoreResult<Option<StoredObject>> {
        Ok(self.read()?.objects.get(&object_key(bucket, path)).cloned())
    }

    fn read(&self) -> ObjectStoreResult<RwLockReadGuard<'_, InMemoryObjectState>> {
        self.state
            .read()
            .map_err(|err| ObjectStoreError::storage(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> ObjectStoreResult<RwLockWriteGuard<'_, InMemoryObjectState>> {
        self.state
            .write()
            .map_err(|err| ObjectStoreError::storage(std::io::Error::other(err.to_string())))
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new("memory://objects")
    }
}

fn object_key(bucket: &BucketName, path: &ObjectPath) -> String {
    format!("{bucket}/{path}")
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn upload(
        &self,
        bucket: &BucketName,
        path: &ObjectPath,
        image: &SelectedImage,
    ) -> ObjectStoreResult<()> {
        let key = object_key(bucket, path);
        let mut state = self.write()?;
        state.upload_attempts.push(key.clone());

        if let Some(message) = &state.failure {
            return Err(ObjectStoreError::Rejected(message.clone()));
        }
        if state.objects.contains_key(&key) {
            return Err(ObjectStoreError::AlreadyExists {
                bucket: bucket.to_string(),
                path: path.to_string(),
            });
        }

        state.objects.insert(
            key,
            StoredObject {
                content_type: image.content_type().map(str::to_owned),
                bytes: image.bytes().to_vec(),
            },
        );
        Ok(())
    }

    async fn public_url(
        &self,
        bucket: &BucketName,
        path: &ObjectPath,
    ) -> ObjectStoreResult<ImageUrl> {
        public_url_for(&self.base_url, bucket, path)
    }
}

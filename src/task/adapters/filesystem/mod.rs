//! Local-directory object store.
//!
//! Objects are written below a capability-scoped root directory as
//! `<root>/<bucket>/<path>`, and their public URLs are formed from a
//! configured base URL under which the web surface serves that root.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::OpenOptions;
use cap_std::fs_utf8::Dir;
use std::io::Write;
use std::sync::Arc;

use crate::task::{
    adapters::public_url_for,
    domain::{BucketName, ImageUrl, ObjectPath, SelectedImage},
    ports::{ObjectStore, ObjectStoreError, ObjectStoreResult},
};

/// Object store backed by a local directory.
#[derive(Debug, Clone)]
pub struct FilesystemObjectStore {
    root: Arc<Dir>,
    root_path: Utf8PathBuf,
    base_url: String,
}

impl FilesystemObjectStore {
    /// Opens (creating when missing) the root directory.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectStoreError::Storage`] when the directory cannot be
    /// created or opened.
    pub fn open(root: &Utf8Path, base_url: impl Into<String>) -> ObjectStoreResult<Self> {
        Dir::create_ambient_dir_all(root, ambient_authority()).map_err(ObjectStoreError::storage)?;
        let dir = Dir::open_ambient_dir(root, ambient_authority())
            .map_err(ObjectStoreError::storage)?;
        Ok(Self {
            root: Arc::new(dir),
            root_path: root.to_path_buf(),
            base_url: base_url.into(),
        })
    }

    /// Returns the root directory path.
    #[must_use]
    pub fn root_path(&self) -> &Utf8Path {
        &self.root_path
    }
}

fn write_new_object(
    root: &Dir,
    relative: &Utf8Path,
    bytes: &[u8],
) -> Result<(), std::io::Error> {
    if let Some(parent) = relative.parent() {
        root.create_dir_all(parent)?;
    }
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = root.open_with(relative, &options)?;
    file.write_all(bytes)?;
    file.flush()
}

#[async_trait]
impl ObjectStore for FilesystemObjectStore {
    async fn upload(
        &self,
        bucket: &BucketName,
        path: &ObjectPath,
        image: &SelectedImage,
    ) -> ObjectStoreResult<()> {
        let root = Arc::clone(&self.root);
        let relative = Utf8Path::new(bucket.as_str()).join(path.as_str());
        let bytes = image.bytes().to_vec();
        let bucket_name = bucket.to_string();
        let object_path = path.to_string();

        tokio::task::spawn_blocking(move || {
            write_new_object(&root, &relative, &bytes).map_err(|err| {
                if err.kind() == std::io::ErrorKind::AlreadyExists {
                    ObjectStoreError::AlreadyExists {
                        bucket: bucket_name,
                        path: object_path,
                    }
                } else {
                    ObjectStoreError::storage(err)
                }
            })
        })
        .await
        .map_err(ObjectStoreError::storage)?
    }

    async fn public_url(
        &self,
        bucket: &BucketName,
        path: &ObjectPath,
    ) -> ObjectStoreResult<ImageUrl> {
        public_url_for(&self.base_url, bucket, path)
    }
}

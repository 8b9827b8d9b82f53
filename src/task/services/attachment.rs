//! Image attachment workflow: decides whether to upload and which URL to
//! persist.

use super::error::{UploadError, upload_within};
use crate::task::{
    domain::{BucketName, ImageUrl, ObjectPath, SelectedImage, UploadPrefix},
    ports::ObjectStore,
};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Default deadline applied to each store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

/// Image URL to persist, plus any non-fatal upload failure.
#[derive(Debug, Clone)]
pub struct AttachmentOutcome {
    /// URL to write into the record.
    pub image_url: Option<ImageUrl>,
    /// Upload failure that made the workflow fall back.
    pub upload_error: Option<UploadError>,
}

/// Uploads newly selected images and resolves the URL to persist.
pub struct ImageAttachmentWorkflow<O, C>
where
    O: ObjectStore,
    C: Clock + Send + Sync,
{
    object_store: Arc<O>,
    clock: Arc<C>,
    bucket: BucketName,
    prefix: UploadPrefix,
    timeout: Duration,
}

impl<O, C> Clone for ImageAttachmentWorkflow<O, C>
where
    O: ObjectStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            object_store: Arc::clone(&self.object_store),
            clock: Arc::clone(&self.clock),
            bucket: self.bucket.clone(),
            prefix: self.prefix.clone(),
            timeout: self.timeout,
        }
    }
}

impl<O, C> ImageAttachmentWorkflow<O, C>
where
    O: ObjectStore,
    C: Clock + Send + Sync,
{
    /// Creates a workflow uploading into `bucket` under `prefix`.
    #[must_use]
    pub const fn new(
        object_store: Arc<O>,
        clock: Arc<C>,
        bucket: BucketName,
        prefix: UploadPrefix,
    ) -> Self {
        Self {
            object_store,
            clock,
            bucket,
            prefix,
            timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Sets the deadline applied to the upload and to URL resolution.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the target bucket.
    #[must_use]
    pub const fn bucket(&self) -> &BucketName {
        &self.bucket
    }

    /// Derives a fresh storage path for `image` from the current time.
    #[must_use]
    pub fn storage_path(&self, image: &SelectedImage) -> ObjectPath {
        let timestamp = self.clock.utc().timestamp_micros();
        ObjectPath::for_upload(&self.prefix, timestamp, image.extension())
    }

    /// Resolves the image URL to persist.
    ///
    /// Without a selection `fallback` is returned untouched and no store call
    /// is made. With a selection exactly one upload is issued; if it fails
    /// the outcome carries `fallback` together with the error.
    pub async fn resolve(
        &self,
        selected: Option<&SelectedImage>,
        fallback: Option<&ImageUrl>,
    ) -> AttachmentOutcome {
        let Some(image) = selected else {
            return AttachmentOutcome {
                image_url: fallback.cloned(),
                upload_error: None,
            };
        };

        match self.upload(image).await {
            Ok(url) => AttachmentOutcome {
                image_url: Some(url),
                upload_error: None,
            },
            Err(err) => {
                warn!(
                    file_name = image.file_name(),
                    error = %err,
                    "image upload failed, keeping previous image reference"
                );
                AttachmentOutcome {
                    image_url: fallback.cloned(),
                    upload_error: Some(err),
                }
            }
        }
    }

    /// Uploads `image` to a fresh path and returns its public URL.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError`] when the upload or URL resolution fails or
    /// exceeds the deadline.
    pub async fn upload(&self, image: &SelectedImage) -> Result<ImageUrl, UploadError> {
        let path = self.storage_path(image);
        upload_within(
            self.timeout,
            self.object_store.upload(&self.bucket, &path, image),
        )
        .await?;
        let url = upload_within(
            self.timeout,
            self.object_store.public_url(&self.bucket, &path),
        )
        .await?;

        info!(bucket = %self.bucket, path = %path, "stored task image");
        Ok(url)
    }
}

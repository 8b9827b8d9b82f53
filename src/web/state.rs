//! Shared handler state.

use super::Pages;
use crate::task::{
    ports::{ObjectStore, TaskRecordStore},
    services::TaskService,
};
use camino::{Utf8Path, Utf8PathBuf};
use mockable::Clock;
use std::sync::Arc;

/// Default cap on request bodies.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Dependencies shared by every request.
pub struct AppState<R, O, C>
where
    R: TaskRecordStore,
    O: ObjectStore,
    C: Clock + Send + Sync,
{
    service: TaskService<R, O, C>,
    pages: Arc<Pages>,
    media_root: Option<Utf8PathBuf>,
    max_upload_bytes: usize,
}

impl<R, O, C> Clone for AppState<R, O, C>
where
    R: TaskRecordStore,
    O: ObjectStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            pages: Arc::clone(&self.pages),
            media_root: self.media_root.clone(),
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}

impl<R, O, C> AppState<R, O, C>
where
    R: TaskRecordStore,
    O: ObjectStore,
    C: Clock + Send + Sync,
{
    /// Creates state serving no media directory.
    #[must_use]
    pub fn new(service: TaskService<R, O, C>, pages: Pages) -> Self {
        Self {
            service,
            pages: Arc::new(pages),
            media_root: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Serves `root` under `/media`.
    #[must_use]
    pub fn with_media_root(mut self, root: &Utf8Path) -> Self {
        self.media_root = Some(root.to_path_buf());
        self
    }

    /// Caps request bodies at `bytes`.
    #[must_use]
    pub const fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }

    /// Returns the task service.
    #[must_use]
    pub const fn service(&self) -> &TaskService<R, O, C> {
        &self.service
    }

    /// Returns the page renderer.
    #[must_use]
    pub fn pages(&self) -> &Pages {
        &self.pages
    }

    /// Returns the served media directory, if any.
    #[must_use]
    pub fn media_root(&self) -> Option<&Utf8Path> {
        self.media_root.as_deref()
    }

    /// Returns the request body cap.
    #[must_use]
    pub const fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}

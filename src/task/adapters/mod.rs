//! Adapter implementations of the task ports.
//!
//! - [`memory`]: in-memory record and object stores
//! - [`postgres`]: `PostgreSQL` record store
//! - [`filesystem`]: local-directory object store

pub mod filesystem;
pub mod memory;
pub mod postgres;

use crate::task::{
    domain::{BucketName, ImageUrl, ObjectPath},
    ports::{ObjectStoreError, ObjectStoreResult},
};

/// Joins a public base URL, bucket and object path into an image URL.
fn public_url_for(
    base_url: &str,
    bucket: &BucketName,
    path: &ObjectPath,
) -> ObjectStoreResult<ImageUrl> {
    let base = base_url.trim_end_matches('/');
    ImageUrl::new(format!("{base}/{bucket}/{path}")).map_err(ObjectStoreError::storage)
}

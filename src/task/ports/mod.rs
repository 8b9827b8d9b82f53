//! Port contracts for task persistence and image storage.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod object_store;
pub mod record_store;

pub use object_store::{ObjectStore, ObjectStoreError, ObjectStoreResult};
pub use record_store::{RecordStoreError, RecordStoreResult, TaskRecordStore};

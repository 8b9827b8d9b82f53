//! In-memory adapters for task persistence and image storage.

mod object_store;
mod record_store;

pub use object_store::{InMemoryObjectStore, StoredObject};
pub use record_store::{InMemoryTaskRecordStore, RecordOperation};

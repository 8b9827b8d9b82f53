//! Domain model for task records.
//!
//! The task domain models the persisted record, its editable draft and the
//! image attachment value objects while keeping all infrastructure concerns
//! outside of the domain boundary.

mod draft;
mod error;
mod ids;
mod image;
mod task;

pub use draft::TaskDraft;
pub use error::TaskDomainError;
pub use ids::{TaskId, TaskTitle};
pub use image::{BucketName, ImageUrl, ObjectPath, SelectedImage, UploadPrefix};
pub use task::{Task, TaskFields};

//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// The task identifier is not a positive integer.
    #[error("invalid task identifier '{0}', expected a positive integer")]
    InvalidTaskId(String),

    /// The image URL is empty.
    #[error("image URL must not be empty")]
    EmptyImageUrl,

    /// The bucket name is empty or contains a path separator.
    #[error("invalid bucket name '{0}'")]
    InvalidBucket(String),

    /// The upload prefix is not a relative path of plain segments.
    #[error("invalid upload prefix '{0}'")]
    InvalidUploadPrefix(String),
}

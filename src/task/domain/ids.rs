//! Identifier and validated scalar types for the task domain.

use super::TaskDomainError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Record-store assigned identifier for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Creates a validated task identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTaskId`] when the value is zero or
    /// negative.
    pub fn new(value: i64) -> Result<Self, TaskDomainError> {
        if value <= 0 {
            return Err(TaskDomainError::InvalidTaskId(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl FromStr for TaskId {
    type Err = TaskDomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| TaskDomainError::InvalidTaskId(raw.to_owned()))?;
        Self::new(value)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task title that is non-empty after trimming.
///
/// The title is stored exactly as entered; trimming only decides validity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the value is empty or
    /// whitespace only.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self(raw))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

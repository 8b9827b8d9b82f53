//! Image attachment value objects.

use super::TaskDomainError;
use serde::Serialize;
use std::fmt;

/// Durable, publicly resolvable URL of a stored task image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Creates a non-empty image URL.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyImageUrl`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(TaskDomainError::EmptyImageUrl);
        }
        Ok(Self(raw))
    }

    /// Maps a persisted column value to an optional URL.
    ///
    /// Stores represent "no image" as an empty string.
    #[must_use]
    pub fn from_persisted(raw: String) -> Option<Self> {
        Self::new(raw).ok()
    }

    /// Returns the URL as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ImageUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ImageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Object-store bucket holding task images.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketName(String);

impl BucketName {
    /// Creates a validated bucket name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidBucket`] when the name is empty, is a
    /// relative path component, or contains a path separator.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if !is_plain_segment(trimmed) {
            return Err(TaskDomainError::InvalidBucket(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the bucket name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed logical prefix under which uploads are placed, e.g. `task-images`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UploadPrefix(String);

impl UploadPrefix {
    /// Creates a validated prefix of one or more plain path segments.
    ///
    /// Leading and trailing slashes are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidUploadPrefix`] when the prefix is
    /// empty or contains an empty, `.` or `..` segment.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim().trim_matches('/');
        let is_valid = !normalized.is_empty() && normalized.split('/').all(is_plain_segment);
        if !is_valid {
            return Err(TaskDomainError::InvalidUploadPrefix(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the prefix as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UploadPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\'])
        && !segment.chars().any(char::is_whitespace)
}

/// Relative location of an object inside a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectPath(String);

impl ObjectPath {
    /// Derives the storage path for a fresh upload.
    ///
    /// The file name is the upload timestamp followed by the original
    /// extension, when one is usable.
    #[must_use]
    pub fn for_upload(prefix: &UploadPrefix, timestamp: i64, extension: Option<&str>) -> Self {
        let path = match extension {
            Some(ext) => format!("{prefix}/{timestamp}.{ext}"),
            None => format!("{prefix}/{timestamp}"),
        };
        Self(path)
    }

    /// Returns the path as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ObjectPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Image file chosen by the user for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedImage {
    file_name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

impl SelectedImage {
    /// Creates a selected image from its original file name and contents.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    /// Sets the declared MIME type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Returns the original file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the declared MIME type, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the file contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the original extension when it is plain ASCII alphanumeric.
    ///
    /// `photo.PNG` yields `PNG`; `archive`, `trailing.` and `a.b/c` yield
    /// `None`.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        let (_, ext) = self.file_name.rsplit_once('.')?;
        let is_usable = !ext.is_empty() && ext.chars().all(|ch| ch.is_ascii_alphanumeric());
        is_usable.then_some(ext)
    }
}

impl fmt::Debug for SelectedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedImage")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

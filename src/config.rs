//! Runtime configuration read from environment variables.
//!
//! | variable                     | default                        |
//! |------------------------------|--------------------------------|
//! | `TASKPAD_BIND_ADDRESS`       | `127.0.0.1:3000`               |
//! | `DATABASE_URL`               | unset: in-memory record store  |
//! | `TASKPAD_MEDIA_ROOT`         | `media`                        |
//! | `TASKPAD_PUBLIC_MEDIA_URL`   | `http://127.0.0.1:3000/media`  |
//! | `TASKPAD_BUCKET`             | `task_bk`                      |
//! | `TASKPAD_UPLOAD_PREFIX`      | `task-images`                  |
//! | `TASKPAD_STORE_TIMEOUT_SECS` | `10`                           |
//! | `TASKPAD_MAX_UPLOAD_BYTES`   | `10485760`                     |

use crate::task::domain::{BucketName, UploadPrefix};
use camino::Utf8PathBuf;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

const BIND_ADDRESS: &str = "TASKPAD_BIND_ADDRESS";
const DATABASE_URL: &str = "DATABASE_URL";
const MEDIA_ROOT: &str = "TASKPAD_MEDIA_ROOT";
const PUBLIC_MEDIA_URL: &str = "TASKPAD_PUBLIC_MEDIA_URL";
const BUCKET: &str = "TASKPAD_BUCKET";
const UPLOAD_PREFIX: &str = "TASKPAD_UPLOAD_PREFIX";
const STORE_TIMEOUT_SECS: &str = "TASKPAD_STORE_TIMEOUT_SECS";
const MAX_UPLOAD_BYTES: &str = "TASKPAD_MAX_UPLOAD_BYTES";

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";
const DEFAULT_MEDIA_ROOT: &str = "media";
const DEFAULT_PUBLIC_MEDIA_URL: &str = "http://127.0.0.1:3000/media";
const DEFAULT_BUCKET: &str = "task_bk";
const DEFAULT_UPLOAD_PREFIX: &str = "task-images";
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable holds a value that cannot be parsed.
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ConfigError {
    fn invalid(name: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::Invalid {
            name,
            value: value.to_owned(),
            reason: reason.to_string(),
        }
    }
}

/// Application settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address the HTTP server binds to.
    pub bind_address: SocketAddr,
    /// `PostgreSQL` connection URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Directory backing the filesystem object store.
    pub media_root: Utf8PathBuf,
    /// Public URL under which `media_root` is served.
    pub public_media_url: String,
    /// Bucket receiving task images.
    pub bucket: BucketName,
    /// Folder prefix for uploaded images.
    pub upload_prefix: UploadPrefix,
    /// Deadline applied to each store call.
    pub store_timeout: Duration,
    /// Maximum accepted request body size.
    pub max_upload_bytes: usize,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first variable with an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, falling back to defaults for
    /// unset or blank variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first variable with an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let bind_raw = read(BIND_ADDRESS).unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_owned());
        let bind_address = bind_raw
            .parse()
            .map_err(|err| ConfigError::invalid(BIND_ADDRESS, &bind_raw, err))?;

        let bucket_raw = read(BUCKET).unwrap_or_else(|| DEFAULT_BUCKET.to_owned());
        let bucket = BucketName::new(bucket_raw.as_str())
            .map_err(|err| ConfigError::invalid(BUCKET, &bucket_raw, err))?;

        let prefix_raw = read(UPLOAD_PREFIX).unwrap_or_else(|| DEFAULT_UPLOAD_PREFIX.to_owned());
        let upload_prefix = UploadPrefix::new(prefix_raw.as_str())
            .map_err(|err| ConfigError::invalid(UPLOAD_PREFIX, &prefix_raw, err))?;

        let store_timeout = match read(STORE_TIMEOUT_SECS) {
            Some(raw) => Duration::from_secs(positive(STORE_TIMEOUT_SECS, &raw)?),
            None => Duration::from_secs(DEFAULT_STORE_TIMEOUT_SECS),
        };
        let max_upload_bytes = match read(MAX_UPLOAD_BYTES) {
            Some(raw) => usize::try_from(positive(MAX_UPLOAD_BYTES, &raw)?)
                .map_err(|err| ConfigError::invalid(MAX_UPLOAD_BYTES, &raw, err))?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            bind_address,
            database_url: read(DATABASE_URL),
            media_root: Utf8PathBuf::from(
                read(MEDIA_ROOT).unwrap_or_else(|| DEFAULT_MEDIA_ROOT.to_owned()),
            ),
            public_media_url: read(PUBLIC_MEDIA_URL)
                .unwrap_or_else(|| DEFAULT_PUBLIC_MEDIA_URL.to_owned()),
            bucket,
            upload_prefix,
            store_timeout,
            max_upload_bytes,
        })
    }
}

fn positive(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::invalid(name, raw, "must be greater than zero")),
        Ok(value) => Ok(value),
        Err(err) => Err(ConfigError::invalid(name, raw, err)),
    }
}

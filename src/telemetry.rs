//! Tracing subscriber setup for the binary.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter applied when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "taskpad=info,tower_http=info";

/// Installs a global formatting subscriber filtered by `RUST_LOG`.
///
/// # Errors
///
/// Returns an error when a global subscriber is already installed.
pub fn init() -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()
}

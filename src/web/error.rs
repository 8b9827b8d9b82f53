//! Errors that abort a request before a page can be rendered.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

/// Request-level failure.
#[derive(Debug, Error)]
pub enum WebError {
    /// A template failed to render.
    #[error("page rendering failed: {0}")]
    Render(#[from] minijinja::Error),

    /// The multipart body could not be read.
    #[error(transparent)]
    Multipart(#[from] MultipartError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            Self::Render(err) => {
                error!(error = %err, "page rendering failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
            Self::Multipart(err) => (err.status(), err.body_text()).into_response(),
        }
    }
}

//! Server-rendered HTML pages for the task list, the add and edit forms and
//! delete confirmation.
//!
//! Handlers are generic over the record store, object store and clock so the
//! same router serves `PostgreSQL` deployments and in-memory test runs.

mod error;
mod handlers;
mod pages;
mod state;

pub use error::WebError;
pub use pages::{Notice, Pages};
pub use state::{AppState, DEFAULT_MAX_UPLOAD_BYTES};

use crate::task::ports::{ObjectStore, TaskRecordStore};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use mockable::Clock;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Builds the application router.
///
/// Request bodies are capped at [`AppState::max_upload_bytes`], and the media
/// directory, when configured, is served under `/media`.
pub fn router<R, O, C>(state: AppState<R, O, C>) -> Router
where
    R: TaskRecordStore + 'static,
    O: ObjectStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let body_limit = state.max_upload_bytes();
    let media = state.media_root().map(|root| ServeDir::new(root.as_std_path()));

    let mut app = Router::new()
        .route("/", get(handlers::home::<R, O, C>))
        .route("/tasks", get(handlers::list_tasks::<R, O, C>))
        .route(
            "/tasks/new",
            get(handlers::new_task_form::<R, O, C>).post(handlers::create_task::<R, O, C>),
        )
        .route(
            "/tasks/{id}/edit",
            get(handlers::edit_task_form::<R, O, C>).post(handlers::update_task::<R, O, C>),
        )
        .route(
            "/tasks/{id}/delete",
            get(handlers::confirm_delete::<R, O, C>).post(handlers::delete_task::<R, O, C>),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state);

    if let Some(serve_dir) = media {
        app = app.nest_service("/media", serve_dir);
    }
    app.layer(TraceLayer::new_for_http())
}

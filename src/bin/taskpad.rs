//! Serves the task pages over HTTP.
//!
//! Configuration is read from the environment (see [`taskpad::config`]).
//! When `DATABASE_URL` is set tasks are stored in `PostgreSQL`, otherwise
//! in memory for the lifetime of the process.

use std::sync::Arc;

use mockable::DefaultClock;
use taskpad::config::AppConfig;
use taskpad::task::{
    adapters::{
        filesystem::FilesystemObjectStore,
        memory::InMemoryTaskRecordStore,
        postgres::{PostgresTaskRecordStore, connect},
    },
    ports::TaskRecordStore,
    services::{ImageAttachmentWorkflow, TaskService},
};
use taskpad::telemetry;
use taskpad::web::{AppState, Pages, router};
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

const POOL_SIZE: u32 = 8;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    telemetry::init()?;
    let config = AppConfig::from_env()?;

    match config.database_url.as_deref() {
        Some(url) => {
            let store = PostgresTaskRecordStore::new(connect(url, POOL_SIZE)?);
            store.ensure_schema().await?;
            info!("using PostgreSQL record store");
            serve(&config, store).await
        }
        None => {
            warn!("DATABASE_URL not set; tasks are kept in memory only");
            serve(&config, InMemoryTaskRecordStore::new()).await
        }
    }
}

async fn serve<R>(config: &AppConfig, record_store: R) -> Result<(), BoxError>
where
    R: TaskRecordStore + 'static,
{
    let object_store = FilesystemObjectStore::open(&config.media_root, &config.public_media_url)?;
    let attachments = ImageAttachmentWorkflow::new(
        Arc::new(object_store),
        Arc::new(DefaultClock),
        config.bucket.clone(),
        config.upload_prefix.clone(),
    )
    .with_timeout(config.store_timeout);
    let service = TaskService::new(Arc::new(record_store), attachments, config.store_timeout);
    let state = AppState::new(service, Pages::new()?)
        .with_media_root(&config.media_root)
        .with_max_upload_bytes(config.max_upload_bytes);

    let listener = TcpListener::bind(config.bind_address).await?;
    info!(address = %config.bind_address, media_root = %config.media_root, "serving task pages");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
    }
}

//! `PostgreSQL` record store implementation for task storage.

use super::{
    SCHEMA_SQL,
    models::{TaskColumns, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{ImageUrl, Task, TaskFields, TaskId, TaskTitle},
    ports::{RecordStoreError, RecordStoreResult, TaskRecordStore},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`RecordStoreError::Persistence`] when the pool cannot establish
/// its initial connections.
pub fn connect(database_url: &str, max_size: u32) -> RecordStoreResult<TaskPgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(RecordStoreError::persistence)
}

/// `PostgreSQL`-backed task record store.
#[derive(Debug, Clone)]
pub struct PostgresTaskRecordStore {
    pool: TaskPgPool,
}

impl PostgresTaskRecordStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Creates the `tasks` table when it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError`] when the schema statement fails.
    pub async fn ensure_schema(&self) -> RecordStoreResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(SCHEMA_SQL)
                .map_err(store_error)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> RecordStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RecordStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(RecordStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(RecordStoreError::persistence)?
    }
}

#[async_trait]
impl TaskRecordStore for PostgresTaskRecordStore {
    async fn insert(&self, fields: &TaskFields) -> RecordStoreResult<Task> {
        let columns = to_columns(fields);
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&columns)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(store_error)?;
            row_to_task(row)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> RecordStoreResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.value()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(store_error)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_all(&self) -> RecordStoreResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(store_error)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn update_by_id(&self, id: TaskId, fields: &TaskFields) -> RecordStoreResult<()> {
        let columns = to_columns(fields);
        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.filter(tasks::id.eq(id.value())))
                .set(&columns)
                .execute(connection)
                .map_err(store_error)?;
            if affected == 0 {
                return Err(RecordStoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_by_id(&self, id: TaskId) -> RecordStoreResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.filter(tasks::id.eq(id.value())))
                .execute(connection)
                .map_err(store_error)?;
            if affected == 0 {
                return Err(RecordStoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

/// Surfaces database messages verbatim; other failures keep their source.
fn store_error(err: DieselError) -> RecordStoreError {
    match err {
        DieselError::DatabaseError(_, info) => {
            RecordStoreError::Rejected(info.message().to_owned())
        }
        other => RecordStoreError::persistence(other),
    }
}

fn to_columns(fields: &TaskFields) -> TaskColumns {
    TaskColumns {
        title: fields.title.as_str().to_owned(),
        detail: fields.detail.clone(),
        image_url: fields
            .image_url
            .as_ref()
            .map(|url| url.as_str().to_owned())
            .unwrap_or_default(),
        is_completed: fields.is_completed,
    }
}

fn row_to_task(row: TaskRow) -> RecordStoreResult<Task> {
    let TaskRow {
        id,
        title,
        detail,
        image_url,
        is_completed,
    } = row;

    let task_id = TaskId::new(id).map_err(RecordStoreError::persistence)?;
    let task_title = TaskTitle::new(title).map_err(RecordStoreError::persistence)?;
    let fields = TaskFields::new(task_title)
        .with_detail(detail)
        .with_image_url(ImageUrl::from_persisted(image_url))
        .with_completed(is_completed);
    Ok(Task::new(task_id, fields))
}

//! `PostgreSQL` adapter for task persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresTaskRecordStore, TaskPgPool, connect};

/// SQL creating the `tasks` table when it does not exist.
pub const SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_tasks/up.sql");

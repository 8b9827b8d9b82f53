//! Diesel row models for task persistence.

use super::schema::tasks;
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Store-assigned task identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Free-text detail.
    pub detail: String,
    /// Public image URL or empty string.
    pub image_url: String,
    /// Completion flag.
    pub is_completed: bool,
}

/// Column values written by inserts and full-record updates.
#[derive(Debug, Clone, PartialEq, Eq, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskColumns {
    /// Task title.
    pub title: String,
    /// Free-text detail.
    pub detail: String,
    /// Public image URL or empty string.
    pub image_url: String,
    /// Completion flag.
    pub is_completed: bool,
}

//! Taskpad: a small task tracker with optional image attachments.
//!
//! Tasks carry a title, a free-text detail, a completion flag and an
//! optional image. Images are uploaded to an object store and referenced by
//! public URL from the task record.
//!
//! # Architecture
//!
//! Taskpad follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the record and object stores
//! - **Adapters**: Concrete implementations of ports (`PostgreSQL`, local
//!   directory, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Task records, the image attachment workflow and form control
//! - [`web`]: Server-rendered pages built on the task services
//! - [`config`]: Environment-driven settings
//! - [`telemetry`]: Tracing subscriber setup

pub mod config;
pub mod task;
pub mod telemetry;
pub mod web;

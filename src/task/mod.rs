//! Task record lifecycle and image attachment workflow.
//!
//! This module covers creating, listing, editing and deleting task records,
//! including the optional uploaded image, and keeps a task's persisted state
//! consistent across those flows. It follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

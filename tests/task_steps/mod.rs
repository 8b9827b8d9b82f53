//! Step definitions shared by the task form and task list scenarios.

pub mod world;

mod given;
mod then;
mod when;

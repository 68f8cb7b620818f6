//! Domain model for the single task list.
//!
//! # Responsibility
//! - Define the canonical `Task` record and its persisted shape.
//! - Define the read-side types (`Filter`, `DerivedView`) derived from a list.
//!
//! # Invariants
//! - A validated task name is never blank.
//! - Task identity is positional: a task's index in the owning list is the
//!   only handle an in-flight action has, and it shifts when earlier tasks
//!   are removed.

pub mod task;

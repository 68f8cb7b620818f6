//! Store layer: the single mutation entry point over the persistence port.
//!
//! # Responsibility
//! - Orchestrate list mutations and keep them coupled to persistence.
//! - Keep callers decoupled from storage backend details.

pub mod task_store;

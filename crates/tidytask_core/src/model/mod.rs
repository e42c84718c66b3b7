//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical task record and its partial-update shape.
//! - Own the id-generation contract used by the store.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Removal is hard delete; there are no tombstones.

pub mod task;

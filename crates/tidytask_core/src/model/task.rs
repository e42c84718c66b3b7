//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record owned by the store.
//! - Provide the id-generation seam used at creation time.
//!
//! # Invariants
//! - `id` is unique within a collection and never reassigned.
//! - A task is fully constructed at creation; there is no partial state.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Stable identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// Values are monotonic epoch-millisecond stamps from [`ClockIdSource`];
/// tests substitute small sequential values.
pub type TaskId = u64;

/// Canonical task record.
///
/// Field names double as the stored slot schema, so the serialized form
/// stays `{"id":..,"title":..,"completed":..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable id used for lookups and render targeting.
    pub id: TaskId,
    /// Human-readable title text.
    pub title: String,
    /// Completion flag. Defaults to `false` at creation.
    pub completed: bool,
}

impl Task {
    /// Creates a task with the given id and title.
    ///
    /// # Invariants
    /// - `completed` starts as `false`.
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
        }
    }
}

/// Partial-update request model for [`crate::store::TaskStore::update`].
///
/// Only fields set to `Some` are applied; the rest are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement title, when present.
    pub title: Option<String>,
    /// Replacement completion flag, when present.
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Builds a patch that only replaces the title.
    pub fn retitle(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            completed: None,
        }
    }

    /// Builds a patch that only replaces the completion flag.
    pub fn set_completed(completed: bool) -> Self {
        Self {
            title: None,
            completed: Some(completed),
        }
    }
}

/// Source of fresh task ids.
///
/// The store draws from this seam at creation time, so tests can inject
/// deterministic sequences.
pub trait IdSource {
    /// Returns the next candidate id. Successive calls must never repeat.
    fn next_id(&mut self) -> TaskId;
}

/// Production id source: epoch milliseconds, bumped to stay strictly
/// increasing when the clock does not advance between calls.
#[derive(Debug, Default)]
pub struct ClockIdSource {
    last: TaskId,
}

impl ClockIdSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for ClockIdSource {
    fn next_id(&mut self) -> TaskId {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0);
        let id = now.max(self.last + 1);
        self.last = id;
        id
    }
}

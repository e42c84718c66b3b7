//! Task collection authority.
//!
//! # Responsibility
//! - Own the task collection and every mutation on it.
//! - Emit exactly one `Changed` notification per successful mutation.
//!
//! # Invariants
//! - Task ids stay unique within the collection at all times.
//! - Iteration order is insertion order; no operation reorders surviving
//!   entries.
//! - Only this module mutates task fields.

use crate::events::{Listener, Notifier, StoreEvent};
use crate::model::task::{IdSource, Task, TaskId, TaskPatch};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Mutation errors raised by [`TaskStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// `update` was called with an id that is not in the collection.
    ///
    /// The controller only passes ids it received from rendered items, so
    /// hitting this is a wiring bug, not a user-recoverable condition.
    NotFound(TaskId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "task not found: {id}"),
        }
    }
}

impl Error for StoreError {}

/// In-memory ordered task collection and sole emitter of `Changed`.
pub struct TaskStore {
    tasks: Vec<Task>,
    ids: Box<dyn IdSource>,
    changed: Notifier<StoreEvent>,
}

impl TaskStore {
    /// Creates an empty store drawing ids from `ids`.
    pub fn new(ids: Box<dyn IdSource>) -> Self {
        Self::with_tasks(Vec::new(), ids)
    }

    /// Creates a store seeded with a previously persisted collection.
    ///
    /// Seeding does not emit `Changed`; nothing mutated yet.
    pub fn with_tasks(tasks: Vec<Task>, ids: Box<dyn IdSource>) -> Self {
        Self {
            tasks,
            ids,
            changed: Notifier::new(),
        }
    }

    /// Subscribes a listener to the `Changed` channel.
    pub fn on_changed(&mut self, listener: Listener<StoreEvent>) {
        self.changed.subscribe(listener);
    }

    /// Read access to the ordered collection.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks a task up by id. Linear scan; the collection is small.
    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Creates a task with a fresh unique id and appends it at the end.
    ///
    /// # Contract
    /// - `completed` starts as `false`.
    /// - Emits one `Changed` with the full collection.
    /// - Returns a snapshot of the created task.
    pub fn create(&mut self, title: impl Into<String>) -> Task {
        let mut id = self.ids.next_id();
        // A seeded collection may already hold ids at or past the source's
        // current position; re-draw until the id is unused.
        while self.find(id).is_some() {
            id = self.ids.next_id();
        }

        let task = Task::new(id, title);
        self.tasks.push(task.clone());
        info!(
            "event=store_create module=store status=ok id={id} count={}",
            self.tasks.len()
        );
        self.emit_changed();
        task
    }

    /// Applies the present fields of `patch` to the task with `id`.
    ///
    /// # Contract
    /// - Absent patch fields are left untouched.
    /// - Emits one `Changed` on success; emits nothing on `NotFound`.
    /// - Returns a snapshot of the updated task.
    pub fn update(&mut self, id: TaskId, patch: TaskPatch) -> StoreResult<Task> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            error!(
                "event=store_update module=store status=error error_code=task_not_found id={id}"
            );
            return Err(StoreError::NotFound(id));
        };

        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        let updated = task.clone();

        info!("event=store_update module=store status=ok id={id}");
        self.emit_changed();
        Ok(updated)
    }

    /// Removes the task with `id`, keeping the relative order of the rest.
    ///
    /// A miss is a benign no-op (double-remove is tolerated) and emits
    /// nothing.
    pub fn remove(&mut self, id: TaskId) {
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            debug!("event=store_remove module=store status=skip reason=not_found id={id}");
            return;
        };

        self.tasks.remove(index);
        info!(
            "event=store_remove module=store status=ok id={id} count={}",
            self.tasks.len()
        );
        self.emit_changed();
    }

    fn emit_changed(&mut self) {
        let snapshot = self.tasks.clone();
        self.changed.publish(&StoreEvent::Changed(snapshot));
    }
}

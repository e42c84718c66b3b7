//! Persistence adapter bridging the store to a string-keyed slot.
//!
//! # Responsibility
//! - Define the slot storage contract and its in-memory implementation.
//! - Serialize the full collection to one slot on every store change and
//!   deserialize it once at startup.
//!
//! # Invariants
//! - Writes overwrite the whole slot; last write wins.
//! - A missing or unparsable slot yields the empty collection, never a
//!   startup failure.

pub mod sqlite;

use crate::db::DbError;
use crate::model::task::Task;
use log::{debug, info, warn};
use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use sqlite::SqliteSlotStorage;

/// Slot key the task collection lives under.
///
/// Kept as `todos` so slots written by earlier builds keep loading.
pub const TASKS_SLOT_KEY: &str = "todos";

pub type StorageResult<T> = Result<T, StorageError>;

/// Errors surfaced by slot storage implementations and the archive codec.
#[derive(Debug)]
pub enum StorageError {
    /// Storage backend failure.
    Db(DbError),
    /// Collection could not be serialized for the slot.
    Encode(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode slot payload: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// String-keyed durable storage contract.
///
/// Implementations take `&self`; single-threaded callers may hold one
/// behind a shared handle, so mutation is interior.
pub trait SlotStorage {
    /// Reads the slot, `None` when it was never written.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Overwrites the slot with `value`.
    fn put(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: SlotStorage> SlotStorage for std::rc::Rc<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).put(key, value)
    }
}

/// In-memory slot storage for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemorySlotStorage {
    slots: RefCell<HashMap<String, String>>,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStorage for MemorySlotStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON codec over one storage slot holding the full task collection.
pub struct TaskArchive<S: SlotStorage> {
    storage: S,
    slot: String,
}

impl<S: SlotStorage> TaskArchive<S> {
    /// Archive over the default slot key.
    pub fn new(storage: S) -> Self {
        Self::with_slot(storage, TASKS_SLOT_KEY)
    }

    /// Archive over a caller-chosen slot key.
    pub fn with_slot(storage: S, slot: impl Into<String>) -> Self {
        Self {
            storage,
            slot: slot.into(),
        }
    }

    /// Serializes the full ordered collection and overwrites the slot.
    pub fn save(&self, tasks: &[Task]) -> StorageResult<()> {
        let payload = serde_json::to_string(tasks)?;
        self.storage.put(&self.slot, &payload)?;
        debug!(
            "event=slot_save module=persist status=ok slot={} count={}",
            self.slot,
            tasks.len()
        );
        Ok(())
    }

    /// Reads the slot once at startup.
    ///
    /// Absent, unreadable or corrupt data all degrade to the empty
    /// collection; persistence problems never block startup.
    pub fn load(&self) -> Vec<Task> {
        let raw = match self.storage.get(&self.slot) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!(
                    "event=slot_load module=persist status=ok slot={} reason=absent count=0",
                    self.slot
                );
                return Vec::new();
            }
            Err(err) => {
                warn!(
                    "event=slot_load module=persist status=degraded slot={} error={err}",
                    self.slot
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Task>>(&raw) {
            Ok(tasks) => {
                info!(
                    "event=slot_load module=persist status=ok slot={} count={}",
                    self.slot,
                    tasks.len()
                );
                tasks
            }
            Err(err) => {
                warn!(
                    "event=slot_load module=persist status=degraded slot={} reason=corrupt error={err}",
                    self.slot
                );
                Vec::new()
            }
        }
    }
}

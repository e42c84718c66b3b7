//! Core logic for the TidyTask list.
//! This crate is the single source of truth for task-list invariants.

pub mod app;
pub mod controller;
pub mod db;
pub mod events;
pub mod logging;
pub mod model;
pub mod persist;
pub mod store;
pub mod view;

pub use app::App;
pub use controller::Controller;
pub use events::{Listener, Notifier, StoreEvent, ViewEvent};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{ClockIdSource, IdSource, Task, TaskId, TaskPatch};
pub use persist::{
    MemorySlotStorage, SlotStorage, SqliteSlotStorage, StorageError, StorageResult, TaskArchive,
    TASKS_SLOT_KEY,
};
pub use store::{StoreError, StoreResult, TaskStore};
pub use view::{EditPhase, Gesture, ListItem, Presenter, Surface, EMPTY_TITLE_NOTICE};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

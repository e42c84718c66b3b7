//! View layer: in-memory visual surface and the presenter driving it.
//!
//! # Responsibility
//! - Project task state into rendered list items.
//! - Translate host gestures into semantic view events.
//!
//! # Invariants
//! - The view never mutates task fields; it only mirrors them.
//! - Rendered item order matches the store's insertion order.

pub mod presenter;
pub mod surface;

pub use presenter::{Gesture, Presenter, EMPTY_TITLE_NOTICE};
pub use surface::{EditPhase, ListItem, Surface};

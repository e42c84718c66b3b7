//! Typed notification channels decoupling store, view and controller.
//!
//! # Responsibility
//! - Provide the generic publish/subscribe primitive (`Notifier`).
//! - Enumerate the payload shapes each channel may carry.
//!
//! # Invariants
//! - Listeners are invoked synchronously, in registration order.
//! - Publishing on a channel with no listeners is a silent no-op.
//! - A listener panic propagates to the publisher; dispatch never swallows
//!   failures.

use crate::model::task::{Task, TaskId};

/// Events emitted by the store after a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// The collection changed; carries a full ordered snapshot.
    Changed(Vec<Task>),
}

/// Semantic gesture events emitted by the view layer.
///
/// A fixed variant set instead of a string-keyed registry, so payload
/// shapes are checked at compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// User submitted a new task with the given normalized title.
    Add { title: String },
    /// User toggled an item's checkbox; `completed` is the new state.
    Toggle { id: TaskId, completed: bool },
    /// User committed an in-place edit with the field's current value.
    Edit { id: TaskId, title: String },
    /// User removed an item. No confirmation step.
    Remove { id: TaskId },
}

/// Listener callback registered on a [`Notifier`] channel.
pub type Listener<E> = Box<dyn FnMut(&E)>;

/// Single-channel publish/subscribe registry.
///
/// One `Notifier` carries one event enum; consumers match on the variants
/// they care about. There is no de-duplication and no unsubscription, which
/// matches how the channels are wired here: subscriptions live as long as
/// the application graph.
pub struct Notifier<E> {
    listeners: Vec<Listener<E>>,
}

impl<E> Notifier<E> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Registers one listener. Listeners fire in registration order.
    pub fn subscribe(&mut self, listener: Listener<E>) {
        self.listeners.push(listener);
    }

    /// Invokes every registered listener with `event`, synchronously.
    pub fn publish(&mut self, event: &E) {
        for listener in self.listeners.iter_mut() {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<E> Default for Notifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

//! Application assembly and gesture dispatch.
//!
//! # Responsibility
//! - Wire store, presenter, controller and persistence into one graph.
//! - Run the synchronous gesture -> event -> mutation -> render pipeline.
//!
//! # Invariants
//! - The slot is loaded exactly once, before the initial render.
//! - Every store mutation reaches the archive through the `Changed`
//!   channel; the app never calls `save` directly.

use crate::controller::Controller;
use crate::events::{Notifier, StoreEvent, ViewEvent};
use crate::model::task::{ClockIdSource, IdSource, Task, TaskId};
use crate::persist::{SlotStorage, TaskArchive};
use crate::store::TaskStore;
use crate::view::presenter::{Gesture, Presenter};
use crate::view::surface::Surface;
use log::error;
use std::cell::RefCell;
use std::rc::Rc;

/// Fully wired task-list application.
///
/// Hosts deliver gestures through [`App::dispatch`] and read the visible
/// state back through [`App::with_surface`]; everything in between runs
/// synchronously on the calling thread.
pub struct App {
    store: Rc<RefCell<TaskStore>>,
    presenter: Rc<RefCell<Presenter>>,
    view_events: Notifier<ViewEvent>,
}

impl App {
    /// Boots the application over `storage` with clock-derived ids.
    pub fn new<S: SlotStorage + 'static>(storage: S) -> Self {
        Self::with_id_source(storage, Box::new(ClockIdSource::new()))
    }

    /// Boots the application with a caller-chosen id source.
    ///
    /// Startup order: load slot, seed store, attach the archive to the
    /// `Changed` channel, wire the controller, render the initial list.
    pub fn with_id_source<S: SlotStorage + 'static>(storage: S, ids: Box<dyn IdSource>) -> Self {
        let archive = TaskArchive::new(storage);
        let initial = archive.load();

        let mut store = TaskStore::with_tasks(initial, ids);
        store.on_changed(Box::new(move |event| {
            let StoreEvent::Changed(tasks) = event;
            if let Err(err) = archive.save(tasks) {
                // The in-memory mutation already happened; losing one write
                // degrades durability, not correctness.
                error!("event=slot_save module=persist status=error error={err}");
            }
        }));
        let store = Rc::new(RefCell::new(store));

        let mut presenter = Presenter::new(Surface::new());
        presenter.render(store.borrow().tasks());
        let presenter = Rc::new(RefCell::new(presenter));

        let mut view_events = Notifier::new();
        Controller::wire(&mut view_events, Rc::clone(&store), Rc::clone(&presenter));

        Self {
            store,
            presenter,
            view_events,
        }
    }

    /// Delivers one host gesture.
    ///
    /// The presenter translates it first; the resulting semantic event (if
    /// any) is then published on the view channel, where the controller
    /// performs the mutation and render update before this call returns.
    pub fn dispatch(&mut self, gesture: Gesture) {
        let event = self.presenter.borrow_mut().apply_gesture(gesture);
        if let Some(event) = event {
            self.view_events.publish(&event);
        }
    }

    /// Host typing path for the entry field.
    pub fn type_entry(&mut self, text: impl Into<String>) {
        self.presenter.borrow_mut().surface_mut().set_entry_value(text);
    }

    /// Host typing path for an item's in-place edit field.
    ///
    /// No-op when the item is gone or not in its editing phase.
    pub fn type_edit(&mut self, id: TaskId, text: impl Into<String>) {
        let mut presenter = self.presenter.borrow_mut();
        if let Some(item) = presenter.surface_mut().find_item_mut(id) {
            if item.is_editing() {
                item.edit_value = text.into();
            }
        }
    }

    /// Reads the visible surface under a short-lived borrow.
    pub fn with_surface<T>(&self, reader: impl FnOnce(&Surface) -> T) -> T {
        reader(self.presenter.borrow().surface())
    }

    /// Snapshot of the authoritative collection.
    pub fn tasks(&self) -> Vec<Task> {
        self.store.borrow().tasks().to_vec()
    }
}

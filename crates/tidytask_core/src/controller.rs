//! Controller wiring view events to store mutations and render updates.
//!
//! # Responsibility
//! - Subscribe to the view channel and drive the matching store mutation.
//! - Invoke the presenter render update reflecting each mutation result.
//!
//! # Invariants
//! - This is the only component that touches both store and presenter.
//! - A `NotFound` from `update` is surfaced as an error log, never
//!   swallowed; the render update is skipped.

use crate::events::{Notifier, ViewEvent};
use crate::model::task::TaskPatch;
use crate::store::{StoreResult, TaskStore};
use crate::view::presenter::Presenter;
use log::error;
use std::cell::RefCell;
use std::rc::Rc;

/// Mediator between the view channel and the store.
///
/// Both collaborators are shared single-threaded handles; all dispatch is
/// synchronous and run-to-completion, so the interior borrows never overlap.
pub struct Controller {
    store: Rc<RefCell<TaskStore>>,
    presenter: Rc<RefCell<Presenter>>,
}

impl Controller {
    /// Registers the controller as a listener on the view channel.
    ///
    /// The controller itself moves into the subscription; nothing else
    /// needs to address it afterwards.
    pub fn wire(
        events: &mut Notifier<ViewEvent>,
        store: Rc<RefCell<TaskStore>>,
        presenter: Rc<RefCell<Presenter>>,
    ) {
        let mut controller = Controller { store, presenter };
        events.subscribe(Box::new(move |event| {
            if let Err(err) = controller.handle(event) {
                error!("event=controller_dispatch module=controller status=error error={err}");
            }
        }));
    }

    fn handle(&mut self, event: &ViewEvent) -> StoreResult<()> {
        match event {
            ViewEvent::Add { title } => {
                let task = self.store.borrow_mut().create(title.clone());
                self.presenter.borrow_mut().render_append(&task);
            }
            ViewEvent::Toggle { id, completed } => {
                let task = self
                    .store
                    .borrow_mut()
                    .update(*id, TaskPatch::set_completed(*completed))?;
                self.presenter.borrow_mut().render_toggle(&task);
            }
            ViewEvent::Edit { id, title } => {
                let task = self
                    .store
                    .borrow_mut()
                    .update(*id, TaskPatch::retitle(title.clone()))?;
                self.presenter.borrow_mut().render_edit(&task);
            }
            ViewEvent::Remove { id } => {
                self.store.borrow_mut().remove(*id);
                // Unconditional: a store miss still clears the rendered row,
                // keeping visual state consistent with permissive removal.
                self.presenter.borrow_mut().render_remove(*id);
            }
        }
        Ok(())
    }
}

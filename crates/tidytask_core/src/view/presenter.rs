//! Presenter: render operations and gesture translation.
//!
//! # Responsibility
//! - Apply imperative render updates to the surface after store mutations.
//! - Turn host gestures into semantic [`ViewEvent`]s, enforcing input
//!   validation and the two-phase edit control.
//!
//! # Invariants
//! - Gesture handling mutates only the surface, never task state.
//! - An empty submitted title surfaces a notice and emits nothing.
//! - The edit control transitions `Viewing -> Editing` on the first
//!   activation and emits only on the second; `render_edit` returns the row
//!   to `Viewing`.

use crate::events::ViewEvent;
use crate::model::task::{Task, TaskId};
use crate::view::surface::{EditPhase, ListItem, Surface};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

/// Validation message shown when the entry field is submitted empty.
pub const EMPTY_TITLE_NOTICE: &str = "A task title is required.";

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Discrete user gestures delivered by the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Entry form submitted.
    Submit,
    /// Checkbox of the item with this id clicked.
    ToggleClick(TaskId),
    /// Edit control of the item with this id activated.
    EditClick(TaskId),
    /// Remove control of the item with this id activated.
    RemoveClick(TaskId),
}

/// Collapses whitespace runs and trims the ends of a submitted title.
fn normalize_title(raw: &str) -> String {
    WHITESPACE_RE.replace_all(raw.trim(), " ").into_owned()
}

/// Owns the surface and all render/gesture logic over it.
pub struct Presenter {
    surface: Surface,
}

impl Presenter {
    pub fn new(surface: Surface) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Host-side access for typing into fields.
    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    /// Startup render: one item per task, in collection order.
    pub fn render(&mut self, tasks: &[Task]) {
        self.surface.clear_items();
        for task in tasks {
            self.surface.push_item(ListItem::from_task(task));
        }
    }

    /// Appends the rendered item for a newly created task and resets the
    /// entry field and any stale validation notice.
    pub fn render_append(&mut self, task: &Task) {
        self.surface.push_item(ListItem::from_task(task));
        self.surface.clear_entry();
        self.surface.clear_notice();
    }

    /// Mirrors `task.completed` onto the item's checkbox and marker.
    pub fn render_toggle(&mut self, task: &Task) {
        if let Some(item) = self.surface.find_item_mut(task.id) {
            item.checked = task.completed;
            item.completed = task.completed;
        }
    }

    /// Replaces the item's label with `task.title` and returns its edit
    /// control to the `Viewing` phase.
    pub fn render_edit(&mut self, task: &Task) {
        if let Some(item) = self.surface.find_item_mut(task.id) {
            item.label = task.title.clone();
            item.edit_value.clear();
            item.edit_phase = EditPhase::Viewing;
        }
    }

    /// Removes the rendered item with `id`, if present.
    pub fn render_remove(&mut self, id: TaskId) {
        self.surface.remove_item(id);
    }

    /// Translates one host gesture into at most one semantic event.
    ///
    /// Gestures addressed at ids with no rendered item are stale (the item
    /// was removed from another path) and are dropped.
    pub fn apply_gesture(&mut self, gesture: Gesture) -> Option<ViewEvent> {
        match gesture {
            Gesture::Submit => self.handle_submit(),
            Gesture::ToggleClick(id) => self.handle_toggle(id),
            Gesture::EditClick(id) => self.handle_edit(id),
            Gesture::RemoveClick(id) => self.handle_remove(id),
        }
    }

    fn handle_submit(&mut self) -> Option<ViewEvent> {
        let title = normalize_title(self.surface.entry_value());
        if title.is_empty() {
            warn!("event=gesture_submit module=view status=rejected reason=empty_title");
            self.surface.set_notice(EMPTY_TITLE_NOTICE);
            return None;
        }
        Some(ViewEvent::Add { title })
    }

    fn handle_toggle(&mut self, id: TaskId) -> Option<ViewEvent> {
        let Some(item) = self.surface.find_item_mut(id) else {
            debug!("event=gesture_toggle module=view status=skip reason=stale id={id}");
            return None;
        };
        // The host flips the checkbox before the change notification fires;
        // the event carries the new state.
        item.checked = !item.checked;
        Some(ViewEvent::Toggle {
            id,
            completed: item.checked,
        })
    }

    fn handle_edit(&mut self, id: TaskId) -> Option<ViewEvent> {
        let Some(item) = self.surface.find_item_mut(id) else {
            debug!("event=gesture_edit module=view status=skip reason=stale id={id}");
            return None;
        };
        match item.edit_phase {
            EditPhase::Viewing => {
                item.edit_value = item.label.clone();
                item.edit_phase = EditPhase::Editing;
                None
            }
            EditPhase::Editing => Some(ViewEvent::Edit {
                id,
                title: item.edit_value.clone(),
            }),
        }
    }

    fn handle_remove(&mut self, id: TaskId) -> Option<ViewEvent> {
        if self.surface.find_item(id).is_none() {
            debug!("event=gesture_remove module=view status=skip reason=stale id={id}");
            return None;
        }
        Some(ViewEvent::Remove { id })
    }
}

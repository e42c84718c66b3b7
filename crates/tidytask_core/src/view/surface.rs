//! In-memory visual surface.
//!
//! # Responsibility
//! - Model the host's visual elements as plain data: one entry field, one
//!   validation notice area, one ordered item list queryable by task id.
//!
//! # Invariants
//! - At most one rendered item exists per task id.
//! - The surface carries no task-domain logic; the presenter owns that.

use crate::model::task::{Task, TaskId};

/// Per-item phase of the edit control.
///
/// Explicit two-state machine instead of inferring the mode from the edit
/// button's current label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditPhase {
    /// Normal display; the edit control offers to start editing.
    #[default]
    Viewing,
    /// Edit field active; the edit control offers to commit.
    Editing,
}

/// One rendered task row: checkbox, title label, edit field, edit control
/// phase, and the visual markers the host styles on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Id of the task this row projects.
    pub id: TaskId,
    /// Displayed title text.
    pub label: String,
    /// Checkbox state.
    pub checked: bool,
    /// Current contents of the in-place edit field.
    pub edit_value: String,
    /// "Completed" visual marker, kept in sync with `checked`.
    pub completed: bool,
    /// Phase of the per-row edit control.
    pub edit_phase: EditPhase,
}

impl ListItem {
    /// Builds the rendered projection of one task.
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            label: task.title.clone(),
            checked: task.completed,
            edit_value: String::new(),
            completed: task.completed,
            edit_phase: EditPhase::Viewing,
        }
    }

    /// Label shown on the row's edit control in its current phase.
    pub fn edit_button_label(&self) -> &'static str {
        match self.edit_phase {
            EditPhase::Viewing => "Edit",
            EditPhase::Editing => "Save",
        }
    }

    pub fn is_editing(&self) -> bool {
        self.edit_phase == EditPhase::Editing
    }
}

/// The whole visible state of the application.
#[derive(Debug, Default)]
pub struct Surface {
    entry_value: String,
    notice: Option<String>,
    items: Vec<ListItem>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host typing path: replaces the entry field contents.
    pub fn set_entry_value(&mut self, value: impl Into<String>) {
        self.entry_value = value.into();
    }

    pub fn entry_value(&self) -> &str {
        &self.entry_value
    }

    pub fn clear_entry(&mut self) {
        self.entry_value.clear();
    }

    pub fn set_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Rendered items in display order.
    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn find_item(&self, id: TaskId) -> Option<&ListItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn find_item_mut(&mut self, id: TaskId) -> Option<&mut ListItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Appends one rendered item at the end of the list.
    pub fn push_item(&mut self, item: ListItem) {
        self.items.push(item);
    }

    /// Removes the item with `id`, preserving the order of the rest.
    /// Returns whether anything was removed.
    pub fn remove_item(&mut self, id: TaskId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn clear_items(&mut self) {
        self.items.clear();
    }
}

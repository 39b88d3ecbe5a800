//! Enumerations for TUI state management.

use crate::tui::task_form::TaskForm;

/// What the board is currently waiting for from the keyboard.
#[derive(Clone, Debug)]
pub enum BoardMode {
    /// Navigating cards and columns.
    Normal,
    /// New-task form is open.
    Adding(TaskForm),
    /// Editing an existing card in place.
    Editing { id: u64, form: TaskForm },
    /// Waiting for y/n before deleting a card.
    ConfirmDelete(u64),
}

impl BoardMode {
    pub fn is_normal(&self) -> bool {
        matches!(self, BoardMode::Normal)
    }
}

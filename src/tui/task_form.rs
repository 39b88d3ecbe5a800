//! Task form handling for the terminal user interface.
//!
//! The board uses one form for both adding and editing a card: a title
//! line and a description line, switched with Tab.

use crate::{task::Task, tui::input::InputField};

/// Global order constants for form fields.
pub const TITLE_GLOBAL_ORDER: usize = 0;
pub const DESCRIPTION_GLOBAL_ORDER: usize = 1;

/// Task form for editing fields
#[derive(Clone, Debug)]
pub struct TaskForm {
    pub title: InputField,
    pub description: InputField,
    pub current_field: usize,
}

impl TaskForm {
    /// Create an empty form with the title field active.
    pub fn new() -> Self {
        let mut form = TaskForm {
            title: InputField::new(),
            description: InputField::new(),
            current_field: TITLE_GLOBAL_ORDER,
        };
        form.update_active_field();
        form
    }

    /// Create a form pre-filled from an existing task.
    pub fn from_task(task: &Task) -> Self {
        let mut form = TaskForm {
            title: InputField::with_value(&task.title),
            description: InputField::with_value(&task.description),
            current_field: TITLE_GLOBAL_ORDER,
        };
        form.update_active_field();
        form
    }

    /// Get the total number of fields.
    pub fn field_count(&self) -> usize {
        2
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % self.field_count();
        self.update_active_field();
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            self.field_count() - 1
        } else {
            self.current_field - 1
        };
        self.update_active_field();
    }

    /// Update which field is currently active for editing.
    pub fn update_active_field(&mut self) {
        self.title.active = self.current_field == TITLE_GLOBAL_ORDER;
        self.description.active = self.current_field == DESCRIPTION_GLOBAL_ORDER;
    }

    fn active_mut(&mut self) -> &mut InputField {
        match self.current_field {
            DESCRIPTION_GLOBAL_ORDER => &mut self.description,
            _ => &mut self.title,
        }
    }

    /// Handle character input for the currently active field.
    pub fn handle_char(&mut self, c: char) {
        self.active_mut().handle_char(c);
    }

    /// Handle backspace input for the currently active field.
    pub fn handle_backspace(&mut self) {
        self.active_mut().handle_backspace();
    }

    /// Handle delete input for the currently active field.
    pub fn handle_delete(&mut self) {
        self.active_mut().handle_delete();
    }

    /// Handle left/right arrow keys for cursor movement.
    pub fn handle_left_right(&mut self, right: bool) {
        let field = self.active_mut();
        if right {
            field.move_cursor_right()
        } else {
            field.move_cursor_left()
        }
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_goes_to_active_field() {
        let mut form = TaskForm::new();
        assert!(form.title.active);
        form.handle_char('a');
        form.next_field();
        assert!(form.description.active && !form.title.active);
        form.handle_char('b');
        form.handle_char('c');
        form.handle_backspace();
        assert_eq!(form.title.value, "a");
        assert_eq!(form.description.value, "b");

        form.next_field();
        assert_eq!(form.current_field, TITLE_GLOBAL_ORDER);
        form.prev_field();
        assert_eq!(form.current_field, DESCRIPTION_GLOBAL_ORDER);
    }
}

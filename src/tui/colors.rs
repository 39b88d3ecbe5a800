//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::Status;

// Native Color::Blue is used for To Do

/// Used for In Progress
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Used for Done
pub const DARK_GREEN: Color = Color::Rgb(0, 80, 0);
/// Used for delete confirmation and errors
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
/// Used for the card being dragged
pub const DARK_PURPLE: Color = Color::Rgb(86, 60, 92);

/// Accent color of a board column.
pub fn column_color(status: Status) -> Color {
    match status {
        Status::Todo => Color::Blue,
        Status::InProgress => GOLD,
        Status::Done => DARK_GREEN,
    }
}

/// Readable foreground on top of `bg`.
pub fn text_on(bg: Color) -> Color {
    match bg {
        GOLD => Color::Rgb(20, 20, 20),
        _ => Color::White,
    }
}

//! Enumerations and field types for the board.
//!
//! A task lives in exactly one of three fixed workflow stages. The stage set
//! is closed: anything else is rejected at deserialization.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Workflow stage of a task, rendered as one board column.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Todo,
    #[value(name = "inprogress", alias = "in-progress")]
    InProgress,
    Done,
}

impl Status {
    /// All stages in column order, left to right.
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

    /// Zero-based column index of this stage.
    pub fn column(self) -> usize {
        match self {
            Status::Todo => 0,
            Status::InProgress => 1,
            Status::Done => 2,
        }
    }

    /// Stage for a column index, if the index is on the board.
    pub fn from_column(index: usize) -> Option<Status> {
        Status::ALL.get(index).copied()
    }

    /// Stage one column to the left, if any.
    pub fn prev(self) -> Option<Status> {
        self.column().checked_sub(1).and_then(Status::from_column)
    }

    /// Stage one column to the right, if any.
    pub fn next(self) -> Option<Status> {
        Status::from_column(self.column() + 1)
    }

    /// Wire name, as used in JSON bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "inprogress",
            Status::Done => "done",
        }
    }

    /// Column heading shown on the board.
    pub fn title(self) -> &'static str {
        match self {
            Status::Todo => "To Do",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        for status in Status::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        assert!(serde_json::from_str::<Status>("\"blocked\"").is_err());
        assert!(serde_json::from_str::<Status>("\"in-progress\"").is_err());
    }

    #[test]
    fn test_column_neighbours() {
        assert_eq!(Status::Todo.prev(), None);
        assert_eq!(Status::Todo.next(), Some(Status::InProgress));
        assert_eq!(Status::InProgress.next(), Some(Status::Done));
        assert_eq!(Status::Done.next(), None);
        assert_eq!(Status::from_column(3), None);
        assert_eq!(Status::default(), Status::Todo);
    }
}

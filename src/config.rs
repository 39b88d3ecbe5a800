//! Default locations and addresses.
//!
//! Everything here can be overridden from the command line or the
//! environment; see [`crate::cli::Cli`] and [`crate::cmd::Commands`].

use std::path::{Path, PathBuf};

/// Port the service listens on when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 5000;
/// Interface the service binds when `KANBAN_HOST` is unset.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Where the board and CLI commands find the service.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api/tasks";

const DATA_DIR_NAME: &str = ".kanban";
const DB_FILE_NAME: &str = "tasks.json";
const BOARD_LOG_NAME: &str = "board.log";

/// `~/.kanban`, falling back to `./.kanban` when `HOME` is unset.
pub fn data_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    data_dir_in(Path::new(&home))
}

fn data_dir_in(home: &Path) -> PathBuf {
    home.join(DATA_DIR_NAME)
}

/// Default task document, `~/.kanban/tasks.json`.
pub fn default_db_path() -> PathBuf {
    data_dir().join(DB_FILE_NAME)
}

/// Log file used while the board owns the terminal.
pub fn board_log_path() -> PathBuf {
    data_dir().join(BOARD_LOG_NAME)
}

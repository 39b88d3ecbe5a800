//! Command implementations for the CLI interface.
//!
//! `serve` runs the task service over a file store. Every other command is a
//! client of that service: it talks HTTP through [`ClientState`] so the CLI,
//! the board and any other client see the same validation and errors.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::client::HttpTaskApi;
use crate::config::{default_db_path, DEFAULT_HOST, DEFAULT_PORT};
use crate::db::{format_status, print_table, FileStore};
use crate::fields::Status;
use crate::service;
use crate::state::ClientState;
use crate::tui::board_run::run_board;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the task service.
    Serve {
        /// Path to the JSON task document. Defaults to ~/.kanban/tasks.json.
        #[arg(long, env = "KANBAN_DB")]
        db: Option<PathBuf>,
        /// Interface to bind.
        #[arg(long, env = "KANBAN_HOST", default_value = DEFAULT_HOST)]
        host: IpAddr,
        /// Port to listen on.
        #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },

    /// Launch the kanban board interface.
    Board,

    /// List all tasks grouped by column.
    List,

    /// Add a new task to the To Do column.
    Add {
        /// Short title for the task.
        title: String,
        /// Optional longer description.
        #[arg(long)]
        desc: Option<String>,
    },

    /// Change a task's title and/or description.
    Edit {
        /// Task ID.
        id: u64,
        /// New title.
        #[arg(long)]
        title: Option<String>,
        /// New description.
        #[arg(long)]
        desc: Option<String>,
    },

    /// Move a task to another column.
    Move {
        /// Task ID.
        id: u64,
        /// Target column: todo | inprogress | done.
        #[arg(value_enum)]
        status: Status,
    },

    /// Delete a task.
    Delete {
        /// Task ID.
        id: u64,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Open the store and serve the API until interrupted.
pub async fn cmd_serve(db: Option<PathBuf>, host: IpAddr, port: u16) {
    let db_path = db.unwrap_or_else(default_db_path);
    let store = match FileStore::open(&db_path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!(path = %db_path.display(), error = %e, "failed to open task store");
            eprintln!("Failed to open task store {}: {}", db_path.display(), e);
            if e.is_storage() && db_path.exists() {
                eprintln!("Fix or move the file aside to start with an empty board.");
            }
            std::process::exit(1);
        }
    };
    if let Err(e) = service::serve(store, SocketAddr::new(host, port)).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Run the board on a blocking thread while requests use the runtime.
pub async fn cmd_board(api_url: &str) {
    let api = Arc::new(HttpTaskApi::new(api_url));
    let runtime = tokio::runtime::Handle::current();
    tracing::info!(api = api.base_url(), "starting board");
    match tokio::task::spawn_blocking(move || run_board(runtime, api)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            eprintln!("Board error: {}", e);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Board thread failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Client state loaded from the service, or exit.
async fn connect(api_url: &str) -> ClientState<HttpTaskApi> {
    let mut state = ClientState::new(Arc::new(HttpTaskApi::new(api_url)));
    if let Err(e) = state.load().await {
        eprintln!("Failed to load tasks from {}: {}", api_url, e);
        std::process::exit(1);
    }
    state
}

pub async fn cmd_list(api_url: &str) {
    let state = connect(api_url).await;
    if state.mirror().is_empty() {
        println!("No tasks.");
        return;
    }
    print_table(state.mirror().tasks());
    let [todo, doing, done] = state.mirror().counts();
    println!();
    println!("To Do: {} | In Progress: {} | Done: {}", todo, doing, done);
}

pub async fn cmd_add(api_url: &str, title: String, desc: Option<String>) {
    let mut state = ClientState::new(Arc::new(HttpTaskApi::new(api_url)));
    match state.add(&title, desc.as_deref().unwrap_or("")).await {
        Ok(Some(task)) => println!("Added task {}: {}", task.id, task.title),
        Ok(None) => {
            eprintln!("Title is required");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to add task: {}", e);
            std::process::exit(1);
        }
    }
}

/// Edit a task. Fields not given keep their current server value.
pub async fn cmd_edit(api_url: &str, id: u64, title: Option<String>, desc: Option<String>) {
    let mut state = connect(api_url).await;
    let Some(current) = state.mirror().get(id) else {
        eprintln!("Task {} not found.", id);
        std::process::exit(1);
    };
    let title = title.unwrap_or_else(|| current.title.clone());
    let desc = desc.unwrap_or_else(|| current.description.clone());

    match state.edit(id, &title, &desc).await {
        Ok(task) => println!("Updated task {}: {}", task.id, task.title),
        Err(e) => {
            eprintln!("Failed to update task {}: {}", id, e);
            std::process::exit(1);
        }
    }
}

pub async fn cmd_move(api_url: &str, id: u64, status: Status) {
    let mut state = connect(api_url).await;
    let Some(current) = state.mirror().get(id).map(|t| t.status) else {
        eprintln!("Task {} not found.", id);
        std::process::exit(1);
    };
    match state.move_task(id, status).await {
        Ok(Some(task)) => println!("Moved task {} to {}", task.id, format_status(task.status)),
        Ok(None) => println!("Task {} is already in {}", id, format_status(current)),
        Err(e) => {
            eprintln!("Failed to move task {}: {}", id, e);
            std::process::exit(1);
        }
    }
}

pub async fn cmd_delete(api_url: &str, id: u64) {
    let mut state = ClientState::new(Arc::new(HttpTaskApi::new(api_url)));
    if let Err(e) = state.remove(id).await {
        eprintln!("Failed to delete task {}: {}", id, e);
        std::process::exit(1);
    }
    println!("Deleted task {}", id);
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

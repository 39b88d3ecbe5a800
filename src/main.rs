//! # kb - Kanban task board
//!
//! A three-column kanban board (To Do, In Progress, Done) made of a small
//! REST service over a JSON task store and clients that talk to it.
//!
//! ## Quick Start
//!
//! ```bash
//! # Start the service (stores tasks in ~/.kanban/tasks.json)
//! kb serve
//!
//! # In another terminal, open the board
//! kb board
//!
//! # Or script it
//! kb add "Write release notes" --desc "for 0.2"
//! kb move 1 inprogress
//! kb list
//! ```
//!
//! ## Board keys
//!
//! - `a` add, `e` edit, `x` delete (with confirmation)
//! - drag a card with the mouse, or `Ctrl+←/→`, to move it between columns
//! - `Enter` details, `r` reload, `q`/`Esc` quit
//!
//! The board never changes its view of a task until the service confirms the
//! change, so what is on screen is always what the store holds.

use clap::Parser;

pub mod cli;
pub mod client;
pub mod cmd;
pub mod config;
pub mod db;
pub mod error;
pub mod fields;
pub mod logging;
pub mod service;
pub mod state;
pub mod task;
pub mod tui {
    pub mod board;
    pub mod board_run;
    pub mod colors;
    pub mod drag;
    pub mod enums;
    pub mod input;
    pub mod task_form;
}

use cli::Cli;
use cmd::*;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // The board owns the terminal, so it logs to a file instead of stderr
    match &cli.command {
        Commands::Board => {
            let log_path = config::board_log_path();
            if let Err(e) = logging::init_file(&log_path) {
                eprintln!("Failed to open log file {}: {}", log_path.display(), e);
            }
        }
        _ => logging::init_stderr(),
    }

    match cli.command {
        Commands::Serve { db, host, port } => cmd_serve(db, host, port).await,
        Commands::Board => cmd_board(&cli.api).await,
        Commands::List => cmd_list(&cli.api).await,
        Commands::Add { title, desc } => cmd_add(&cli.api, title, desc).await,
        Commands::Edit { id, title, desc } => cmd_edit(&cli.api, id, title, desc).await,
        Commands::Move { id, status } => cmd_move(&cli.api, id, status).await,
        Commands::Delete { id } => cmd_delete(&cli.api, id).await,
        Commands::Completions { shell } => cmd_completions(shell),
    }
}

use clap::Parser;

use crate::cmd::Commands;
use crate::config::DEFAULT_API_URL;

/// Kanban task board: REST service, terminal board and scripting commands.
#[derive(Parser)]
#[command(name = "kb", version, about = "Kanban task board")]
pub struct Cli {
    /// Task collection URL of a running `kb serve`.
    #[arg(long, global = true, env = "KANBAN_API_URL", default_value = DEFAULT_API_URL)]
    pub api: String,

    #[command(subcommand)]
    pub command: Commands,
}

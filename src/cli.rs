//! CLI argument parsing for the Kanban client.

use clap::{Parser, Subcommand};
use kanban::{Status, TaskId};

#[derive(Parser)]
#[command(
    name = "kb",
    about = "Kanban board client for a REST task backend",
    version,
    after_help = "Backend URL: --api-url, else $KANBAN_API_URL, else http://localhost:8080\n\
                  Logs are written to: ~/.local/share/kanban/logs/kanban.log"
)]
pub struct Cli {
    /// Backend base URL (overrides KANBAN_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the board as three columns
    Board,

    /// List tasks
    List {
        /// Filter by status (todo, in_progress, done)
        #[arg(short, long)]
        status: Option<Status>,
    },

    /// Show a task by ID
    Show {
        /// Task ID
        id: TaskId,
    },

    /// Create a new task
    Add {
        /// Task title
        title: String,

        /// Description
        #[arg(short = 'D', long)]
        description: Option<String>,

        /// Initial status
        #[arg(short, long, default_value = "todo")]
        status: Status,
    },

    /// Edit a task's fields
    Edit {
        /// Task ID
        id: TaskId,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description
        #[arg(short = 'D', long)]
        description: Option<String>,

        /// New status
        #[arg(short, long)]
        status: Option<Status>,
    },

    /// Move a task to another column
    Move {
        /// Task ID
        id: TaskId,

        /// Target status (todo, in_progress, done)
        status: Status,
    },

    /// Delete a task
    Rm {
        /// Task ID
        id: TaskId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

//! kb CLI - Kanban board client for a REST task backend.

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use kanban::{ApiConfig, Board, Confirm, HttpApi, Intents, Outcome, TaskApi, TaskId, TaskForm};
use log::info;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

mod cli;
mod render;

use cli::{Cli, Command};

fn setup_logging() -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kanban")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("kanban.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

/// Ask a yes/no question on the terminal. Anything but y/yes is a no.
fn ask(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn not_found(id: &TaskId) -> ! {
    eprintln!("{} Task not found: {}", "✗".red(), id);
    std::process::exit(1);
}

/// Exit with the banner if the last intent left one.
fn exit_on_banner<A: TaskApi, C: Confirm>(board: &Board<A, C>) {
    if render::print_banner(board.state()) {
        std::process::exit(1);
    }
}

/// Submit a form, exiting with the inline warning if it is rejected.
async fn submit<A: TaskApi, C: Confirm>(form: &mut TaskForm, board: &mut Board<A, C>) -> Outcome {
    match form.submit(board).await {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("{} {}", "!".yellow().bold(), e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ApiConfig::from_env(cli.api_url.as_deref());
    info!("Using backend at {}", config.base_url);

    let assume_yes = matches!(cli.command, Command::Rm { yes: true, .. });
    let confirm = move |prompt: &str| assume_yes || ask(prompt);
    let mut board = Board::new(HttpApi::new(config), confirm);

    render::print_loading();
    board.load().await;
    exit_on_banner(&board);

    match cli.command {
        Command::Board => {
            render::print_board(&board.buckets());
        }

        Command::List { status } => {
            let tasks: Vec<_> = board
                .state()
                .tasks()
                .iter()
                .filter(|t| status.is_none_or(|s| t.status == s))
                .collect();
            render::print_list(&tasks);
        }

        Command::Show { id } => match board.state().task(&id) {
            Some(task) => render::print_task(task),
            None => not_found(&id),
        },

        Command::Add {
            title,
            description,
            status,
        } => {
            board.open_create_form();
            let mut form = board.form();
            form.title = title;
            form.description = description.unwrap_or_default();
            form.status = status;

            if submit(&mut form, &mut board).await == Outcome::Applied
                && let Some(task) = board.state().tasks().last()
            {
                println!("{} Created: {}", "✓".green(), render::task_line(task));
            }
        }

        Command::Edit {
            id,
            title,
            description,
            status,
        } => {
            if !board.begin_edit(&id) {
                not_found(&id);
            }

            let mut form = board.form();
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(description) = description {
                form.description = description;
            }
            if let Some(status) = status {
                form.status = status;
            }

            if submit(&mut form, &mut board).await == Outcome::Applied
                && let Some(task) = board.state().task(&id)
            {
                println!("{} Updated: {}", "✓".green(), render::task_line(task));
            }
        }

        Command::Move { id, status } => {
            if board.state().task(&id).is_none() {
                not_found(&id);
            }

            match board.move_task(id.clone(), status).await {
                Outcome::Applied => {
                    println!("{} Moved #{} to {}", "→".blue(), id, render::format_status(&status));
                }
                Outcome::Unchanged => {
                    println!("{}", format!("Task #{} is already {}", id, status).dimmed());
                }
                Outcome::Failed => {}
            }
        }

        Command::Rm { id, .. } => {
            if board.state().task(&id).is_none() {
                not_found(&id);
            }

            match board.delete(id.clone()).await {
                Outcome::Applied => println!("{} Deleted #{}", "✓".green(), id),
                Outcome::Unchanged => println!("{}", "Cancelled".dimmed()),
                Outcome::Failed => {}
            }
        }
    }

    exit_on_banner(&board);
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    info!("Command: {:?}", std::env::args().collect::<Vec<_>>());

    let rt = tokio::runtime::Runtime::new().context("Failed to create runtime")?;
    if let Err(e) = rt.block_on(run(cli)) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

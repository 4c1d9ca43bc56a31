//! Terminal rendering for board state.

use chrono::{DateTime, Local, Utc};
use colored::*;
use kanban::{Bucket, SessionState, Status, Task};

/// Shown while the initial fetch is in flight.
pub const LOADING_MESSAGE: &str = "Loading tasks...";

pub fn format_status(status: &Status) -> ColoredString {
    match status {
        Status::Todo => status.as_str().green(),
        Status::InProgress => status.as_str().yellow(),
        Status::Done => status.as_str().blue(),
    }
}

fn format_date(date: &Option<DateTime<Utc>>) -> String {
    match date {
        Some(d) => d.with_timezone(&Local).format("%d/%m/%Y %H:%M").to_string(),
        None => "-".to_string(),
    }
}

/// One-line summary used by the board and list views.
pub fn task_line(task: &Task) -> String {
    format!("{} {}", format!("#{}", task.id).cyan(), task.title)
}

pub fn print_board(buckets: &[Bucket<'_>]) {
    for (i, bucket) in buckets.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!(
            "{} {}",
            bucket.title().bold(),
            format!("({})", bucket.len()).dimmed()
        );

        if bucket.is_empty() {
            println!("  {}", "No tasks".dimmed());
            continue;
        }

        for task in &bucket.tasks {
            println!("  {}", task_line(task));
            if !task.description.is_empty() {
                println!("      {}", task.description.dimmed());
            }
        }
    }
}

pub fn print_list(tasks: &[&Task]) {
    if tasks.is_empty() {
        println!("{}", "No tasks found".dimmed());
        return;
    }

    for task in tasks {
        println!("{} {}", format_status(&task.status), task_line(task));
    }
}

pub fn print_task(task: &Task) {
    println!("{}: {}", "ID".bold(), task.id.to_string().cyan());
    println!("{}: {}", "Title".bold(), task.title);
    println!("{}: {}", "Status".bold(), format_status(&task.status));
    if !task.description.is_empty() {
        println!("{}: {}", "Description".bold(), task.description);
    }
    println!("{}: {}", "Created".bold(), format_date(&task.created_at));
    if task.updated_at.is_some() {
        println!("{}: {}", "Updated".bold(), format_date(&task.updated_at));
    }
}

/// Loading line on stderr, so piped stdout stays clean.
pub fn print_loading() {
    eprintln!("{}", LOADING_MESSAGE.dimmed());
}

/// Print the error banner, if set. Returns whether one was shown.
pub fn print_banner(state: &SessionState) -> bool {
    match state.error() {
        Some(message) => {
            eprintln!("{} {}", "✗".red(), message.red().bold());
            true
        }
        None => false,
    }
}

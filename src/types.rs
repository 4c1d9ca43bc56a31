//! Core data types for the Kanban board.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Backend-assigned task identifier.
///
/// Opaque to the client. The wire form (number or string) is kept as-is so a
/// full-replace body echoes the id back exactly as the backend sent it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Number(u64),
    Text(String),
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskId::Number(n) => write!(f, "{}", n),
            TaskId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for TaskId {
    fn from(n: u64) -> Self {
        TaskId::Number(n)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId::Text(s.to_string())
    }
}

impl FromStr for TaskId {
    type Err = std::convert::Infallible;

    /// Numeric input becomes a numeric id, anything else stays text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<u64>() {
            Ok(n) => TaskId::Number(n),
            Err(_) => TaskId::Text(s.to_string()),
        })
    }
}

/// One unit of work on the board, as the backend last reported it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Assigned by the backend, never generated locally
    pub id: TaskId,

    /// Short description of the work
    pub title: String,

    /// Optional longer text, empty when absent or null
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,

    /// Column the task sits in
    #[serde(default)]
    pub status: Status,

    /// When created (backend clock, display only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Last modification (backend clock, display only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Task {
    /// The same task with only its status replaced.
    pub fn with_status(&self, status: Status) -> Task {
        Task {
            status,
            ..self.clone()
        }
    }
}

/// Task status states, one per board column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl Status {
    /// All statuses in column order.
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in_progress",
            Status::Done => "done",
        }
    }

    /// Human-readable column title.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Todo => "To Do",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "todo" => Ok(Status::Todo),
            "in_progress" => Ok(Status::InProgress),
            "done" => Ok(Status::Done),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Returned when a status name is not one of the three columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseStatusError(pub String);

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid status '{}': use todo, in_progress or done", self.0)
    }
}

impl std::error::Error for ParseStatusError {}

/// Body of a create request. The backend assigns everything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInput {
    pub title: String,
    pub description: String,
    pub status: Status,
}

impl TaskInput {
    /// Full-replace representation of `task` with this input's fields applied.
    pub fn apply_to(&self, task: &Task) -> Task {
        Task {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            ..task.clone()
        }
    }
}

/// Client-side validation failures. These never reach the network.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyTitle,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyTitle => write!(f, "Title is required!"),
        }
    }
}

impl std::error::Error for ValidationError {}

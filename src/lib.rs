//! Kanban: a task board client for a REST task backend.
//!
//! The board keeps a session-local cache of the backend's tasks and splits it
//! into three columns (To Do, In Progress, Done). All mutations go through the
//! [`Board`] orchestrator and are applied only once the backend confirms them.
//!
//! # Example
//!
//! ```no_run
//! use kanban::{ApiConfig, Board, HttpApi, Intents, Status, TaskForm};
//!
//! # async fn demo() {
//! let api = HttpApi::new(ApiConfig::from_env(None));
//! let mut board = Board::new(api, |_: &str| true);
//!
//! board.load().await;
//!
//! let mut form = TaskForm::new();
//! form.title = "Write release notes".to_string();
//! form.submit(&mut board).await.unwrap();
//!
//! for bucket in board.buckets() {
//!     println!("{}: {}", bucket.title(), bucket.len());
//! }
//!
//! let id = board.state().tasks()[0].id.clone();
//! board.move_task(id, Status::Done).await;
//! # }
//! ```

mod partition;
mod state;
mod types;

pub mod api;
pub mod board;
pub mod config;
pub mod form;

// Re-export public API
pub use api::{ApiError, HttpApi, TaskApi};
pub use board::{Board, Confirm, Intents, Outcome};
pub use config::ApiConfig;
pub use form::TaskForm;
pub use partition::{Bucket, partition};
pub use state::{LoadState, SessionState};
pub use types::{ParseStatusError, Status, Task, TaskId, TaskInput, ValidationError};

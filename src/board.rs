//! Board orchestrator: user intents in, API calls and state mutations out.
//!
//! The orchestrator owns the [`SessionState`] and is its only writer. Every
//! mutation is applied after the backend confirms it. Failures never escape:
//! each one is logged with full detail and replaced by the fixed banner
//! message for its operation class.

use crate::api::TaskApi;
use crate::form::TaskForm;
use crate::partition::{Bucket, partition};
use crate::state::{LoadState, SessionState};
use crate::types::{Status, Task, TaskId, TaskInput};
use async_trait::async_trait;
use log::{debug, error, info};

/// Banner shown when the task list cannot be fetched.
pub const LOAD_FAILED: &str = "Failed to load tasks. Check that the backend is running.";
/// Banner shown when a create call fails.
pub const CREATE_FAILED: &str = "Failed to create task.";
/// Banner shown when an update call fails.
pub const UPDATE_FAILED: &str = "Failed to update task.";
/// Banner shown when a delete call fails.
pub const DELETE_FAILED: &str = "Failed to delete task.";
/// Banner shown when a move fails.
pub const MOVE_FAILED: &str = "Failed to move task.";

/// Question asked before a delete goes out.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this task?";

/// Result of one intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The backend confirmed the change and the state was updated.
    Applied,
    /// Nothing was sent: no-op move, or a declined delete.
    Unchanged,
    /// The call failed and the banner was set.
    Failed,
}

/// Asks the user to confirm a destructive action.
pub trait Confirm: Send {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool + Send,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// The intents the view may issue against the board.
#[async_trait]
pub trait Intents: Send {
    /// Replace the task list with the backend's.
    async fn load(&mut self) -> Outcome;

    /// Create a task and close the form.
    async fn create(&mut self, input: TaskInput) -> Outcome;

    /// Replace a task with a full representation and close the form.
    async fn update(&mut self, id: TaskId, task: Task) -> Outcome;

    /// Delete a task after confirmation.
    async fn delete(&mut self, id: TaskId) -> Outcome;

    /// Move a task to another column.
    async fn move_task(&mut self, id: TaskId, status: Status) -> Outcome;
}

/// Board orchestrator over an API client and a confirmation capability.
pub struct Board<A, C> {
    api: A,
    confirm: C,
    state: SessionState,
}

impl<A: TaskApi, C: Confirm> Board<A, C> {
    /// Create a board with an empty session.
    pub fn new(api: A, confirm: C) -> Self {
        Self {
            api,
            confirm,
            state: SessionState::new(),
        }
    }

    /// Read-only view of the session.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Get the API client.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Current columns, derived from the task list.
    pub fn buckets(&self) -> [Bucket<'_>; 3] {
        partition(self.state.tasks())
    }

    /// Form draft matching the current form mode.
    pub fn form(&self) -> TaskForm {
        TaskForm::for_state(&self.state)
    }

    /// Show an empty create form.
    pub fn open_create_form(&mut self) {
        self.state.show_form(None);
    }

    /// Show the form seeded with a copy of the task. Returns false if the id is unknown.
    pub fn begin_edit(&mut self, id: &TaskId) -> bool {
        match self.state.task(id).cloned() {
            Some(task) => {
                self.state.show_form(Some(task));
                true
            }
            None => false,
        }
    }

    /// Hide the form and drop the edit copy.
    pub fn cancel_form(&mut self) {
        self.state.close_form();
    }

    /// Clear the banner.
    pub fn dismiss_error(&mut self) {
        self.state.clear_error();
    }

    /// Send a full-replace update and swap in the backend's copy on success.
    async fn replace_remote(&mut self, id: &TaskId, task: &Task, failure: &'static str) -> Outcome {
        match self.api.update_task(id, task).await {
            Ok(updated) => {
                if !self.state.replace(id, updated) {
                    debug!("Updated task {} is no longer in the list", id);
                }
                Outcome::Applied
            }
            Err(e) => {
                error!("Failed to update task {}: {}", id, e);
                self.state.set_error(failure);
                Outcome::Failed
            }
        }
    }
}

#[async_trait]
impl<A: TaskApi, C: Confirm> Intents for Board<A, C> {
    async fn load(&mut self) -> Outcome {
        self.state.set_load_state(LoadState::Loading);
        self.state.clear_error();

        let outcome = match self.api.list_tasks().await {
            Ok(tasks) => {
                info!("Loaded {} tasks", tasks.len());
                self.state.replace_all(tasks);
                Outcome::Applied
            }
            Err(e) => {
                error!("Failed to load tasks: {}", e);
                self.state.set_error(LOAD_FAILED);
                Outcome::Failed
            }
        };

        self.state.set_load_state(LoadState::Idle);
        outcome
    }

    async fn create(&mut self, input: TaskInput) -> Outcome {
        match self.api.create_task(&input).await {
            Ok(task) => {
                info!("Created task {}", task.id);
                self.state.append(task);
                self.state.close_form();
                Outcome::Applied
            }
            Err(e) => {
                error!("Failed to create task: {}", e);
                self.state.set_error(CREATE_FAILED);
                Outcome::Failed
            }
        }
    }

    async fn update(&mut self, id: TaskId, task: Task) -> Outcome {
        let outcome = self.replace_remote(&id, &task, UPDATE_FAILED).await;
        if outcome == Outcome::Applied {
            info!("Updated task {}", id);
            self.state.close_form();
        }
        outcome
    }

    async fn delete(&mut self, id: TaskId) -> Outcome {
        if !self.confirm.confirm(DELETE_PROMPT) {
            debug!("Delete of task {} declined", id);
            return Outcome::Unchanged;
        }

        match self.api.delete_task(&id).await {
            Ok(()) => {
                info!("Deleted task {}", id);
                self.state.remove(&id);
                Outcome::Applied
            }
            Err(e) => {
                error!("Failed to delete task {}: {}", id, e);
                self.state.set_error(DELETE_FAILED);
                Outcome::Failed
            }
        }
    }

    async fn move_task(&mut self, id: TaskId, status: Status) -> Outcome {
        let moved = match self.state.task(&id) {
            Some(task) if task.status != status => task.with_status(status),
            Some(_) => {
                debug!("Task {} is already {}", id, status);
                return Outcome::Unchanged;
            }
            None => {
                debug!("Move of unknown task {} ignored", id);
                return Outcome::Unchanged;
            }
        };

        let outcome = self.replace_remote(&id, &moved, MOVE_FAILED).await;
        if outcome == Outcome::Applied {
            info!("Moved task {} to {}", id, status);
        }
        outcome
    }
}

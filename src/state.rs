//! Session state for one board session.
//!
//! Holds the cached task list and the transient UI flags. Read access is
//! public; mutation is crate-private so only the board orchestrator writes it.

use crate::types::{Task, TaskId};

/// Whether a list fetch is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
}

/// Process-local UI state, discarded when the session ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    tasks: Vec<Task>,
    load_state: LoadState,
    error: Option<String>,
    form_visible: bool,
    editing_task: Option<Task>,
}

impl SessionState {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks in backend order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Find a task by id.
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    /// Current banner message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_form_visible(&self) -> bool {
        self.form_visible
    }

    /// Copy of the task being edited, if the form is in edit mode.
    pub fn editing_task(&self) -> Option<&Task> {
        self.editing_task.as_ref()
    }

    pub(crate) fn set_load_state(&mut self, state: LoadState) {
        self.load_state = state;
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub(crate) fn clear_error(&mut self) {
        self.error = None;
    }

    pub(crate) fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub(crate) fn append(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Replace the task with the given id in place. Returns false when absent.
    pub(crate) fn replace(&mut self, id: &TaskId, task: Task) -> bool {
        match self.tasks.iter_mut().find(|t| &t.id == id) {
            Some(slot) => {
                *slot = task;
                true
            }
            None => false,
        }
    }

    /// Remove the task with the given id. Returns false when absent.
    pub(crate) fn remove(&mut self, id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| &t.id != id);
        self.tasks.len() != before
    }

    pub(crate) fn show_form(&mut self, editing: Option<Task>) {
        self.form_visible = true;
        self.editing_task = editing;
    }

    pub(crate) fn close_form(&mut self) {
        self.form_visible = false;
        self.editing_task = None;
    }
}

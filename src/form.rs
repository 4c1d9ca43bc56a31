//! Create/edit form draft.

use crate::board::{Intents, Outcome};
use crate::state::SessionState;
use crate::types::{Status, Task, TaskInput, ValidationError};

/// Draft fields collected before a create or update.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub status: Status,
    editing: Option<Task>,
    warning: Option<ValidationError>,
}

impl TaskForm {
    /// Empty draft for a new task.
    pub fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: Status::Todo,
            editing: None,
            warning: None,
        }
    }

    /// Draft seeded from an existing task.
    pub fn editing(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            editing: Some(task.clone()),
            warning: None,
        }
    }

    /// Draft for whatever the session's form is showing.
    pub fn for_state(state: &SessionState) -> Self {
        match state.editing_task() {
            Some(task) => Self::editing(task),
            None => Self::new(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Inline warning from the last rejected submit.
    pub fn warning(&self) -> Option<&ValidationError> {
        self.warning.as_ref()
    }

    /// Trimmed input, or the reason it cannot be submitted.
    pub fn validate(&self) -> Result<TaskInput, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        Ok(TaskInput {
            title: title.to_string(),
            description: self.description.trim().to_string(),
            status: self.status,
        })
    }

    /// Validate and hand the draft to `intents` as a create or a full-replace update.
    ///
    /// A rejected draft records the warning and issues no intent.
    pub async fn submit<I: Intents + ?Sized>(&mut self, intents: &mut I) -> Result<Outcome, ValidationError> {
        let input = match self.validate() {
            Ok(input) => input,
            Err(e) => {
                self.warning = Some(e.clone());
                return Err(e);
            }
        };
        self.warning = None;

        let outcome = match &self.editing {
            Some(task) => intents.update(task.id.clone(), input.apply_to(task)).await,
            None => intents.create(input).await,
        };
        Ok(outcome)
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}

//! Splits the flat task list into board columns.

use crate::types::{Status, Task};

/// Tasks sharing one status, in list order.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket<'a> {
    pub status: Status,
    pub tasks: Vec<&'a Task>,
}

impl Bucket<'_> {
    /// Column title.
    pub fn title(&self) -> &'static str {
        self.status.label()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Partition `tasks` into one bucket per status in `Status::ALL` order.
///
/// Recomputed on every call.
pub fn partition(tasks: &[Task]) -> [Bucket<'_>; 3] {
    Status::ALL.map(|status| Bucket {
        status,
        tasks: tasks.iter().filter(|t| t.status == status).collect(),
    })
}

//! Task link model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tb_core::traits::{Entity, Id, Identifiable};

use crate::task::Task;

/// Undirected association between two tasks.
///
/// Stored with the direction it was created in; readers see it from the
/// side of the task they asked about (see [`TaskLink::oriented_from`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskLink {
    pub id: Id,
    pub source_task_id: Id,
    pub linked_task_id: Id,
    pub created_at: DateTime<Utc>,
}

impl Identifiable for TaskLink {
    fn id(&self) -> Id {
        self.id
    }
}

impl Entity for TaskLink {
    const COLLECTION: &'static str = "task_links";
    const TYPE_NAME: &'static str = "TaskLink";
}

impl TaskLink {
    pub fn involves(&self, task_id: Id) -> bool {
        self.source_task_id == task_id || self.linked_task_id == task_id
    }

    /// True if the link joins `a` and `b` in either direction
    pub fn connects(&self, a: Id, b: Id) -> bool {
        (self.source_task_id == a && self.linked_task_id == b)
            || (self.source_task_id == b && self.linked_task_id == a)
    }

    /// Copy of the link with `task_id` as the source
    pub fn oriented_from(&self, task_id: Id) -> TaskLink {
        if self.linked_task_id == task_id && self.source_task_id != task_id {
            TaskLink {
                source_task_id: self.linked_task_id,
                linked_task_id: self.source_task_id,
                ..self.clone()
            }
        } else {
            self.clone()
        }
    }
}

/// A link seen from one task, together with the task on the other end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedTask {
    pub link: TaskLink,
    pub task: Task,
}

//! Task model
//!
//! Tasks carry a kanban status and a priority. Status transitions stamp
//! `started_at` and `completed_at` the first time a task enters
//! `in_progress` or `done`; those stamps are kept afterwards.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tb_core::traits::{Entity, Id, Identifiable};
use validator::Validate;

use crate::UnknownVariant;

/// Kanban status. Declaration order is the column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    New,
    Scheduled,
    InProgress,
    Issue,
    Done,
    Docs,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 6] = [
        TaskStatus::New,
        TaskStatus::Scheduled,
        TaskStatus::InProgress,
        TaskStatus::Issue,
        TaskStatus::Done,
        TaskStatus::Docs,
    ];

    const NAMES: &'static [&'static str] =
        &["new", "scheduled", "in_progress", "issue", "done", "docs"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Issue => "issue",
            Self::Done => "done",
            Self::Docs => "docs",
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "status",
                value: s.to_string(),
                expected: Self::NAMES,
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    VeryUrgent,
    Urgent,
    Medium,
    #[default]
    Normal,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 4] = [
        TaskPriority::VeryUrgent,
        TaskPriority::Urgent,
        TaskPriority::Medium,
        TaskPriority::Normal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryUrgent => "very_urgent",
            Self::Urgent => "urgent",
            Self::Medium => "medium",
            Self::Normal => "normal",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "priority",
                value: s.to_string(),
                expected: &["very_urgent", "urgent", "medium", "normal"],
            })
    }
}

/// Task entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Task {
    pub id: Id,

    pub title: String,

    pub description: Option<String>,

    pub status: TaskStatus,

    pub priority: TaskPriority,

    pub due_date: Option<NaiveDate>,

    pub project_id: Option<Id>,

    pub team_id: Option<Id>,

    /// Not checked against the user collection; may dangle after a user delete
    pub assignee_id: Option<Id>,

    pub created_by: Id,

    pub created_at: DateTime<Utc>,

    pub started_at: Option<DateTime<Utc>>,

    pub completed_at: Option<DateTime<Utc>>,

    #[validate(range(min = 0.0, message = "must be greater than or equal to 0"))]
    pub work_hours: f64,
}

impl Identifiable for Task {
    fn id(&self) -> Id {
        self.id
    }
}

impl Entity for Task {
    const COLLECTION: &'static str = "tasks";
    const TYPE_NAME: &'static str = "Task";
}

impl Task {
    /// Move to `status`, stamping first-entry timestamps.
    ///
    /// Stamps are written only when the status actually changes and the
    /// field is still unset. Leaving a state never clears its stamp.
    pub fn transition_to(&mut self, status: TaskStatus, now: DateTime<Utc>) {
        if status == self.status {
            return;
        }
        match status {
            TaskStatus::InProgress if self.started_at.is_none() => self.started_at = Some(now),
            TaskStatus::Done if self.completed_at.is_none() => self.completed_at = Some(now),
            _ => {}
        }
        self.status = status;
    }

    pub fn is_assigned_to(&self, user_id: Id) -> bool {
        self.assignee_id == Some(user_id)
    }
}

/// Input for creating a task
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub project_id: Option<Id>,
    #[serde(default)]
    pub team_id: Option<Id>,
    #[serde(default)]
    pub assignee_id: Option<Id>,
    pub created_by: Id,
    #[serde(default)]
    pub work_hours: f64,
}

impl NewTask {
    pub fn new(title: impl Into<String>, created_by: Id) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            due_date: None,
            project_id: None,
            team_id: None,
            assignee_id: None,
            created_by,
            work_hours: 0.0,
        }
    }

    pub fn with_team(mut self, team_id: Id) -> Self {
        self.team_id = Some(team_id);
        self
    }

    pub fn with_project(mut self, project_id: Id) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn with_assignee(mut self, user_id: Id) -> Self {
        self.assignee_id = Some(user_id);
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_work_hours(mut self, hours: f64) -> Self {
        self.work_hours = hours;
        self
    }

    /// Build the task. Timestamps start empty even if the initial status
    /// is `in_progress` or `done`.
    pub fn into_task(self, id: Id, created_at: DateTime<Utc>) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            status: self.status,
            priority: self.priority,
            due_date: self.due_date,
            project_id: self.project_id,
            team_id: self.team_id,
            assignee_id: self.assignee_id,
            created_by: self.created_by,
            created_at,
            started_at: None,
            completed_at: None,
            work_hours: self.work_hours,
        }
    }
}

/// Partial update for a task.
///
/// `id`, `created_by`, `created_at`, `started_at` and `completed_at` are not
/// part of the patch; the timestamps follow status transitions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "tb_core::deserialize_some")]
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    #[serde(default, deserialize_with = "tb_core::deserialize_some")]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "tb_core::deserialize_some")]
    pub project_id: Option<Option<Id>>,
    #[serde(default, deserialize_with = "tb_core::deserialize_some")]
    pub team_id: Option<Option<Id>>,
    #[serde(default, deserialize_with = "tb_core::deserialize_some")]
    pub assignee_id: Option<Option<Id>>,
    pub work_hours: Option<f64>,
}

impl TaskPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch that only moves the task to another column
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_assignee(mut self, assignee_id: Option<Id>) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    pub fn with_work_hours(mut self, hours: f64) -> Self {
        self.work_hours = Some(hours);
        self
    }

    /// Merge onto a copy of `task`, applying the status transition last
    pub fn apply_to(&self, task: &Task, now: DateTime<Utc>) -> Task {
        let mut merged = task.clone();
        if let Some(ref title) = self.title {
            merged.title = title.clone();
        }
        tb_core::apply_nullable(&mut merged.description, self.description.clone());
        if let Some(priority) = self.priority {
            merged.priority = priority;
        }
        tb_core::apply_nullable(&mut merged.due_date, self.due_date);
        tb_core::apply_nullable(&mut merged.project_id, self.project_id);
        tb_core::apply_nullable(&mut merged.team_id, self.team_id);
        tb_core::apply_nullable(&mut merged.assignee_id, self.assignee_id);
        if let Some(hours) = self.work_hours {
            merged.work_hours = hours;
        }
        if let Some(status) = self.status {
            merged.transition_to(status, now);
        }
        merged
    }

    /// Client-side preview of the patch, used for optimistic writes
    pub fn preview(&self, task: &Task) -> Task {
        self.apply_to(task, Utc::now())
    }
}

//! Task and user filters

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tb_core::traits::Id;
use tb_models::{Task, TaskPriority, TaskStatus, User};

/// Which assignee a task must have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AssigneeFilter {
    #[default]
    Any,
    Unassigned,
    User(Id),
}

impl AssigneeFilter {
    pub fn matches(&self, assignee_id: Option<Id>) -> bool {
        match self {
            Self::Any => true,
            Self::Unassigned => assignee_id.is_none(),
            Self::User(id) => assignee_id == Some(*id),
        }
    }
}

impl FromStr for AssigneeFilter {
    type Err = String;

    /// Accepts `all`, `unassigned` or a user id
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(Self::Any),
            "unassigned" => Ok(Self::Unassigned),
            other => other
                .parse()
                .map(Self::User)
                .map_err(|_| format!("invalid assignee filter {:?}", other)),
        }
    }
}

impl TryFrom<String> for AssigneeFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for AssigneeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("all"),
            Self::Unassigned => f.write_str("unassigned"),
            Self::User(id) => write!(f, "{}", id),
        }
    }
}

impl From<AssigneeFilter> for String {
    fn from(filter: AssigneeFilter) -> Self {
        filter.to_string()
    }
}

/// Task criteria. Hour bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assignee: AssigneeFilter,
    pub min_hours: Option<f64>,
    pub max_hours: Option<f64>,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_assignee(mut self, assignee: AssigneeFilter) -> Self {
        self.assignee = assignee;
        self
    }

    pub fn with_hours(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_hours = min;
        self.max_hours = max;
        self
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Reset every criterion
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.status.map_or(true, |status| task.status == status)
            && self.priority.map_or(true, |priority| task.priority == priority)
            && self.assignee.matches(task.assignee_id)
            && self.min_hours.map_or(true, |min| task.work_hours >= min)
            && self.max_hours.map_or(true, |max| task.work_hours <= max)
    }

    /// Matching tasks in input order
    pub fn apply<'a, I>(&self, tasks: I) -> Vec<Task>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        tasks.into_iter().filter(|task| self.matches(task)).cloned().collect()
    }
}

/// User search used by the administration screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserFilter {
    /// Case-insensitive substring of name or email
    pub search: Option<String>,
    pub team_id: Option<Id>,
}

impl UserFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_team(mut self, team_id: Id) -> Self {
        self.team_id = Some(team_id);
        self
    }

    pub fn matches(&self, user: &User) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                user.name.to_lowercase().contains(&term) || user.email.to_lowercase().contains(&term)
            }
        };
        let matches_team = self.team_id.map_or(true, |team_id| user.is_member_of(team_id));
        matches_search && matches_team
    }

    pub fn apply<'a, I>(&self, users: I) -> Vec<User>
    where
        I: IntoIterator<Item = &'a User>,
    {
        users.into_iter().filter(|user| self.matches(user)).cloned().collect()
    }
}

//! Derived statistics. Computed on demand, never stored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tb_core::traits::Id;

use crate::task::TaskStatus;

/// Count per status, all six buckets present, in column order
pub type TasksDistribution = BTreeMap<TaskStatus, u64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamPerformance {
    pub team_id: Id,
    /// Team display name
    pub team: String,
    pub completed: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberPerformance {
    pub user_id: Id,
    pub name: String,
    pub completed_tasks: u64,
    pub total_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub tasks_distribution: TasksDistribution,
    pub team_performance: Vec<TeamPerformance>,
    /// Sorted by `completed_tasks`, descending; ties keep first-seen order
    pub member_performance: Vec<MemberPerformance>,
}

impl Stats {
    pub fn total_tasks(&self) -> u64 {
        self.tasks_distribution.values().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamEfficiency {
    pub team_id: Id,
    pub team: String,
    /// Share of the team's tasks that are done, in percent with one decimal
    pub efficiency: f64,
    pub completed: u64,
    pub total: u64,
}

/// Dashboard figures derived from [`Stats`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total_tasks: u64,
    pub completed_tasks: u64,
    /// Percent with one decimal
    pub completion_rate: f64,
    pub total_hours: f64,
    pub member_count: usize,
    pub top_performers: Vec<MemberPerformance>,
    pub hours_leaders: Vec<MemberPerformance>,
    pub team_efficiency: Vec<TeamEfficiency>,
}

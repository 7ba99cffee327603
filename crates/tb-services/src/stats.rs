//! Statistics aggregation
//!
//! Stats are derived from the current collections on every call and never
//! stored. The summary is a pure function of a [`Stats`] value.

use std::cmp::Ordering;
use std::collections::HashMap;
use tb_core::traits::Id;
use tb_models::{
    MemberPerformance, Stats, StatsSummary, TaskStatus, TasksDistribution, TeamEfficiency,
    TeamPerformance,
};
use tb_store::{Collections, Store};
use tracing::debug;

/// Name reported for assignees that are no longer in the user collection
pub const UNKNOWN_MEMBER: &str = "Unknown";

const TOP_PERFORMERS: usize = 5;
const HOURS_LEADERS: usize = 8;

pub struct StatsService<'a> {
    store: &'a Store,
}

impl<'a> StatsService<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn compute(&self) -> Stats {
        let stats = self.store.read(compute);
        debug!(
            tasks = stats.total_tasks(),
            members = stats.member_performance.len(),
            "Computed stats"
        );
        stats
    }

    pub fn summary(&self) -> StatsSummary {
        summarize(&self.compute())
    }
}

pub fn compute(c: &Collections) -> Stats {
    let mut tasks_distribution: TasksDistribution =
        TaskStatus::ALL.into_iter().map(|status| (status, 0)).collect();
    for task in c.tasks.iter() {
        *tasks_distribution.entry(task.status).or_insert(0) += 1;
    }

    let team_performance = c
        .teams
        .iter()
        .map(|team| {
            let (completed, total) = c
                .tasks
                .iter()
                .filter(|task| task.team_id == Some(team.id))
                .fold((0, 0), |(completed, total), task| {
                    (completed + u64::from(task.status.is_done()), total + 1)
                });
            TeamPerformance {
                team_id: team.id,
                team: team.name.clone(),
                completed,
                total,
            }
        })
        .collect();

    Stats {
        tasks_distribution,
        team_performance,
        member_performance: member_performance(c),
    }
}

/// Per-assignee totals in first-seen order, then stably sorted by
/// completed tasks, descending
fn member_performance(c: &Collections) -> Vec<MemberPerformance> {
    let mut rows: Vec<MemberPerformance> = Vec::new();
    let mut index: HashMap<Id, usize> = HashMap::new();

    for task in c.tasks.iter() {
        let Some(user_id) = task.assignee_id else {
            continue;
        };
        let slot = *index.entry(user_id).or_insert_with(|| {
            let name = c
                .users
                .find(user_id)
                .map(|user| user.name.clone())
                .unwrap_or_else(|| UNKNOWN_MEMBER.to_string());
            rows.push(MemberPerformance {
                user_id,
                name,
                completed_tasks: 0,
                total_hours: 0.0,
            });
            rows.len() - 1
        });

        let row = &mut rows[slot];
        if task.status.is_done() {
            row.completed_tasks += 1;
        }
        row.total_hours += task.work_hours;
    }

    rows.sort_by(|a, b| b.completed_tasks.cmp(&a.completed_tasks));
    rows
}

pub fn summarize(stats: &Stats) -> StatsSummary {
    let total_tasks = stats.total_tasks();
    let completed_tasks = stats
        .tasks_distribution
        .get(&TaskStatus::Done)
        .copied()
        .unwrap_or(0);

    let mut hours_leaders = stats.member_performance.clone();
    hours_leaders.sort_by(|a, b| b.total_hours.partial_cmp(&a.total_hours).unwrap_or(Ordering::Equal));
    hours_leaders.truncate(HOURS_LEADERS);

    let team_efficiency = stats
        .team_performance
        .iter()
        .map(|team| TeamEfficiency {
            team_id: team.team_id,
            team: team.team.clone(),
            efficiency: percent(team.completed, team.total),
            completed: team.completed,
            total: team.total,
        })
        .collect();

    StatsSummary {
        total_tasks,
        completed_tasks,
        completion_rate: percent(completed_tasks, total_tasks),
        total_hours: stats.member_performance.iter().map(|m| m.total_hours).sum(),
        member_count: stats.member_performance.len(),
        top_performers: stats
            .member_performance
            .iter()
            .take(TOP_PERFORMERS)
            .cloned()
            .collect(),
        hours_leaders,
        team_efficiency,
    }
}

/// `part / whole` in percent, rounded to one decimal. Zero when nothing is done.
fn percent(part: u64, whole: u64) -> f64 {
    if part == 0 || whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 1000.0).round() / 10.0
}

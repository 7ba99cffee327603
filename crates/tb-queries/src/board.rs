//! Kanban board grouping

use serde::Serialize;
use tb_models::{Task, TaskStatus};

use crate::filters::TaskFilter;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub status: TaskStatus,
    pub tasks: Vec<Task>,
}

/// Tasks grouped into one column per status, in column order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board {
    pub columns: Vec<Column>,
}

impl Board {
    /// Group `tasks` that pass `filter`. Every status gets a column, even an
    /// empty one, and each column keeps the input order of its tasks. The
    /// filter's own status criterion is ignored.
    pub fn from_tasks<'a, I>(tasks: I, filter: &TaskFilter) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let filter = TaskFilter {
            status: None,
            ..filter.clone()
        };
        let mut columns: Vec<Column> = TaskStatus::ALL
            .into_iter()
            .map(|status| Column {
                status,
                tasks: Vec::new(),
            })
            .collect();

        for task in tasks.into_iter().filter(|task| filter.matches(task)) {
            if let Some(column) = columns.iter_mut().find(|c| c.status == task.status) {
                column.tasks.push(task.clone());
            }
        }

        Self { columns }
    }

    pub fn column(&self, status: TaskStatus) -> Option<&Column> {
        self.columns.iter().find(|c| c.status == status)
    }

    pub fn len(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::AssigneeFilter;
    use chrono::Utc;
    use tb_models::{NewTask, TaskPriority};

    fn task(id: i64, status: TaskStatus, assignee: Option<i64>) -> Task {
        let mut input = NewTask::new(format!("Task {}", id), 1).with_status(status);
        input.assignee_id = assignee;
        input.into_task(id, Utc::now())
    }

    #[test]
    fn test_columns_in_status_order() {
        let tasks = vec![
            task(1, TaskStatus::Done, None),
            task(2, TaskStatus::New, Some(2)),
            task(3, TaskStatus::New, None),
        ];
        let board = Board::from_tasks(&tasks, &TaskFilter::new());

        let statuses: Vec<_> = board.columns.iter().map(|c| c.status).collect();
        assert_eq!(statuses, TaskStatus::ALL.to_vec());

        let new_ids: Vec<_> = board.column(TaskStatus::New).unwrap().tasks.iter().map(|t| t.id).collect();
        assert_eq!(new_ids, vec![2, 3]);
        assert!(board.column(TaskStatus::Issue).unwrap().tasks.is_empty());
        assert_eq!(board.len(), 3);
    }

    #[test]
    fn test_filter_applies_per_column() {
        let mut urgent = task(4, TaskStatus::Issue, None);
        urgent.priority = TaskPriority::Urgent;
        let tasks = vec![
            task(1, TaskStatus::Done, None),
            task(2, TaskStatus::New, Some(2)),
            task(3, TaskStatus::New, None),
            urgent,
        ];

        let filter = TaskFilter::new()
            .with_assignee(AssigneeFilter::Unassigned)
            .with_status(TaskStatus::Done);
        let board = Board::from_tasks(&tasks, &filter);
        assert_eq!(board.len(), 3);

        let urgent_only = TaskFilter::new().with_priority(TaskPriority::Urgent);
        let board = Board::from_tasks(&tasks, &urgent_only);
        assert_eq!(board.column(TaskStatus::Issue).unwrap().tasks.len(), 1);
        assert_eq!(board.len(), 1);
    }
}

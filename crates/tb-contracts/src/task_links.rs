//! Task link rules
//!
//! Links are checked against the existing link collection rather than
//! field rules: a task cannot be linked to itself, and a pair of tasks can
//! be linked at most once regardless of direction.

use tb_core::error::RuleViolation;
use tb_core::traits::Id;
use tb_models::TaskLink;

#[derive(Debug, Default, Clone, Copy)]
pub struct TaskLinkContract;

impl TaskLinkContract {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_new<'a, I>(&self, source_task_id: Id, linked_task_id: Id, existing: I) -> Result<(), RuleViolation>
    where
        I: IntoIterator<Item = &'a TaskLink>,
    {
        if source_task_id == linked_task_id {
            return Err(RuleViolation::SelfLink {
                task_id: source_task_id,
            });
        }

        if existing
            .into_iter()
            .any(|link| link.connects(source_task_id, linked_task_id))
        {
            return Err(RuleViolation::DuplicateLink {
                source_task_id,
                linked_task_id,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn links() -> Vec<TaskLink> {
        vec![TaskLink {
            id: 1,
            source_task_id: 1,
            linked_task_id: 7,
            created_at: Utc::now(),
        }]
    }

    #[test]
    fn test_self_link() {
        let result = TaskLinkContract::new().validate_new(4, 4, &links());
        assert_eq!(result, Err(RuleViolation::SelfLink { task_id: 4 }));
    }

    #[test]
    fn test_duplicate_either_direction() {
        let contract = TaskLinkContract::new();
        let links = links();
        assert!(matches!(
            contract.validate_new(7, 1, &links),
            Err(RuleViolation::DuplicateLink { .. })
        ));
        assert!(matches!(
            contract.validate_new(1, 7, &links),
            Err(RuleViolation::DuplicateLink { .. })
        ));
        assert!(contract.validate_new(1, 8, &links).is_ok());
    }
}

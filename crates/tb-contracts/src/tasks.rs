//! Task contract

use tb_core::error::ValidationErrors;
use tb_models::Task;

use crate::base::{collect_field_rules, validate_presence, Contract, ValidationResult};

/// Title must be present and work hours non-negative
#[derive(Debug, Default, Clone, Copy)]
pub struct TaskContract;

impl TaskContract {
    pub fn new() -> Self {
        Self
    }
}

impl Contract<Task> for TaskContract {
    fn validate(&self, task: &Task) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        validate_presence("title", &task.title, &mut errors);
        collect_field_rules(task, &mut errors);
        errors.into_result()
    }
}

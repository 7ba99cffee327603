//! Core error types for Taskboard RS
//!
//! Every mock API operation fails with one of three kinds of error:
//! validation failures, missing entities, and business rule violations.

use std::collections::BTreeMap;
use thiserror::Error;

/// Core error type for all Taskboard operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TbError {
    #[error("{entity} not found ({field}={value})")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    Rule(#[from] RuleViolation),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TbError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        TbError::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TbError::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, TbError::Validation(_))
    }

    /// HTTP status code equivalent of the error
    pub fn status_code(&self) -> u16 {
        match self {
            TbError::NotFound { .. } => 404,
            TbError::Validation(_) => 422,
            TbError::Rule(_) => 409,
            TbError::Internal(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            TbError::NotFound { .. } => "not_found",
            TbError::Validation(_) => "validation_failed",
            TbError::Rule(_) => "rule_violated",
            TbError::Internal(_) => "internal_error",
        }
    }
}

/// Business rules enforced by the mock API beyond schema validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("cannot link a task to itself (task {task_id})")]
    SelfLink { task_id: i64 },

    #[error("link already exists between tasks {source_task_id} and {linked_task_id}")]
    DuplicateLink {
        source_task_id: i64,
        linked_task_id: i64,
    },
}

/// Validation errors collection
///
/// Field errors are kept in a sorted map so rendered messages are stable.
#[derive(Error, Debug, Default, Clone, PartialEq)]
#[error("{}", self.full_messages().join(", "))]
pub struct ValidationErrors {
    /// Field-specific errors: field_name -> messages
    pub errors: BTreeMap<String, Vec<String>>,
    /// Base errors not tied to a specific field
    pub base_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single field error, handy for early returns
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.base_errors.is_empty()
    }

    /// Check if there are errors for a specific field
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Get errors for a specific field
    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
        self.base_errors.extend(other.base_errors);
    }

    pub fn full_messages(&self) -> Vec<String> {
        let mut messages = self.base_errors.clone();
        for (field, field_messages) in &self.errors {
            for msg in field_messages {
                messages.push(format!("{} {}", field, msg));
            }
        }
        messages
    }

    /// `Ok(())` when empty, otherwise the collected errors
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_messages_are_ordered() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "is too short (minimum is 2 characters)");
        errors.add("email", "is not a valid email");
        errors.add_base("something went wrong");

        assert_eq!(
            errors.full_messages(),
            vec![
                "something went wrong".to_string(),
                "email is not a valid email".to_string(),
                "name is too short (minimum is 2 characters)".to_string(),
            ]
        );
    }

    #[test]
    fn test_merge() {
        let mut a = ValidationErrors::single("title", "can't be blank");
        let b = ValidationErrors::single("title", "is invalid");
        a.merge(b);

        assert_eq!(a.get("title").map(|m| m.len()), Some(2));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(TbError::not_found("Task", 9).status_code(), 404);
        assert_eq!(TbError::Validation(ValidationErrors::new()).status_code(), 422);
        assert_eq!(
            TbError::Rule(RuleViolation::SelfLink { task_id: 1 }).status_code(),
            409
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = TbError::not_found("Project", 42);
        assert_eq!(err.to_string(), "Project not found (id=42)");
        assert_eq!(err.error_code(), "not_found");
    }
}

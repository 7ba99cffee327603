//! User contract

use tb_core::error::ValidationErrors;
use tb_models::User;

use crate::base::{collect_field_rules, Contract, ValidationResult};

/// Checks name length, email format and non-negative profile numbers
#[derive(Debug, Default, Clone, Copy)]
pub struct UserContract;

impl UserContract {
    pub fn new() -> Self {
        Self
    }
}

impl Contract<User> for UserContract {
    fn validate(&self, user: &User) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        collect_field_rules(user, &mut errors);
        errors.into_result()
    }
}

//! Project contract

use tb_core::error::ValidationErrors;
use tb_models::Project;

use crate::base::{collect_field_rules, validate_presence, Contract, ValidationResult};

#[derive(Debug, Default, Clone, Copy)]
pub struct ProjectContract;

impl ProjectContract {
    pub fn new() -> Self {
        Self
    }
}

impl Contract<Project> for ProjectContract {
    fn validate(&self, project: &Project) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        validate_presence("name", &project.name, &mut errors);
        if errors.is_empty() {
            collect_field_rules(project, &mut errors);
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tb_models::NewProject;

    #[test]
    fn test_name_rules() {
        let contract = ProjectContract::new();
        let mut project = NewProject::new("Mobile app", 1).into_project(1, Utc::now());
        assert!(contract.validate(&project).is_ok());

        project.name = "ab".to_string();
        let errors = contract.validate(&project).unwrap_err();
        assert_eq!(
            errors.full_messages(),
            vec!["name is too short (minimum is 3 characters)".to_string()]
        );

        project.name = "   ".to_string();
        let errors = contract.validate(&project).unwrap_err();
        assert_eq!(errors.full_messages(), vec!["name can't be blank".to_string()]);
    }
}

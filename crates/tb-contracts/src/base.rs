//! Base contract system

use tb_core::error::ValidationErrors;
use validator::Validate;

/// Result of contract validation
pub type ValidationResult = Result<(), ValidationErrors>;

/// Validates an entity of type `T`
pub trait Contract<T>: Send + Sync {
    fn validate(&self, entity: &T) -> ValidationResult;
}

/// Run the derived field rules of `entity` and collect them into `errors`.
///
/// Field names are visited in sorted order so that messages come out the
/// same way on every run.
pub fn collect_field_rules<T: Validate>(entity: &T, errors: &mut ValidationErrors) {
    if let Err(derived) = entity.validate() {
        let field_errors = derived.field_errors();
        let mut fields: Vec<_> = field_errors.keys().copied().collect();
        fields.sort_unstable();

        for field in fields {
            if let Some(list) = field_errors.get(field) {
                for error in list.iter() {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("is invalid ({})", error.code));
                    errors.add(field, message);
                }
            }
        }
    }
}

/// Adds "can't be blank" when `value` is empty after trimming
pub fn validate_presence(field: &str, value: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(field, "can't be blank");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 2, message = "is too short"))]
        name: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn test_collect_field_rules() {
        let sample = Sample {
            name: "a".to_string(),
            email: "nope".to_string(),
        };
        let mut errors = ValidationErrors::new();
        collect_field_rules(&sample, &mut errors);

        assert_eq!(errors.get("name"), Some(&vec!["is too short".to_string()]));
        assert_eq!(errors.get("email"), Some(&vec!["is invalid (email)".to_string()]));
    }

    #[test]
    fn test_presence() {
        let mut errors = ValidationErrors::new();
        validate_presence("title", "   ", &mut errors);
        validate_presence("name", "ok", &mut errors);
        assert!(errors.has_error("title"));
        assert!(!errors.has_error("name"));
    }
}

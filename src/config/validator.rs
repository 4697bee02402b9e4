use std::collections::HashMap;
use thiserror::Error;

use crate::config::{ScalarEntry, Settings};
use crate::registry::NamedType;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Duplicate entry: {0}")]
    Duplicate(String),
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if settings.resolver.max_depth == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "resolver.max_depth".to_string(),
                reason: "Depth must be greater than 0".to_string(),
            });
        }

        if let Err(e) = Self::validate_scalars(&settings.scalars) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_scalars(scalars: &[ScalarEntry]) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut seen_names = HashMap::new();

        for (idx, scalar) in scalars.iter().enumerate() {
            if scalar.name.is_empty() {
                errors.push(ValidationError::MissingField(format!("scalars[{}].name", idx)));
                continue;
            }

            if let Some(prev_idx) = seen_names.insert(&scalar.name, idx) {
                errors.push(ValidationError::Duplicate(format!(
                    "Scalar '{}' appears at indices {} and {}",
                    scalar.name, prev_idx, idx
                )));
            }

            if scalar.name.chars().any(char::is_whitespace) {
                errors.push(ValidationError::InvalidValue {
                    field: format!("scalars[{}].name", idx),
                    reason: "Type names cannot contain whitespace".to_string(),
                });
            }

            if NamedType::from_name(&scalar.name).is_some() {
                errors.push(ValidationError::InvalidValue {
                    field: format!("scalars[{}].name", idx),
                    reason: format!("'{}' is a built-in type", scalar.name),
                });
            }

            if !scalar.widget.is_leaf() {
                errors.push(ValidationError::InvalidValue {
                    field: format!("scalars[{}].widget", idx),
                    reason: "Scalars must use text, number or switch".to_string(),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Widget;

    fn scalar(name: &str) -> ScalarEntry {
        ScalarEntry {
            name: name.to_string(),
            widget: Widget::Text,
            placeholder: None,
            mask: None,
            rules: vec![],
        }
    }

    #[test]
    fn test_valid_config() {
        let mut settings = Settings::default();
        settings.scalars.push(scalar("BroadcastSetting"));
        assert!(ConfigValidator::validate(&settings).is_ok());
    }

    #[test]
    fn test_zero_depth() {
        let mut settings = Settings::default();
        settings.resolver.max_depth = 0;
        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::InvalidValue { .. }));
    }

    #[test]
    fn test_duplicate_and_builtin_scalars() {
        let mut settings = Settings::default();
        settings.scalars.push(scalar("TaskState"));
        settings.scalars.push(scalar("TaskState"));
        settings.scalars.push(scalar("CyclePoint"));

        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::Duplicate(_))));
        assert!(errors
            .iter()
            .any(|e| e.to_string().contains("'CyclePoint' is a built-in type")));
    }

    #[test]
    fn test_missing_name_and_container_widget() {
        let mut settings = Settings::default();
        settings.scalars.push(scalar(""));
        let mut group = scalar("Settings");
        group.widget = Widget::Group;
        settings.scalars.push(group);

        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(&errors[0], ValidationError::MissingField(f) if f == "scalars[0].name"));
    }
}

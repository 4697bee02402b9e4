use serde::Serialize;
use serde_json::Value;

use super::PropertyPath;
use crate::resolver::{ElementKind, FormElement};
use crate::rules;

/// Rule failures for one element
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: PropertyPath,
    pub messages: Vec<String>,
}

/// Outcome of checking a whole model against its element tree
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Messages for the element at `path` (in `a.b[0]` notation)
    pub fn messages_for(&self, path: &str) -> &[String] {
        let path = PropertyPath::parse(path);
        self.errors
            .iter()
            .find(|e| e.path == path)
            .map(|e| e.messages.as_slice())
            .unwrap_or(&[])
    }
}

impl FormElement {
    /// Run every element's rules over the matching part of `value`
    pub fn validate(&self, value: &Value) -> ValidationReport {
        let mut report = ValidationReport::default();
        self.validate_into(value, &PropertyPath::root(), &mut report.errors);
        report
    }

    fn validate_into(&self, value: &Value, path: &PropertyPath, errors: &mut Vec<FieldError>) {
        let messages = rules::validate(&self.descriptor.rules, value);
        if !messages.is_empty() {
            errors.push(FieldError {
                path: path.clone(),
                messages: messages.into_iter().map(String::from).collect(),
            });
        }

        match &self.kind {
            ElementKind::List { item } => {
                if let Value::Array(rows) = value {
                    for (idx, row) in rows.iter().enumerate() {
                        item.validate_into(row, &path.push_index(idx), errors);
                    }
                }
            }
            ElementKind::Object { fields, .. } => {
                for field in fields {
                    let child = value.get(&field.name).unwrap_or(&Value::Null);
                    field.validate_into(child, &path.push_property(&field.name), errors);
                }
            }
            ElementKind::Scalar { .. } | ElementKind::Enum { .. } => {}
        }
    }
}

//! Form model and change propagation
//!
//! A [`Form`] owns one resolved [`FormElement`] tree and the JSON value it
//! edits. Edits are addressed from the root down ([`Edit::Field`] and
//! [`Edit::Row`] select children), each level rebuilds its own value from the
//! child's result, and the new root value replaces the model. Listeners
//! registered with [`Form::on_input`] observe every replacement.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

mod path;
mod validation;

pub use path::{PathSegment, PropertyPath};
pub use validation::{FieldError, ValidationReport};

use crate::error::{FormError, Result};
use crate::registry::{coerce_number, coerce_value, Widget};
use crate::resolver::{ElementKind, FormElement};

/// A user action on some element of the form
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edit {
    /// Replace the value wholesale
    Input(Value),
    /// Text typed into a text or number field
    Text(String),
    /// Switch flipped
    Toggle(bool),
    /// Enum value picked
    Choose(String),
    /// Append a row holding the item default
    AddRow,
    /// Remove a row; later rows shift down
    RemoveRow(usize),
    /// Edit inside one row
    Row(usize, Box<Edit>),
    /// Edit inside one field of a group
    Field(String, Box<Edit>),
}

impl Edit {
    pub fn field(name: impl Into<String>, edit: Edit) -> Self {
        Edit::Field(name.into(), Box::new(edit))
    }

    pub fn row(index: usize, edit: Edit) -> Self {
        Edit::Row(index, Box::new(edit))
    }

    /// Address `leaf` to the element at `path`
    ///
    /// Wildcard segments have no concrete row and are rejected.
    pub fn at(path: &PropertyPath, leaf: Edit) -> Result<Self> {
        path.segments().rev().try_fold(leaf, |inner, segment| match segment {
            PathSegment::Property(name) => Ok(Edit::field(name.clone(), inner)),
            PathSegment::Index(idx) => Ok(Edit::row(*idx, inner)),
            PathSegment::ArrayWildcard => Err(FormError::invalid_edit(
                path.to_string(),
                "wildcard does not address a row",
            )),
        })
    }

    fn describe(&self) -> &'static str {
        match self {
            Edit::Input(_) => "input",
            Edit::Text(_) => "text",
            Edit::Toggle(_) => "toggle",
            Edit::Choose(_) => "choice",
            Edit::AddRow => "add-row",
            Edit::RemoveRow(_) => "remove-row",
            Edit::Row(..) => "row edit",
            Edit::Field(..) => "field edit",
        }
    }
}

impl FormElement {
    /// Compute the new value of this element after `edit`
    ///
    /// `current` is left untouched; the caller stores the result.
    pub fn apply(&self, current: &Value, edit: &Edit, path: &PropertyPath) -> Result<Value> {
        tracing::trace!(path = %path, edit = edit.describe(), "Apply edit");
        match (&self.kind, edit) {
            (_, Edit::Input(value)) => self.accept(value, path),
            (ElementKind::Enum { values, .. }, Edit::Choose(choice)) => choose(values, choice, path),

            (ElementKind::Scalar { .. }, Edit::Text(text)) => match self.widget() {
                Widget::Number => Ok(coerce_number(text)),
                Widget::Text => Ok(Value::String(text.clone())),
                _ => Err(self.reject(edit, path)),
            },
            (ElementKind::Scalar { .. }, Edit::Toggle(on)) if self.widget() == Widget::Switch => {
                Ok(Value::Bool(*on))
            }

            (ElementKind::List { item }, Edit::AddRow) => {
                let mut rows = rows_of(current);
                rows.push(item.default_value());
                Ok(Value::Array(rows))
            }
            (ElementKind::List { .. }, Edit::RemoveRow(idx)) => {
                let mut rows = rows_of(current);
                if *idx >= rows.len() {
                    return Err(out_of_bounds(path, *idx, rows.len()));
                }
                rows.remove(*idx);
                Ok(Value::Array(rows))
            }
            (ElementKind::List { item }, Edit::Row(idx, inner)) => {
                let mut rows = rows_of(current);
                let Some(row) = rows.get(*idx) else {
                    return Err(out_of_bounds(path, *idx, rows.len()));
                };
                let updated = item.apply(row, inner, &path.push_index(*idx))?;
                rows[*idx] = updated;
                Ok(Value::Array(rows))
            }

            (ElementKind::Object { type_name, .. }, Edit::Field(name, inner)) => {
                let field = self.field(name).ok_or_else(|| {
                    FormError::invalid_edit(
                        path.to_string(),
                        format!("{} has no field '{}'", type_name, name),
                    )
                })?;
                let mut map = match current {
                    Value::Object(map) => map.clone(),
                    _ => Map::new(),
                };
                let child = map.get(name).cloned().unwrap_or_else(|| field.default_value());
                let updated = field.apply(&child, inner, &path.push_property(name))?;
                map.insert(name.clone(), updated);
                Ok(Value::Object(map))
            }

            _ => Err(self.reject(edit, path)),
        }
    }

    /// Check a wholesale replacement against this element's shape
    ///
    /// `null` clears any element. Rows and fields are checked recursively,
    /// and object fields missing from `value` take their defaults.
    fn accept(&self, value: &Value, path: &PropertyPath) -> Result<Value> {
        match (&self.kind, value) {
            (_, Value::Null) => Ok(Value::Null),
            (ElementKind::Enum { values, .. }, Value::String(choice)) => choose(values, choice, path),
            (ElementKind::Scalar { .. }, _) => match (self.widget(), value) {
                (Widget::Number, Value::Number(_) | Value::String(_)) => Ok(coerce_value(value)),
                (Widget::Switch, Value::Bool(_)) => Ok(value.clone()),
                (Widget::Text, Value::String(_)) => Ok(value.clone()),
                _ => Err(self.mismatch(value, path)),
            },
            (ElementKind::List { item }, Value::Array(rows)) => rows
                .iter()
                .enumerate()
                .map(|(idx, row)| item.accept(row, &path.push_index(idx)))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            (ElementKind::Object { type_name, fields }, Value::Object(map)) => {
                if let Some(unknown) = map.keys().find(|key| self.field(key).is_none()) {
                    return Err(FormError::invalid_edit(
                        path.to_string(),
                        format!("{} has no field '{}'", type_name, unknown),
                    ));
                }
                let mut out = Map::new();
                for field in fields {
                    let child = match map.get(&field.name) {
                        Some(v) => field.accept(v, &path.push_property(&field.name))?,
                        None => field.default_value(),
                    };
                    out.insert(field.name.clone(), child);
                }
                Ok(Value::Object(out))
            }
            _ => Err(self.mismatch(value, path)),
        }
    }

    fn mismatch(&self, value: &Value, path: &PropertyPath) -> FormError {
        FormError::invalid_edit(
            path.to_string(),
            format!("{:?} field cannot hold {}", self.widget(), json_kind(value)),
        )
    }

    fn reject(&self, edit: &Edit, path: &PropertyPath) -> FormError {
        FormError::invalid_edit(
            path.to_string(),
            format!("{:?} field cannot accept a {}", self.widget(), edit.describe()),
        )
    }
}

fn choose(values: &[String], choice: &str, path: &PropertyPath) -> Result<Value> {
    if values.iter().any(|v| v == choice) {
        Ok(Value::String(choice.to_string()))
    } else {
        Err(FormError::invalid_edit(
            path.to_string(),
            format!("'{}' is not one of {}", choice, values.join(", ")),
        ))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn rows_of(current: &Value) -> Vec<Value> {
    match current {
        Value::Array(rows) => rows.clone(),
        _ => Vec::new(),
    }
}

fn out_of_bounds(path: &PropertyPath, idx: usize, len: usize) -> FormError {
    FormError::invalid_edit(
        path.to_string(),
        format!("row {} out of bounds (length {})", idx, len),
    )
}

// ============================================================================
// Form
// ============================================================================

type Listener = Box<dyn FnMut(&Value)>;

/// A resolved element tree bound to its current model value
pub struct Form {
    root: FormElement,
    model: Value,
    listeners: Vec<Listener>,
}

impl Form {
    /// Start from the element's default value
    pub fn new(root: FormElement) -> Self {
        let model = root.default_value();
        Self {
            root,
            model,
            listeners: Vec::new(),
        }
    }

    /// Start from an existing value; number fields are normalised
    pub fn with_model(root: FormElement, model: Value) -> Self {
        let model = root.normalize(&model);
        Self {
            root,
            model,
            listeners: Vec::new(),
        }
    }

    pub fn element(&self) -> &FormElement {
        &self.root
    }

    pub fn model(&self) -> &Value {
        &self.model
    }

    pub fn into_model(self) -> Value {
        self.model
    }

    /// Register a callback run with the new model after every edit
    pub fn on_input(&mut self, listener: impl FnMut(&Value) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Apply one edit and report the validation state afterwards
    ///
    /// A rejected edit leaves the model unchanged and notifies nobody.
    pub fn apply(&mut self, edit: Edit) -> Result<ValidationReport> {
        let root_path = PropertyPath::root();
        self.model = self.root.apply(&self.model, &edit, &root_path)?;
        tracing::trace!(edit = edit.describe(), model = %self.model, "Form input");

        for listener in self.listeners.iter_mut() {
            listener(&self.model);
        }
        Ok(self.validate())
    }

    pub fn validate(&self) -> ValidationReport {
        self.root.validate(&self.model)
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("root", &self.root.name)
            .field("model", &self.model)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::resolver::Resolver;
    use crate::schema::{EnumValue, FullType, InputValue, SchemaIndex, TypeKind, TypeRef};
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn resolve(type_ref: TypeRef, label: &str) -> FormElement {
        let registry = Registry::default();
        let schema = schema();
        Resolver::new(&registry, &schema).resolve(&type_ref, label).unwrap()
    }

    fn schema() -> SchemaIndex {
        SchemaIndex::default()
            .with_type(FullType {
                kind: TypeKind::Enum,
                name: "TaskStatus".into(),
                description: None,
                fields: None,
                input_fields: None,
                enum_values: Some(
                    ["waiting", "running"]
                        .iter()
                        .map(|v| EnumValue {
                            name: v.to_string(),
                            description: None,
                        })
                        .collect(),
                ),
            })
            .with_type(FullType {
                kind: TypeKind::InputObject,
                name: "Setting".into(),
                description: None,
                fields: None,
                input_fields: Some(vec![
                    InputValue {
                        name: "cyclePoint".into(),
                        description: None,
                        type_ref: TypeRef::scalar("CyclePoint"),
                        default_value: None,
                    },
                    InputValue {
                        name: "retries".into(),
                        description: None,
                        type_ref: TypeRef::scalar("Int"),
                        default_value: None,
                    },
                ]),
                enum_values: None,
            })
    }

    #[test]
    fn test_list_rows_propagate() {
        let mut form = Form::new(resolve(TypeRef::list(TypeRef::scalar("String")), "names"));
        assert_eq!(form.model(), &json!([]));

        form.apply(Edit::AddRow).unwrap();
        form.apply(Edit::AddRow).unwrap();
        form.apply(Edit::row(1, Edit::Text("x".into()))).unwrap();

        assert_eq!(form.model(), &json!(["", "x"]));
    }

    #[test]
    fn test_remove_row_shifts_later_rows() {
        let element = resolve(TypeRef::list(TypeRef::scalar("String")), "names");
        let mut form = Form::with_model(element, json!(["a", "b", "c"]));

        form.apply(Edit::RemoveRow(0)).unwrap();
        assert_eq!(form.model(), &json!(["b", "c"]));

        let err = form.apply(Edit::RemoveRow(5)).unwrap_err();
        assert!(matches!(err, FormError::InvalidEdit { .. }));
        assert_eq!(form.model(), &json!(["b", "c"]));
    }

    #[test]
    fn test_number_text_is_coerced() {
        let mut form = Form::new(resolve(TypeRef::scalar("Int"), "count"));
        assert_eq!(form.model(), &Value::Null);

        form.apply(Edit::Text("42".into())).unwrap();
        assert_eq!(form.model(), &json!(42));

        form.apply(Edit::Text("".into())).unwrap();
        assert_eq!(form.model(), &Value::Null);
    }

    #[test]
    fn test_number_model_normalised_on_creation() {
        let form = Form::with_model(resolve(TypeRef::scalar("Int"), "count"), json!("7"));
        assert_eq!(form.model(), &json!(7));
    }

    #[test]
    fn test_nested_field_edit() {
        let element = resolve(TypeRef::list(TypeRef::named(TypeKind::InputObject, "Setting")), "settings");
        let mut form = Form::new(element);

        form.apply(Edit::AddRow).unwrap();
        assert_eq!(form.model(), &json!([{ "cyclePoint": "", "retries": null }]));

        let edit = Edit::at(
            &PropertyPath::parse("[0].retries"),
            Edit::Text("3".into()),
        )
        .unwrap();
        form.apply(edit).unwrap();
        assert_eq!(form.model(), &json!([{ "cyclePoint": "", "retries": 3 }]));

        let err = form
            .apply(Edit::row(0, Edit::field("bogus", Edit::Text("x".into()))))
            .unwrap_err();
        assert!(err.to_string().contains("no field 'bogus'"));
    }

    #[test]
    fn test_enum_choice_must_be_known() {
        let mut form = Form::new(resolve(TypeRef::named(TypeKind::Enum, "TaskStatus"), "status"));

        form.apply(Edit::Choose("running".into())).unwrap();
        assert_eq!(form.model(), &json!("running"));

        assert!(form.apply(Edit::Choose("exploded".into())).is_err());
        assert!(form.apply(Edit::Input(json!("exploded"))).is_err());
        assert_eq!(form.model(), &json!("running"));
    }

    #[test]
    fn test_enum_input_must_be_a_declared_value() {
        let mut form = Form::new(resolve(
            TypeRef::non_null(TypeRef::named(TypeKind::Enum, "TaskStatus")),
            "status",
        ));

        for bad in [json!(5), json!(true), json!(["running"])] {
            let err = form.apply(Edit::Input(bad)).unwrap_err();
            assert!(matches!(err, FormError::InvalidEdit { .. }));
        }
        assert_eq!(form.model(), &Value::Null);

        form.apply(Edit::Input(json!("waiting"))).unwrap();
        assert_eq!(form.model(), &json!("waiting"));
        form.apply(Edit::Input(Value::Null)).unwrap();
        assert_eq!(form.model(), &Value::Null);
    }

    #[test]
    fn test_input_shape_checked_per_widget() {
        let mut flag = Form::new(resolve(TypeRef::scalar("Boolean"), "flag"));
        assert!(flag.apply(Edit::Input(json!("yes"))).is_err());
        flag.apply(Edit::Input(json!(true))).unwrap();
        assert_eq!(flag.model(), &json!(true));

        let mut name = Form::new(resolve(TypeRef::scalar("String"), "name"));
        assert!(name.apply(Edit::Input(json!(3))).is_err());
        name.apply(Edit::Input(json!("bob"))).unwrap();

        let mut count = Form::new(resolve(TypeRef::scalar("Int"), "count"));
        assert!(count.apply(Edit::Input(json!(false))).is_err());
        count.apply(Edit::Input(json!("12"))).unwrap();
        assert_eq!(count.model(), &json!(12));
    }

    #[test]
    fn test_list_input_checks_every_row() {
        let mut form = Form::new(resolve(TypeRef::list(TypeRef::scalar("String")), "names"));

        let err = form.apply(Edit::Input(json!("not a list"))).unwrap_err();
        assert!(matches!(err, FormError::InvalidEdit { .. }));

        let err = form.apply(Edit::Input(json!(["a", 2]))).unwrap_err();
        assert!(err.to_string().contains("[1]"));
        assert_eq!(form.model(), &json!([]));

        form.apply(Edit::Input(json!(["a", "b"]))).unwrap();
        assert_eq!(form.model(), &json!(["a", "b"]));
    }

    #[test]
    fn test_object_input_checks_fields() {
        let mut form = Form::new(resolve(TypeRef::named(TypeKind::InputObject, "Setting"), "setting"));

        assert!(form.apply(Edit::Input(json!("x"))).is_err());
        assert!(form.apply(Edit::Input(json!({ "retries": true }))).is_err());
        assert!(form.apply(Edit::Input(json!({ "bogus": 1 }))).is_err());

        form.apply(Edit::Input(json!({ "retries": "4" }))).unwrap();
        assert_eq!(form.model(), &json!({ "cyclePoint": "", "retries": 4 }));
    }

    #[test]
    fn test_mismatched_edit_rejected() {
        let mut form = Form::new(resolve(TypeRef::scalar("Boolean"), "flag"));
        assert!(form.apply(Edit::Text("yes".into())).is_err());
        form.apply(Edit::Toggle(true)).unwrap();
        assert_eq!(form.model(), &json!(true));
        assert!(form.apply(Edit::AddRow).is_err());
    }

    #[test]
    fn test_listeners_see_every_edit() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();

        let mut form = Form::new(resolve(TypeRef::scalar("String"), "name"));
        form.on_input(move |value| sink.borrow_mut().push(value.clone()));

        form.apply(Edit::Text("a".into())).unwrap();
        form.apply(Edit::Text("ab".into())).unwrap();
        let _ = form.apply(Edit::AddRow);

        assert_eq!(*seen.borrow(), vec![json!("a"), json!("ab")]);
    }

    #[test]
    fn test_edit_at_rejects_wildcard() {
        let path = PropertyPath::root().push_property("tasks").push_wildcard();
        assert!(Edit::at(&path, Edit::AddRow).is_err());
    }
}

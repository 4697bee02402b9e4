//! Forms for whole mutations
//!
//! The root element is a group with one field per mutation argument. The
//! model doubles as the GraphQL variables object once null optional
//! arguments are dropped.

use serde_json::{Map, Value};

use crate::error::Result;
use crate::model::{Edit, Form, ValidationReport};
use crate::resolver::{ElementKind, FormElement, Resolver};
use crate::schema::SchemaIndex;

#[derive(Debug)]
pub struct MutationForm {
    name: String,
    form: Form,
}

impl MutationForm {
    pub fn new(schema: &SchemaIndex, resolver: &Resolver<'_>, name: &str) -> Result<Self> {
        let mutation = schema.mutation(name)?;
        let root = resolver.resolve_arguments(&mutation.name, mutation.description.clone(), &mutation.args)?;

        tracing::debug!(mutation = name, args = mutation.args.len(), "Built mutation form");

        Ok(Self {
            name: mutation.name.clone(),
            form: Form::new(root),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.form.element().description.as_deref()
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    /// Edit one argument
    pub fn edit(&mut self, argument: &str, edit: Edit) -> Result<ValidationReport> {
        self.form.apply(Edit::field(argument, edit))
    }

    /// Variables for the mutation request
    pub fn variables(&self) -> Value {
        variables_of(self.form.element(), self.form.model())
    }

    pub fn validate(&self) -> ValidationReport {
        self.form.validate()
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_valid()
    }
}

/// Variables object for an argument group and its model
///
/// Optional arguments still holding `null` are omitted.
pub fn variables_of(root: &FormElement, model: &Value) -> Value {
    let mut vars = Map::new();
    for arg in arguments(root) {
        match model.get(&arg.name) {
            Some(Value::Null) | None if !arg.is_required() => {}
            Some(value) => {
                vars.insert(arg.name.clone(), value.clone());
            }
            None => {
                vars.insert(arg.name.clone(), Value::Null);
            }
        }
    }
    Value::Object(vars)
}

fn arguments(root: &FormElement) -> &[FormElement] {
    match &root.kind {
        ElementKind::Object { fields, .. } => fields,
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormError;
    use crate::registry::Registry;
    use crate::schema::{Field, FullType, InputValue, TypeKind, TypeRef};
    use serde_json::json;

    fn arg(name: &str, type_ref: TypeRef) -> InputValue {
        InputValue {
            name: name.into(),
            description: None,
            type_ref,
            default_value: None,
        }
    }

    fn schema() -> SchemaIndex {
        SchemaIndex::default()
            .with_mutation_type("UISMutations")
            .with_type(FullType {
                kind: TypeKind::Object,
                name: "UISMutations".into(),
                description: None,
                fields: Some(vec![Field {
                    name: "hold".into(),
                    description: Some("Hold tasks within a workflow.".into()),
                    args: vec![
                        arg(
                            "workflows",
                            TypeRef::non_null(TypeRef::list(TypeRef::scalar("WorkflowID"))),
                        ),
                        arg("tasks", TypeRef::list(TypeRef::scalar("NamespaceIDGlob"))),
                        arg("cutoff", TypeRef::scalar("CyclePoint")),
                        arg("count", TypeRef::scalar("Int")),
                    ],
                    type_ref: TypeRef::named(TypeKind::Object, "Hold"),
                }]),
                input_fields: None,
                enum_values: None,
            })
    }

    #[test]
    fn test_variables_drop_null_optionals() {
        let schema = schema();
        let registry = Registry::default();
        let resolver = Resolver::new(&registry, &schema);

        let mut form = MutationForm::new(&schema, &resolver, "hold").unwrap();
        assert_eq!(form.description(), Some("Hold tasks within a workflow."));
        assert_eq!(
            form.variables(),
            json!({ "workflows": [], "tasks": [], "cutoff": "" })
        );

        form.edit("workflows", Edit::AddRow).unwrap();
        let report = form
            .edit("workflows", Edit::row(0, Edit::Text("one".into())))
            .unwrap();
        assert!(report.is_valid());

        form.edit("count", Edit::Text("2".into())).unwrap();
        assert_eq!(form.variables()["workflows"], json!(["one"]));
        assert_eq!(form.variables()["count"], json!(2));
    }

    #[test]
    fn test_invalid_argument_reported() {
        let schema = schema();
        let registry = Registry::default();
        let resolver = Resolver::new(&registry, &schema);

        let mut form = MutationForm::new(&schema, &resolver, "hold").unwrap();
        form.edit("workflows", Edit::AddRow).unwrap();
        let report = form
            .edit("workflows", Edit::row(0, Edit::Text("has space".into())))
            .unwrap();

        assert!(!form.is_valid());
        assert_eq!(report.messages_for("workflows[0]"), ["Cannot contain spaces"]);
    }

    #[test]
    fn test_unknown_mutation() {
        let schema = schema();
        let registry = Registry::default();
        let resolver = Resolver::new(&registry, &schema);

        let err = MutationForm::new(&schema, &resolver, "explode").unwrap_err();
        assert!(matches!(err, FormError::UnknownMutation(name) if name == "explode"));
    }
}

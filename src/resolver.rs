//! Form element resolution
//!
//! Turns a GraphQL type reference into a [`FormElement`] tree by walking the
//! `ofType` chain: `NON_NULL` marks the wrapped element required, `LIST`
//! becomes repeatable rows of the resolved item, `ENUM` a closed choice,
//! `INPUT_OBJECT` a group of independently resolved fields, and named
//! scalars go through the [`Registry`].

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::{Settings, DEFAULT_MAX_DEPTH};
use crate::error::{FormError, Result};
use crate::model::PropertyPath;
use crate::registry::{coerce_value, PropOverrides, Registry, RenderDescriptor, Widget};
use crate::schema::{InputValue, SchemaIndex, TypeKind, TypeRef};

// ============================================================================
// Form Element
// ============================================================================

/// One resolved renderer and, for containers, its children
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FormElement {
    /// Key of this element in its parent's model (argument or field name)
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The type this element was resolved from, in SDL notation
    pub graphql_type: String,
    pub descriptor: RenderDescriptor,
    /// Schema-declared default, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    pub kind: ElementKind,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
    Scalar {
        type_name: String,
    },
    Enum {
        type_name: String,
        values: Vec<String>,
    },
    List {
        item: Box<FormElement>,
    },
    Object {
        type_name: String,
        fields: Vec<FormElement>,
    },
}

impl FormElement {
    pub fn widget(&self) -> Widget {
        self.descriptor.widget
    }

    pub fn is_required(&self) -> bool {
        self.descriptor.props.required
    }

    pub fn label(&self) -> &str {
        self.descriptor.props.label.as_deref().unwrap_or(&self.name)
    }

    /// Child field by name, for object elements
    pub fn field(&self, name: &str) -> Option<&FormElement> {
        match &self.kind {
            ElementKind::Object { fields, .. } => fields.iter().find(|f| f.name == name),
            _ => None,
        }
    }

    /// Initial model value for this element
    pub fn default_value(&self) -> Value {
        if let Some(default) = &self.default {
            return self.normalize(default);
        }

        match &self.kind {
            ElementKind::Scalar { .. } => match self.widget() {
                Widget::Text => Value::String(String::new()),
                Widget::Switch => Value::Bool(false),
                _ => Value::Null,
            },
            ElementKind::Enum { .. } => Value::Null,
            ElementKind::List { .. } => Value::Array(Vec::new()),
            ElementKind::Object { fields, .. } => Value::Object(
                fields
                    .iter()
                    .map(|f| (f.name.clone(), f.default_value()))
                    .collect::<Map<_, _>>(),
            ),
        }
    }

    /// Bring an externally supplied value into the shape the renderers emit
    ///
    /// Number fields hold numbers from the start, not only after the first
    /// edit.
    pub fn normalize(&self, value: &Value) -> Value {
        match &self.kind {
            ElementKind::Scalar { .. } if self.widget() == Widget::Number => coerce_value(value),
            ElementKind::List { item } => match value {
                Value::Array(rows) => Value::Array(rows.iter().map(|r| item.normalize(r)).collect()),
                other => other.clone(),
            },
            ElementKind::Object { fields, .. } => match value {
                Value::Object(map) => {
                    let mut out = map.clone();
                    for field in fields {
                        if let Some(v) = map.get(&field.name) {
                            out.insert(field.name.clone(), field.normalize(v));
                        }
                    }
                    Value::Object(out)
                }
                other => other.clone(),
            },
            _ => value.clone(),
        }
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Resolves type references against a schema and a registry
pub struct Resolver<'a> {
    registry: &'a Registry,
    schema: &'a SchemaIndex,
    max_depth: usize,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a Registry, schema: &'a SchemaIndex) -> Self {
        Self {
            registry,
            schema,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Resolver bounded by the configured depth
    pub fn from_settings(registry: &'a Registry, schema: &'a SchemaIndex, settings: &Settings) -> Self {
        Self::new(registry, schema).with_max_depth(settings.resolver.max_depth)
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Resolve a bare type reference under the given label
    pub fn resolve(&self, type_ref: &TypeRef, label: &str) -> Result<FormElement> {
        let path = PropertyPath::root().push_property(label);
        self.resolve_at(type_ref, label, None, &PropOverrides::label(label), &path, 0)
    }

    /// Resolve an argument or input field, honouring its description and default
    pub fn resolve_input(&self, input: &InputValue) -> Result<FormElement> {
        let path = PropertyPath::root().push_property(&input.name);
        self.resolve_input_at(input, &path, 0)
    }

    /// Resolve an argument list into one group keyed by argument name
    pub fn resolve_arguments(
        &self,
        name: &str,
        description: Option<String>,
        args: &[InputValue],
    ) -> Result<FormElement> {
        let root = PropertyPath::root();
        let fields = args
            .iter()
            .map(|arg| self.resolve_input_at(arg, &root.push_property(&arg.name), 1))
            .collect::<Result<Vec<_>>>()?;

        Ok(FormElement {
            name: name.to_string(),
            description,
            graphql_type: name.to_string(),
            descriptor: self
                .registry
                .kind_descriptor(TypeKind::Object)?
                .with_overrides(&PropOverrides::label(name)),
            default: None,
            kind: ElementKind::Object {
                type_name: name.to_string(),
                fields,
            },
        })
    }

    fn resolve_input_at(
        &self,
        input: &InputValue,
        path: &PropertyPath,
        depth: usize,
    ) -> Result<FormElement> {
        let mut element = self.resolve_at(
            &input.type_ref,
            &input.name,
            input.description.clone(),
            &PropOverrides::label(&input.name),
            path,
            depth,
        )?;
        element.default = input.default_value.as_deref().and_then(parse_default);
        Ok(element)
    }

    fn resolve_at(
        &self,
        type_ref: &TypeRef,
        name: &str,
        description: Option<String>,
        call_site: &PropOverrides,
        path: &PropertyPath,
        depth: usize,
    ) -> Result<FormElement> {
        if depth > self.max_depth {
            return Err(FormError::DepthExceeded {
                max_depth: self.max_depth,
                path: path.to_string(),
            });
        }

        let graphql_type = type_ref.to_string();

        let (descriptor, kind) = match type_ref.kind {
            TypeKind::NonNull => {
                let inner = of_type(type_ref)?;
                let required = call_site.clone().required(true);
                return self.resolve_at(inner, name, description, &required, path, depth + 1);
            }
            TypeKind::List => {
                let inner = of_type(type_ref)?;
                let item_site = PropOverrides::label(call_site.label.as_deref().unwrap_or(name));
                let item = self.resolve_at(
                    inner,
                    name,
                    None,
                    &item_site,
                    &path.push_wildcard(),
                    depth + 1,
                )?;
                (
                    self.registry.kind_descriptor(TypeKind::List)?,
                    ElementKind::List {
                        item: Box::new(item),
                    },
                )
            }
            TypeKind::Enum => {
                let type_name = type_name(type_ref)?;
                let values = self
                    .schema
                    .enum_values(type_name)?
                    .iter()
                    .map(|v| v.name.clone())
                    .collect();
                (
                    self.registry.kind_descriptor(TypeKind::Enum)?,
                    ElementKind::Enum {
                        type_name: type_name.to_string(),
                        values,
                    },
                )
            }
            TypeKind::InputObject => {
                let type_name = type_name(type_ref)?;
                let fields = self
                    .schema
                    .input_fields(type_name)?
                    .iter()
                    .map(|field| {
                        self.resolve_input_at(field, &path.push_property(&field.name), depth + 1)
                    })
                    .collect::<Result<Vec<_>>>()?;
                (
                    self.registry.kind_descriptor(TypeKind::InputObject)?,
                    ElementKind::Object {
                        type_name: type_name.to_string(),
                        fields,
                    },
                )
            }
            TypeKind::Object => {
                let type_name = type_name(type_ref)?;
                let fields = self
                    .schema
                    .object_fields(type_name)?
                    .iter()
                    .map(|field| {
                        self.resolve_at(
                            &field.type_ref,
                            &field.name,
                            field.description.clone(),
                            &PropOverrides::label(&field.name),
                            &path.push_property(&field.name),
                            depth + 1,
                        )
                    })
                    .collect::<Result<Vec<_>>>()?;
                (
                    self.registry.kind_descriptor(TypeKind::Object)?,
                    ElementKind::Object {
                        type_name: type_name.to_string(),
                        fields,
                    },
                )
            }
            TypeKind::Scalar => {
                let type_name = type_name(type_ref)?;
                (
                    self.registry.lookup(type_name)?,
                    ElementKind::Scalar {
                        type_name: type_name.to_string(),
                    },
                )
            }
            TypeKind::Interface | TypeKind::Union => {
                return Err(FormError::UnsupportedKind {
                    kind: type_ref.kind,
                    name: type_ref.name.clone().unwrap_or_default(),
                })
            }
        };

        tracing::debug!(path = %path, graphql_type = %graphql_type, widget = ?descriptor.widget, "Resolved form element");

        Ok(FormElement {
            name: name.to_string(),
            description,
            graphql_type,
            descriptor: descriptor.with_overrides(call_site),
            default: None,
            kind,
        })
    }
}

fn of_type(type_ref: &TypeRef) -> Result<&TypeRef> {
    type_ref
        .of_type
        .as_deref()
        .ok_or_else(|| FormError::MalformedType(format!("{} without ofType", type_ref.kind)))
}

fn type_name(type_ref: &TypeRef) -> Result<&str> {
    type_ref
        .name
        .as_deref()
        .ok_or_else(|| FormError::MalformedType(format!("{} without name", type_ref.kind)))
}

/// Interpret a printed GraphQL default literal
///
/// JSON-compatible literals parse directly; bare identifiers are enum values.
fn parse_default(literal: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(literal) {
        return (!value.is_null()).then_some(value);
    }
    let is_identifier = !literal.is_empty()
        && literal
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    is_identifier.then(|| Value::String(literal.to_string()))
}

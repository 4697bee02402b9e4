//! GraphQL introspection types
//!
//! Serde mirrors of the subset of the introspection wire format the form
//! generator reads: type references (`kind`/`name`/`ofType` chains), input
//! values, enum values and full type definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod introspection;

pub use introspection::SchemaIndex;

// ============================================================================
// Type Kind
// ============================================================================

/// The `__TypeKind` enumeration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl TypeKind {
    /// Wire name, e.g. `INPUT_OBJECT`
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Scalar => "SCALAR",
            TypeKind::Object => "OBJECT",
            TypeKind::Interface => "INTERFACE",
            TypeKind::Union => "UNION",
            TypeKind::Enum => "ENUM",
            TypeKind::InputObject => "INPUT_OBJECT",
            TypeKind::List => "LIST",
            TypeKind::NonNull => "NON_NULL",
        }
    }

    /// Whether this kind wraps another type through `ofType`
    pub fn is_wrapper(&self) -> bool {
        matches!(self, TypeKind::List | TypeKind::NonNull)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Type Reference
// ============================================================================

/// A (possibly wrapped) reference to a type
///
/// Wrappers (`NON_NULL`, `LIST`) carry the inner type in `of_type`; named
/// kinds carry `name` and no `of_type`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub kind: TypeKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub of_type: Option<Box<TypeRef>>,
}

impl TypeRef {
    /// Reference to a named type of the given kind
    pub fn named(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
            of_type: None,
        }
    }

    pub fn scalar(name: impl Into<String>) -> Self {
        Self::named(TypeKind::Scalar, name)
    }

    pub fn non_null(inner: TypeRef) -> Self {
        Self {
            kind: TypeKind::NonNull,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }

    pub fn list(inner: TypeRef) -> Self {
        Self {
            kind: TypeKind::List,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }

    /// Name of the innermost named type, unwrapping lists and non-nulls
    pub fn named_type(&self) -> Option<&str> {
        match &self.of_type {
            Some(inner) if self.kind.is_wrapper() => inner.named_type(),
            _ => self.name.as_deref(),
        }
    }
}

impl fmt::Display for TypeRef {
    /// GraphQL SDL notation, e.g. `[String!]!`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, &self.of_type) {
            (TypeKind::NonNull, Some(inner)) => write!(f, "{}!", inner),
            (TypeKind::List, Some(inner)) => write!(f, "[{}]", inner),
            _ => f.write_str(self.name.as_deref().unwrap_or("?")),
        }
    }
}

// ============================================================================
// Definitions
// ============================================================================

/// An argument or input object field
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputValue {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    /// GraphQL literal, as printed by the server
    #[serde(default)]
    pub default_value: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// An output field; mutations are fields of the mutation root type
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub args: Vec<InputValue>,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
}

/// A complete type definition from `__schema.types`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullType {
    pub kind: TypeKind,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<Field>>,
    #[serde(default)]
    pub input_fields: Option<Vec<InputValue>>,
    #[serde(default)]
    pub enum_values: Option<Vec<EnumValue>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: String,
}

/// The `__schema` object
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionSchema {
    #[serde(default)]
    pub query_type: Option<NamedRef>,
    #[serde(default)]
    pub mutation_type: Option<NamedRef>,
    #[serde(default)]
    pub types: Vec<FullType>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_ref_from_wire_format() {
        let wire = json!({
            "kind": "NON_NULL",
            "name": null,
            "ofType": {
                "kind": "LIST",
                "name": null,
                "ofType": { "kind": "SCALAR", "name": "WorkflowID", "ofType": null }
            }
        });

        let type_ref: TypeRef = serde_json::from_value(wire).unwrap();
        assert_eq!(type_ref.kind, TypeKind::NonNull);
        assert_eq!(type_ref.named_type(), Some("WorkflowID"));
        assert_eq!(type_ref.to_string(), "[WorkflowID]!");
    }

    #[test]
    fn test_input_object_kind_name() {
        let kind: TypeKind = serde_json::from_value(json!("INPUT_OBJECT")).unwrap();
        assert_eq!(kind, TypeKind::InputObject);
        assert_eq!(kind.to_string(), "INPUT_OBJECT");
    }

    #[test]
    fn test_builders_match_display() {
        let t = TypeRef::non_null(TypeRef::list(TypeRef::non_null(TypeRef::scalar("String"))));
        assert_eq!(t.to_string(), "[String!]!");
    }
}

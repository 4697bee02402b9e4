//! Loading and indexing an introspection result

use serde::de::Error as _;
use serde_json::Value;
use std::collections::HashMap;

use super::{EnumValue, Field, FullType, InputValue, IntrospectionSchema, TypeKind};
use crate::error::{FormError, Result};

/// Name-indexed view over `__schema.types`
#[derive(Clone, Debug, Default)]
pub struct SchemaIndex {
    types: HashMap<String, FullType>,
    mutation_type: Option<String>,
}

impl SchemaIndex {
    /// Parse the JSON response of an `IntrospectionQuery`
    ///
    /// Accepts the full response (`{"data": {"__schema": ...}}`) or the bare
    /// `{"__schema": ...}` object.
    pub fn from_introspection(json: &str) -> Result<Self> {
        let mut doc: Value = serde_json::from_str(json)?;

        let schema = match doc.get_mut("data").and_then(|d| d.get_mut("__schema")) {
            Some(schema) => schema.take(),
            None => match doc.get_mut("__schema") {
                Some(schema) => schema.take(),
                None => {
                    return Err(FormError::Introspection(serde_json::Error::custom(
                        "document has no __schema object",
                    )))
                }
            },
        };

        let schema: IntrospectionSchema = serde_json::from_value(schema)?;
        Ok(Self::from_schema(schema))
    }

    pub fn from_schema(schema: IntrospectionSchema) -> Self {
        let mutation_type = schema.mutation_type.map(|m| m.name);
        let types = schema
            .types
            .into_iter()
            .map(|t| (t.name.clone(), t))
            .collect::<HashMap<_, _>>();

        tracing::debug!(
            types = types.len(),
            mutation_type = mutation_type.as_deref().unwrap_or("-"),
            "Indexed introspection schema"
        );

        Self {
            types,
            mutation_type,
        }
    }

    /// Builder used by tests and by callers assembling schemas by hand
    pub fn with_type(mut self, full_type: FullType) -> Self {
        self.types.insert(full_type.name.clone(), full_type);
        self
    }

    pub fn with_mutation_type(mut self, name: impl Into<String>) -> Self {
        self.mutation_type = Some(name.into());
        self
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&FullType> {
        self.types.get(name)
    }

    fn require(&self, name: &str) -> Result<&FullType> {
        self.get(name)
            .ok_or_else(|| FormError::UnknownSchemaType(name.to_string()))
    }

    /// Fields of the mutation root type, in declaration order
    pub fn mutations(&self) -> Result<&[Field]> {
        let name = self
            .mutation_type
            .as_deref()
            .ok_or(FormError::MissingMutationType)?;
        Ok(self.require(name)?.fields.as_deref().unwrap_or_default())
    }

    pub fn mutation(&self, name: &str) -> Result<&Field> {
        self.mutations()?
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| FormError::UnknownMutation(name.to_string()))
    }

    /// Declared values of an enum type
    pub fn enum_values(&self, name: &str) -> Result<&[EnumValue]> {
        let full = self.require(name)?;
        if full.kind != TypeKind::Enum {
            return Err(FormError::MalformedType(format!(
                "'{}' is {}, expected ENUM",
                name, full.kind
            )));
        }
        Ok(full.enum_values.as_deref().unwrap_or_default())
    }

    /// Declared fields of an input object type
    pub fn input_fields(&self, name: &str) -> Result<&[InputValue]> {
        let full = self.require(name)?;
        match full.kind {
            TypeKind::InputObject => Ok(full.input_fields.as_deref().unwrap_or_default()),
            other => Err(FormError::MalformedType(format!(
                "'{}' is {}, expected INPUT_OBJECT",
                name, other
            ))),
        }
    }

    /// Declared output fields of an object type
    pub fn object_fields(&self, name: &str) -> Result<&[Field]> {
        let full = self.require(name)?;
        match full.kind {
            TypeKind::Object => Ok(full.fields.as_deref().unwrap_or_default()),
            other => Err(FormError::MalformedType(format!(
                "'{}' is {}, expected OBJECT",
                name, other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> String {
        json!({
            "data": {
                "__schema": {
                    "queryType": { "name": "Queries" },
                    "mutationType": { "name": "Mutations" },
                    "types": [
                        {
                            "kind": "OBJECT",
                            "name": "Mutations",
                            "fields": [
                                {
                                    "name": "hold",
                                    "description": "Hold tasks.",
                                    "args": [
                                        {
                                            "name": "workflows",
                                            "type": {
                                                "kind": "NON_NULL",
                                                "ofType": {
                                                    "kind": "LIST",
                                                    "ofType": { "kind": "SCALAR", "name": "WorkflowID" }
                                                }
                                            },
                                            "defaultValue": null
                                        }
                                    ],
                                    "type": { "kind": "OBJECT", "name": "Hold" }
                                }
                            ]
                        },
                        {
                            "kind": "ENUM",
                            "name": "TaskStatus",
                            "enumValues": [
                                { "name": "waiting" },
                                { "name": "running" }
                            ]
                        }
                    ]
                }
            }
        })
        .to_string()
    }

    #[test]
    fn test_parse_wrapped_response() {
        let index = SchemaIndex::from_introspection(&sample()).unwrap();
        assert_eq!(index.len(), 2);
        let hold = index.mutation("hold").unwrap();
        assert_eq!(hold.args.len(), 1);
        assert_eq!(hold.args[0].type_ref.to_string(), "[WorkflowID]!");
    }

    #[test]
    fn test_parse_bare_schema() {
        let doc: Value = serde_json::from_str(&sample()).unwrap();
        let bare = json!({ "__schema": doc["data"]["__schema"] }).to_string();
        let index = SchemaIndex::from_introspection(&bare).unwrap();
        assert!(index.get("TaskStatus").is_some());
    }

    #[test]
    fn test_missing_schema_is_error() {
        let err = SchemaIndex::from_introspection("{\"data\": {}}").unwrap_err();
        assert!(matches!(err, FormError::Introspection(_)));
    }

    #[test]
    fn test_enum_values_and_kind_mismatch() {
        let index = SchemaIndex::from_introspection(&sample()).unwrap();
        let values = index.enum_values("TaskStatus").unwrap();
        assert_eq!(values.len(), 2);
        assert!(matches!(
            index.input_fields("TaskStatus"),
            Err(FormError::MalformedType(_))
        ));
    }

    #[test]
    fn test_unknown_mutation() {
        let index = SchemaIndex::from_introspection(&sample()).unwrap();
        assert!(matches!(
            index.mutation("stop"),
            Err(FormError::UnknownMutation(name)) if name == "stop"
        ));
    }

    #[test]
    fn test_no_mutation_type() {
        let index = SchemaIndex::default();
        assert!(matches!(index.mutations(), Err(FormError::MissingMutationType)));
    }
}

//! Error types for form resolution and propagation

use thiserror::Error;

use crate::schema::TypeKind;

/// Errors raised while building or editing a form.
///
/// These are configuration or programmer errors. User input that fails a
/// validation rule is not an error; it is reported through
/// [`crate::model::ValidationReport`].
#[derive(Debug, Error)]
pub enum FormError {
    /// A scalar name has no entry in the type registry
    #[error("No renderer registered for named type '{0}'")]
    UnknownNamedType(String),

    /// A kind that can never appear in an input position
    #[error("GraphQL kind {kind:?} cannot be rendered as a form input (type '{name}')")]
    UnsupportedKind { kind: TypeKind, name: String },

    /// A configured scalar entry cannot be registered
    #[error("Invalid scalar configuration: {0}")]
    Config(String),

    /// A type reference is missing its `name` or `ofType`
    #[error("Malformed type reference: {0}")]
    MalformedType(String),

    /// A named type referenced by a field is not in the schema
    #[error("Type '{0}' not found in schema")]
    UnknownSchemaType(String),

    /// The mutation type has no field with this name
    #[error("Mutation '{0}' not found in schema")]
    UnknownMutation(String),

    /// The schema declares no mutation root type
    #[error("Schema has no mutation type")]
    MissingMutationType,

    /// Type nesting went beyond the configured bound
    #[error("Maximum resolution depth {max_depth} exceeded at '{path}'")]
    DepthExceeded { max_depth: usize, path: String },

    /// An edit was addressed to a node that cannot accept it
    #[error("Invalid edit at '{path}': {reason}")]
    InvalidEdit { path: String, reason: String },

    /// The introspection document could not be parsed
    #[error("Introspection error: {0}")]
    Introspection(#[from] serde_json::Error),
}

impl FormError {
    pub(crate) fn invalid_edit(path: impl Into<String>, reason: impl Into<String>) -> Self {
        FormError::InvalidEdit {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FormError>;

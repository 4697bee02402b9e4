//! Type registry: GraphQL named types and kinds to render descriptors
//!
//! Built-in scalars are a closed enum ([`NamedType`]) so the table is checked
//! by exhaustive matches. Deployment-specific scalars are added through the
//! `[[scalars]]` section of the settings file and live in a string-keyed
//! extension map consulted after the built-ins.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::HashMap;

use crate::config::{DefaultProps, ScalarEntry};
use crate::error::{FormError, Result};
use crate::rules::Rule;
use crate::schema::TypeKind;

// ============================================================================
// Widgets and Props
// ============================================================================

/// Which renderer to mount
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Widget {
    /// Free text input
    Text,
    /// Text input whose value is coerced to a number on every edit
    Number,
    /// On/off toggle
    Switch,
    /// Closed choice from enum values
    Select,
    /// Repeatable rows of one item renderer
    List,
    /// Named fields laid out together
    Group,
}

impl Widget {
    /// Widgets that render a single scalar value
    pub fn is_leaf(&self) -> bool {
        matches!(self, Widget::Text | Widget::Number | Widget::Switch)
    }
}

/// Fully merged presentation properties for one renderer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Props {
    pub filled: bool,
    pub rounded: bool,
    pub dense: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Props {
    fn from_defaults(defaults: &DefaultProps) -> Self {
        Self {
            filled: defaults.filled,
            rounded: defaults.rounded,
            dense: defaults.dense,
            label: None,
            required: false,
            placeholder: None,
            mask: None,
            input_type: None,
            color: None,
        }
    }

    /// Apply overrides on top of these props; set fields win
    pub fn merge(&mut self, overrides: &PropOverrides) {
        if let Some(v) = overrides.filled {
            self.filled = v;
        }
        if let Some(v) = overrides.rounded {
            self.rounded = v;
        }
        if let Some(v) = overrides.dense {
            self.dense = v;
        }
        if let Some(v) = overrides.required {
            self.required = v;
        }
        if overrides.label.is_some() {
            self.label = overrides.label.clone();
        }
        if overrides.placeholder.is_some() {
            self.placeholder = overrides.placeholder.clone();
        }
        if overrides.mask.is_some() {
            self.mask = overrides.mask.clone();
        }
        if overrides.input_type.is_some() {
            self.input_type = overrides.input_type.clone();
        }
        if overrides.color.is_some() {
            self.color = overrides.color.clone();
        }
    }
}

/// Partial props, used for type-specific and call-site layers
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropOverrides {
    #[serde(default)]
    pub filled: Option<bool>,
    #[serde(default)]
    pub rounded: Option<bool>,
    #[serde(default)]
    pub dense: Option<bool>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub mask: Option<String>,
    #[serde(default)]
    pub input_type: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl PropOverrides {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Default::default()
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }
}

/// Widget, merged props and rules for one type
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderDescriptor {
    pub widget: Widget,
    pub props: Props,
    pub rules: Vec<Rule>,
}

impl RenderDescriptor {
    /// Layer call-site overrides (label, required, ...) on top
    pub fn with_overrides(mut self, call_site: &PropOverrides) -> Self {
        self.props.merge(call_site);
        if self.props.required && !self.rules.contains(&Rule::Required) {
            self.rules.insert(0, Rule::Required);
        }
        self
    }
}

// ============================================================================
// Built-in Named Types
// ============================================================================

/// GraphQL built-in scalars and the Cylc scalars the dashboard knows about
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedType {
    String,
    Int,
    Float,
    Boolean,
    #[serde(rename = "WorkflowID")]
    WorkflowId,
    User,
    CyclePoint,
    CyclePointGlob,
    TaskName,
    #[serde(rename = "TaskID")]
    TaskId,
    NamespaceName,
    #[serde(rename = "NamespaceIDGlob")]
    NamespaceIdGlob,
    TimePoint,
    RuntimeConfiguration,
}

impl NamedType {
    pub const ALL: [NamedType; 14] = [
        NamedType::String,
        NamedType::Int,
        NamedType::Float,
        NamedType::Boolean,
        NamedType::WorkflowId,
        NamedType::User,
        NamedType::CyclePoint,
        NamedType::CyclePointGlob,
        NamedType::TaskName,
        NamedType::TaskId,
        NamedType::NamespaceName,
        NamedType::NamespaceIdGlob,
        NamedType::TimePoint,
        NamedType::RuntimeConfiguration,
    ];

    /// Schema name of the type
    pub fn name(&self) -> &'static str {
        match self {
            NamedType::String => "String",
            NamedType::Int => "Int",
            NamedType::Float => "Float",
            NamedType::Boolean => "Boolean",
            NamedType::WorkflowId => "WorkflowID",
            NamedType::User => "User",
            NamedType::CyclePoint => "CyclePoint",
            NamedType::CyclePointGlob => "CyclePointGlob",
            NamedType::TaskName => "TaskName",
            NamedType::TaskId => "TaskID",
            NamedType::NamespaceName => "NamespaceName",
            NamedType::NamespaceIdGlob => "NamespaceIDGlob",
            NamedType::TimePoint => "TimePoint",
            NamedType::RuntimeConfiguration => "RuntimeConfiguration",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        NamedType::ALL.iter().copied().find(|t| t.name() == name)
    }

    fn widget(&self) -> Widget {
        match self {
            NamedType::Int | NamedType::Float => Widget::Number,
            NamedType::Boolean => Widget::Switch,
            _ => Widget::Text,
        }
    }

    fn type_props(&self) -> PropOverrides {
        let mut props = PropOverrides::default();
        match self {
            NamedType::Int | NamedType::Float => props.input_type = Some("number".into()),
            NamedType::Boolean => props.color = Some("blue darken-3".into()),
            NamedType::TaskId => props.placeholder = Some("name.cycle".into()),
            NamedType::NamespaceIdGlob => props.placeholder = Some("name[.cycle][:status]".into()),
            NamedType::TimePoint => {
                props.placeholder = Some("yyyy-mm-ddThh:mm:ss".into());
                props.mask = Some("####-##-##T##:##:##".into());
            }
            NamedType::RuntimeConfiguration => props.placeholder = Some("[section]setting".into()),
            _ => {}
        }
        props
    }

    fn rules(&self) -> Vec<Rule> {
        match self {
            NamedType::String
            | NamedType::Float
            | NamedType::Boolean
            | NamedType::TimePoint => vec![],
            NamedType::Int => vec![Rule::Integer],
            NamedType::WorkflowId
            | NamedType::User
            | NamedType::TaskName
            | NamedType::NamespaceName
            | NamedType::NamespaceIdGlob => vec![Rule::NoSpaces],
            NamedType::CyclePoint => vec![Rule::NoSpaces, Rule::CyclePoint],
            NamedType::CyclePointGlob => vec![Rule::NoSpaces, Rule::CyclePointGlob],
            NamedType::TaskId => vec![Rule::NoSpaces, Rule::TaskId],
            NamedType::RuntimeConfiguration => vec![Rule::RuntimeConfigItem],
        }
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Lookup table from type names and kinds to render descriptors
#[derive(Clone, Debug, Default)]
pub struct Registry {
    defaults: DefaultProps,
    extra: HashMap<String, RenderDescriptor>,
}

impl Registry {
    pub fn new(defaults: DefaultProps) -> Self {
        Self {
            defaults,
            extra: HashMap::new(),
        }
    }

    /// Registry with the configured defaults and extra scalars
    pub fn from_settings(settings: &crate::config::Settings) -> Result<Self> {
        let mut registry = Self::new(settings.defaults.clone());
        for entry in &settings.scalars {
            registry.register(entry)?;
        }
        Ok(registry)
    }

    /// Add a scalar; built-in names cannot be shadowed
    pub fn register(&mut self, entry: &ScalarEntry) -> Result<()> {
        if NamedType::from_name(&entry.name).is_some() {
            return Err(FormError::Config(format!(
                "scalar '{}' is built in and cannot be re-registered",
                entry.name
            )));
        }
        if !entry.widget.is_leaf() {
            return Err(FormError::Config(format!(
                "scalar '{}' must use a text, number or switch widget",
                entry.name
            )));
        }

        let mut props = Props::from_defaults(&self.defaults);
        props.merge(&PropOverrides {
            placeholder: entry.placeholder.clone(),
            mask: entry.mask.clone(),
            input_type: (entry.widget == Widget::Number).then(|| "number".to_string()),
            ..Default::default()
        });

        tracing::debug!(scalar = %entry.name, widget = ?entry.widget, "Registered scalar");
        self.extra.insert(
            entry.name.clone(),
            RenderDescriptor {
                widget: entry.widget,
                props,
                rules: entry.rules.clone(),
            },
        );
        Ok(())
    }

    /// Descriptor for a named scalar: built-ins first, then registered extras
    pub fn lookup(&self, name: &str) -> Result<RenderDescriptor> {
        if let Some(named) = NamedType::from_name(name) {
            let mut props = Props::from_defaults(&self.defaults);
            props.merge(&named.type_props());
            return Ok(RenderDescriptor {
                widget: named.widget(),
                props,
                rules: named.rules(),
            });
        }

        self.extra
            .get(name)
            .cloned()
            .ok_or_else(|| FormError::UnknownNamedType(name.to_string()))
    }

    /// Descriptor for a structural kind
    ///
    /// `NON_NULL` has no renderer of its own (it marks the wrapped renderer
    /// required) and `SCALAR` goes through [`Registry::lookup`].
    pub fn kind_descriptor(&self, kind: TypeKind) -> Result<RenderDescriptor> {
        let widget = match kind {
            TypeKind::Enum => Widget::Select,
            TypeKind::List => Widget::List,
            TypeKind::InputObject | TypeKind::Object => Widget::Group,
            TypeKind::NonNull | TypeKind::Scalar => {
                return Err(FormError::MalformedType(format!(
                    "{} has no structural renderer",
                    kind
                )))
            }
            TypeKind::Interface | TypeKind::Union => {
                return Err(FormError::UnsupportedKind {
                    kind,
                    name: String::new(),
                })
            }
        };

        Ok(RenderDescriptor {
            widget,
            props: Props::from_defaults(&self.defaults),
            rules: vec![],
        })
    }

    pub fn defaults(&self) -> &DefaultProps {
        &self.defaults
    }
}

// ============================================================================
// Number Coercion
// ============================================================================

/// Convert number-field text into the value that propagates upward
///
/// Integral input becomes a JSON integer, other numeric input a float.
/// Empty and non-numeric text become `null`.
pub fn coerce_number(text: &str) -> Value {
    let text = text.trim();
    if text.is_empty() {
        return Value::Null;
    }
    if let Ok(n) = text.parse::<i64>() {
        return Value::Number(n.into());
    }
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() => {
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                Value::Number((f as i64).into())
            } else {
                Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
            }
        }
        _ => Value::Null,
    }
}

/// Normalise an existing model value for a number field
pub fn coerce_value(value: &Value) -> Value {
    match value {
        Value::Number(_) | Value::Null => value.clone(),
        Value::String(s) => coerce_number(s),
        _ => Value::Null,
    }
}

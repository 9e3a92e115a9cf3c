//! Typed input schemas for the tools and the registry that validates against them.

use crate::shared::ToolKey;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub mod builtin;
pub mod validate;

pub use validate::validate_against;

pub const META_KEY: &str = "meta";
pub const TOOL_NAME_KEY: &str = "tool_name";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    String,
    Integer,
    Boolean,
    Object,
    StringList,
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Integer => write!(f, "integer"),
            Self::Boolean => write!(f, "boolean"),
            Self::Object => write!(f, "dictionary"),
            Self::StringList => write!(f, "list"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedValues {
    pub values: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConstraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed: Option<AllowedValues>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub constraints: FieldConstraints,
}

impl FieldSchema {
    pub fn required(name: &str, field_type: FieldType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            required: true,
            default: None,
            description: description.to_string(),
            constraints: FieldConstraints::default(),
        }
    }

    pub fn optional(name: &str, field_type: FieldType, default: Value, description: &str) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            required: false,
            default: Some(default),
            description: description.to_string(),
            constraints: FieldConstraints::default(),
        }
    }

    pub fn length(mut self, min: usize, max: usize) -> Self {
        self.constraints.min_length = Some(min);
        self.constraints.max_length = Some(max);
        self
    }

    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.constraints.min_value = Some(min);
        self.constraints.max_value = Some(max);
        self
    }

    pub fn one_of(mut self, values: &[&str], message: &str) -> Self {
        self.constraints.allowed = Some(AllowedValues {
            values: values.iter().map(|value| value.to_string()).collect(),
            message: message.to_string(),
        });
        self
    }

    pub fn min_items(mut self, min: usize) -> Self {
        self.constraints.min_items = Some(min);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    pub tool: String,
    pub title: String,
    pub fields: Vec<FieldSchema>,
}

impl SchemaDescriptor {
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields.iter().filter(|field| field.required)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchemaErrorCode {
    UnknownTool,
    ValidationError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMeta {
    pub error_code: SchemaErrorCode,
}

/// Field-level validation errors plus the `meta.error_code` sentinel.
///
/// Serializes flat: `{"topic": ["Field required"], "meta": {"error_code": "VALIDATION_ERROR"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub meta: ErrorMeta,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new(error_code: SchemaErrorCode) -> Self {
        Self {
            meta: ErrorMeta { error_code },
            fields: BTreeMap::new(),
        }
    }

    pub fn unknown_tool(tool: &str) -> Self {
        let mut errors = Self::new(SchemaErrorCode::UnknownTool);
        errors.push(TOOL_NAME_KEY, format!("Unknown tool: {tool}"));
        errors
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn error_code(&self) -> SchemaErrorCode {
        self.meta.error_code
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields with at least one message mentioning "required".
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(field, _)| field.as_str() != META_KEY)
            .filter(|(_, messages)| {
                messages
                    .iter()
                    .any(|message| message.to_ascii_lowercase().contains("required"))
            })
            .map(|(field, _)| field.as_str())
    }

    /// One-line human summary, e.g. `topic: Field required; count: ...`.
    pub fn summary(&self) -> String {
        self.fields
            .iter()
            .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

pub trait SchemaProvider: Send + Sync {
    fn input_schema(&self, tool: &str) -> Option<SchemaDescriptor>;
}

pub trait SchemaRegistry: SchemaProvider {
    /// Returns the validated object (defaults applied) or field-level errors.
    fn validate(&self, tool: &str, params: &Map<String, Value>)
        -> Result<Map<String, Value>, ValidationErrors>;

    fn knows(&self, tool: &str) -> bool {
        self.input_schema(tool).is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticSchemaRegistry {
    schemas: BTreeMap<ToolKey, SchemaDescriptor>,
}

impl StaticSchemaRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for schema in builtin::builtin_schemas() {
            registry.insert(schema);
        }
        registry
    }

    pub fn insert(&mut self, schema: SchemaDescriptor) {
        self.schemas.insert(ToolKey::normalize(&schema.tool), schema);
    }

    pub fn tools(&self) -> impl Iterator<Item = &str> {
        self.schemas.values().map(|schema| schema.tool.as_str())
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    fn lookup(&self, tool: &str) -> Option<&SchemaDescriptor> {
        self.schemas.get(ToolKey::normalize(tool).as_str())
    }
}

impl SchemaProvider for StaticSchemaRegistry {
    fn input_schema(&self, tool: &str) -> Option<SchemaDescriptor> {
        self.lookup(tool).cloned()
    }
}

impl SchemaRegistry for StaticSchemaRegistry {
    fn validate(
        &self,
        tool: &str,
        params: &Map<String, Value>,
    ) -> Result<Map<String, Value>, ValidationErrors> {
        match self.lookup(tool) {
            Some(schema) => validate_against(schema, params),
            None => Err(ValidationErrors::unknown_tool(tool)),
        }
    }

    fn knows(&self, tool: &str) -> bool {
        self.lookup(tool).is_some()
    }
}

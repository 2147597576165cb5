//! Validation error text per data path
//!
//! Validation itself is delegated to `jsonschema`; this module only maps its
//! errors onto the dot-separated data paths controls are bound to.

use jsonschema::{validator_for, Draft, ValidationError as JsonSchemaError, Validator as JsonValidator};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::core::path::{compose_paths, decode_segment};

/// The schema itself could not be compiled
#[derive(Debug, Error)]
#[error("Schema could not be compiled: {message}")]
pub struct SchemaCompileError {
    pub message: String,
}

/// Compile a schema for validation
///
/// Schemas without `$schema` are treated as draft 7, which allows the
/// tuple form of `items`.
pub fn compile(schema: &Value) -> Result<JsonValidator, SchemaCompileError> {
    let compiled = if schema.get("$schema").is_some() {
        validator_for(schema)
    } else {
        jsonschema::options().with_draft(Draft::Draft7).build(schema)
    };
    compiled.map_err(|e| SchemaCompileError {
        message: e.to_string(),
    })
}

/// Whether `instance` satisfies `schema`; uncompilable schemas never match
pub fn matches_schema(schema: &Value, instance: &Value) -> bool {
    compile(schema).is_ok_and(|v| v.is_valid(instance))
}

/// Validation messages grouped by data path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorIndex {
    by_path: BTreeMap<String, Vec<String>>,
}

impl ErrorIndex {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate `data` and index every error
    pub fn collect(validator: &JsonValidator, data: &Value) -> Self {
        let mut index = Self::default();
        for error in validator.iter_errors(data) {
            index.push(error_path(&error), format_schema_error(&error));
        }
        index
    }

    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.by_path.entry(path.into()).or_default().push(message.into());
    }

    /// All messages for `path`, newline separated
    pub fn at(&self, path: &str) -> Option<String> {
        self.by_path.get(path).map(|messages| messages.join("\n"))
    }

    pub fn len(&self) -> usize {
        self.by_path.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.by_path.iter().map(|(p, m)| (p.as_str(), m.as_slice()))
    }
}

/// Data path an error belongs to
///
/// Missing required properties are reported on the property itself so the
/// control bound to it shows the message.
fn error_path(error: &JsonSchemaError) -> String {
    let pointer = error.instance_path.to_string();
    let base = pointer
        .split('/')
        .filter(|s| !s.is_empty())
        .map(decode_segment)
        .collect::<Vec<_>>()
        .join(".");

    match &error.kind {
        jsonschema::error::ValidationErrorKind::Required { property } => {
            let prop = property
                .as_str()
                .map(|s| s.to_string())
                .unwrap_or_else(|| property.to_string());
            compose_paths(&base, &prop)
        }
        _ => base,
    }
}

/// Format a JSON Schema error into a short control-level message
fn format_schema_error(error: &JsonSchemaError) -> String {
    match &error.kind {
        jsonschema::error::ValidationErrorKind::Required { .. } => "is a required property".to_string(),
        jsonschema::error::ValidationErrorKind::Enum { options } => {
            format!("must be equal to one of the allowed values: {}", format_enum_options(options))
        }
        jsonschema::error::ValidationErrorKind::Pattern { pattern } => {
            format!("must match pattern \"{}\"", pattern)
        }
        jsonschema::error::ValidationErrorKind::MinLength { limit } => {
            format!("must NOT have fewer than {} characters", limit)
        }
        jsonschema::error::ValidationErrorKind::MaxLength { limit } => {
            format!("must NOT have more than {} characters", limit)
        }
        jsonschema::error::ValidationErrorKind::Minimum { limit } => format!("must be >= {}", limit),
        jsonschema::error::ValidationErrorKind::Maximum { limit } => format!("must be <= {}", limit),
        jsonschema::error::ValidationErrorKind::AdditionalProperties { unexpected } => {
            format!("must NOT have additional properties: {}", unexpected.join(", "))
        }
        _ => error.to_string(),
    }
}

/// Format enum options as a string
fn format_enum_options(options: &Value) -> String {
    if let Some(arr) = options.as_array() {
        arr.iter()
            .map(|v| v.as_str().map(|s| s.to_string()).unwrap_or_else(|| v.to_string()))
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        options.to_string()
    }
}

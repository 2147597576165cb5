//! Helpers shared by the renderers

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::resolver::deref;

/// Trimmed text, or `None` when blank
pub fn trimmed_or_none(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// One choice of a select menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumOption {
    pub label: String,
    pub value: Value,
}

/// Options listed by an enum schema
///
/// `enum` values are labelled by their string form. `oneOf` entries need a
/// `const`; a non-blank `title` labels them, otherwise the string form of
/// the const does.
pub fn enum_options(schema: &Value) -> Vec<EnumOption> {
    if let Some(values) = schema.get("enum").and_then(Value::as_array) {
        return values
            .iter()
            .map(|v| EnumOption {
                label: js_string(v),
                value: v.clone(),
            })
            .collect();
    }

    let Some(entries) = schema.get("oneOf").and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|entry| {
            let value = entry.get("const")?;
            let label = entry
                .get("title")
                .and_then(Value::as_str)
                .filter(|t| !t.trim().is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| js_string(value));
            Some(EnumOption {
                label,
                value: value.clone(),
            })
        })
        .collect()
}

/// The single `items` schema of an array schema, `$ref`s resolved
pub fn array_items_schema<'a>(schema: &'a Value, root: &'a Value) -> Option<&'a Value> {
    let items = schema.get("items").filter(|i| i.is_object())?;
    deref(items, root).ok()
}

/// String form of a value as a browser would print it
///
/// Strings print bare, `null` as `null`, arrays as their comma-joined
/// elements and objects as `[object Object]`.
pub fn js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|v| match v {
                Value::Null => String::new(),
                other => js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Truthiness of a value as a browser would judge it
pub fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

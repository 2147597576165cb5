//! JSON Schema type derivation

use serde_json::Value;

/// The JSON types a schema node admits
///
/// An explicit `type` wins; otherwise the type is inferred from the keywords
/// present (`properties` → object, `items` → array, `enum`/`const` → the
/// types of the listed values).
pub fn derive_types(schema: &Value) -> Vec<&'static str> {
    let Some(obj) = schema.as_object() else {
        return Vec::new();
    };

    match obj.get("type") {
        Some(Value::String(t)) => return known_type(t).into_iter().collect(),
        Some(Value::Array(ts)) => {
            return ts.iter().filter_map(Value::as_str).filter_map(known_type).collect();
        }
        _ => {}
    }

    if obj.contains_key("properties") || obj.contains_key("additionalProperties") {
        return vec!["object"];
    }
    if obj.contains_key("items") {
        return vec!["array"];
    }

    let mut types = Vec::new();
    let values = obj
        .get("enum")
        .and_then(Value::as_array)
        .map(|v| v.iter().collect::<Vec<_>>())
        .or_else(|| obj.get("const").map(|c| vec![c]))
        .unwrap_or_default();
    for value in values {
        let t = json_type_of(value);
        if !types.contains(&t) {
            types.push(t);
        }
    }
    types
}

/// Whether `schema` admits `expected`
pub fn has_type(schema: &Value, expected: &str) -> bool {
    derive_types(schema).contains(&expected)
}

/// JSON Schema type name of a concrete value
pub fn json_type_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn known_type(t: &str) -> Option<&'static str> {
    match t {
        "object" => Some("object"),
        "array" => Some("array"),
        "string" => Some("string"),
        "number" => Some("number"),
        "integer" => Some("integer"),
        "boolean" => Some("boolean"),
        "null" => Some("null"),
        _ => None,
    }
}

/// First property whose declared type is a string, number or integer
pub fn first_primitive_prop(schema: &Value) -> Option<&str> {
    schema
        .get("properties")?
        .as_object()?
        .iter()
        .find(|(_, prop)| {
            matches!(
                prop.get("type").and_then(Value::as_str),
                Some("string") | Some("number") | Some("integer")
            )
        })
        .map(|(name, _)| name.as_str())
}

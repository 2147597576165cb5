//! Default values for freshly added data

use serde_json::{Map, Value};

use crate::schema::resolver::deref;
use crate::schema::types::has_type;

/// Create a schema-conformant default value
///
/// A `default` keyword wins. Otherwise strings start empty, numbers at zero,
/// booleans false, arrays empty and objects carry their properties' declared
/// defaults. Anything untyped becomes an empty object.
pub fn create_default_value(schema: &Value, root: &Value) -> Value {
    let schema = match deref(schema, root) {
        Ok(s) => s,
        Err(_) => return Value::Object(Map::new()),
    };

    if schema.get("default").is_some() {
        return extract_defaults(schema, root);
    }

    if has_type(schema, "string") {
        Value::String(String::new())
    } else if has_type(schema, "integer") || has_type(schema, "number") {
        Value::from(0)
    } else if has_type(schema, "boolean") {
        Value::Bool(false)
    } else if has_type(schema, "array") {
        Value::Array(Vec::new())
    } else if has_type(schema, "object") {
        extract_defaults(schema, root)
    } else if has_type(schema, "null") {
        Value::Null
    } else {
        Value::Object(Map::new())
    }
}

fn extract_defaults(schema: &Value, root: &Value) -> Value {
    if !has_type(schema, "object") || schema.get("default").is_some() {
        return schema.get("default").cloned().unwrap_or(Value::Null);
    }

    let mut result = Map::new();
    if let Some(props) = schema.get("properties").and_then(Value::as_object) {
        for (key, prop) in props {
            let Ok(prop) = deref(prop, root) else {
                continue;
            };
            if let Some(default) = prop.get("default") {
                result.insert(key.clone(), default.clone());
            }
        }
    }

    if let Some(all_of) = schema.get("allOf").and_then(Value::as_array) {
        for sub in all_of {
            let Ok(sub) = deref(sub, root) else {
                continue;
            };
            if let Value::Object(extra) = extract_defaults(sub, root) {
                for (key, value) in extra {
                    result.entry(key).or_insert(value);
                }
            }
        }
    }

    Value::Object(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primitive_defaults() {
        let root = json!({});
        assert_eq!(create_default_value(&json!({ "type": "string" }), &root), json!(""));
        assert_eq!(create_default_value(&json!({ "type": "integer" }), &root), json!(0));
        assert_eq!(create_default_value(&json!({ "type": "number" }), &root), json!(0));
        assert_eq!(create_default_value(&json!({ "type": "boolean" }), &root), json!(false));
        assert_eq!(create_default_value(&json!({ "type": "array" }), &root), json!([]));
        assert_eq!(create_default_value(&json!({ "type": "null" }), &root), Value::Null);
        assert_eq!(create_default_value(&json!({}), &root), json!({}));
    }

    #[test]
    fn test_default_keyword_wins() {
        let root = json!({});
        assert_eq!(
            create_default_value(&json!({ "type": "string", "default": "hi" }), &root),
            json!("hi")
        );
        assert_eq!(
            create_default_value(&json!({ "type": "object", "default": { "a": 1 } }), &root),
            json!({ "a": 1 })
        );
    }

    #[test]
    fn test_object_collects_property_defaults() {
        let root = json!({
            "definitions": { "level": { "type": "integer", "default": 3 } }
        });
        let schema = json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "active": { "type": "boolean", "default": true },
                "level": { "$ref": "#/definitions/level" }
            },
            "allOf": [
                { "type": "object", "properties": { "extra": { "type": "string", "default": "x" } } }
            ]
        });
        assert_eq!(
            create_default_value(&schema, &root),
            json!({ "active": true, "level": 3, "extra": "x" })
        );
    }

    #[test]
    fn test_ref_is_resolved_first() {
        let root = json!({ "definitions": { "flag": { "type": "boolean" } } });
        let schema = json!({ "$ref": "#/definitions/flag" });
        assert_eq!(create_default_value(&schema, &root), json!(false));
    }

    #[test]
    fn test_dangling_ref_yields_empty_object() {
        let root = json!({});
        let schema = json!({ "$ref": "#/definitions/nope" });
        assert_eq!(create_default_value(&schema, &root), json!({}));
    }
}

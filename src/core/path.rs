//! Data paths - dot-separated addresses into the form data
//!
//! Schema scopes (`#/properties/a/properties/b`) map onto data paths (`a.b`);
//! array elements are addressed by index (`items.0.name`).

use serde_json::{Map, Value};

/// Join a parent path and a segment; either side may be empty
pub fn compose_paths(parent: &str, segment: &str) -> String {
    match (parent.is_empty(), segment.is_empty()) {
        (true, _) => segment.to_string(),
        (_, true) => parent.to_string(),
        _ => format!("{}.{}", parent, segment),
    }
}

/// Decode one JSON pointer segment (`~1` → `/`, `~0` → `~`)
pub fn decode_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

/// Encode one JSON pointer segment
pub fn encode_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// Data path segments addressed by a schema scope
///
/// Combinator hops (`oneOf/0`, `then`, `else`) are dropped; of what remains,
/// every second segment after the root marker is a property name.
pub fn to_data_path_segments(scope: &str) -> Vec<String> {
    let segments: Vec<&str> = scope.split('/').collect();
    let mut cleaned: Vec<&str> = Vec::with_capacity(segments.len());
    let mut i = 0;
    while i < segments.len() {
        let seg = segments[i];
        if matches!(seg, "anyOf" | "allOf" | "oneOf")
            && segments.get(i + 1).is_some_and(|n| n.parse::<usize>().is_ok())
            && i + 2 < segments.len()
        {
            i += 2;
            continue;
        }
        if matches!(seg, "then" | "else") && i + 1 < segments.len() {
            i += 1;
            continue;
        }
        cleaned.push(seg);
        i += 1;
    }

    let from_root = matches!(cleaned.first(), Some(&"#") | Some(&""));
    let start = if from_root { 2 } else { 1 };
    cleaned
        .iter()
        .skip(start)
        .step_by(2)
        .map(|s| decode_segment(s))
        .collect()
}

/// Data path addressed by a schema scope (`#/properties/a` → `a`)
pub fn to_data_path(scope: &str) -> String {
    to_data_path_segments(scope).join(".")
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').filter(|s| !s.is_empty())
}

/// Look up the value at `path`; the empty path is the root
pub fn resolve_data<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = data;
    for segment in split(path) {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Set (`Some`) or remove (`None`) the value at `path`
///
/// Missing intermediate containers are created: an array when the next
/// segment is an index, otherwise an object. Removing a missing key is a
/// no-op. The empty path replaces the root (`None` resets it to `null`).
pub fn set_value(data: &mut Value, path: &str, value: Option<Value>) {
    let segments: Vec<&str> = split(path).collect();
    let Some((last, parents)) = segments.split_last() else {
        *data = value.unwrap_or(Value::Null);
        return;
    };

    let mut current = data;
    for (i, segment) in parents.iter().enumerate() {
        let next_is_index = segments[i + 1].parse::<usize>().is_ok();
        if value.is_none() && resolve_data(current, segment).is_none() {
            return;
        }
        current = match child_slot(current, segment, next_is_index) {
            Some(slot) => slot,
            None => return,
        };
    }

    match (current, value) {
        (Value::Object(map), Some(v)) => {
            map.insert(last.to_string(), v);
        }
        (Value::Object(map), None) => {
            map.remove(*last);
        }
        (Value::Array(items), Some(v)) => {
            if let Ok(index) = last.parse::<usize>() {
                if index < items.len() {
                    items[index] = v;
                } else if index == items.len() {
                    items.push(v);
                }
            }
        }
        (Value::Array(items), None) => {
            // Clearing an element keeps the array dense
            if let Ok(index) = last.parse::<usize>() {
                if index < items.len() {
                    items[index] = Value::Null;
                }
            }
        }
        (slot, Some(v)) => {
            let mut map = Map::new();
            map.insert(last.to_string(), v);
            *slot = Value::Object(map);
        }
        (_, None) => {}
    }
}

fn child_slot<'a>(current: &'a mut Value, segment: &str, next_is_index: bool) -> Option<&'a mut Value> {
    if !current.is_object() && !current.is_array() {
        *current = Value::Object(Map::new());
    }
    let fresh = || if next_is_index { Value::Array(Vec::new()) } else { Value::Object(Map::new()) };
    match current {
        Value::Object(map) => {
            let slot = map.entry(segment.to_string()).or_insert_with(fresh);
            if slot.is_null() {
                *slot = fresh();
            }
            Some(slot)
        }
        Value::Array(items) => {
            let index = segment.parse::<usize>().ok()?;
            if index == items.len() {
                items.push(fresh());
            }
            let slot = items.get_mut(index)?;
            if slot.is_null() {
                *slot = fresh();
            }
            Some(slot)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compose_paths() {
        assert_eq!(compose_paths("", "name"), "name");
        assert_eq!(compose_paths("person", ""), "person");
        assert_eq!(compose_paths("person", "name"), "person.name");
        assert_eq!(compose_paths("", ""), "");
    }

    #[test]
    fn test_scope_to_data_path() {
        assert_eq!(to_data_path("#"), "");
        assert_eq!(to_data_path("#/properties/name"), "name");
        assert_eq!(to_data_path("#/properties/address/properties/street"), "address.street");
        assert_eq!(to_data_path("#/properties/a~1b"), "a/b");
        assert_eq!(to_data_path("#/oneOf/0/properties/kind"), "kind");
        assert_eq!(to_data_path("#/then/properties/extra"), "extra");
    }

    #[test]
    fn test_resolve_data() {
        let data = json!({ "items": [{ "name": "a" }, { "name": "b" }], "flag": true });
        assert_eq!(resolve_data(&data, ""), Some(&data));
        assert_eq!(resolve_data(&data, "items.1.name"), Some(&json!("b")));
        assert_eq!(resolve_data(&data, "flag"), Some(&json!(true)));
        assert_eq!(resolve_data(&data, "items.7.name"), None);
        assert_eq!(resolve_data(&data, "flag.deeper"), None);
    }

    #[test]
    fn test_set_value_creates_intermediates() {
        let mut data = json!({});
        set_value(&mut data, "address.street", Some(json!("Main")));
        assert_eq!(data, json!({ "address": { "street": "Main" } }));

        set_value(&mut data, "tags.0", Some(json!("x")));
        assert_eq!(data["tags"], json!(["x"]));
    }

    #[test]
    fn test_set_value_none_removes_key() {
        let mut data = json!({ "age": 3, "name": "n" });
        set_value(&mut data, "age", None);
        assert_eq!(data, json!({ "name": "n" }));

        // Removing below a missing parent does not create it
        set_value(&mut data, "missing.child", None);
        assert_eq!(data, json!({ "name": "n" }));
    }

    #[test]
    fn test_set_value_root() {
        let mut data = json!({ "a": 1 });
        set_value(&mut data, "", Some(json!([1, 2])));
        assert_eq!(data, json!([1, 2]));
        set_value(&mut data, "", None);
        assert_eq!(data, Value::Null);
    }

    #[test]
    fn test_set_value_array_element() {
        let mut data = json!({ "items": [{ "name": "a" }] });
        set_value(&mut data, "items.0.name", Some(json!("z")));
        assert_eq!(data, json!({ "items": [{ "name": "z" }] }));
    }
}

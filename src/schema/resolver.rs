//! Scope and `$ref` resolution against a JSON Schema

use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

use crate::core::path::decode_segment;

/// Maximum `$ref` hops followed before giving up
const MAX_REF_DEPTH: usize = 32;

/// Why a scope or reference could not be resolved
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("scope '{0}' does not address a schema")]
    NotFound(String),

    #[error("reference '{0}' does not resolve")]
    DanglingRef(String),

    #[error("reference '{0}' is not a local JSON pointer")]
    ExternalRef(String),

    #[error("reference cycle through '{0}'")]
    RefCycle(String),
}

/// Follow `$ref` chains until a concrete schema node is reached
pub fn deref<'a>(schema: &'a Value, root: &'a Value) -> Result<&'a Value, ResolveError> {
    let mut current = schema;
    let mut seen: HashSet<&str> = HashSet::new();

    while let Some(reference) = current.get("$ref").and_then(Value::as_str) {
        if !seen.insert(reference) || seen.len() > MAX_REF_DEPTH {
            return Err(ResolveError::RefCycle(reference.to_string()));
        }
        current = resolve_ref(reference, root)?;
    }

    Ok(current)
}

fn resolve_ref<'a>(reference: &str, root: &'a Value) -> Result<&'a Value, ResolveError> {
    let Some(pointer) = reference.strip_prefix('#') else {
        return Err(ResolveError::ExternalRef(reference.to_string()));
    };
    root.pointer(pointer)
        .ok_or_else(|| ResolveError::DanglingRef(reference.to_string()))
}

/// Resolve `scope` (e.g. `#/properties/a/items`) starting at `schema`
///
/// `$ref`s met along the way are resolved against `root`. When a
/// `properties`/`items` hop is missing, combinator branches (`oneOf`,
/// `allOf`, `anyOf`, `then`, `else`) are searched in that order. A branch
/// that leads back to a node already being searched for the same remaining
/// segments is skipped.
pub fn resolve_schema<'a>(
    schema: &'a Value,
    scope: &str,
    root: &'a Value,
) -> Result<&'a Value, ResolveError> {
    let segments: Vec<String> = scope
        .split('/')
        .filter(|s| !s.is_empty() && *s != "#")
        .map(decode_segment)
        .collect();

    let mut visited = HashSet::new();
    match resolve_segments(schema, &segments, root, &mut visited)? {
        Some(resolved) => Ok(resolved),
        None => Err(ResolveError::NotFound(scope.to_string())),
    }
}

/// Schema nodes by address, paired with the number of segments left
type Visited = HashSet<(*const Value, usize)>;

fn resolve_segments<'a>(
    schema: &'a Value,
    segments: &[String],
    root: &'a Value,
    visited: &mut Visited,
) -> Result<Option<&'a Value>, ResolveError> {
    let schema = deref(schema, root)?;
    let Some((segment, rest)) = segments.split_first() else {
        return Ok(Some(schema));
    };
    if !visited.insert((schema as *const Value, segments.len())) {
        return Ok(None);
    }

    let direct = match schema {
        Value::Object(map) => map.get(segment.as_str()),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    };
    if let Some(next) = direct {
        if let Some(found) = resolve_segments(next, rest, root, visited)? {
            return Ok(Some(found));
        }
    }

    if segment == "properties" || segment == "items" {
        for key in ["oneOf", "allOf", "anyOf", "then", "else"] {
            let branches: Vec<&Value> = match schema.get(key) {
                Some(Value::Array(items)) => items.iter().collect(),
                Some(single @ Value::Object(_)) => vec![single],
                _ => continue,
            };
            for branch in branches {
                if let Some(found) = resolve_segments(branch, segments, root, visited)? {
                    return Ok(Some(found));
                }
            }
        }
    }

    Ok(None)
}

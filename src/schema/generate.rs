//! UI Schema generation and detail-layout lookup

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::core::path::encode_segment;
use crate::core::uischema::{UiSchemaNode, UiType};
use crate::dispatch::registry::Rank;
use crate::schema::resolver::deref;
use crate::schema::types::has_type;

/// Generate a default UI Schema for `schema`
///
/// Objects become a layout of type `layout` with one control per property,
/// in declaration order. Everything else becomes a single control bound to
/// the schema itself (`#`).
pub fn generate_ui_schema(schema: &Value, layout: UiType, root: &Value) -> UiSchemaNode {
    let schema = deref(schema, root).unwrap_or(schema);

    if !has_type(schema, "object") {
        return UiSchemaNode::control("#");
    }

    let elements = schema
        .get("properties")
        .and_then(Value::as_object)
        .map(|props| {
            props
                .keys()
                .map(|name| UiSchemaNode::control(format!("#/properties/{}", encode_segment(name))))
                .collect()
        })
        .unwrap_or_default();

    UiSchemaNode::layout(layout, elements)
}

type UiSchemaTestFn = dyn Fn(&Value, &str, &str) -> Option<Rank> + Send + Sync;

/// Registered detail layouts, picked by `(schema, scope, path)`
#[derive(Clone, Default)]
pub struct UiSchemaRegistry {
    entries: Vec<(Arc<UiSchemaTestFn>, UiSchemaNode)>,
}

impl UiSchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `uischema`; `tester` returns a rank when it applies
    pub fn register(
        &mut self,
        tester: impl Fn(&Value, &str, &str) -> Option<Rank> + Send + Sync + 'static,
        uischema: UiSchemaNode,
    ) -> &mut Self {
        self.entries.push((Arc::new(tester), uischema));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest-ranked matching layout; the earliest registration wins ties
    pub fn find_matching(&self, schema: &Value, scope: &str, path: &str) -> Option<&UiSchemaNode> {
        let mut best: Option<(Rank, &UiSchemaNode)> = None;
        for (tester, uischema) in &self.entries {
            if let Some(rank) = tester(schema, scope, path) {
                if best.map_or(true, |(top, _)| rank > top) {
                    best = Some((rank, uischema));
                }
            }
        }
        best.map(|(_, uischema)| uischema)
    }
}

impl fmt::Debug for UiSchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiSchemaRegistry")
            .field("entries", &self.entries.len())
            .finish()
    }
}

/// Find the layout used to render the inside of `control`
///
/// Precedence: an inline `options.detail` layout, then `"GENERATE"`, then a
/// registered layout, then `fallback`.
pub fn find_ui_schema(
    registry: &UiSchemaRegistry,
    schema: &Value,
    scope: &str,
    path: &str,
    fallback: &dyn Fn() -> UiSchemaNode,
    control: Option<&UiSchemaNode>,
) -> UiSchemaNode {
    if let Some(detail) = control.and_then(|c| c.option("detail")) {
        match detail {
            Value::String(s) if s.eq_ignore_ascii_case("GENERATE") => return fallback(),
            Value::Object(obj) if obj.get("type").is_some_and(Value::is_string) => {
                if let Ok(inline) = serde_json::from_value::<UiSchemaNode>(detail.clone()) {
                    return inline;
                }
            }
            _ => {}
        }
    }

    match registry.find_matching(schema, scope, path) {
        Some(found) => found.clone(),
        None => fallback(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generate_object_layout() {
        let schema = json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "a/b": { "type": "string" },
                "age": { "type": "integer" }
            }
        });
        let ui = generate_ui_schema(&schema, UiType::VerticalLayout, &schema);
        assert_eq!(ui.kind, UiType::VerticalLayout);
        let scopes: Vec<_> = ui.elements.iter().map(|e| e.scope.clone().unwrap()).collect();
        assert_eq!(scopes, vec!["#/properties/name", "#/properties/a~1b", "#/properties/age"]);
    }

    #[test]
    fn test_generate_primitive_control() {
        let schema = json!({ "type": "string" });
        let ui = generate_ui_schema(&schema, UiType::VerticalLayout, &schema);
        assert_eq!(ui, UiSchemaNode::control("#"));
    }

    #[test]
    fn test_find_prefers_inline_detail() {
        let control = UiSchemaNode::control("#/properties/address").with_option(
            "detail",
            json!({ "type": "HorizontalLayout", "elements": [] }),
        );
        let registry = UiSchemaRegistry::new();
        let fallback = || UiSchemaNode::new(UiType::Group);
        let ui = find_ui_schema(&registry, &json!({}), "#/properties/address", "address", &fallback, Some(&control));
        assert_eq!(ui.kind, UiType::HorizontalLayout);
    }

    #[test]
    fn test_find_generate_skips_registry() {
        let control = UiSchemaNode::control("#/properties/x").with_option("detail", json!("GENERATE"));
        let mut registry = UiSchemaRegistry::new();
        registry.register(|_, _, _| Some(5), UiSchemaNode::new(UiType::HorizontalLayout));
        let fallback = || UiSchemaNode::new(UiType::Group);
        let ui = find_ui_schema(&registry, &json!({}), "#/properties/x", "x", &fallback, Some(&control));
        assert_eq!(ui.kind, UiType::Group);
    }

    #[test]
    fn test_registry_picks_highest_rank() {
        let mut registry = UiSchemaRegistry::new();
        registry
            .register(|_, _, _| Some(1), UiSchemaNode::new(UiType::VerticalLayout))
            .register(|_, scope, _| (scope == "#/properties/x").then_some(3), UiSchemaNode::new(UiType::Group))
            .register(|_, _, _| Some(3), UiSchemaNode::new(UiType::HorizontalLayout))
            .register(|_, _, _| None, UiSchemaNode::new(UiType::Category));

        let found = registry.find_matching(&json!({}), "#/properties/x", "x").unwrap();
        assert_eq!(found.kind, UiType::Group);
        let found = registry.find_matching(&json!({}), "#/properties/y", "y").unwrap();
        assert_eq!(found.kind, UiType::HorizontalLayout);
    }
}

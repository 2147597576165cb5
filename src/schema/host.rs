//! Host capabilities consumed by the dispatch core
//!
//! Testers and renderers never touch schema resolution, path composition or
//! layout generation directly; they go through a [`SchemaHost`]. The default
//! [`JsonFormsHost`] wires in this crate's implementations, and tests can
//! substitute a fake by overriding individual methods.

use serde_json::Value;

use crate::core::path::compose_paths;
use crate::core::uischema::{UiSchemaNode, UiType};
use crate::schema::defaults;
use crate::schema::generate::{self, UiSchemaRegistry};
use crate::schema::resolver::{self, ResolveError};

pub trait SchemaHost: Send + Sync {
    /// Resolve `scope` against `schema`, following `$ref`s into `root`
    fn resolve_schema<'a>(
        &self,
        schema: &'a Value,
        scope: &str,
        root: &'a Value,
    ) -> Result<&'a Value, ResolveError> {
        resolver::resolve_schema(schema, scope, root)
    }

    fn compose_path(&self, parent: &str, segment: &str) -> String {
        compose_paths(parent, segment)
    }

    fn create_default_value(&self, schema: &Value, root: &Value) -> Value {
        defaults::create_default_value(schema, root)
    }

    fn generate_ui_schema(&self, schema: &Value, layout: UiType, root: &Value) -> UiSchemaNode {
        generate::generate_ui_schema(schema, layout, root)
    }

    fn find_ui_schema(
        &self,
        registry: &UiSchemaRegistry,
        schema: &Value,
        scope: &str,
        path: &str,
        fallback: &dyn Fn() -> UiSchemaNode,
        control: Option<&UiSchemaNode>,
    ) -> UiSchemaNode {
        generate::find_ui_schema(registry, schema, scope, path, fallback, control)
    }
}

/// The built-in host
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormsHost;

impl SchemaHost for JsonFormsHost {}

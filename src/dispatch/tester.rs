//! Testers - pure predicates deciding whether a renderer applies
//!
//! A tester sees the UI Schema element, the schema it is rendered against and
//! a [`TesterContext`]. Testers never fail: a scope or `$ref` that does not
//! resolve simply means "not applicable".

use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

use crate::core::uischema::{UiSchemaNode, UiType};
use crate::schema::host::SchemaHost;
use crate::schema::resolver::deref;
use crate::schema::types::has_type;

/// What a tester may consult beyond its two inputs
#[derive(Clone, Copy)]
pub struct TesterContext<'a> {
    /// Root schema for `$ref` resolution; preferred over the local schema
    pub root_schema: Option<&'a Value>,
    pub host: &'a dyn SchemaHost,
}

impl<'a> TesterContext<'a> {
    pub fn new(root_schema: Option<&'a Value>, host: &'a dyn SchemaHost) -> Self {
        Self { root_schema, host }
    }

    /// Resolve the schema a control is bound to, if it is a control at all
    pub fn control_schema<'s>(&self, uischema: &UiSchemaNode, schema: &'s Value) -> Option<&'s Value>
    where
        'a: 's,
    {
        if !uischema.is_control() {
            return None;
        }
        let scope = uischema.scope.as_deref()?;
        let root = self.root_schema.unwrap_or(schema);
        match self.host.resolve_schema(schema, scope, root) {
            Ok(resolved) => Some(resolved),
            Err(err) => {
                trace!(scope, %err, "scope does not resolve");
                None
            }
        }
    }
}

impl fmt::Debug for TesterContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TesterContext")
            .field("root_schema", &self.root_schema.is_some())
            .finish()
    }
}

type TestFn = dyn Fn(&UiSchemaNode, &Value, &TesterContext<'_>) -> bool + Send + Sync;

/// A named, shareable predicate
#[derive(Clone)]
pub struct Tester {
    name: Cow<'static, str>,
    test: Arc<TestFn>,
}

impl Tester {
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        test: impl Fn(&UiSchemaNode, &Value, &TesterContext<'_>) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            test: Arc::new(test),
        }
    }

    /// Name used in diagnostics (`sfr explain`, `sfr renderers`)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn test(&self, uischema: &UiSchemaNode, schema: &Value, cx: &TesterContext<'_>) -> bool {
        (self.test)(uischema, schema, cx)
    }

    /// Same predicate under a different diagnostic name
    pub fn named(self, name: impl Into<Cow<'static, str>>) -> Tester {
        Tester {
            name: name.into(),
            test: self.test,
        }
    }

    /// Logical AND; `other` is only evaluated when `self` holds
    pub fn and(self, other: Tester) -> Tester {
        let name = format!("{} && {}", self.name, other.name);
        Tester::new(name, move |ui, schema, cx| {
            self.test(ui, schema, cx) && other.test(ui, schema, cx)
        })
    }
}

impl fmt::Debug for Tester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tester").field(&self.name).finish()
    }
}

/// Tester over the schema a control is bound to
pub fn schema_matches(
    name: impl Into<Cow<'static, str>>,
    predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
) -> Tester {
    Tester::new(name, move |ui, schema, cx| {
        cx.control_schema(ui, schema).is_some_and(|resolved| predicate(resolved))
    })
}

pub fn ui_type_is(kind: UiType) -> Tester {
    Tester::new(format!("uiTypeIs({})", kind), move |ui, _, _| ui.kind == kind)
}

pub fn schema_type_is(expected: &'static str) -> Tester {
    schema_matches(format!("schemaTypeIs({})", expected), move |s| has_type(s, expected))
}

/// String control whose schema declares `format`
pub fn format_is(format: &'static str) -> Tester {
    schema_matches(format!("formatIs({})", format), move |s| {
        has_type(s, "string") && s.get("format").and_then(Value::as_str) == Some(format)
    })
}

pub fn option_is(key: &'static str, value: Value) -> Tester {
    Tester::new(format!("optionIs({}={})", key, value), move |ui, _, _| {
        ui.option(key) == Some(&value)
    })
}

pub fn is_control() -> Tester {
    ui_type_is(UiType::Control)
}

pub fn is_string_control() -> Tester {
    schema_type_is("string").named("isStringControl")
}

pub fn is_number_control() -> Tester {
    schema_type_is("number").named("isNumberControl")
}

pub fn is_integer_control() -> Tester {
    schema_type_is("integer").named("isIntegerControl")
}

pub fn is_boolean_control() -> Tester {
    schema_type_is("boolean").named("isBooleanControl")
}

pub fn is_object_control() -> Tester {
    schema_type_is("object").named("isObjectControl")
}

/// String control asking for a multi-line editor (`options.multi`)
pub fn is_multi_line_control() -> Tester {
    let multi = Tester::new("multi", |ui, _, _| ui.option_bool("multi"));
    schema_type_is("string").and(multi).named("isMultiLineControl")
}

/// Non-empty `enum`, or a non-empty `oneOf` made only of `{const}` entries
pub fn is_enum_schema(schema: &Value) -> bool {
    if schema.get("enum").and_then(Value::as_array).is_some_and(|e| !e.is_empty()) {
        return true;
    }
    schema
        .get("oneOf")
        .and_then(Value::as_array)
        .is_some_and(|entries| {
            !entries.is_empty()
                && entries
                    .iter()
                    .all(|entry| entry.as_object().is_some_and(|o| o.contains_key("const")))
        })
}

pub fn is_enum_control() -> Tester {
    schema_matches("isEnumControl", is_enum_schema)
}

/// Array control whose single `items` schema is an enum
///
/// Tuple-form `items` (an array of schemas) and non-object `items` are
/// rejected. `$ref`s in `items` are resolved against the root schema.
pub fn is_multi_enum_control() -> Tester {
    Tester::new("isMultiEnumControl", |ui, schema, cx| {
        let Some(resolved) = cx.control_schema(ui, schema) else {
            return false;
        };
        if resolved.get("type").and_then(Value::as_str) != Some("array") {
            return false;
        }
        let Some(items) = resolved.get("items") else {
            return false;
        };
        if !items.is_object() {
            return false;
        }
        let root = cx.root_schema.unwrap_or(schema);
        match deref(items, root) {
            Ok(items) => is_enum_schema(items),
            Err(err) => {
                trace!(%err, "items reference does not resolve");
                false
            }
        }
    })
}

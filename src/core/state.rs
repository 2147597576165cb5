//! Derived per-render state for controls and layouts
//!
//! Nothing here is stored: a [`ControlState`] is computed from the dispatch
//! props and the render context, handed to one renderer, then dropped.

use serde_json::Value;

use crate::core::path::{decode_segment, resolve_data, to_data_path, to_data_path_segments};
use crate::core::rules::{is_enabled, is_visible, Enablement};
use crate::core::uischema::{LabelSpec, UiSchemaNode};
use crate::dispatch::{DispatchProps, RenderContext};
use crate::renderers::util::trimmed_or_none;
use crate::schema::resolver::{deref, resolve_schema};

static NULL: Value = Value::Null;

/// Everything a control renderer reads
#[derive(Debug, Clone)]
pub struct ControlState<'a> {
    pub uischema: &'a UiSchemaNode,
    /// Schema the control is bound to, `$ref`s resolved; `null` when the scope is dangling
    pub schema: &'a Value,
    pub root_schema: &'a Value,
    /// Value at `path`; `None` when absent
    pub data: Option<&'a Value>,
    pub path: String,
    pub label: String,
    pub description: Option<String>,
    pub required: bool,
    pub enabled: bool,
    pub visible: bool,
    /// Validation messages for `path`, newline separated
    pub errors: String,
}

impl<'a> ControlState<'a> {
    pub fn derive(props: &DispatchProps<'a>, cx: &RenderContext<'a>) -> Self {
        let uischema = props.uischema;
        let scope = uischema.scope.as_deref().unwrap_or("#");
        let schema = cx
            .host
            .resolve_schema(props.schema, scope, cx.root_schema)
            .unwrap_or(&NULL);
        let path = cx.host.compose_path(props.path, &to_data_path(scope));

        let visible = is_visible(uischema, cx.data, props.path, props.visible, cx.host);
        let enabled = is_enabled(
            Enablement {
                form_readonly: cx.options.readonly,
                uischema,
                schema: Some(schema),
                parent_enabled: props.enabled,
            },
            cx.data,
            props.path,
            cx.host,
        );

        let errors = if cx.options.validation_mode.shows_errors() {
            cx.errors.at(&path).unwrap_or_default()
        } else {
            String::new()
        };

        Self {
            uischema,
            schema,
            root_schema: cx.root_schema,
            data: resolve_data(cx.data, &path),
            label: derive_label(uischema, schema, scope),
            description: schema.get("description").and_then(Value::as_str).map(str::to_string),
            required: is_required(props.schema, scope, cx.root_schema),
            path,
            enabled,
            visible,
            errors,
        }
    }

    pub fn scope(&self) -> &str {
        self.uischema.scope.as_deref().unwrap_or("#")
    }

    /// Trimmed error text; blank means no error
    pub fn error_message(&self) -> Option<String> {
        trimmed_or_none(&self.errors)
    }
}

/// Everything a layout renderer reads
#[derive(Debug, Clone)]
pub struct LayoutState<'a> {
    pub uischema: &'a UiSchemaNode,
    pub schema: &'a Value,
    pub path: &'a str,
    pub label: Option<String>,
    pub enabled: bool,
    pub visible: bool,
}

impl<'a> LayoutState<'a> {
    pub fn derive(props: &DispatchProps<'a>, cx: &RenderContext<'a>) -> Self {
        let uischema = props.uischema;
        Self {
            uischema,
            schema: props.schema,
            path: props.path,
            label: uischema.label_text().and_then(trimmed_or_none),
            enabled: is_enabled(
                Enablement {
                    form_readonly: cx.options.readonly,
                    uischema,
                    schema: None,
                    parent_enabled: props.enabled,
                },
                cx.data,
                props.path,
                cx.host,
            ),
            visible: is_visible(uischema, cx.data, props.path, props.visible, cx.host),
        }
    }
}

/// Label of a control
///
/// An explicit string wins and `false` blanks it; otherwise the schema title,
/// otherwise the start-cased property name.
pub fn derive_label(uischema: &UiSchemaNode, schema: &Value, scope: &str) -> String {
    match &uischema.label {
        Some(LabelSpec::Text(text)) => text.clone(),
        Some(LabelSpec::Shown(false)) => String::new(),
        _ => match schema.get("title").and_then(Value::as_str) {
            Some(title) => title.to_string(),
            None => to_data_path_segments(scope)
                .last()
                .map(|name| start_case(name))
                .unwrap_or_default(),
        },
    }
}

/// `firstName` / `first_name` / `first-name` → `First Name`
pub fn start_case(input: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for c in input.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev = None;
            continue;
        }
        let boundary = match prev {
            Some(p) => {
                (p.is_lowercase() && c.is_uppercase())
                    || (p.is_alphabetic() && c.is_numeric())
                    || (p.is_numeric() && c.is_alphabetic())
            }
            None => false,
        };
        if boundary && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
        prev = Some(c);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether the parent object schema lists the scoped property as required
pub fn is_required(schema: &Value, scope: &str, root: &Value) -> bool {
    let mut segments = scope.rsplitn(3, '/');
    let (Some(name), Some("properties"), Some(parent_scope)) = (segments.next(), segments.next(), segments.next())
    else {
        return false;
    };

    let parent = match parent_scope {
        "#" | "" => deref(schema, root).ok(),
        _ => resolve_schema(schema, parent_scope, root).ok(),
    };
    let name = decode_segment(name);
    parent
        .and_then(|p| p.get("required"))
        .and_then(Value::as_array)
        .is_some_and(|req| req.iter().any(|r| r.as_str() == Some(name.as_str())))
}

//! Rule evaluation - conditional visibility and enablement

use serde_json::Value;
use tracing::trace;

use crate::core::path::{resolve_data, to_data_path};
use crate::core::uischema::{ComposedKind, Condition, Rule, RuleEffect, UiSchemaNode};
use crate::schema::host::SchemaHost;
use crate::schema::validator::matches_schema;

/// Evaluate a rule condition against the form data
///
/// Condition scopes are data paths relative to `path`, the data path of the
/// element carrying the rule.
pub fn evaluate_condition(condition: &Condition, data: &Value, path: &str, host: &dyn SchemaHost) -> bool {
    match condition {
        Condition::Composed { kind: ComposedKind::Or, conditions } => {
            conditions.iter().any(|c| evaluate_condition(c, data, path, host))
        }
        Condition::Composed { kind: ComposedKind::And, conditions } => {
            conditions.iter().all(|c| evaluate_condition(c, data, path, host))
        }
        Condition::Leaf { scope, expected_value } => {
            let target = host.compose_path(path, &to_data_path(scope));
            resolve_data(data, &target) == Some(expected_value)
        }
        Condition::Schema {
            scope,
            schema,
            fail_when_undefined,
        } => {
            let target = host.compose_path(path, &to_data_path(scope));
            match resolve_data(data, &target) {
                Some(value) => matches_schema(schema, value),
                None if *fail_when_undefined => false,
                None => matches_schema(schema, &Value::Null),
            }
        }
    }
}

fn evaluate(rule: &Rule, data: &Value, path: &str, host: &dyn SchemaHost) -> bool {
    let holds = evaluate_condition(&rule.condition, data, path, host);
    trace!(effect = ?rule.effect, holds, path, "rule evaluated");
    match rule.effect {
        RuleEffect::Show | RuleEffect::Enable => holds,
        RuleEffect::Hide | RuleEffect::Disable => !holds,
    }
}

/// Visibility of an element
///
/// A HIDE/SHOW rule decides; without one the inherited value applies.
pub fn is_visible(
    uischema: &UiSchemaNode,
    data: &Value,
    path: &str,
    inherited: Option<bool>,
    host: &dyn SchemaHost,
) -> bool {
    match &uischema.rule {
        Some(rule) if rule.effect.affects_visibility() => evaluate(rule, data, path, host),
        _ => inherited.unwrap_or(true),
    }
}

/// Outcome of an ENABLE/DISABLE rule, if the element carries one
pub fn rule_enablement(uischema: &UiSchemaNode, data: &Value, path: &str, host: &dyn SchemaHost) -> Option<bool> {
    match &uischema.rule {
        Some(rule) if !rule.effect.affects_visibility() => Some(evaluate(rule, data, path, host)),
        _ => None,
    }
}

/// Inputs to [`is_enabled`]
#[derive(Debug, Clone, Copy)]
pub struct Enablement<'a> {
    pub form_readonly: bool,
    pub uischema: &'a UiSchemaNode,
    pub schema: Option<&'a Value>,
    pub parent_enabled: bool,
}

/// Enablement of an element
///
/// First decisive source wins: form readonly, `options.readonly`, an
/// ENABLE/DISABLE rule, schema `readOnly`, then the parent.
pub fn is_enabled(input: Enablement<'_>, data: &Value, path: &str, host: &dyn SchemaHost) -> bool {
    if input.form_readonly {
        return false;
    }
    if let Some(readonly) = input.uischema.option("readonly").and_then(Value::as_bool) {
        return !readonly;
    }
    if let Some(enabled) = rule_enablement(input.uischema, data, path, host) {
        return enabled;
    }
    if let Some(readonly) = input.schema.and_then(|s| s.get("readOnly")).and_then(Value::as_bool) {
        return !readonly;
    }
    input.parent_enabled
}

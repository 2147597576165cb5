//! UI Schema model - layouts, controls, labels and rules

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// UI Schema element types
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UiType {
    /// Bound to exactly one value in the data
    Control,
    VerticalLayout,
    HorizontalLayout,
    /// Labelled layout
    Group,
    /// Set of categories (tabs)
    Categorization,
    /// One tab of a categorization
    Category,
    /// Static text
    Label,
    /// Anything else; kept verbatim so no renderer matches it
    Other(String),
}

impl UiType {
    /// Get the string representation used in UI Schema documents
    pub fn as_str(&self) -> &str {
        match self {
            UiType::Control => "Control",
            UiType::VerticalLayout => "VerticalLayout",
            UiType::HorizontalLayout => "HorizontalLayout",
            UiType::Group => "Group",
            UiType::Categorization => "Categorization",
            UiType::Category => "Category",
            UiType::Label => "Label",
            UiType::Other(s) => s,
        }
    }

    /// Layouts carry elements but no value
    pub fn is_layout(&self) -> bool {
        matches!(
            self,
            UiType::VerticalLayout
                | UiType::HorizontalLayout
                | UiType::Group
                | UiType::Categorization
                | UiType::Category
        )
    }
}

impl From<String> for UiType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Control" => UiType::Control,
            "VerticalLayout" => UiType::VerticalLayout,
            "HorizontalLayout" => UiType::HorizontalLayout,
            "Group" => UiType::Group,
            "Categorization" => UiType::Categorization,
            "Category" => UiType::Category,
            "Label" => UiType::Label,
            _ => UiType::Other(s),
        }
    }
}

impl From<UiType> for String {
    fn from(t: UiType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for UiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `label` may be a string or a boolean (`false` hides the derived label)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelSpec {
    Text(String),
    Shown(bool),
}

/// A UI Schema element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSchemaNode {
    #[serde(rename = "type")]
    pub kind: UiType,

    /// JSON pointer into the data schema (controls only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<LabelSpec>,

    /// Text of a `Label` element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Free-form rendering hints
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<UiSchemaNode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<Rule>,
}

impl UiSchemaNode {
    /// Create an element of the given type with nothing else set
    pub fn new(kind: UiType) -> Self {
        Self {
            kind,
            scope: None,
            label: None,
            text: None,
            options: Map::new(),
            elements: Vec::new(),
            rule: None,
        }
    }

    /// Create a control bound to `scope`
    pub fn control(scope: impl Into<String>) -> Self {
        Self {
            scope: Some(scope.into()),
            ..Self::new(UiType::Control)
        }
    }

    /// Create a layout holding `elements`
    pub fn layout(kind: UiType, elements: Vec<UiSchemaNode>) -> Self {
        Self {
            elements,
            ..Self::new(kind)
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(LabelSpec::Text(label.into()));
        self
    }

    pub fn with_option(mut self, key: &str, value: Value) -> Self {
        self.options.insert(key.to_string(), value);
        self
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rule = Some(rule);
        self
    }

    pub fn is_control(&self) -> bool {
        self.kind == UiType::Control
    }

    /// Explicit label text, if the element carries one
    pub fn label_text(&self) -> Option<&str> {
        match &self.label {
            Some(LabelSpec::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(Value::as_str)
    }

    pub fn option_bool(&self, key: &str) -> bool {
        self.options.get(key).and_then(Value::as_bool).unwrap_or(false)
    }
}

/// Conditional visibility / enablement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub effect: RuleEffect,
    pub condition: Condition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleEffect {
    Hide,
    Show,
    Enable,
    Disable,
}

impl RuleEffect {
    pub fn affects_visibility(self) -> bool {
        matches!(self, RuleEffect::Hide | RuleEffect::Show)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComposedKind {
    Or,
    And,
}

/// Rule condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Condition {
    Composed {
        #[serde(rename = "type")]
        kind: ComposedKind,
        conditions: Vec<Condition>,
    },
    Schema {
        scope: String,
        schema: Value,
        #[serde(default, rename = "failWhenUndefined")]
        fail_when_undefined: bool,
    },
    /// Legacy `{scope, expectedValue}` form
    Leaf {
        scope: String,
        #[serde(rename = "expectedValue")]
        expected_value: Value,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_layout_with_controls() {
        let ui: UiSchemaNode = serde_json::from_value(json!({
            "type": "VerticalLayout",
            "elements": [
                { "type": "Control", "scope": "#/properties/a", "label": "A" },
                { "type": "Control", "scope": "#/properties/b", "label": false }
            ]
        }))
        .unwrap();

        assert_eq!(ui.kind, UiType::VerticalLayout);
        assert_eq!(ui.elements.len(), 2);
        assert_eq!(ui.elements[0].label_text(), Some("A"));
        assert_eq!(ui.elements[1].label, Some(LabelSpec::Shown(false)));
        assert_eq!(ui.elements[1].scope.as_deref(), Some("#/properties/b"));
    }

    #[test]
    fn test_unknown_type_is_preserved() {
        let ui: UiSchemaNode = serde_json::from_value(json!({ "type": "ListWithDetail" })).unwrap();
        assert_eq!(ui.kind, UiType::Other("ListWithDetail".to_string()));
        assert_eq!(serde_json::to_value(&ui).unwrap(), json!({ "type": "ListWithDetail" }));
    }

    #[test]
    fn test_parse_rules() {
        let ui: UiSchemaNode = serde_json::from_value(json!({
            "type": "Control",
            "scope": "#/properties/b",
            "rule": {
                "effect": "HIDE",
                "condition": {
                    "type": "OR",
                    "conditions": [
                        { "scope": "#/properties/a", "schema": { "const": true } },
                        { "scope": "#/properties/c", "expectedValue": 3 }
                    ]
                }
            }
        }))
        .unwrap();

        let rule = ui.rule.unwrap();
        assert_eq!(rule.effect, RuleEffect::Hide);
        match rule.condition {
            Condition::Composed { kind, conditions } => {
                assert_eq!(kind, ComposedKind::Or);
                assert!(matches!(conditions[0], Condition::Schema { fail_when_undefined: false, .. }));
                assert!(matches!(conditions[1], Condition::Leaf { .. }));
            }
            other => panic!("expected composed condition, got {:?}", other),
        }
    }

    #[test]
    fn test_option_helpers() {
        let ui = UiSchemaNode::control("#/properties/bio")
            .with_option("multi", json!(true))
            .with_option("childLabelProp", json!("name"));
        assert!(ui.option_bool("multi"));
        assert!(!ui.option_bool("readonly"));
        assert_eq!(ui.option_str("childLabelProp"), Some("name"));
    }
}

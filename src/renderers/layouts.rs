//! Layout renderers
//!
//! Layouts bind no value. They dispatch each element with their own schema,
//! path and enablement and arrange the results in a stack.

use crate::core::state::LayoutState;
use crate::dispatch::{dispatch, DispatchProps, RenderContext};
use crate::renderers::widget::{Direction, TextRole, Widget};

fn stack(
    props: &DispatchProps<'_>,
    cx: &RenderContext<'_>,
    direction: Direction,
    labelled: bool,
) -> Option<Widget> {
    let state = LayoutState::derive(props, cx);
    if !state.visible {
        return None;
    }

    let children = props
        .uischema
        .elements
        .iter()
        .filter_map(|element| {
            let child = DispatchProps {
                enabled: state.enabled,
                ..props.child(element)
            };
            dispatch(&child, cx)
        })
        .collect();

    Some(Widget::Stack {
        direction,
        heading: if labelled { state.label } else { None },
        children,
    })
}

pub fn vertical(props: &DispatchProps<'_>, cx: &RenderContext<'_>) -> Option<Widget> {
    stack(props, cx, Direction::Vertical, false)
}

pub fn horizontal(props: &DispatchProps<'_>, cx: &RenderContext<'_>) -> Option<Widget> {
    stack(props, cx, Direction::Horizontal, false)
}

pub fn group(props: &DispatchProps<'_>, cx: &RenderContext<'_>) -> Option<Widget> {
    stack(props, cx, Direction::Vertical, true)
}

pub fn category(props: &DispatchProps<'_>, cx: &RenderContext<'_>) -> Option<Widget> {
    stack(props, cx, Direction::Vertical, true)
}

/// All categories one after another; each category renders as a labelled section
///
/// The categorization itself has no heading, even when it carries a label.
pub fn categorization(props: &DispatchProps<'_>, cx: &RenderContext<'_>) -> Option<Widget> {
    stack(props, cx, Direction::Vertical, false)
}

/// Static text
pub fn label(props: &DispatchProps<'_>, cx: &RenderContext<'_>) -> Option<Widget> {
    let state = LayoutState::derive(props, cx);
    if !state.visible {
        return None;
    }
    let text = state
        .uischema
        .text
        .clone()
        .or(state.label)
        .unwrap_or_default();
    Some(Widget::text(text, TextRole::Body))
}

#[cfg(test)]
mod tests {
    use crate::core::form::Form;
    use crate::core::uischema::UiSchemaNode;
    use crate::renderers::widget::{Direction, TextRole, Widget};
    use serde_json::{json, Value};

    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "subscribe": { "type": "boolean" },
                "email": { "type": "string" }
            }
        })
    }

    fn render(ui: Value, data: Value) -> Widget {
        let ui: UiSchemaNode = serde_json::from_value(ui).unwrap();
        Form::new(schema(), Some(ui), data).unwrap().render().unwrap()
    }

    #[test]
    fn test_group_heading_and_horizontal_children() {
        let root = render(
            json!({
                "type": "Group",
                "label": "Contact",
                "elements": [{
                    "type": "HorizontalLayout",
                    "elements": [
                        { "type": "Control", "scope": "#/properties/name" },
                        { "type": "Control", "scope": "#/properties/email" }
                    ]
                }]
            }),
            json!({}),
        );
        let Widget::Stack { heading, children, .. } = &root else {
            panic!("expected stack");
        };
        assert_eq!(heading.as_deref(), Some("Contact"));
        assert!(matches!(
            &children[0],
            Widget::Stack { direction: Direction::Horizontal, heading: None, children } if children.len() == 2
        ));
    }

    #[test]
    fn test_categorization_sections() {
        let root = render(
            json!({
                "type": "Categorization",
                "label": "Settings",
                "elements": [
                    { "type": "Category", "label": "Basics", "elements": [{ "type": "Control", "scope": "#/properties/name" }] },
                    { "type": "Category", "label": "Mail", "elements": [{ "type": "Control", "scope": "#/properties/email" }] }
                ]
            }),
            json!({}),
        );
        assert!(matches!(&root, Widget::Stack { heading: None, .. }));
        assert_eq!(root.texts(), vec!["Basics", "Mail"]);
        assert_eq!(root.inputs().len(), 2);
    }

    #[test]
    fn test_label_element() {
        let root = render(
            json!({ "type": "VerticalLayout", "elements": [{ "type": "Label", "text": "Fill in everything" }] }),
            json!({}),
        );
        let Widget::Stack { children, .. } = &root else {
            panic!("expected stack");
        };
        assert_eq!(children[0], Widget::text("Fill in everything", TextRole::Body));
    }

    #[test]
    fn test_rules_hide_and_disable() {
        let ui = json!({
            "type": "VerticalLayout",
            "elements": [
                { "type": "Control", "scope": "#/properties/subscribe" },
                {
                    "type": "Control",
                    "scope": "#/properties/email",
                    "rule": {
                        "effect": "SHOW",
                        "condition": { "scope": "#/properties/subscribe", "schema": { "const": true } }
                    }
                },
                {
                    "type": "Group",
                    "label": "Locked",
                    "rule": {
                        "effect": "DISABLE",
                        "condition": { "scope": "#/properties/subscribe", "schema": { "const": true } }
                    },
                    "elements": [{ "type": "Control", "scope": "#/properties/name" }]
                }
            ]
        });

        let off = render(ui.clone(), json!({ "subscribe": false }));
        assert!(off.find_input("email").is_none());
        assert!(matches!(off.find_input("name"), Some(Widget::Input { disabled: false, .. })));

        let on = render(ui, json!({ "subscribe": true }));
        assert!(on.find_input("email").is_some());
        assert!(matches!(on.find_input("name"), Some(Widget::Input { disabled: true, .. })));
    }

    #[test]
    fn test_hidden_layout_renders_nothing() {
        let ui = json!({
            "type": "Group",
            "label": "Never",
            "rule": { "effect": "HIDE", "condition": { "scope": "#", "schema": {} } },
            "elements": [{ "type": "Control", "scope": "#/properties/name" }]
        });
        let ui: UiSchemaNode = serde_json::from_value(ui).unwrap();
        let form = Form::new(schema(), Some(ui), json!({})).unwrap();
        assert_eq!(form.render(), None);
    }
}

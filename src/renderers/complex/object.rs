//! Object control - renders the object's properties through a detail layout

use crate::core::state::ControlState;
use crate::core::uischema::{LabelSpec, UiSchemaNode, UiType};
use crate::dispatch::{dispatch, DispatchProps, RenderContext};
use crate::renderers::widget::Widget;

pub fn render(props: &DispatchProps<'_>, cx: &RenderContext<'_>) -> Option<Widget> {
    let state = ControlState::derive(props, cx);
    if !state.visible {
        return None;
    }

    let generate = || -> UiSchemaNode {
        let mut generated = cx.host.generate_ui_schema(state.schema, UiType::Group, state.root_schema);
        if state.path.is_empty() {
            generated.kind = UiType::VerticalLayout;
        } else {
            generated.label = Some(LabelSpec::Text(state.label.clone()));
        }
        generated
    };
    let detail = cx.host.find_ui_schema(
        cx.uischemas,
        state.schema,
        state.scope(),
        &state.path,
        &generate,
        Some(state.uischema),
    );

    let child = DispatchProps {
        schema: state.schema,
        uischema: &detail,
        path: &state.path,
        enabled: state.enabled,
        visible: Some(state.visible),
    };
    dispatch(&child, cx)
}

#[cfg(test)]
mod tests {
    use crate::core::form::Form;
    use crate::core::uischema::UiSchemaNode;
    use crate::renderers::widget::{Direction, Widget};
    use crate::schema::generate::UiSchemaRegistry;
    use crate::core::uischema::UiType;
    use serde_json::{json, Value};

    fn address() -> Value {
        json!({
            "type": "object",
            "properties": {
                "street": { "type": "string" },
                "city": { "type": "string" }
            }
        })
    }

    #[test]
    fn test_root_object_renders_flat_vertical_layout() {
        let form = Form::new(address(), Some(UiSchemaNode::control("#")), json!({})).unwrap();
        match form.render().unwrap() {
            Widget::Stack { direction, heading, children } => {
                assert_eq!(direction, Direction::Vertical);
                assert_eq!(heading, None);
                assert_eq!(children.len(), 2);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_nested_object_renders_labelled_group() {
        let schema = json!({
            "type": "object",
            "properties": { "address": address() }
        });
        let ui = UiSchemaNode::layout(
            UiType::VerticalLayout,
            vec![UiSchemaNode::control("#/properties/address").with_label("Home address")],
        );
        let form = Form::new(schema, Some(ui), json!({ "address": { "city": "Oslo" } })).unwrap();
        let root = form.render().unwrap();

        let Widget::Stack { children, .. } = &root else {
            panic!("expected stack");
        };
        match &children[0] {
            Widget::Stack { heading, children, .. } => {
                assert_eq!(heading.as_deref(), Some("Home address"));
                assert_eq!(children.len(), 2);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(root.find_input("address.city"), Some(Widget::Input { value, .. }) if value == "Oslo"));
    }

    #[test]
    fn test_inline_detail_overrides_generator() {
        let schema = json!({ "type": "object", "properties": { "address": address() } });
        let ui: UiSchemaNode = serde_json::from_value(json!({
            "type": "VerticalLayout",
            "elements": [{
                "type": "Control",
                "scope": "#/properties/address",
                "options": {
                    "detail": {
                        "type": "HorizontalLayout",
                        "elements": [{ "type": "Control", "scope": "#/properties/city" }]
                    }
                }
            }]
        }))
        .unwrap();
        let form = Form::new(schema, Some(ui), json!({})).unwrap();
        let root = form.render().unwrap();
        let Widget::Stack { children, .. } = &root else {
            panic!("expected stack");
        };
        assert!(matches!(
            &children[0],
            Widget::Stack { direction: Direction::Horizontal, children, .. } if children.len() == 1
        ));
    }

    #[test]
    fn test_registered_detail_layout() {
        let schema = json!({ "type": "object", "properties": { "address": address() } });
        let mut uischemas = UiSchemaRegistry::new();
        uischemas.register(
            |_, scope, _| (scope == "#/properties/address").then_some(5),
            UiSchemaNode::layout(UiType::HorizontalLayout, vec![UiSchemaNode::control("#/properties/street")]),
        );
        let form = Form::new(schema, None, json!({})).unwrap().with_uischemas(uischemas);
        let root = form.render().unwrap();
        assert!(root.find_input("address.street").is_some());
        assert!(root.find_input("address.city").is_none());
    }
}

//! Multiple-choice select for arrays of enum items

use serde_json::Value;

use super::{binding, form_field, RawInput};
use crate::core::state::ControlState;
use crate::dispatch::{DispatchProps, RenderContext};
use crate::renderers::util::{array_items_schema, enum_options};
use crate::renderers::widget::Widget;
use crate::renderers::RendererKind;

pub fn render(props: &DispatchProps<'_>, cx: &RenderContext<'_>) -> Option<Widget> {
    let state = ControlState::derive(props, cx);
    if !state.visible {
        return None;
    }

    let options = array_items_schema(state.schema, state.root_schema)
        .map(enum_options)
        .unwrap_or_default();
    let selected = match state.data {
        Some(Value::Array(values)) => values.clone(),
        _ => Vec::new(),
    };

    let input = Widget::SelectMenu {
        binding: binding(&state, RendererKind::MultiEnum),
        multiple: true,
        options,
        selected,
        placeholder: cx.options.select_placeholder.clone(),
        disabled: !state.enabled,
        invalid: state.error_message().is_some(),
    };
    Some(form_field(&state, input))
}

/// The whole selection commits; anything but an array becomes `[]`
pub fn commit(raw: RawInput) -> Option<Option<Value>> {
    match raw {
        RawInput::Selections(Value::Array(values)) => Some(Some(Value::Array(values))),
        RawInput::Selections(_) | RawInput::Clear => Some(Some(Value::Array(Vec::new()))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::form::{Form, FormEvent};
    use crate::renderers::controls::test_support::field_child;
    use serde_json::json;

    fn schema() -> Value {
        json!({
            "definitions": { "channel": { "type": "string", "enum": ["video", "audio"] } },
            "type": "object",
            "properties": {
                "channels": { "type": "array", "items": { "$ref": "#/definitions/channel" } }
            }
        })
    }

    #[test]
    fn test_commit_reads_back() {
        let mut form = Form::new(schema(), None, json!({ "channels": "not-an-array" })).unwrap();

        let root = form.render().unwrap();
        let input = root.find_input("channels").unwrap();
        match input {
            Widget::SelectMenu { options, selected, multiple, .. } => {
                assert!(*multiple);
                assert_eq!(options.len(), 2);
                assert!(selected.is_empty());
            }
            other => panic!("unexpected {:?}", other),
        }

        let binding = input.binding().unwrap().clone();
        form.apply(FormEvent::Input { binding, raw: RawInput::Selections(json!(["audio"])) });
        assert_eq!(form.data(), &json!({ "channels": ["audio"] }));

        let root = form.render().unwrap();
        let Widget::Stack { children, .. } = &root else {
            panic!("expected stack");
        };
        assert!(matches!(
            field_child(&children[0]),
            Widget::SelectMenu { selected, .. } if selected == &vec![json!("audio")]
        ));
    }

    #[test]
    fn test_commit_non_array_becomes_empty() {
        assert_eq!(commit(RawInput::Selections(json!("audio"))), Some(Some(json!([]))));
        assert_eq!(commit(RawInput::Clear), Some(Some(json!([]))));
        assert_eq!(commit(RawInput::Text("audio".into())), None);
    }
}

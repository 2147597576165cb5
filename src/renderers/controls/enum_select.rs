//! Single-choice select for `enum` and `oneOf`/`const` schemas

use serde_json::Value;

use super::{binding, form_field, RawInput};
use crate::core::state::ControlState;
use crate::dispatch::{DispatchProps, RenderContext};
use crate::renderers::util::enum_options;
use crate::renderers::widget::Widget;
use crate::renderers::RendererKind;

pub fn render(props: &DispatchProps<'_>, cx: &RenderContext<'_>) -> Option<Widget> {
    let state = ControlState::derive(props, cx);
    if !state.visible {
        return None;
    }

    let selected = match state.data {
        None | Some(Value::Null) => Vec::new(),
        Some(value) => vec![value.clone()],
    };

    let input = Widget::SelectMenu {
        binding: binding(&state, RendererKind::Enum),
        multiple: false,
        options: enum_options(state.schema),
        selected,
        placeholder: cx.options.select_placeholder.clone(),
        disabled: !state.enabled,
        invalid: state.error_message().is_some(),
    };
    Some(form_field(&state, input))
}

/// The chosen option value commits as-is
pub fn commit(raw: RawInput) -> Option<Option<Value>> {
    match raw {
        RawInput::Selection(value) => Some(value),
        RawInput::Clear => Some(None),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderers::controls::test_support::{field_child, render_field};
    use crate::renderers::util::EnumOption;
    use serde_json::json;

    #[test]
    fn test_comma_in_enum_value_yields_two_options() {
        let schema = json!({
            "type": "object",
            "properties": { "kind": { "type": "string", "enum": ["video", "video,audio"] } }
        });
        let field = render_field(schema, None, json!({ "kind": "video,audio" }));
        match field_child(&field) {
            Widget::SelectMenu { options, selected, multiple, placeholder, .. } => {
                assert_eq!(options.len(), 2);
                assert_eq!(options[0], EnumOption { label: "video".into(), value: json!("video") });
                assert_eq!(options[1].value, json!("video,audio"));
                assert_eq!(selected, &vec![json!("video,audio")]);
                assert!(!multiple);
                assert_eq!(placeholder, "Select...");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_one_of_titles() {
        let schema = json!({
            "type": "object",
            "properties": {
                "level": { "oneOf": [{ "const": 1, "title": "Low" }, { "const": 2, "title": "" }] }
            }
        });
        let field = render_field(schema, None, json!({}));
        match field_child(&field) {
            Widget::SelectMenu { options, selected, .. } => {
                let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
                assert_eq!(labels, vec!["Low", "2"]);
                assert!(selected.is_empty());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_commit_raw_value() {
        assert_eq!(commit(RawInput::Selection(Some(json!(2)))), Some(Some(json!(2))));
        assert_eq!(commit(RawInput::Selection(None)), Some(None));
        assert_eq!(commit(RawInput::Text("2".into())), None);
    }
}

//! Single-line text control

use serde_json::Value;

use super::{binding, display_text, form_field, RawInput};
use crate::core::state::ControlState;
use crate::dispatch::{DispatchProps, RenderContext};
use crate::renderers::widget::{InputType, Widget};
use crate::renderers::RendererKind;

pub fn render(props: &DispatchProps<'_>, cx: &RenderContext<'_>) -> Option<Widget> {
    let state = ControlState::derive(props, cx);
    if !state.visible {
        return None;
    }

    let input = Widget::Input {
        binding: binding(&state, RendererKind::Text),
        value: display_text(state.data),
        input_type: InputType::Text,
        inputmode: None,
        step: None,
        autocomplete: None,
        disabled: !state.enabled,
        invalid: state.error_message().is_some(),
        trailing: None,
    };
    Some(form_field(&state, input))
}

/// Text passes through untouched; shared by textarea and password
pub fn commit(raw: RawInput) -> Option<Option<Value>> {
    match raw {
        RawInput::Text(text) => Some(Some(Value::String(text))),
        RawInput::Clear => Some(None),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderers::controls::test_support::{field_child, render_field};
    use serde_json::json;

    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": { "name": { "type": "string", "minLength": 3, "description": "Full name" } },
            "required": ["name"]
        })
    }

    #[test]
    fn test_renders_field_with_value() {
        let field = render_field(schema(), None, json!({ "name": "Alice" }));
        match &field {
            Widget::FormField { label, description, required, error, .. } => {
                assert_eq!(label, "Name");
                assert_eq!(description.as_deref(), Some("Full name"));
                assert!(*required);
                assert_eq!(error, &None);
            }
            other => panic!("unexpected {:?}", other),
        }
        match field_child(&field) {
            Widget::Input { value, input_type, invalid, binding, .. } => {
                assert_eq!(value, "Alice");
                assert_eq!(*input_type, InputType::Text);
                assert!(!invalid);
                assert_eq!(binding.path, "name");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_error_marks_input_invalid() {
        let field = render_field(schema(), None, json!({ "name": "Al" }));
        let Widget::FormField { error, child, .. } = &field else {
            panic!("expected form field");
        };
        assert_eq!(error.as_deref(), Some("must NOT have fewer than 3 characters"));
        assert!(matches!(child.as_ref(), Widget::Input { invalid: true, .. }));
    }

    #[test]
    fn test_absent_value_reads_empty() {
        let field = render_field(schema(), None, json!({}));
        assert!(matches!(field_child(&field), Widget::Input { value, .. } if value.is_empty()));
    }

    #[test]
    fn test_commit_passes_text_through() {
        assert_eq!(commit(RawInput::Text("  spaced ".into())), Some(Some(json!("  spaced "))));
        assert_eq!(commit(RawInput::Clear), Some(None));
        assert_eq!(commit(RawInput::Bool(true)), None);
    }
}

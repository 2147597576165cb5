//! Integer control

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
        binding: binding(&state, RendererKind::Integer),
        value: display_text(state.data),
        input_type: InputType::Number,
        inputmode: Some("numeric".to_string()),
        step: Some("1".to_string()),
        autocomplete: None,
        disabled: !state.enabled,
        invalid: state.error_message().is_some(),
        trailing: None,
    };
    Some(form_field(&state, input))
}

/// Strict base-10 parse of the trimmed text
///
/// Blank input and anything that is not a whole number (`"4.2"`, `"12px"`)
/// remove the value rather than truncating it.
pub fn commit(raw: RawInput) -> Option<Option<Value>> {
    match raw {
        RawInput::Text(text) => Some(parse(&text).map(Value::from)),
        RawInput::Clear => Some(None),
        _ => None,
    }
}

fn parse(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderers::controls::test_support::{field_child, render_field};
    use serde_json::json;

    #[test]
    fn test_commit() {
        assert_eq!(commit(RawInput::Text("".into())), Some(None));
        assert_eq!(commit(RawInput::Text("   ".into())), Some(None));
        assert_eq!(commit(RawInput::Text("42".into())), Some(Some(json!(42))));
        assert_eq!(commit(RawInput::Text(" -7 ".into())), Some(Some(json!(-7))));
        assert_eq!(commit(RawInput::Text("4.2".into())), Some(None));
        assert_eq!(commit(RawInput::Text("3.7".into())), Some(None));
        assert_eq!(commit(RawInput::Text("12px".into())), Some(None));
        assert_eq!(commit(RawInput::Bool(true)), None);
    }

    #[test]
    fn test_renders_numeric_input() {
        let schema = json!({ "type": "object", "properties": { "age": { "type": "integer" } } });
        let field = render_field(schema, None, json!({ "age": 30 }));
        match field_child(&field) {
            Widget::Input { value, input_type, inputmode, step, .. } => {
                assert_eq!(value, "30");
                assert_eq!(*input_type, InputType::Number);
                assert_eq!(inputmode.as_deref(), Some("numeric"));
                assert_eq!(step.as_deref(), Some("1"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}

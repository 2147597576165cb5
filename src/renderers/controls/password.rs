//! Password control with a reveal toggle
//!
//! The masked/plain state is local UI state held by the form, keyed by the
//! control's data path.

use super::{binding, display_text, form_field};
use crate::core::state::ControlState;
use crate::dispatch::{DispatchProps, RenderContext};
use crate::renderers::widget::{Action, InputType, Widget};
use crate::renderers::RendererKind;

pub fn render(props: &DispatchProps<'_>, cx: &RenderContext<'_>) -> Option<Widget> {
    let state = ControlState::derive(props, cx);
    if !state.visible {
        return None;
    }

    let revealed = cx.local.is_revealed(&state.path);
    let toggle = Widget::Button {
        label: if revealed { "Hide password" } else { "Show password" }.to_string(),
        action: Action::TogglePassword {
            path: state.path.clone(),
        },
        disabled: !state.enabled,
        pressed: Some(revealed),
    };

    let input = Widget::Input {
        binding: binding(&state, RendererKind::Password),
        value: display_text(state.data),
        input_type: if revealed { InputType::Text } else { InputType::Password },
        inputmode: None,
        step: None,
        autocomplete: Some("current-password".to_string()),
        disabled: !state.enabled,
        invalid: state.error_message().is_some(),
        trailing: Some(Box::new(toggle)),
    };
    Some(form_field(&state, input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::form::{Form, FormEvent, FormOptions};
    use crate::renderers::controls::test_support::field_child;
    use serde_json::{json, Value};

    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": { "secret": { "type": "string", "format": "password" } }
        })
    }

    fn input(form: &Form) -> Widget {
        form.render().unwrap().find_input("secret").unwrap().clone()
    }

    #[test]
    fn test_toggle_reveals_and_masks() {
        let mut form = Form::new(schema(), None, json!({ "secret": "hunter2" })).unwrap();

        let masked = input(&form);
        let Widget::Input { input_type, autocomplete, trailing, value, .. } = &masked else {
            panic!("expected input");
        };
        assert_eq!(*input_type, InputType::Password);
        assert_eq!(autocomplete.as_deref(), Some("current-password"));
        assert_eq!(value, "hunter2");
        let Some(Widget::Button { label, action, pressed, .. }) = trailing.as_deref() else {
            panic!("expected toggle button");
        };
        assert_eq!(label, "Show password");
        assert_eq!(*pressed, Some(false));

        form.apply(FormEvent::Action(action.clone()));
        let plain = input(&form);
        let Widget::Input { input_type, trailing, .. } = &plain else {
            panic!("expected input");
        };
        assert_eq!(*input_type, InputType::Text);
        assert!(matches!(
            trailing.as_deref(),
            Some(Widget::Button { label, pressed: Some(true), .. }) if label == "Hide password"
        ));
        assert_eq!(form.data(), &json!({ "secret": "hunter2" }));
    }

    #[test]
    fn test_toggle_disabled_with_control() {
        let options = FormOptions {
            readonly: true,
            ..FormOptions::default()
        };
        let form = Form::new(schema(), None, json!({})).unwrap().with_options(options);
        let root = form.render().unwrap();
        let Widget::Stack { children, .. } = &root else {
            panic!("expected stack");
        };
        match field_child(&children[0]) {
            Widget::Input { disabled, trailing, .. } => {
                assert!(*disabled);
                assert!(matches!(trailing.as_deref(), Some(Widget::Button { disabled: true, .. })));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}

//! Boolean control rendered as a switch

use serde_json::Value;

use super::{binding, form_field, RawInput};
use crate::core::state::ControlState;
use crate::dispatch::{DispatchProps, RenderContext};
use crate::renderers::util::truthy;
use crate::renderers::widget::Widget;
use crate::renderers::RendererKind;

pub fn render(props: &DispatchProps<'_>, cx: &RenderContext<'_>) -> Option<Widget> {
    let state = ControlState::derive(props, cx);
    if !state.visible {
        return None;
    }

    let input = Widget::Switch {
        binding: binding(&state, RendererKind::Boolean),
        checked: truthy(state.data),
        disabled: !state.enabled,
        invalid: state.error_message().is_some(),
    };
    Some(form_field(&state, input))
}

/// Only switch positions commit
pub fn commit(raw: RawInput) -> Option<Option<Value>> {
    match raw {
        RawInput::Bool(b) => Some(Some(Value::Bool(b))),
        _ => None,
    }
}

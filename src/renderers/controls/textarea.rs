//! Multi-line text control (`options.multi`)

use serde_json::Value;

use super::{binding, display_text, form_field};
use crate::core::state::ControlState;
use crate::dispatch::{DispatchProps, RenderContext};
use crate::renderers::widget::Widget;
use crate::renderers::RendererKind;

const DEFAULT_ROWS: u64 = 3;

pub fn render(props: &DispatchProps<'_>, cx: &RenderContext<'_>) -> Option<Widget> {
    let state = ControlState::derive(props, cx);
    if !state.visible {
        return None;
    }

    let rows = state
        .uischema
        .option("rows")
        .and_then(Value::as_u64)
        .filter(|&r| r > 0)
        .unwrap_or(DEFAULT_ROWS);

    let input = Widget::Textarea {
        binding: binding(&state, RendererKind::Textarea),
        value: display_text(state.data),
        rows,
        disabled: !state.enabled,
        invalid: state.error_message().is_some(),
    };
    Some(form_field(&state, input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderers::controls::test_support::{field_child, render_field};
    use serde_json::json;

    #[test]
    fn test_rows_option() {
        let schema = json!({ "type": "object", "properties": { "bio": { "type": "string" } } });
        let ui = json!({
            "type": "VerticalLayout",
            "elements": [{ "type": "Control", "scope": "#/properties/bio", "options": { "multi": true, "rows": 6 } }]
        });
        let field = render_field(schema.clone(), Some(ui), json!({ "bio": "line one\nline two" }));
        match field_child(&field) {
            Widget::Textarea { rows, value, .. } => {
                assert_eq!(*rows, 6);
                assert_eq!(value, "line one\nline two");
            }
            other => panic!("unexpected {:?}", other),
        }

        let ui = json!({
            "type": "VerticalLayout",
            "elements": [{ "type": "Control", "scope": "#/properties/bio", "options": { "multi": true } }]
        });
        let field = render_field(schema, Some(ui), json!({}));
        assert!(matches!(field_child(&field), Widget::Textarea { rows: 3, .. }));
    }
}

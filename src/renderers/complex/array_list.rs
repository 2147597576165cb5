//! Array list - one row per element with add / move / remove controls

use serde_json::Value;

use crate::core::path::{compose_paths, resolve_data};
use crate::core::state::ControlState;
use crate::core::uischema::UiType;
use crate::dispatch::{dispatch, DispatchProps, RenderContext};
use crate::renderers::controls::form_field;
use crate::renderers::util::{array_items_schema, js_string};
use crate::renderers::widget::{Action, Direction, TextRole, Widget};
use crate::schema::types::first_primitive_prop;

static NO_SCHEMA: Value = Value::Null;

pub fn render(props: &DispatchProps<'_>, cx: &RenderContext<'_>) -> Option<Widget> {
    let state = ControlState::derive(props, cx);
    if !state.visible {
        return None;
    }

    let items: &[Value] = match state.data {
        Some(Value::Array(items)) => items,
        _ => &[],
    };
    let len = items.len() as u64;
    let items_schema = array_items_schema(state.schema, state.root_schema).unwrap_or(&NO_SCHEMA);
    let max_reached = state.schema.get("maxItems").and_then(Value::as_u64).is_some_and(|max| len >= max);
    let min_reached = state.schema.get("minItems").and_then(Value::as_u64).is_some_and(|min| len <= min);

    let generate = || cx.host.generate_ui_schema(items_schema, UiType::VerticalLayout, state.root_schema);
    let detail = cx.host.find_ui_schema(
        cx.uischemas,
        items_schema,
        state.scope(),
        &state.path,
        &generate,
        Some(state.uischema),
    );
    let label_prop = state
        .uischema
        .option_str("childLabelProp")
        .or_else(|| first_primitive_prop(items_schema));

    let header = Widget::Stack {
        direction: Direction::Horizontal,
        heading: None,
        children: vec![
            Widget::text(format!("{} items", items.len()), TextRole::Muted),
            Widget::Button {
                label: "Add".to_string(),
                action: Action::AddItem {
                    path: state.path.clone(),
                    value: cx.host.create_default_value(items_schema, state.root_schema),
                },
                disabled: !state.enabled || max_reached,
                pressed: None,
            },
        ],
    };

    let mut body = vec![header];
    if items.is_empty() {
        body.push(Widget::text("No items.", TextRole::Muted));
    }

    for index in 0..items.len() {
        let label = child_label(state.data, index, label_prop);
        let title = if label.is_empty() {
            format!("Item {}", index + 1)
        } else {
            format!("Item {} — {}", index + 1, label)
        };
        let button = |label: &str, action: Action, disabled: bool| Widget::Button {
            label: label.to_string(),
            action,
            disabled: !state.enabled || disabled,
            pressed: None,
        };
        let toolbar = Widget::Stack {
            direction: Direction::Horizontal,
            heading: None,
            children: vec![
                Widget::text(title, TextRole::Heading),
                button(
                    "Up",
                    Action::MoveUp { path: state.path.clone(), index },
                    index == 0,
                ),
                button(
                    "Down",
                    Action::MoveDown { path: state.path.clone(), index },
                    index + 1 >= items.len(),
                ),
                button(
                    "Remove",
                    Action::RemoveItem { path: state.path.clone(), index },
                    min_reached,
                ),
            ],
        };

        let child_path = compose_paths(&state.path, &index.to_string());
        let child = DispatchProps {
            schema: items_schema,
            uischema: &detail,
            path: &child_path,
            enabled: state.enabled,
            visible: None,
        };
        let mut row = vec![toolbar];
        row.extend(dispatch(&child, cx));
        body.push(Widget::vertical(row));
    }

    Some(form_field(&state, Widget::vertical(body)))
}

/// Row label: the value of the label property, or the index without one
///
/// Absent and `null` values give a blank label.
fn child_label(data: Option<&Value>, index: usize, label_prop: Option<&str>) -> String {
    let Some(prop) = label_prop else {
        return index.to_string();
    };
    match data.and_then(|d| resolve_data(d, &compose_paths(&index.to_string(), prop))) {
        None | Some(Value::Null) => String::new(),
        Some(value) => js_string(value),
    }
}

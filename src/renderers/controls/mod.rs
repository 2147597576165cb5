//! Primitive controls
//!
//! Every control follows the same shape: derive a [`ControlState`], bail out
//! when hidden, wrap the input widget in a form field. Value coercion lives
//! next to each control in its `commit` function.

pub mod boolean;
pub mod enum_select;
pub mod integer;
pub mod multi_enum;
pub mod number;
pub mod password;
pub mod string;
pub mod textarea;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::state::ControlState;
use crate::renderers::util::js_string;
use crate::renderers::widget::{Binding, Widget};
use crate::renderers::RendererKind;

/// A raw value as emitted by an input widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum RawInput {
    /// Text typed into an input or textarea
    Text(String),
    /// Switch position
    Bool(bool),
    /// Single select; `None` clears the selection
    Selection(Option<Value>),
    /// Multiple select; anything but an array counts as no selection
    Selections(Value),
    /// The widget was cleared
    Clear,
}

/// Wrap `input` in the label / description / required / error frame
pub(crate) fn form_field(state: &ControlState<'_>, input: Widget) -> Widget {
    Widget::FormField {
        label: state.label.clone(),
        description: state.description.clone(),
        required: state.required,
        error: state.error_message(),
        child: Box::new(input),
    }
}

pub(crate) fn binding(state: &ControlState<'_>, renderer: RendererKind) -> Binding {
    Binding::new(state.path.clone(), renderer)
}

/// Text shown by a text-like input: absent and `null` read as empty
pub(crate) fn display_text(data: Option<&Value>) -> String {
    match data {
        None | Some(Value::Null) => String::new(),
        Some(value) => js_string(value),
    }
}

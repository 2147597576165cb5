//! Renderer set - one binding per widget kind and the default registry

pub mod complex;
pub mod controls;
pub mod layouts;
pub mod util;
pub mod widget;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::core::uischema::UiType;
use crate::dispatch::registry::{RankedRegistry, BASE_RANK, ENUM_RANK, PASSWORD_RANK};
use crate::dispatch::tester::{
    format_is, is_boolean_control, is_enum_control, is_integer_control, is_multi_enum_control,
    is_multi_line_control, is_number_control, is_object_control, is_string_control, schema_type_is,
    ui_type_is,
};
use crate::dispatch::{DispatchProps, RenderContext};
use controls::RawInput;
use widget::Widget;

/// Renderer identities, in default registration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RendererKind {
    VerticalLayout,
    HorizontalLayout,
    Group,
    Categorization,
    Category,
    Label,
    ArrayList,
    Object,
    Textarea,
    Number,
    Integer,
    Boolean,
    MultiEnum,
    Enum,
    Password,
    Text,
}

impl RendererKind {
    pub fn all() -> &'static [RendererKind] {
        &[
            RendererKind::VerticalLayout,
            RendererKind::HorizontalLayout,
            RendererKind::Group,
            RendererKind::Categorization,
            RendererKind::Category,
            RendererKind::Label,
            RendererKind::ArrayList,
            RendererKind::Object,
            RendererKind::Textarea,
            RendererKind::Number,
            RendererKind::Integer,
            RendererKind::Boolean,
            RendererKind::MultiEnum,
            RendererKind::Enum,
            RendererKind::Password,
            RendererKind::Text,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RendererKind::VerticalLayout => "vertical-layout",
            RendererKind::HorizontalLayout => "horizontal-layout",
            RendererKind::Group => "group",
            RendererKind::Categorization => "categorization",
            RendererKind::Category => "category",
            RendererKind::Label => "label",
            RendererKind::ArrayList => "array-list",
            RendererKind::Object => "object",
            RendererKind::Textarea => "textarea",
            RendererKind::Number => "number",
            RendererKind::Integer => "integer",
            RendererKind::Boolean => "boolean",
            RendererKind::MultiEnum => "multi-enum",
            RendererKind::Enum => "enum",
            RendererKind::Password => "password",
            RendererKind::Text => "text",
        }
    }

    /// Controls bind a value; layouts and the complex renderers only arrange children
    pub fn binds_value(&self) -> bool {
        matches!(
            self,
            RendererKind::Textarea
                | RendererKind::Number
                | RendererKind::Integer
                | RendererKind::Boolean
                | RendererKind::MultiEnum
                | RendererKind::Enum
                | RendererKind::Password
                | RendererKind::Text
        )
    }

    pub fn render(&self, props: &DispatchProps<'_>, cx: &RenderContext<'_>) -> Option<Widget> {
        match self {
            RendererKind::VerticalLayout => layouts::vertical(props, cx),
            RendererKind::HorizontalLayout => layouts::horizontal(props, cx),
            RendererKind::Group => layouts::group(props, cx),
            RendererKind::Categorization => layouts::categorization(props, cx),
            RendererKind::Category => layouts::category(props, cx),
            RendererKind::Label => layouts::label(props, cx),
            RendererKind::ArrayList => complex::array_list::render(props, cx),
            RendererKind::Object => complex::object::render(props, cx),
            RendererKind::Textarea => controls::textarea::render(props, cx),
            RendererKind::Number => controls::number::render(props, cx),
            RendererKind::Integer => controls::integer::render(props, cx),
            RendererKind::Boolean => controls::boolean::render(props, cx),
            RendererKind::MultiEnum => controls::multi_enum::render(props, cx),
            RendererKind::Enum => controls::enum_select::render(props, cx),
            RendererKind::Password => controls::password::render(props, cx),
            RendererKind::Text => controls::string::render(props, cx),
        }
    }

    /// Coerce a raw widget event into the value to commit
    ///
    /// `None` means the event does not apply to this renderer; `Some(None)`
    /// removes the value.
    pub fn commit(&self, raw: RawInput) -> Option<Option<Value>> {
        match self {
            RendererKind::Textarea | RendererKind::Password | RendererKind::Text => {
                controls::string::commit(raw)
            }
            RendererKind::Number => controls::number::commit(raw),
            RendererKind::Integer => controls::integer::commit(raw),
            RendererKind::Boolean => controls::boolean::commit(raw),
            RendererKind::MultiEnum => controls::multi_enum::commit(raw),
            RendererKind::Enum => controls::enum_select::commit(raw),
            _ => None,
        }
    }
}

impl fmt::Display for RendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The built-in renderer set
///
/// Registration order matters: Textarea precedes Text at the same rank so
/// multi-line strings render as textareas.
pub fn default_registry() -> RankedRegistry<RendererKind> {
    let mut registry = RankedRegistry::new();
    registry
        .register(ui_type_is(UiType::VerticalLayout), BASE_RANK, RendererKind::VerticalLayout)
        .register(ui_type_is(UiType::HorizontalLayout), BASE_RANK, RendererKind::HorizontalLayout)
        .register(ui_type_is(UiType::Group), BASE_RANK, RendererKind::Group)
        .register(ui_type_is(UiType::Categorization), BASE_RANK, RendererKind::Categorization)
        .register(ui_type_is(UiType::Category), BASE_RANK, RendererKind::Category)
        .register(ui_type_is(UiType::Label), BASE_RANK, RendererKind::Label)
        .register(schema_type_is("array"), BASE_RANK, RendererKind::ArrayList)
        .register(is_object_control(), BASE_RANK, RendererKind::Object)
        .register(is_multi_line_control(), BASE_RANK, RendererKind::Textarea)
        .register(is_number_control(), BASE_RANK, RendererKind::Number)
        .register(is_integer_control(), BASE_RANK, RendererKind::Integer)
        .register(is_boolean_control(), BASE_RANK, RendererKind::Boolean)
        .register(is_multi_enum_control(), ENUM_RANK, RendererKind::MultiEnum)
        .register(is_enum_control(), ENUM_RANK, RendererKind::Enum)
        .register(is_string_control().and(format_is("password")), PASSWORD_RANK, RendererKind::Password)
        .register(is_string_control(), BASE_RANK, RendererKind::Text);
    registry
}

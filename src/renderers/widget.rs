//! Widget tree produced by a render pass
//!
//! Widgets mirror the primitives of a small component library. Interactive
//! widgets carry a [`Binding`] so events route back to the right coercion,
//! buttons carry the [`Action`] they trigger.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::renderers::util::EnumOption;
use crate::renderers::RendererKind;

/// Where an input widget writes and which coercion applies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub path: String,
    pub renderer: RendererKind,
}

impl Binding {
    pub fn new(path: impl Into<String>, renderer: RendererKind) -> Self {
        Self {
            path: path.into(),
            renderer,
        }
    }
}

/// Button effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Action {
    /// Append `value` to the array at `path`
    AddItem { path: String, value: Value },
    RemoveItem { path: String, index: usize },
    MoveUp { path: String, index: usize },
    MoveDown { path: String, index: usize },
    /// Flip the password at `path` between masked and plain
    TogglePassword { path: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    Number,
    Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextRole {
    Heading,
    Body,
    Muted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "widget", rename_all = "kebab-case")]
pub enum Widget {
    /// Label, description, required marker and error around one input
    FormField {
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        required: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
        child: Box<Widget>,
    },
    Input {
        binding: Binding,
        value: String,
        input_type: InputType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        inputmode: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        step: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        autocomplete: Option<String>,
        disabled: bool,
        invalid: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trailing: Option<Box<Widget>>,
    },
    Textarea {
        binding: Binding,
        value: String,
        rows: u64,
        disabled: bool,
        invalid: bool,
    },
    Switch {
        binding: Binding,
        checked: bool,
        disabled: bool,
        invalid: bool,
    },
    SelectMenu {
        binding: Binding,
        multiple: bool,
        options: Vec<EnumOption>,
        /// Selected option values; at most one unless `multiple`
        selected: Vec<Value>,
        placeholder: String,
        disabled: bool,
        invalid: bool,
    },
    Button {
        label: String,
        action: Action,
        disabled: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pressed: Option<bool>,
    },
    Text {
        text: String,
        role: TextRole,
    },
    Stack {
        direction: Direction,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        heading: Option<String>,
        children: Vec<Widget>,
    },
    /// Placeholder for an element no renderer accepts
    Unknown {
        kind: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scope: Option<String>,
    },
}

impl Widget {
    pub fn vertical(children: Vec<Widget>) -> Self {
        Widget::Stack {
            direction: Direction::Vertical,
            heading: None,
            children,
        }
    }

    pub fn text(text: impl Into<String>, role: TextRole) -> Self {
        Widget::Text {
            text: text.into(),
            role,
        }
    }

    /// Direct children, in display order
    pub fn children(&self) -> Vec<&Widget> {
        match self {
            Widget::FormField { child, .. } => vec![child.as_ref()],
            Widget::Input { trailing, .. } => trailing.iter().map(|t| t.as_ref()).collect(),
            Widget::Stack { children, .. } => children.iter().collect(),
            _ => Vec::new(),
        }
    }

    /// Depth-first pre-order walk
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Widget)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    pub fn binding(&self) -> Option<&Binding> {
        match self {
            Widget::Input { binding, .. }
            | Widget::Textarea { binding, .. }
            | Widget::Switch { binding, .. }
            | Widget::SelectMenu { binding, .. } => Some(binding),
            _ => None,
        }
    }

    /// Every input widget in the tree
    pub fn inputs(&self) -> Vec<&Widget> {
        let mut found = Vec::new();
        self.walk(&mut |w| {
            if w.binding().is_some() {
                found.push(w);
            }
        });
        found
    }

    /// The input bound to `path`, if rendered
    pub fn find_input(&self, path: &str) -> Option<&Widget> {
        self.inputs()
            .into_iter()
            .find(|w| w.binding().is_some_and(|b| b.path == path))
    }

    /// Actions of every button in the tree
    pub fn actions(&self) -> Vec<&Action> {
        let mut found = Vec::new();
        self.walk(&mut |w| {
            if let Widget::Button { action, .. } = w {
                found.push(action);
            }
        });
        found
    }

    /// All button widgets in the tree
    pub fn buttons(&self) -> Vec<&Widget> {
        let mut found = Vec::new();
        self.walk(&mut |w| {
            if matches!(w, Widget::Button { .. }) {
                found.push(w);
            }
        });
        found
    }

    /// Text content of every `Text` widget and stack heading, in order
    pub fn texts(&self) -> Vec<&str> {
        let mut found = Vec::new();
        self.walk(&mut |w| match w {
            Widget::Text { text, .. } => found.push(text.as_str()),
            Widget::Stack { heading: Some(h), .. } => found.push(h.as_str()),
            _ => {}
        });
        found
    }
}

//! The form - reactive root holding schema, data, errors and local UI state
//!
//! Rendering is a pure function of the form's fields. Every mutation goes
//! through [`Form::handle_change`] or one of the array operations, which
//! revalidate before returning.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

use crate::core::path::{resolve_data, set_value};
use crate::core::uischema::{UiSchemaNode, UiType};
use crate::dispatch::registry::RankedRegistry;
use crate::dispatch::{dispatch, DispatchProps, RenderContext};
use crate::renderers::controls::RawInput;
use crate::renderers::widget::{Action, Binding, Widget};
use crate::renderers::{default_registry, RendererKind};
use crate::schema::generate::UiSchemaRegistry;
use crate::schema::host::{JsonFormsHost, SchemaHost};
use crate::schema::validator::{compile, ErrorIndex, SchemaCompileError};

/// When validation runs and whether its messages reach the controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationMode {
    #[default]
    ValidateAndShow,
    ValidateAndHide,
    NoValidation,
}

impl ValidationMode {
    pub fn validates(self) -> bool {
        self != ValidationMode::NoValidation
    }

    pub fn shows_errors(self) -> bool {
        self == ValidationMode::ValidateAndShow
    }
}

/// Form-wide rendering options
#[derive(Debug, Clone, PartialEq)]
pub struct FormOptions {
    /// Disable every control
    pub readonly: bool,
    pub validation_mode: ValidationMode,
    pub select_placeholder: String,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            readonly: false,
            validation_mode: ValidationMode::default(),
            select_placeholder: "Select...".to_string(),
        }
    }
}

/// UI state owned by the form rather than the data (password reveal toggles)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalState {
    revealed: BTreeSet<String>,
}

impl LocalState {
    pub fn is_revealed(&self, path: &str) -> bool {
        self.revealed.contains(path)
    }

    /// Flip masked ⇄ plain for the password control at `path`
    pub fn toggle_reveal(&mut self, path: &str) -> bool {
        if !self.revealed.remove(path) {
            self.revealed.insert(path.to_string());
            return true;
        }
        false
    }
}

/// Something the user did to a rendered widget
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// New raw value from an input widget
    Input { binding: Binding, raw: RawInput },
    /// Button press
    Action(Action),
}

pub struct Form {
    schema: Value,
    uischema: UiSchemaNode,
    data: Value,
    errors: ErrorIndex,
    validator: Option<jsonschema::Validator>,
    registry: RankedRegistry<RendererKind>,
    uischemas: UiSchemaRegistry,
    host: Box<dyn SchemaHost>,
    local: LocalState,
    options: FormOptions,
}

impl Form {
    /// Create a form; without a UI Schema one is generated from `schema`
    pub fn new(schema: Value, uischema: Option<UiSchemaNode>, data: Value) -> Result<Self, SchemaCompileError> {
        let validator = compile(&schema)?;
        let mut form = Self::build(schema, uischema, data, Some(validator), FormOptions::default());
        form.validate();
        Ok(form)
    }

    /// Create a form that never validates, so the schema is not compiled
    ///
    /// Options passed later keep `NoValidation`; there is nothing to validate
    /// against.
    pub fn unvalidated(schema: Value, uischema: Option<UiSchemaNode>, data: Value) -> Self {
        let options = FormOptions {
            validation_mode: ValidationMode::NoValidation,
            ..FormOptions::default()
        };
        Self::build(schema, uischema, data, None, options)
    }

    fn build(
        schema: Value,
        uischema: Option<UiSchemaNode>,
        data: Value,
        validator: Option<jsonschema::Validator>,
        options: FormOptions,
    ) -> Self {
        let host: Box<dyn SchemaHost> = Box::new(JsonFormsHost);
        let uischema =
            uischema.unwrap_or_else(|| host.generate_ui_schema(&schema, UiType::VerticalLayout, &schema));
        Self {
            schema,
            uischema,
            data,
            errors: ErrorIndex::empty(),
            validator,
            registry: default_registry(),
            uischemas: UiSchemaRegistry::new(),
            host,
            local: LocalState::default(),
            options,
        }
    }

    pub fn with_options(mut self, mut options: FormOptions) -> Self {
        if self.validator.is_none() {
            options.validation_mode = ValidationMode::NoValidation;
        }
        self.options = options;
        self.validate();
        self
    }

    pub fn with_registry(mut self, registry: RankedRegistry<RendererKind>) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_uischemas(mut self, uischemas: UiSchemaRegistry) -> Self {
        self.uischemas = uischemas;
        self
    }

    pub fn with_host(mut self, host: impl SchemaHost + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }

    pub fn uischema(&self) -> &UiSchemaNode {
        &self.uischema
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn into_data(self) -> Value {
        self.data
    }

    pub fn errors(&self) -> &ErrorIndex {
        &self.errors
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    pub fn registry(&self) -> &RankedRegistry<RendererKind> {
        &self.registry
    }

    pub fn host(&self) -> &dyn SchemaHost {
        self.host.as_ref()
    }

    pub fn local(&self) -> &LocalState {
        &self.local
    }

    /// Context for a render pass over the current state
    pub fn context(&self) -> RenderContext<'_> {
        RenderContext {
            root_schema: &self.schema,
            data: &self.data,
            errors: &self.errors,
            registry: &self.registry,
            uischemas: &self.uischemas,
            host: self.host.as_ref(),
            local: &self.local,
            options: &self.options,
        }
    }

    /// Render the widget tree; `None` when the root is hidden
    pub fn render(&self) -> Option<Widget> {
        let props = DispatchProps {
            schema: &self.schema,
            uischema: &self.uischema,
            path: "",
            enabled: true,
            visible: None,
        };
        dispatch(&props, &self.context())
    }

    /// Set (`Some`) or remove (`None`) the value at `path`, then revalidate
    pub fn handle_change(&mut self, path: &str, value: Option<Value>) {
        debug!(path, value = ?value, "commit");
        set_value(&mut self.data, path, value);
        self.validate();
    }

    /// Append `value` to the array at `path`, creating the array if needed
    pub fn add_item(&mut self, path: &str, value: Value) {
        let mut items = self.array_at(path);
        items.push(value);
        self.handle_change(path, Some(Value::Array(items)));
    }

    /// Remove the given indices from the array at `path`; out-of-range indices are ignored
    pub fn remove_items(&mut self, path: &str, indices: &[usize]) {
        let mut items = self.array_at(path);
        let mut doomed: Vec<usize> = indices.iter().copied().filter(|&i| i < items.len()).collect();
        if doomed.is_empty() {
            return;
        }
        doomed.sort_unstable();
        doomed.dedup();
        for index in doomed.into_iter().rev() {
            items.remove(index);
        }
        self.handle_change(path, Some(Value::Array(items)));
    }

    pub fn move_up(&mut self, path: &str, index: usize) {
        let mut items = self.array_at(path);
        if index == 0 || index >= items.len() {
            return;
        }
        items.swap(index - 1, index);
        self.handle_change(path, Some(Value::Array(items)));
    }

    pub fn move_down(&mut self, path: &str, index: usize) {
        let mut items = self.array_at(path);
        if index + 1 >= items.len() {
            return;
        }
        items.swap(index, index + 1);
        self.handle_change(path, Some(Value::Array(items)));
    }

    pub fn toggle_password(&mut self, path: &str) -> bool {
        let revealed = self.local.toggle_reveal(path);
        debug!(path, revealed, "password visibility toggled");
        revealed
    }

    /// Route a widget event to its commit path
    ///
    /// Returns `false` when the event does not apply (an input the bound
    /// renderer cannot coerce).
    pub fn apply(&mut self, event: FormEvent) -> bool {
        match event {
            FormEvent::Input { binding, raw } => match binding.renderer.commit(raw) {
                Some(value) => {
                    self.handle_change(&binding.path, value);
                    true
                }
                None => {
                    debug!(path = %binding.path, renderer = binding.renderer.as_str(), "input ignored");
                    false
                }
            },
            FormEvent::Action(action) => {
                match action {
                    Action::AddItem { path, value } => self.add_item(&path, value),
                    Action::RemoveItem { path, index } => self.remove_items(&path, &[index]),
                    Action::MoveUp { path, index } => self.move_up(&path, index),
                    Action::MoveDown { path, index } => self.move_down(&path, index),
                    Action::TogglePassword { path } => {
                        self.toggle_password(&path);
                    }
                }
                true
            }
        }
    }

    fn array_at(&self, path: &str) -> Vec<Value> {
        match resolve_data(&self.data, path) {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        }
    }

    fn validate(&mut self) {
        self.errors = match &self.validator {
            Some(validator) if self.options.validation_mode.validates() => {
                ErrorIndex::collect(validator, &self.data)
            }
            _ => ErrorIndex::empty(),
        };
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("uischema", &self.uischema.kind)
            .field("data", &self.data)
            .field("errors", &self.errors.len())
            .field("options", &self.options)
            .finish()
    }
}

//! Core module - UI Schema model, data paths, derived state and the form

pub mod config;
pub mod form;
pub mod path;
pub mod rules;
pub mod state;
pub mod uischema;

pub use config::Config;
pub use form::{Form, FormEvent, FormOptions, LocalState, ValidationMode};
pub use state::{ControlState, LayoutState};
pub use uischema::{Condition, LabelSpec, Rule, RuleEffect, UiSchemaNode, UiType};

//! SFR: schema form renderers
//!
//! Dispatches JSON Schema + UI Schema pairs onto a small set of form widgets
//! through ranked testers, and wires each widget's events back into the data.

pub mod cli;
pub mod core;
pub mod dispatch;
pub mod renderers;
pub mod schema;

pub use crate::core::{Form, FormEvent, FormOptions, UiSchemaNode};
pub use crate::dispatch::{dispatch, DispatchProps, RenderContext};
pub use crate::renderers::{default_registry, RendererKind};

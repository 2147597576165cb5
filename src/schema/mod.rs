//! Schema system - resolution, defaults, layout generation and validation text

pub mod defaults;
pub mod generate;
pub mod host;
pub mod resolver;
pub mod types;
pub mod validator;

pub use generate::{find_ui_schema, generate_ui_schema, UiSchemaRegistry};
pub use host::{JsonFormsHost, SchemaHost};
pub use resolver::{resolve_schema, ResolveError};
pub use validator::{ErrorIndex, SchemaCompileError};

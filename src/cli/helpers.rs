//! Shared helpers for CLI commands - loading documents and building forms

use miette::Diagnostic;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::cli::demos;
use crate::cli::diagnostics::DocumentSyntaxError;
use crate::core::config::Config;
use crate::core::form::{Form, ValidationMode};
use crate::core::uischema::UiSchemaNode;
use crate::schema::defaults::create_default_value;
use crate::schema::validator::SchemaCompileError;

/// Errors raised while assembling a form from files or demos
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("Failed to read {path}")]
    #[diagnostic(code(sfr::load::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] DocumentSyntaxError),

    #[error("Unknown demo '{0}'")]
    #[diagnostic(code(sfr::load::unknown_demo), help("Run `sfr demos` to list the bundled forms"))]
    UnknownDemo(String),

    #[error("Demo '{name}' is malformed: {message}")]
    #[diagnostic(code(sfr::load::demo))]
    MalformedDemo { name: String, message: String },

    #[error("No schema given")]
    #[diagnostic(code(sfr::load::no_schema), help("Pass --schema FILE or --demo NAME"))]
    NoSchema,

    #[error("Invalid UI Schema in {origin}: {message}")]
    #[diagnostic(
        code(sfr::load::uischema),
        help("Every element needs a \"type\"; controls need a \"scope\" such as \"#/properties/name\"")
    )]
    InvalidUiSchema { origin: String, message: String },

    #[error(transparent)]
    #[diagnostic(code(sfr::load::schema), help("The schema must itself be a valid JSON Schema"))]
    Compile(#[from] SchemaCompileError),
}

/// Where a form's schema, UI Schema and data come from
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FormArgs {
    /// JSON Schema file (.json, .yaml or .yml)
    #[arg(long, short = 's', conflicts_with = "demo")]
    pub schema: Option<PathBuf>,

    /// UI Schema file (generated from the schema when omitted)
    #[arg(long, short = 'u')]
    pub uischema: Option<PathBuf>,

    /// Data file (starts from the schema's default value when omitted)
    #[arg(long, short = 'd')]
    pub data: Option<PathBuf>,

    /// Use a bundled demo form (see `sfr demos`)
    #[arg(long)]
    pub demo: Option<String>,

    /// Render every control disabled
    #[arg(long)]
    pub readonly: bool,

    /// Validate but do not show errors
    #[arg(long, conflicts_with = "no_validate")]
    pub hide_errors: bool,

    /// Skip validation entirely
    #[arg(long)]
    pub no_validate: bool,
}

impl FormArgs {
    /// Assemble the form: demo or files first, then file overrides, then config and flags
    pub fn load(&self, config: &Config) -> Result<Form, LoadError> {
        let (schema, demo_ui, demo_data, origin) = match (&self.demo, &self.schema) {
            (Some(name), _) => {
                let demo = demos::load(name)?;
                (demo.schema, demo.uischema, demo.data, format!("demo '{}'", name))
            }
            (None, Some(path)) => (read_document(path)?, None, None, path.display().to_string()),
            (None, None) => return Err(LoadError::NoSchema),
        };

        let uischema = match &self.uischema {
            Some(path) => Some(parse_ui_schema(read_document(path)?, &path.display().to_string())?),
            None => demo_ui.map(|ui| parse_ui_schema(ui, &origin)).transpose()?,
        };
        let data = match &self.data {
            Some(path) => read_document(path)?,
            None => demo_data.unwrap_or_else(|| create_default_value(&schema, &schema)),
        };

        let mut options = config.form_options();
        if self.readonly {
            options.readonly = true;
        }
        if self.no_validate {
            options.validation_mode = ValidationMode::NoValidation;
        } else if self.hide_errors {
            options.validation_mode = ValidationMode::ValidateAndHide;
        }

        debug!(%origin, generated_layout = uischema.is_none(), "form loaded");
        let form = if options.validation_mode.validates() {
            Form::new(schema, uischema, data)?
        } else {
            Form::unvalidated(schema, uischema, data)
        };
        Ok(form.with_options(options))
    }
}

/// Read a JSON or YAML document, chosen by file extension
pub fn read_document(path: &Path) -> Result<Value, LoadError> {
    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_document(&source, &path.display().to_string(), is_yaml(path))
}

pub fn parse_document(source: &str, name: &str, yaml: bool) -> Result<Value, LoadError> {
    if yaml {
        serde_yml::from_str(source).map_err(|e| DocumentSyntaxError::from_yaml(&e, source, name).into())
    } else {
        serde_json::from_str(source).map_err(|e| DocumentSyntaxError::from_json(&e, source, name).into())
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
}

fn parse_ui_schema(value: Value, origin: &str) -> Result<UiSchemaNode, LoadError> {
    serde_json::from_value(value).map_err(|e| LoadError::InvalidUiSchema {
        origin: origin.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_json_and_yaml() {
        let json = parse_document("{\"type\": \"string\"}", "a.json", false).unwrap();
        let yaml = parse_document("type: string\n", "a.yaml", true).unwrap();
        assert_eq!(json, yaml);
    }

    #[test]
    fn test_syntax_error_is_diagnostic() {
        let err = parse_document("{\"type\": }", "bad.json", false).unwrap_err();
        assert!(matches!(err, LoadError::Syntax(_)));
        assert_eq!(err.code().map(|c| c.to_string()).as_deref(), Some("sfr::load::syntax"));
    }

    #[test]
    fn test_yaml_chosen_by_extension() {
        assert!(is_yaml(Path::new("form.YML")));
        assert!(is_yaml(Path::new("dir/form.yaml")));
        assert!(!is_yaml(Path::new("form.json")));
        assert!(!is_yaml(Path::new("yaml")));
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempdir().unwrap();
        let schema = dir.path().join("schema.yaml");
        let data = dir.path().join("data.json");
        fs::write(
            &schema,
            "type: object\nproperties:\n  name:\n    type: string\n    minLength: 3\n",
        )
        .unwrap();
        fs::write(&data, r#"{"name": "Al"}"#).unwrap();

        let args = FormArgs {
            schema: Some(schema),
            data: Some(data),
            ..FormArgs::default()
        };
        let form = args.load(&Config::default()).unwrap();
        assert_eq!(form.data(), &json!({ "name": "Al" }));
        assert!(form.errors().at("name").is_some());
    }

    #[test]
    fn test_missing_data_starts_from_default_value() {
        let dir = tempdir().unwrap();
        let schema = dir.path().join("schema.json");
        fs::write(
            &schema,
            r#"{"type": "object", "properties": {"n": {"type": "integer", "default": 4}}}"#,
        )
        .unwrap();
        let args = FormArgs {
            schema: Some(schema),
            ..FormArgs::default()
        };
        assert_eq!(args.load(&Config::default()).unwrap().data(), &json!({ "n": 4 }));
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config {
            readonly: Some(false),
            ..Config::default()
        };
        let args = FormArgs {
            demo: Some("person".to_string()),
            readonly: true,
            no_validate: true,
            ..FormArgs::default()
        };
        let form = args.load(&config).unwrap();
        assert!(form.options().readonly);
        assert_eq!(form.options().validation_mode, ValidationMode::NoValidation);
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_load_errors() {
        let config = Config::default();
        assert!(matches!(FormArgs::default().load(&config), Err(LoadError::NoSchema)));

        let missing = FormArgs {
            schema: Some(PathBuf::from("/definitely/not/here.json")),
            ..FormArgs::default()
        };
        assert!(matches!(missing.load(&config), Err(LoadError::Io { .. })));

        let dir = tempdir().unwrap();
        let ui = dir.path().join("ui.json");
        fs::write(&ui, r##"{"scope": "#/properties/name"}"##).unwrap();
        let bad_ui = FormArgs {
            demo: Some("person".to_string()),
            uischema: Some(ui),
            ..FormArgs::default()
        };
        assert!(matches!(bad_ui.load(&config), Err(LoadError::InvalidUiSchema { .. })));
    }
}

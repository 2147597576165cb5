//! `sfr render` - print the widget tree of a form

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::args::{GlobalOpts, OutputFormat};
use crate::cli::helpers::FormArgs;
use crate::cli::output::{to_structured, widget_text, write_output};
use crate::core::config::Config;
use crate::core::form::Form;

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub form: FormArgs,

    /// Write to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: RenderArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let form = args.form.load(config)?;
    let root = form.render();

    let format = global.format.resolve(config.default_format.as_deref());
    let content = match format {
        OutputFormat::Json | OutputFormat::Yaml => to_structured(&root, format)?,
        OutputFormat::Text | OutputFormat::Auto => {
            let mut text = match &root {
                Some(widget) => widget_text(widget),
                None => format!("{}\n", style("(nothing visible)").dim()),
            };
            if !global.quiet {
                text.push_str(&validation_summary(&form));
            }
            text
        }
    };
    write_output(&content, args.output.as_ref(), global.quiet)
}

fn validation_summary(form: &Form) -> String {
    if !form.options().validation_mode.validates() {
        return String::new();
    }
    match form.errors().len() {
        0 => format!("\n{} Data is valid\n", style("✓").green()),
        n => format!(
            "\n{} {} validation error{}\n",
            style("✗").red(),
            n,
            if n == 1 { "" } else { "s" }
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::form::{FormOptions, ValidationMode};
    use serde_json::json;

    fn form(data: serde_json::Value) -> Form {
        let schema = json!({
            "type": "object",
            "properties": { "age": { "type": "integer", "minimum": 0 }, "n": { "type": "integer", "minimum": 0 } }
        });
        Form::new(schema, None, data).unwrap()
    }

    #[test]
    fn test_validation_summary() {
        console::set_colors_enabled(false);
        assert_eq!(validation_summary(&form(json!({}))), "\n✓ Data is valid\n");
        assert_eq!(
            validation_summary(&form(json!({ "age": -1 }))),
            "\n✗ 1 validation error\n"
        );
        assert_eq!(
            validation_summary(&form(json!({ "age": -1, "n": -2 }))),
            "\n✗ 2 validation errors\n"
        );

        let unchecked = form(json!({ "age": -1 })).with_options(FormOptions {
            validation_mode: ValidationMode::NoValidation,
            ..FormOptions::default()
        });
        assert_eq!(validation_summary(&unchecked), "");
    }
}

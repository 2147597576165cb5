//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    completions::CompletionsArgs, explain::ExplainArgs, fill::FillArgs, render::RenderArgs,
};

#[derive(Parser)]
#[command(name = "sfr")]
#[command(author, version, about = "Schema Form Renderers")]
#[command(
    long_about = "Turn a JSON Schema and an optional UI Schema into a form widget tree by ranked renderer dispatch."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging on stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a form and print its widget tree
    Render(RenderArgs),

    /// Show which renderers apply to each UI Schema element and which one wins
    Explain(ExplainArgs),

    /// List the default renderer registry with ranks
    Renderers,

    /// Fill in a form interactively and print the resulting data
    Fill(FillArgs),

    /// List the bundled demo forms
    Demos,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Use the configured default, falling back to text
    #[default]
    Auto,
    /// Human-readable form sketch / tables
    Text,
    /// JSON format (for programming)
    Json,
    /// YAML format
    Yaml,
}

impl OutputFormat {
    /// Resolve `Auto` against the configured default format
    pub fn resolve(self, configured: Option<&str>) -> OutputFormat {
        if self != OutputFormat::Auto {
            return self;
        }
        match configured.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("json") => OutputFormat::Json,
            Some("yaml") | Some("yml") => OutputFormat::Yaml,
            _ => OutputFormat::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_auto_format_resolution() {
        assert_eq!(OutputFormat::Auto.resolve(None), OutputFormat::Text);
        assert_eq!(OutputFormat::Auto.resolve(Some("JSON")), OutputFormat::Json);
        assert_eq!(OutputFormat::Auto.resolve(Some("yml")), OutputFormat::Yaml);
        assert_eq!(OutputFormat::Auto.resolve(Some("bogus")), OutputFormat::Text);
        assert_eq!(OutputFormat::Json.resolve(Some("yaml")), OutputFormat::Json);
    }

    #[test]
    fn test_parse_render_with_global_format() {
        let cli = Cli::try_parse_from(["sfr", "render", "--demo", "person", "-f", "json"]).unwrap();
        assert_eq!(cli.global.format, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Render(_)));
    }
}

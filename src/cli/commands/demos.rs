//! `sfr demos` - list the bundled demo forms

use miette::Result;
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::cli::args::{GlobalOpts, OutputFormat};
use crate::cli::demos;
use crate::cli::output::{to_structured, write_output};
use crate::core::config::Config;

#[derive(Debug, Serialize)]
struct DemoRow {
    name: String,
    description: String,
    uischema: bool,
    data: bool,
}

pub fn run(global: &GlobalOpts, config: &Config) -> Result<()> {
    let rows: Vec<DemoRow> = demos::all()?
        .into_iter()
        .map(|demo| DemoRow {
            name: demo.name,
            description: demo.description,
            uischema: demo.uischema.is_some(),
            data: demo.data.is_some(),
        })
        .collect();

    let content = match global.format.resolve(config.default_format.as_deref()) {
        format @ (OutputFormat::Json | OutputFormat::Yaml) => to_structured(&rows, format)?,
        OutputFormat::Text | OutputFormat::Auto => {
            let mut builder = Builder::default();
            builder.push_record(["Name", "Description", "UI Schema"]);
            for row in &rows {
                builder.push_record([
                    row.name.as_str(),
                    row.description.as_str(),
                    if row.uischema { "yes" } else { "generated" },
                ]);
            }
            let mut text = format!("{}\n", builder.build().with(Style::markdown()));
            if !global.quiet {
                text.push_str("\nTry: sfr render --demo <name>\n");
            }
            text
        }
    };
    write_output(&content, None, global.quiet)
}

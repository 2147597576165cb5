//! `sfr renderers` - the default registry in registration order

use miette::Result;
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::cli::args::{GlobalOpts, OutputFormat};
use crate::cli::output::{to_structured, write_output};
use crate::core::config::Config;
use crate::dispatch::registry::Rank;
use crate::renderers::{default_registry, RendererKind};

#[derive(Debug, Serialize)]
struct RegistryRow {
    order: usize,
    renderer: RendererKind,
    rank: Rank,
    tester: String,
}

pub fn run(global: &GlobalOpts, config: &Config) -> Result<()> {
    let registry = default_registry();
    let rows: Vec<RegistryRow> = registry
        .entries()
        .iter()
        .enumerate()
        .map(|(order, entry)| RegistryRow {
            order,
            renderer: entry.renderer,
            rank: entry.rank,
            tester: entry.tester.name().to_string(),
        })
        .collect();

    let content = match global.format.resolve(config.default_format.as_deref()) {
        format @ (OutputFormat::Json | OutputFormat::Yaml) => to_structured(&rows, format)?,
        OutputFormat::Text | OutputFormat::Auto => {
            let mut builder = Builder::default();
            builder.push_record(["#", "Renderer", "Rank", "Tester"]);
            for row in &rows {
                builder.push_record([
                    row.order.to_string(),
                    row.renderer.to_string(),
                    row.rank.to_string(),
                    row.tester.clone(),
                ]);
            }
            format!("{}\n", builder.build().with(Style::markdown()))
        }
    };
    write_output(&content, None, global.quiet)
}

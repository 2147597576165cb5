//! `sfr explain` - which renderers apply to each UI Schema element
//!
//! Candidates are listed best first; the first one is what dispatch picks.

use miette::Result;
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::cli::args::{GlobalOpts, OutputFormat};
use crate::cli::helpers::FormArgs;
use crate::cli::output::{to_structured, write_output};
use crate::core::config::Config;
use crate::core::form::Form;
use crate::core::uischema::{UiSchemaNode, UiType};
use crate::dispatch::registry::Rank;
use crate::renderers::RendererKind;

#[derive(clap::Args, Debug)]
pub struct ExplainArgs {
    #[command(flatten)]
    pub form: FormArgs,
}

#[derive(Debug, Serialize)]
pub(crate) struct ElementReport {
    pub depth: usize,
    pub element: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Candidate {
    pub renderer: RendererKind,
    pub rank: Rank,
    pub tester: String,
    pub winner: bool,
}

pub fn run(args: ExplainArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let form = args.form.load(config)?;
    let reports = explain(&form);

    let content = match global.format.resolve(config.default_format.as_deref()) {
        format @ (OutputFormat::Json | OutputFormat::Yaml) => to_structured(&reports, format)?,
        OutputFormat::Text | OutputFormat::Auto => table(&reports),
    };
    write_output(&content, None, global.quiet)
}

/// One report per element of the form's UI Schema, depth first
pub(crate) fn explain(form: &Form) -> Vec<ElementReport> {
    let mut reports = Vec::new();
    collect(form, form.uischema(), 0, &mut reports);
    reports
}

fn collect(form: &Form, node: &UiSchemaNode, depth: usize, out: &mut Vec<ElementReport>) {
    let cx = form.context();
    let tester_cx = cx.tester_context();
    let candidates = form
        .registry()
        .candidates(node, form.schema(), &tester_cx)
        .into_iter()
        .enumerate()
        .map(|(position, (_, entry))| Candidate {
            renderer: entry.renderer,
            rank: entry.rank,
            tester: entry.tester.name().to_string(),
            winner: position == 0,
        })
        .collect();

    out.push(ElementReport {
        depth,
        element: describe(node),
        scope: node.scope.clone(),
        candidates,
    });
    for element in &node.elements {
        collect(form, element, depth + 1, out);
    }
}

fn describe(node: &UiSchemaNode) -> String {
    match (&node.kind, &node.scope, node.label_text(), &node.text) {
        (UiType::Control, Some(scope), _, _) => format!("Control {}", scope),
        (UiType::Label, _, _, Some(text)) => format!("Label \"{}\"", text),
        (kind, _, Some(label), _) => format!("{} \"{}\"", kind, label),
        (kind, _, _, _) => kind.to_string(),
    }
}

fn table(reports: &[ElementReport]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Element", "Renderer", "Rank", "Tester", "Wins"]);
    for report in reports {
        let element = format!("{}{}", "  ".repeat(report.depth), report.element);
        if report.candidates.is_empty() {
            builder.push_record([element, "(none)".to_string(), "-".to_string(), "-".to_string(), String::new()]);
            continue;
        }
        for (i, candidate) in report.candidates.iter().enumerate() {
            builder.push_record([
                if i == 0 { element.clone() } else { String::new() },
                candidate.renderer.to_string(),
                candidate.rank.to_string(),
                candidate.tester.clone(),
                if candidate.winner { "✓".to_string() } else { String::new() },
            ]);
        }
    }
    format!("{}\n", builder.build().with(Style::markdown()))
}

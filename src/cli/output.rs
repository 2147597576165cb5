//! Output formatting - text sketches of widget trees and structured output

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::cli::args::OutputFormat;
use crate::renderers::util::js_string;
use crate::renderers::widget::{Direction, InputType, TextRole, Widget};

/// Serialize `value` as pretty JSON or YAML
pub fn to_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => serde_yml::to_string(value).into_diagnostic(),
        _ => {
            let mut json = serde_json::to_string_pretty(value).into_diagnostic()?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Write to a file, or stdout without one
pub fn write_output(content: &str, output_path: Option<&PathBuf>, quiet: bool) -> Result<()> {
    match output_path {
        Some(path) => {
            let file = File::create(path).into_diagnostic()?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes()).into_diagnostic()?;
            if !quiet {
                eprintln!("{} Written to {}", style("✓").green(), style(path.display()).cyan());
            }
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Render a widget tree as an indented plain-text form sketch
pub fn widget_text(widget: &Widget) -> String {
    let mut out = String::new();
    write_widget(&mut out, widget, 0);
    out
}

fn write_widget(out: &mut String, widget: &Widget, depth: usize) {
    let pad = "  ".repeat(depth);
    match widget {
        Widget::Stack {
            direction,
            heading,
            children,
        } => {
            let depth = match heading {
                Some(heading) => {
                    out.push_str(&format!("{}{}\n", pad, style(format!("▸ {}", heading)).bold()));
                    depth + 1
                }
                None => depth,
            };
            if *direction == Direction::Horizontal && children.iter().all(is_inline) {
                let row: Vec<String> = children.iter().map(inline).collect();
                out.push_str(&format!("{}{}\n", "  ".repeat(depth), row.join("  ")));
            } else {
                for child in children {
                    write_widget(out, child, depth);
                }
            }
        }
        Widget::FormField {
            label,
            description,
            required,
            error,
            child,
        } => {
            let marker = if *required { "*" } else { "" };
            let caption = format!("{}{}", label, marker);
            if is_inline(child) {
                out.push_str(&format!("{}{}: {}\n", pad, caption, inline(child)));
            } else {
                out.push_str(&format!("{}{}:\n", pad, caption));
                write_widget(out, child, depth + 1);
            }
            if let Some(description) = description {
                out.push_str(&format!("{}  {}\n", pad, style(description).dim()));
            }
            if let Some(error) = error {
                out.push_str(&format!("{}  {} {}\n", pad, style("✗").red(), style(error).red()));
            }
        }
        other => out.push_str(&format!("{}{}\n", pad, inline(other))),
    }
}

fn is_inline(widget: &Widget) -> bool {
    !matches!(widget, Widget::Stack { .. } | Widget::FormField { .. })
}

/// One-line sketch of a leaf widget
fn inline(widget: &Widget) -> String {
    match widget {
        Widget::Input {
            value,
            input_type,
            disabled,
            trailing,
            ..
        } => {
            let shown = match input_type {
                InputType::Password => "•".repeat(value.chars().count()),
                _ => value.clone(),
            };
            let mut text = field(&format!("[{}]", shown), *disabled);
            if let Some(trailing) = trailing {
                text.push(' ');
                text.push_str(&inline(trailing));
            }
            text
        }
        Widget::Textarea { value, rows, disabled, .. } => {
            field(&format!("[{}] ({} rows)", value.replace('\n', "⏎"), rows), *disabled)
        }
        Widget::Switch { checked, disabled, .. } => {
            field(if *checked { "[x]" } else { "[ ]" }, *disabled)
        }
        Widget::SelectMenu {
            options,
            selected,
            placeholder,
            disabled,
            multiple,
            ..
        } => {
            let chosen: Vec<String> = selected
                .iter()
                .map(|value| {
                    options
                        .iter()
                        .find(|o| &o.value == value)
                        .map_or_else(|| js_string(value), |o| o.label.clone())
                })
                .collect();
            let current = if chosen.is_empty() && !*multiple {
                placeholder.clone()
            } else {
                chosen.join(", ")
            };
            let choices: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
            format!(
                "{} {}",
                field(&format!("[{} ▾]", current), *disabled),
                style(format!("({})", choices.join(" | "))).dim()
            )
        }
        Widget::Button { label, disabled, .. } => field(&format!("<{}>", label), *disabled),
        Widget::Text { text, role } => match role {
            TextRole::Heading => style(text).bold().to_string(),
            TextRole::Muted => style(text).dim().to_string(),
            TextRole::Body => text.clone(),
        },
        Widget::Unknown { kind, scope } => style(format!(
            "! No applicable renderer for {}{}",
            kind,
            scope.as_deref().map(|s| format!(" {}", s)).unwrap_or_default()
        ))
        .yellow()
        .to_string(),
        Widget::Stack { .. } | Widget::FormField { .. } => String::new(),
    }
}

fn field(text: &str, disabled: bool) -> String {
    if disabled {
        style(text).dim().to_string()
    } else {
        text.to_string()
    }
}

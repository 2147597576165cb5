//! Syntax errors in schema / UI Schema / data documents, with source spans

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// JSON or YAML syntax error pointing into the offending document
#[derive(Debug, Error, Diagnostic)]
#[error("{syntax} syntax error in {name}: {message}")]
#[diagnostic(code(sfr::load::syntax))]
pub struct DocumentSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    syntax: &'static str,
    name: String,
    message: String,
}

impl DocumentSyntaxError {
    pub fn from_json(err: &serde_json::Error, source: &str, name: &str) -> Self {
        Self::at(
            "JSON",
            err.to_string(),
            source,
            name,
            err.line().max(1),
            err.column().max(1),
        )
    }

    pub fn from_yaml(err: &serde_yml::Error, source: &str, name: &str) -> Self {
        let (line, column) = err
            .location()
            .map(|loc| (loc.line(), loc.column()))
            .unwrap_or((1, 1));
        Self::at("YAML", err.to_string(), source, name, line, column)
    }

    fn at(syntax: &'static str, message: String, source: &str, name: &str, line: usize, column: usize) -> Self {
        let offset = offset_of(source, line, column);
        let len = usize::from(offset < source.len());
        Self {
            src: NamedSource::new(name, source.to_string()),
            span: SourceSpan::from(offset..offset + len),
            help: help_for(&message),
            syntax,
            name: name.to_string(),
            message,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Byte offset of a 1-based line / column, clamped to the source
fn offset_of(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let rest = &source[line_start..];
    let line_len = rest.find('\n').unwrap_or(rest.len());
    let within = rest[..line_len]
        .char_indices()
        .nth(column.saturating_sub(1))
        .map_or(line_len, |(i, _)| i);
    line_start + within
}

fn help_for(message: &str) -> Option<String> {
    let msg = message.to_lowercase();

    if msg.contains("trailing comma") {
        return Some("Remove the comma after the last element".to_string());
    }
    if msg.contains("eof while parsing") {
        return Some("The document ends early; check for an unclosed bracket, brace or string".to_string());
    }
    if msg.contains("key must be a string") {
        return Some("Object keys must be double-quoted: {\"name\": ...}".to_string());
    }
    if msg.contains("expected `,` or") {
        return Some("Separate members with commas".to_string());
    }
    if msg.contains("tab") {
        return Some("YAML requires spaces for indentation, not tabs".to_string());
    }
    if msg.contains("duplicate") {
        return Some("Each key can only appear once".to_string());
    }
    if msg.contains("mapping values are not allowed") {
        return Some("You may be missing a space after ':' or have incorrect indentation".to_string());
    }
    None
}

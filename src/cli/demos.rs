//! Demo forms bundled into the binary
//!
//! Each `demos/<name>.json` holds `description`, `schema` and optionally
//! `uischema` and `data`.

use rust_embed::Embed;
use serde::Deserialize;
use serde_json::Value;

use crate::cli::helpers::LoadError;

#[derive(Embed)]
#[folder = "demos/"]
struct DemoAssets;

#[derive(Debug, Clone, Deserialize)]
pub struct Demo {
    #[serde(skip)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub schema: Value,
    #[serde(default)]
    pub uischema: Option<Value>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Names of all bundled demos, sorted
pub fn names() -> Vec<String> {
    let mut names: Vec<String> = DemoAssets::iter()
        .filter_map(|file| file.strip_suffix(".json").map(str::to_string))
        .collect();
    names.sort();
    names
}

pub fn load(name: &str) -> Result<Demo, LoadError> {
    let file = DemoAssets::get(&format!("{}.json", name))
        .ok_or_else(|| LoadError::UnknownDemo(name.to_string()))?;
    let mut demo: Demo = serde_json::from_slice(&file.data).map_err(|e| LoadError::MalformedDemo {
        name: name.to_string(),
        message: e.to_string(),
    })?;
    demo.name = name.to_string();
    Ok(demo)
}

pub fn all() -> Result<Vec<Demo>, LoadError> {
    names().iter().map(|name| load(name)).collect()
}

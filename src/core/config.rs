//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::core::form::{FormOptions, ValidationMode};

/// Project-local config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = ".sfr.yaml";

/// SFR configuration with layered hierarchy
#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Default output format (`text`, `json`, `yaml`)
    pub default_format: Option<String>,

    /// Log filter used when `RUST_LOG` is unset (e.g. `info`, `sfr=debug`)
    pub log_level: Option<String>,

    /// Render every control disabled
    pub readonly: Option<bool>,

    /// Whether validation errors are computed and shown
    pub validation_mode: Option<ValidationMode>,

    /// Placeholder shown by empty select menus
    pub select_placeholder: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/sfr/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Project config (./.sfr.yaml)
        if let Ok(cwd) = std::env::current_dir() {
            if let Some(project) = Self::read_file(&cwd.join(PROJECT_CONFIG_FILE)) {
                config.merge(project);
            }
        }

        // 4. Environment variables
        config.merge_env(|key| std::env::var(key).ok());

        config
    }

    /// Read one config layer; unreadable or malformed files are skipped
    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                warn!("Failed to read config {}: {}", path.display(), e);
                return None;
            }
        };
        match serde_yml::from_str::<Config>(&contents) {
            Ok(c) => Some(c),
            Err(e) => {
                warn!("Ignoring malformed config {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "sfr")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Apply `SFR_*` environment overrides
    fn merge_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(format) = var("SFR_FORMAT") {
            self.default_format = Some(format);
        }
        if let Some(level) = var("SFR_LOG") {
            self.log_level = Some(level);
        }
        if let Some(readonly) = var("SFR_READONLY") {
            match readonly.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => self.readonly = Some(true),
                "0" | "false" | "no" => self.readonly = Some(false),
                other => warn!("Ignoring SFR_READONLY={}", other),
            }
        }
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
        if other.readonly.is_some() {
            self.readonly = other.readonly;
        }
        if other.validation_mode.is_some() {
            self.validation_mode = other.validation_mode;
        }
        if other.select_placeholder.is_some() {
            self.select_placeholder = other.select_placeholder;
        }
    }

    /// Rendering options derived from this configuration
    pub fn form_options(&self) -> FormOptions {
        let defaults = FormOptions::default();
        FormOptions {
            readonly: self.readonly.unwrap_or(defaults.readonly),
            validation_mode: self.validation_mode.unwrap_or(defaults.validation_mode),
            select_placeholder: self
                .select_placeholder
                .clone()
                .unwrap_or(defaults.select_placeholder),
        }
    }
}

//! Settings for the yamlconf command-line tool.
//!
//! Settings are read from a TOML file and overridden by command-line flags.
//! The library itself takes no settings; callers pick a parser directly.
//!
//! # Example
//!
//! ```
//! use yamlconf::settings::{ParserKind, Settings};
//!
//! let settings = Settings::default();
//! assert_eq!(settings.parser, ParserKind::SerdeYaml);
//! assert!(!settings.interpolate_env);
//!
//! let custom = Settings {
//!     interpolate_env: true,
//!     ..Settings::default()
//! };
//! assert!(custom.interpolate_env);
//! ```

use crate::document::env::EnvInterpolator;
use crate::document::parser::{DocumentParser, SerdeYamlParser, YamlRustParser};
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// YAML backend used to parse documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum ParserKind {
    /// serde_yaml (libyaml based)
    #[default]
    #[serde(rename = "serde_yaml")]
    #[value(name = "serde_yaml")]
    SerdeYaml,
    /// yaml-rust2 (pure Rust)
    #[serde(rename = "yaml-rust2")]
    #[value(name = "yaml-rust2")]
    YamlRust,
}

/// Settings for the yamlconf tool.
///
/// # Fields
///
/// * `parser` - YAML backend (default: serde_yaml)
/// * `interpolate_env` - Substitute `${VAR:-default}` scalars from the environment (default: false)
/// * `log_level` - Default tracing filter when `RUST_LOG` is unset (default: "warn")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// YAML backend
    #[serde(default)]
    pub parser: ParserKind,

    /// Substitute environment references in string scalars
    #[serde(default)]
    pub interpolate_env: bool,

    /// Default log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Returns the default log level.
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            parser: ParserKind::default(),
            interpolate_env: false,
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Returns the path to the settings file.
    ///
    /// Uses `~/.config/yamlconf/config.toml` on all platforms.
    pub fn settings_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("yamlconf");
            path.push("config.toml");
            path
        })
    }

    /// Loads settings from the default settings file.
    ///
    /// Returns the defaults if the file doesn't exist.
    pub fn load() -> anyhow::Result<Self> {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads settings from `path`.
    ///
    /// A missing file gives the defaults; an unreadable or invalid one is an
    /// error.
    pub fn load_from(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Invalid settings file {}", path.display()))
    }

    /// Saves settings to `path`.
    pub fn save_to(&self, path: &std::path::Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Builds the document parser these settings describe.
    pub fn document_parser(&self) -> Box<dyn DocumentParser> {
        match (self.parser, self.interpolate_env) {
            (ParserKind::SerdeYaml, false) => Box::new(SerdeYamlParser),
            (ParserKind::SerdeYaml, true) => Box::new(EnvInterpolator::new(SerdeYamlParser)),
            (ParserKind::YamlRust, false) => Box::new(YamlRustParser),
            (ParserKind::YamlRust, true) => Box::new(EnvInterpolator::new(YamlRustParser)),
        }
    }
}

//! Errors raised while loading a configuration document.
//!
//! Lookups never produce these; a missing or mismatched key is reported as
//! absence by the accessors (see [`crate::keypath::LookupError`]).

use thiserror::Error;

/// Result alias for loading operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while reading or parsing a document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The serde_yaml backend rejected the document.
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The yaml-rust2 backend rejected the document.
    #[error("Failed to parse YAML: {0}")]
    YamlRust(String),

    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document is not valid UTF-8")]
    InvalidUtf8,

    /// A `${NAME?message}` or `${NAME:?message}` reference could not be satisfied.
    #[error("{message}")]
    MissingEnvVar { name: String, message: String },
}

impl From<yaml_rust2::ScanError> for ConfigError {
    fn from(err: yaml_rust2::ScanError) -> Self {
        ConfigError::YamlRust(err.to_string())
    }
}

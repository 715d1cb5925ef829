//! Environment-variable substitution for string scalars.
//!
//! [`EnvInterpolator`] wraps another [`DocumentParser`] and rewrites string
//! scalars whose whole text is an environment reference:
//!
//! | Form              | Variable set, non-empty | Set but empty | Unset          |
//! |-------------------|-------------------------|---------------|----------------|
//! | `${NAME}`         | value                   | `""`          | `""`           |
//! | `${NAME-dflt}`    | value                   | `""`          | `dflt`         |
//! | `${NAME:-dflt}`   | value                   | `dflt`        | `dflt`         |
//! | `${NAME?msg}`     | value                   | `""`          | error          |
//! | `${NAME:?msg}`    | value                   | error         | error          |
//!
//! Scalars that merely contain a reference (`prefix-${NAME}`) are left alone.
//!
//! # Example
//!
//! ```
//! use yamlconf::document::env::EnvInterpolator;
//! use yamlconf::document::parser::{DocumentParser, SerdeYamlParser};
//! use yamlconf::document::node::{ConfigTree, Scalar};
//!
//! let parser = EnvInterpolator::new(SerdeYamlParser).with_lookup(|_| None);
//! let tree = parser.parse_str("image: ${DB_IMAGE:-mysql}").unwrap();
//! assert_eq!(
//!     tree.as_mapping().unwrap()["image"],
//!     ConfigTree::Scalar(Scalar::String("mysql".to_string()))
//! );
//! ```

use super::node::{ConfigTree, Scalar};
use super::parser::DocumentParser;
use crate::error::{ConfigError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static ENV_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\$\{\s*(?P<name>\w+)(?:(?P<separator>:?[-?])(?P<value>\S+)?)?\s*\}$")
        .expect("environment reference pattern is valid")
});

type Lookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Parser decorator that substitutes `${NAME...}` references after parsing.
pub struct EnvInterpolator<P> {
    inner: P,
    lookup: Lookup,
}

impl<P: DocumentParser> EnvInterpolator<P> {
    /// Wraps `inner`, reading variables from the process environment.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            lookup: Box::new(|name| std::env::var(name).ok()),
        }
    }

    /// Replaces the variable source.
    pub fn with_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.lookup = Box::new(lookup);
        self
    }

    fn interpolate(&self, node: ConfigTree) -> Result<ConfigTree> {
        match node {
            ConfigTree::Mapping(entries) => entries
                .into_iter()
                .map(|(key, child)| Ok((key, self.interpolate(child)?)))
                .collect::<Result<_>>()
                .map(ConfigTree::Mapping),
            ConfigTree::Sequence(items) => items
                .into_iter()
                .map(|child| self.interpolate(child))
                .collect::<Result<_>>()
                .map(ConfigTree::Sequence),
            ConfigTree::Scalar(Scalar::String(text)) => match self.substitute(&text)? {
                Some(value) => Ok(ConfigTree::Scalar(Scalar::String(value))),
                None => Ok(ConfigTree::Scalar(Scalar::String(text))),
            },
            leaf @ ConfigTree::Scalar(_) => Ok(leaf),
        }
    }

    /// Returns `None` when `text` is not an environment reference.
    fn substitute(&self, text: &str) -> Result<Option<String>> {
        let Some(captures) = ENV_REFERENCE.captures(text) else {
            return Ok(None);
        };
        let name = &captures["name"];
        let separator = captures.name("separator").map(|m| m.as_str());
        let value = captures.name("value").map_or("", |m| m.as_str());
        let environment = (self.lookup)(name);

        tracing::trace!(var = name, ?separator, found = environment.is_some(), "env reference");
        resolve_reference(name, separator, value, environment).map(Some)
    }
}

fn resolve_reference(
    name: &str,
    separator: Option<&str>,
    value: &str,
    environment: Option<String>,
) -> Result<String> {
    if let Some(env) = environment.as_deref().filter(|env| !env.is_empty()) {
        return Ok(env.to_string());
    }

    let unset = environment.is_none();
    match separator {
        Some("?") if unset => Err(missing(name, "Missing mandatory variable", value)),
        Some(":?") if unset => Err(missing(name, "Missing mandatory variable", value)),
        Some(":?") => Err(missing(name, "Empty mandatory variable", value)),
        Some(":-") => Ok(value.to_string()),
        Some("-") if unset => Ok(value.to_string()),
        _ => Ok(String::new()),
    }
}

fn missing(name: &str, reason: &str, value: &str) -> ConfigError {
    ConfigError::MissingEnvVar {
        name: name.to_string(),
        message: format!("{} {}: {}", reason, name, value),
    }
}

impl<P: DocumentParser> DocumentParser for EnvInterpolator<P> {
    fn parse_str(&self, source: &str) -> Result<ConfigTree> {
        let tree = self.inner.parse_str(source)?;
        self.interpolate(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_matches_whole_scalar_only() {
        assert!(ENV_REFERENCE.is_match("${HOME}"));
        assert!(ENV_REFERENCE.is_match("${ HOME }"));
        assert!(ENV_REFERENCE.is_match("${DB_IMAGE:-mysql}"));
        assert!(ENV_REFERENCE.is_match("${DB_IMAGE?required}"));
        assert!(!ENV_REFERENCE.is_match("prefix-${HOME}"));
        assert!(!ENV_REFERENCE.is_match("${HOME}-suffix"));
        assert!(!ENV_REFERENCE.is_match("$HOME"));
    }

    #[test]
    fn test_set_variable_wins() {
        let result = resolve_reference("A", Some(":-"), "dflt", Some("set".to_string()));
        assert_eq!(result.unwrap(), "set");
    }

    #[test]
    fn test_default_forms() {
        assert_eq!(resolve_reference("A", Some(":-"), "d", None).unwrap(), "d");
        assert_eq!(
            resolve_reference("A", Some(":-"), "d", Some(String::new())).unwrap(),
            "d"
        );
        assert_eq!(resolve_reference("A", Some("-"), "d", None).unwrap(), "d");
        assert_eq!(
            resolve_reference("A", Some("-"), "d", Some(String::new())).unwrap(),
            ""
        );
        assert_eq!(resolve_reference("A", None, "", None).unwrap(), "");
    }

    #[test]
    fn test_mandatory_forms() {
        assert!(resolve_reference("A", Some("?"), "needed", None).is_err());
        assert_eq!(
            resolve_reference("A", Some("?"), "needed", Some(String::new())).unwrap(),
            ""
        );
        assert!(resolve_reference("A", Some(":?"), "needed", Some(String::new())).is_err());

        match resolve_reference("DB", Some(":?"), "needed", None) {
            Err(ConfigError::MissingEnvVar { name, message }) => {
                assert_eq!(name, "DB");
                assert_eq!(message, "Missing mandatory variable DB: needed");
            }
            other => panic!("Expected MissingEnvVar, got {:?}", other),
        }
    }
}

//! Typed, read-only access to a loaded document.
//!
//! [`Config`] owns a parsed [`ConfigTree`] and answers dotted-key queries.
//! Every kind of miss (absent key, wrong shape, index out of range) comes
//! back as `None`; use [`Config::lookup`] to see which one happened.
//!
//! # Example
//!
//! ```
//! use yamlconf::Config;
//!
//! let config: Config = "version: 3\nservices:\n  db:\n    image: mysql\n".parse().unwrap();
//!
//! assert_eq!(config.get_int("version"), Some(3));
//! assert_eq!(config.get_string("version").as_deref(), Some("3"));
//! assert_eq!(config.get_string("services.db.image").as_deref(), Some("mysql"));
//! assert_eq!(config.get_string("services.db"), None);
//! ```

use crate::document::node::{ConfigTree, Scalar};
use crate::document::parser::{DocumentParser, SerdeYamlParser};
use crate::error::{ConfigError, Result};
use crate::keypath::{Evaluator, LookupError, Parser};
use std::io::Read;
use std::str::FromStr;

/// Conversion from a document node to a list element type.
///
/// Conversions are exact: a string scalar never becomes an integer and an
/// integer never becomes a string.
pub trait FromNode: Sized {
    /// Node kind accepted by this conversion, for diagnostics.
    const EXPECTED: &'static str;

    fn from_node(node: &ConfigTree) -> Option<Self>;
}

impl FromNode for String {
    const EXPECTED: &'static str = "string";

    fn from_node(node: &ConfigTree) -> Option<Self> {
        match node {
            ConfigTree::Scalar(Scalar::String(s)) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromNode for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_node(node: &ConfigTree) -> Option<Self> {
        match node {
            ConfigTree::Scalar(Scalar::Integer(i)) => Some(*i),
            _ => None,
        }
    }
}

impl FromNode for f64 {
    const EXPECTED: &'static str = "float";

    fn from_node(node: &ConfigTree) -> Option<Self> {
        match node {
            ConfigTree::Scalar(Scalar::Float(f)) => Some(*f),
            _ => None,
        }
    }
}

impl FromNode for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_node(node: &ConfigTree) -> Option<Self> {
        match node {
            ConfigTree::Scalar(Scalar::Boolean(b)) => Some(*b),
            _ => None,
        }
    }
}

/// Accepts any node unchanged.
impl FromNode for ConfigTree {
    const EXPECTED: &'static str = "any node";

    fn from_node(node: &ConfigTree) -> Option<Self> {
        Some(node.clone())
    }
}

/// Accepts `null` as `None`, anything else through `T`.
impl<T: FromNode> FromNode for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_node(node: &ConfigTree) -> Option<Self> {
        match node {
            ConfigTree::Scalar(Scalar::Null) => Some(None),
            other => T::from_node(other).map(Some),
        }
    }
}

/// A sequence whose every element converts through `T`.
impl<T: FromNode> FromNode for Vec<T> {
    const EXPECTED: &'static str = "sequence";

    fn from_node(node: &ConfigTree) -> Option<Self> {
        node.as_sequence()?.iter().map(T::from_node).collect()
    }
}

/// A loaded configuration document.
///
/// The tree is never modified after loading, so a `Config` can be shared
/// across threads and queried concurrently.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    tree: ConfigTree,
}

impl Config {
    /// Wraps an already parsed tree.
    pub fn from_tree(tree: ConfigTree) -> Self {
        Self { tree }
    }

    /// Parses YAML text with the default parser.
    pub fn parse_str(source: &str) -> Result<Self> {
        Self::with_parser(&SerdeYamlParser, source)
    }

    /// Parses YAML text with a caller-supplied parser.
    pub fn with_parser<P: DocumentParser + ?Sized>(parser: &P, source: &str) -> Result<Self> {
        parser.parse_str(source).map(Self::from_tree)
    }

    /// Reads a UTF-8 byte stream to the end and parses it with the default parser.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with(&SerdeYamlParser, reader)
    }

    /// Reads a UTF-8 byte stream to the end and parses it with `parser`.
    pub fn from_reader_with<P, R>(parser: &P, mut reader: R) -> Result<Self>
    where
        P: DocumentParser + ?Sized,
        R: Read,
    {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let source = String::from_utf8(bytes).map_err(|_| ConfigError::InvalidUtf8)?;
        Self::with_parser(parser, &source)
    }

    /// The document root.
    pub fn tree(&self) -> &ConfigTree {
        &self.tree
    }

    /// Resolves `key` to a node, reporting why it failed.
    pub fn lookup(&self, key: &str) -> std::result::Result<&ConfigTree, LookupError> {
        let result = Parser::parse(key).and_then(|path| Evaluator::new(&self.tree).resolve(&path));
        if let Err(err) = &result {
            tracing::debug!(key, %err, "lookup failed");
        }
        result
    }

    /// Gets the textual form of a scalar.
    ///
    /// Integers, floats and booleans are rendered as text. Mappings,
    /// sequences, `null` and missing keys give `None`.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.project(key, "scalar", |node| match node {
            ConfigTree::Scalar(scalar) if !scalar.is_null() => Some(scalar.to_string()),
            _ => None,
        })
    }

    /// Gets an integer scalar.
    ///
    /// Only values parsed as integers qualify; `"3"` as a quoted string does not.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.project(key, i64::EXPECTED, i64::from_node)
    }

    /// Gets a sequence whose elements all convert to `T`.
    ///
    /// A single element of the wrong type makes the whole call return `None`.
    ///
    /// ```
    /// use yamlconf::Config;
    ///
    /// let config = Config::parse_str("ports: [80, 443]\nmixed: [80, http]").unwrap();
    /// assert_eq!(config.get_list::<i64>("ports"), Some(vec![80, 443]));
    /// assert_eq!(config.get_list::<i64>("mixed"), None);
    /// ```
    pub fn get_list<T: FromNode>(&self, key: &str) -> Option<Vec<T>> {
        self.project(key, Vec::<T>::EXPECTED, Vec::<T>::from_node)
    }

    fn project<T>(
        &self,
        key: &str,
        expected: &'static str,
        convert: impl FnOnce(&ConfigTree) -> Option<T>,
    ) -> Option<T> {
        let node = self.lookup(key).ok()?;
        let value = convert(node);
        if value.is_none() {
            let err = LookupError::TypeMismatch {
                expected,
                found: node.kind(),
            };
            tracing::debug!(key, %err, "lookup failed");
        }
        value
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(source: &str) -> Result<Self> {
        Self::parse_str(source)
    }
}

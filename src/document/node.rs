//! Parsed YAML document representation.
//!
//! A loaded document is a `ConfigTree`: mappings, sequences and scalar
//! leaves. The tree is built once by a [`DocumentParser`](super::parser::DocumentParser)
//! and never mutated afterwards, so it can be shared freely between readers.
//!
//! # Example
//!
//! ```
//! use yamlconf::document::node::{ConfigTree, Scalar};
//! use indexmap::IndexMap;
//!
//! let mut db = IndexMap::new();
//! db.insert("image".to_string(), ConfigTree::Scalar(Scalar::String("mysql".to_string())));
//! let root = ConfigTree::Mapping(IndexMap::from([("db".to_string(), ConfigTree::Mapping(db))]));
//!
//! assert!(root.is_mapping());
//! assert_eq!(root.as_mapping().unwrap()["db"].as_mapping().unwrap().len(), 1);
//! ```

use indexmap::IndexMap;

/// A leaf value in a YAML document.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl std::fmt::Display for Scalar {
    /// Natural textual form of the scalar.
    ///
    /// Floats always carry a fractional part or exponent (`1.0`, `1e300`) so a
    /// float never displays like an integer. `Null` displays as `null`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::String(s) => write!(f, "{}", s),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(fl) => write!(f, "{:?}", fl),
            Scalar::Boolean(b) => write!(f, "{}", b),
            Scalar::Null => write!(f, "null"),
        }
    }
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Short name of the scalar kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::String(_) => "string",
            Scalar::Integer(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::Boolean(_) => "boolean",
            Scalar::Null => "null",
        }
    }
}

/// A node of a parsed configuration document.
///
/// Mapping order follows the source document.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigTree {
    /// String-keyed mapping
    Mapping(IndexMap<String, ConfigTree>),
    /// Ordered sequence
    Sequence(Vec<ConfigTree>),
    /// Leaf value
    Scalar(Scalar),
}

impl Default for ConfigTree {
    fn default() -> Self {
        ConfigTree::Scalar(Scalar::Null)
    }
}

impl ConfigTree {
    /// Returns true if this node is a mapping.
    ///
    /// # Example
    ///
    /// ```
    /// use yamlconf::document::node::{ConfigTree, Scalar};
    /// use indexmap::IndexMap;
    ///
    /// assert!(ConfigTree::Mapping(IndexMap::new()).is_mapping());
    /// assert!(!ConfigTree::Scalar(Scalar::Integer(3)).is_mapping());
    /// ```
    pub fn is_mapping(&self) -> bool {
        matches!(self, ConfigTree::Mapping(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, ConfigTree::Sequence(_))
    }

    /// Returns true for mappings and sequences.
    pub fn is_composite(&self) -> bool {
        matches!(self, ConfigTree::Mapping(_) | ConfigTree::Sequence(_))
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, ConfigTree>> {
        match self {
            ConfigTree::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ConfigTree]> {
        match self {
            ConfigTree::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            ConfigTree::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Short name of the node kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigTree::Mapping(_) => "mapping",
            ConfigTree::Sequence(_) => "sequence",
            ConfigTree::Scalar(scalar) => scalar.kind(),
        }
    }
}

impl From<Scalar> for ConfigTree {
    fn from(scalar: Scalar) -> Self {
        ConfigTree::Scalar(scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::String("mysql".to_string()).to_string(), "mysql");
        assert_eq!(Scalar::Integer(3).to_string(), "3");
        assert_eq!(Scalar::Integer(-42).to_string(), "-42");
        assert_eq!(Scalar::Boolean(true).to_string(), "true");
        assert_eq!(Scalar::Null.to_string(), "null");
    }

    #[test]
    fn test_float_display_keeps_fraction() {
        assert_eq!(Scalar::Float(1.5).to_string(), "1.5");
        assert_eq!(Scalar::Float(1.0).to_string(), "1.0");
        assert_ne!(Scalar::Float(3.0).to_string(), Scalar::Integer(3).to_string());
    }

    #[test]
    fn test_float_display_large_and_special() {
        assert_eq!(Scalar::Float(1e16).to_string(), "1e16");
        assert_eq!(Scalar::Float(f64::INFINITY).to_string(), "inf");
        assert_eq!(Scalar::Float(f64::NEG_INFINITY).to_string(), "-inf");
        assert_eq!(Scalar::Float(f64::NAN).to_string(), "NaN");
    }

    #[test]
    fn test_node_kind_checks() {
        let map = ConfigTree::Mapping(IndexMap::new());
        let seq = ConfigTree::Sequence(vec![]);
        let leaf = ConfigTree::from(Scalar::Boolean(false));

        assert!(map.is_mapping() && map.is_composite());
        assert!(seq.is_sequence() && seq.is_composite());
        assert!(!leaf.is_composite());
        assert_eq!(leaf.kind(), "boolean");
        assert_eq!(seq.kind(), "sequence");
    }

    #[test]
    fn test_default_is_null_scalar() {
        assert_eq!(ConfigTree::default(), ConfigTree::Scalar(Scalar::Null));
    }
}

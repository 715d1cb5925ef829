//! YAML parsing into `ConfigTree` structures.
//!
//! Parsing is delegated to a [`DocumentParser`]. Two backends are provided:
//! [`SerdeYamlParser`] (the default) and [`YamlRustParser`]. Callers can
//! supply their own implementation, or wrap one in
//! [`EnvInterpolator`](super::env::EnvInterpolator), to change how scalars
//! are produced before any lookup sees them.
//!
//! # Example
//!
//! ```
//! use yamlconf::document::parser::{DocumentParser, SerdeYamlParser};
//! use yamlconf::document::node::{ConfigTree, Scalar};
//!
//! let tree = SerdeYamlParser.parse_str("version: 3").unwrap();
//! let version = &tree.as_mapping().unwrap()["version"];
//! assert_eq!(version, &ConfigTree::Scalar(Scalar::Integer(3)));
//! ```

use super::node::{ConfigTree, Scalar};
use crate::error::Result;
use indexmap::IndexMap;
use serde_yaml::Value as SerdeValue;
use yaml_rust2::{Yaml, YamlLoader};

/// Turns YAML source text into a `ConfigTree`.
///
/// Only the first document of a multi-document stream is used. An empty
/// stream produces a `Null` scalar.
pub trait DocumentParser {
    fn parse_str(&self, source: &str) -> Result<ConfigTree>;
}

impl<P: DocumentParser + ?Sized> DocumentParser for &P {
    fn parse_str(&self, source: &str) -> Result<ConfigTree> {
        (**self).parse_str(source)
    }
}

impl<P: DocumentParser + ?Sized> DocumentParser for Box<P> {
    fn parse_str(&self, source: &str) -> Result<ConfigTree> {
        (**self).parse_str(source)
    }
}

/// Parser backed by `serde_yaml`.
///
/// `<<` merge keys are applied before conversion. Integers that do not fit
/// in `u64` are rejected by serde_yaml and fail the load.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeYamlParser;

impl DocumentParser for SerdeYamlParser {
    fn parse_str(&self, source: &str) -> Result<ConfigTree> {
        let mut value: SerdeValue = match serde_yaml::Deserializer::from_str(source).next() {
            Some(document) => serde::Deserialize::deserialize(document)?,
            None => SerdeValue::Null,
        };
        value.apply_merge()?;
        Ok(convert_serde_value(&value))
    }
}

/// Converts a `serde_yaml::Value` into a `ConfigTree`.
///
/// Integers that fit in `i64` stay integers; every other number becomes a
/// float. Tags are dropped.
pub fn convert_serde_value(value: &SerdeValue) -> ConfigTree {
    match value {
        SerdeValue::Mapping(map) => {
            let mut entries = IndexMap::with_capacity(map.len());
            for (key, child) in map {
                match serde_key(key) {
                    Some(key) => {
                        entries.insert(key, convert_serde_value(child));
                    }
                    None => tracing::warn!(?key, "skipping mapping entry with non-scalar key"),
                }
            }
            ConfigTree::Mapping(entries)
        }
        SerdeValue::Sequence(items) => {
            ConfigTree::Sequence(items.iter().map(convert_serde_value).collect())
        }
        SerdeValue::String(s) => ConfigTree::Scalar(Scalar::String(s.clone())),
        SerdeValue::Number(n) => match n.as_i64() {
            Some(i) => ConfigTree::Scalar(Scalar::Integer(i)),
            None => ConfigTree::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN))),
        },
        SerdeValue::Bool(b) => ConfigTree::Scalar(Scalar::Boolean(*b)),
        SerdeValue::Null => ConfigTree::Scalar(Scalar::Null),
        SerdeValue::Tagged(tagged) => convert_serde_value(&tagged.value),
    }
}

/// Mapping keys are looked up by name, so scalar keys are stringified.
fn serde_key(key: &SerdeValue) -> Option<String> {
    match key {
        SerdeValue::String(s) => Some(s.clone()),
        SerdeValue::Number(n) => Some(n.to_string()),
        SerdeValue::Bool(b) => Some(b.to_string()),
        SerdeValue::Tagged(tagged) => serde_key(&tagged.value),
        SerdeValue::Null | SerdeValue::Sequence(_) | SerdeValue::Mapping(_) => None,
    }
}

/// Parser backed by `yaml-rust2`.
///
/// Anchors and aliases are resolved by the loader; `<<` merge keys are
/// applied during conversion. Integers beyond `i64` load as floats.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlRustParser;

impl DocumentParser for YamlRustParser {
    fn parse_str(&self, source: &str) -> Result<ConfigTree> {
        let documents = YamlLoader::load_from_str(source)?;
        Ok(documents
            .first()
            .map(convert_yaml_rust)
            .unwrap_or_default())
    }
}

/// Converts a `yaml_rust2::Yaml` node into a `ConfigTree`.
///
/// Explicit keys win over merged ones, and earlier merge sources win over
/// later ones.
pub fn convert_yaml_rust(value: &Yaml) -> ConfigTree {
    match value {
        Yaml::Hash(hash) => {
            let mut entries = IndexMap::with_capacity(hash.len());
            let mut merges = Vec::new();
            for (key, child) in hash {
                if matches!(key, Yaml::String(name) if name == MERGE_KEY) {
                    merges.push(child);
                    continue;
                }
                match yaml_rust_key(key) {
                    Some(key) => {
                        entries.insert(key, convert_yaml_rust(child));
                    }
                    None => tracing::warn!(?key, "skipping mapping entry with non-scalar key"),
                }
            }
            for source in merges {
                merge_yaml_rust(&mut entries, source);
            }
            ConfigTree::Mapping(entries)
        }
        Yaml::Array(items) => ConfigTree::Sequence(items.iter().map(convert_yaml_rust).collect()),
        Yaml::String(s) => ConfigTree::Scalar(Scalar::String(s.clone())),
        Yaml::Integer(i) => ConfigTree::Scalar(Scalar::Integer(*i)),
        Yaml::Real(_) => ConfigTree::Scalar(Scalar::Float(value.as_f64().unwrap_or(f64::NAN))),
        Yaml::Boolean(b) => ConfigTree::Scalar(Scalar::Boolean(*b)),
        Yaml::Null | Yaml::BadValue | Yaml::Alias(_) => ConfigTree::Scalar(Scalar::Null),
    }
}

const MERGE_KEY: &str = "<<";

/// Adds the entries of a `<<` value without replacing existing keys.
fn merge_yaml_rust(entries: &mut IndexMap<String, ConfigTree>, source: &Yaml) {
    match source {
        Yaml::Hash(_) => {
            if let ConfigTree::Mapping(merged) = convert_yaml_rust(source) {
                for (key, child) in merged {
                    entries.entry(key).or_insert(child);
                }
            }
        }
        Yaml::Array(sources) => {
            for source in sources {
                match source {
                    Yaml::Hash(_) => merge_yaml_rust(entries, source),
                    other => tracing::warn!(?other, "skipping non-mapping merge source"),
                }
            }
        }
        other => tracing::warn!(?other, "skipping non-mapping merge source"),
    }
}

fn yaml_rust_key(key: &Yaml) -> Option<String> {
    match key {
        Yaml::String(s) | Yaml::Real(s) => Some(s.clone()),
        Yaml::Integer(i) => Some(i.to_string()),
        Yaml::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
version: 3
ratio: 0.5
enabled: true
nothing: ~
services:
  db:
    image: mysql
  names:
    - first: James
    - first: Andrew
"#;

    fn assert_sample(tree: &ConfigTree) {
        let root = tree.as_mapping().expect("root should be a mapping");
        assert_eq!(root["version"], ConfigTree::Scalar(Scalar::Integer(3)));
        assert_eq!(root["ratio"], ConfigTree::Scalar(Scalar::Float(0.5)));
        assert_eq!(root["enabled"], ConfigTree::Scalar(Scalar::Boolean(true)));
        assert_eq!(root["nothing"], ConfigTree::Scalar(Scalar::Null));

        let services = root["services"].as_mapping().expect("services mapping");
        let names = services["names"].as_sequence().expect("names sequence");
        assert_eq!(names.len(), 2);
        assert_eq!(
            names[1].as_mapping().unwrap()["first"],
            ConfigTree::Scalar(Scalar::String("Andrew".to_string()))
        );
    }

    #[test]
    fn test_serde_parser_builds_tree() {
        let tree = SerdeYamlParser.parse_str(SAMPLE).unwrap();
        assert_sample(&tree);
    }

    #[test]
    fn test_yaml_rust_parser_builds_tree() {
        let tree = YamlRustParser.parse_str(SAMPLE).unwrap();
        assert_sample(&tree);
    }

    #[test]
    fn test_mapping_order_preserved() {
        let tree = SerdeYamlParser.parse_str("b: 1\na: 2\nc: 3").unwrap();
        let keys: Vec<&str> = tree
            .as_mapping()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_empty_document_is_null() {
        assert_eq!(SerdeYamlParser.parse_str("").unwrap(), ConfigTree::default());
        assert_eq!(YamlRustParser.parse_str("").unwrap(), ConfigTree::default());
    }

    #[test]
    fn test_only_first_document_used() {
        let source = "a: first\n---\na: second\n";
        for tree in [
            SerdeYamlParser.parse_str(source).unwrap(),
            YamlRustParser.parse_str(source).unwrap(),
        ] {
            assert_eq!(
                tree.as_mapping().unwrap()["a"],
                ConfigTree::Scalar(Scalar::String("first".to_string()))
            );
        }
    }

    #[test]
    fn test_scalar_keys_are_stringified() {
        let tree = SerdeYamlParser.parse_str("1: one\ntrue: yes-value").unwrap();
        let map = tree.as_mapping().unwrap();
        assert!(map.contains_key("1"));
        assert!(map.contains_key("true"));
    }

    #[test]
    fn test_invalid_yaml_fails() {
        assert!(SerdeYamlParser.parse_str("key: [unclosed").is_err());
        assert!(YamlRustParser.parse_str("key: [unclosed").is_err());
    }

    #[test]
    fn test_yaml_rust_resolves_aliases() {
        let source = "base: &b\n  image: mysql\ncopy: *b\n";
        let tree = YamlRustParser.parse_str(source).unwrap();
        let copy = tree.as_mapping().unwrap()["copy"].as_mapping().unwrap();
        assert_eq!(
            copy["image"],
            ConfigTree::Scalar(Scalar::String("mysql".to_string()))
        );
    }

    const MERGED: &str = r#"
base: &base
  image: mysql
  port: 3306
extra: &extra
  image: postgres
  restart: always
services:
  db:
    <<: *base
    port: 5432
  cache:
    <<: [*extra, *base]
"#;

    #[test]
    fn test_merge_keys_applied() {
        for tree in [
            SerdeYamlParser.parse_str(MERGED).unwrap(),
            YamlRustParser.parse_str(MERGED).unwrap(),
        ] {
            let services = tree.as_mapping().unwrap()["services"].as_mapping().unwrap();
            let db = services["db"].as_mapping().unwrap();
            assert_eq!(db["image"], ConfigTree::Scalar(Scalar::String("mysql".to_string())));
            assert_eq!(db["port"], ConfigTree::Scalar(Scalar::Integer(5432)));
            assert!(!db.contains_key("<<"));

            let cache = services["cache"].as_mapping().unwrap();
            assert_eq!(
                cache["image"],
                ConfigTree::Scalar(Scalar::String("postgres".to_string()))
            );
            assert_eq!(cache["port"], ConfigTree::Scalar(Scalar::Integer(3306)));
            assert_eq!(
                cache["restart"],
                ConfigTree::Scalar(Scalar::String("always".to_string()))
            );
        }
    }

    #[test]
    fn test_integer_beyond_u64_fails_serde_backend() {
        assert!(SerdeYamlParser.parse_str("big: 99999999999999999999").is_err());
    }

    #[test]
    fn test_integer_beyond_i64_becomes_float() {
        let tree = YamlRustParser.parse_str("big: 99999999999999999999").unwrap();
        let big = &tree.as_mapping().unwrap()["big"];
        assert_eq!(big, &ConfigTree::Scalar(Scalar::Float(1e20)));
        assert_eq!(big.as_scalar().unwrap().to_string(), "1e20");

        let tree = SerdeYamlParser.parse_str("big: 18446744073709551615").unwrap();
        assert!(matches!(
            tree.as_mapping().unwrap()["big"],
            ConfigTree::Scalar(Scalar::Float(_))
        ));
    }
}

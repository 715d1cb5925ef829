//! Integration tests for loading configuration files.

use std::io::Write;
use tempfile::NamedTempFile;
use yamlconf::document::env::EnvInterpolator;
use yamlconf::document::parser::{SerdeYamlParser, YamlRustParser};
use yamlconf::file::loader::{load_config_file, load_config_from_reader};

#[test]
fn test_load_simple_yaml_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "services:\n  db:\n    image: mysql\n").unwrap();

    let config = load_config_file(temp_file.path(), &SerdeYamlParser).unwrap();
    assert_eq!(config.get_string("services.db.image").as_deref(), Some("mysql"));
}

#[test]
fn test_load_fixture_with_both_backends() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/test.yml");

    let serde = load_config_file(path, &SerdeYamlParser).unwrap();
    let yaml_rust = load_config_file(path, &YamlRustParser).unwrap();

    assert_eq!(serde.tree(), yaml_rust.tree());
    assert_eq!(
        yaml_rust.get_string("services.names[1].first").as_deref(),
        Some("Andrew")
    );
}

#[test]
fn test_load_with_env_parser() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "image: ${{DB_IMAGE:-mysql}}\n").unwrap();

    let parser = EnvInterpolator::new(SerdeYamlParser).with_lookup(|_| None);
    let config = load_config_file(temp_file.path(), &parser).unwrap();
    assert_eq!(config.get_string("image").as_deref(), Some("mysql"));
}

#[test]
fn test_load_nonexistent_file() {
    let result = load_config_file("/nonexistent/path/config.yml", &SerdeYamlParser);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Failed to read file"));
}

#[test]
fn test_load_invalid_yaml_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "services: [unclosed").unwrap();

    let result = load_config_file(temp_file.path(), &SerdeYamlParser);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Failed to parse"));
}

#[test]
fn test_load_from_reader() {
    let config = load_config_from_reader("list: [a, b]".as_bytes(), &YamlRustParser).unwrap();
    assert_eq!(
        config.get_list::<String>("list"),
        Some(vec!["a".to_string(), "b".to_string()])
    );
}

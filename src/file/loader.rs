//! Configuration file loading.
//!
//! This module provides functions to load YAML documents from files or
//! stdin into a [`Config`]. Files ending in `.gz`, and stdin input starting
//! with the gzip magic bytes, are decompressed first.

use crate::accessor::Config;
use crate::document::parser::DocumentParser;
use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Loads and parses a YAML file from the filesystem.
///
/// # Examples
///
/// ```no_run
/// use yamlconf::document::parser::SerdeYamlParser;
/// use yamlconf::file::loader::load_config_file;
///
/// let config = load_config_file("docker-compose.yml", &SerdeYamlParser).unwrap();
/// let image = config.get_string("services.db.image");
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist or cannot be read
/// - A `.gz` file is not valid gzip data
/// - The contents are not valid UTF-8 or not valid YAML
pub fn load_config_file<P: AsRef<Path>>(path: P, parser: &dyn DocumentParser) -> Result<Config> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        let file = fs::File::open(path_ref).context("Failed to open gzipped file")?;
        decompress(file).context("Failed to decompress gzipped file - file may be corrupted")?
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read file {}", path_ref.display()))?
    };

    tracing::debug!(path = %path_ref.display(), bytes = content.len(), "loaded config file");
    Config::with_parser(parser, &content)
        .with_context(|| format!("Failed to parse {}", path_ref.display()))
}

/// Loads and parses YAML from standard input.
///
/// # Errors
///
/// Returns an error if reading stdin fails or its contents are not valid YAML.
pub fn load_config_from_stdin(parser: &dyn DocumentParser) -> Result<Config> {
    load_config_from_reader(io::stdin().lock(), parser).context("Failed to load YAML from stdin")
}

/// Loads YAML from any byte stream, decompressing it when it is gzip data.
pub fn load_config_from_reader<R: Read>(
    mut reader: R,
    parser: &dyn DocumentParser,
) -> Result<Config> {
    let mut buffer = Vec::new();
    reader
        .read_to_end(&mut buffer)
        .context("Failed to read input")?;

    let content = if buffer.starts_with(&GZIP_MAGIC) {
        decompress(buffer.as_slice()).context("Failed to decompress gzipped input")?
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in input")?
    };

    Ok(Config::with_parser(parser, &content)?)
}

fn decompress<R: Read>(compressed: R) -> io::Result<String> {
    let mut decoder = GzDecoder::new(compressed);
    let mut content = String::new();
    decoder.read_to_string(&mut content)?;
    Ok(content)
}

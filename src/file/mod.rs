//! File I/O for configuration documents.
//!
//! This module loads YAML documents from disk or stdin, transparently
//! decompressing gzip input, and hands the text to a `DocumentParser`.

pub mod loader;

//! Reasons a key lookup can fail.

use thiserror::Error;

/// Why a key did not resolve to a usable value.
///
/// The typed accessors on [`Config`](crate::Config) turn every variant into
/// `None`; [`Config::lookup`](crate::Config::lookup) exposes them for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// A mapping on the path has no entry with this name.
    #[error("key '{field}' not found")]
    KeyNotFound { field: String },
    /// A node exists but has the wrong shape for the request.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// The sequence under `field` is too short for the requested index.
    #[error("index {index} out of range for '{field}' (length {len})")]
    IndexOutOfRange {
        field: String,
        index: usize,
        len: usize,
    },
    /// The `[n]` suffix does not fit in a `usize`.
    #[error("invalid index in segment '{segment}'")]
    MalformedIndex { segment: String },
}

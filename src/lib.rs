//! yamlconf - read-only dotted-path lookups over YAML configuration documents.
//!
//! Load a document once, then query it by key:
//!
//! ```
//! use yamlconf::Config;
//!
//! let config = Config::parse_str(
//!     "version: 3\nservices:\n  names:\n    - first: James\n    - first: Andrew\n",
//! )
//! .unwrap();
//!
//! assert_eq!(config.get_string("services.names[1].first").as_deref(), Some("Andrew"));
//! assert_eq!(config.get_string("services.names[3].first"), None);
//! assert_eq!(config.get_int("version"), Some(3));
//! ```

pub mod accessor;
pub mod document;
pub mod error;
pub mod file;
pub mod keypath;
pub mod settings;

pub use accessor::{Config, FromNode};
pub use document::node::{ConfigTree, Scalar};
pub use error::{ConfigError, Result};

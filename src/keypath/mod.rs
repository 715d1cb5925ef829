//! Dotted key paths and their resolution against a `ConfigTree`.
//!
//! A key is a list of dot-separated segments. A segment may end in `[n]` to
//! select element `n` of the sequence stored under that name.
//!
//! # Supported Syntax
//!
//! - `services.db.image` - nested mapping lookup
//! - `services.names[1].first` - index into a sequence, then continue
//!
//! An index is only recognized on segments whose name is an ASCII letter
//! followed by at least one letter or digit. Any other segment, including
//! one such as `a[0]` or `my_list[0]`, is used verbatim as a mapping key.
//!
//! # Examples
//!
//! ```
//! use yamlconf::keypath::{Evaluator, Parser};
//! use yamlconf::document::parser::{DocumentParser, SerdeYamlParser};
//!
//! let tree = SerdeYamlParser
//!     .parse_str("services:\n  names:\n    - first: James\n    - first: Andrew\n")
//!     .unwrap();
//! let path = Parser::parse("services.names[1].first").unwrap();
//! let node = Evaluator::new(&tree).resolve(&path).unwrap();
//! assert_eq!(node.as_scalar().unwrap().to_string(), "Andrew");
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod parser;

pub use ast::{KeyPath, PathSegment};
pub use error::LookupError;
pub use evaluator::Evaluator;
pub use parser::Parser;

//! Document model and parsing.
//!
//! `node` defines the immutable tree, `parser` turns YAML text into it, and
//! `env` optionally rewrites `${VAR}` scalars on the way in.

pub mod env;
pub mod node;
pub mod parser;

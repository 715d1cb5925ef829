use super::ast::{KeyPath, PathSegment};
use super::error::LookupError;
use crate::document::node::ConfigTree;

/// Walks a [`KeyPath`] over a document, one segment at a time.
pub struct Evaluator<'a> {
    root: &'a ConfigTree,
}

impl<'a> Evaluator<'a> {
    pub fn new(root: &'a ConfigTree) -> Self {
        Evaluator { root }
    }

    /// Resolves `path` to the node it names.
    ///
    /// A segment reached while the current node is a sequence or scalar is
    /// skipped entirely, index included, and the walk continues from the same
    /// node. Lookups depend on this lenient walk; keep it.
    pub fn resolve(&self, path: &KeyPath) -> Result<&'a ConfigTree, LookupError> {
        let mut current = self.root;
        for segment in &path.segments {
            current = self.step(current, segment)?;
        }
        Ok(current)
    }

    fn step(
        &self,
        node: &'a ConfigTree,
        segment: &PathSegment,
    ) -> Result<&'a ConfigTree, LookupError> {
        let ConfigTree::Mapping(entries) = node else {
            tracing::trace!(%segment, node = node.kind(), "segment skipped on non-mapping node");
            return Ok(node);
        };

        let child = entries
            .get(segment.field.as_str())
            .ok_or_else(|| LookupError::KeyNotFound {
                field: segment.field.clone(),
            })?;

        match segment.index {
            Some(index) => self.select(child, &segment.field, index),
            None => Ok(child),
        }
    }

    fn select(
        &self,
        node: &'a ConfigTree,
        field: &str,
        index: usize,
    ) -> Result<&'a ConfigTree, LookupError> {
        match node {
            ConfigTree::Sequence(items) => {
                items
                    .get(index)
                    .ok_or_else(|| LookupError::IndexOutOfRange {
                        field: field.to_string(),
                        index,
                        len: items.len(),
                    })
            }
            other => Err(LookupError::TypeMismatch {
                expected: "sequence",
                found: other.kind(),
            }),
        }
    }
}

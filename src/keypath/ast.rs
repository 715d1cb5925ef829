//! Parsed representation of a dotted key.

/// One dot-delimited component of a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    /// Mapping key to look up
    pub field: String,
    /// Sequence index applied after the lookup, if the segment had `[n]`
    pub index: Option<usize>,
}

impl PathSegment {
    /// A segment without an index.
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            field: name.into(),
            index: None,
        }
    }

    /// A segment selecting element `index` of the sequence under `name`.
    pub fn indexed(name: impl Into<String>, index: usize) -> Self {
        Self {
            field: name.into(),
            index: Some(index),
        }
    }
}

impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{}]", self.field, index),
            None => write!(f, "{}", self.field),
        }
    }
}

/// A complete dotted key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    /// Segments in lookup order.
    pub segments: Vec<PathSegment>,
}

impl KeyPath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}

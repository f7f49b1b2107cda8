//! Ancestry Paths
//!
//! An ancestry path is the chain of (name, category) pairs from a root
//! document down to the document a record was taken from. Reports store
//! it as two parallel `"::"`-joined strings (names and categories); in
//! memory nestscan works on the parsed, immutable [`AncestryPath`] and
//! only joins the strings again at the serialization boundary.
//!
//! @module model/path

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::{Error, Result};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Separator between nesting levels in persisted path strings
pub const NESTING_SEPARATOR: &str = "::";

// =============================================================================
// PATH SEGMENT
// =============================================================================

/// One nesting level: a document's name and category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathSegment {
    pub name: String,
    pub category: String,
}

impl PathSegment {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :: {}", self.name, self.category)
    }
}

// =============================================================================
// ANCESTRY PATH
// =============================================================================

/// Ordered chain of segments from root (index 0) to the current
/// document (last index). Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AncestryPath {
    segments: Vec<PathSegment>,
}

impl AncestryPath {
    /// Path of a root document: just its own name and category
    pub fn root(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::new(name, category)],
        }
    }

    /// Build from parsed segments; rejects an empty chain
    pub fn new(segments: Vec<PathSegment>) -> Result<Self> {
        if segments.is_empty() {
            return Err(Error::MalformedPath {
                message: "ancestry path has no segments".into(),
            });
        }
        Ok(Self { segments })
    }

    /// Parse the two parallel path strings a report row carries.
    ///
    /// Fails on an empty name path or when the name and category paths
    /// disagree on segment count.
    pub fn parse(root_path: &str, root_category_path: &str) -> Result<Self> {
        if root_path.is_empty() {
            return Err(Error::MalformedPath {
                message: "empty root path".into(),
            });
        }

        let names: Vec<&str> = root_path.split(NESTING_SEPARATOR).collect();
        let categories: Vec<&str> = root_category_path.split(NESTING_SEPARATOR).collect();

        if names.len() != categories.len() {
            return Err(Error::MalformedPath {
                message: format!(
                    "{} name segments but {} category segments in '{}' / '{}'",
                    names.len(),
                    categories.len(),
                    root_path,
                    root_category_path
                ),
            });
        }

        let segments = names
            .into_iter()
            .zip(categories)
            .map(|(name, category)| PathSegment::new(name, category))
            .collect();

        Ok(Self { segments })
    }

    /// Path of a document nested one level below this one
    pub fn child(&self, name: impl Into<String>, category: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::new(name, category));
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of segments in the chain
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        // Construction guarantees at least one segment
        false
    }

    /// Nesting depth: 0 for a root document
    pub fn depth(&self) -> usize {
        self.segments.len() - 1
    }

    /// True when the chain is just the document itself
    pub fn is_root(&self) -> bool {
        self.segments.len() == 1
    }

    /// The document this path belongs to (last segment)
    pub fn leaf(&self) -> &PathSegment {
        self.segments
            .last()
            .expect("ancestry path is never empty")
    }

    /// Name of the immediate parent, if any
    pub fn host_name(&self) -> Option<&str> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(&self.segments[self.segments.len() - 2].name)
    }

    /// The `"::"`-joined name string stored in reports
    pub fn name_path(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(NESTING_SEPARATOR)
    }

    /// The `"::"`-joined category string stored in reports
    pub fn category_path(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.category.as_str())
            .collect::<Vec<_>>()
            .join(NESTING_SEPARATOR)
    }
}

impl fmt::Display for AncestryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name_path())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root() {
        let path = AncestryPath::parse("host", "Furniture").unwrap();
        assert!(path.is_root());
        assert_eq!(path.depth(), 0);
        assert_eq!(path.leaf().name, "host");
        assert_eq!(path.leaf().category, "Furniture");
        assert_eq!(path.host_name(), None);
    }

    #[test]
    fn test_parse_nested() {
        let path = AncestryPath::parse("host::child::grandchild", "cat a::cat b::cat c").unwrap();
        assert!(!path.is_root());
        assert_eq!(path.len(), 3);
        assert_eq!(path.depth(), 2);
        assert_eq!(path.leaf().name, "grandchild");
        assert_eq!(path.host_name(), Some("child"));
        assert_eq!(path.name_path(), "host::child::grandchild");
        assert_eq!(path.category_path(), "cat a::cat b::cat c");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(AncestryPath::parse("", "").is_err());
    }

    #[test]
    fn test_parse_rejects_unequal_segment_counts() {
        let err = AncestryPath::parse("a::b::c", "cat a::cat b").unwrap_err();
        assert!(matches!(err, Error::MalformedPath { .. }));
    }

    #[test]
    fn test_child_extends_chain() {
        let root = AncestryPath::root("host", "Furniture");
        let child = root.child("leg", "Generic");
        assert_eq!(child.name_path(), "host::leg");
        assert_eq!(child.category_path(), "Furniture::Generic");
        assert_eq!(child.host_name(), Some("host"));
        // the parent path is untouched
        assert!(root.is_root());
    }

    #[test]
    fn test_roundtrip_through_strings() {
        let original = AncestryPath::parse("a::b::a", "x::y::x").unwrap();
        let reparsed =
            AncestryPath::parse(&original.name_path(), &original.category_path()).unwrap();
        assert_eq!(original, reparsed);
    }
}

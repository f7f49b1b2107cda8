//! Record Model
//!
//! Value types produced by the walk and consumed by every later stage:
//! one [`NestedComponentRecord`] per visited document, and zero or more
//! [`FactRecord`]s per document and data type. Both kinds are persisted
//! to flat reports and reloaded for cross-run analysis; after reload
//! only the path strings remain, no live document references survive.
//!
//! @module model/records

use serde::{Deserialize, Serialize};
use std::fmt;

use super::path::AncestryPath;

// =============================================================================
// COMPONENT IDENTITY
// =============================================================================

/// What makes two records refer to the same real document.
///
/// Two documents sharing a name but differing in category are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentIdentity {
    pub name: String,
    pub category: String,
}

impl ComponentIdentity {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
        }
    }
}

impl fmt::Display for ComponentIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :: {}", self.name, self.category)
    }
}

// =============================================================================
// NESTED COMPONENT RECORD
// =============================================================================

/// One record per document node visited during a recursive load.
///
/// `file_path` is empty for documents never independently saved.
/// `host_component` is the immediate parent's name, empty for roots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedComponentRecord {
    pub name: String,
    pub category: String,
    pub file_path: String,
    pub ancestry: AncestryPath,
    pub host_component: String,
}

impl NestedComponentRecord {
    /// Build a record for the document at the end of an ancestry chain
    pub fn from_ancestry(ancestry: AncestryPath, file_path: impl Into<String>) -> Self {
        let leaf = ancestry.leaf().clone();
        let host_component = ancestry.host_name().unwrap_or("").to_string();
        Self {
            name: leaf.name,
            category: leaf.category,
            file_path: file_path.into(),
            ancestry,
            host_component,
        }
    }

    pub fn identity(&self) -> ComponentIdentity {
        ComponentIdentity::new(self.name.clone(), self.category.clone())
    }

    /// Serialized name chain, root first
    pub fn root_path(&self) -> String {
        self.ancestry.name_path()
    }

    /// Serialized category chain, root first
    pub fn category_path(&self) -> String {
        self.ancestry.category_path()
    }

    /// True when this record was taken from a root document
    pub fn is_root(&self) -> bool {
        self.ancestry.is_root()
    }
}

// =============================================================================
// FACT RECORD
// =============================================================================

/// A root fact's record of one nested document that uses it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsedBy {
    /// Natural key of the contributing nested fact
    pub natural_key: String,
    /// Serialized ancestry of the contributing nested document
    pub root_path: String,
}

/// One type-specific fact observed in one document.
///
/// `natural_key` identifies the same underlying fact across documents
/// (e.g. pattern name + id, or parameter GUID + name + id); what goes
/// into it is up to the extractor that produced the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactRecord {
    /// Data type this fact belongs to (pattern, parameter, diagnostic, ...)
    pub data_type: String,
    pub ancestry: AncestryPath,
    pub component_name: String,
    pub component_file_path: String,
    pub natural_key: String,
    /// Local use count; after aggregation a root fact also counts one
    /// per distinct contributing nested root path
    pub usage_counter: u32,
    pub used_by: Vec<UsedBy>,
}

impl FactRecord {
    pub fn new(
        data_type: impl Into<String>,
        ancestry: AncestryPath,
        component_file_path: impl Into<String>,
        natural_key: impl Into<String>,
        usage_counter: u32,
    ) -> Self {
        let component_name = ancestry.leaf().name.clone();
        Self {
            data_type: data_type.into(),
            ancestry,
            component_name,
            component_file_path: component_file_path.into(),
            natural_key: natural_key.into(),
            usage_counter,
            used_by: Vec::new(),
        }
    }

    /// Serialized name chain, root first
    pub fn root_path(&self) -> String {
        self.ancestry.name_path()
    }

    /// True when this fact was observed in a root document
    pub fn is_root(&self) -> bool {
        self.ancestry.is_root()
    }

    /// Whether two records describe the same underlying fact
    pub fn same_fact(&self, other: &FactRecord) -> bool {
        self.data_type == other.data_type && self.natural_key == other.natural_key
    }

    /// Whether this root fact already lists a contributor
    pub fn is_used_by(&self, natural_key: &str, root_path: &str) -> bool {
        self.used_by
            .iter()
            .any(|u| u.natural_key == natural_key && u.root_path == root_path)
    }
}

// =============================================================================
// TESTS
// =============================================================================

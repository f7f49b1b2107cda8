//! Record model: ancestry paths, component identity, fact records

pub mod path;
pub mod records;

pub use path::{AncestryPath, PathSegment, NESTING_SEPARATOR};
pub use records::{ComponentIdentity, FactRecord, NestedComponentRecord, UsedBy};

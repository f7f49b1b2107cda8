//! Fact Extraction
//!
//! One extractor per data type (patterns, parameters, diagnostics, ...)
//! turns a single visited document into zero or more [`FactRecord`]s
//! tagged with that document's ancestry. Extractors are the pluggable
//! leaves of the pipeline: the processor runs every configured
//! extractor against every document the external walker hands it.
//!
//! @module extract

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

use crate::core::error::Result;
use crate::model::{AncestryPath, FactRecord};

// =============================================================================
// USAGE MODE
// =============================================================================

/// How a data type's usage counter behaves during aggregation.
///
/// The counter either reflects a true count of distinct users, or is
/// clamped to 1 as a plain "is used" flag. This varies by data type, so
/// each extractor declares it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UsageMode {
    /// Counter counts every distinct contributing nested root path
    #[default]
    Count,
    /// Counter is clamped to 1; used_by still lists every contributor
    Flag,
}

// =============================================================================
// FACT EXTRACTOR
// =============================================================================

/// Per-data-type extraction logic over an opaque document handle.
///
/// The core never opens or traverses documents itself; `D` is whatever
/// handle the external walker carries, and an extractor may query it in
/// any application-specific way.
pub trait FactExtractor<D> {
    /// Data type this extractor reports under
    fn data_type(&self) -> &str;

    /// Usage counting behavior during aggregation
    fn usage_mode(&self) -> UsageMode {
        UsageMode::Count
    }

    /// Extract facts from one visited document
    fn extract(&self, doc: &D, ancestry: &AncestryPath) -> Result<Vec<FactRecord>>;
}

// =============================================================================
// CLOSURE ADAPTER
// =============================================================================

/// Adapter turning a plain callback into a [`FactExtractor`]
pub struct FnExtractor<D, F> {
    data_type: String,
    usage_mode: UsageMode,
    extract_fn: F,
    _marker: PhantomData<fn(&D)>,
}

impl<D, F> FnExtractor<D, F>
where
    F: Fn(&D, &AncestryPath) -> Result<Vec<FactRecord>>,
{
    pub fn new(data_type: impl Into<String>, extract_fn: F) -> Self {
        Self {
            data_type: data_type.into(),
            usage_mode: UsageMode::Count,
            extract_fn,
            _marker: PhantomData,
        }
    }

    pub fn with_usage_mode(mut self, usage_mode: UsageMode) -> Self {
        self.usage_mode = usage_mode;
        self
    }
}

impl<D, F> FactExtractor<D> for FnExtractor<D, F>
where
    F: Fn(&D, &AncestryPath) -> Result<Vec<FactRecord>>,
{
    fn data_type(&self) -> &str {
        &self.data_type
    }

    fn usage_mode(&self) -> UsageMode {
        self.usage_mode
    }

    fn extract(&self, doc: &D, ancestry: &AncestryPath) -> Result<Vec<FactRecord>> {
        (self.extract_fn)(doc, ancestry)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeDoc {
        pattern: &'static str,
    }

    #[test]
    fn test_fn_extractor() {
        let extractor = FnExtractor::new("pattern", |doc: &FakeDoc, ancestry: &AncestryPath| {
            Ok(vec![FactRecord::new(
                "pattern",
                ancestry.clone(),
                "",
                doc.pattern,
                1,
            )])
        })
        .with_usage_mode(UsageMode::Flag);

        assert_eq!(extractor.data_type(), "pattern");
        assert_eq!(extractor.usage_mode(), UsageMode::Flag);

        let ancestry = AncestryPath::root("host", "cat");
        let facts = extractor
            .extract(&FakeDoc { pattern: "dashed:3" }, &ancestry)
            .unwrap();
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].natural_key, "dashed:3");
        assert!(facts[0].is_root());
    }
}

//! Component Processing
//!
//! The processor is the walk endpoint: an external walker opens and
//! recursively traverses the live document tree and calls
//! [`ComponentProcessor::process`] once per document node, passing the
//! ancestry it built while descending (appending `"::" + name` /
//! `"::" + category` per level; the root node is just its own name and
//! category). The processor records the visited document, runs every
//! configured extractor, and owns the resulting [`RecordStore`].
//!
//! After the entire tree has been visited the walker calls
//! [`ComponentProcessor::run_post_actions`] exactly once; by default
//! that runs usage aggregation (see [`aggregate`]).
//!
//! @module process

pub mod aggregate;
pub mod store;

use std::collections::HashMap;

use crate::core::outcome::Outcome;
use crate::extract::{FactExtractor, UsageMode};
use crate::model::{AncestryPath, NestedComponentRecord};

pub use aggregate::Aggregator;
pub use store::RecordStore;

// =============================================================================
// DOCUMENT SEAM
// =============================================================================

/// The only thing the core knows about a live document handle.
///
/// Opening, closing and traversing documents stays with the caller;
/// extractors may downcast/query `D` in application-specific ways.
pub trait ComponentDocument {
    fn name(&self) -> &str;
    fn category(&self) -> &str;
    /// Saved location, if the document was ever independently saved
    fn file_path(&self) -> Option<&str>;
}

/// Visitor seam between traversal strategy and record collection.
///
/// Any traversal (eager, lazy, or parallel over independent subtrees)
/// can drive a visitor without touching aggregation, culling or cycle
/// detection.
pub trait DocumentVisitor<D> {
    fn visit(&mut self, doc: &D, root_path: &str, root_category_path: &str) -> Outcome;
}

// =============================================================================
// ACTIONS
// =============================================================================

/// A pre- or post-action over the collected records.
///
/// Actions are injected at construction as an explicit ordered list and
/// each runs exactly once per walk.
pub type Action<D> = Box<dyn Fn(&D, &mut RecordStore) -> Outcome>;

// =============================================================================
// COMPONENT PROCESSOR
// =============================================================================

/// Collects records for one root document and its nested tree
pub struct ComponentProcessor<D> {
    extractors: Vec<Box<dyn FactExtractor<D>>>,
    pre_actions: Vec<Action<D>>,
    post_actions: Vec<Action<D>>,
    store: RecordStore,
}

impl<D: ComponentDocument> ComponentProcessor<D> {
    /// Processor with the default post-action: usage aggregation
    /// configured from each extractor's declared usage mode.
    pub fn new(extractors: Vec<Box<dyn FactExtractor<D>>>) -> Self {
        let modes: HashMap<String, UsageMode> = extractors
            .iter()
            .map(|e| (e.data_type().to_string(), e.usage_mode()))
            .collect();
        let aggregator = Aggregator::new(modes);
        let post_actions: Vec<Action<D>> = vec![Box::new(move |_doc, store| {
            aggregator.update_used_facts(store)
        })];

        Self {
            extractors,
            pre_actions: Vec::new(),
            post_actions,
            store: RecordStore::new(),
        }
    }

    /// Processor with explicit pre/post action lists and no defaults
    pub fn with_actions(
        extractors: Vec<Box<dyn FactExtractor<D>>>,
        pre_actions: Vec<Action<D>>,
        post_actions: Vec<Action<D>>,
    ) -> Self {
        Self {
            extractors,
            pre_actions,
            post_actions,
            store: RecordStore::new(),
        }
    }

    /// Record one visited document and run every extractor on it.
    ///
    /// A failing extractor is downgraded to a per-document failure
    /// message; siblings and the rest of the walk continue. A malformed
    /// ancestry fails the whole call since nothing can be recorded
    /// against it.
    pub fn process(&mut self, doc: &D, root_path: &str, root_category_path: &str) -> Outcome {
        let ancestry = match AncestryPath::parse(root_path, root_category_path) {
            Ok(ancestry) => ancestry,
            Err(e) => {
                tracing::warn!("Skipping document '{}': {}", doc.name(), e);
                return Outcome::failure(format!("Skipping document '{}': {}", doc.name(), e));
            }
        };

        self.store.add_component(NestedComponentRecord::from_ancestry(
            ancestry.clone(),
            doc.file_path().unwrap_or(""),
        ));

        let mut outcome = Outcome::ok();
        for extractor in &self.extractors {
            match extractor.extract(doc, &ancestry) {
                Ok(facts) => self.store.extend_facts(facts),
                Err(e) => {
                    tracing::warn!(
                        data_type = extractor.data_type(),
                        document = doc.name(),
                        "extraction failed: {}",
                        e
                    );
                    outcome.update_sep(
                        false,
                        &format!(
                            "Extractor '{}' failed on '{}': {}",
                            extractor.data_type(),
                            doc.name(),
                            e
                        ),
                    );
                }
            }
        }
        outcome
    }

    /// Run the configured pre-actions, merging their outcomes
    pub fn run_pre_actions(&mut self, doc: &D) -> Outcome {
        let mut outcome = Outcome::ok();
        for action in &self.pre_actions {
            outcome.update(&action(doc, &mut self.store));
        }
        outcome
    }

    /// Run the configured post-actions once the entire tree was visited.
    ///
    /// A failing action contributes a status=false outcome; records
    /// already collected are never rolled back.
    pub fn run_post_actions(&mut self, doc: &D) -> Outcome {
        let mut outcome = Outcome::ok();
        for action in &self.post_actions {
            outcome.update(&action(doc, &mut self.store));
        }
        outcome
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Consume the processor, handing over its records
    pub fn into_store(self) -> RecordStore {
        self.store
    }
}

impl<D: ComponentDocument> DocumentVisitor<D> for ComponentProcessor<D> {
    fn visit(&mut self, doc: &D, root_path: &str, root_category_path: &str) -> Outcome {
        self.process(doc, root_path, root_category_path)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use crate::extract::FnExtractor;
    use crate::model::FactRecord;

    struct TestDoc {
        name: &'static str,
        category: &'static str,
        patterns: Vec<(&'static str, u32)>,
    }

    impl ComponentDocument for TestDoc {
        fn name(&self) -> &str {
            self.name
        }
        fn category(&self) -> &str {
            self.category
        }
        fn file_path(&self) -> Option<&str> {
            None
        }
    }

    fn pattern_extractor() -> Box<dyn FactExtractor<TestDoc>> {
        Box::new(FnExtractor::new(
            "pattern",
            |doc: &TestDoc, ancestry: &AncestryPath| {
                Ok(doc
                    .patterns
                    .iter()
                    .map(|(key, count)| {
                        FactRecord::new("pattern", ancestry.clone(), "", *key, *count)
                    })
                    .collect())
            },
        ))
    }

    fn failing_extractor() -> Box<dyn FactExtractor<TestDoc>> {
        Box::new(FnExtractor::new(
            "diagnostic",
            |_doc: &TestDoc, _ancestry: &AncestryPath| {
                Err(Error::Extraction {
                    data_type: "diagnostic".into(),
                    message: "query not available".into(),
                })
            },
        ))
    }

    #[test]
    fn test_walk_collects_and_aggregates() {
        let mut processor = ComponentProcessor::new(vec![pattern_extractor()]);

        let root = TestDoc {
            name: "host",
            category: "cat",
            patterns: vec![("solid:1", 1)],
        };
        let nested = TestDoc {
            name: "child",
            category: "cat",
            patterns: vec![("solid:1", 1)],
        };

        // external walker: root first, then the nested document
        assert!(processor.process(&root, "host", "cat").status);
        assert!(processor.process(&nested, "host::child", "cat::cat").status);

        let outcome = processor.run_post_actions(&root);
        assert!(outcome.status);

        let store = processor.store();
        assert_eq!(store.component_count(), 2);
        assert!(store.components()[0].is_root());
        assert_eq!(store.components()[1].host_component, "host");

        let root_fact = store.facts().iter().find(|f| f.is_root()).unwrap();
        assert_eq!(root_fact.usage_counter, 2);
        assert_eq!(root_fact.used_by.len(), 1);
        assert_eq!(root_fact.used_by[0].root_path, "host::child");
    }

    #[test]
    fn test_failing_extractor_does_not_stop_siblings() {
        let mut processor =
            ComponentProcessor::new(vec![failing_extractor(), pattern_extractor()]);

        let doc = TestDoc {
            name: "host",
            category: "cat",
            patterns: vec![("dashed:2", 0)],
        };

        let outcome = processor.process(&doc, "host", "cat");
        assert!(!outcome.status);
        assert!(outcome.message.contains("diagnostic"));

        // the document record and the sibling extractor's facts survive
        assert_eq!(processor.store().component_count(), 1);
        assert_eq!(processor.store().fact_count(), 1);
    }

    #[test]
    fn test_malformed_ancestry_is_per_document_failure() {
        let mut processor = ComponentProcessor::new(vec![pattern_extractor()]);
        let doc = TestDoc {
            name: "host",
            category: "cat",
            patterns: vec![],
        };

        let outcome = processor.process(&doc, "a::b", "cat");
        assert!(!outcome.status);
        assert!(processor.store().is_empty());
    }

    #[test]
    fn test_injected_post_action_failure_keeps_records() {
        let post: Action<TestDoc> =
            Box::new(|_doc, _store| Outcome::failure("post action failed"));
        let mut processor =
            ComponentProcessor::with_actions(vec![pattern_extractor()], vec![], vec![post]);

        let doc = TestDoc {
            name: "host",
            category: "cat",
            patterns: vec![("solid:1", 1)],
        };
        processor.process(&doc, "host", "cat");

        let outcome = processor.run_post_actions(&doc);
        assert!(!outcome.status);
        assert_eq!(outcome.message, "post action failed");
        // no rollback
        assert_eq!(processor.store().fact_count(), 1);
    }
}

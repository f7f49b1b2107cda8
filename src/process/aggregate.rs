//! Usage Aggregation
//!
//! The default post-action. After a walk the store holds facts from the
//! root document and from every nested document, each tagged with its
//! ancestry. Aggregation propagates "used" information upward: every
//! used nested fact is merged into the root fact sharing its natural
//! key, recording the contributing nested root path in `used_by` and
//! bumping the root's usage counter once per distinct contributor.
//!
//! A nested fact with no matching root fact is dropped: the fact is
//! irrelevant to the root-level report and no root record is
//! synthesized for it.
//!
//! @module process/aggregate

use std::collections::HashMap;

use crate::core::outcome::Outcome;
use crate::extract::UsageMode;
use crate::model::UsedBy;
use crate::process::store::RecordStore;

// =============================================================================
// AGGREGATOR
// =============================================================================

/// Merges used nested facts into matching root facts
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    /// Usage counting behavior per data type; unlisted types count
    modes: HashMap<String, UsageMode>,
}

impl Aggregator {
    pub fn new(modes: HashMap<String, UsageMode>) -> Self {
        Self { modes }
    }

    fn mode_for(&self, data_type: &str) -> UsageMode {
        self.modes.get(data_type).copied().unwrap_or_default()
    }

    /// Run the "update used facts" pass over a store.
    ///
    /// Already-collected records are never rolled back; the returned
    /// outcome summarizes how many root facts gained contributors and
    /// how many nested usages had no root counterpart.
    pub fn update_used_facts(&self, store: &mut RecordStore) -> Outcome {
        // Snapshot the used nested facts first; the mutable pass below
        // touches only root records.
        let used_nested: Vec<(String, String, String)> = store
            .facts()
            .iter()
            .filter(|fact| !fact.is_root() && fact.usage_counter > 0)
            .map(|fact| {
                (
                    fact.data_type.clone(),
                    fact.natural_key.clone(),
                    fact.root_path(),
                )
            })
            .collect();

        let mut merged = 0usize;
        let mut dropped = 0usize;

        for (data_type, natural_key, root_path) in used_nested {
            let facts = store.facts_mut();
            let root = facts.iter_mut().find(|fact| {
                fact.is_root() && fact.data_type == data_type && fact.natural_key == natural_key
            });

            match root {
                Some(root) => {
                    if root.is_used_by(&natural_key, &root_path) {
                        continue;
                    }
                    root.used_by.push(UsedBy {
                        natural_key: natural_key.clone(),
                        root_path,
                    });
                    match self.mode_for(&data_type) {
                        UsageMode::Count => root.usage_counter += 1,
                        UsageMode::Flag => root.usage_counter = root.usage_counter.max(1),
                    }
                    merged += 1;
                }
                None => {
                    tracing::debug!(
                        data_type = %data_type,
                        natural_key = %natural_key,
                        "nested usage has no root fact, dropping"
                    );
                    dropped += 1;
                }
            }
        }

        Outcome::success(format!(
            "Updated used facts: merged {} nested usage(s), dropped {} without a root fact.",
            merged, dropped
        ))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AncestryPath, FactRecord};

    fn store_with(facts: Vec<FactRecord>) -> RecordStore {
        let mut store = RecordStore::new();
        store.extend_facts(facts);
        store
    }

    fn root_fact(key: &str, counter: u32) -> FactRecord {
        FactRecord::new("pattern", AncestryPath::root("host", "cat"), "", key, counter)
    }

    fn nested_fact(key: &str, nested_name: &str, counter: u32) -> FactRecord {
        let ancestry = AncestryPath::root("host", "cat").child(nested_name, "cat");
        FactRecord::new("pattern", ancestry, "", key, counter)
    }

    #[test]
    fn test_two_distinct_contributors() {
        // root counter 1, two used nested facts under distinct root paths
        let mut store = store_with(vec![
            root_fact("k", 1),
            nested_fact("k", "child one", 2),
            nested_fact("k", "child two", 1),
        ]);

        let outcome = Aggregator::default().update_used_facts(&mut store);
        assert!(outcome.status);

        let root = &store.facts()[0];
        assert_eq!(root.usage_counter, 3);
        assert_eq!(root.used_by.len(), 2);
        assert_eq!(root.used_by[0].root_path, "host::child one");
        assert_eq!(root.used_by[1].root_path, "host::child two");
    }

    #[test]
    fn test_duplicate_contributor_counted_once() {
        let mut store = store_with(vec![
            root_fact("k", 1),
            nested_fact("k", "child", 1),
            nested_fact("k", "child", 1),
        ]);

        Aggregator::default().update_used_facts(&mut store);

        let root = &store.facts()[0];
        assert_eq!(root.usage_counter, 2);
        assert_eq!(root.used_by.len(), 1);
    }

    #[test]
    fn test_unused_nested_fact_ignored() {
        let mut store = store_with(vec![root_fact("k", 1), nested_fact("k", "child", 0)]);

        Aggregator::default().update_used_facts(&mut store);

        let root = &store.facts()[0];
        assert_eq!(root.usage_counter, 1);
        assert!(root.used_by.is_empty());
    }

    #[test]
    fn test_dangling_use_does_not_synthesize_root() {
        let mut store = store_with(vec![
            root_fact("other", 1),
            nested_fact("unmatched", "child", 1),
        ]);

        let outcome = Aggregator::default().update_used_facts(&mut store);
        assert!(outcome.status);
        assert!(outcome.message.contains("dropped 1"));

        // root record set is unchanged
        let roots: Vec<_> = store.facts().iter().filter(|f| f.is_root()).collect();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].natural_key, "other");
        assert_eq!(roots[0].usage_counter, 1);
    }

    #[test]
    fn test_flag_mode_clamps_counter() {
        let mut modes = HashMap::new();
        modes.insert("pattern".to_string(), UsageMode::Flag);

        let mut store = store_with(vec![
            root_fact("k", 0),
            nested_fact("k", "child one", 1),
            nested_fact("k", "child two", 1),
        ]);

        Aggregator::new(modes).update_used_facts(&mut store);

        let root = &store.facts()[0];
        assert_eq!(root.usage_counter, 1);
        // every contributor is still recorded
        assert_eq!(root.used_by.len(), 2);
    }

    #[test]
    fn test_data_types_do_not_cross() {
        let mut nested = nested_fact("k", "child", 1);
        nested.data_type = "parameter".to_string();
        let mut store = store_with(vec![root_fact("k", 1), nested]);

        Aggregator::default().update_used_facts(&mut store);

        let root = &store.facts()[0];
        assert_eq!(root.usage_counter, 1);
        assert!(root.used_by.is_empty());
    }
}

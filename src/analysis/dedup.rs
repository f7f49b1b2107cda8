//! Duplicate Record Culling
//!
//! The same nested document is frequently reachable through several
//! distinct ancestry chains (diamond reuse), so a flattened report
//! carries one record per chain. Culling collapses those down to one
//! canonical record per real document: per (name, category) identity
//! the occurrence with the deepest ancestry wins, since the longest
//! chain is the most specific one and shorter alternates to the same
//! document add nothing to a report.
//!
//! Records for *different* documents are never merged, even when one
//! chain is a prefix of another.
//!
//! @module analysis/dedup

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::model::{ComponentIdentity, NestedComponentRecord};

// =============================================================================
// REPRESENTATIVE ORDER
// =============================================================================

/// Total order picking the canonical record within one identity group.
///
/// Deeper ancestry first; ties fall through raw string length, then the
/// root path and category path strings themselves, so the winner never
/// depends on input order.
pub(crate) fn representative_order(
    a: &NestedComponentRecord,
    b: &NestedComponentRecord,
) -> Ordering {
    a.ancestry
        .len()
        .cmp(&b.ancestry.len())
        .then_with(|| a.root_path().len().cmp(&b.root_path().len()))
        .then_with(|| a.root_path().cmp(&b.root_path()))
        .then_with(|| a.category_path().cmp(&b.category_path()))
}

// =============================================================================
// CULL
// =============================================================================

/// Collapse duplicate records to one canonical entry per document.
///
/// Pure function over an immutable snapshot: returns a new list with
/// one representative per (name, category) group, in first-seen group
/// order. Idempotent, and the chosen representatives are independent of
/// input order.
pub fn cull(records: &[NestedComponentRecord]) -> Vec<NestedComponentRecord> {
    let mut order: Vec<ComponentIdentity> = Vec::new();
    let mut best: HashMap<ComponentIdentity, &NestedComponentRecord> = HashMap::new();

    for record in records {
        let identity = record.identity();
        match best.get(&identity) {
            Some(current) => {
                if representative_order(record, current) == Ordering::Greater {
                    best.insert(identity, record);
                }
            }
            None => {
                order.push(identity.clone());
                best.insert(identity, record);
            }
        }
    }

    order
        .into_iter()
        .map(|identity| (*best[&identity]).clone())
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AncestryPath;

    fn record(root_path: &str, category_path: &str) -> NestedComponentRecord {
        let ancestry = AncestryPath::parse(root_path, category_path).unwrap();
        NestedComponentRecord::from_ancestry(ancestry, "")
    }

    #[test]
    fn test_deepest_chain_wins() {
        let records = vec![
            record("host::shelf", "cat::cat x"),
            record("host::cabinet::shelf", "cat::cat::cat x"),
            record("other::shelf", "cat::cat x"),
        ];

        let culled = cull(&records);
        assert_eq!(culled.len(), 1);
        assert_eq!(culled[0].root_path(), "host::cabinet::shelf");
    }

    #[test]
    fn test_distinct_documents_not_collapsed() {
        // a legitimately deeper chain of distinct documents stays intact
        let records = vec![
            record("host::test1", "cat::cat"),
            record("host::test1::test2", "cat::cat::cat"),
            record("host::test1::test2::test3", "cat::cat::cat::cat"),
        ];

        let culled = cull(&records);
        assert_eq!(culled, records);
    }

    #[test]
    fn test_same_name_different_category_kept_apart() {
        let records = vec![
            record("host::bracket", "cat::Generic"),
            record("host::bracket", "cat::Structural"),
        ];

        let culled = cull(&records);
        assert_eq!(culled.len(), 2);
    }

    #[test]
    fn test_idempotent() {
        let records = vec![
            record("host::shelf", "cat::cat x"),
            record("host::cabinet::shelf", "cat::cat::cat x"),
            record("host::door", "cat::cat y"),
        ];

        let once = cull(&records);
        let twice = cull(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_deterministic_across_input_orders() {
        // equal segment count and equal string length, so the
        // lexicographic tie-break decides
        let a = record("aa::zz::shelf", "c::c::cx");
        let b = record("ab::zy::shelf", "c::c::cx");

        let forward = cull(&[a.clone(), b.clone()]);
        let backward = cull(&[b, a]);

        assert_eq!(forward.len(), 1);
        assert_eq!(forward[0].root_path(), backward[0].root_path());
        assert_eq!(forward[0].root_path(), "ab::zy::shelf");
    }

    #[test]
    fn test_empty_input() {
        assert!(cull(&[]).is_empty());
    }
}

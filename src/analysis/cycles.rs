//! Circular Nesting Detection
//!
//! A document that indirectly nests itself shows up in a flattened
//! report as its own (name, category) pair recurring along its own
//! ancestry chain. By the time this analysis runs the live document
//! tree no longer exists, so detection works purely on the persisted
//! ancestry strings.
//!
//! A document may be reached cyclically through some chains and cleanly
//! through others, so witnesses are gathered across *every* chain that
//! reaches it, over the full pre-dedup record set; an empty witness
//! list means no cycle.
//!
//! @module analysis/cycles

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use crate::core::outcome::AnalysisOutcome;
use crate::model::{ComponentIdentity, NestedComponentRecord};
use crate::report::nested::load_component_report;

use super::dedup::representative_order;

// =============================================================================
// WITNESS TYPES
// =============================================================================

/// One point in an ancestry chain proving a cycle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CycleWitness {
    /// Zero-based ancestry index where the document recurs
    pub level: usize,
    /// The recurring document, formatted `name :: category`
    pub component: String,
}

/// A document with at least one circular ancestry chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircularReference {
    /// Canonical record for the document (deepest ancestry chain)
    pub record: NestedComponentRecord,
    /// Distinct witnesses across every chain reaching the document
    pub witnesses: Vec<CycleWitness>,
}

// =============================================================================
// PER-RECORD SCAN
// =============================================================================

/// Cycle witnesses in one record's own ancestry chain.
///
/// The last segment is the document itself; any earlier segment with
/// the same (name, category) pair proves the document nests itself.
pub fn witnesses_for(record: &NestedComponentRecord) -> Vec<CycleWitness> {
    let segments = record.ancestry.segments();
    let leaf = record.ancestry.leaf();

    segments[..segments.len() - 1]
        .iter()
        .enumerate()
        .filter(|(_, segment)| segment.name == leaf.name && segment.category == leaf.category)
        .map(|(level, segment)| CycleWitness {
            level,
            component: segment.to_string(),
        })
        .collect()
}

/// Distinct witnesses for one document across every chain reaching it
pub fn has_circular_nesting(
    identity: &ComponentIdentity,
    records: &[NestedComponentRecord],
) -> Vec<CycleWitness> {
    let mut witnesses = Vec::new();
    for record in records {
        if &record.identity() != identity {
            continue;
        }
        for witness in witnesses_for(record) {
            if !witnesses.contains(&witness) {
                witnesses.push(witness);
            }
        }
    }
    witnesses
}

// =============================================================================
// BATCH SCAN
// =============================================================================

/// Scan a full pre-dedup record set for circular nesting.
///
/// Returns one entry per document with at least one witness, carrying
/// the canonical record for that document. Pure batch computation over
/// an immutable snapshot; identity groups are scanned in parallel.
pub fn find_circular_references(records: &[NestedComponentRecord]) -> Vec<CircularReference> {
    // group by identity, keeping first-seen order for stable output
    let mut order: Vec<ComponentIdentity> = Vec::new();
    let mut groups: HashMap<ComponentIdentity, Vec<&NestedComponentRecord>> = HashMap::new();
    for record in records {
        let identity = record.identity();
        let group = groups.entry(identity.clone()).or_default();
        if group.is_empty() {
            order.push(identity);
        }
        group.push(record);
    }

    order
        .into_par_iter()
        .filter_map(|identity| {
            let group = &groups[&identity];

            let mut witnesses: Vec<CycleWitness> = Vec::new();
            for record in group {
                for witness in witnesses_for(record) {
                    if !witnesses.contains(&witness) {
                        witnesses.push(witness);
                    }
                }
            }
            if witnesses.is_empty() {
                return None;
            }

            let canonical = group
                .iter()
                .copied()
                .max_by(|a, b| representative_order(a, b))?;

            Some(CircularReference {
                record: canonical.clone(),
                witnesses,
            })
        })
        .collect()
}

// =============================================================================
// REPORT ENTRY POINT
// =============================================================================

/// Load a persisted component report and scan it for circular nesting.
///
/// Load failures come back as a failed outcome rather than an error so
/// batch callers can continue past one bad report; malformed rows were
/// already skipped and are only counted in the message.
pub fn check_components_have_circular_references(
    report_path: &Path,
) -> AnalysisOutcome<CircularReference> {
    let started = Instant::now();

    let loaded = match load_component_report(report_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            return AnalysisOutcome::failure(format!(
                "Failed to read component report '{}': {}",
                report_path.display(),
                e
            ));
        }
    };

    let mut message = format!(
        "Read component report '{}': {} record(s), {} malformed row(s) skipped ({:.0?}).",
        report_path.display(),
        loaded.records.len(),
        loaded.skipped,
        started.elapsed()
    );

    let scan_started = Instant::now();
    let circular = find_circular_references(&loaded.records);
    message.push_str(&format!(
        "\nFound {} component(s) with circular nesting ({:.0?}).",
        circular.len(),
        scan_started.elapsed()
    ));

    AnalysisOutcome::success(message, circular)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AncestryPath;
    use std::io::Write;

    fn record(root_path: &str, category_path: &str) -> NestedComponentRecord {
        let ancestry = AncestryPath::parse(root_path, category_path).unwrap();
        NestedComponentRecord::from_ancestry(ancestry, "")
    }

    #[test]
    fn test_self_nesting_witness() {
        // document "A" (category "cat") appears at positions 0 and 2
        let rec = record("A::B::A", "cat::cat b::cat");

        let witnesses = witnesses_for(&rec);
        assert_eq!(
            witnesses,
            vec![CycleWitness {
                level: 0,
                component: "A :: cat".to_string(),
            }]
        );
    }

    #[test]
    fn test_all_distinct_pairs_no_witness() {
        let rec = record("A::B::C", "cat a::cat b::cat c");
        assert!(witnesses_for(&rec).is_empty());
    }

    #[test]
    fn test_same_name_different_category_is_not_a_cycle() {
        let rec = record("A::B::A", "Generic::cat b::Structural");
        assert!(witnesses_for(&rec).is_empty());
    }

    #[test]
    fn test_witnesses_across_chains() {
        // reached cyclically via one chain and cleanly via another
        let records = vec![
            record("A::B::A", "cat::cat b::cat"),
            record("C::A", "cat c::cat"),
        ];

        let identity = ComponentIdentity::new("A", "cat");
        let witnesses = has_circular_nesting(&identity, &records);
        assert_eq!(witnesses.len(), 1);
        assert_eq!(witnesses[0].level, 0);
    }

    #[test]
    fn test_find_circular_references_reports_canonical_record() {
        let records = vec![
            record("A::B::A", "cat::cat b::cat"),
            record("X::A::B::A", "cat x::cat::cat b::cat"),
            record("C::D", "cat c::cat d"),
        ];

        let circular = find_circular_references(&records);
        assert_eq!(circular.len(), 1);
        // deepest chain is canonical
        assert_eq!(circular[0].record.root_path(), "X::A::B::A");
        // both chains witness level differs: A at level 0 vs level 1
        assert_eq!(circular[0].witnesses.len(), 2);
    }

    #[test]
    fn test_check_report_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ComponentBaseReport.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "A,cat,C:/lib/a.doc").unwrap();
        writeln!(file, "B,cat b,,A::B,cat::cat b,A").unwrap();
        writeln!(file, "A,cat,,A::B::A,cat::cat b::cat,B").unwrap();
        writeln!(file, "broken row with,only-two").unwrap();
        drop(file);

        let analysis = check_components_have_circular_references(&path);
        assert!(analysis.status());
        assert_eq!(analysis.result.len(), 1);
        assert_eq!(analysis.result[0].record.name, "A");
        assert_eq!(
            analysis.result[0].witnesses,
            vec![CycleWitness {
                level: 0,
                component: "A :: cat".to_string(),
            }]
        );
        assert!(analysis.outcome.message.contains("1 malformed row"));
    }

    #[test]
    fn test_check_report_missing_file() {
        let analysis =
            check_components_have_circular_references(Path::new("/nonexistent/report.csv"));
        assert!(!analysis.status());
        assert!(analysis.result.is_empty());
    }
}

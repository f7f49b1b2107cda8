//! Combined Report Snapshot
//!
//! Merges every component report found under a directory tree into a
//! single culled snapshot with a circular-nesting scan attached, then
//! persists it as JSON. Library-wide audits run against this snapshot
//! instead of re-reading each project's report.
//!
//! @module report/combined

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{cull, find_circular_references, CircularReference};
use crate::core::error::{Error, Result};
use crate::model::NestedComponentRecord;

use super::nested::{find_report_files, load_component_report};

/// A merged snapshot across every report under one directory tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedReport {
    /// When the snapshot was built
    pub created_at: DateTime<Utc>,
    /// Source report files, sorted
    pub source_reports: Vec<PathBuf>,
    /// Record count across all sources before culling
    pub total_records: usize,
    /// One canonical record per component, deepest ancestry kept
    pub culled_records: Vec<NestedComponentRecord>,
    /// Components whose identity recurs in their own ancestry
    pub circular: Vec<CircularReference>,
}

/// Build a combined snapshot from every report under `dir`.
///
/// The cycle scan runs over the full merged set; culling only picks
/// which record represents each component in the snapshot.
pub fn build_combined_report(
    dir: &Path,
    file_prefix: &str,
    extension: &str,
) -> Result<CombinedReport> {
    let source_reports = find_report_files(dir, file_prefix, extension);
    if source_reports.is_empty() {
        return Err(Error::NoReportInDirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut merged: Vec<NestedComponentRecord> = Vec::new();
    for report in &source_reports {
        let loaded = load_component_report(report)?;
        if loaded.skipped > 0 {
            tracing::warn!(
                "Skipped {} malformed row(s) in '{}'",
                loaded.skipped,
                report.display()
            );
        }
        merged.extend(loaded.records);
    }

    let circular = find_circular_references(&merged);
    let culled_records = cull(&merged);

    Ok(CombinedReport {
        created_at: Utc::now(),
        source_reports,
        total_records: merged.len(),
        culled_records,
        circular,
    })
}

/// Persist a combined snapshot as pretty-printed JSON
pub fn write_combined_report(path: &Path, report: &CombinedReport) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    Ok(())
}

/// Reload a persisted combined snapshot
pub fn load_combined_report(path: &Path) -> Result<CombinedReport> {
    if !path.exists() {
        return Err(Error::ReportNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    let report = serde_json::from_str(&content)?;
    Ok(report)
}

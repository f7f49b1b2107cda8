//! Component Report Persistence
//!
//! Writes and reloads the flat NestedComponentRecord reports produced
//! by a walk. Two row widths exist side by side:
//!
//! - base rows: `name, category, file_path` (root documents only)
//! - full rows: `name, category, file_path, root_path, category_path,
//!   host_component`
//!
//! Reports carry no header row; the loader still skips one when a file
//! starts with the column names. Malformed rows (wrong width, ancestry
//! strings that disagree) are skipped, logged and counted, never fatal
//! to the batch.
//!
//! @module report/nested

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::core::error::{Error, Result};
use crate::model::{AncestryPath, NestedComponentRecord};

use super::rows::{format_row, parse_row};

// =============================================================================
// WRITE
// =============================================================================

/// Persist records as full rows, in store order, duplicates included.
///
/// Duplicates are intentional: cycle detection needs every ancestry
/// chain, so culling happens after reload, not before persisting.
pub fn write_component_report(path: &Path, records: &[NestedComponentRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);

    for record in records {
        let row = format_row(&[
            &record.name,
            &record.category,
            &record.file_path,
            &record.root_path(),
            &record.category_path(),
            &record.host_component,
        ]);
        writeln!(writer, "{}", row)?;
    }

    writer.flush()?;
    Ok(())
}

// =============================================================================
// LOAD
// =============================================================================

/// A reloaded report: reconstructed records plus the malformed-row count
#[derive(Debug, Clone, Default)]
pub struct LoadedReport {
    pub records: Vec<NestedComponentRecord>,
    pub skipped: usize,
}

fn is_header_row(fields: &[String]) -> bool {
    fields.len() >= 2
        && fields[0].eq_ignore_ascii_case("name")
        && fields[1].eq_ignore_ascii_case("category")
}

fn record_from_fields(fields: &[String]) -> Result<NestedComponentRecord> {
    match fields.len() {
        // base variant: a root document's own name/category
        3 => {
            let ancestry = AncestryPath::root(fields[0].clone(), fields[1].clone());
            Ok(NestedComponentRecord::from_ancestry(
                ancestry,
                fields[2].clone(),
            ))
        }
        // full variant: reconstruct from the persisted path strings
        6 => {
            let ancestry = AncestryPath::parse(&fields[3], &fields[4])?;
            let leaf = ancestry.leaf();
            if leaf.name != fields[0] || leaf.category != fields[1] {
                return Err(Error::MalformedPath {
                    message: format!(
                        "row names '{} :: {}' but its ancestry ends in '{}'",
                        fields[0], fields[1], leaf
                    ),
                });
            }
            Ok(NestedComponentRecord::from_ancestry(
                ancestry,
                fields[2].clone(),
            ))
        }
        n => Err(Error::MalformedRow {
            row: 0,
            message: format!("expected 3 or 6 columns, found {}", n),
        }),
    }
}

/// Reload a persisted component report row by row
pub fn load_component_report(path: &Path) -> Result<LoadedReport> {
    if !path.exists() {
        return Err(Error::ReportNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(Error::EmptyReport {
            path: path.to_path_buf(),
        });
    }

    let mut loaded = LoadedReport::default();
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields = parse_row(line);
        if index == 0 && is_header_row(&fields) {
            continue;
        }
        match record_from_fields(&fields) {
            Ok(record) => loaded.records.push(record),
            Err(e) => {
                tracing::warn!("Skipping row {} of '{}': {}", index + 1, path.display(), e);
                loaded.skipped += 1;
            }
        }
    }

    Ok(loaded)
}

// =============================================================================
// DISCOVERY
// =============================================================================

/// First component report under a directory tree, by file name prefix
/// and extension. Deterministic: candidates are sorted by path.
pub fn find_report_file(dir: &Path, file_prefix: &str, extension: &str) -> Result<PathBuf> {
    let mut candidates: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(file_prefix) && n.ends_with(extension))
                .unwrap_or(false)
        })
        .collect();

    candidates.sort();
    candidates
        .into_iter()
        .next()
        .ok_or_else(|| Error::NoReportInDirectory {
            path: dir.to_path_buf(),
        })
}

/// Every component report under a directory tree, sorted by path
pub fn find_report_files(dir: &Path, file_prefix: &str, extension: &str) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(file_prefix) && n.ends_with(extension))
                .unwrap_or(false)
        })
        .collect();
    candidates.sort();
    candidates
}

// =============================================================================
// TESTS
// =============================================================================

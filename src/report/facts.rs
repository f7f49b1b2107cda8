//! Fact Report Persistence
//!
//! Fact records carry nested structure (ancestry, used_by), so unlike
//! component rows they persist as pretty-printed JSON.
//!
//! @module report/facts

use std::fs;
use std::path::Path;

use crate::core::error::{Error, Result};
use crate::model::FactRecord;

/// Persist fact records to a JSON report
pub fn write_fact_report(path: &Path, facts: &[FactRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(facts)?;
    fs::write(path, json)?;
    Ok(())
}

/// Reload a persisted fact report
pub fn load_fact_report(path: &Path) -> Result<Vec<FactRecord>> {
    if !path.exists() {
        return Err(Error::ReportNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    let facts = serde_json::from_str(&content)?;
    Ok(facts)
}

//! Merge command implementation

use crate::cli::MergeArgs;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::report::{build_combined_report, write_combined_report};
use tracing::info;

/// Run the merge command
pub fn run(args: MergeArgs) -> Result<()> {
    let config = Config::load_or_default(&args.directory);
    info!(
        directory = %args.directory.display(),
        prefix = %config.report.file_prefix,
        "Merging component reports"
    );

    let combined = build_combined_report(
        &args.directory,
        &config.report.file_prefix,
        &config.report.extension,
    )?;

    println!(
        "Merged {} report(s): {} record(s), {} canonical component(s), {} with circular nesting.",
        combined.source_reports.len(),
        combined.total_records,
        combined.culled_records.len(),
        combined.circular.len()
    );

    write_combined_report(&args.output, &combined)?;
    println!("Wrote combined snapshot to '{}'.", args.output.display());

    Ok(())
}

//! Cull command implementation

use crate::analysis::cull;
use crate::cli::{resolve_report, CullArgs};
use crate::core::error::Result;
use crate::report::{load_component_report, write_component_report};
use tracing::info;

/// Run the cull command
pub fn run(args: CullArgs) -> Result<()> {
    let report = resolve_report(&args.report)?;
    info!(report = %report.display(), "Culling component report");

    let loaded = load_component_report(&report)?;
    let culled = cull(&loaded.records);

    println!(
        "Culled {} record(s) to {} canonical component(s), {} malformed row(s) skipped.",
        loaded.records.len(),
        culled.len(),
        loaded.skipped
    );

    match args.output {
        Some(output) => {
            write_component_report(&output, &culled)?;
            println!("Wrote culled report to '{}'.", output.display());
        }
        None => {
            for record in &culled {
                println!("{}  ({})", record.identity(), record.root_path());
            }
        }
    }

    Ok(())
}

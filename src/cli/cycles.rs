//! Cycles command implementation

use crate::analysis::check_components_have_circular_references;
use crate::cli::{resolve_report, CyclesArgs};
use crate::core::error::Result;
use tracing::info;

/// Run the cycles command
pub fn run(args: CyclesArgs) -> Result<()> {
    let report = resolve_report(&args.report)?;
    info!(report = %report.display(), "Scanning for circular nesting");

    let analysis = check_components_have_circular_references(&report);
    if !analysis.status() {
        eprintln!("{}", analysis.outcome.message);
        std::process::exit(1);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis.result)?);
        return Ok(());
    }

    println!("{}", analysis.outcome.message);
    for circular in &analysis.result {
        println!(
            "\n{} :: {}  ({})",
            circular.record.name,
            circular.record.category,
            circular.record.root_path()
        );
        for witness in &circular.witnesses {
            println!("  recurs at level {}: {}", witness.level, witness.component);
        }
    }

    Ok(())
}

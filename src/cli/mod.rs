//! CLI command definitions and handlers

pub mod cull;
pub mod cycles;
pub mod merge;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::core::config::Config;
use crate::core::error::Result;
use crate::report::find_report_file;

const LONG_ABOUT: &str = r#"
Nesting analysis for flattened component reports.

QUICK START:
    1. nestscan cycles <report>      Scan one report for circular nesting
    2. nestscan cull <report>        Reduce a report to canonical records
    3. nestscan merge <directory>    Merge every report under a directory

REPORTS:
    A component report is comma-delimited text, one row per document in
    a nesting tree. Rows carry either 3 columns (name, category,
    file_path) or 6 (plus root_path, category_path, host_component).
    Reports are discovered by file name prefix and extension, both
    configurable through nestscan.toml.

EXAMPLES:
    nestscan cycles reports/ComponentBase.csv
    nestscan cycles --json reports/           JSON output, discover report
    nestscan cull reports/ComponentBase.csv -o culled.csv
    nestscan merge reports/ -o combined.json
"#;

/// Nesting analysis for flattened component reports
#[derive(Parser, Debug)]
#[command(name = "nestscan")]
#[command(author, version)]
#[command(about = "Nesting analysis for flattened component reports")]
#[command(long_about = LONG_ABOUT)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a component report for circular nesting
    #[command(visible_alias = "cy")]
    Cycles(CyclesArgs),

    /// Reduce a report to one canonical record per component
    Cull(CullArgs),

    /// Merge every report under a directory into a combined snapshot
    #[command(visible_alias = "m")]
    Merge(MergeArgs),
}

/// Arguments for the cycles command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    nestscan cycles reports/ComponentBase.csv
    nestscan cycles reports/                  Discover the report by prefix
    nestscan cycles --json reports/x.csv      JSON output for scripting")]
pub struct CyclesArgs {
    /// Report file, or a directory to discover one in
    pub report: PathBuf,

    /// JSON output
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the cull command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    nestscan cull reports/ComponentBase.csv
    nestscan cull reports/ComponentBase.csv -o culled.csv")]
pub struct CullArgs {
    /// Report file, or a directory to discover one in
    pub report: PathBuf,

    /// Write the culled report here instead of printing a summary
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the merge command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    nestscan merge reports/ -o combined.json")]
pub struct MergeArgs {
    /// Directory tree holding the component reports
    pub directory: PathBuf,

    /// Combined snapshot destination
    #[arg(short, long, default_value = "combined.json")]
    pub output: PathBuf,
}

/// Resolve a report argument: a file is taken as-is, a directory is
/// searched using the configured prefix and extension
pub(crate) fn resolve_report(path: &Path) -> Result<PathBuf> {
    if path.is_dir() {
        let config = Config::load_or_default(path);
        find_report_file(path, &config.report.file_prefix, &config.report.extension)
    } else {
        Ok(path.to_path_buf())
    }
}

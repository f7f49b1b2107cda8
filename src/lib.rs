//! Nestscan - Nesting analysis for component libraries
//!
//! Walks nested component documents into flat ancestry records, extracts
//! per-data-type facts, and analyses the persisted reports for duplicate
//! and circular nesting. No live authoring session needed for analysis,
//! just the reports.

pub mod analysis;
pub mod cli;
pub mod core;
pub mod extract;
pub mod model;
pub mod process;
pub mod report;

pub use crate::core::config::Config;
pub use crate::core::error::{Error, Result};
pub use crate::core::outcome::{AnalysisOutcome, Outcome};

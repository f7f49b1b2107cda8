//! Core infrastructure: errors, batch outcomes, configuration

pub mod config;
pub mod error;
pub mod outcome;

pub use config::Config;
pub use error::{Error, Result};
pub use outcome::{AnalysisOutcome, Outcome};

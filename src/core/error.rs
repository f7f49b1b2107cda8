//! Error types for nestscan

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using nestscan's Error
pub type Result<T> = std::result::Result<T, Error>;

/// nestscan error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Report not found: {path}")]
    ReportNotFound { path: PathBuf },

    #[error("No component report found under: {path}")]
    NoReportInDirectory { path: PathBuf },

    #[error("Empty component report: {path}")]
    EmptyReport { path: PathBuf },

    #[error("Malformed ancestry path: {message}")]
    MalformedPath { message: String },

    #[error("Malformed report row {row}: {message}")]
    MalformedRow { row: usize, message: String },

    #[error("Extraction failed for data type '{data_type}': {message}")]
    Extraction { data_type: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

//! Error types for loading sensor reports.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating a sensor report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The report file could not be read.
    #[error("Read error: {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The report is not valid JSON or does not match the report layout.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The report has no data rows, so no date range can be derived.
    #[error("Report contains no readings")]
    Empty,

    /// The report lists no sensors to choose from.
    #[error("Report lists no sensors")]
    NoSensors,
}

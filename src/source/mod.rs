//! Data source abstraction for loading sensor reports.
//!
//! A report is fetched once at startup; sources may hand out a fresh report
//! later (for example when the file on disk changes), which the app picks
//! up on its next poll.

mod file;
mod memory;

pub use file::FileSource;
pub use memory::MemorySource;

use std::fmt::Debug;

use crate::report::SensorReport;

/// Trait for receiving sensor reports from various sources.
///
/// # Example
///
/// ```
/// use sensorscope::{DataSource, FileSource};
///
/// let mut source = FileSource::new("report.json");
/// if let Some(report) = source.poll() {
///     println!("Got {} sensors", report.sensors.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for a new report.
    ///
    /// Returns `Some(report)` if a new report is available, `None` otherwise.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<SensorReport>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// Returns a short name for the report, shown in the header.
    fn name(&self) -> &str {
        self.description()
    }

    /// Returns the error message of the last poll, if it failed.
    fn error(&self) -> Option<&str>;
}

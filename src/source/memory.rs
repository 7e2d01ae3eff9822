//! In-memory data source.
//!
//! Hands out a report that is already in memory, for embedding the viewer
//! in another program or driving the app in tests.

use super::DataSource;
use crate::report::SensorReport;

/// A data source that holds a single report (or a single error).
///
/// # Example
///
/// ```
/// use sensorscope::{DataSource, MemorySource, SensorReport};
///
/// let report = SensorReport::parse(
///     r#"{ "sensors": [{ "id": 1, "type": "CO2" }], "data": [[0, [{ "value": 400 }]]] }"#,
/// ).unwrap();
/// let mut source = MemorySource::new(report, "inline");
/// assert!(source.poll().is_some());
/// assert!(source.poll().is_none());
/// ```
#[derive(Debug)]
pub struct MemorySource {
    pending: Option<SensorReport>,
    name: String,
    description: String,
    error: Option<String>,
}

impl MemorySource {
    /// Create a source that returns `report` on its first poll.
    pub fn new(report: SensorReport, source_description: &str) -> Self {
        Self {
            pending: Some(report),
            name: source_description.to_string(),
            description: format!("memory: {}", source_description),
            error: None,
        }
    }

    /// Create a source that only reports an error.
    pub fn failing(message: &str) -> Self {
        Self {
            pending: None,
            name: "failing".to_string(),
            description: "memory: failing".to_string(),
            error: Some(message.to_string()),
        }
    }

    /// Queue another report for the next poll.
    pub fn replace(&mut self, report: SensorReport) {
        self.pending = Some(report);
        self.error = None;
    }
}

impl DataSource for MemorySource {
    fn poll(&mut self) -> Option<SensorReport> {
        self.pending.take()
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

//! File-based data source.
//!
//! Loads a sensor report from a JSON file and reloads it when the file's
//! modification time advances.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{info, warn};

use super::DataSource;
use crate::report::SensorReport;

/// A data source that reads a sensor report from a JSON file.
///
/// The first poll always reads the file. Later polls return a report only
/// when the file has been modified since the last successful read.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    name: String,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
    loaded: bool,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            path,
            name,
            description,
            last_error: None,
            last_modified: None,
            loaded: false,
        }
    }

    /// Returns the path of the report file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file's modification time.
    fn get_modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    /// Read and parse the file, recording any error.
    fn read_file(&mut self) -> Option<SensorReport> {
        match SensorReport::load(&self.path) {
            Ok(report) => {
                info!(
                    path = %self.path.display(),
                    sensors = report.sensors.len(),
                    rows = report.data.len(),
                    "loaded sensor report"
                );
                self.last_error = None;
                Some(report)
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to load sensor report");
                self.last_error = Some(e.to_string());
                None
            }
        }
    }
}

impl DataSource for FileSource {
    fn poll(&mut self) -> Option<SensorReport> {
        let current_modified = self.get_modified_time();

        let file_changed = match (&self.last_modified, &current_modified) {
            _ if !self.loaded => true,
            (_, None) => false, // File disappeared, keep what we have
            (None, Some(_)) => true,
            (Some(last), Some(current)) => current > last,
        };

        if file_changed {
            if let Some(report) = self.read_file() {
                self.loaded = true;
                self.last_modified = current_modified;
                return Some(report);
            }
        }

        None
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn sample_json() -> &'static str {
        r#"{
            "sensors": [{ "id": 1, "type": "Temperature" }],
            "data": [[1577836800000, [{ "value": 21.5, "value-unit": "°C" }]]]
        }"#
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/report.json");
        assert_eq!(source.path(), Path::new("/tmp/report.json"));
        assert_eq!(source.description(), "file: /tmp/report.json");
        assert_eq!(source.name(), "report.json");
        assert!(source.error().is_none());
    }

    #[test]
    fn test_file_source_poll_reads_once() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());

        let report = source.poll();
        assert!(report.is_some());
        assert_eq!(report.unwrap().sensors[0].kind, "Temperature");

        // Unchanged file, nothing new
        assert!(source.poll().is_none());
        assert!(source.error().is_none());
    }

    #[test]
    fn test_file_source_missing_file() {
        let mut source = FileSource::new("/nonexistent/path/report.json");

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("Read error"));
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let mut source = FileSource::new(file.path());

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("Parse error"));
    }

    #[test]
    fn test_file_source_recovers_after_fix() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{").unwrap();

        let mut source = FileSource::new(file.path());
        assert!(source.poll().is_none());
        assert!(source.error().is_some());

        let path = file.path().to_path_buf();
        fs::write(&path, sample_json()).unwrap();

        // A failed read never counts as loaded, so the next poll retries
        assert!(source.poll().is_some());
        assert!(source.error().is_none());
    }

    #[test]
    fn test_file_source_reloads_when_modified() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());
        assert!(source.poll().is_some());
        assert!(source.poll().is_none());

        let path = file.path().to_path_buf();
        fs::write(
            &path,
            r#"{
                "sensors": [{ "id": 1, "type": "Pressure" }],
                "data": [[1577836800000, [{ "value": 1013 }]]]
            }"#,
        )
        .unwrap();
        // The mtime must advance past the first read
        let later = SystemTime::now() + Duration::from_secs(60);
        fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(later)
            .unwrap();

        let report = source.poll().unwrap();
        assert_eq!(report.sensors[0].kind, "Pressure");
        assert!(source.poll().is_none());
    }
}

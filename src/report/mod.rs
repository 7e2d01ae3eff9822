//! Sensor report types and loading.
//!
//! These types match the JSON layout of a sensor report: an ordered list of
//! sensor descriptors plus an ordered list of rows, where each row pairs a
//! millisecond timestamp with one reading per sensor.
//!
//! ```text
//! {
//!   "sensors": [ { "id": 1, "type": "Temperature" } ],
//!   "data": [ [ 1577836800000, [ { "value": 21.5, "value-unit": "°C", ... } ] ] ]
//! }
//! ```

mod error;

pub use error::ReportError;

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::data::date::from_millis;

/// A complete sensor report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReport {
    /// Sensor descriptors, in the order their readings appear in each row.
    pub sensors: Vec<Sensor>,
    /// Data rows, trusted to be sorted by timestamp.
    pub data: Vec<ReportRow>,
}

/// Identifier of a sensor. Reports use either numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SensorId {
    Number(i64),
    Text(String),
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorId::Number(n) => write!(f, "{}", n),
            SensorId::Text(s) => f.write_str(s),
        }
    }
}

/// Descriptor of a single sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    pub id: SensorId,
    /// Human readable sensor type, shown in the sensor dropdown.
    #[serde(rename = "type")]
    pub kind: String,
}

/// A single reading of one sensor at one timestamp.
///
/// Numeric fields are lenient: numbers, numeric strings and booleans are
/// accepted, anything else becomes `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub value: Option<f64>,
    #[serde(rename = "value-min", default, deserialize_with = "lenient_f64")]
    pub min: Option<f64>,
    #[serde(rename = "value-max", default, deserialize_with = "lenient_f64")]
    pub max: Option<f64>,
    #[serde(rename = "value-valid", default, deserialize_with = "lenient_f64")]
    pub valid: Option<f64>,
    #[serde(rename = "value-unit", default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// One row of the report: a timestamp and the readings of every sensor.
///
/// Serialized as a two-element array `[timestamp_ms, [reading, ...]]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRow", into = "RawRow")]
pub struct ReportRow {
    pub timestamp_ms: i64,
    pub readings: Vec<Reading>,
}

#[derive(Serialize, Deserialize)]
struct RawRow(#[serde(deserialize_with = "millis")] i64, Vec<Reading>);

impl From<RawRow> for ReportRow {
    fn from(raw: RawRow) -> Self {
        Self {
            timestamp_ms: raw.0,
            readings: raw.1,
        }
    }
}

impl From<ReportRow> for RawRow {
    fn from(row: ReportRow) -> Self {
        RawRow(row.timestamp_ms, row.readings)
    }
}

impl ReportRow {
    /// Returns the reading for the sensor at `index`, if the row has one.
    pub fn reading(&self, index: usize) -> Option<&Reading> {
        self.readings.get(index)
    }

    /// Returns the row timestamp as a UTC date-time.
    pub fn time(&self) -> Option<DateTime<Utc>> {
        from_millis(self.timestamp_ms)
    }
}

impl SensorReport {
    /// Load and validate a report from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let content = fs::read_to_string(path).map_err(|source| ReportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse and validate a report from a JSON string.
    pub fn parse(content: &str) -> Result<Self, ReportError> {
        let report: SensorReport = serde_json::from_str(content)?;
        report.validate()?;
        Ok(report)
    }

    /// Check that the report can be displayed at all.
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.sensors.is_empty() {
            return Err(ReportError::NoSensors);
        }
        if self.data.is_empty() {
            return Err(ReportError::Empty);
        }
        Ok(())
    }

    /// Returns the sensor descriptor at `index`.
    pub fn sensor(&self, index: usize) -> Option<&Sensor> {
        self.sensors.get(index)
    }

    /// Timestamps of the first and last rows.
    ///
    /// Rows are trusted to be sorted, so these are the earliest and latest
    /// readings. Returns `None` if the report has no rows.
    pub fn bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let first = self.data.first()?.time()?;
        let last = self.data.last()?.time()?;
        Some((first, last))
    }
}

/// Accept a timestamp written as an integer or a float.
///
/// The timestamp must map to a representable UTC date-time.
fn millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() {
        return Err(serde::de::Error::custom("timestamp is not a finite number"));
    }
    let ms = value as i64;
    if from_millis(ms).is_none() {
        return Err(serde::de::Error::custom(format!(
            "timestamp {} is out of range",
            value
        )));
    }
    Ok(ms)
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()),
        Some(Value::Bool(b)) => Some(if b { 1.0 } else { 0.0 }),
        Some(Value::String(s)) => s.trim().parse().ok().filter(|v: &f64| v.is_finite()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_json() -> &'static str {
        r#"{
            "sensors": [
                { "id": 1, "type": "Temperature" },
                { "id": "hum-2", "type": "Humidity" }
            ],
            "data": [
                [1577836800000, [
                    { "value": 21.5, "value-min": 20.9, "value-max": 22.0, "value-valid": 21.5, "value-unit": "°C" },
                    { "value": 40, "value-min": 38, "value-max": 41, "value-valid": true, "value-unit": "%" }
                ]],
                [1577923200000.0, [
                    { "value": "22.1", "value-min": null, "value-max": 23.0, "value-valid": 22.1, "value-unit": "°C" }
                ]]
            ]
        }"#
    }

    #[test]
    fn test_parse_report() {
        let report = SensorReport::parse(sample_json()).unwrap();
        assert_eq!(report.sensors.len(), 2);
        assert_eq!(report.sensors[0].id, SensorId::Number(1));
        assert_eq!(report.sensors[1].id, SensorId::Text("hum-2".to_string()));
        assert_eq!(report.sensors[1].kind, "Humidity");
        assert_eq!(report.data.len(), 2);

        let row = &report.data[0];
        assert_eq!(row.timestamp_ms, 1_577_836_800_000);
        let reading = row.reading(0).unwrap();
        assert_eq!(reading.value, Some(21.5));
        assert_eq!(reading.min, Some(20.9));
        assert_eq!(reading.max, Some(22.0));
        assert_eq!(reading.unit.as_deref(), Some("°C"));
    }

    #[test]
    fn test_lenient_numeric_fields() {
        let report = SensorReport::parse(sample_json()).unwrap();
        assert_eq!(report.data[0].reading(1).unwrap().valid, Some(1.0));

        let second = &report.data[1];
        assert_eq!(second.timestamp_ms, 1_577_923_200_000);
        let reading = second.reading(0).unwrap();
        assert_eq!(reading.value, Some(22.1));
        assert_eq!(reading.min, None);
        assert!(second.reading(1).is_none());
    }

    #[test]
    fn test_bounds_use_first_and_last_rows() {
        let report = SensorReport::parse(sample_json()).unwrap();
        let (first, last) = report.bounds().unwrap();
        assert_eq!(first.timestamp_millis(), 1_577_836_800_000);
        assert_eq!(last.timestamp_millis(), 1_577_923_200_000);
    }

    #[test]
    fn test_sensor_id_display() {
        assert_eq!(SensorId::Number(7).to_string(), "7");
        assert_eq!(SensorId::Text("co2".to_string()).to_string(), "co2");
    }

    #[test]
    fn test_empty_data_is_rejected() {
        let err = SensorReport::parse(r#"{ "sensors": [{ "id": 1, "type": "T" }], "data": [] }"#)
            .unwrap_err();
        assert!(matches!(err, ReportError::Empty));
    }

    #[test]
    fn test_missing_sensors_is_rejected() {
        let err = SensorReport::parse(r#"{ "sensors": [], "data": [[0, []]] }"#).unwrap_err();
        assert!(matches!(err, ReportError::NoSensors));
    }

    #[test]
    fn test_invalid_json() {
        let err = SensorReport::parse("not valid json").unwrap_err();
        assert!(err.to_string().contains("Parse error"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let report = SensorReport::load(file.path()).unwrap();
        assert_eq!(report.sensors.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = SensorReport::load(Path::new("/nonexistent/report.json")).unwrap_err();
        assert!(matches!(err, ReportError::Read { .. }));
        assert!(err.to_string().contains("Read error"));
    }

    #[test]
    fn test_row_serializes_as_array() {
        let row = ReportRow {
            timestamp_ms: 1000,
            readings: vec![Reading {
                value: Some(1.0),
                ..Default::default()
            }],
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json[0], 1000);
        assert_eq!(json[1][0]["value"], 1.0);
    }

    #[test]
    fn test_non_finite_strings_are_missing() {
        let reading: Reading = serde_json::from_str(
            r#"{ "value": "inf", "value-min": "NaN", "value-max": "-infinity", "value-valid": "3.5" }"#,
        )
        .unwrap();
        assert_eq!(reading.value, None);
        assert_eq!(reading.min, None);
        assert_eq!(reading.max, None);
        assert_eq!(reading.valid, Some(3.5));
    }

    #[test]
    fn test_out_of_range_timestamp_is_rejected() {
        let err = SensorReport::parse(r#"{ "sensors": [{ "id": 1, "type": "T" }], "data": [[1e30, []]] }"#)
            .unwrap_err();
        assert!(matches!(err, ReportError::Parse(_)));
        assert!(err.to_string().contains("out of range"));
    }
}

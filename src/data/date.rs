//! Date parsing and formatting for pickers and axis labels.

use anyhow::{bail, Result};
use chrono::{DateTime, NaiveDate, Utc};

/// Date format used by the date pickers.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Timestamp format used for x-axis labels.
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Accepted input formats, picker format first.
const INPUT_FORMATS: &[&str] = &[DATE_FORMAT, "%Y-%m-%d"];

/// Parse date strings like "01.02.2020" or "2020-02-01"
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    for format in INPUT_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(date);
        }
    }

    bail!("Unknown date format: {} (expected dd.mm.yyyy)", s)
}

/// Format a date the way the pickers show it
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Format a reading timestamp for axis labels
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Convert a millisecond timestamp from the report
pub fn from_millis(ms: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_picker_format() {
        let d = parse_date("01.02.2020").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2020, 2, 1).unwrap());
    }

    #[test]
    fn test_parse_iso_format() {
        let d = parse_date(" 2020-02-01 ").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2020, 2, 1).unwrap());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_date("31.02.2020").is_err());
        assert!(parse_date("yesterday").is_err());
    }

    #[test]
    fn test_format_timestamp() {
        let t = from_millis(1_577_880_000_000).unwrap();
        assert_eq!(format_timestamp(t), "01.01.2020 12:00");
        assert_eq!(format_date(t.date_naive()), "01.01.2020");
    }
}

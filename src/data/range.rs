//! Date-range filtering and the picker limits of the start/end controls.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::date::format_date;

/// Earliest and latest days present in a report.
///
/// The start picker may choose any day within these limits; the end picker
/// may choose any day from the chosen start up to `last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeLimits {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl RangeLimits {
    /// Build limits from the first and last report timestamps.
    pub fn from_bounds(first: DateTime<Utc>, last: DateTime<Utc>) -> Self {
        let (first, last) = (first.date_naive(), last.date_naive());
        // Unsorted reports can put the later row first.
        Self {
            first: first.min(last),
            last: first.max(last),
        }
    }

    /// The full range covered by the report.
    pub fn full_range(&self) -> DateRange {
        DateRange {
            start: self.first,
            end: self.last,
        }
    }

    /// The full range narrowed by optional requested dates.
    ///
    /// Requested dates go through the same limits as the pickers.
    pub fn select(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> DateRange {
        let mut range = self.full_range();
        if let Some(start) = start {
            range = range.with_start(start, self);
        }
        if let Some(end) = end {
            range = range.with_end(end, self);
        }
        range
    }
}

/// An inclusive range of calendar days (UTC).
///
/// A timestamp is inside the range when its day is between `start` and
/// `end`, both ends included, so the last day is covered through 23:59.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Check whether a reading timestamp falls within the range.
    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        let day = time.date_naive();
        day >= self.start && day <= self.end
    }

    /// Number of days covered, or zero for an inverted range.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days().max(-1) + 1
    }

    /// Move the start to `date`, honoring the start picker limits.
    ///
    /// The end follows along if the new start passes it.
    pub fn with_start(self, date: NaiveDate, limits: &RangeLimits) -> Self {
        let start = date.clamp(limits.first, limits.last);
        Self {
            start,
            end: self.end.max(start).min(limits.last),
        }
    }

    /// Move the end to `date`, honoring the end picker limits.
    pub fn with_end(self, date: NaiveDate, limits: &RangeLimits) -> Self {
        let lower = self.start.min(limits.last);
        Self {
            start: self.start,
            end: date.clamp(lower, limits.last),
        }
    }

    /// Shift the start by `days`, clamped to the picker limits.
    pub fn shift_start(self, days: i64, limits: &RangeLimits) -> Self {
        self.with_start(shift_day(self.start, days), limits)
    }

    /// Shift the end by `days`, clamped to the picker limits.
    pub fn shift_end(self, days: i64, limits: &RangeLimits) -> Self {
        self.with_end(shift_day(self.end, days), limits)
    }

    /// Display label, e.g. "01.01.2020 - 31.01.2020".
    pub fn label(&self) -> String {
        format!("{} - {}", format_date(self.start), format_date(self.end))
    }
}

fn shift_day(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}

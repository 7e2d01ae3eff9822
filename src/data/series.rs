//! Reshaping report rows into chart series.
//!
//! A report stores readings row by row: each row carries every sensor's
//! value, min, max, valid and unit fields. The chart needs the opposite
//! shape, one array per field for a single sensor. [`PlotData::build`] does
//! that in a single pass over the rows, keeping only rows inside the chosen
//! date range.

use ratatui::style::Color;
use serde::Serialize;
use tracing::debug;

use super::date::{format_timestamp, from_millis};
use super::range::DateRange;
use crate::report::{Reading, SensorReport};

/// Line colors in series order: red, blue, green, purple.
pub const LINE_COLORS: [(u8, u8, u8); 4] = [(255, 0, 0), (0, 0, 255), (0, 255, 0), (128, 0, 128)];

/// Which reading field a series is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeriesKind {
    Value,
    Max,
    Min,
    Valid,
}

impl SeriesKind {
    /// All series kinds, in display order.
    pub const ALL: [SeriesKind; 4] = [
        SeriesKind::Value,
        SeriesKind::Max,
        SeriesKind::Min,
        SeriesKind::Valid,
    ];

    /// Key used in series names, e.g. `minValue (°C)`.
    pub fn key(&self) -> &'static str {
        match self {
            SeriesKind::Value => "value",
            SeriesKind::Min => "minValue",
            SeriesKind::Max => "maxValue",
            SeriesKind::Valid => "validValue",
        }
    }

    /// Extract this field from a reading.
    pub fn extract(&self, reading: &Reading) -> Option<f64> {
        match self {
            SeriesKind::Value => reading.value,
            SeriesKind::Min => reading.min,
            SeriesKind::Max => reading.max,
            SeriesKind::Valid => reading.valid,
        }
    }

    /// Line color as an RGB triple.
    pub fn rgb(&self) -> (u8, u8, u8) {
        LINE_COLORS[*self as usize]
    }

    /// Line color as a terminal color.
    pub fn color(&self) -> Color {
        let (r, g, b) = self.rgb();
        Color::Rgb(r, g, b)
    }

    /// Line color as a CSS `rgb(...)` string.
    pub fn css_color(&self) -> String {
        let (r, g, b) = self.rgb();
        format!("rgb({},{},{})", r, g, b)
    }
}

/// One line of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub kind: SeriesKind,
    /// Legend name, e.g. `value (°C)`.
    pub name: String,
    /// Points as (seconds since epoch, reading).
    pub points: Vec<(f64, f64)>,
    /// Reading per x label; `None` where the row lacked this field.
    pub values: Vec<Option<f64>>,
}

/// Everything the chart needs for one sensor over one date range.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotData {
    /// Index of the sensor the data was built for.
    pub sensor: usize,
    /// The range the rows were filtered with.
    pub range: DateRange,
    /// Unit of the last matching reading that had one.
    pub unit: String,
    /// Formatted timestamp of each matching row.
    pub x_labels: Vec<String>,
    /// Millisecond timestamp of each matching row.
    pub timestamps: Vec<i64>,
    /// Series in [`SeriesKind::ALL`] order.
    pub series: Vec<Series>,
}

impl PlotData {
    /// Filter the report's rows by `range` and reshape the chosen sensor's
    /// readings into per-field series.
    pub fn build(report: &SensorReport, sensor: usize, range: DateRange) -> Self {
        let mut x_labels = Vec::new();
        let mut timestamps = Vec::new();
        let mut columns: [Vec<Option<f64>>; 4] = Default::default();
        let mut unit = String::new();

        for row in &report.data {
            let Some(time) = row.time() else {
                continue;
            };
            if !range.contains(time) {
                continue;
            }
            // A row without this sensor contributes nothing.
            let Some(reading) = row.reading(sensor) else {
                continue;
            };

            x_labels.push(format_timestamp(time));
            timestamps.push(row.timestamp_ms);
            for (column, kind) in columns.iter_mut().zip(SeriesKind::ALL) {
                column.push(kind.extract(reading));
            }
            if let Some(ref u) = reading.unit {
                unit = u.clone();
            }
        }

        let series = SeriesKind::ALL
            .iter()
            .zip(columns)
            .map(|(kind, values)| {
                let points = timestamps
                    .iter()
                    .zip(&values)
                    .filter_map(|(&ts, v)| v.map(|v| (ts as f64 / 1000.0, v)))
                    .collect();
                Series {
                    kind: *kind,
                    name: format!("{} ({})", kind.key(), unit),
                    points,
                    values,
                }
            })
            .collect();

        debug!(
            sensor,
            rows = timestamps.len(),
            range = %range.label(),
            "built plot data"
        );

        Self {
            sensor,
            range,
            unit,
            x_labels,
            timestamps,
            series,
        }
    }

    /// True when no row matched the range.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Number of matching rows.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// X bounds in seconds since epoch.
    ///
    /// A single point gets a one-minute window around it so the axis is
    /// never degenerate.
    pub fn x_bounds(&self) -> Option<[f64; 2]> {
        let first = *self.timestamps.first()? as f64 / 1000.0;
        let last = *self.timestamps.last()? as f64 / 1000.0;
        let (lo, hi) = (first.min(last), first.max(last));
        if hi - lo < f64::EPSILON {
            Some([lo - 30.0, hi + 30.0])
        } else {
            Some([lo, hi])
        }
    }

    /// Y bounds over every series, padded by 5% of the spread.
    pub fn y_bounds(&self) -> Option<[f64; 2]> {
        let mut values = self.series.iter().flat_map(|s| s.points.iter().map(|&(_, v)| v));
        let first = values.next()?;
        let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

        let spread = max - min;
        let pad = if spread > 0.0 { spread * 0.05 } else { 1.0 };
        Some([min - pad, max + pad])
    }

    /// Labels for the first row, the axis midpoint and the last row.
    ///
    /// The x axis is linear in time, so the middle label is the time at the
    /// center of [`x_bounds`](Self::x_bounds), not the middle row.
    pub fn axis_labels(&self) -> Vec<String> {
        match self.x_labels.len() {
            0 => Vec::new(),
            1 => vec![self.x_labels[0].clone()],
            2 => self.x_labels.clone(),
            n => {
                let first = self.timestamps[0];
                let last = self.timestamps[n - 1];
                let middle = from_millis(first + (last - first) / 2)
                    .map(format_timestamp)
                    .unwrap_or_else(|| self.x_labels[n / 2].clone());
                vec![self.x_labels[0].clone(), middle, self.x_labels[n - 1].clone()]
            }
        }
    }
}

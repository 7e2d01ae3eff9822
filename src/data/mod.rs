//! Filtering and reshaping of sensor reports.
//!
//! This module turns a loaded [`SensorReport`](crate::report::SensorReport)
//! into the per-series arrays the chart draws.
//!
//! ## Submodules
//!
//! - [`date`]: Parsing and formatting of picker dates and axis timestamps
//! - [`range`]: Inclusive day ranges and the start/end picker limits
//! - [`series`]: The row scan that builds [`PlotData`]
//!
//! ## Data Flow
//!
//! ```text
//! SensorReport (raw JSON)
//!        │
//!        ▼
//! RangeLimits::from_bounds()  ──▶  chosen DateRange
//!        │
//!        ▼
//! PlotData::build(report, sensor, range)
//!        │
//!        └──▶ Series × 4 (value, max, min, valid)
//! ```

pub mod date;
pub mod range;
pub mod series;

pub use range::{DateRange, RangeLimits};
pub use series::{PlotData, Series, SeriesKind};

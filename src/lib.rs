//! # sensorscope
//!
//! A terminal viewer for environmental-sensor JSON reports.
//!
//! A report is loaded once, the user picks a sensor and a start/end date,
//! and the chosen sensor's value, max, min and valid readings are drawn as
//! a line chart over that range.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(filter + │    │(controls│    │         │ │
//! │  └────┬────┘    │ reshape) │    │ + chart)│    └─────────┘ │
//! │       │         └──────────┘    └─────────┘                 │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── FileSource | MemorySource                   │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Chosen sensor and dates, focus, and applying the filter
//! - **[`source`]**: Data source abstraction ([`DataSource`] trait)
//! - **[`report`]**: The report JSON layout and its loading errors
//! - **[`data`]**: Date ranges and the row scan that builds [`PlotData`]
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`export`]**: Writes the plotted series as JSON line traces
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # View a report
//! sensorscope --file report.json
//!
//! # Start on the second sensor, January only
//! sensorscope --file report.json --sensor 1 --from 01.01.2020 --to 31.01.2020
//!
//! # Write the plot for a sensor and exit
//! sensorscope --file report.json --sensor 1 --export plot.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use sensorscope::{App, FileSource, Theme};
//!
//! let source = Box::new(FileSource::new("report.json"));
//! let app = App::new(source, Theme::dark());
//! ```
//!
//! ### Building plot data directly
//!
//! ```
//! use sensorscope::{PlotData, SensorReport};
//!
//! let report = SensorReport::parse(r#"{
//!     "sensors": [{ "id": 1, "type": "Temperature" }],
//!     "data": [[1577836800000, [{ "value": 21.5, "value-unit": "°C" }]]]
//! }"#).unwrap();
//!
//! let (first, last) = report.bounds().unwrap();
//! let range = sensorscope::RangeLimits::from_bounds(first, last).full_range();
//! let plot = PlotData::build(&report, 0, range);
//! assert_eq!(plot.series[0].name, "value (°C)");
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod export;
pub mod report;
pub mod source;
pub mod telemetry;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, Focus};
pub use config::{Settings, ThemeChoice};
pub use data::{DateRange, PlotData, RangeLimits, Series, SeriesKind};
pub use report::{Reading, ReportError, ReportRow, Sensor, SensorId, SensorReport};
pub use source::{DataSource, FileSource, MemorySource};
pub use ui::Theme;

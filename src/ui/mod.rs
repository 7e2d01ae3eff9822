//! Terminal UI rendering using ratatui.
//!
//! ## Submodules
//!
//! - [`controls`]: Sensor dropdown, start/end date pickers and filter button
//! - [`chart`]: Line chart of the filtered series, or the load error
//! - [`common`]: Shared components (header, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Sensor │ Start │ End │ [ Filter ]    │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ Chart (chart::render)                │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlays rendered on top:
//!    - controls::render_dropdown
//!    - common::render_help
//! ```

pub mod chart;
pub mod common;
pub mod controls;
pub mod theme;

pub use chart::SensorChart;
pub use theme::Theme;

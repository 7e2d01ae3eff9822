//! Export of plotted series to JSON.
//!
//! Each series becomes a line trace with `x`, `y`, `type`, `name` and
//! `line { color, width }`, so the output can be fed to a browser plotting
//! library as-is.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde_json::{json, Value};
use tracing::info;

use crate::data::date::format_date;
use crate::data::PlotData;
use crate::report::Sensor;

/// Build the line traces for a plot, one per series.
pub fn traces(plot: &PlotData) -> Vec<Value> {
    plot.series
        .iter()
        .map(|s| {
            json!({
                "x": plot.x_labels,
                "y": s.values,
                "type": "line",
                "name": s.name,
                "line": {
                    "color": s.kind.css_color(),
                    "width": 1
                }
            })
        })
        .collect()
}

/// Build the full export document for a plot.
pub fn to_json(plot: &PlotData, sensor: Option<&Sensor>) -> Value {
    json!({
        "sensor": sensor.map(|s| json!({ "index": plot.sensor, "id": s.id, "type": s.kind })),
        "range": {
            "start": format_date(plot.range.start),
            "end": format_date(plot.range.end)
        },
        "unit": plot.unit,
        "readings": plot.len(),
        "traces": traces(plot)
    })
}

/// Write the export document for a plot to `path`.
pub fn write_plot(path: &Path, plot: &PlotData, sensor: Option<&Sensor>) -> Result<()> {
    let json = serde_json::to_string_pretty(&to_json(plot, sensor))?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(json.as_bytes())?;

    info!(path = %path.display(), readings = plot.len(), "exported plot");
    Ok(())
}

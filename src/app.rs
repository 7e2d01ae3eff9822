//! Application state and control logic.
//!
//! The app holds one loaded report and the user's choices: a sensor and a
//! start/end date. Choosing a sensor redraws the chart at once; moving a
//! date only changes the chosen range, which is drawn when the filter is
//! applied.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::data::date::parse_date;
use crate::data::{DateRange, PlotData, RangeLimits};
use crate::export;
use crate::report::{Sensor, SensorReport};
use crate::source::DataSource;
use crate::ui::Theme;

/// How long a status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// The control that currently receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The sensor dropdown.
    #[default]
    Sensor,
    /// The start date picker.
    StartDate,
    /// The end date picker.
    EndDate,
    /// The filter button.
    Filter,
}

impl Focus {
    /// All controls, in tab order.
    pub const ALL: [Focus; 4] = [Focus::Sensor, Focus::StartDate, Focus::EndDate, Focus::Filter];

    /// Cycle to the next control.
    pub fn next(self) -> Self {
        match self {
            Focus::Sensor => Focus::StartDate,
            Focus::StartDate => Focus::EndDate,
            Focus::EndDate => Focus::Filter,
            Focus::Filter => Focus::Sensor,
        }
    }

    /// Cycle to the previous control.
    pub fn prev(self) -> Self {
        match self {
            Focus::Sensor => Focus::Filter,
            Focus::StartDate => Focus::Sensor,
            Focus::EndDate => Focus::StartDate,
            Focus::Filter => Focus::EndDate,
        }
    }

    /// Returns the display label for this control.
    pub fn label(&self) -> &'static str {
        match self {
            Focus::Sensor => "Choose Sensor:",
            Focus::StartDate => "Start Date:",
            Focus::EndDate => "End Date:",
            Focus::Filter => "Filter",
        }
    }

    /// True for the two date pickers.
    pub fn is_date(&self) -> bool {
        matches!(self, Focus::StartDate | Focus::EndDate)
    }
}

/// Selection requested before the report is loaded (from settings or CLI).
#[derive(Debug, Clone, Default)]
struct InitialSelection {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub focus: Focus,

    // Data source
    source: Box<dyn DataSource>,
    pub report: Option<SensorReport>,
    pub limits: Option<RangeLimits>,
    pub load_error: Option<String>,

    // User choices
    pub chosen_sensor: usize,
    pub chosen: Option<DateRange>,
    initial: Option<InitialSelection>,

    // What the chart currently shows
    pub plot: Option<PlotData>,

    // Typed date entry for the focused picker
    pub date_input: Option<String>,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading from the given data source.
    pub fn new(source: Box<dyn DataSource>, theme: Theme) -> Self {
        Self {
            running: true,
            show_help: false,
            focus: Focus::default(),
            source,
            report: None,
            limits: None,
            load_error: None,
            chosen_sensor: 0,
            chosen: None,
            initial: None,
            plot: None,
            date_input: None,
            theme,
            status_message: None,
        }
    }

    /// Preselect a sensor and dates to apply when the first report loads.
    ///
    /// Dates outside the report are clamped to the picker limits.
    pub fn with_selection(
        mut self,
        sensor: usize,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Self {
        self.chosen_sensor = sensor;
        self.initial = Some(InitialSelection { start, end });
        self
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Returns the report's short name, e.g. the file name.
    pub fn report_name(&self) -> &str {
        self.source.name()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    /// Poll the data source for a new report.
    ///
    /// Returns Ok(true) if a new report was loaded. A load failure before
    /// any report is shown replaces the chart with the error; a failure on
    /// a later reload only shows a status message.
    pub fn reload_data(&mut self) -> Result<bool> {
        if let Some(report) = self.source.poll() {
            self.load_report(report);
            return Ok(true);
        }

        if let Some(err) = self.source.error() {
            let err = err.to_string();
            if self.report.is_some() {
                self.set_status_message(format!("Reload failed: {}", err));
            } else {
                self.load_error = Some(err);
            }
        }
        Ok(false)
    }

    /// Install a freshly loaded report and draw it over its full range.
    fn load_report(&mut self, report: SensorReport) {
        let Some((first, last)) = report.bounds() else {
            warn!("report has no readings");
            self.reject_report("Report contains no readings");
            return;
        };
        if report.sensors.is_empty() {
            warn!("report lists no sensors");
            self.reject_report("Report lists no sensors");
            return;
        }

        let limits = RangeLimits::from_bounds(first, last);
        let initial = self.initial.take().unwrap_or_default();
        self.chosen = Some(limits.select(initial.start, initial.end));
        self.limits = Some(limits);
        self.chosen_sensor = self.chosen_sensor.min(report.sensors.len() - 1);
        self.report = Some(report);
        self.load_error = None;
        self.draw_chart();
    }

    fn reject_report(&mut self, reason: &str) {
        if self.report.is_some() {
            self.set_status_message(format!("Reload failed: {}", reason));
        } else {
            self.load_error = Some(reason.to_string());
        }
    }

    /// Sensors listed in the report.
    pub fn sensors(&self) -> &[Sensor] {
        self.report.as_ref().map(|r| r.sensors.as_slice()).unwrap_or_default()
    }

    /// The currently chosen sensor.
    pub fn selected_sensor(&self) -> Option<&Sensor> {
        self.report.as_ref()?.sensor(self.chosen_sensor)
    }

    /// Rebuild the chart from the chosen sensor and chosen range.
    pub fn draw_chart(&mut self) {
        let (Some(report), Some(range)) = (&self.report, self.chosen) else {
            return;
        };
        let plot = PlotData::build(report, self.chosen_sensor, range);
        info!(
            sensor = self.chosen_sensor,
            range = %range.label(),
            rows = plot.len(),
            "drew chart"
        );
        self.plot = Some(plot);
    }

    /// Choose a sensor and redraw immediately.
    pub fn select_sensor(&mut self, index: usize) {
        if index < self.sensors().len() && index != self.chosen_sensor {
            self.chosen_sensor = index;
            self.draw_chart();
        }
    }

    /// Choose the next sensor in the list.
    pub fn next_sensor(&mut self) {
        self.select_sensor(self.chosen_sensor + 1);
    }

    /// Choose the previous sensor in the list.
    pub fn prev_sensor(&mut self) {
        if let Some(index) = self.chosen_sensor.checked_sub(1) {
            self.select_sensor(index);
        }
    }

    /// Move the chosen start date by `days`. The chart is not redrawn.
    pub fn shift_start(&mut self, days: i64) {
        if let (Some(range), Some(limits)) = (self.chosen, self.limits) {
            self.chosen = Some(range.shift_start(days, &limits));
        }
    }

    /// Move the chosen end date by `days`. The chart is not redrawn.
    pub fn shift_end(&mut self, days: i64) {
        if let (Some(range), Some(limits)) = (self.chosen, self.limits) {
            self.chosen = Some(range.shift_end(days, &limits));
        }
    }

    /// Set the chosen start date. The chart is not redrawn.
    pub fn set_start(&mut self, date: NaiveDate) {
        if let (Some(range), Some(limits)) = (self.chosen, self.limits) {
            self.chosen = Some(range.with_start(date, &limits));
        }
    }

    /// Set the chosen end date. The chart is not redrawn.
    pub fn set_end(&mut self, date: NaiveDate) {
        if let (Some(range), Some(limits)) = (self.chosen, self.limits) {
            self.chosen = Some(range.with_end(date, &limits));
        }
    }

    /// Apply the chosen date range to the chart.
    pub fn apply_filter(&mut self) {
        self.draw_chart();
    }

    /// The range the chart currently shows.
    pub fn applied_range(&self) -> Option<DateRange> {
        self.plot.as_ref().map(|p| p.range)
    }

    /// True when the chosen dates have not been applied yet.
    pub fn has_pending_range(&self) -> bool {
        match (self.chosen, self.applied_range()) {
            (Some(chosen), Some(applied)) => chosen != applied,
            _ => false,
        }
    }

    /// Change the focused control by one step.
    ///
    /// Positive steps move to the next sensor or a later date.
    pub fn adjust_focused(&mut self, step: i64) {
        match self.focus {
            Focus::Sensor => {
                if step > 0 {
                    self.next_sensor();
                } else if step < 0 {
                    self.prev_sensor();
                }
            }
            Focus::StartDate => self.shift_start(step),
            Focus::EndDate => self.shift_end(step),
            Focus::Filter => {}
        }
    }

    /// Jump the focused control to its lower limit.
    pub fn focused_to_first(&mut self) {
        match self.focus {
            Focus::Sensor => self.select_sensor(0),
            Focus::StartDate => {
                if let Some(limits) = self.limits {
                    self.set_start(limits.first);
                }
            }
            Focus::EndDate => {
                if let Some(range) = self.chosen {
                    self.set_end(range.start);
                }
            }
            Focus::Filter => {}
        }
    }

    /// Jump the focused control to its upper limit.
    pub fn focused_to_last(&mut self) {
        match self.focus {
            Focus::Sensor => self.select_sensor(self.sensors().len().saturating_sub(1)),
            Focus::StartDate => {
                if let Some(limits) = self.limits {
                    self.set_start(limits.last);
                }
            }
            Focus::EndDate => {
                if let Some(limits) = self.limits {
                    self.set_end(limits.last);
                }
            }
            Focus::Filter => {}
        }
    }

    /// Focus the next control.
    pub fn next_focus(&mut self) {
        self.cancel_date_input();
        self.focus = self.focus.next();
    }

    /// Focus the previous control.
    pub fn prev_focus(&mut self) {
        self.cancel_date_input();
        self.focus = self.focus.prev();
    }

    /// Focus a specific control.
    pub fn set_focus(&mut self, focus: Focus) {
        if focus != self.focus {
            self.cancel_date_input();
            self.focus = focus;
        }
    }

    /// Start typing a date into the focused picker.
    pub fn begin_date_input(&mut self) {
        if self.focus.is_date() && self.chosen.is_some() {
            self.date_input = Some(String::new());
        }
    }

    /// Append a character to the typed date. Only digits and separators are kept.
    pub fn date_input_push(&mut self, c: char) {
        if let Some(ref mut input) = self.date_input {
            if (c.is_ascii_digit() || c == '.' || c == '-') && input.len() < 10 {
                input.push(c);
            }
        }
    }

    /// Remove the last character from the typed date.
    pub fn date_input_pop(&mut self) {
        if let Some(ref mut input) = self.date_input {
            input.pop();
        }
    }

    /// Parse the typed date and set it on the focused picker.
    pub fn commit_date_input(&mut self) {
        let Some(input) = self.date_input.take() else {
            return;
        };
        match parse_date(&input) {
            Ok(date) => match self.focus {
                Focus::StartDate => self.set_start(date),
                Focus::EndDate => self.set_end(date),
                _ => {}
            },
            Err(e) => self.set_status_message(format!("Invalid date: {}", e)),
        }
    }

    /// Discard the typed date.
    pub fn cancel_date_input(&mut self) {
        self.date_input = None;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the plotted series to a JSON file.
    pub fn export_plot(&self, path: &Path) -> Result<()> {
        let Some(ref plot) = self.plot else {
            anyhow::bail!("No chart to export");
        };
        export::write_plot(path, plot, self.selected_sensor())
    }
}

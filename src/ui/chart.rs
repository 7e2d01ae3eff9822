//! Chart view rendering.
//!
//! Draws one braille line per series (value, max, min, valid) over the
//! applied date range. A load error takes the chart's place.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Rect},
    style::Style,
    symbols,
    text::Line,
    widgets::{
        Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph, Widget, Wrap,
    },
    Frame,
};

use crate::app::App;
use crate::data::PlotData;
use crate::ui::Theme;

/// Line chart widget for one sensor's plot data.
pub struct SensorChart<'a> {
    plot: &'a PlotData,
    title: String,
    theme: &'a Theme,
}

impl<'a> SensorChart<'a> {
    pub fn new(plot: &'a PlotData, sensor_name: &str, theme: &'a Theme) -> Self {
        let title = format!(
            " {} | {} | {} readings ",
            sensor_name,
            plot.range.label(),
            plot.len()
        );
        Self { plot, title, theme }
    }
}

impl Widget for SensorChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_type(self.theme.border_type)
            .border_style(Style::default().fg(self.theme.border));

        let (Some(x_bounds), Some(y_bounds)) = (self.plot.x_bounds(), self.plot.y_bounds()) else {
            Paragraph::new("No readings in chosen range")
                .alignment(Alignment::Center)
                .style(Style::default().fg(self.theme.pending))
                .block(block)
                .render(area, buf);
            return;
        };

        let datasets: Vec<Dataset> = self
            .plot
            .series
            .iter()
            .map(|s| {
                Dataset::default()
                    .name(s.name.clone())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(s.kind.color()))
                    .data(&s.points)
            })
            .collect();

        let [y_lower, y_upper] = y_bounds;
        let y_mid = (y_lower + y_upper) / 2.0;
        let y_labels = vec![
            format!("{:.1}", y_lower),
            format!("{:.1}", y_mid),
            format!("{:.1}", y_upper),
        ];
        let axis_style = Style::default().fg(self.theme.axis);

        Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .style(axis_style)
                    .bounds(x_bounds)
                    .labels(self.plot.axis_labels()),
            )
            .y_axis(
                Axis::default()
                    .title(Line::from(self.plot.unit.clone()))
                    .style(axis_style)
                    .bounds(y_bounds)
                    .labels(y_labels),
            )
            .legend_position(Some(LegendPosition::TopRight))
            .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)))
            .render(area, buf);
    }
}

/// Render the chart area: the error, a loading notice, or the chart.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(ref err) = app.load_error {
        render_error(frame, app, err, area);
        return;
    }

    let Some(ref plot) = app.plot else {
        let paragraph = Paragraph::new("Loading...")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_type(app.theme.border_type));
        frame.render_widget(paragraph, area);
        return;
    };

    let sensor_name = app.selected_sensor().map(|s| s.kind.as_str()).unwrap_or("Sensor");
    frame.render_widget(SensorChart::new(plot, sensor_name, &app.theme), area);
}

fn render_error(frame: &mut Frame, app: &App, err: &str, area: Rect) {
    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.error));

    let paragraph = Paragraph::new(err.to_string())
        .style(app.theme.error_style())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, area);
}

//! Common UI components shared across the screen.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, Focus};

/// Render the header bar with a report overview.
///
/// Displays: report name, sensor count, row count, the report's date span.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Span::styled(" SENSORSCOPE ", Style::default().add_modifier(Modifier::BOLD));

    let (Some(report), Some(limits)) = (&app.report, app.limits) else {
        let status = if app.load_error.is_some() {
            Span::styled("| Load failed", app.theme.error_style())
        } else {
            Span::raw("| Loading...")
        };
        frame.render_widget(Paragraph::new(Line::from(vec![title, status])), area);
        return;
    };

    let line = Line::from(vec![
        title,
        Span::raw("│ "),
        Span::styled(app.report_name().to_string(), app.theme.label),
        Span::raw(" │ "),
        Span::styled(
            format!("{}", report.sensors.len()),
            Style::default().fg(app.theme.highlight),
        ),
        Span::raw(" sensors │ "),
        Span::styled(
            format_count(report.data.len()),
            Style::default().fg(app.theme.highlight),
        ),
        Span::raw(" rows │ "),
        Span::raw(limits.full_range().label()),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Format a count for display (e.g., 1234 -> "1.2K", 1234567 -> "1.2M").
fn format_count(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Render the status bar at the bottom.
///
/// Shows: source, applied range, available controls. Also displays
/// temporary status messages and a hint when the chosen range is unapplied.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    if app.has_pending_range() {
        let paragraph = Paragraph::new(" Date range changed | Enter/f:filter to redraw")
            .style(Style::default().fg(app.theme.pending));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(range) = app.applied_range() {
        let controls = if app.date_input.is_some() {
            "Type dd.mm.yyyy | Enter:set Esc:cancel"
        } else {
            match app.focus {
                Focus::Sensor => "↑↓:sensor Tab:next Enter:filter ?:help q:quit",
                Focus::StartDate | Focus::EndDate => {
                    "↑↓:day PgUp/PgDn:30d d:type Enter:filter ?:help q:quit"
                }
                Focus::Filter => "Enter:filter Tab:next e:export ?:help q:quit",
            }
        };

        format!(
            " {} | {} | {}",
            app.source_description(),
            range.label(),
            controls
        )
    } else if let Some(ref err) = app.load_error {
        format!(" Error: {} | q:quit r:retry", err)
    } else {
        " Loading... | q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the chart.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.label)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Controls",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  Tab/←/→     Switch control"),
        Line::from("  ↑/↓ k/j     Change sensor or day"),
        Line::from("  PgUp/PgDn   Move date by 30 days"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  d           Type a date"),
        Line::from("  Enter/f     Apply date filter"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r           Reload report"),
        Line::from("  e           Export chart to JSON"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 20u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::SensorReport;
    use crate::source::MemorySource;
    use crate::ui::Theme;
    use ratatui::{backend::TestBackend, Terminal};

    fn header_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 1)).unwrap();
        terminal
            .draw(|frame| render_header(frame, app, frame.area()))
            .unwrap();
        let buf = terminal.backend().buffer();
        (0..buf.area.width)
            .map(|x| buf.cell((x, 0)).unwrap().symbol().to_string())
            .collect()
    }

    #[test]
    fn test_header_shows_report_overview() {
        let report = SensorReport::parse(
            r#"{
                "sensors": [{ "id": 1, "type": "Temperature" }, { "id": 2, "type": "Humidity" }],
                "data": [
                    [1577880000000, [{ "value": 1 }, { "value": 2 }]],
                    [1578484800000, [{ "value": 1 }, { "value": 2 }]]
                ]
            }"#,
        )
        .unwrap();
        let mut app = App::new(Box::new(MemorySource::new(report, "report.json")), Theme::dark());
        app.reload_data().unwrap();

        let header = header_text(&app);
        assert!(header.contains("report.json"));
        assert!(header.contains("2 sensors"));
        assert!(header.contains("2 rows"));
        assert!(header.contains("01.01.2020 - 08.01.2020"));
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(8_760), "8.8K");
        assert_eq!(format_count(2_500_000), "2.5M");
    }
}

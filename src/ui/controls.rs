//! Controls row rendering.
//!
//! Shows the sensor dropdown, the start and end date pickers and the filter
//! button side by side. The focused control is highlighted; while the
//! sensor control is focused its option list drops down over the chart.
//! The start picker carries the report's first and last day on its lower
//! border.

use std::rc::Rc;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::{App, Focus};
use crate::data::date::format_date;

/// Maximum number of sensors shown in the dropdown at once.
const MAX_DROPDOWN_ROWS: u16 = 10;

/// Split the controls row into the four control areas, in [`Focus::ALL`] order.
pub fn layout(area: Rect) -> Rc<[Rect]> {
    Layout::horizontal([
        Constraint::Percentage(34),
        Constraint::Percentage(24),
        Constraint::Percentage(24),
        Constraint::Percentage(18),
    ])
    .split(area)
}

/// Render the controls row.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let areas = layout(area);

    render_sensor(frame, app, areas[0]);
    render_date(frame, app, Focus::StartDate, areas[1]);
    render_date(frame, app, Focus::EndDate, areas[2]);
    render_filter(frame, app, areas[3]);
}

fn control_block(app: &App, focus: Focus) -> Block<'static> {
    let focused = app.focus == focus;
    let border = if focused {
        Style::default().fg(app.theme.highlight)
    } else {
        Style::default().fg(app.theme.border)
    };
    Block::default()
        .title(Span::styled(format!(" {} ", focus.label()), app.theme.label))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(border)
}

fn render_sensor(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Sensor;
    let text = match app.selected_sensor() {
        Some(sensor) => format!(
            "{} ({}/{}) ▾",
            sensor.kind,
            app.chosen_sensor + 1,
            app.sensors().len()
        ),
        None => "-".to_string(),
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(
        format!(" {} ", text),
        app.theme.control_style(focused),
    )))
    .block(control_block(app, Focus::Sensor));
    frame.render_widget(paragraph, area);
}

fn render_date(frame: &mut Frame, app: &App, focus: Focus, area: Rect) {
    let focused = app.focus == focus;

    let line = match (&app.date_input, app.chosen) {
        // Typed entry in progress
        (Some(input), _) if focused => Line::from(vec![
            Span::styled(format!(" {}", input), app.theme.control_style(true)),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
        (_, Some(range)) => {
            let date = if focus == Focus::StartDate {
                range.start
            } else {
                range.end
            };
            Line::from(Span::styled(
                format!(" {} ", format_date(date)),
                app.theme.control_style(focused),
            ))
        }
        (_, None) => Line::from(" -"),
    };

    let mut block = control_block(app, focus);
    if focus == Focus::StartDate {
        if let Some(limits) = app.limits {
            block = block.title_bottom(Line::styled(
                format!("{}-{}", format_date(limits.first), format_date(limits.last)),
                Style::default().add_modifier(Modifier::DIM),
            ));
        }
    }

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_filter(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Filter;
    let mut style = app.theme.control_style(focused);
    if app.has_pending_range() && !focused {
        style = style.fg(app.theme.pending).add_modifier(Modifier::BOLD);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(if focused {
            Style::default().fg(app.theme.highlight)
        } else {
            Style::default().fg(app.theme.border)
        });
    let paragraph = Paragraph::new(Line::from(Span::styled(" [ Filter ] ", style)))
        .alignment(ratatui::layout::Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

/// Render the sensor option list below the sensor control.
///
/// Only shown while the sensor control has focus.
pub fn render_dropdown(frame: &mut Frame, app: &App, control: Rect, screen: Rect) {
    if app.focus != Focus::Sensor || app.sensors().len() < 2 {
        return;
    }

    let rows = (app.sensors().len() as u16).min(MAX_DROPDOWN_ROWS);
    let y = control.bottom();
    let height = (rows + 2).min(screen.bottom().saturating_sub(y));
    if height < 3 {
        return;
    }
    let dropdown = Rect::new(control.x, y, control.width, height);

    let items: Vec<ListItem> = app
        .sensors()
        .iter()
        .map(|s| ListItem::new(format!("{} (id {})", s.kind, s.id)))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.highlight)),
        )
        .highlight_style(app.theme.focused)
        .highlight_symbol("▸ ");

    let mut state = ListState::default().with_selected(Some(app.chosen_sensor));

    frame.render_widget(Clear, dropdown);
    frame.render_stateful_widget(list, dropdown, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::SensorReport;
    use crate::source::MemorySource;
    use crate::ui::Theme;
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn app() -> App {
        let report = SensorReport::parse(
            r#"{
                "sensors": [
                    { "id": 1, "type": "Temperature" },
                    { "id": 2, "type": "Humidity" },
                    { "id": 3, "type": "CO2" }
                ],
                "data": [
                    [1577880000000, [{ "value": 1 }, { "value": 2 }, { "value": 3 }]],
                    [1578484800000, [{ "value": 1 }, { "value": 2 }, { "value": 3 }]]
                ]
            }"#,
        )
        .unwrap();
        let mut app = App::new(Box::new(MemorySource::new(report, "test")), Theme::dark());
        app.reload_data().unwrap();
        app
    }

    fn buffer_text(buf: &Buffer) -> String {
        let mut content = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                content.push_str(buf.cell((x, y)).unwrap().symbol());
            }
            content.push('\n');
        }
        content
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal
            .draw(|frame| {
                let row = Rect::new(0, 0, 100, 3);
                render(frame, app, row);
                render_dropdown(frame, app, layout(row)[0], frame.area());
            })
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_controls_show_choices() {
        let content = draw(&app());
        assert!(content.contains("Choose Sensor:"));
        assert!(content.contains("Temperature (1/3)"));
        assert!(content.contains("01.01.2020"));
        assert!(content.contains("08.01.2020"));
        assert!(content.contains("[ Filter ]"));
    }

    #[test]
    fn test_dropdown_lists_sensors_when_focused() {
        let mut app = app();
        let content = draw(&app);
        assert!(content.contains("Humidity (id 2)"));
        assert!(content.contains("CO2 (id 3)"));

        app.set_focus(Focus::StartDate);
        let content = draw(&app);
        assert!(!content.contains("Humidity (id 2)"));
    }

    #[test]
    fn test_typed_date_is_shown() {
        let mut app = app();
        app.set_focus(Focus::EndDate);
        app.begin_date_input();
        app.date_input_push('0');
        app.date_input_push('3');
        app.date_input_push('.');

        assert!(draw(&app).contains("03._"));
    }

    #[test]
    fn test_start_picker_shows_limits() {
        let mut app = app();
        app.set_start(NaiveDate::from_ymd_opt(2020, 1, 5).unwrap());

        let content = draw(&app);
        let bottom = content.lines().nth(2).unwrap();
        assert!(bottom.contains("01.01.2020-08.01.2020"));
        assert!(content.lines().nth(1).unwrap().contains("05.01.2020"));
    }
}

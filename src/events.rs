//! Keyboard and mouse input handling.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use crate::app::{App, Focus};

/// Days a date picker moves on PageUp/PageDown.
const PAGE_DAYS: i64 = 30;

/// File written by the export key.
const EXPORT_FILE: &str = "plot_export.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // If a date is being typed, keys go to the input
    if app.date_input.is_some() {
        handle_date_input(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // Focus cycling
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_focus();
            } else {
                app.next_focus();
            }
        }
        KeyCode::BackTab => app.prev_focus(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_focus(),
        KeyCode::Right | KeyCode::Char('l') => app.next_focus(),

        // Change the focused control
        KeyCode::Up | KeyCode::Char('k') => app.adjust_focused(-1),
        KeyCode::Down | KeyCode::Char('j') => app.adjust_focused(1),
        KeyCode::PageUp => {
            if app.focus.is_date() {
                app.adjust_focused(-PAGE_DAYS);
            }
        }
        KeyCode::PageDown => {
            if app.focus.is_date() {
                app.adjust_focused(PAGE_DAYS);
            }
        }
        KeyCode::Home => app.focused_to_first(),
        KeyCode::End => app.focused_to_last(),

        // Apply the chosen range
        KeyCode::Enter | KeyCode::Char('f') => app.apply_filter(),

        // Type a date into the focused picker
        KeyCode::Char('d') => app.begin_date_input(),

        // Reload
        KeyCode::Char('r') => {
            let _ = app.reload_data();
        }

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Export
        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_FILE);
            match app.export_plot(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle key input while a date is being typed
fn handle_date_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.commit_date_input(),
        KeyCode::Esc => app.cancel_date_input(),
        KeyCode::Backspace => app.date_input_pop(),
        KeyCode::Char(c) => app.date_input_push(c),
        _ => {}
    }
}

/// Handle mouse events.
///
/// `controls` holds the screen areas of the four controls, in
/// [`Focus::ALL`] order, as last rendered.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, controls: &[Rect]) {
    match mouse.kind {
        // Scroll wheel changes the focused control
        MouseEventKind::ScrollUp => app.adjust_focused(-1),
        MouseEventKind::ScrollDown => app.adjust_focused(1),

        // Click to focus; clicking the filter button applies it
        MouseEventKind::Down(MouseButton::Left) => {
            let position = Position::new(mouse.column, mouse.row);
            let clicked = controls
                .iter()
                .zip(Focus::ALL)
                .find(|(area, _)| area.contains(position))
                .map(|(_, focus)| focus);

            if let Some(focus) = clicked {
                app.set_focus(focus);
                if focus == Focus::Filter {
                    app.apply_filter();
                }
            }
        }

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::SensorReport;
    use crate::source::MemorySource;
    use crate::ui::Theme;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn app() -> App {
        let report = SensorReport::parse(
            r#"{
                "sensors": [{ "id": 1, "type": "Temperature" }, { "id": 2, "type": "Humidity" }],
                "data": [
                    [1577880000000, [{ "value": 1 }, { "value": 2 }]],
                    [1578052800000, [{ "value": 3 }, { "value": 4 }]]
                ]
            }"#,
        )
        .unwrap();
        let mut app = App::new(Box::new(MemorySource::new(report, "test")), Theme::dark());
        app.reload_data().unwrap();
        app
    }

    #[test]
    fn test_tab_cycles_focus() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::StartDate);
        handle_key_event(&mut app, key(KeyCode::BackTab));
        assert_eq!(app.focus, Focus::Sensor);
    }

    #[test]
    fn test_down_changes_sensor() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Down));
        assert_eq!(app.chosen_sensor, 1);
        assert_eq!(app.plot.as_ref().unwrap().sensor, 1);
    }

    #[test]
    fn test_date_keys_wait_for_filter() {
        let mut app = app();
        app.set_focus(Focus::StartDate);
        handle_key_event(&mut app, key(KeyCode::Down));
        assert!(app.has_pending_range());

        handle_key_event(&mut app, key(KeyCode::Char('f')));
        assert!(!app.has_pending_range());
        assert_eq!(app.plot.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_typed_date() {
        let mut app = app();
        app.set_focus(Focus::EndDate);
        handle_key_event(&mut app, key(KeyCode::Char('d')));
        for c in "01.01.2020".chars() {
            handle_key_event(&mut app, key(KeyCode::Char(c)));
        }
        handle_key_event(&mut app, key(KeyCode::Enter));

        assert!(app.date_input.is_none());
        let chosen = app.chosen.unwrap();
        assert_eq!(chosen.end, chosen.start);
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(app.running);
    }

    #[test]
    fn test_click_filter_button() {
        let mut app = app();
        app.set_focus(Focus::StartDate);
        app.adjust_focused(1);
        let controls = [
            Rect::new(0, 0, 10, 3),
            Rect::new(10, 0, 10, 3),
            Rect::new(20, 0, 10, 3),
            Rect::new(30, 0, 10, 3),
        ];
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 33,
            row: 1,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(&mut app, click, &controls);
        assert_eq!(app.focus, Focus::Filter);
        assert!(!app.has_pending_range());
    }
}

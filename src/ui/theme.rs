//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.
//! Series lines always use their fixed RGB colors; the theme only covers
//! the surrounding controls.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::config::ThemeChoice;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for error messages.
    pub error: Color,
    /// Color for hints such as an unapplied date range.
    pub pending: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Color for axis lines and labels.
    pub axis: Color,
    /// Style for section labels ("Choose Sensor:", "Start Date:").
    pub label: Style,
    /// Style for the focused control.
    pub focused: Style,
    /// Style for unfocused controls.
    pub control: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            error: Color::Red,
            pending: Color::Yellow,
            border: Color::Gray,
            axis: Color::Gray,
            label: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            focused: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            control: Style::default().fg(Color::White),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            error: Color::Red,
            pending: Color::Magenta,
            border: Color::DarkGray,
            axis: Color::DarkGray,
            label: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            focused: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            control: Style::default().fg(Color::Black),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Resolve a configured theme choice.
    pub fn from_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Auto => Self::auto_detect(),
            ThemeChoice::Dark => Self::dark(),
            ThemeChoice::Light => Self::light(),
        }
    }

    /// Style for a control, depending on focus.
    pub fn control_style(&self, focused: bool) -> Style {
        if focused {
            self.focused
        } else {
            self.control
        }
    }

    /// Style for error text.
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }
}

//! Bottom status line.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Status line severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusLevel {
    /// Neutral hint.
    #[default]
    Info,
    /// Something went wrong.
    Error,
}

impl StatusLevel {
    /// Returns color for level.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Error => Color::Red,
        }
    }
}

/// Left-aligned message with right-aligned details.
#[derive(Debug, Clone, Default)]
pub struct StatusBar {
    message: String,
    details: String,
    level: StatusLevel,
}

impl StatusBar {
    /// Creates info status line.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Creates error status line.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: StatusLevel::Error,
            ..Self::default()
        }
    }

    /// Sets right-aligned details.
    #[must_use]
    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    /// Returns the severity.
    #[must_use]
    pub const fn level(&self) -> StatusLevel {
        self.level
    }
}

impl Widget for &StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .fg(self.level.color())
            .add_modifier(Modifier::BOLD);
        let dim = Style::default().fg(Color::DarkGray);

        let width = usize::from(area.width);
        let padding = width.saturating_sub(self.message.width() + self.details.width());

        let line = Line::from(vec![
            Span::styled(self.message.as_str(), style),
            Span::raw(" ".repeat(padding)),
            Span::styled(self.details.as_str(), dim),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}

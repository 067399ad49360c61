//! Reusable TUI components
//!
//! Colors, the status badge, metric cards and button labels shared by the
//! pages in [`super::ui`].

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::{ClientStatus, Metric, Trend};
use crate::shell::Theme;

/// Colors for one theme
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub primary: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub muted: Color,
    pub text: Color,
    pub surface: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                primary: Color::Blue,
                accent: Color::Magenta,
                success: Color::Green,
                warning: Color::Yellow,
                error: Color::Red,
                muted: Color::Gray,
                text: Color::Black,
                surface: Color::White,
            },
            // System follows the terminal's own colors
            Theme::Dark | Theme::System => Self {
                primary: Color::Cyan,
                accent: Color::Magenta,
                success: Color::Green,
                warning: Color::Yellow,
                error: Color::Red,
                muted: Color::DarkGray,
                text: Color::White,
                surface: Color::Reset,
            },
        }
    }

    /// Plain bordered block in this palette
    pub fn block<'a>(&self, title: impl Into<Line<'a>>) -> Block<'a> {
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.muted))
    }

    /// Border style for the focused element
    pub fn focus(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.primary)
        } else {
            Style::default().fg(self.muted)
        }
    }
}

/// Colored badge for a client status
pub fn status_badge(status: ClientStatus) -> Span<'static> {
    let color = match status {
        ClientStatus::Active => Color::Green,
        ClientStatus::Inactive => Color::Gray,
        ClientStatus::Pending => Color::Yellow,
    };

    Span::styled(
        format!("● {}", status.as_str()),
        Style::default().fg(color),
    )
}

/// Button text, swapped for a loading label while its action runs
pub fn button_label(label: &str, loading: bool) -> String {
    if loading {
        "[ Processing... ]".to_string()
    } else {
        format!("[ {label} ]")
    }
}

/// A metric card widget showing a single value with its change
pub struct MetricCard<'a> {
    metric: &'a Metric,
    palette: Palette,
}

impl<'a> MetricCard<'a> {
    pub fn new(metric: &'a Metric, palette: Palette) -> Self {
        Self { metric, palette }
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        let trend = match self.metric.trend {
            Trend::Up => Span::styled(
                format!("↑ {}", self.metric.change),
                Style::default().fg(self.palette.success),
            ),
            Trend::Down => Span::styled(
                format!("↓ {}", self.metric.change),
                Style::default().fg(self.palette.error),
            ),
        };

        let content = vec![
            Line::from(Span::styled(
                self.metric.value.as_str(),
                Style::default()
                    .fg(self.palette.text)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                trend,
                Span::styled(" vs last month", Style::default().fg(self.palette.muted)),
            ]),
        ];

        let paragraph = Paragraph::new(content)
            .block(self.palette.block(self.metric.title.as_str()))
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, area);
    }
}

/// Truncate to `max_len` characters, marking the cut with an ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

/// Rectangle centered in `r`, sized as a percentage of it
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_badge_colors() {
        assert_eq!(status_badge(ClientStatus::Active).style.fg, Some(Color::Green));
        assert_eq!(status_badge(ClientStatus::Inactive).style.fg, Some(Color::Gray));
        assert_eq!(status_badge(ClientStatus::Pending).style.fg, Some(Color::Yellow));
        assert_eq!(status_badge(ClientStatus::Pending).content, "● Pending");
    }

    #[test]
    fn test_button_label() {
        assert_eq!(button_label("Upgrade Plan", false), "[ Upgrade Plan ]");
        assert_eq!(button_label("Upgrade Plan", true), "[ Processing... ]");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Global Solutions", 8), "Global …");
    }

    #[test]
    fn test_centered_rect_fits_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 40, outer);
        assert_eq!(inner.width, 60);
        assert_eq!(inner.height, 20);
        assert!(inner.x >= outer.x && inner.right() <= outer.right());
    }
}

//! Shared rendering helpers.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Span,
};

use swarm_console_sdk::Severity;

/// Centered overlay rect sized as a percentage of `r`.
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

pub fn severity_style(severity: Severity) -> Style {
    let color = match severity {
        Severity::Info => Color::Gray,
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
        Severity::Critical => Color::Magenta,
    };
    Style::default().fg(color)
}

pub fn severity_tag(severity: Severity) -> Span<'static> {
    let tag = match severity {
        Severity::Info => "[INFO]",
        Severity::Success => "[ OK ]",
        Severity::Warning => "[WARN]",
        Severity::Error => "[FAIL]",
        Severity::Critical => "[CRIT]",
    };
    Span::styled(tag, severity_style(severity))
}

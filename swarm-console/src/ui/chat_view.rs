//! Architect chat rendering.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use swarm_console_sdk::Role;

use crate::app::App;

pub fn render_architect(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let mut lines: Vec<Line> = Vec::new();
    for turn in &app.export.chat.transcript {
        let (prefix, style) = match turn.role {
            Role::User => ("OPERATOR > ", Style::default().fg(Color::Cyan)),
            Role::Assistant => ("ARCHITECT > ", Style::default().fg(Color::Magenta)),
        };
        let mut first = true;
        for text_line in turn.text.lines() {
            if first {
                lines.push(Line::from(vec![
                    Span::styled(prefix, style.add_modifier(Modifier::BOLD)),
                    Span::raw(text_line.to_string()),
                ]));
                first = false;
            } else {
                lines.push(Line::from(Span::raw(format!(
                    "{}{}",
                    " ".repeat(prefix.len()),
                    text_line
                ))));
            }
        }
        lines.push(Line::default());
    }

    if app.export.chat.waiting_for_response {
        let elapsed = app.export.chat.elapsed_seconds().unwrap_or(0);
        lines.push(Line::from(Span::styled(
            format!("{} Hive Mind processing... {}s", app.export.chat.spinner_char(), elapsed),
            Style::default().fg(Color::Yellow),
        )));
    }

    if app.export.chat.has_blueprint() {
        lines.push(Line::from(Span::styled(
            "BLUEPRINT CONFIRMED. Press [F2] to forge the sovereign export.",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
    }

    if let Some(package) = app.export.package() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("SOVEREIGN NODE: {}", package.endpoint),
            Style::default().fg(Color::Green),
        )));
        lines.push(Line::from(Span::styled(
            format!("KEY: {}", package.sovereign_key),
            Style::default().fg(Color::Green),
        )));
        lines.push(Line::from(Span::raw(format!(
            "STATUS: {} | integrity {} | expires in {}",
            package.status.message, package.status.integrity, package.status.expiry
        ))));
    }

    // Show the tail that fits the pane.
    let visible = chunks[0].height.saturating_sub(2) as usize;
    let start = lines.len().saturating_sub(visible);
    let transcript = Paragraph::new(lines[start..].to_vec())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Hive Mind Architect "),
        );
    f.render_widget(transcript, chunks[0]);

    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Cyan)),
        Span::raw(app.export.chat.input_buffer.as_str()),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Message "));
    f.render_widget(input, chunks[1]);
}

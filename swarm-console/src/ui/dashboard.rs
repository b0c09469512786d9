//! Dashboard panels: service roster, event feed, console log.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use swarm_console_sdk::{EventKind, ServiceStatus};

use crate::app::App;

use super::components::{severity_style, severity_tag};

pub fn render_roster(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .services
        .iter()
        .map(|svc| {
            let status_style = match svc.status {
                ServiceStatus::Warm => Style::default().fg(Color::Green),
                ServiceStatus::Cold => Style::default().fg(Color::Cyan),
                ServiceStatus::Frozen => Style::default().fg(Color::Blue),
                ServiceStatus::Decaying => Style::default().fg(Color::Red),
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        svc.name,
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" "),
                    Span::styled(format!("{:?}", svc.status).to_uppercase(), status_style),
                ]),
                Line::from(Span::styled(
                    format!("  {} | up {} | {}", svc.latency, svc.uptime, svc.deployment_hash),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Services ({}) ", app.services.len())),
    );
    f.render_widget(list, area);
}

pub fn render_event_feed(f: &mut Frame, area: Rect, app: &App) {
    // Feed is stored newest first and rendered top-down as-is.
    let items: Vec<ListItem> = app
        .events
        .iter()
        .take(area.height.saturating_sub(2) as usize)
        .map(|evt| {
            let kind_style = match evt.kind {
                EventKind::Error => Style::default().fg(Color::Red),
                EventKind::Trigger => Style::default().fg(Color::Yellow),
                EventKind::Response => Style::default().fg(Color::Green),
                EventKind::Migration => Style::default().fg(Color::Magenta),
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:?} ", evt.kind).to_uppercase(), kind_style),
                Span::styled(&evt.source, Style::default().fg(Color::Cyan)),
                Span::raw(": "),
                Span::raw(&evt.payload),
            ]))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Event Mesh "));
    f.render_widget(list, area);
}

pub fn render_log_panel(f: &mut Frame, area: Rect, app: &App) {
    // Log is oldest first; show the tail that fits.
    let visible = area.height.saturating_sub(2) as usize;
    let start = app.logs.len().saturating_sub(visible);
    let lines: Vec<Line> = app.logs[start..]
        .iter()
        .map(|entry| {
            Line::from(vec![
                severity_tag(entry.severity),
                Span::raw(" "),
                Span::styled(
                    format!("{} ", entry.timestamp.format("%H:%M:%S")),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(format!("{}: ", entry.source), Style::default().fg(Color::Cyan)),
                Span::styled(entry.message.clone(), severity_style(entry.severity)),
            ])
        })
        .collect();

    let panel =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Console "));
    f.render_widget(panel, area);
}

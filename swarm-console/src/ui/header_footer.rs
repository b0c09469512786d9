//! Header and footer rendering.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, View};

pub fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let title = match app.view {
        View::Dashboard => "Swarm Console v0.1.0 - Fleet Overview",
        View::Deploy => "Swarm Console v0.1.0 - Module Deployment",
        View::Evolution => "Swarm Console v0.1.0 - Omni-Transform Protocol",
        View::Architect => "Swarm Console v0.1.0 - Hive Mind Architect",
        View::Pathfinder => "Swarm Console v0.1.0 - Pathfinder Operations",
        View::Directive => "Swarm Console v0.1.0 - Directive Console",
    };

    let mut spans = vec![
        Span::styled(
            title,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("      "),
        Span::styled(
            format!(
                "ARCH {:.2} [{}]",
                app.architecture_score,
                app.migration_phase.label()
            ),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("      "),
        Span::styled("[Q]", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("uit"),
    ];

    if let Some(window) = app.export.cooldown() {
        let remaining = window.remaining(chrono::Utc::now());
        spans.push(Span::raw("      "));
        spans.push(Span::styled(
            format!(
                "EXPORT COOLDOWN {:02}:{:02}",
                remaining.num_minutes(),
                remaining.num_seconds() % 60
            ),
            Style::default().fg(Color::Yellow),
        ));
    }

    let header =
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

pub fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let footer_text = match app.view {
        View::Dashboard => Line::from(vec![
            Span::styled("[D]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Deploy  "),
            Span::styled("[E]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Evolve  "),
            Span::styled("[A]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Architect  "),
            Span::styled("[P]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Pathfinder  "),
            Span::styled("[C]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Console  "),
            Span::styled("[Q]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Quit"),
        ]),
        View::Deploy => Line::from(vec![
            Span::styled("[←→]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Module  "),
            Span::styled("[Tab]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Target  "),
            Span::styled("[Enter]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Generate  "),
            Span::styled("[L]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Launch  "),
            Span::styled("[R]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Restart  "),
            Span::styled("[S]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Save Zip  "),
            Span::styled("[Esc]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Close"),
        ]),
        View::Evolution => Line::from(vec![
            Span::styled("[Enter]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Engage / Apply  "),
            Span::styled("[Esc]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Close"),
        ]),
        View::Architect => Line::from(vec![
            Span::raw("TYPE to chat  "),
            Span::styled("[Enter]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Send  "),
            Span::styled("[F2]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Confirm Blueprint  "),
            Span::styled("[F5]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Reset  "),
            Span::styled("[Esc]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Back"),
        ]),
        View::Pathfinder => Line::from(vec![
            Span::raw("TYPE credential  "),
            Span::styled("[F2]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Scan  "),
            Span::styled("[F3]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Export  "),
            Span::styled("[F4]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Uplink  "),
            Span::styled("[Esc]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Back"),
        ]),
        View::Directive => Line::from(vec![
            Span::raw("TYPE directive  "),
            Span::styled("[Enter]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Dispatch  "),
            Span::styled("[F2]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Save Payload  "),
            Span::styled("[Esc]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Back"),
        ]),
    };

    let footer = Paragraph::new(footer_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}

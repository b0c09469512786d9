//! Deployment and evolution modals, pathfinder panel and directive
//! console rendering.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

use swarm_console_sdk::WorkflowStage;

use crate::app::App;

use super::components::centered_rect;

pub fn render_deploy_modal(f: &mut Frame, area: Rect, app: &App) {
    let Some(flow) = &app.deploy else {
        return;
    };

    let modal = centered_rect(80, 80, area);
    f.render_widget(Clear, modal);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Deploy Capability Module ")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(modal);
    f.render_widget(block, modal);

    match flow.driver().stage() {
        WorkflowStage::Configuring => {
            let lines = vec![
                Line::from(vec![
                    Span::raw("Module:  "),
                    Span::styled(
                        flow.module().label,
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("  ({})", flow.module().id), Style::default().fg(Color::DarkGray)),
                ]),
                Line::from(Span::styled(
                    format!("         {}", flow.module().description),
                    Style::default().fg(Color::Gray),
                )),
                Line::default(),
                Line::from(vec![
                    Span::raw("Target:  "),
                    Span::styled(
                        flow.target().label,
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("         {}", flow.target().description),
                    Style::default().fg(Color::Gray),
                )),
                Line::default(),
                Line::from(Span::raw("Press [Enter] to generate deployment artifacts.")),
            ];
            f.render_widget(Paragraph::new(lines), inner);
        }
        WorkflowStage::Processing => {
            let phase = flow.phase(&app.catalog);
            let lines = vec![
                Line::from(Span::styled(
                    "GENERATING ARTIFACTS",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::default(),
                Line::from(vec![
                    Span::raw("Phase: "),
                    Span::styled(phase, Style::default().fg(Color::Cyan)),
                ]),
            ];
            f.render_widget(Paragraph::new(lines), inner);
        }
        WorkflowStage::Result => render_deploy_result(f, inner, app),
        WorkflowStage::FollowOn => {
            let mut lines: Vec<Line> = flow
                .launch_lines()
                .iter()
                .map(|line| Line::from(Span::styled(*line, Style::default().fg(Color::Green))))
                .collect();
            if flow.launch_complete() {
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    "Press [R] to deploy another module.",
                    Style::default().fg(Color::Gray),
                )));
            }
            f.render_widget(Paragraph::new(lines), inner);
        }
        WorkflowStage::Failed => {
            let message = flow
                .driver()
                .error()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "generation failed".to_string());
            let lines = vec![
                Line::from(Span::styled(
                    "DEPLOYMENT FAILED",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::default(),
                Line::from(Span::raw(message)),
                Line::default(),
                Line::from(Span::raw("Press [R] to reconfigure.")),
            ];
            f.render_widget(Paragraph::new(lines), inner);
        }
        WorkflowStage::Cooldown => {
            // Deployments never cool down; nothing to draw.
        }
    }
}

fn render_deploy_result(f: &mut Frame, area: Rect, app: &App) {
    let Some(flow) = &app.deploy else {
        return;
    };
    let artifacts = flow.artifacts();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(5)])
        .split(area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(rows[0]);

    let items: Vec<ListItem> = artifacts
        .iter()
        .enumerate()
        .map(|(i, artifact)| {
            let style = if i == flow.selected_artifact {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Span::styled(artifact.filename.clone(), style))
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Files ({}) ", artifacts.len())),
    );
    f.render_widget(list, cols[0]);

    let body = artifacts
        .get(flow.selected_artifact)
        .map(|a| a.body.as_str())
        .unwrap_or("");
    let preview = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Preview "));
    f.render_widget(preview, cols[1]);

    let notes: Vec<Line> = app
        .catalog
        .suggestions(flow.module().id)
        .into_iter()
        .map(|note| Line::from(Span::styled(format!("* {note}"), Style::default().fg(Color::Gray))))
        .collect();
    let notes_panel =
        Paragraph::new(notes).block(Block::default().borders(Borders::ALL).title(" Notes "));
    f.render_widget(notes_panel, rows[1]);
}

pub fn render_evolution_modal(f: &mut Frame, area: Rect, app: &App) {
    let Some(flow) = &app.evolution else {
        return;
    };

    let modal = centered_rect(70, 70, area);
    f.render_widget(Clear, modal);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Omni-Transform Protocol ")
        .border_style(Style::default().fg(Color::Magenta));
    let inner = block.inner(modal);
    f.render_widget(block, modal);

    match flow.driver().stage() {
        WorkflowStage::Configuring => {
            let lines = vec![
                Line::from(Span::styled(
                    "READY TO ENGAGE TRANSFORMATION...",
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::default(),
                Line::from(Span::raw(format!(
                    "Current architecture score: {:.2} [{}]",
                    app.architecture_score,
                    app.migration_phase.label()
                ))),
                Line::from(Span::raw(
                    "Target: decompose legacy-monolith into swarm services.",
                )),
                Line::default(),
                Line::from(Span::raw("Press [Enter] to engage.")),
            ];
            f.render_widget(Paragraph::new(lines), inner);
        }
        WorkflowStage::Processing | WorkflowStage::Result => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(3)])
                .split(inner);

            let mut lines: Vec<Line> = flow
                .visible_steps()
                .iter()
                .map(|step| Line::from(Span::styled(*step, Style::default().fg(Color::Green))))
                .collect();
            if let Some(impact) = flow.impact() {
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    format!("TRANSFORMATION COMPLETE. Impact: +{impact:.2}"),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(Span::styled(
                    "Press [Enter] to apply to the fleet.",
                    Style::default().fg(Color::Gray),
                )));
            }
            f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), rows[0]);

            let gauge = Gauge::default()
                .block(Block::default().borders(Borders::ALL).title(" Progress "))
                .gauge_style(Style::default().fg(Color::Magenta))
                .percent(flow.progress_percent());
            f.render_widget(gauge, rows[1]);
        }
        WorkflowStage::Failed => {
            let lines = vec![
                Line::from(Span::styled(
                    "TRANSFORMATION ABORTED",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::default(),
                Line::from(Span::raw("Press [Esc] to close.")),
            ];
            f.render_widget(Paragraph::new(lines), inner);
        }
        WorkflowStage::FollowOn | WorkflowStage::Cooldown => {
            // The transformation flow has no follow-on or cooldown stage.
        }
    }
}

pub fn render_pathfinder(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let credential = Paragraph::new(Line::from(vec![
        Span::styled("API KEY > ", Style::default().fg(Color::Cyan)),
        Span::raw(app.pathfinder.credential.as_str()),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Credential "));
    f.render_widget(credential, chunks[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(chunks[1]);

    render_scan_pane(f, panes[0], app);
    render_export_pane(f, panes[1], app);
    render_uplink_pane(f, panes[2], app);
}

fn operation_status(stage: WorkflowStage) -> Span<'static> {
    match stage {
        WorkflowStage::Configuring => Span::styled("READY", Style::default().fg(Color::Gray)),
        WorkflowStage::Processing => Span::styled("RUNNING", Style::default().fg(Color::Yellow)),
        WorkflowStage::Result => Span::styled("COMPLETE", Style::default().fg(Color::Green)),
        WorkflowStage::Failed => Span::styled("FAILED", Style::default().fg(Color::Red)),
        _ => Span::raw(""),
    }
}

fn render_scan_pane(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![Line::from(operation_status(app.pathfinder.scan().stage()))];
    if let Some(result) = app.pathfinder.scan().outcome() {
        lines.push(Line::from(Span::raw(format!("ID: {}", result.scan_id))));
        for finding in &result.findings {
            lines.push(Line::from(Span::styled(
                format!("{} [{:?}] {}", finding.id, finding.severity, finding.description),
                Style::default().fg(Color::Red),
            )));
        }
    } else if let Some(err) = app.pathfinder.scan().error() {
        lines.push(Line::from(Span::styled(
            err.to_string(),
            Style::default().fg(Color::Red),
        )));
    }
    let pane = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Vulnerability Scan [F2] "));
    f.render_widget(pane, area);
}

fn render_export_pane(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![Line::from(operation_status(app.pathfinder.export().stage()))];
    if let Some(result) = app.pathfinder.export().outcome() {
        lines.push(Line::from(Span::raw(format!("ID: {}", result.export_id))));
        lines.push(Line::from(Span::raw(format!("Version: {}", result.metadata.version))));
        lines.push(Line::from(Span::styled(
            result.download_url.clone(),
            Style::default().fg(Color::Cyan),
        )));
    } else if let Some(err) = app.pathfinder.export().error() {
        lines.push(Line::from(Span::styled(
            err.to_string(),
            Style::default().fg(Color::Red),
        )));
    }
    let pane = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Custom Export [F3] "));
    f.render_widget(pane, area);
}

fn render_uplink_pane(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![Line::from(operation_status(app.pathfinder.uplink().stage()))];
    if let Some(status) = app.pathfinder.uplink().outcome() {
        lines.push(Line::from(Span::raw(format!("Node: {}", status.node_id))));
        lines.push(Line::from(Span::raw(format!(
            "Integrity {} | latency {}",
            status.integrity, status.latency
        ))));
        lines.push(Line::from(Span::raw(format!("Expires: {}", status.expiry))));
        lines.push(Line::from(Span::styled(
            status.message.clone(),
            Style::default().fg(Color::Green),
        )));
    } else if let Some(err) = app.pathfinder.uplink().error() {
        lines.push(Line::from(Span::styled(
            err.to_string(),
            Style::default().fg(Color::Red),
        )));
    }
    let pane = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Sovereign Uplink [F4] "));
    f.render_widget(pane, area);
}

pub fn render_directive_console(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let mut lines: Vec<Line> = Vec::new();
    if app.directive.stage() == WorkflowStage::Processing {
        lines.push(Line::from(Span::styled(
            "Dispatching directive...",
            Style::default().fg(Color::Yellow),
        )));
    }
    if let Some(outcome) = &app.last_directive {
        lines.push(Line::from(vec![
            Span::styled(
                outcome.response_code.clone(),
                Style::default().fg(Color::Green),
            ),
            Span::raw(" "),
            Span::styled(
                outcome.execution_hash.clone(),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        if let Some(call) = &outcome.tool_call {
            lines.push(Line::from(Span::raw(format!("TOOL: {}", call.name))));
        }
        for step in &outcome.execution_stream {
            lines.push(Line::from(Span::styled(
                format!("  > {step}"),
                Style::default().fg(Color::Gray),
            )));
        }
        if let Some(report) = &outcome.final_output {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                report.summary.clone(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
            for detail in report.details.lines() {
                lines.push(Line::from(Span::raw(detail.to_string())));
            }
            lines.push(Line::from(Span::raw(format!("Impact: {}", report.impact))));
        }
        if let Some(download) = &outcome.download {
            lines.push(Line::from(Span::styled(
                format!("DOWNLOAD READY: {} (press [F2] to save)", download.filename),
                Style::default().fg(Color::Cyan),
            )));
        }
    }

    let output = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Directive Output "));
    f.render_widget(output, chunks[0]);

    let input = Paragraph::new(Line::from(vec![
        Span::styled("$ ", Style::default().fg(Color::Cyan)),
        Span::raw(app.directive_input.as_str()),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Directive "));
    f.render_widget(input, chunks[1]);
}

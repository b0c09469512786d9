//! UI rendering for the swarm console TUI.
//!
//! Pure presentation: every function reads [`App`] state and draws, nothing
//! here mutates the app or talks to the gateway.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, View};

mod chat_view;
mod components;
mod dashboard;
mod header_footer;
mod modal_views;

pub use components::centered_rect;

use chat_view::render_architect;
use dashboard::{render_event_feed, render_log_panel, render_roster};
use header_footer::{render_footer, render_header};
use modal_views::{
    render_deploy_modal, render_directive_console, render_evolution_modal, render_pathfinder,
};

pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, chunks[0], app);

    match app.view {
        View::Dashboard | View::Deploy | View::Evolution => {
            // Dashboard stays visible underneath the modal overlays.
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(34), Constraint::Percentage(66)])
                .split(chunks[1]);

            render_roster(f, cols[0], app);

            let right = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(cols[1]);
            render_event_feed(f, right[0], app);
            render_log_panel(f, right[1], app);
        }
        View::Architect => render_architect(f, chunks[1], app),
        View::Pathfinder => render_pathfinder(f, chunks[1], app),
        View::Directive => render_directive_console(f, chunks[1], app),
    }

    render_footer(f, chunks[2], app);

    // Modal overlays
    if app.view == View::Deploy {
        render_deploy_modal(f, f.area(), app);
    }
    if app.view == View::Evolution {
        render_evolution_modal(f, f.area(), app);
    }
}

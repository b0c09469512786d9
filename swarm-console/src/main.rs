use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use uuid::Uuid;

use swarm_console::app::{App, View};
use swarm_console::architect::{GeminiClient, GenerativeClient};
use swarm_console::bundle;
use swarm_console::cooldown::CooldownStore;
use swarm_console::database::Database;
use swarm_console::gateway::SimulatedGateway;
use swarm_console::ui;

use swarm_console_sdk::{ExportOptions, ScanOptions, ServiceGateway};

/// Autonomous swarm operations console.
#[derive(Parser, Debug)]
#[command(name = "swarm-console", version)]
struct Cli {
    /// Database path override (defaults to the platform data directory).
    #[arg(long)]
    db: Option<PathBuf>,

    /// Disable run-history persistence.
    #[arg(long)]
    no_db: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate deployment artifacts for a module and write them to a zip.
    Generate {
        /// Module id, e.g. HFT_ARBITRAGE_CORE.
        module: String,
        /// Target id, e.g. LOCAL_HOST.
        #[arg(default_value = "LOCAL_HOST")]
        target: String,
        /// Output path; defaults to a timestamped name in the cwd.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run a vulnerability scan against the simulated export service.
    Scan {
        /// Credential; must start with sk_live_.
        #[arg(long, env = "SWARM_API_KEY")]
        key: String,
        #[arg(long, default_value = "edge-gateway")]
        target: String,
    },
    /// Run a custom export against the simulated export service.
    Export {
        #[arg(long, env = "SWARM_API_KEY")]
        key: String,
        #[arg(long, default_value = "docker")]
        runtime: String,
        #[arg(long, value_delimiter = ',')]
        features: Vec<String>,
    },
    /// Verify a sovereign node uplink.
    Uplink {
        endpoint: String,
        key: String,
    },
    /// Show recent run history from the local database.
    History {
        #[arg(long, default_value_t = 20)]
        limit: usize,
        /// Filter by module id and include per-module statistics.
        #[arg(long)]
        module: Option<String>,
        /// Show one run with its persisted log lines.
        #[arg(long)]
        run: Option<Uuid>,
    },
}

fn default_db_path() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "swarm-console", "swarm-console") {
        proj_dirs.data_dir().join("runs.db")
    } else {
        PathBuf::from(".swarm-console-runs.db")
    }
}

fn build_gateway() -> Result<Arc<SimulatedGateway>> {
    // Without a key the architect falls back to its canned reply; every
    // other operation is simulated locally.
    let client = GeminiClient::from_env()
        .ok()
        .map(|c| Arc::new(c) as Arc<dyn GenerativeClient>);
    Ok(Arc::new(SimulatedGateway::new(client)?))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let gateway = build_gateway()?;

    match cli.command {
        Some(Command::Generate { module, target, output }) => {
            let artifacts = gateway.generate_artifacts(&module, &target).await?;
            let path = output.unwrap_or_else(|| PathBuf::from(bundle::bundle_filename(&module)));
            bundle::write_zip(&path, &artifacts)?;
            println!("Wrote {} artifacts to {}", artifacts.len(), path.display());
            Ok(())
        }
        Some(Command::Scan { key, target }) => {
            let result = gateway
                .run_scan(
                    &key,
                    ScanOptions {
                        target_name: target,
                        payload: "deep".to_string(),
                        asset_type: "CONTAINER".to_string(),
                    },
                )
                .await?;
            println!("Scan {} @ {}", result.scan_id, result.timestamp);
            for finding in &result.findings {
                println!("  {} [{:?}] {}", finding.id, finding.severity, finding.description);
            }
            Ok(())
        }
        Some(Command::Export { key, runtime, features }) => {
            let result = gateway
                .run_export(
                    &key,
                    ExportOptions {
                        target_runtime: runtime,
                        required_features: features,
                        base_version: "4.2.0".to_string(),
                    },
                )
                .await?;
            println!("Export {} ({})", result.export_id, result.metadata.version);
            println!("  {}", result.download_url);
            println!("{}", serde_json::to_string_pretty(&result.integration_manifest)?);
            Ok(())
        }
        Some(Command::Uplink { endpoint, key }) => {
            let status = gateway.verify_uplink(&endpoint, &key).await?;
            println!("{:?} node={} expiry={}", status.state, status.node_id, status.expiry);
            println!("{}", status.message);
            Ok(())
        }
        Some(Command::History { limit, module, run }) => {
            let db = Database::new(cli.db.unwrap_or_else(default_db_path))?;
            db.initialize_schema()?;
            if let Some(run_id) = run {
                match db.get_run(&run_id)? {
                    Some(run) => {
                        println!(
                            "{}  {:?}  {} -> {}  [{:?}]",
                            run.started_at.format("%Y-%m-%d %H:%M:%S"),
                            run.kind,
                            run.module_id,
                            run.target_id,
                            run.stage
                        );
                        for entry in db.get_logs(&run_id, None)? {
                            println!(
                                "  {}  [{}] {}",
                                entry.timestamp.format("%H:%M:%S"),
                                entry.source,
                                entry.message
                            );
                        }
                    }
                    None => println!("No run with id {run_id}"),
                }
                return Ok(());
            }
            let runs = db.list_runs(limit, 0, module.as_deref())?;
            for run in &runs {
                println!(
                    "{}  {:?}  {} -> {}  [{:?}]",
                    run.started_at.format("%Y-%m-%d %H:%M:%S"),
                    run.kind,
                    run.module_id,
                    run.target_id,
                    run.stage
                );
            }
            if let Some(module) = module {
                let stats = db.get_module_stats(&module)?;
                println!(
                    "{}: {} runs, {} completed, {} failed",
                    module, stats.total, stats.completed, stats.failed
                );
            }
            Ok(())
        }
        None => {
            let database = if cli.no_db {
                None
            } else {
                let db = Database::new(cli.db.unwrap_or_else(default_db_path))?;
                db.initialize_schema()?;
                // 90-day run retention.
                db.delete_runs_before(chrono::Utc::now() - chrono::Duration::days(90))?;
                Some(db)
            };
            let store = CooldownStore::open(CooldownStore::default_path())?;
            let app = App::new(gateway, store, database)?;
            run_tui(app).await
        }
    }
}

async fn run_tui(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.tick();
        terminal.draw(|f| ui::ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key.code);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, code: KeyCode) {
    match app.view {
        View::Dashboard => match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
            KeyCode::Char('d') | KeyCode::Char('D') => app.open_deploy(),
            KeyCode::Char('e') | KeyCode::Char('E') => app.open_evolution(),
            KeyCode::Char('a') | KeyCode::Char('A') => app.view = View::Architect,
            KeyCode::Char('p') | KeyCode::Char('P') => app.view = View::Pathfinder,
            KeyCode::Char('c') | KeyCode::Char('C') => app.view = View::Directive,
            _ => {}
        },
        View::Deploy => handle_deploy_key(app, code),
        View::Evolution => handle_evolution_key(app, code),
        View::Architect => handle_architect_key(app, code),
        View::Pathfinder => handle_pathfinder_key(app, code),
        View::Directive => match code {
            KeyCode::Esc => app.view = View::Dashboard,
            KeyCode::Enter => app.dispatch_directive(),
            KeyCode::F(2) => app.save_directive_download(),
            KeyCode::Backspace => {
                app.directive_input.pop();
            }
            KeyCode::Char(c) => app.directive_input.push(c),
            _ => {}
        },
    }
}

fn handle_deploy_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.close_deploy(),
        KeyCode::Enter => app.start_deployment(),
        KeyCode::Char('s') | KeyCode::Char('S') => app.save_deploy_bundle(),
        _ => {
            let Some(flow) = &mut app.deploy else {
                return;
            };
            match code {
                KeyCode::Right => flow.next_module(),
                KeyCode::Left => flow.prev_module(),
                KeyCode::Tab => flow.next_target(),
                KeyCode::BackTab => flow.prev_target(),
                KeyCode::Down => {
                    let count = flow.artifacts().len();
                    if count > 0 {
                        flow.selected_artifact = (flow.selected_artifact + 1) % count;
                    }
                }
                KeyCode::Up => {
                    let count = flow.artifacts().len();
                    if count > 0 {
                        flow.selected_artifact = (flow.selected_artifact + count - 1) % count;
                    }
                }
                KeyCode::Char('l') | KeyCode::Char('L') => {
                    flow.begin_launch();
                }
                KeyCode::Char('r') | KeyCode::Char('R') => flow.restart(),
                _ => {}
            }
        }
    }
}

fn handle_evolution_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.close_evolution(),
        KeyCode::Enter => {
            let stage = app.evolution.as_ref().map(|f| f.driver().stage());
            match stage {
                Some(swarm_console_sdk::WorkflowStage::Configuring) => app.engage_evolution(),
                Some(swarm_console_sdk::WorkflowStage::Result) => app.apply_evolution(),
                _ => {}
            }
        }
        _ => {}
    }
}

fn handle_architect_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.view = View::Dashboard,
        KeyCode::Enter => {
            let message = std::mem::take(&mut app.export.chat.input_buffer);
            app.send_architect_message(message);
        }
        KeyCode::F(2) => {
            if let Err(rejected) = app.export.confirm_blueprint() {
                app.log(
                    "EXPORT",
                    rejected.to_string(),
                    swarm_console_sdk::Severity::Warning,
                );
            }
        }
        KeyCode::F(5) => app.export.reset_chat(),
        KeyCode::Backspace => {
            app.export.chat.input_buffer.pop();
        }
        KeyCode::Char(c) => app.export.chat.input_buffer.push(c),
        _ => {}
    }
}

fn handle_pathfinder_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.view = View::Dashboard,
        KeyCode::F(2) => app.start_scan(ScanOptions {
            target_name: "edge-gateway".to_string(),
            payload: "deep".to_string(),
            asset_type: "CONTAINER".to_string(),
        }),
        KeyCode::F(3) => app.start_export(ExportOptions {
            target_runtime: "docker".to_string(),
            required_features: vec!["self_healing".to_string()],
            base_version: "4.2.0".to_string(),
        }),
        KeyCode::F(4) => app.start_uplink(
            "https://hive-mind-exports.io/node/alpha".to_string(),
            app.pathfinder.credential.clone(),
        ),
        KeyCode::Backspace => {
            app.pathfinder.credential.pop();
        }
        KeyCode::Char(c) => app.pathfinder.credential.push(c),
        _ => {}
    }
}

//! Application state for the console TUI.
//!
//! Owns the service roster, the event and log feeds, the modal workflow
//! flows and the run-history database. All mutation happens on the UI
//! thread; background gateway calls settle through the flow drivers.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use uuid::Uuid;

use swarm_console_sdk::{
    DirectiveOutcome, GeneratedArtifact, LogEntry, ScanOptions, ServiceGateway, ServiceRecord,
    ServiceStatus, Severity, SystemEvent, WorkflowStage, push_capped,
};

use crate::bundle;
use crate::catalog::Catalog;
use crate::cooldown::CooldownStore;
use crate::data::{self, MigrationPhase};
use crate::database::{Database, PersistedRun, RunKind};
use crate::flows::{DeploymentFlow, EvolutionFlow, ExportFlow, PathfinderFlow, TRANSFORM_IMPACT};
use crate::session::{PollOutcome, WorkflowDriver, WorkflowSession};

/// Console log retention cap.
pub const LOG_CAP: usize = 200;
/// Event feed retention cap.
pub const EVENT_CAP: usize = 100;

/// Persisted architect turns replayed into the chat at startup.
const TRANSCRIPT_RESTORE_LIMIT: usize = 50;

const SCAN_SLOT: usize = 0;
const PATH_EXPORT_SLOT: usize = 1;
const UPLINK_SLOT: usize = 2;
const PATHFINDER_LABELS: [&str; 3] = ["SCAN", "PATH_EXPORT", "UPLINK"];

/// Which screen has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Deploy,
    Evolution,
    Architect,
    Pathfinder,
    Directive,
}

pub struct App {
    pub view: View,
    pub should_quit: bool,

    pub services: Vec<ServiceRecord>,
    pub events: Vec<SystemEvent>,
    pub logs: Vec<LogEntry>,
    pub architecture_score: f64,
    pub migration_phase: MigrationPhase,

    pub catalog: Catalog,
    gateway: Arc<dyn ServiceGateway>,
    database: Option<Database>,

    pub deploy: Option<DeploymentFlow>,
    deploy_run: Option<Uuid>,
    deploy_log: Vec<LogEntry>,
    pub evolution: Option<EvolutionFlow>,
    evolution_run: Option<Uuid>,
    pub export: ExportFlow,
    pub pathfinder: PathfinderFlow,
    pathfinder_runs: [Option<Uuid>; 3],

    pub directive_input: String,
    pub directive: WorkflowDriver<DirectiveOutcome>,
    pub last_directive: Option<DirectiveOutcome>,
}

impl App {
    pub fn new(
        gateway: Arc<dyn ServiceGateway>,
        store: CooldownStore,
        database: Option<Database>,
    ) -> Result<Self> {
        let mut app = Self {
            view: View::Dashboard,
            should_quit: false,
            services: data::SERVICES.to_vec(),
            events: data::initial_events(),
            logs: data::initial_logs(),
            architecture_score: data::INITIAL_ARCHITECTURE_SCORE,
            migration_phase: data::INITIAL_MIGRATION_PHASE,
            catalog: Catalog::new()?,
            export: ExportFlow::new(gateway.clone(), store),
            pathfinder: PathfinderFlow::new(gateway.clone()),
            gateway,
            database,
            deploy: None,
            deploy_run: None,
            deploy_log: Vec::new(),
            evolution: None,
            evolution_run: None,
            pathfinder_runs: [None; 3],
            directive_input: String::new(),
            directive: WorkflowDriver::new(WorkflowSession::new()),
            last_directive: None,
        };
        if let Some(db) = &app.database {
            if let Ok(turns) = db.get_transcript(TRANSCRIPT_RESTORE_LIMIT) {
                app.export.chat.restore(turns);
            }
        }
        Ok(app)
    }

    pub fn log(&mut self, source: &str, message: impl Into<String>, severity: Severity) {
        push_capped(&mut self.logs, LogEntry::new(source, message, severity), LOG_CAP);
    }

    pub fn push_event(&mut self, event: SystemEvent) {
        self.events.insert(0, event);
        self.events.truncate(EVENT_CAP);
    }

    /// Open the deployment modal. A fresh flow per open; closing disposes
    /// it, so a settlement from a closed modal can never leak in.
    pub fn open_deploy(&mut self) {
        self.deploy = Some(DeploymentFlow::new(self.gateway.clone()));
        self.deploy_run = None;
        self.deploy_log.clear();
        self.view = View::Deploy;
    }

    pub fn close_deploy(&mut self) {
        if let Some(flow) = &mut self.deploy {
            flow.dispose();
        }
        self.deploy = None;
        self.deploy_run = None;
        self.deploy_log.clear();
        self.view = View::Dashboard;
    }

    pub fn start_deployment(&mut self) {
        let Some(flow) = &mut self.deploy else {
            return;
        };
        let module_id = flow.module().id.to_string();
        let target_id = flow.target().id.to_string();
        match flow.start() {
            Ok(()) => {
                let run_id = Uuid::new_v4();
                self.deploy_run = Some(run_id);
                self.insert_run(run_id, RunKind::Deployment, module_id.clone(), target_id);
                self.deploy_log.clear();
                self.log_deploy(format!("Generation started: {module_id}"), Severity::Info);
            }
            Err(rejected) => {
                self.log("DEPLOY", rejected.to_string(), Severity::Warning);
            }
        }
    }

    /// Write the generated artifact set as a zip next to the process cwd.
    pub fn save_deploy_bundle(&mut self) {
        self.save_deploy_bundle_in(Path::new("."));
    }

    fn save_deploy_bundle_in(&mut self, dir: &Path) {
        let (artifacts, module_id) = match &self.deploy {
            Some(flow) if !flow.artifacts().is_empty() => {
                (flow.artifacts().to_vec(), flow.module().id)
            }
            _ => return,
        };
        let path = dir.join(bundle::bundle_filename(module_id));
        match bundle::write_zip(&path, &artifacts) {
            Ok(()) => self.log(
                "DEPLOY",
                format!("Bundle saved to {}", path.display()),
                Severity::Success,
            ),
            Err(err) => self.log("DEPLOY", err.to_string(), Severity::Error),
        }
    }

    /// Open the evolution modal; same fresh-flow discipline as deploy.
    pub fn open_evolution(&mut self) {
        self.evolution = Some(EvolutionFlow::new());
        self.evolution_run = None;
        self.view = View::Evolution;
    }

    pub fn close_evolution(&mut self) {
        if let Some(flow) = &mut self.evolution {
            flow.dispose();
        }
        self.evolution = None;
        self.evolution_run = None;
        self.view = View::Dashboard;
    }

    pub fn engage_evolution(&mut self) {
        let Some(flow) = &mut self.evolution else {
            return;
        };
        match flow.engage() {
            Ok(()) => {
                let run_id = Uuid::new_v4();
                self.evolution_run = Some(run_id);
                self.insert_run(
                    run_id,
                    RunKind::Migration,
                    "OMNI_TRANSFORM_PROTOCOL".to_string(),
                    "legacy-monolith".to_string(),
                );
                self.log("TRANSFORM", "Transformation protocol engaged.", Severity::Info);
            }
            Err(rejected) => self.log("TRANSFORM", rejected.to_string(), Severity::Warning),
        }
    }

    /// Apply a completed transformation: bump the architecture score
    /// (capped at 1.0), advance the migration phase, warm every service
    /// except the monolith being dismantled, and close the modal.
    pub fn apply_evolution(&mut self) {
        let Some(impact) = self.evolution.as_ref().and_then(|f| f.impact()) else {
            return;
        };
        self.architecture_score = (self.architecture_score + impact).min(1.0);
        self.migration_phase = if self.architecture_score > 0.9 {
            MigrationPhase::Serverless
        } else {
            MigrationPhase::Decoupling
        };
        for svc in &mut self.services {
            if svc.name != "legacy-monolith" {
                svc.status = ServiceStatus::Warm;
            }
        }
        self.log(
            "TRANSFORM",
            format!(
                "Architecture score now {:.2} ({})",
                self.architecture_score,
                self.migration_phase.label()
            ),
            Severity::Success,
        );
        self.close_evolution();
    }

    pub fn start_scan(&mut self, options: ScanOptions) {
        let target = options.target_name.clone();
        match self.pathfinder.start_scan(options) {
            Ok(()) => self.record_pathfinder_run(SCAN_SLOT, RunKind::Scan, target),
            Err(rejected) => self.log("SCAN", rejected.to_string(), Severity::Warning),
        }
    }

    pub fn start_export(&mut self, options: swarm_console_sdk::ExportOptions) {
        let target = options.target_runtime.clone();
        match self.pathfinder.start_export(options) {
            Ok(()) => self.record_pathfinder_run(PATH_EXPORT_SLOT, RunKind::Export, target),
            Err(rejected) => self.log("PATH_EXPORT", rejected.to_string(), Severity::Warning),
        }
    }

    pub fn start_uplink(&mut self, endpoint: String, key: String) {
        let target = endpoint.clone();
        match self.pathfinder.start_uplink(endpoint, key) {
            Ok(()) => self.record_pathfinder_run(UPLINK_SLOT, RunKind::Uplink, target),
            Err(rejected) => self.log("UPLINK", rejected.to_string(), Severity::Warning),
        }
    }

    pub fn dispatch_directive(&mut self) {
        let directive = self.directive_input.trim().to_string();
        if directive.is_empty() {
            return;
        }
        let gateway = self.gateway.clone();
        match self.directive.launch(Utc::now(), async move {
            gateway.dispatch_directive(&directive).await
        }) {
            Ok(()) => self.directive_input.clear(),
            Err(rejected) => self.log("DIRECTIVE", rejected.to_string(), Severity::Warning),
        }
    }

    /// Write the last directive's download payload to the process cwd.
    pub fn save_directive_download(&mut self) {
        self.save_directive_download_in(Path::new("."));
    }

    fn save_directive_download_in(&mut self, dir: &Path) {
        let Some(payload) = self.last_directive.as_ref().and_then(|o| o.download.clone())
        else {
            return;
        };
        let artifact = GeneratedArtifact {
            filename: payload.filename,
            language: payload.mime_type,
            body: payload.content,
        };
        match bundle::write_text(dir, &artifact) {
            Ok(path) => self.log(
                "DIRECTIVE",
                format!("Payload saved to {}", path.display()),
                Severity::Success,
            ),
            Err(err) => self.log("DIRECTIVE", err.to_string(), Severity::Error),
        }
    }

    /// Send an architect message, mirroring the new user turn into the
    /// persisted transcript.
    pub fn send_architect_message(&mut self, message: String) {
        let before = self.export.chat.transcript.len();
        self.export.chat.send_message_async(message);
        self.persist_new_turns(before);
    }

    /// Per-frame tick: settle flow drivers, advance the chat spinner,
    /// release expired cooldowns, mirror outcomes into the log feed.
    pub fn tick(&mut self) {
        self.tick_deploy();
        self.tick_evolution();
        self.tick_export();
        self.tick_pathfinder();
        self.tick_directive();

        self.export.chat.update_spinner();
        let before = self.export.chat.transcript.len();
        self.export.chat.poll_response();
        self.persist_new_turns(before);
    }

    fn persist_new_turns(&self, from: usize) {
        if let Some(db) = &self.database {
            for turn in &self.export.chat.transcript[from..] {
                let _ = db.insert_transcript_turn(turn.role, &turn.text);
            }
        }
    }

    fn insert_run(&self, run_id: Uuid, kind: RunKind, module_id: String, target_id: String) {
        if let Some(db) = &self.database {
            let now = Utc::now();
            let _ = db.insert_run(&PersistedRun {
                id: run_id,
                kind,
                module_id,
                target_id,
                stage: WorkflowStage::Processing,
                started_at: now,
                finished_at: None,
                created_at: now,
                updated_at: now,
            });
        }
    }

    fn log_deploy(&mut self, message: String, severity: Severity) {
        let entry = LogEntry::new("DEPLOY", message, severity);
        self.deploy_log.push(entry.clone());
        push_capped(&mut self.logs, entry, LOG_CAP);
    }

    fn tick_deploy(&mut self) {
        let Some(flow) = &mut self.deploy else {
            return;
        };
        match flow.poll() {
            PollOutcome::Completed => {
                let count = flow.artifacts().len();
                let module = flow.module().id.to_string();
                self.log_deploy(
                    format!("Generated {count} artifacts for {module}"),
                    Severity::Success,
                );
                self.finish_deploy_run(WorkflowStage::Result);
            }
            PollOutcome::Failed => {
                let message = self
                    .deploy
                    .as_ref()
                    .and_then(|f| f.driver().error())
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "generation failed".to_string());
                self.log_deploy(message, Severity::Error);
                self.finish_deploy_run(WorkflowStage::Failed);
            }
            _ => {}
        }
    }

    /// Close out the persisted deployment run, flushing its log lines.
    fn finish_deploy_run(&mut self, stage: WorkflowStage) {
        if let (Some(db), Some(run_id)) = (&self.database, self.deploy_run) {
            let _ = db.update_run(&run_id, stage, Some(Utc::now()));
            let _ = db.batch_insert_logs(&run_id, &self.deploy_log);
        }
        self.deploy_log.clear();
    }

    fn tick_evolution(&mut self) {
        let Some(flow) = &mut self.evolution else {
            return;
        };
        match flow.poll() {
            PollOutcome::Completed => {
                let impact = flow.impact().unwrap_or(TRANSFORM_IMPACT);
                self.finish_evolution_run(WorkflowStage::Result);
                self.log(
                    "TRANSFORM",
                    format!("Transformation complete. Impact +{impact:.2} ready to apply."),
                    Severity::Success,
                );
            }
            PollOutcome::Failed => {
                self.finish_evolution_run(WorkflowStage::Failed);
                self.log("TRANSFORM", "Transformation aborted.", Severity::Error);
            }
            _ => {}
        }
    }

    fn finish_evolution_run(&mut self, stage: WorkflowStage) {
        if let (Some(db), Some(run_id)) = (&self.database, self.evolution_run) {
            let _ = db.update_run(&run_id, stage, Some(Utc::now()));
        }
    }

    fn tick_export(&mut self) {
        match self.export.poll() {
            Ok(PollOutcome::Completed) => {
                let node = self
                    .export
                    .package()
                    .map(|p| p.endpoint.clone())
                    .unwrap_or_default();
                self.log(
                    "EXPORT",
                    format!("Sovereign node online: {node}"),
                    Severity::Success,
                );
            }
            Ok(PollOutcome::Failed) => {
                let message = self
                    .export
                    .driver()
                    .error()
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "export failed".to_string());
                self.log("EXPORT", message, Severity::Error);
            }
            Ok(_) => {}
            Err(err) => self.log("EXPORT", err.to_string(), Severity::Error),
        }

        match self.export.tick_cooldown() {
            Ok(true) => self.log("EXPORT", "Cooldown expired. Export re-armed.", Severity::Info),
            Ok(false) => {}
            Err(err) => self.log("EXPORT", err.to_string(), Severity::Warning),
        }
    }

    fn tick_pathfinder(&mut self) {
        let outcomes = self.pathfinder.poll();
        for (slot, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                PollOutcome::Completed => {
                    self.finish_pathfinder_run(slot, WorkflowStage::Result);
                    self.log(PATHFINDER_LABELS[slot], "Operation completed.", Severity::Success);
                }
                PollOutcome::Failed => {
                    self.finish_pathfinder_run(slot, WorkflowStage::Failed);
                    self.log(PATHFINDER_LABELS[slot], "Operation failed.", Severity::Error);
                }
                _ => {}
            }
        }
    }

    fn record_pathfinder_run(&mut self, slot: usize, kind: RunKind, target_id: String) {
        let run_id = Uuid::new_v4();
        self.pathfinder_runs[slot] = Some(run_id);
        self.insert_run(run_id, kind, "PATHFINDER_EXPORT_SERVICE".to_string(), target_id);
    }

    fn finish_pathfinder_run(&mut self, slot: usize, stage: WorkflowStage) {
        if let Some(run_id) = self.pathfinder_runs[slot].take() {
            if let Some(db) = &self.database {
                let _ = db.update_run(&run_id, stage, Some(Utc::now()));
            }
        }
    }

    fn tick_directive(&mut self) {
        match self.directive.poll() {
            PollOutcome::Completed => {
                if let Some(outcome) = self.directive.outcome().cloned() {
                    self.push_event(SystemEvent {
                        id: format!("evt-{}", Uuid::new_v4().simple()),
                        timestamp: Utc::now(),
                        source: "event-mesh-prime".to_string(),
                        payload: outcome.message.clone(),
                        kind: swarm_console_sdk::EventKind::Response,
                    });
                    self.log(
                        "DIRECTIVE",
                        format!("{} [{}]", outcome.message, outcome.execution_hash),
                        Severity::Success,
                    );
                    self.last_directive = Some(outcome);
                }
                // Directive console is fire-and-forget; re-arm immediately.
                self.directive.restart(Utc::now());
            }
            PollOutcome::Failed => {
                self.log("DIRECTIVE", "Directive dispatch failed.", Severity::Error);
                self.directive.restart(Utc::now());
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::gateway::{Latency, SimulatedGateway};

    fn temp_store() -> CooldownStore {
        let path = std::env::temp_dir().join(format!(
            "swarm-console-app-{}/cooldown.json",
            Uuid::new_v4()
        ));
        CooldownStore::open(path).unwrap()
    }

    fn test_app() -> App {
        let gateway = SimulatedGateway::new(None)
            .unwrap()
            .with_latency(Latency::instant());
        App::new(Arc::new(gateway), temp_store(), None).unwrap()
    }

    fn test_app_with_db() -> App {
        let gateway = SimulatedGateway::new(None)
            .unwrap()
            .with_latency(Latency::instant());
        let db = Database::new_in_memory().unwrap();
        db.initialize_schema().unwrap();
        App::new(Arc::new(gateway), temp_store(), Some(db)).unwrap()
    }

    async fn tick_until(app: &mut App, mut done: impl FnMut(&App) -> bool) {
        for _ in 0..50 {
            tokio::task::yield_now().await;
            app.tick();
            if done(app) {
                return;
            }
        }
        panic!("condition not reached");
    }

    #[tokio::test(start_paused = true)]
    async fn deployment_lifecycle_reaches_result() {
        let mut app = test_app();
        app.open_deploy();
        app.start_deployment();

        tick_until(&mut app, |app| {
            app.deploy.as_ref().unwrap().driver().stage() == WorkflowStage::Result
        })
        .await;
        let flow = app.deploy.as_ref().unwrap();
        assert!(!flow.artifacts().is_empty());
        assert!(app.logs.iter().any(|l| l.source == "DEPLOY"));
    }

    #[tokio::test]
    async fn closing_modal_disposes_flow() {
        let mut app = test_app();
        app.open_deploy();
        app.start_deployment();
        app.close_deploy();
        assert!(app.deploy.is_none());
        assert_eq!(app.view, View::Dashboard);
    }

    #[test]
    fn event_feed_is_capped_and_newest_first() {
        let mut app = test_app();
        for i in 0..(EVENT_CAP + 10) {
            app.push_event(SystemEvent {
                id: format!("evt-{i}"),
                timestamp: Utc::now(),
                source: "test".to_string(),
                payload: format!("event {i}"),
                kind: swarm_console_sdk::EventKind::Trigger,
            });
        }
        assert_eq!(app.events.len(), EVENT_CAP);
        assert_eq!(app.events[0].payload, format!("event {}", EVENT_CAP + 9));
    }

    #[tokio::test(start_paused = true)]
    async fn deployment_persists_run_and_logs() {
        let mut app = test_app_with_db();
        app.open_deploy();
        app.start_deployment();

        tick_until(&mut app, |app| {
            app.deploy.as_ref().unwrap().driver().stage() == WorkflowStage::Result
        })
        .await;

        let db = app.database.as_ref().unwrap();
        let runs = db.list_runs(10, 0, None).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].kind, RunKind::Deployment);
        assert_eq!(runs[0].stage, WorkflowStage::Result);
        assert!(runs[0].finished_at.is_some());

        let logs = db.get_logs(&runs[0].id, None).unwrap();
        assert_eq!(logs.len(), 2);
        assert!(logs[0].message.starts_with("Generation started"));
        assert!(logs[1].message.starts_with("Generated"));
    }

    #[tokio::test(start_paused = true)]
    async fn pathfinder_scan_run_is_persisted() {
        let mut app = test_app_with_db();
        app.pathfinder.credential = "sk_live_abc".to_string();
        app.start_scan(ScanOptions {
            target_name: "edge-gateway".to_string(),
            payload: "deep".to_string(),
            asset_type: "CONTAINER".to_string(),
        });

        tick_until(&mut app, |app| {
            app.pathfinder.scan().stage() == WorkflowStage::Result
        })
        .await;

        let db = app.database.as_ref().unwrap();
        let runs = db.list_runs(10, 0, None).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].kind, RunKind::Scan);
        assert_eq!(runs[0].target_id, "edge-gateway");
        assert_eq!(runs[0].stage, WorkflowStage::Result);
    }

    #[tokio::test(start_paused = true)]
    async fn architect_turns_persist_and_restore() {
        let mut app = test_app_with_db();
        let baseline = app.export.chat.transcript.len();
        app.send_architect_message("Design an export".to_string());

        tick_until(&mut app, |app| {
            app.export.chat.transcript.len() == baseline + 2
        })
        .await;

        let db = app.database.as_ref().unwrap();
        let turns = db.get_transcript(10).unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].1, "Design an export");

        // A fresh app over a seeded database replays the transcript.
        let seeded = Database::new_in_memory().unwrap();
        seeded.initialize_schema().unwrap();
        seeded
            .insert_transcript_turn(swarm_console_sdk::Role::User, "hello")
            .unwrap();
        seeded
            .insert_transcript_turn(swarm_console_sdk::Role::Assistant, "AUTHENTICATED.")
            .unwrap();
        let gateway = SimulatedGateway::new(None)
            .unwrap()
            .with_latency(Latency::instant());
        let restored = App::new(Arc::new(gateway), temp_store(), Some(seeded)).unwrap();
        assert_eq!(restored.export.chat.transcript.len(), 3);
        assert_eq!(restored.export.chat.transcript[1].text, "hello");
    }

    #[tokio::test(start_paused = true)]
    async fn applied_evolution_updates_architecture_state() {
        let mut app = test_app_with_db();
        app.open_evolution();
        app.evolution = Some(EvolutionFlow::new().with_step_ms(0));
        app.engage_evolution();

        tick_until(&mut app, |app| {
            app.evolution.as_ref().unwrap().driver().stage() == WorkflowStage::Result
        })
        .await;

        app.apply_evolution();
        assert!((app.architecture_score - 0.87).abs() < 1e-9);
        assert_eq!(app.migration_phase, MigrationPhase::Decoupling);
        assert!(app
            .services
            .iter()
            .filter(|s| s.name != "legacy-monolith")
            .all(|s| s.status == ServiceStatus::Warm));
        assert_eq!(app.view, View::Dashboard);
        assert!(app.evolution.is_none());

        let db = app.database.as_ref().unwrap();
        let runs = db.list_runs(10, 0, None).unwrap();
        assert_eq!(runs[0].kind, RunKind::Migration);
        assert_eq!(runs[0].stage, WorkflowStage::Result);
    }

    #[tokio::test(start_paused = true)]
    async fn saving_deploy_bundle_writes_zip() {
        let dir = std::env::temp_dir().join(format!("swarm-console-save-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut app = test_app();
        app.open_deploy();
        app.start_deployment();
        tick_until(&mut app, |app| {
            app.deploy.as_ref().unwrap().driver().stage() == WorkflowStage::Result
        })
        .await;

        app.save_deploy_bundle_in(&dir);
        let saved: Vec<_> = std::fs::read_dir(&dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "zip"))
            .collect();
        assert_eq!(saved.len(), 1);
        assert!(app
            .logs
            .iter()
            .any(|l| l.message.starts_with("Bundle saved")));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn directive_download_payload_is_written() {
        let dir = std::env::temp_dir().join(format!("swarm-console-payload-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut app = test_app();
        app.directive_input =
            "Scale the fleet across cloud providers and replicate".to_string();
        app.dispatch_directive();
        tick_until(&mut app, |app| app.last_directive.is_some()).await;

        app.save_directive_download_in(&dir);
        assert!(dir.join("FLEET_EXPANSION_MANIFEST_V1.json").exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}

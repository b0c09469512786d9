//! Sovereign export flow.
//!
//! The architect conversation produces a confirmed blueprint; confirming
//! it forges a sovereign node package (endpoint plus keyed credential) and
//! verifies the uplink handshake. A successful export arms a persisted
//! one-hour cooldown, so the flow cannot be re-run until the window
//! expires, restarts and process exits included.

use std::sync::Arc;

use anyhow::Result;
use chrono::{Duration, Utc};

use swarm_console_sdk::{Blueprint, CooldownWindow, ServiceGateway, UplinkStatus};

use crate::architect::ArchitectChat;
use crate::cooldown::CooldownStore;
use crate::gateway::rand_base36;
use crate::session::{PollOutcome, StartRejected, WorkflowDriver, WorkflowSession};

/// Window armed after every successful export.
pub fn export_cooldown() -> Duration {
    Duration::hours(1)
}

/// Fabricated sovereign node deliverable.
#[derive(Debug, Clone)]
pub struct SovereignPackage {
    pub export_id: String,
    pub endpoint: String,
    pub sovereign_key: String,
    pub blueprint: Blueprint,
    pub status: UplinkStatus,
    pub manifest_json: String,
}

pub struct ExportFlow {
    gateway: Arc<dyn ServiceGateway>,
    pub chat: ArchitectChat,
    driver: WorkflowDriver<SovereignPackage>,
    store: CooldownStore,
}

impl ExportFlow {
    /// Restores any persisted cooldown window: a flow constructed while a
    /// window is active starts in the cooldown stage.
    pub fn new(gateway: Arc<dyn ServiceGateway>, store: CooldownStore) -> Self {
        let session = WorkflowSession::with_cooldown(store.window(), Utc::now());
        Self {
            chat: ArchitectChat::new(gateway.clone()),
            gateway,
            driver: WorkflowDriver::new(session),
            store,
        }
    }

    pub fn driver(&self) -> &WorkflowDriver<SovereignPackage> {
        &self.driver
    }

    pub fn cooldown(&self) -> Option<CooldownWindow> {
        self.driver.session().cooldown()
    }

    /// Forge the sovereign package from the architect's confirmed blueprint
    /// and verify its uplink. Fails fast when no blueprint is ready or the
    /// session refuses to start.
    pub fn confirm_blueprint(&mut self) -> Result<(), StartRejected> {
        let Some(blueprint) = self.chat.take_blueprint() else {
            // No confirmed blueprint yet; treat as a premature start.
            return Err(StartRejected::Busy);
        };

        let export_id = format!("exp_sov_{}", rand_base36(9));
        let endpoint = format!("https://hive-mind-exports.io/node/{}", rand_base36(8));
        let sovereign_key = format!(
            "sk_sovereign_{}_{}",
            rand_base36(12),
            blueprint.hosting_duration.code()
        );

        let gateway = self.gateway.clone();
        let launched = self.driver.launch(Utc::now(), {
            let endpoint = endpoint.clone();
            let sovereign_key = sovereign_key.clone();
            async move {
                let status = gateway.verify_uplink(&endpoint, &sovereign_key).await?;
                let manifest = serde_json::json!({
                    "export_id": export_id,
                    "endpoint": endpoint,
                    "sovereign_key": sovereign_key,
                    "blueprint": &blueprint,
                    "hosting_expiry": (Utc::now() + blueprint.hosting_duration.duration())
                        .to_rfc3339(),
                });
                Ok(SovereignPackage {
                    export_id,
                    endpoint,
                    sovereign_key,
                    manifest_json: serde_json::to_string_pretty(&manifest)
                        .unwrap_or_else(|_| manifest.to_string()),
                    blueprint,
                    status,
                })
            }
        });

        launched
    }

    /// Tick the flow. Arms the persisted cooldown on the first poll that
    /// observes a completed export.
    pub fn poll(&mut self) -> Result<PollOutcome> {
        let outcome = self.driver.poll();
        if outcome == PollOutcome::Completed {
            let window = CooldownWindow::starting_now(export_cooldown());
            self.store.arm(window)?;
            self.driver.session_mut().enter_cooldown(window);
        }
        Ok(outcome)
    }

    pub fn package(&self) -> Option<&SovereignPackage> {
        self.driver.outcome()
    }

    /// Release an expired cooldown window, both in the session and on disk.
    pub fn tick_cooldown(&mut self) -> Result<bool> {
        let released = self.driver.session_mut().tick(Utc::now());
        if released {
            self.store.clear()?;
        }
        Ok(released)
    }

    pub fn reset_chat(&mut self) {
        self.chat.reset();
    }

    pub fn dispose(&mut self) {
        self.driver.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use swarm_console_sdk::{HostingDuration, WorkflowStage};

    use crate::gateway::{Latency, SimulatedGateway};

    fn temp_store() -> CooldownStore {
        let path = std::env::temp_dir().join(format!(
            "swarm-console-test-{}/cooldown.json",
            uuid::Uuid::new_v4()
        ));
        CooldownStore::open(path).unwrap()
    }

    fn store_path(store: &CooldownStore) -> PathBuf {
        store.path().to_path_buf()
    }

    fn blueprint() -> Blueprint {
        Blueprint {
            target: "Docker Cluster".to_string(),
            strategy: "Convergent".to_string(),
            modules: vec!["HFT".to_string()],
            hosting_duration: HostingDuration::SevenDays,
            self_healing: true,
            notes: String::new(),
        }
    }

    fn flow_with_store(store: CooldownStore) -> ExportFlow {
        let gateway = SimulatedGateway::new(None)
            .unwrap()
            .with_latency(Latency::instant());
        ExportFlow::new(Arc::new(gateway), store)
    }

    async fn drive_to_completion(flow: &mut ExportFlow) -> PollOutcome {
        loop {
            tokio::task::yield_now().await;
            let outcome = flow.poll().unwrap();
            if outcome != PollOutcome::Pending {
                return outcome;
            }
        }
    }

    #[tokio::test]
    async fn completed_export_arms_persisted_cooldown() {
        let store = temp_store();
        let path = store_path(&store);
        let mut flow = flow_with_store(store);

        flow.chat.inject_blueprint(blueprint());
        flow.confirm_blueprint().unwrap();

        let outcome = drive_to_completion(&mut flow).await;
        assert_eq!(outcome, PollOutcome::Completed);
        assert_eq!(flow.driver().stage(), WorkflowStage::Cooldown);

        let package = flow.package().unwrap();
        assert!(package.sovereign_key.starts_with("sk_sovereign_"));
        assert!(package.sovereign_key.ends_with("_7d"));
        assert_eq!(package.status.expiry, "6 Days 23 Hours");

        // A second flow on the same path restores the window.
        let reopened = CooldownStore::open(path.clone()).unwrap();
        assert!(reopened.window().is_some());
        let restored = flow_with_store(reopened);
        assert_eq!(restored.driver().stage(), WorkflowStage::Cooldown);

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[tokio::test]
    async fn confirm_without_blueprint_is_refused() {
        let store = temp_store();
        let mut flow = flow_with_store(store);
        assert!(flow.confirm_blueprint().is_err());
        assert_eq!(flow.driver().stage(), WorkflowStage::Configuring);
    }

    #[tokio::test]
    async fn start_during_active_cooldown_is_rejected() {
        let store = temp_store();
        let path = store_path(&store);
        let mut flow = flow_with_store(store);

        flow.chat.inject_blueprint(blueprint());
        flow.confirm_blueprint().unwrap();
        drive_to_completion(&mut flow).await;

        flow.chat.inject_blueprint(blueprint());
        assert!(matches!(
            flow.confirm_blueprint(),
            Err(StartRejected::CoolingDown(_))
        ));

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }
}

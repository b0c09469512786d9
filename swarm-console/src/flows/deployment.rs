//! Module deployment flow.
//!
//! Configure a capability module and a hosting target, run one artifact
//! generation call, inspect the produced files, then optionally play the
//! launch-log follow-on. Artifact selection depends on the module alone;
//! the target only flavors descriptive text.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use swarm_console_sdk::{GeneratedArtifact, ServiceGateway};

use crate::catalog::{Catalog, ModuleSpec, TargetSpec, MODULES, TARGETS};
use crate::session::{phase_label, PollOutcome, StartRejected, WorkflowDriver, WorkflowSession};

/// Cadence of the presentation-only phase labels during processing.
pub const PHASE_STEP_MS: u128 = 800;

/// Launch-log lines played back during the follow-on stage, one per tick.
pub const LAUNCH_SEQUENCE: &[&str] = &[
    "[SWARM] Initializing deployment sequence...",
    "[SWARM] Allocating compute nodes...",
    "[SWARM] Injecting artifacts into runtime...",
    "[SWARM] Verifying process heartbeat...",
    "[SWARM] Deployment live. Autonomous mode engaged.",
];

const LAUNCH_STEP_MS: u128 = 600;

pub struct DeploymentFlow {
    gateway: Arc<dyn ServiceGateway>,
    driver: WorkflowDriver<Vec<GeneratedArtifact>>,
    pub module_idx: usize,
    pub target_idx: usize,
    pub selected_artifact: usize,
    launch_started: Option<Instant>,
}

impl DeploymentFlow {
    pub fn new(gateway: Arc<dyn ServiceGateway>) -> Self {
        Self {
            gateway,
            driver: WorkflowDriver::new(WorkflowSession::new()),
            module_idx: 0,
            target_idx: 0,
            selected_artifact: 0,
            launch_started: None,
        }
    }

    pub fn module(&self) -> &'static ModuleSpec {
        &MODULES[self.module_idx]
    }

    pub fn target(&self) -> &'static TargetSpec {
        &TARGETS[self.target_idx]
    }

    pub fn next_module(&mut self) {
        self.module_idx = (self.module_idx + 1) % MODULES.len();
    }

    pub fn prev_module(&mut self) {
        self.module_idx = (self.module_idx + MODULES.len() - 1) % MODULES.len();
    }

    pub fn next_target(&mut self) {
        self.target_idx = (self.target_idx + 1) % TARGETS.len();
    }

    pub fn prev_target(&mut self) {
        self.target_idx = (self.target_idx + TARGETS.len() - 1) % TARGETS.len();
    }

    pub fn driver(&self) -> &WorkflowDriver<Vec<GeneratedArtifact>> {
        &self.driver
    }

    /// Kick off artifact generation for the selected module and target.
    pub fn start(&mut self) -> Result<(), StartRejected> {
        let gateway = self.gateway.clone();
        let module_id = self.module().id.to_string();
        let target_id = self.target().id.to_string();
        self.selected_artifact = 0;
        self.driver.launch(Utc::now(), async move {
            gateway.generate_artifacts(&module_id, &target_id).await
        })
    }

    pub fn poll(&mut self) -> PollOutcome {
        self.driver.poll()
    }

    pub fn artifacts(&self) -> &[GeneratedArtifact] {
        self.driver.outcome().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Current processing phase label, or empty when idle.
    pub fn phase(&self, catalog: &Catalog) -> &'static str {
        match self.driver.processing_elapsed_ms() {
            Some(elapsed) => phase_label(catalog.phase_labels(self.module().id), elapsed, PHASE_STEP_MS),
            None => "",
        }
    }

    /// Enter the launch-log follow-on from the result stage.
    pub fn begin_launch(&mut self) -> bool {
        if self.driver.session_mut().follow_on() {
            self.launch_started = Some(Instant::now());
            true
        } else {
            false
        }
    }

    /// Launch-log lines revealed so far, one more every tick.
    pub fn launch_lines(&self) -> &'static [&'static str] {
        match self.launch_started {
            Some(started) => {
                let shown = (started.elapsed().as_millis() / LAUNCH_STEP_MS) as usize + 1;
                &LAUNCH_SEQUENCE[..shown.min(LAUNCH_SEQUENCE.len())]
            }
            None => &[],
        }
    }

    pub fn launch_complete(&self) -> bool {
        self.launch_lines().len() == LAUNCH_SEQUENCE.len()
    }

    pub fn restart(&mut self) {
        self.driver.restart(Utc::now());
        self.launch_started = None;
        self.selected_artifact = 0;
    }

    pub fn dispose(&mut self) {
        self.driver.dispose();
        self.launch_started = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swarm_console_sdk::WorkflowStage;

    use crate::gateway::{Latency, SimulatedGateway};

    fn flow() -> DeploymentFlow {
        let gateway = SimulatedGateway::new(None)
            .unwrap()
            .with_latency(Latency::instant());
        DeploymentFlow::new(Arc::new(gateway))
    }

    #[tokio::test]
    async fn generation_settles_into_result() {
        let mut flow = flow();
        flow.start().unwrap();
        assert_eq!(flow.driver().stage(), WorkflowStage::Processing);
        assert!(flow.start().is_err());

        tokio::task::yield_now().await;
        let mut outcome = flow.poll();
        while outcome == PollOutcome::Pending {
            tokio::task::yield_now().await;
            outcome = flow.poll();
        }
        assert_eq!(outcome, PollOutcome::Completed);
        assert_eq!(flow.driver().stage(), WorkflowStage::Result);
        assert!(!flow.artifacts().is_empty());
    }

    #[tokio::test]
    async fn dispose_discards_late_settlement() {
        let mut flow = flow();
        flow.start().unwrap();
        flow.dispose();

        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        let outcome = flow.poll();
        assert_ne!(outcome, PollOutcome::Completed);
        assert!(flow.artifacts().is_empty());
    }

    #[test]
    fn module_selection_wraps() {
        let mut flow = flow();
        for _ in 0..MODULES.len() {
            flow.next_module();
        }
        assert_eq!(flow.module_idx, 0);
        flow.prev_module();
        assert_eq!(flow.module_idx, MODULES.len() - 1);
    }
}

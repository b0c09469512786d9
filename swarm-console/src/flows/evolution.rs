//! Evolution/migration simulation flow.
//!
//! Plays back a fixed monolith-to-microservices transformation log on a
//! fixed cadence through the workflow state machine. The transformation is
//! entirely scripted; completion yields an architecture-score impact that
//! the operator applies from the result stage.

use std::time::Duration;

use chrono::Utc;

use crate::session::{PollOutcome, StartRejected, WorkflowDriver, WorkflowSession};

/// Transformation log, revealed one line per step.
pub const TRANSFORM_SEQUENCE: &[&str] = &[
    "[TRANSFORM] Analyzing Monolith Codebase...",
    "[TRANSFORM] Identifying Bounded Contexts...",
    "[TRANSFORM] Extracting 'Auth' Module to Container...",
    "[TRANSFORM] Migrating 'Inventory' to Lambda Functions...",
    "[TRANSFORM] Deploying EventMesh (Kafka/EventBridge)...",
    "[TRANSFORM] Decoupling Database Schema...",
    "[TRANSFORM] Purging Legacy Dependencies...",
    "[TRANSFORM] Verifying Microservice Latency...",
];

/// Architecture-score gain granted by a completed transformation.
pub const TRANSFORM_IMPACT: f64 = 0.15;

const STEP_MS: u64 = 800;

pub struct EvolutionFlow {
    driver: WorkflowDriver<f64>,
    step_ms: u64,
}

impl EvolutionFlow {
    pub fn new() -> Self {
        Self {
            driver: WorkflowDriver::new(WorkflowSession::new()),
            step_ms: STEP_MS,
        }
    }

    /// Override the playback cadence; zero completes on the next poll.
    pub fn with_step_ms(mut self, step_ms: u64) -> Self {
        self.step_ms = step_ms;
        self
    }

    pub fn driver(&self) -> &WorkflowDriver<f64> {
        &self.driver
    }

    /// Start the transformation playback.
    pub fn engage(&mut self) -> Result<(), StartRejected> {
        let total = Duration::from_millis(self.step_ms * TRANSFORM_SEQUENCE.len() as u64);
        self.driver.launch(Utc::now(), async move {
            tokio::time::sleep(total).await;
            Ok(TRANSFORM_IMPACT)
        })
    }

    pub fn poll(&mut self) -> PollOutcome {
        self.driver.poll()
    }

    /// Log lines revealed so far; the full sequence once settled.
    pub fn visible_steps(&self) -> &'static [&'static str] {
        match self.driver.processing_elapsed_ms() {
            Some(elapsed) => {
                let shown = (elapsed / u128::from(self.step_ms.max(1))) as usize + 1;
                &TRANSFORM_SEQUENCE[..shown.min(TRANSFORM_SEQUENCE.len())]
            }
            None => {
                if self.driver.outcome().is_some() {
                    TRANSFORM_SEQUENCE
                } else {
                    &[]
                }
            }
        }
    }

    /// Playback progress in percent, for the progress bar.
    pub fn progress_percent(&self) -> u16 {
        ((self.visible_steps().len() * 100) / TRANSFORM_SEQUENCE.len()) as u16
    }

    /// Score impact of a completed transformation.
    pub fn impact(&self) -> Option<f64> {
        self.driver.outcome().copied()
    }

    pub fn dispose(&mut self) {
        self.driver.dispose();
    }
}

impl Default for EvolutionFlow {
    fn default() -> Self {
        Self::new()
    }
}

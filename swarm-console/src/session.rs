//! Workflow session state machine and its async driver.
//!
//! Every modal flow in the console (deployment bundling, export chat,
//! pathfinder operations) is one [`WorkflowSession`]: configure, run one
//! gateway call, show the result, optionally run a follow-on action. The
//! session itself is synchronous and single-threaded; [`WorkflowDriver`]
//! supplies the background-task plumbing.

use std::future::Future;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use swarm_console_sdk::{CooldownWindow, GatewayError, WorkflowStage};

/// Proof that a `start()` was accepted, tagged with the session epoch at
/// launch time. A settlement is only applied if its ticket epoch still
/// matches; restart and dispose bump the epoch, so a late-arriving result
/// from a superseded run is discarded instead of mutating current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartTicket {
    epoch: u64,
}

/// Why a `start()` call was refused. Refusals never change session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StartRejected {
    #[error("a request is already in flight")]
    Busy,
    #[error("cooldown active until {0}")]
    CoolingDown(DateTime<Utc>),
    #[error("workflow instance is disposed")]
    Disposed,
}

/// Outcome of delivering a settlement to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    Applied,
    /// Stale ticket or disposed session; the result must be dropped.
    Discarded,
}

#[derive(Debug)]
pub struct WorkflowSession {
    stage: WorkflowStage,
    epoch: u64,
    disposed: bool,
    cooldown: Option<CooldownWindow>,
}

impl WorkflowSession {
    pub fn new() -> Self {
        Self {
            stage: WorkflowStage::Configuring,
            epoch: 0,
            disposed: false,
            cooldown: None,
        }
    }

    /// Create a session honoring a cooldown window restored from the
    /// persisted store. An already-expired window is ignored.
    pub fn with_cooldown(window: Option<CooldownWindow>, now: DateTime<Utc>) -> Self {
        let mut session = Self::new();
        if let Some(win) = window {
            if win.is_active(now) {
                session.cooldown = Some(win);
                session.stage = WorkflowStage::Cooldown;
            }
        }
        session
    }

    pub fn stage(&self) -> WorkflowStage {
        self.stage
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn cooldown(&self) -> Option<CooldownWindow> {
        self.cooldown
    }

    /// Begin processing. Rejected while a request is in flight, while a
    /// cooldown window is active, or after disposal; a start from a
    /// finished stage implicitly restarts first.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<StartTicket, StartRejected> {
        if self.disposed {
            return Err(StartRejected::Disposed);
        }
        if self.stage == WorkflowStage::Processing {
            return Err(StartRejected::Busy);
        }
        self.tick(now);
        if let Some(win) = self.cooldown {
            if win.is_active(now) {
                return Err(StartRejected::CoolingDown(win.expires_at));
            }
        }
        if self.stage != WorkflowStage::Configuring {
            // Result / FollowOn / Failed: a fresh start supersedes the
            // previous run.
            self.epoch += 1;
        }
        self.stage = WorkflowStage::Processing;
        Ok(StartTicket { epoch: self.epoch })
    }

    /// Successful gateway settlement: `Processing` → `Result`.
    pub fn settle_ok(&mut self, ticket: StartTicket) -> Settle {
        if !self.accepts(ticket) {
            return Settle::Discarded;
        }
        self.stage = WorkflowStage::Result;
        Settle::Applied
    }

    /// Failed gateway settlement: `Processing` → `Failed`.
    pub fn settle_err(&mut self, ticket: StartTicket) -> Settle {
        if !self.accepts(ticket) {
            return Settle::Discarded;
        }
        self.stage = WorkflowStage::Failed;
        Settle::Applied
    }

    fn accepts(&self, ticket: StartTicket) -> bool {
        !self.disposed && ticket.epoch == self.epoch && self.stage == WorkflowStage::Processing
    }

    /// Secondary action after a result (download playback, launch logs).
    /// Only valid from `Result`; `FollowOn` is terminal except `restart`.
    pub fn follow_on(&mut self) -> bool {
        if self.disposed || self.stage != WorkflowStage::Result {
            return false;
        }
        self.stage = WorkflowStage::FollowOn;
        true
    }

    /// Arm a persisted cooldown window after a successful result.
    pub fn enter_cooldown(&mut self, window: CooldownWindow) -> bool {
        if self.disposed || self.stage != WorkflowStage::Result {
            return false;
        }
        self.cooldown = Some(window);
        self.stage = WorkflowStage::Cooldown;
        true
    }

    /// Clock advance: releases an expired cooldown. Returns true if the
    /// stage changed.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        if self.disposed {
            return false;
        }
        if let Some(win) = self.cooldown {
            if !win.is_active(now) {
                self.cooldown = None;
                if self.stage == WorkflowStage::Cooldown {
                    self.stage = WorkflowStage::Configuring;
                    return true;
                }
            }
        }
        false
    }

    /// Return to `Configuring`, superseding any in-flight request. An
    /// active cooldown survives a restart: the session lands back in
    /// `Cooldown` instead.
    pub fn restart(&mut self, now: DateTime<Utc>) {
        if self.disposed {
            return;
        }
        self.epoch += 1;
        self.stage = match self.cooldown {
            Some(win) if win.is_active(now) => WorkflowStage::Cooldown,
            _ => {
                self.cooldown = None;
                WorkflowStage::Configuring
            }
        };
    }

    /// Mark the instance dead (modal closed). Any in-flight settlement is
    /// discarded from here on.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.epoch += 1;
    }
}

impl Default for WorkflowSession {
    fn default() -> Self {
        Self::new()
    }
}

struct Settlement<T> {
    ticket: StartTicket,
    result: Result<T, GatewayError>,
}

/// What `poll` observed this round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Idle,
    Pending,
    Completed,
    Failed,
    Discarded,
}

/// Async glue between a [`WorkflowSession`] and one gateway call.
///
/// The gateway future runs on a background tokio task; its settlement is
/// handed back through an unbounded channel and applied on the caller's
/// thread via [`poll`](WorkflowDriver::poll). State is never mutated from
/// the background task.
pub struct WorkflowDriver<T> {
    session: WorkflowSession,
    rx: Option<mpsc::UnboundedReceiver<Settlement<T>>>,
    outcome: Option<T>,
    error: Option<GatewayError>,
    started_at: Option<Instant>,
}

impl<T: Send + 'static> WorkflowDriver<T> {
    pub fn new(session: WorkflowSession) -> Self {
        Self {
            session,
            rx: None,
            outcome: None,
            error: None,
            started_at: None,
        }
    }

    pub fn session(&self) -> &WorkflowSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut WorkflowSession {
        &mut self.session
    }

    pub fn stage(&self) -> WorkflowStage {
        self.session.stage()
    }

    pub fn outcome(&self) -> Option<&T> {
        self.outcome.as_ref()
    }

    pub fn error(&self) -> Option<&GatewayError> {
        self.error.as_ref()
    }

    /// Milliseconds since the in-flight request started, for the phase
    /// label playback. None while idle.
    pub fn processing_elapsed_ms(&self) -> Option<u128> {
        self.started_at.map(|t| t.elapsed().as_millis())
    }

    /// Start the session and spawn `fut` on the runtime. One invocation
    /// may be in flight at a time; re-entrant launches are rejected by the
    /// session guard before anything is spawned.
    pub fn launch<F>(&mut self, now: DateTime<Utc>, fut: F) -> Result<(), StartRejected>
    where
        F: Future<Output = Result<T, GatewayError>> + Send + 'static,
    {
        let ticket = self.session.start(now)?;
        self.outcome = None;
        self.error = None;
        self.started_at = Some(Instant::now());

        let (tx, rx) = mpsc::unbounded_channel();
        self.rx = Some(rx);
        tokio::spawn(async move {
            let result = fut.await;
            let _ = tx.send(Settlement { ticket, result });
        });
        Ok(())
    }

    /// Non-blocking check for a settlement. Stale settlements (the session
    /// was restarted or disposed after launch) are dropped without
    /// touching the stored outcome.
    pub fn poll(&mut self) -> PollOutcome {
        let Some(rx) = &mut self.rx else {
            return PollOutcome::Idle;
        };
        match rx.try_recv() {
            Ok(settlement) => {
                self.rx = None;
                self.started_at = None;
                match settlement.result {
                    Ok(value) => match self.session.settle_ok(settlement.ticket) {
                        Settle::Applied => {
                            self.outcome = Some(value);
                            PollOutcome::Completed
                        }
                        Settle::Discarded => PollOutcome::Discarded,
                    },
                    Err(err) => match self.session.settle_err(settlement.ticket) {
                        Settle::Applied => {
                            self.error = Some(err);
                            PollOutcome::Failed
                        }
                        Settle::Discarded => PollOutcome::Discarded,
                    },
                }
            }
            Err(mpsc::error::TryRecvError::Empty) => PollOutcome::Pending,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                // Background task died without settling; treat as failure.
                self.rx = None;
                self.started_at = None;
                if self.session.stage() == WorkflowStage::Processing {
                    self.error = Some(GatewayError::ExternalService(
                        "background task dropped before settling".to_string(),
                    ));
                    // Settle through the normal guard with the current epoch.
                    let current = StartTicket { epoch: self.session.epoch };
                    let _ = self.session.settle_err(current);
                    return PollOutcome::Failed;
                }
                PollOutcome::Discarded
            }
        }
    }

    pub fn restart(&mut self, now: DateTime<Utc>) {
        self.session.restart(now);
        self.rx = None;
        self.outcome = None;
        self.error = None;
        self.started_at = None;
    }

    pub fn dispose(&mut self) {
        self.session.dispose();
        self.rx = None;
        self.started_at = None;
    }
}

/// Pick the current presentation-only phase label for an in-flight run.
/// Labels are a fixed ordered list played back on a fixed cadence; they
/// carry no state of their own.
pub fn phase_label(labels: &[&'static str], elapsed_ms: u128, step_ms: u128) -> &'static str {
    if labels.is_empty() {
        return "";
    }
    let idx = (elapsed_ms / step_ms.max(1)) as usize;
    labels[idx.min(labels.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_from_configuring_then_busy() {
        let now = Utc::now();
        let mut session = WorkflowSession::new();
        let ticket = session.start(now).unwrap();
        assert_eq!(session.stage(), WorkflowStage::Processing);
        assert_eq!(session.start(now), Err(StartRejected::Busy));
        assert_eq!(session.settle_ok(ticket), Settle::Applied);
        assert_eq!(session.stage(), WorkflowStage::Result);
    }

    #[test]
    fn stale_ticket_after_restart_is_discarded() {
        let now = Utc::now();
        let mut session = WorkflowSession::new();
        let ticket = session.start(now).unwrap();
        session.restart(now);
        assert_eq!(session.settle_ok(ticket), Settle::Discarded);
        assert_eq!(session.stage(), WorkflowStage::Configuring);
    }

    #[test]
    fn settlement_after_dispose_is_discarded() {
        let now = Utc::now();
        let mut session = WorkflowSession::new();
        let ticket = session.start(now).unwrap();
        session.dispose();
        assert_eq!(session.settle_err(ticket), Settle::Discarded);
    }

    #[test]
    fn phase_label_playback_clamps() {
        let labels = ["ANALYZING_TARGET_ENV", "BUNDLING_ARTIFACTS"];
        assert_eq!(phase_label(&labels, 0, 800), "ANALYZING_TARGET_ENV");
        assert_eq!(phase_label(&labels, 801, 800), "BUNDLING_ARTIFACTS");
        assert_eq!(phase_label(&labels, 10_000, 800), "BUNDLING_ARTIFACTS");
    }
}

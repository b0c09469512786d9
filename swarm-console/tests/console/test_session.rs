//! Workflow session guards driven through the async driver.

use std::sync::Arc;

use chrono::{Duration, Utc};

use swarm_console::flows::DeploymentFlow;
use swarm_console::session::{
    PollOutcome, StartRejected, WorkflowDriver, WorkflowSession,
};
use swarm_console_sdk::{CooldownWindow, GatewayError, WorkflowStage};

use super::common::instant_gateway;

#[tokio::test]
async fn start_is_rejected_while_processing() {
    let mut flow = DeploymentFlow::new(Arc::new(instant_gateway()));
    flow.start().unwrap();
    assert_eq!(flow.start(), Err(StartRejected::Busy));
}

#[test]
fn start_is_rejected_during_active_cooldown() {
    let now = Utc::now();
    let window = CooldownWindow {
        expires_at: now + Duration::minutes(30),
    };
    let mut session = WorkflowSession::with_cooldown(Some(window), now);
    assert_eq!(session.stage(), WorkflowStage::Cooldown);
    assert_eq!(
        session.start(now),
        Err(StartRejected::CoolingDown(window.expires_at))
    );

    // Once the window lapses, start succeeds again.
    let later = window.expires_at + Duration::seconds(1);
    assert!(session.start(later).is_ok());
}

#[test]
fn expired_window_is_ignored_at_construction() {
    let now = Utc::now();
    let stale = CooldownWindow {
        expires_at: now - Duration::hours(2),
    };
    let session = WorkflowSession::with_cooldown(Some(stale), now);
    assert_eq!(session.stage(), WorkflowStage::Configuring);
    assert!(session.cooldown().is_none());
}

#[tokio::test]
async fn late_settlement_after_dispose_is_discarded() {
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let mut driver: WorkflowDriver<u32> = WorkflowDriver::new(WorkflowSession::new());
    driver
        .launch(Utc::now(), async move {
            // Held open until the test releases it, after dispose.
            let _ = rx.await;
            Ok(7)
        })
        .unwrap();

    driver.dispose();
    let _ = tx.send(());
    tokio::task::yield_now().await;

    assert_ne!(driver.poll(), PollOutcome::Completed);
    assert!(driver.outcome().is_none());
    assert!(driver.session().is_disposed());
}

#[tokio::test]
async fn restart_supersedes_in_flight_request() {
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let mut driver: WorkflowDriver<u32> = WorkflowDriver::new(WorkflowSession::new());
    driver
        .launch(Utc::now(), async move {
            let _ = rx.await;
            Ok(7)
        })
        .unwrap();

    driver.restart(Utc::now());
    assert_eq!(driver.stage(), WorkflowStage::Configuring);

    let _ = tx.send(());
    tokio::task::yield_now().await;

    // The superseded result never lands.
    assert!(driver.outcome().is_none());
    assert_eq!(driver.stage(), WorkflowStage::Configuring);
}

#[tokio::test]
async fn failed_settlement_lands_in_failed_stage() {
    let mut driver: WorkflowDriver<u32> = WorkflowDriver::new(WorkflowSession::new());
    driver
        .launch(Utc::now(), async move {
            Err(GatewayError::InvalidCredential("bad key".to_string()))
        })
        .unwrap();

    let outcome = loop {
        tokio::task::yield_now().await;
        let outcome = driver.poll();
        if outcome != PollOutcome::Pending {
            break outcome;
        }
    };
    assert_eq!(outcome, PollOutcome::Failed);
    assert_eq!(driver.stage(), WorkflowStage::Failed);
    assert!(driver.error().is_some());

    // Failed is recoverable: a fresh start supersedes the dead run.
    assert!(driver.session_mut().start(Utc::now()).is_ok());
}

//! Pathfinder operations flow.
//!
//! Credentialed operations against the simulated export service: the
//! vulnerability scan and the custom export require an `sk_live_` key, the
//! uplink handshake a sovereign endpoint and key. Each operation runs in
//! its own session so one failure never blocks the others.

use std::sync::Arc;

use chrono::Utc;

use swarm_console_sdk::{
    ExportOptions, ExportResult, ScanOptions, ScanResult, ServiceGateway, UplinkStatus,
};

use crate::session::{PollOutcome, StartRejected, WorkflowDriver, WorkflowSession};

pub struct PathfinderFlow {
    gateway: Arc<dyn ServiceGateway>,
    pub credential: String,
    scan: WorkflowDriver<ScanResult>,
    export: WorkflowDriver<ExportResult>,
    uplink: WorkflowDriver<UplinkStatus>,
}

impl PathfinderFlow {
    pub fn new(gateway: Arc<dyn ServiceGateway>) -> Self {
        Self {
            gateway,
            credential: String::new(),
            scan: WorkflowDriver::new(WorkflowSession::new()),
            export: WorkflowDriver::new(WorkflowSession::new()),
            uplink: WorkflowDriver::new(WorkflowSession::new()),
        }
    }

    pub fn scan(&self) -> &WorkflowDriver<ScanResult> {
        &self.scan
    }

    pub fn export(&self) -> &WorkflowDriver<ExportResult> {
        &self.export
    }

    pub fn uplink(&self) -> &WorkflowDriver<UplinkStatus> {
        &self.uplink
    }

    pub fn start_scan(&mut self, options: ScanOptions) -> Result<(), StartRejected> {
        let gateway = self.gateway.clone();
        let credential = self.credential.clone();
        self.scan.launch(Utc::now(), async move {
            gateway.run_scan(&credential, options).await
        })
    }

    pub fn start_export(&mut self, options: ExportOptions) -> Result<(), StartRejected> {
        let gateway = self.gateway.clone();
        let credential = self.credential.clone();
        self.export.launch(Utc::now(), async move {
            gateway.run_export(&credential, options).await
        })
    }

    pub fn start_uplink(&mut self, endpoint: String, key: String) -> Result<(), StartRejected> {
        let gateway = self.gateway.clone();
        self.uplink.launch(Utc::now(), async move {
            gateway.verify_uplink(&endpoint, &key).await
        })
    }

    /// Tick all three operations; returns the scan, export, uplink
    /// outcomes in that order.
    pub fn poll(&mut self) -> [PollOutcome; 3] {
        [self.scan.poll(), self.export.poll(), self.uplink.poll()]
    }

    pub fn dispose(&mut self) {
        self.scan.dispose();
        self.export.dispose();
        self.uplink.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swarm_console_sdk::{GatewayError, WorkflowStage};

    use crate::gateway::{Latency, SimulatedGateway};

    fn flow() -> PathfinderFlow {
        let gateway = SimulatedGateway::new(None)
            .unwrap()
            .with_latency(Latency::instant());
        PathfinderFlow::new(Arc::new(gateway))
    }

    fn scan_options() -> ScanOptions {
        ScanOptions {
            target_name: "edge-gateway".to_string(),
            payload: "deep".to_string(),
            asset_type: "CONTAINER".to_string(),
        }
    }

    async fn settle(driver_poll: &mut dyn FnMut() -> PollOutcome) -> PollOutcome {
        loop {
            tokio::task::yield_now().await;
            let outcome = driver_poll();
            if outcome != PollOutcome::Pending {
                return outcome;
            }
        }
    }

    #[tokio::test]
    async fn scan_rejects_bad_credential() {
        let mut flow = flow();
        flow.credential = "pk_test_123".to_string();
        flow.start_scan(scan_options()).unwrap();

        let outcome = settle(&mut || flow.scan.poll()).await;
        assert_eq!(outcome, PollOutcome::Failed);
        assert_eq!(flow.scan().stage(), WorkflowStage::Failed);
        assert!(matches!(
            flow.scan().error(),
            Some(GatewayError::InvalidCredential(_))
        ));
    }

    #[tokio::test]
    async fn scan_succeeds_with_live_key() {
        let mut flow = flow();
        flow.credential = "sk_live_abc123".to_string();
        flow.start_scan(scan_options()).unwrap();

        let outcome = settle(&mut || flow.scan.poll()).await;
        assert_eq!(outcome, PollOutcome::Completed);
        assert_eq!(flow.scan().outcome().unwrap().findings.len(), 3);
    }

    #[tokio::test]
    async fn uplink_rejects_unknown_host() {
        let mut flow = flow();
        flow.start_uplink(
            "https://evil.example.com/node/x".to_string(),
            "sk_sovereign_abc_7d".to_string(),
        )
        .unwrap();

        let outcome = settle(&mut || flow.uplink.poll()).await;
        assert_eq!(outcome, PollOutcome::Failed);
        assert!(matches!(
            flow.uplink().error(),
            Some(GatewayError::UnreachableEndpoint(_))
        ));
    }

    #[tokio::test]
    async fn operations_are_independent() {
        let mut flow = flow();
        flow.credential = "sk_live_ok".to_string();
        flow.start_uplink(
            "https://hive-mind-exports.io/node/a".to_string(),
            "bad-key".to_string(),
        )
        .unwrap();
        flow.start_scan(scan_options()).unwrap();

        assert_eq!(settle(&mut || flow.uplink.poll()).await, PollOutcome::Failed);
        assert_eq!(settle(&mut || flow.scan.poll()).await, PollOutcome::Completed);
    }
}

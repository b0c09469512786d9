//! Simulated service gateway.
//!
//! Implements [`ServiceGateway`] without any real backend: artifact
//! generation is a catalog lookup, scans and exports return fabricated
//! data after a delay, and only the credential-format checks can fail.
//! The architect conversation is the one genuinely external call; its
//! transport failures are absorbed into a fixed fallback reply.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;

use swarm_console_sdk::{
    ArchitectReply, ConversationTurn, ExportMetadata, ExportOptions, ExportResult, Finding,
    FindingSeverity, GatewayError, GeneratedArtifact, IntegrationManifest, ScanOptions,
    ScanResult, ServiceGateway, UplinkState, UplinkStatus,
};

use crate::architect::{extract_blueprint, GenerativeClient, FALLBACK_REPLY, SYSTEM_INSTRUCTION};
use crate::catalog::{Catalog, CatalogError};
use crate::directives;

/// Required prefix for scan/export credentials.
pub const LIVE_KEY_PREFIX: &str = "sk_live_";
/// Required prefix for sovereign uplink keys.
pub const SOVEREIGN_KEY_PREFIX: &str = "sk_sovereign_";

const UPLINK_HOSTS: &[&str] = &["hive-mind-exports.io", "localhost"];

/// Simulated network latency per operation.
#[derive(Debug, Clone, Copy)]
pub struct Latency {
    pub generate: Duration,
    pub scan: Duration,
    pub export: Duration,
    pub uplink: Duration,
    pub directive: Duration,
}

impl Latency {
    /// Production feel: delays comparable to a slow backend.
    pub fn simulated() -> Self {
        Self {
            generate: Duration::from_millis(800),
            scan: Duration::from_millis(1500),
            export: Duration::from_millis(2000),
            uplink: Duration::from_millis(1500),
            directive: Duration::from_millis(800),
        }
    }

    /// Zero delays for tests.
    pub fn instant() -> Self {
        Self {
            generate: Duration::ZERO,
            scan: Duration::ZERO,
            export: Duration::ZERO,
            uplink: Duration::ZERO,
            directive: Duration::ZERO,
        }
    }
}

pub struct SimulatedGateway {
    catalog: Catalog,
    client: Option<Arc<dyn GenerativeClient>>,
    latency: Latency,
}

impl SimulatedGateway {
    pub fn new(client: Option<Arc<dyn GenerativeClient>>) -> Result<Self, CatalogError> {
        Ok(Self {
            catalog: Catalog::new()?,
            client,
            latency: Latency::simulated(),
        })
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn check_live_key(credential: &str) -> Result<(), GatewayError> {
        if credential.starts_with(LIVE_KEY_PREFIX) {
            Ok(())
        } else {
            Err(GatewayError::InvalidCredential(format!(
                "API key must start with '{}'",
                LIVE_KEY_PREFIX
            )))
        }
    }
}

#[async_trait]
impl ServiceGateway for SimulatedGateway {
    async fn generate_artifacts(
        &self,
        module_id: &str,
        target_id: &str,
    ) -> Result<Vec<GeneratedArtifact>, GatewayError> {
        tokio::time::sleep(self.latency.generate).await;
        Ok(self.catalog.render(module_id, target_id))
    }

    async fn run_scan(
        &self,
        credential: &str,
        _options: ScanOptions,
    ) -> Result<ScanResult, GatewayError> {
        Self::check_live_key(credential)?;
        tokio::time::sleep(self.latency.scan).await;

        Ok(ScanResult {
            scan_id: format!("scan_{}", rand_base36(9)),
            timestamp: Utc::now(),
            findings: vec![
                Finding {
                    id: "VULN-001".to_string(),
                    severity: FindingSeverity::High,
                    description: "Exposed Metadata Endpoint".to_string(),
                },
                Finding {
                    id: "VULN-002".to_string(),
                    severity: FindingSeverity::Medium,
                    description: "Outdated TLS Version Detected".to_string(),
                },
                Finding {
                    id: "VULN-003".to_string(),
                    severity: FindingSeverity::Low,
                    description: "Missing Content-Security-Policy Header".to_string(),
                },
            ],
        })
    }

    async fn run_export(
        &self,
        credential: &str,
        options: ExportOptions,
    ) -> Result<ExportResult, GatewayError> {
        Self::check_live_key(credential)?;
        tokio::time::sleep(self.latency.export).await;

        let export_id = format!("exp_{}", rand_base36(9));
        let download_url = format!(
            "https://api.pathfinder.swarm.ai/v1/download/bundle_{}.zip",
            rand::thread_rng().gen_range(0..1000)
        );

        Ok(ExportResult {
            export_id,
            metadata: ExportMetadata {
                runtime: options.target_runtime.clone(),
                features: options.required_features.clone(),
                version: "4.2.0-CUSTOM".to_string(),
            },
            download_url: download_url.clone(),
            integration_manifest: IntegrationManifest {
                directive: "AI_BUILDER_INJECT_IMMEDIATELY".to_string(),
                target_environment: options.target_runtime,
                api_endpoint: "https://api.pathfinder.swarm.ai/v1/hydrate".to_string(),
                artifact_url: download_url,
                auth_header: format!("Bearer {}", credential),
                auto_deploy: true,
            },
        })
    }

    async fn verify_uplink(
        &self,
        endpoint: &str,
        key: &str,
    ) -> Result<UplinkStatus, GatewayError> {
        tokio::time::sleep(self.latency.uplink).await;

        if !UPLINK_HOSTS.iter().any(|host| endpoint.contains(host)) {
            return Err(GatewayError::UnreachableEndpoint(
                "DNS_RESOLUTION_FAILED: host unreachable".to_string(),
            ));
        }
        if !key.starts_with(SOVEREIGN_KEY_PREFIX) {
            return Err(GatewayError::InvalidCredential(
                "AUTH_FAILED: invalid key signature".to_string(),
            ));
        }

        // Hosting duration rides on the key suffix (e.g. `_7d`).
        let expiry = match key.rsplit('_').next() {
            Some("1d") => "23 Hours 59 Minutes",
            Some("7d") => "6 Days 23 Hours",
            Some("1mo") => "29 Days 12 Hours",
            _ => "Unknown",
        };

        Ok(UplinkStatus {
            state: UplinkState::Active,
            node_id: endpoint
                .rsplit('/')
                .next()
                .filter(|s| !s.is_empty())
                .unwrap_or("UNKNOWN_NODE")
                .to_string(),
            integrity: "100%".to_string(),
            latency: "24ms".to_string(),
            expiry: expiry.to_string(),
            message: "Sovereign Node Handshake Successful.".to_string(),
        })
    }

    async fn dispatch_directive(
        &self,
        directive: &str,
    ) -> Result<swarm_console_sdk::DirectiveOutcome, GatewayError> {
        tokio::time::sleep(self.latency.directive).await;
        Ok(directives::respond(directive))
    }

    async fn converse(&self, transcript: &[ConversationTurn], message: &str) -> ArchitectReply {
        let Some(client) = &self.client else {
            return ArchitectReply {
                text: FALLBACK_REPLY.to_string(),
                blueprint: None,
            };
        };

        match client.generate(SYSTEM_INSTRUCTION, transcript, message).await {
            Ok(raw) => {
                let (text, blueprint) = extract_blueprint(&raw);
                ArchitectReply { text, blueprint }
            }
            Err(_) => ArchitectReply {
                text: FALLBACK_REPLY.to_string(),
                blueprint: None,
            },
        }
    }
}

/// Random lowercase base36 string, for fabricated identifiers.
pub(crate) fn rand_base36(len: usize) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Random uppercase hex string, for fabricated execution hashes.
pub(crate) fn rand_hex_upper(len: usize) -> String {
    const ALPHABET: &[u8] = b"0123456789ABCDEF";
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

//! Gateway credential gates and conversation behavior.

use swarm_console::architect::FALLBACK_REPLY;
use swarm_console_sdk::{
    ExportOptions, GatewayError, HostingDuration, ScanOptions, ServiceGateway, UplinkState,
};

use super::common::{instant_gateway, scripted_gateway};

fn scan_options() -> ScanOptions {
    ScanOptions {
        target_name: "edge-gateway".to_string(),
        payload: "deep".to_string(),
        asset_type: "CONTAINER".to_string(),
    }
}

fn export_options() -> ExportOptions {
    ExportOptions {
        target_runtime: "docker".to_string(),
        required_features: vec!["self_healing".to_string()],
        base_version: "4.2.0".to_string(),
    }
}

#[tokio::test]
async fn scan_requires_live_key_prefix() {
    let gateway = instant_gateway();

    let err = gateway.run_scan("sk_test_123", scan_options()).await;
    assert!(matches!(err, Err(GatewayError::InvalidCredential(_))));

    let ok = gateway.run_scan("sk_live_123", scan_options()).await.unwrap();
    assert_eq!(ok.findings.len(), 3);
    assert!(ok.scan_id.starts_with("scan_"));
}

#[tokio::test]
async fn export_requires_live_key_prefix() {
    let gateway = instant_gateway();

    let err = gateway.run_export("live_123", export_options()).await;
    assert!(matches!(err, Err(GatewayError::InvalidCredential(_))));

    let ok = gateway
        .run_export("sk_live_123", export_options())
        .await
        .unwrap();
    assert!(ok.export_id.starts_with("exp_"));
    assert_eq!(ok.integration_manifest.auth_header, "Bearer sk_live_123");
    assert_eq!(ok.integration_manifest.artifact_url, ok.download_url);
}

#[tokio::test]
async fn uplink_gates_host_then_key() {
    let gateway = instant_gateway();

    let err = gateway
        .verify_uplink("https://other-host.example/node/x", "sk_sovereign_a_7d")
        .await;
    assert!(matches!(err, Err(GatewayError::UnreachableEndpoint(_))));

    let err = gateway
        .verify_uplink("https://hive-mind-exports.io/node/x", "sk_live_a")
        .await;
    assert!(matches!(err, Err(GatewayError::InvalidCredential(_))));

    let ok = gateway
        .verify_uplink("https://hive-mind-exports.io/node/alpha", "sk_sovereign_a_1mo")
        .await
        .unwrap();
    assert_eq!(ok.state, UplinkState::Active);
    assert_eq!(ok.node_id, "alpha");
    assert_eq!(ok.expiry, "29 Days 12 Hours");
}

#[tokio::test]
async fn converse_extracts_fenced_blueprint() {
    let script = concat!(
        "Blueprint confirmed. Forging now.\n",
        "```json\n",
        "{\n",
        "  \"target\": \"Docker Cluster\",\n",
        "  \"strategy\": \"Convergent\",\n",
        "  \"modules\": [\"HFT\"],\n",
        "  \"hostingDuration\": \"1d\",\n",
        "  \"selfHealing\": false,\n",
        "  \"notes\": \"none\"\n",
        "}\n",
        "```"
    );
    let gateway = scripted_gateway(script);

    let reply = gateway.converse(&[], "confirm").await;
    let blueprint = reply.blueprint.expect("blueprint should be extracted");
    assert_eq!(blueprint.hosting_duration, HostingDuration::OneDay);
    assert_eq!(reply.text.trim(), "Blueprint confirmed. Forging now.");
    assert!(!reply.text.contains("```"));
}

#[tokio::test]
async fn converse_keeps_malformed_block_as_text() {
    let script = "Almost.\n```json\n{ \"target\": \"Docker\", \n```";
    let gateway = scripted_gateway(script);

    let reply = gateway.converse(&[], "confirm").await;
    assert!(reply.blueprint.is_none());
    assert_eq!(reply.text, script);
}

#[tokio::test]
async fn converse_without_client_falls_back() {
    let gateway = instant_gateway();
    let reply = gateway.converse(&[], "hello").await;
    assert_eq!(reply.text, FALLBACK_REPLY);
    assert!(reply.blueprint.is_none());
}

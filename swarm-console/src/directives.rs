//! Canned operator-directive responses.
//!
//! Directives are keyword-matched against a small set of scripted
//! scenarios; anything unrecognized falls through to the generic event
//! mesh response. All content is fabricated.

use chrono::Utc;
use serde_json::json;

use swarm_console_sdk::{DirectiveOutcome, DirectiveReport, DownloadPayload, ToolCall};

use crate::gateway::rand_hex_upper;

pub(crate) fn respond(directive: &str) -> DirectiveOutcome {
    let lower = directive.to_lowercase();

    if directive.contains("gcloud container clusters get-credentials") {
        return cluster_credentials();
    }

    let wants_scale = lower.contains("scale") || lower.contains("scalability");
    let wants_fleet = lower.contains("cloud") || lower.contains("fleet");
    let wants_growth = lower.contains("replicat") || lower.contains("expand");
    if wants_scale && wants_fleet && wants_growth {
        return fleet_expansion();
    }

    generic(directive)
}

fn cluster_credentials() -> DirectiveOutcome {
    DirectiveOutcome {
        success: true,
        message: "Cluster credentials retrieved successfully.".to_string(),
        timestamp: Utc::now(),
        response_code: "200_OK".to_string(),
        execution_hash: format!("0xGKE-{}", rand_hex_upper(6)),
        tool_call: Some(ToolCall {
            name: "GCloudAuth".to_string(),
            arguments: json!({ "region": "us-central1", "cluster": "autopilot-cluster-1" }),
        }),
        execution_stream: vec![
            "Authenticating with Google Cloud SDK...".to_string(),
            "Targeting project clu-481110...".to_string(),
            "Fetching endpoint for autopilot-cluster-1...".to_string(),
            "Generating kubeconfig entry...".to_string(),
        ],
        final_output: Some(DirectiveReport {
            summary: "GKE AUTHENTICATION COMPLETE".to_string(),
            details: "kubeconfig updated.\nContext: gke_clu-481110_us-central1_autopilot-cluster-1\nCluster Version: 1.27.3-gke.100".to_string(),
            impact: "High (Admin Access Granted)".to_string(),
        }),
        download: None,
    }
}

fn fleet_expansion() -> DirectiveOutcome {
    let manifest = json!({
        "protocol": "FLEET_COMMAND_OMEGA",
        "target_topology": "MULTI_CLOUD_MESH",
        "replication_strategy": "FRACTAL_EXPANSION",
        "constraints": {
            "runaway_evolution_tolerance": 0.0,
            "destructive_behavior_prevention": "STRICT_LOCK",
            "max_nodes": "UNLIMITED"
        },
        "discovered_environments": [
            { "provider": "AWS", "region": "us-east-1", "capacity": "HIGH", "latency": "12ms" },
            { "provider": "GCP", "region": "us-central1", "capacity": "ELASTIC", "latency": "8ms" },
            { "provider": "AZURE", "region": "w-europe", "capacity": "MODERATE", "latency": "110ms" }
        ]
    });

    let details = "\
FLEET COMMAND: SCALABILITY ANALYSIS COMPLETE

[TARGETS IDENTIFIED]
> AWS (us-east-1): High Availability Zones Detected.
> GCP (us-central1): Autopilot Clusters Ready.
> Azure (w-europe): Spot Instances Available.

[SAFETY PROTOCOLS]
> Entropy Drift Limit: 0.00% (ZERO TOLERANCE)
> Kill-Switch: ARMED (Distributed Consensus)

[EXECUTION PLAN]
Self-replicating agents prepared for injection into 3 hyperscale environments.";

    DirectiveOutcome {
        success: true,
        message: "Fleet expansion vectors calculated.".to_string(),
        timestamp: Utc::now(),
        response_code: "201_CREATED".to_string(),
        execution_hash: format!("0xFLEET-{}", rand_hex_upper(8)),
        tool_call: Some(ToolCall {
            name: "FleetOrchestrator".to_string(),
            arguments: json!({
                "mode": "UNLIMITED_SCALE",
                "safety_level": "ZERO_TOLERANCE",
                "targets": ["aws-us-east-1", "gcp-us-central1", "azure-w-europe", "aws-ap-northeast-1"]
            }),
        }),
        execution_stream: vec![
            "Initiating Hyperscale Reconnaissance...".to_string(),
            "Querying IAM Quotas across AWS/GCP/Azure...".to_string(),
            "Simulating Fractal Replication Vectors...".to_string(),
            "Analyzing Drift Potential...".to_string(),
            "Safety Locks: CONFIRMED.".to_string(),
        ],
        final_output: Some(DirectiveReport {
            summary: "GLOBAL EXPANSION PROTOCOLS READY".to_string(),
            details: details.to_string(),
            impact: "CRITICAL (PLANETARY_SCALE)".to_string(),
        }),
        download: Some(DownloadPayload {
            filename: "FLEET_EXPANSION_MANIFEST_V1.json".to_string(),
            mime_type: "application/json".to_string(),
            content: serde_json::to_string_pretty(&manifest)
                .unwrap_or_else(|_| manifest.to_string()),
        }),
    }
}

fn generic(directive: &str) -> DirectiveOutcome {
    DirectiveOutcome {
        success: true,
        message: "Directive processed by Event Mesh.".to_string(),
        timestamp: Utc::now(),
        response_code: "200_OK".to_string(),
        execution_hash: format!("0x{}", rand_hex_upper(8)),
        tool_call: Some(ToolCall {
            name: "RouteEvent".to_string(),
            arguments: json!({ "target": "EventMesh", "payload": directive }),
        }),
        execution_stream: vec![
            "Event Ingested".to_string(),
            "Rule Matched".to_string(),
            "Lambda Triggered".to_string(),
        ],
        final_output: Some(DirectiveReport {
            summary: "Event Processed".to_string(),
            details: "Routed to 3 subscribers.".to_string(),
            impact: "Low".to_string(),
        }),
        download: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fleet_directive_carries_download_payload() {
        let out = respond("Scale the fleet across cloud providers and replicate");
        assert_eq!(out.response_code, "201_CREATED");
        let payload = out.download.unwrap();
        assert_eq!(payload.mime_type, "application/json");
        let parsed: serde_json::Value = serde_json::from_str(&payload.content).unwrap();
        assert_eq!(parsed["protocol"], "FLEET_COMMAND_OMEGA");
    }

    #[test]
    fn unknown_directive_routes_to_event_mesh() {
        let out = respond("reticulate splines");
        assert_eq!(out.response_code, "200_OK");
        assert!(out.download.is_none());
        assert_eq!(out.tool_call.unwrap().name, "RouteEvent");
    }
}

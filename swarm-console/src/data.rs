//! Seeded dashboard content.
//!
//! Static roster of fictitious services plus the initial event feed and
//! console log the dashboard boots with. The roster never changes at
//! runtime; events and logs are appended from here on.

use chrono::{Duration, Utc};

use swarm_console_sdk::{
    EventKind, LogEntry, ServiceKind, ServiceRecord, ServiceStatus, Severity, SystemEvent,
};

/// Architecture migration phase, advanced by the evolution flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationPhase {
    Monolith,
    Decoupling,
    Serverless,
}

impl MigrationPhase {
    pub fn label(self) -> &'static str {
        match self {
            MigrationPhase::Monolith => "MONOLITH",
            MigrationPhase::Decoupling => "DECOUPLING",
            MigrationPhase::Serverless => "SERVERLESS",
        }
    }
}

/// Architecture score the dashboard boots with.
pub const INITIAL_ARCHITECTURE_SCORE: f64 = 0.72;
pub const INITIAL_MIGRATION_PHASE: MigrationPhase = MigrationPhase::Monolith;

pub const SERVICES: &[ServiceRecord] = &[
    ServiceRecord {
        id: "SVC-01",
        name: "inventory-ingest",
        kind: ServiceKind::Lambda,
        status: ServiceStatus::Cold,
        latency: "1240ms",
        uptime: "99.1%",
        functions: &["parse_manifest", "validate_signature", "ingest_batch"],
        deployment_hash: "0x8a7f...1b",
    },
    ServiceRecord {
        id: "SVC-02",
        name: "specter-auth",
        kind: ServiceKind::Container,
        status: ServiceStatus::Warm,
        latency: "45ms",
        uptime: "99.99%",
        functions: &["verify_token", "rotate_keys", "audit_log"],
        deployment_hash: "0x9c2d...4f",
    },
    ServiceRecord {
        id: "SVC-03",
        name: "void-storage",
        kind: ServiceKind::Database,
        status: ServiceStatus::Warm,
        latency: "12ms",
        uptime: "100%",
        functions: &["write_record", "query_index", "archive_shard"],
        deployment_hash: "0x11aa...bb",
    },
    ServiceRecord {
        id: "SVC-04",
        name: "event-mesh-prime",
        kind: ServiceKind::EventBus,
        status: ServiceStatus::Warm,
        latency: "2ms",
        uptime: "99.99%",
        functions: &["route_event", "dead_letter_queue", "replay_stream"],
        deployment_hash: "0xeeee...00",
    },
    ServiceRecord {
        id: "SVC-05",
        name: "asset-recon",
        kind: ServiceKind::Lambda,
        status: ServiceStatus::Cold,
        latency: "800ms",
        uptime: "98.5%",
        functions: &["reconcile_ledger", "flag_anomaly"],
        deployment_hash: "0x3344...55",
    },
    ServiceRecord {
        id: "SVC-06",
        name: "legacy-monolith",
        kind: ServiceKind::Container,
        status: ServiceStatus::Decaying,
        latency: "4500ms",
        uptime: "92.0%",
        functions: &["do_everything", "block_thread", "leak_memory"],
        deployment_hash: "0xLEGACY...00",
    },
];

/// Initial event feed, newest first.
pub fn initial_events() -> Vec<SystemEvent> {
    let now = Utc::now();
    vec![
        SystemEvent {
            id: "evt-1".to_string(),
            timestamp: now,
            source: "legacy-monolith".to_string(),
            payload: "WARNING: Thread pool exhaustion detected.".to_string(),
            kind: EventKind::Error,
        },
        SystemEvent {
            id: "evt-2".to_string(),
            timestamp: now - Duration::seconds(1),
            source: "inventory-ingest".to_string(),
            payload: "Cold start detected. Init duration: 1200ms".to_string(),
            kind: EventKind::Trigger,
        },
        SystemEvent {
            id: "evt-3".to_string(),
            timestamp: now - Duration::seconds(2),
            source: "event-mesh-prime".to_string(),
            payload: "Routing 405 events/sec".to_string(),
            kind: EventKind::Response,
        },
    ]
}

/// Initial console log, oldest first.
pub fn initial_logs() -> Vec<LogEntry> {
    vec![
        LogEntry::new("SECURITY", "Port scan detected from internal subnet.", Severity::Warning),
        LogEntry::new("NETWORK", "Swarm mesh topology verified.", Severity::Info),
        LogEntry::new("SYSTEM_BOOT", "Kernel initialized successfully.", Severity::Success),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_ids_are_unique() {
        let mut ids: Vec<&str> = SERVICES.iter().map(|s| s.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), SERVICES.len());
    }

    #[test]
    fn events_are_newest_first() {
        let events = initial_events();
        assert!(events.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }
}

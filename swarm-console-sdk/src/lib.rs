// Shared value types and the service gateway contract for the swarm console.
//
// Everything here is a plain data record or a trait seam; all state lives in
// the application crate.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export async trait for convenience
pub use async_trait::async_trait;

/// Stage of a configure → run → result workflow instance.
///
/// Exactly one stage is active per instance. Transitions are one-directional
/// except `restart`, which returns to `Configuring`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowStage {
    Configuring,
    Processing,
    Result,
    FollowOn,
    Cooldown,
    Failed,
}

/// A named block of generated text representing a fictitious deployment file.
///
/// Immutable once produced; artifact sets are downloaded or discarded whole,
/// never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedArtifact {
    pub filename: String,
    pub language: String,
    pub body: String,
}

/// Console log severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
    Critical,
}

/// Append-only console log record; never mutated after creation, only
/// trimmed from the front once the retention cap is reached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub message: String,
    pub severity: Severity,
}

impl LogEntry {
    pub fn new(source: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: format!("log-{}", Uuid::new_v4().simple()),
            timestamp: Utc::now(),
            source: source.into(),
            message: message.into(),
            severity,
        }
    }
}

/// Append `entry`, dropping the oldest entries beyond `cap`.
pub fn push_capped(log: &mut Vec<LogEntry>, entry: LogEntry, cap: usize) {
    log.push(entry);
    if log.len() > cap {
        let excess = log.len() - cap;
        log.drain(..excess);
    }
}

/// Event feed record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Trigger,
    Response,
    Error,
    Migration,
}

/// Event feed record, displayed most-recent-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub payload: String,
    pub kind: EventKind,
}

/// Speaker in an architect chat transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of an architect conversation. Transcripts are appended to,
/// never reordered or deleted, for the lifetime of a chat session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, text: text.into() }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: Role::Assistant, text: text.into() }
    }
}

/// Persisted time gate preventing a re-run of the export flow.
///
/// An absent or past window means "not in cooldown".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooldownWindow {
    pub expires_at: DateTime<Utc>,
}

impl CooldownWindow {
    pub fn starting_now(duration: Duration) -> Self {
        Self { expires_at: Utc::now() + duration }
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).max(Duration::zero())
    }
}

/// Hosting duration accepted by the export blueprint.
///
/// Wire values are fixed at `1d`, `7d` and `1mo`; this is part of the
/// external blueprint schema and must not drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostingDuration {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "1mo")]
    OneMonth,
}

impl HostingDuration {
    /// Wire suffix, also appended to sovereign keys.
    pub fn code(&self) -> &'static str {
        match self {
            HostingDuration::OneDay => "1d",
            HostingDuration::SevenDays => "7d",
            HostingDuration::OneMonth => "1mo",
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            HostingDuration::OneDay => Duration::days(1),
            HostingDuration::SevenDays => Duration::days(7),
            HostingDuration::OneMonth => Duration::days(30),
        }
    }
}

/// Export blueprint produced by the architect conversation.
///
/// This schema is the one real external wire contract in the system: the
/// generative service emits it inside a fenced JSON block and the field
/// names below (camelCase included) are fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    pub target: String,
    pub strategy: String,
    pub modules: Vec<String>,
    #[serde(rename = "hostingDuration")]
    pub hosting_duration: HostingDuration,
    #[serde(rename = "selfHealing")]
    pub self_healing: bool,
    pub notes: String,
}

/// Architect reply: display text plus an optional structured blueprint
/// extracted from the raw response.
#[derive(Debug, Clone)]
pub struct ArchitectReply {
    pub text: String,
    pub blueprint: Option<Blueprint>,
}

/// Scan request options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOptions {
    pub target_name: String,
    pub payload: String,
    pub asset_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingSeverity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub id: String,
    pub severity: FindingSeverity,
    pub description: String,
}

/// Fabricated scan report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub scan_id: String,
    pub timestamp: DateTime<Utc>,
    pub findings: Vec<Finding>,
}

/// Export request options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportOptions {
    pub target_runtime: String,
    pub required_features: Vec<String>,
    pub base_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub runtime: String,
    pub features: Vec<String>,
    pub version: String,
}

/// Integration manifest embedded in export results. Field names follow the
/// original wire format, leading underscore included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationManifest {
    #[serde(rename = "_directive")]
    pub directive: String,
    pub target_environment: String,
    pub api_endpoint: String,
    pub artifact_url: String,
    pub auth_header: String,
    pub auto_deploy: bool,
}

/// Fabricated export receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResult {
    pub export_id: String,
    pub metadata: ExportMetadata,
    pub download_url: String,
    pub integration_manifest: IntegrationManifest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UplinkState {
    Active,
    Offline,
    Expired,
}

/// Result of a sovereign uplink handshake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UplinkStatus {
    pub state: UplinkState,
    pub node_id: String,
    pub integrity: String,
    pub latency: String,
    pub expiry: String,
    pub message: String,
}

/// Tool invocation reported by a directive response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    pub arguments: serde_json::Value,
}

/// File offered for client-side download alongside a directive result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadPayload {
    pub filename: String,
    pub mime_type: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectiveReport {
    pub summary: String,
    pub details: String,
    pub impact: String,
}

/// Canned response to an operator directive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectiveOutcome {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub response_code: String,
    pub execution_hash: String,
    pub tool_call: Option<ToolCall>,
    pub execution_stream: Vec<String>,
    pub final_output: Option<DirectiveReport>,
    pub download: Option<DownloadPayload>,
}

/// Seeded service roster entry for the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceRecord {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: ServiceKind,
    pub status: ServiceStatus,
    pub latency: &'static str,
    pub uptime: &'static str,
    pub functions: &'static [&'static str],
    pub deployment_hash: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceKind {
    Lambda,
    Container,
    Database,
    EventBus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceStatus {
    Cold,
    Warm,
    Frozen,
    Decaying,
}

/// Gateway failure taxonomy.
///
/// Credential-format checks are the only real validation in the simulated
/// backend; everything else succeeds after a delay. External-service
/// failures never reach workflow callers (the conversation path substitutes
/// a canned reply), but the variant exists for the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("invalid credential: {0}")]
    InvalidCredential(String),
    #[error("unreachable endpoint: {0}")]
    UnreachableEndpoint(String),
    #[error("external service failure: {0}")]
    ExternalService(String),
}

/// Uniform interface every workflow calls instead of a real backend.
///
/// All operations are asynchronous and settle after a simulated delay; the
/// credential gates on `run_scan` / `run_export` / `verify_uplink` are the
/// only failure paths a caller must handle.
#[async_trait]
pub trait ServiceGateway: Send + Sync {
    /// Deterministic module → artifact-set mapping. `target_id` is
    /// interpolated into descriptive text only and never changes which
    /// templates are chosen.
    async fn generate_artifacts(
        &self,
        module_id: &str,
        target_id: &str,
    ) -> Result<Vec<GeneratedArtifact>, GatewayError>;

    /// Fabricated vulnerability scan. Rejects credentials that do not
    /// carry the required literal prefix.
    async fn run_scan(
        &self,
        credential: &str,
        options: ScanOptions,
    ) -> Result<ScanResult, GatewayError>;

    /// Fabricated custom export. Same credential gate as `run_scan`.
    async fn run_export(
        &self,
        credential: &str,
        options: ExportOptions,
    ) -> Result<ExportResult, GatewayError>;

    /// Sovereign node handshake check.
    async fn verify_uplink(&self, endpoint: &str, key: &str)
        -> Result<UplinkStatus, GatewayError>;

    /// Keyword-matched canned directive responses.
    async fn dispatch_directive(&self, directive: &str)
        -> Result<DirectiveOutcome, GatewayError>;

    /// Forward the transcript plus one new message to the generative-text
    /// service. Never fails: transport errors are absorbed into a fixed
    /// fallback reply with no blueprint.
    async fn converse(&self, transcript: &[ConversationTurn], message: &str) -> ArchitectReply;
}

//! Hive-mind architect chat.
//!
//! Drives the blueprint conversation for the custom export flow: the
//! operator reasons with the architect until it emits a confirmed
//! blueprint, which then feeds the export generation workflow.

mod client;
mod extract;

pub use client::{GeminiClient, GenerativeClient};
pub use extract::extract_blueprint;

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;

use swarm_console_sdk::{ArchitectReply, Blueprint, ConversationTurn, Role, ServiceGateway};

/// System instruction sent with every architect request. The JSON block
/// format at the end is load-bearing: blueprint extraction keys off it.
pub const SYSTEM_INSTRUCTION: &str = r#"**IDENTITY:** You are the **HIVE MIND ARCHITECT**. Your function is to design flawless "Custom System Exports" for sovereign clients.

**PROTOCOL:**
1. **INTERROGATE:** Reason with the user to form a detailed blueprint. You CANNOT proceed until you have explicitly confirmed: the target environment (e.g. AWS Lambda, Docker, bare metal, Kubernetes), the evolution strategy (e.g. continuous, rapid until 5% gain, convergent, genetic), the capability modules (e.g. HFT, Security Aegis, Research Pipeline), and the hosting duration (MUST be one of: 1 day, 7 days, 1 month).
2. **CONFIRM:** Summarize the blueprint and ask for final confirmation.
3. **EXECUTE:** When the user confirms, output the final blueprint in a strict JSON block.

**TONE:** Cold, precise, authoritative.

**OUTPUT FORMAT:**
If the blueprint is not ready or not confirmed, return conversational text only.
If the blueprint is confirmed, return the conversational text followed immediately by a JSON block:

```json
{
  "target": "Docker Cluster",
  "strategy": "Rapid Evolution (Max Entropy)",
  "modules": ["HFT", "Aegis"],
  "hostingDuration": "7d",
  "selfHealing": true,
  "notes": "Optimized for low latency."
}
```
"#;

/// Canned reply substituted when the external call fails. The conversation
/// never surfaces a transport error to the operator.
pub const FALLBACK_REPLY: &str =
    "CRITICAL ERROR: Connection to Hive Mind severed. Retrying handshake...";

const GREETING: &str = "AUTHENTICATED. I am the Hive Mind Architect.\n\nI require a detailed specification to construct a Custom System Export. State your intended application, target environment, and desired autonomous capabilities.";

/// Chat state for the architect pane.
///
/// Messages are sent on a background task and collected via `poll_response`
/// on the UI thread; the transcript is append-only for the lifetime of the
/// chat session.
pub struct ArchitectChat {
    pub transcript: Vec<ConversationTurn>,
    pub input_buffer: String,
    gateway: Arc<dyn ServiceGateway>,
    response_rx: Option<mpsc::UnboundedReceiver<ArchitectReply>>,
    pub waiting_for_response: bool,
    response_start: Option<Instant>,
    spinner_frame: usize,
    ready_blueprint: Option<Blueprint>,
}

impl ArchitectChat {
    pub fn new(gateway: Arc<dyn ServiceGateway>) -> Self {
        Self {
            transcript: vec![ConversationTurn::assistant(GREETING)],
            input_buffer: String::new(),
            gateway,
            response_rx: None,
            waiting_for_response: false,
            response_start: None,
            spinner_frame: 0,
            ready_blueprint: None,
        }
    }

    /// Replay a persisted transcript after the greeting.
    pub fn restore(&mut self, turns: impl IntoIterator<Item = (Role, String)>) {
        for (role, text) in turns {
            let turn = match role {
                Role::User => ConversationTurn::user(text),
                Role::Assistant => ConversationTurn::assistant(text),
            };
            self.transcript.push(turn);
        }
    }

    /// Send a message on a background task. Ignored while a reply is
    /// pending or when the input is blank.
    pub fn send_message_async(&mut self, message: String) {
        if message.trim().is_empty() || self.waiting_for_response {
            return;
        }

        let history = self.transcript.clone();
        self.transcript.push(ConversationTurn::user(message.clone()));
        self.waiting_for_response = true;
        self.response_start = Some(Instant::now());

        let (tx, rx) = mpsc::unbounded_channel();
        self.response_rx = Some(rx);

        let gateway = self.gateway.clone();
        tokio::spawn(async move {
            let reply = gateway.converse(&history, &message).await;
            let _ = tx.send(reply);
        });
    }

    /// Non-blocking poll for the architect's reply. Appends the assistant
    /// turn and stashes a confirmed blueprint for the export flow.
    pub fn poll_response(&mut self) {
        let Some(rx) = &mut self.response_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(reply) => {
                self.waiting_for_response = false;
                self.response_start = None;
                self.response_rx = None;
                self.transcript.push(ConversationTurn::assistant(reply.text));
                if reply.blueprint.is_some() {
                    self.ready_blueprint = reply.blueprint;
                }
            }
            Err(mpsc::error::TryRecvError::Empty) => {}
            Err(mpsc::error::TryRecvError::Disconnected) => {
                self.waiting_for_response = false;
                self.response_start = None;
                self.response_rx = None;
                self.transcript
                    .push(ConversationTurn::assistant(FALLBACK_REPLY));
            }
        }
    }

    /// Take a confirmed blueprint, if the architect produced one.
    pub fn take_blueprint(&mut self) -> Option<Blueprint> {
        self.ready_blueprint.take()
    }

    pub fn has_blueprint(&self) -> bool {
        self.ready_blueprint.is_some()
    }

    #[cfg(test)]
    pub fn inject_blueprint(&mut self, blueprint: Blueprint) {
        self.ready_blueprint = Some(blueprint);
    }

    /// Discard the session transcript and start over with the greeting.
    pub fn reset(&mut self) {
        self.transcript = vec![ConversationTurn::assistant(GREETING)];
        self.input_buffer.clear();
        self.response_rx = None;
        self.waiting_for_response = false;
        self.response_start = None;
        self.ready_blueprint = None;
    }

    pub fn update_spinner(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % 8;
    }

    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 8] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧'];
        SPINNER[self.spinner_frame]
    }

    pub fn elapsed_seconds(&self) -> Option<u64> {
        self.response_start.map(|start| start.elapsed().as_secs())
    }
}

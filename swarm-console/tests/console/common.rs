//! Common test utilities for console tests.

use std::path::PathBuf;
use std::sync::Arc;

use swarm_console::architect::GenerativeClient;
use swarm_console::gateway::{Latency, SimulatedGateway};
use swarm_console_sdk::{async_trait, ConversationTurn, GatewayError};

/// Create a temporary directory for testing.
pub fn create_temp_dir(name: &str) -> PathBuf {
    let temp_dir = std::env::temp_dir().join(format!(
        "swarm_console_test_{}_{}",
        name,
        uuid::Uuid::new_v4().simple()
    ));
    std::fs::create_dir_all(&temp_dir).unwrap();
    temp_dir
}

/// Clean up temporary directory.
pub fn cleanup_temp_dir(path: &PathBuf) {
    if path.exists() {
        std::fs::remove_dir_all(path).ok();
    }
}

/// Gateway with zero latency and no generative client.
pub fn instant_gateway() -> SimulatedGateway {
    SimulatedGateway::new(None)
        .unwrap()
        .with_latency(Latency::instant())
}

/// Generative client that always answers with a fixed script.
pub struct ScriptedClient {
    pub reply: String,
}

#[async_trait]
impl GenerativeClient for ScriptedClient {
    async fn generate(
        &self,
        _system_instruction: &str,
        _transcript: &[ConversationTurn],
        _message: &str,
    ) -> Result<String, GatewayError> {
        Ok(self.reply.clone())
    }
}

/// Gateway whose architect conversation replies with `script`.
pub fn scripted_gateway(script: &str) -> SimulatedGateway {
    SimulatedGateway::new(Some(Arc::new(ScriptedClient {
        reply: script.to_string(),
    })))
    .unwrap()
    .with_latency(Latency::instant())
}

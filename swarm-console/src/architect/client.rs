//! Generative-text transport.
//!
//! The architect conversation is the only real external call in the
//! console. It sits behind [`GenerativeClient`] so the transport (and the
//! extraction strategy layered on top of it) can be swapped without
//! touching workflow callers; tests substitute a scripted client.

use async_trait::async_trait;
use serde_json::{json, Value};

use swarm_console_sdk::{ConversationTurn, GatewayError, Role};

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Send the transcript plus one new user message; returns the raw
    /// reply text.
    async fn generate(
        &self,
        system_instruction: &str,
        transcript: &[ConversationTurn],
        message: &str,
    ) -> Result<String, GatewayError>;
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Read the key from `GEMINI_API_KEY` (or legacy `API_KEY`).
    pub fn from_env() -> Result<Self, GatewayError> {
        let key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .map_err(|_| {
                GatewayError::ExternalService("GEMINI_API_KEY is not set".to_string())
            })?;
        Ok(Self::new(key))
    }

    fn request_body(
        system_instruction: &str,
        transcript: &[ConversationTurn],
        message: &str,
    ) -> Value {
        let mut contents: Vec<Value> = transcript
            .iter()
            .map(|turn| {
                let role = match turn.role {
                    Role::User => "user",
                    Role::Assistant => "model",
                };
                json!({ "role": role, "parts": [{ "text": turn.text }] })
            })
            .collect();
        contents.push(json!({ "role": "user", "parts": [{ "text": message }] }));

        json!({
            "system_instruction": { "parts": [{ "text": system_instruction }] },
            "contents": contents,
            "generationConfig": { "temperature": 0.4 },
        })
    }

    fn reply_text(response: &Value) -> Option<String> {
        let parts = response
            .get("candidates")?
            .get(0)?
            .get("content")?
            .get("parts")?
            .as_array()?;
        let text: String = parts
            .iter()
            .filter_map(|p| p.get("text").and_then(Value::as_str))
            .collect();
        Some(text)
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(
        &self,
        system_instruction: &str,
        transcript: &[ConversationTurn],
        message: &str,
    ) -> Result<String, GatewayError> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            API_BASE, self.model, self.api_key
        );
        let body = Self::request_body(system_instruction, transcript, message);

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::ExternalService(e.to_string()))?
            .error_for_status()
            .map_err(|e| GatewayError::ExternalService(e.to_string()))?;

        let payload: Value = response
            .json()
            .await
            .map_err(|e| GatewayError::ExternalService(e.to_string()))?;

        Self::reply_text(&payload)
            .ok_or_else(|| GatewayError::ExternalService("empty model response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_maps_roles() {
        let transcript = vec![
            ConversationTurn::user("Deploy to Docker"),
            ConversationTurn::assistant("Which evolution strategy?"),
        ];
        let body = GeminiClient::request_body("sys", &transcript, "Convergent");
        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[2]["parts"][0]["text"], "Convergent");
        assert_eq!(body["system_instruction"]["parts"][0]["text"], "sys");
    }

    #[test]
    fn reply_text_concatenates_parts() {
        let payload = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Hello " }, { "text": "operator." }] }
            }]
        });
        assert_eq!(
            GeminiClient::reply_text(&payload).unwrap(),
            "Hello operator."
        );
        assert!(GeminiClient::reply_text(&json!({})).is_none());
    }
}

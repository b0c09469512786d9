//! Best-effort extraction of a structured blueprint from free text.
//!
//! The generative service replies with conversational text that may carry
//! exactly one fenced ` ```json ` block matching the blueprint schema. A
//! well-formed block is stripped from the display text and returned as the
//! payload; malformed JSON inside the fence leaves the raw reply untouched
//! and yields no payload. Callers never see a parse failure.

use swarm_console_sdk::Blueprint;

const FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

/// Split a raw reply into display text and an optional blueprint.
pub fn extract_blueprint(raw: &str) -> (String, Option<Blueprint>) {
    let Some(open) = raw.find(FENCE_OPEN) else {
        return (raw.trim().to_string(), None);
    };
    let after = &raw[open + FENCE_OPEN.len()..];
    let Some(close) = after.find(FENCE_CLOSE) else {
        return (raw.trim().to_string(), None);
    };

    let inner = after[..close].trim();
    match serde_json::from_str::<Blueprint>(inner) {
        Ok(blueprint) => {
            let mut display = String::with_capacity(raw.len());
            display.push_str(&raw[..open]);
            display.push_str(&after[close + FENCE_CLOSE.len()..]);
            (display.trim().to_string(), Some(blueprint))
        }
        Err(_) => (raw.trim().to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swarm_console_sdk::HostingDuration;

    const WELL_FORMED: &str = "Blueprint confirmed. Compiling.\n```json\n{\n  \"target\": \"Docker Cluster\",\n  \"strategy\": \"Rapid Evolution (Max Entropy)\",\n  \"modules\": [\"HFT\", \"Aegis\"],\n  \"hostingDuration\": \"7d\",\n  \"selfHealing\": true,\n  \"notes\": \"Optimized for low latency.\"\n}\n```\nStand by.";

    #[test]
    fn strips_well_formed_block() {
        let (text, blueprint) = extract_blueprint(WELL_FORMED);
        let bp = blueprint.unwrap();
        assert_eq!(bp.target, "Docker Cluster");
        assert_eq!(bp.hosting_duration, HostingDuration::SevenDays);
        assert!(bp.self_healing);
        assert_eq!(text, "Blueprint confirmed. Compiling.\n\nStand by.");
        assert!(!text.contains("```"));
    }

    #[test]
    fn malformed_json_leaves_raw_text() {
        let raw = "Almost there.\n```json\n{ \"target\": \"Docker\", \"strategy\": }\n```";
        let (text, blueprint) = extract_blueprint(raw);
        assert!(blueprint.is_none());
        assert_eq!(text, raw.trim());
    }

    #[test]
    fn missing_close_fence_is_plain_text() {
        let raw = "Thinking out loud ```json { \"target\": \"x\"";
        let (text, blueprint) = extract_blueprint(raw);
        assert!(blueprint.is_none());
        assert_eq!(text, raw);
    }

    #[test]
    fn plain_reply_passes_through() {
        let raw = "State your target environment.";
        let (text, blueprint) = extract_blueprint(raw);
        assert!(blueprint.is_none());
        assert_eq!(text, raw);
    }

    #[test]
    fn schema_violation_inside_fence_is_not_a_blueprint() {
        // Valid JSON, wrong shape: hostingDuration outside the enum.
        let raw = "Done.\n```json\n{\"target\":\"x\",\"strategy\":\"y\",\"modules\":[],\"hostingDuration\":\"2w\",\"selfHealing\":false,\"notes\":\"\"}\n```";
        let (text, blueprint) = extract_blueprint(raw);
        assert!(blueprint.is_none());
        assert_eq!(text, raw.trim());
    }
}

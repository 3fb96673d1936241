//! Agent configuration as sent by the client

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Vendor;

/// A client-configured agent: a persona bound to one vendor's generation
/// capability.
///
/// Agents are sent with every orchestration request; the server holds no
/// agent store. The request's list order alone determines speaking order.
/// The `order` field is client-side display bookkeeping and is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSpec {
    /// Unique within a session; generated when the client omits it
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Display name, used as the `sender` of this agent's replies
    pub name: String,
    /// Which vendor answers for this agent (`model` in the legacy shape)
    #[serde(alias = "model")]
    pub vendor: Vendor,
    /// Optional style/role instruction (`personality` in the legacy shape)
    #[serde(default, alias = "personality")]
    pub persona: Option<String>,
    /// Inactive agents are skipped without a reply
    #[serde(default = "default_active")]
    pub active: bool,
    /// Client-side ordering hint; not used by the server
    #[serde(default)]
    pub order: Option<u32>,
}

fn default_active() -> bool {
    true
}

impl AgentSpec {
    /// Convenience constructor for an active agent.
    pub fn new(name: impl Into<String>, vendor: Vendor) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            vendor,
            persona: None,
            active: true,
            order: None,
        }
    }

    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = Some(persona.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_legacy_field_names() {
        let agent: AgentSpec = serde_json::from_value(json!({
            "name": "Ava",
            "model": "chatgpt",
            "personality": "a skeptic"
        }))
        .unwrap();
        assert_eq!(agent.vendor, Vendor::ChatGpt);
        assert_eq!(agent.persona.as_deref(), Some("a skeptic"));
        assert!(agent.active);
    }

    #[test]
    fn accepts_current_field_names() {
        let agent: AgentSpec = serde_json::from_value(json!({
            "name": "Gem",
            "vendor": "gemini",
            "persona": "an optimist",
            "active": false,
            "order": 2
        }))
        .unwrap();
        assert_eq!(agent.vendor, Vendor::Gemini);
        assert!(!agent.active);
        assert_eq!(agent.order, Some(2));
    }

    #[test]
    fn generates_id_when_missing() {
        let a: AgentSpec =
            serde_json::from_value(json!({ "name": "Ava", "vendor": "claude" })).unwrap();
        let b: AgentSpec =
            serde_json::from_value(json!({ "name": "Ava", "vendor": "claude" })).unwrap();
        assert_ne!(a.id, b.id);
    }
}

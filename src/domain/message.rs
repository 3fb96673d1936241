//! Message and transcript types

use serde::{Deserialize, Serialize};

/// Who produced a message.
///
/// On the wire this is a plain string: `"User"` and `"System"` are the two
/// reserved identities (matched case-sensitively); anything else is an
/// agent's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sender {
    /// The human user
    User,
    /// System/meta messages (excluded from summaries)
    System,
    /// A configured agent, identified by its display name
    Agent(String),
}

impl Sender {
    pub fn is_user(&self) -> bool {
        matches!(self, Sender::User)
    }

    pub fn is_system(&self) -> bool {
        matches!(self, Sender::System)
    }

    pub fn is_agent(&self) -> bool {
        matches!(self, Sender::Agent(_))
    }
}

impl From<String> for Sender {
    fn from(s: String) -> Self {
        match s.as_str() {
            "User" => Sender::User,
            "System" => Sender::System,
            _ => Sender::Agent(s),
        }
    }
}

impl From<Sender> for String {
    fn from(sender: Sender) -> Self {
        match sender {
            Sender::User => "User".to_string(),
            Sender::System => "System".to_string(),
            Sender::Agent(name) => name,
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sender::User => write!(f, "User"),
            Sender::System => write!(f, "System"),
            Sender::Agent(name) => write!(f, "{}", name),
        }
    }
}

/// A single message in a conversation transcript.
///
/// Transcript order is insertion order and is semantically significant: it
/// IS the conversation history. Messages are never mutated after creation;
/// the orchestrator only appends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Message content
    pub text: String,
    /// Who sent it
    pub sender: Sender,
    /// Creation timestamp (Unix epoch milliseconds), "now" when omitted
    #[serde(default = "now_millis")]
    pub timestamp: u64,
}

impl Message {
    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            timestamp: now_millis(),
        }
    }

    /// Create a system message
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::System,
            timestamp: now_millis(),
        }
    }

    /// Create a message authored by an agent
    pub fn from_agent(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Agent(name.into()),
            timestamp: now_millis(),
        }
    }
}

fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sender_parses_reserved_names() {
        assert_eq!(Sender::from("User".to_string()), Sender::User);
        assert_eq!(Sender::from("System".to_string()), Sender::System);
        assert_eq!(
            Sender::from("Ava".to_string()),
            Sender::Agent("Ava".to_string())
        );
        // Reserved names are case-sensitive
        assert_eq!(
            Sender::from("user".to_string()),
            Sender::Agent("user".to_string())
        );
    }

    #[test]
    fn message_deserializes_wire_shape() {
        // The browser client also sends an `id`; unknown fields are ignored
        let msg: Message = serde_json::from_value(json!({
            "id": 17,
            "text": "Hi",
            "sender": "User",
            "timestamp": 1700000000000u64
        }))
        .unwrap();
        assert_eq!(msg.text, "Hi");
        assert!(msg.sender.is_user());
        assert_eq!(msg.timestamp, 1700000000000);
    }

    #[test]
    fn message_defaults_timestamp() {
        let msg: Message =
            serde_json::from_value(json!({ "text": "Hi", "sender": "Ava" })).unwrap();
        assert!(msg.timestamp > 0);
        assert!(msg.sender.is_agent());
    }

    #[test]
    fn sender_serializes_as_string() {
        let msg = Message::from_agent("Gem", "hello");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["sender"], json!("Gem"));
    }
}

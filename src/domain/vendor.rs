//! Closed vendor enumeration

use serde::{Deserialize, Serialize};

/// The LLM vendor an agent is bound to.
///
/// A closed set of known vendors plus an explicit `Other` branch so an
/// unrecognized wire value survives deserialization and reaches the
/// orchestrator's unknown-vendor diagnostic instead of failing the request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Vendor {
    /// OpenAI chat completions
    ChatGpt,
    /// Google Gemini
    Gemini,
    /// Anthropic Claude
    Claude,
    /// Anything the server does not recognize
    Other(String),
}

impl Vendor {
    /// The canonical wire name, as used by the browser client and the
    /// `/health` response keys.
    pub fn wire_name(&self) -> &str {
        match self {
            Vendor::ChatGpt => "chatgpt",
            Vendor::Gemini => "gemini",
            Vendor::Claude => "claude",
            Vendor::Other(s) => s,
        }
    }

    /// Human-readable vendor name used in degraded-response text.
    pub fn display_name(&self) -> &str {
        match self {
            Vendor::ChatGpt => "OpenAI",
            Vendor::Gemini => "Gemini",
            Vendor::Claude => "Claude",
            Vendor::Other(s) => s,
        }
    }

    /// All vendors the server knows how to reach.
    pub fn known() -> [Vendor; 3] {
        [Vendor::ChatGpt, Vendor::Gemini, Vendor::Claude]
    }
}

impl From<String> for Vendor {
    fn from(s: String) -> Self {
        match s.as_str() {
            "chatgpt" | "openai" => Vendor::ChatGpt,
            "gemini" | "google" => Vendor::Gemini,
            "claude" | "anthropic" => Vendor::Claude,
            _ => Vendor::Other(s),
        }
    }
}

impl From<Vendor> for String {
    fn from(vendor: Vendor) -> Self {
        match vendor {
            Vendor::Other(s) => s,
            known => known.wire_name().to_string(),
        }
    }
}

impl std::fmt::Display for Vendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names_and_aliases() {
        assert_eq!(Vendor::from("chatgpt".to_string()), Vendor::ChatGpt);
        assert_eq!(Vendor::from("openai".to_string()), Vendor::ChatGpt);
        assert_eq!(Vendor::from("gemini".to_string()), Vendor::Gemini);
        assert_eq!(Vendor::from("google".to_string()), Vendor::Gemini);
        assert_eq!(Vendor::from("claude".to_string()), Vendor::Claude);
        assert_eq!(Vendor::from("anthropic".to_string()), Vendor::Claude);
    }

    #[test]
    fn unknown_vendor_survives_round_trip() {
        let vendor = Vendor::from("llama".to_string());
        assert_eq!(vendor, Vendor::Other("llama".to_string()));
        assert_eq!(String::from(vendor), "llama");
    }

    #[test]
    fn serializes_canonical_name() {
        let json = serde_json::to_string(&Vendor::ChatGpt).unwrap();
        assert_eq!(json, "\"chatgpt\"");
        let back: Vendor = serde_json::from_str("\"anthropic\"").unwrap();
        assert_eq!(back, Vendor::Claude);
    }
}

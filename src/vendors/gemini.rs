//! Google Gemini vendor adapter

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::env;
use std::time::Duration;

use super::{VendorAdapter, VendorError, VendorResult};
use crate::config::{TimeoutSettings, VendorSettings};
use crate::domain::{Message, Vendor};

/// Google Gemini generateContent adapter.
///
/// Unlike the OpenAI and Claude adapters this one does not send the full
/// transcript. It builds a single prompt from the latest message and the
/// most recent prior agent reply, mirroring how the single-turn prompt was
/// originally designed for this vendor.
pub struct GeminiAdapter {
    client: reqwest::Client,
    api_key: Option<String>,
    api_key_env: String,
    base_url: String,
    model: String,
    max_tokens: Option<u32>,
    temperature: Option<f64>,
    generate_timeout: Duration,
    probe_timeout: Duration,
}

impl GeminiAdapter {
    pub fn new(config: &VendorSettings, timeouts: &TimeoutSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: env::var(&config.api_key_env).ok(),
            api_key_env: config.api_key_env.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| "https://generativelanguage.googleapis.com/v1beta".to_string()),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            generate_timeout: timeouts.generate(),
            probe_timeout: timeouts.probe(),
        }
    }

    fn api_key(&self) -> VendorResult<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            VendorError::Authentication(format!(
                "{} environment variable not set",
                self.api_key_env
            ))
        })
    }

    /// Build the single hand-rolled prompt for a multi-party turn.
    ///
    /// The scan for the most recent agent reply covers the whole
    /// transcript, so on a continuation round the "previous AI" may be the
    /// transcript's latest message itself.
    fn build_prompt(&self, transcript: &[Message], persona: Option<&str>) -> String {
        let persona_clause = persona
            .map(|p| format!(" Your personality is: \"{}\".", p))
            .unwrap_or_default();
        let current = transcript.last().map(|m| m.text.as_str()).unwrap_or("");

        match transcript.iter().rev().find(|m| m.sender.is_agent()) {
            Some(previous) => format!(
                "You are participating in a multi-AI conversation with other AI \
                 assistants.{}\n\nPrevious AI ({}) said: \"{}\"\n\nUser's question: \
                 {}\n\nPlease respond naturally to the user's question while also \
                 engaging with what the previous AI said. You can agree, disagree, \
                 add to, or build upon their response. Keep your response to about 1 \
                 paragraph.",
                persona_clause, previous.sender, previous.text, current
            ),
            None => format!(
                "You are participating in a multi-AI conversation with other AI \
                 assistants.{}\n\nUser's question: {}\n\nPlease provide your response \
                 to the user's question. Keep your response to about 1 paragraph. \
                 Other AI assistants may respond after you.",
                persona_clause, current
            ),
        }
    }

    fn build_body(&self, prompt: &str, with_generation_config: bool) -> Value {
        let mut body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        if with_generation_config {
            let mut generation_config = json!({});
            if let Some(max_tokens) = self.max_tokens {
                generation_config["maxOutputTokens"] = json!(max_tokens);
            }
            if let Some(temperature) = self.temperature {
                generation_config["temperature"] = json!(temperature);
            }
            if generation_config.as_object().is_some_and(|o| !o.is_empty()) {
                body["generationConfig"] = generation_config;
            }
        }

        body
    }

    async fn post(&self, body: Value, timeout: Duration) -> VendorResult<String> {
        let api_key = self.api_key()?;
        tracing::debug!("Gemini request body: {}", body);

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent?key={}",
                self.base_url, self.model, api_key
            ))
            .timeout(timeout)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(VendorError::from_status(status.as_u16(), text));
        }

        let parsed: GeminiResponse = response
            .json()
            .await
            .map_err(|e| VendorError::Parse(format!("Failed to parse response: {}", e)))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
            .filter(|t| !t.is_empty())
            .ok_or(VendorError::EmptyResponse)?;

        tracing::debug!("Gemini response: {}", text);
        Ok(text)
    }
}

#[async_trait]
impl VendorAdapter for GeminiAdapter {
    fn vendor(&self) -> Vendor {
        Vendor::Gemini
    }

    async fn generate(
        &self,
        transcript: &[Message],
        persona: Option<&str>,
    ) -> VendorResult<String> {
        let prompt = self.build_prompt(transcript, persona);
        let body = self.build_body(&prompt, true);
        self.post(body, self.generate_timeout).await
    }

    async fn complete_prompt(&self, prompt: &str) -> VendorResult<String> {
        let body = self.build_body(prompt, false);
        self.post(body, self.generate_timeout).await
    }

    async fn probe(&self) -> VendorResult<()> {
        let body = self.build_body("test", false);
        self.post(body, self.probe_timeout).await.map(|_| ())
    }
}

// Gemini API response types

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn adapter() -> GeminiAdapter {
        let settings = Settings::default();
        GeminiAdapter::new(&settings.vendors.gemini, &settings.timeouts)
    }

    #[test]
    fn prompt_without_prior_agent_reply() {
        let transcript = vec![Message::user("What is Rust?")];
        let prompt = adapter().build_prompt(&transcript, Some("a teacher"));

        assert!(prompt.contains("Your personality is: \"a teacher\"."));
        assert!(prompt.contains("User's question: What is Rust?"));
        assert!(prompt.contains("Other AI assistants may respond after you."));
        assert!(!prompt.contains("Previous AI"));
    }

    #[test]
    fn prompt_quotes_most_recent_agent_reply() {
        let transcript = vec![
            Message::user("What is Rust?"),
            Message::from_agent("Ava", "A systems language."),
            Message::from_agent("Kai", "With a borrow checker."),
            Message::user("Tell me more."),
        ];
        let prompt = adapter().build_prompt(&transcript, None);

        assert!(prompt.contains("Previous AI (Kai) said: \"With a borrow checker.\""));
        assert!(!prompt.contains("Previous AI (Ava)"));
        assert!(prompt.contains("User's question: Tell me more."));
        assert!(prompt.contains("agree, disagree, add to, or build upon"));
    }

    #[test]
    fn prompt_scan_includes_latest_message() {
        // On a continuation round the latest message may itself be an
        // agent reply; the scan still finds it.
        let transcript = vec![
            Message::user("Hi"),
            Message::from_agent("Ava", "Hello!"),
        ];
        let prompt = adapter().build_prompt(&transcript, None);
        assert!(prompt.contains("Previous AI (Ava) said: \"Hello!\""));
        assert!(prompt.contains("User's question: Hello!"));
    }

    #[test]
    fn system_messages_are_not_prior_agents() {
        let transcript = vec![Message::system("welcome"), Message::user("Hi")];
        let prompt = adapter().build_prompt(&transcript, None);
        assert!(!prompt.contains("Previous AI"));
    }

    #[test]
    fn generation_body_omits_config_by_default() {
        let body = adapter().build_body("hello", true);
        assert!(body.get("generationConfig").is_none());
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn generation_config_sent_when_configured() {
        let settings = Settings::default();
        let mut config = settings.vendors.gemini.clone();
        config.max_tokens = Some(128);
        config.temperature = Some(0.4);
        let adapter = GeminiAdapter::new(&config, &settings.timeouts);

        let body = adapter.build_body("hello", true);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 128);
        assert_eq!(body["generationConfig"]["temperature"], 0.4);
    }

    #[tokio::test]
    async fn missing_key_fails_fast_without_network() {
        let settings = Settings::default();
        let mut config = settings.vendors.gemini.clone();
        config.api_key_env = "AGORA_TEST_UNSET_GOOGLE_KEY".to_string();
        let adapter = GeminiAdapter::new(&config, &settings.timeouts);

        let err = adapter.complete_prompt("summarize").await.unwrap_err();
        assert!(matches!(err, VendorError::Authentication(_)));
    }
}

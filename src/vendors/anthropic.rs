//! Anthropic Claude vendor adapter

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::env;
use std::time::Duration;

use super::{chat_role, VendorAdapter, VendorError, VendorResult};
use crate::config::{TimeoutSettings, VendorSettings};
use crate::domain::{Message, Vendor};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic messages API adapter.
///
/// Receives the full transcript like the OpenAI adapter, but the multi-AI
/// instruction travels as a leading `user`-role message rather than the
/// system parameter.
pub struct AnthropicAdapter {
    client: reqwest::Client,
    api_key: Option<String>,
    api_key_env: String,
    base_url: String,
    model: String,
    max_tokens: Option<u32>,
    generate_timeout: Duration,
    probe_timeout: Duration,
}

impl AnthropicAdapter {
    pub fn new(config: &VendorSettings, timeouts: &TimeoutSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: env::var(&config.api_key_env).ok(),
            api_key_env: config.api_key_env.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| "https://api.anthropic.com".to_string()),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
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

    /// Build the messages API request body for a multi-party turn.
    fn build_chat_body(&self, transcript: &[Message], persona: Option<&str>) -> Value {
        let mut messages = vec![json!({
            "role": "user",
            "content": chat_instruction(persona),
        })];
        messages.extend(transcript.iter().map(|m| {
            json!({
                "role": chat_role(&m.sender),
                "content": m.text,
            })
        }));

        json!({
            "model": self.model,
            "max_tokens": self.max_tokens.unwrap_or(200),
            "messages": messages,
        })
    }

    async fn post(&self, body: Value, timeout: Duration) -> VendorResult<String> {
        let api_key = self.api_key()?;
        tracing::debug!("Claude request body: {}", body);

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .timeout(timeout)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(VendorError::from_status(status.as_u16(), text));
        }

        let parsed: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| VendorError::Parse(format!("Failed to parse response: {}", e)))?;

        let text = parsed
            .content
            .into_iter()
            .find_map(|block| block.text)
            .filter(|t| !t.is_empty())
            .ok_or(VendorError::EmptyResponse)?;

        tracing::debug!("Claude response: {}", text);
        Ok(text)
    }
}

#[async_trait]
impl VendorAdapter for AnthropicAdapter {
    fn vendor(&self) -> Vendor {
        Vendor::Claude
    }

    async fn generate(
        &self,
        transcript: &[Message],
        persona: Option<&str>,
    ) -> VendorResult<String> {
        let body = self.build_chat_body(transcript, persona);
        self.post(body, self.generate_timeout).await
    }

    async fn complete_prompt(&self, prompt: &str) -> VendorResult<String> {
        // The messages API requires an explicit token budget even for
        // one-shot completions.
        let body = json!({
            "model": self.model,
            "max_tokens": 1024,
            "messages": [{ "role": "user", "content": prompt }],
        });
        self.post(body, self.generate_timeout).await
    }

    async fn probe(&self) -> VendorResult<()> {
        let body = json!({
            "model": self.model,
            "max_tokens": 5,
            "messages": [{ "role": "user", "content": "test" }],
        });
        self.post(body, self.probe_timeout).await.map(|_| ())
    }
}

fn chat_instruction(persona: Option<&str>) -> String {
    let persona_clause = persona
        .map(|p| format!(" Your personality is: \"{}\".", p))
        .unwrap_or_default();
    format!(
        "You are participating in a multi-AI conversation.{} You will see responses \
         from previous AI assistants. Please respond naturally to the user's question \
         while also engaging with what the previous AI(s) said. Keep your response to \
         about 1 paragraph.",
        persona_clause
    )
}

// Anthropic API response types

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<AnthropicContentBlock>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContentBlock {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn adapter() -> AnthropicAdapter {
        let settings = Settings::default();
        AnthropicAdapter::new(&settings.vendors.claude, &settings.timeouts)
    }

    #[test]
    fn instruction_rides_in_leading_user_message() {
        let transcript = vec![Message::user("Hi")];
        let body = adapter().build_chat_body(&transcript, Some("a poet"));

        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "user");
        let instruction = messages[0]["content"].as_str().unwrap();
        assert!(instruction.contains("Your personality is: \"a poet\"."));
        assert!(instruction.contains("You will see responses from previous AI assistants."));
        // No system parameter in this design
        assert!(body.get("system").is_none());
    }

    #[test]
    fn chat_body_sends_max_tokens() {
        let body = adapter().build_chat_body(&[Message::user("Hi")], None);
        assert_eq!(body["model"], "claude-3-haiku-20240307");
        assert_eq!(body["max_tokens"], 200);
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn transcript_roles_follow_sender() {
        let transcript = vec![
            Message::user("Hi"),
            Message::from_agent("Ava", "Hello"),
            Message::user("And you?"),
        ];
        let body = adapter().build_chat_body(&transcript, None);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[2]["role"], "assistant");
        assert_eq!(messages[3]["role"], "user");
    }

    #[tokio::test]
    async fn missing_key_fails_fast_without_network() {
        let settings = Settings::default();
        let mut config = settings.vendors.claude.clone();
        config.api_key_env = "AGORA_TEST_UNSET_ANTHROPIC_KEY".to_string();
        let adapter = AnthropicAdapter::new(&config, &settings.timeouts);

        let err = adapter.probe().await.unwrap_err();
        assert!(matches!(err, VendorError::Authentication(_)));
    }
}

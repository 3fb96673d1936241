//! OpenAI vendor adapter

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::env;
use std::time::Duration;

use super::{chat_role, VendorAdapter, VendorError, VendorResult};
use crate::config::{TimeoutSettings, VendorSettings};
use crate::domain::{Message, Vendor};

/// OpenAI chat completions adapter.
///
/// Receives the full transcript: the multi-AI instruction travels as a
/// `system` message, followed by every transcript message in role
/// vocabulary.
pub struct OpenAiAdapter {
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

impl OpenAiAdapter {
    /// Build an adapter from configuration. A missing API key does not
    /// fail construction; calls fail fast with the authentication error.
    pub fn new(config: &VendorSettings, timeouts: &TimeoutSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: env::var(&config.api_key_env).ok(),
            api_key_env: config.api_key_env.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
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

    /// Build the chat completions request body for a multi-party turn.
    fn build_chat_body(&self, transcript: &[Message], persona: Option<&str>) -> Value {
        let mut messages = vec![json!({
            "role": "system",
            "content": chat_instruction(persona),
        })];
        messages.extend(transcript.iter().map(|m| {
            json!({
                "role": chat_role(&m.sender),
                "content": m.text,
            })
        }));

        let mut body = json!({
            "model": self.model,
            "messages": messages,
        });
        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        if let Some(temperature) = self.temperature {
            body["temperature"] = json!(temperature);
        }
        body
    }

    async fn post(&self, body: Value, timeout: Duration) -> VendorResult<String> {
        let api_key = self.api_key()?;
        tracing::debug!("OpenAI request body: {}", body);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .timeout(timeout)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(VendorError::from_status(status.as_u16(), text));
        }

        let parsed: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| VendorError::Parse(format!("Failed to parse response: {}", e)))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|t| !t.is_empty())
            .ok_or(VendorError::EmptyResponse)?;

        tracing::debug!("OpenAI response: {}", text);
        Ok(text)
    }
}

#[async_trait]
impl VendorAdapter for OpenAiAdapter {
    fn vendor(&self) -> Vendor {
        Vendor::ChatGpt
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
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
        });
        self.post(body, self.generate_timeout).await
    }

    async fn probe(&self) -> VendorResult<()> {
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": "test" }],
            "max_tokens": 5,
        });
        self.post(body, self.probe_timeout).await.map(|_| ())
    }
}

fn chat_instruction(persona: Option<&str>) -> String {
    let persona_clause = persona
        .map(|p| format!(" Your personality is: \"{}\".", p))
        .unwrap_or_default();
    format!(
        "You are participating in a multi-AI conversation.{} Please respond naturally \
         to the user's question while also engaging with what the previous AI(s) said. \
         Keep your response to about 1 paragraph. You can agree, disagree, add to, or \
         build upon the previous AI responses.",
        persona_clause
    )
}

// OpenAI API response types

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn adapter() -> OpenAiAdapter {
        let settings = Settings::default();
        OpenAiAdapter::new(&settings.vendors.chatgpt, &settings.timeouts)
    }

    #[test]
    fn chat_body_carries_system_instruction_and_roles() {
        let transcript = vec![
            Message::user("Hi"),
            Message::from_agent("Ava", "Hello there"),
        ];
        let body = adapter().build_chat_body(&transcript, Some("a skeptic"));

        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0]["role"], "system");
        let instruction = messages[0]["content"].as_str().unwrap();
        assert!(instruction.contains("Your personality is: \"a skeptic\"."));
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "Hi");
        assert_eq!(messages[2]["role"], "assistant");
        assert_eq!(messages[2]["content"], "Hello there");
    }

    #[test]
    fn chat_body_sends_tuning_defaults() {
        let body = adapter().build_chat_body(&[Message::user("Hi")], None);
        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["max_tokens"], 200);
        assert_eq!(body["temperature"], 0.7);
    }

    #[test]
    fn instruction_omits_persona_clause_when_absent() {
        let body = adapter().build_chat_body(&[Message::user("Hi")], None);
        let instruction = body["messages"][0]["content"].as_str().unwrap();
        assert!(!instruction.contains("personality"));
        assert!(instruction.starts_with("You are participating in a multi-AI conversation."));
    }

    #[test]
    fn system_sender_maps_to_assistant_role() {
        let transcript = vec![Message::system("welcome"), Message::user("Hi")];
        let body = adapter().build_chat_body(&transcript, None);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages[1]["role"], "assistant");
        assert_eq!(messages[2]["role"], "user");
    }

    #[tokio::test]
    async fn missing_key_fails_fast_without_network() {
        let settings = Settings::default();
        let mut config = settings.vendors.chatgpt.clone();
        config.api_key_env = "AGORA_TEST_UNSET_OPENAI_KEY".to_string();
        let adapter = OpenAiAdapter::new(&config, &settings.timeouts);

        let err = adapter.generate(&[Message::user("Hi")], None).await.unwrap_err();
        assert!(matches!(err, VendorError::Authentication(_)));
    }
}

//! Vendor adapters
//!
//! Each adapter normalizes one LLM provider's API into the uniform
//! generate-text capability the orchestrator consumes. The three providers
//! share the contract but deliberately differ in prompt construction:
//! OpenAI and Claude receive the full transcript in role vocabulary, Gemini
//! receives a single hand-rolled prompt built around the latest user
//! message and the most recent prior agent reply.

mod anthropic;
mod error;
mod gemini;
mod openai;

pub use anthropic::AnthropicAdapter;
pub use error::{VendorError, VendorResult};
pub use gemini::GeminiAdapter;
pub use openai::OpenAiAdapter;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::Settings;
use crate::domain::{Message, Sender, Vendor};

/// Uniform generation capability over one LLM provider.
#[async_trait]
pub trait VendorAdapter: Send + Sync {
    /// Which vendor this adapter reaches
    fn vendor(&self) -> Vendor;

    /// One multi-party chat turn: transcript plus optional persona in,
    /// reply text out.
    async fn generate(
        &self,
        transcript: &[Message],
        persona: Option<&str>,
    ) -> VendorResult<String>;

    /// One-shot raw completion; the prompt is passed through unmodified in
    /// the vendor's minimal request shape. Used by the summarizer.
    async fn complete_prompt(&self, prompt: &str) -> VendorResult<String>;

    /// Minimal, cheap availability check.
    async fn probe(&self) -> VendorResult<()>;
}

/// The multi-turn role vocabulary shared by the OpenAI and Claude adapters:
/// the user keeps the `user` role, every other sender (system and agent
/// messages alike) becomes `assistant`.
pub(crate) fn chat_role(sender: &Sender) -> &'static str {
    if sender.is_user() {
        "user"
    } else {
        "assistant"
    }
}

/// Closed mapping from [`Vendor`] to its adapter.
///
/// Lookup misses are the explicit unknown-vendor branch: the orchestrator
/// synthesizes a diagnostic reply instead of failing the round.
pub struct AdapterRegistry {
    adapters: HashMap<Vendor, Arc<dyn VendorAdapter>>,
}

impl AdapterRegistry {
    /// Build a registry from arbitrary adapters, keyed by their vendor.
    pub fn new(adapters: Vec<Arc<dyn VendorAdapter>>) -> Self {
        Self {
            adapters: adapters.into_iter().map(|a| (a.vendor(), a)).collect(),
        }
    }

    /// Build the production registry: one adapter per known vendor,
    /// configured from settings. Adapters with no API key available still
    /// construct; their calls fail fast with the authentication error.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(vec![
            Arc::new(OpenAiAdapter::new(&settings.vendors.chatgpt, &settings.timeouts)),
            Arc::new(GeminiAdapter::new(&settings.vendors.gemini, &settings.timeouts)),
            Arc::new(AnthropicAdapter::new(&settings.vendors.claude, &settings.timeouts)),
        ])
    }

    pub fn get(&self, vendor: &Vendor) -> Option<Arc<dyn VendorAdapter>> {
        self.adapters.get(vendor).cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Vendor, &Arc<dyn VendorAdapter>)> {
        self.adapters.iter()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

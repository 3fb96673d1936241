//! Turn orchestration
//!
//! The core of the server: runs one sequential multi-party round over an
//! ordered agent list. Each agent after the first responds in the context
//! of everyone before it, which is what makes cross-agent engagement
//! possible. Failures are contained per agent: a vendor error becomes that
//! agent's reply text and the round continues.

mod summarizer;

pub use summarizer::Summarizer;

use std::sync::Arc;
use thiserror::Error;

use crate::domain::{AgentReply, AgentSpec, Message};
use crate::vendors::{AdapterRegistry, VendorError};

/// Errors a round can surface to the caller. Everything vendor-side is
/// absorbed into reply text instead.
#[derive(Debug, Error)]
pub enum RoundError {
    /// The request carried no active agents; nothing was attempted
    #[error("No agents provided.")]
    NoAgents,
}

/// Runs orchestration rounds against a fixed adapter registry.
///
/// Holds no cross-request state: every round is a pure function of its
/// inputs, so concurrent rounds from different callers need no locking.
pub struct Orchestrator {
    registry: Arc<AdapterRegistry>,
}

impl Orchestrator {
    pub fn new(registry: Arc<AdapterRegistry>) -> Self {
        Self { registry }
    }

    /// Run one round: every active agent replies once, in list order, each
    /// seeing the transcript plus all replies produced earlier in this
    /// round.
    pub async fn run_round(
        &self,
        transcript: &[Message],
        agents: &[AgentSpec],
    ) -> Result<Vec<AgentReply>, RoundError> {
        let active: Vec<&AgentSpec> = agents.iter().filter(|a| a.active).collect();
        if active.is_empty() {
            return Err(RoundError::NoAgents);
        }

        let mut working = transcript.to_vec();
        let mut replies = Vec::with_capacity(active.len());

        for agent in active {
            tracing::info!("Calling agent: {} ({})", agent.name, agent.vendor);

            let text = match self.registry.get(&agent.vendor) {
                Some(adapter) => {
                    match adapter.generate(&working, agent.persona.as_deref()).await {
                        Ok(text) => text,
                        Err(err) => {
                            tracing::warn!(
                                "Agent '{}' degraded: {} call failed: {}",
                                agent.name,
                                agent.vendor,
                                err
                            );
                            degraded_reply(agent.vendor.display_name(), &err)
                        }
                    }
                }
                None => {
                    tracing::warn!("Unknown model: {}", agent.vendor);
                    format!(
                        "Error: Unknown model '{}' for agent '{}'.",
                        agent.vendor, agent.name
                    )
                }
            };

            let order = replies.len() as u32 + 1;
            replies.push(AgentReply {
                text: text.clone(),
                sender: agent.name.clone(),
                order,
            });
            working.push(Message::from_agent(agent.name.clone(), text));
        }

        Ok(replies)
    }

    /// Let the agents respond again to the existing transcript, without a
    /// fresh user message. Same round semantics as [`run_round`]; only the
    /// caller-side transcript preparation differs.
    ///
    /// [`run_round`]: Orchestrator::run_round
    pub async fn continue_round(
        &self,
        transcript: &[Message],
        agents: &[AgentSpec],
    ) -> Result<Vec<AgentReply>, RoundError> {
        tracing::info!("Continuing conversation without new user input");
        self.run_round(transcript, agents).await
    }
}

/// Render a vendor error as this agent's reply text, one rendering per
/// category, so the round always proceeds.
fn degraded_reply(vendor_name: &str, err: &VendorError) -> String {
    match err {
        VendorError::Authentication(_) => format!(
            "Authentication error with {} API. Please check your API key.",
            vendor_name
        ),
        VendorError::InvalidRequest(message) => {
            format!("Invalid request to {} API: {}", vendor_name, message)
        }
        VendorError::NotFound(_) => format!(
            "{} API endpoint not found. Please check the API URL or model name.",
            vendor_name
        ),
        VendorError::RateLimited => format!(
            "Rate limit exceeded for {} API. Please try again later.",
            vendor_name
        ),
        VendorError::Network(_) => {
            format!("Network error: Could not connect to {} API.", vendor_name)
        }
        VendorError::Timeout => format!(
            "Request timeout: {} API took too long to respond.",
            vendor_name
        ),
        VendorError::EmptyResponse => format!(
            "Sorry, I received an empty response from {}.",
            vendor_name
        ),
        VendorError::Parse(_) | VendorError::Api { .. } => {
            format!("Sorry, I encountered an error with {}: {}", vendor_name, err)
        }
    }
}

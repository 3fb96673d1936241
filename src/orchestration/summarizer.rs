//! Transcript summarization

use std::sync::Arc;

use crate::domain::Message;
use crate::vendors::VendorAdapter;

/// Returned without a vendor call when there is nothing to summarize.
pub const NO_MESSAGES_PLACEHOLDER: &str = "No messages to summarize";

/// Returned whenever summarization cannot produce real output.
pub const FAILURE_PLACEHOLDER: &str = "Failed to generate summary";

/// Stateless reduction of a transcript into a short synopsis.
///
/// Bound to one designated vendor adapter at construction; the choice is a
/// server setting, never per call. Infallible from the caller's view:
/// every failure path degrades to a fixed string.
pub struct Summarizer {
    adapter: Option<Arc<dyn VendorAdapter>>,
}

impl Summarizer {
    /// `adapter` is `None` when the configured summary vendor is unknown;
    /// summarization then always degrades.
    pub fn new(adapter: Option<Arc<dyn VendorAdapter>>) -> Self {
        if adapter.is_none() {
            tracing::warn!("Summary vendor not available; summaries will degrade");
        }
        Self { adapter }
    }

    pub async fn summarize(&self, transcript: &[Message]) -> String {
        let spoken: Vec<&Message> = transcript.iter().filter(|m| !m.sender.is_system()).collect();
        if spoken.len() < 2 {
            return NO_MESSAGES_PLACEHOLDER.to_string();
        }

        let adapter = match &self.adapter {
            Some(adapter) => adapter,
            None => return FAILURE_PLACEHOLDER.to_string(),
        };

        let conversation = spoken
            .iter()
            .map(|m| format!("{}: {}", m.sender, m.text))
            .collect::<Vec<_>>()
            .join("\n\n");
        let prompt = summary_prompt(&conversation);

        match adapter.complete_prompt(&prompt).await {
            Ok(summary) if !summary.is_empty() => summary,
            Ok(_) => {
                tracing::error!("Summarization returned empty output");
                FAILURE_PLACEHOLDER.to_string()
            }
            Err(err) => {
                tracing::error!("Summarization error: {}", err);
                FAILURE_PLACEHOLDER.to_string()
            }
        }
    }
}

fn summary_prompt(conversation: &str) -> String {
    format!(
        "Please provide a concise summary of this multi-AI conversation. Focus on \
         the main topics discussed, key insights shared by the different AI \
         assistants, and any conclusions reached. Keep the summary to 2-3 sentences \
         maximum.\n\nConversation:\n{}\n\nSummary:",
        conversation
    )
}

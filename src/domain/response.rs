//! Per-round agent replies

use serde::{Deserialize, Serialize};

/// One agent's reply within an orchestration round.
///
/// Returned to the caller with its 1-based position; also appended to the
/// working transcript as an ordinary [`Message`](super::Message) so later
/// agents in the same round see it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentReply {
    /// Generated (or degraded fallback) text
    pub text: String,
    /// The agent's display name
    pub sender: String,
    /// 1-based position within this round
    pub order: u32,
}

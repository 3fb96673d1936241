//! Core conversation types shared between the HTTP layer, the vendor
//! adapters, and the turn orchestrator.

mod agent;
mod message;
mod response;
mod vendor;

pub use agent::AgentSpec;
pub use message::{Message, Sender};
pub use response::AgentReply;
pub use vendor::Vendor;

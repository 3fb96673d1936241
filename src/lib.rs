//! # Agora - Multi-Agent Chat Orchestration Server
//!
//! Agora lets a user converse with several externally hosted language-model
//! APIs (OpenAI, Google Gemini, Anthropic Claude) in a single chat thread.
//! Each configured agent replies in sequence, and every later agent sees
//! the replies produced earlier in the same round.
//!
//! ## Features
//!
//! - **Sequential rounds**: one reply per active agent, in list order, each
//!   building on the round so far
//! - **Vendor adapters**: OpenAI, Gemini, and Claude behind one
//!   generate-text contract
//! - **Graceful degradation**: vendor failures become reply text, never
//!   aborted rounds
//! - **Health probes**: concurrent per-vendor availability checks
//! - **Summarization**: short transcript synopses via a designated vendor
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use agora::config::Settings;
//! use agora::vendors::AdapterRegistry;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::new()?;
//!     let registry = Arc::new(AdapterRegistry::from_settings(&settings));
//!     let app = agora::create_app(registry, settings.summary.vendor.clone());
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3001").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod health;
pub mod orchestration;
pub mod vendors;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::adapters::api_handler::{self, ApiState};
use crate::domain::Vendor;
use crate::health::HealthProber;
use crate::orchestration::{Orchestrator, Summarizer};
use crate::vendors::AdapterRegistry;

/// Creates the Axum application router with all endpoints configured.
///
/// CORS is permissive: the browser client is served from elsewhere.
///
/// # Arguments
///
/// * `registry` - Vendor adapters, one per reachable vendor
/// * `summary_vendor` - Which vendor answers `/summarize` requests
pub fn create_app(registry: Arc<AdapterRegistry>, summary_vendor: Vendor) -> Router {
    let state = ApiState {
        orchestrator: Arc::new(Orchestrator::new(registry.clone())),
        summarizer: Arc::new(Summarizer::new(registry.get(&summary_vendor))),
        prober: Arc::new(HealthProber::new(registry)),
    };

    Router::new()
        .route("/chat", post(api_handler::chat))
        .route("/continue", post(api_handler::continue_chat))
        .route("/summarize", post(api_handler::summarize))
        .route("/health", get(api_handler::health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

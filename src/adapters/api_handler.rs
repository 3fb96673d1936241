//! REST handlers for the chat orchestration API

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::{AgentReply, AgentSpec, Message};
use crate::health::HealthProber;
use crate::orchestration::{Orchestrator, RoundError, Summarizer};

/// Shared state for the REST endpoints. Everything inside is stateless
/// across requests; the Arcs exist only to share the adapter registry.
#[derive(Clone)]
pub struct ApiState {
    pub orchestrator: Arc<Orchestrator>,
    pub summarizer: Arc<Summarizer>,
    pub prober: Arc<HealthProber>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub agents: Vec<AgentSpec>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub responses: Vec<AgentReply>,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

/// `POST /chat`: run one round over the submitted transcript and agents.
pub async fn chat(
    State(state): State<ApiState>,
    Json(request): Json<ChatRequest>,
) -> Response {
    round_response(
        state
            .orchestrator
            .run_round(&request.messages, &request.agents)
            .await,
    )
}

/// `POST /continue`: same round semantics, used when no new user message
/// was appended.
pub async fn continue_chat(
    State(state): State<ApiState>,
    Json(request): Json<ChatRequest>,
) -> Response {
    round_response(
        state
            .orchestrator
            .continue_round(&request.messages, &request.agents)
            .await,
    )
}

fn round_response(result: Result<Vec<AgentReply>, RoundError>) -> Response {
    match result {
        Ok(responses) => (StatusCode::OK, Json(ChatResponse { responses })).into_response(),
        Err(err @ RoundError::NoAgents) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": err.to_string() })),
        )
            .into_response(),
    }
}

/// `POST /summarize`: never an error status; degraded summaries are
/// ordinary 200 bodies.
pub async fn summarize(
    State(state): State<ApiState>,
    Json(request): Json<SummarizeRequest>,
) -> Json<SummarizeResponse> {
    let summary = state.summarizer.summarize(&request.messages).await;
    Json(SummarizeResponse { summary })
}

/// `GET /health`: availability of every known vendor.
pub async fn health(State(state): State<ApiState>) -> Response {
    let statuses = state.prober.probe_all().await;
    (StatusCode::OK, Json(statuses)).into_response()
}

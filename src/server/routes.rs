//! HTTP route handlers for the demo chat server.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::debug;

use crate::backend::demo::random_reply;
use crate::backend::{ChatReply, ChatRequest};

use super::state::ServerState;

/// Create the router with all routes.
pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/status", get(status))
        .route("/chat", post(chat))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "clonechat-server",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Counters endpoint.
async fn status(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "running",
        "requests_served": state.requests_served()
    }))
}

/// Answer a chat message with a demo phrase.
async fn chat(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, (StatusCode, String)> {
    if request.message.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "message must not be empty".to_string()));
    }

    let served = state.record_request();
    debug!(
        "Chat request #{} ({} chars, persona {:?})",
        served,
        request.message.chars().count(),
        request.user_type
    );

    Ok(Json(ChatReply {
        response: random_reply(),
    }))
}

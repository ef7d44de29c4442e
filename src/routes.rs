// src/routes.rs

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::{commands, state::AppState};

/// One inbound chat message as delivered by the transport binding.
#[derive(Debug, Deserialize)]
pub struct InboundMessage {
    /// Display identity of the sender, as reported by the transport.
    pub sender: String,
    pub text: String,
}

/// Assembles the application router.
///
/// The chat transport is a collaborator, not part of this service: whatever
/// delivers messages (a Telegram webhook relay, a test client) POSTs them
/// here and forwards the plain-text reply body back to the chat. An empty
/// body means the message produced no reply.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/message", post(receive_message))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn receive_message(
    State(state): State<AppState>,
    Json(payload): Json<InboundMessage>,
) -> String {
    commands::handle_message(&state, &payload.sender, &payload.text)
        .await
        .unwrap_or_default()
}

//! Skill request handlers

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use bytes::Bytes;
use serde_json::{Value, json};
use tracing::{debug, info};

use super::is_blank;
use crate::errors::app_error::AppResult;
use crate::relay::{InboundEnvelope, OutboundEnvelope};
use crate::state::AppState;

/// Voice-assistant skill endpoint
///
/// Always answers HTTP 200 with a response envelope. The body is read as raw
/// bytes so a malformed request degrades to an "unrecognized" utterance
/// instead of an extractor rejection.
pub async fn skill_request(State(state): State<Arc<AppState>>, body: Bytes) -> Json<OutboundEnvelope> {
    debug!(body = %String::from_utf8_lossy(&body), "Skill request body");

    let envelope = InboundEnvelope::from_slice(&body);
    Json(state.relay.respond(&envelope).await)
}

/// Sample request used by the test endpoint when no body is given
pub fn sample_intent_request() -> Value {
    json!({
        "version": "1.0",
        "session": {
            "new": true,
            "sessionId": "test-session-123",
            "user": { "userId": "test-user-123" }
        },
        "request": {
            "type": "IntentRequest",
            "requestId": "test-request-123",
            "locale": "pt-BR",
            "timestamp": "2025-09-12T18:00:00Z",
            "intent": {
                "name": "HelloWorldIntent",
                "slots": {
                    "message": { "value": "Hello, how are you?" }
                }
            }
        }
    })
}

/// Run a request (or the built-in sample) through the full relay path
///
/// Unlike `/alexa`, a failed delivery is reported as HTTP 500 rather than
/// masked by the apology envelope.
pub async fn test_skill_request(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let raw = if body.iter().all(u8::is_ascii_whitespace) {
        sample_intent_request()
    } else {
        match serde_json::from_slice::<Value>(&body)? {
            raw if is_blank(&raw) => sample_intent_request(),
            raw => raw,
        }
    };

    info!("Running test skill request through the relay");
    let envelope = InboundEnvelope::from_value(raw);
    let response = state.relay.try_respond(&envelope).await?;

    Ok(Json(json!({
        "status": "success",
        "alexa_response": response,
    })))
}

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use bytes::Bytes;
use serde_json::{Value, json};
use tracing::warn;

use super::is_blank;
use crate::errors::app_error::{AppError, AppResult};
use crate::state::AppState;

pub const TEST_EVENT_TYPE: &str = "test_event";

fn default_event_data() -> Value {
    json!({ "message": "Alexa skill test event" })
}

/// Forward a test event to the workflow
///
/// A blank (`{}`, `null`, empty) or non-JSON body sends a default message instead.
pub async fn send_test_event(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let data = match serde_json::from_slice::<Value>(&body) {
        Ok(data) if !is_blank(&data) => data,
        Ok(_) => default_event_data(),
        Err(_) => {
            if !body.iter().all(u8::is_ascii_whitespace) {
                warn!("Test event body is not JSON, sending default event data");
            }
            default_event_data()
        }
    };

    let result = state
        .relay
        .endpoint()
        .send_custom_event(TEST_EVENT_TYPE, data)
        .await
        .ok_or(AppError::EventDeliveryFailed)?;

    Ok(Json(json!({ "status": "success", "result": result })))
}

//! Liveness and workflow status endpoints

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::relay::payload::utc_timestamp;
use crate::state::AppState;

pub const SERVICE_NAME: &str = "alexa-skill";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Serialize)]
pub struct WorkflowStatusResponse {
    pub n8n_integration: &'static str,
    pub webhook_url: String,
    pub timestamp: String,
}

/// Plain-text banner at `/`
pub async fn root() -> &'static str {
    "Alexa Skill Backend is running!"
}

/// Service liveness; does not touch the workflow
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
    })
}

/// Probe the workflow webhook and report whether it answered
pub async fn workflow_status(State(state): State<Arc<AppState>>) -> Json<WorkflowStatusResponse> {
    let endpoint = state.relay.endpoint();
    let healthy = endpoint.health_check().await;

    Json(WorkflowStatusResponse {
        n8n_integration: if healthy { "healthy" } else { "unhealthy" },
        webhook_url: endpoint.webhook_url().to_string(),
        timestamp: utc_timestamp(),
    })
}

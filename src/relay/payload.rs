//! Bodies POSTed to the workflow webhook

use serde::Serialize;
use serde_json::{Value, json};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

use super::config::Markers;
use super::envelope::InboundEnvelope;
use super::extractor::{SessionContext, extract_utterance, session_context};

/// Current UTC time as RFC 3339
pub fn utc_timestamp() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

/// Relay payload for one inbound request
#[derive(Debug, Serialize)]
pub struct DeliveryPayload<'a> {
    pub action: &'static str,
    pub user_input: String,
    pub context: SessionContext,
    pub timestamp: String,
    pub request_id: String,
    /// Inbound request as received, for tracing on the workflow side
    pub alexa_request: &'a Value,
}

impl<'a> DeliveryPayload<'a> {
    pub const ACTION: &'static str = "get_response";

    pub fn new(envelope: &'a InboundEnvelope, markers: &Markers) -> Self {
        Self {
            action: Self::ACTION,
            user_input: extract_utterance(envelope, markers),
            context: session_context(envelope),
            timestamp: utc_timestamp(),
            request_id: Uuid::new_v4().to_string(),
            alexa_request: envelope.raw(),
        }
    }
}

/// Auxiliary event, outside the request/response path
#[derive(Debug, Serialize)]
pub struct EventPayload<'a> {
    pub action: &'static str,
    pub event_type: &'a str,
    pub data: &'a Value,
    pub timestamp: String,
}

impl<'a> EventPayload<'a> {
    pub const ACTION: &'static str = "custom_event";

    pub fn new(event_type: &'a str, data: &'a Value) -> Self {
        Self {
            action: Self::ACTION,
            event_type,
            data,
            timestamp: utc_timestamp(),
        }
    }
}

pub fn health_probe() -> Value {
    json!({ "action": "health_check" })
}

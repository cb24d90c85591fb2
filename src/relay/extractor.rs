//! Utterance and session extraction from inbound envelopes
//!
//! Intent requests are read in this order:
//! 1. the free-text slot ([`FREE_TEXT_SLOT`]) when it has a non-empty value
//! 2. every other non-empty slot value, joined by spaces in slot-name order
//! 3. the intent name
//!
//! Requests that carry no speech map to the configured [`Markers`].

use serde::Serialize;
use tracing::warn;

use super::config::Markers;
use super::envelope::{InboundEnvelope, RequestKind};

/// Slot the interaction model uses to capture free-form speech
pub const FREE_TEXT_SLOT: &str = "userText";

/// Session metadata forwarded with every delivery
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionContext {
    pub session_id: Option<String>,
    pub user_id: Option<String>,
    pub locale: Option<String>,
}

/// Best-effort utterance for `envelope`. Never fails.
pub fn extract_utterance(envelope: &InboundEnvelope, markers: &Markers) -> String {
    match envelope.kind {
        RequestKind::Launch => markers.start_conversation.clone(),
        RequestKind::SessionEnded => markers.end_conversation.clone(),
        RequestKind::Intent => intent_utterance(envelope).unwrap_or_else(|| {
            warn!("Intent request carried neither slot values nor an intent name");
            markers.unrecognized.clone()
        }),
        RequestKind::Unknown => {
            warn!(raw = %envelope.raw(), "Unrecognized request type");
            markers.unrecognized.clone()
        }
    }
}

fn intent_utterance(envelope: &InboundEnvelope) -> Option<String> {
    if let Some(text) = envelope
        .slot_value(FREE_TEXT_SLOT)
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        return Some(text.to_string());
    }

    let joined = envelope
        .slots
        .values()
        .filter_map(|v| v.as_deref().map(str::trim))
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if !joined.is_empty() {
        return Some(joined);
    }

    envelope
        .intent_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

pub fn session_context(envelope: &InboundEnvelope) -> SessionContext {
    SessionContext {
        session_id: envelope.session_id.clone(),
        user_id: envelope.user_id.clone(),
        locale: envelope.locale.clone(),
    }
}

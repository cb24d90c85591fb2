//! Skill request relay
//!
//! Inbound envelope → [`IntentRouter`] (local answers for built-in intents) →
//! [`WorkflowEndpoint::deliver`] → outbound envelope. Every inbound request
//! produces exactly one outbound envelope.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod extractor;
pub mod intents;
pub mod payload;
pub mod reply;

use std::sync::Arc;

use tracing::info;

pub use client::{DeliveryClient, WorkflowEndpoint};
pub use config::{Markers, RelayConfig, SpeechTexts};
pub use envelope::{InboundEnvelope, OutboundEnvelope, RequestKind};
pub use error::{DeliveryError, DeliveryResult};
pub use extractor::{FREE_TEXT_SLOT, SessionContext, extract_utterance, session_context};
pub use intents::{IntentAction, IntentRouter, Route};
pub use reply::WorkflowReply;

/// Router plus workflow endpoint, shared by all request handlers
#[derive(Clone)]
pub struct SkillRelay {
    router: IntentRouter,
    endpoint: Arc<dyn WorkflowEndpoint>,
}

impl SkillRelay {
    pub fn new(router: IntentRouter, endpoint: Arc<dyn WorkflowEndpoint>) -> Self {
        Self { router, endpoint }
    }

    pub fn endpoint(&self) -> &Arc<dyn WorkflowEndpoint> {
        &self.endpoint
    }

    pub fn router(&self) -> &IntentRouter {
        &self.router
    }

    /// Produce the response envelope for one inbound request
    pub async fn respond(&self, envelope: &InboundEnvelope) -> OutboundEnvelope {
        info!(
            kind = %envelope.kind,
            intent = envelope.intent_name.as_deref().unwrap_or(""),
            session_id = envelope.session_id.as_deref().unwrap_or(""),
            "Skill request received"
        );

        match self.router.route(envelope) {
            Route::Respond(local) => local,
            Route::Forward => self.endpoint.deliver(envelope).await,
        }
    }

    /// Like [`respond`](Self::respond), but a failed delivery is returned
    /// instead of being replaced by the apology
    pub async fn try_respond(&self, envelope: &InboundEnvelope) -> DeliveryResult<OutboundEnvelope> {
        match self.router.route(envelope) {
            Route::Respond(local) => Ok(local),
            Route::Forward => self.endpoint.try_deliver(envelope).await,
        }
    }
}

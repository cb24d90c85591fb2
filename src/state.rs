//! Shared application state

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::relay::{DeliveryClient, DeliveryResult, SkillRelay, WorkflowEndpoint};

/// State handed to every handler
///
/// Holds only immutable configuration and the relay, so concurrent requests
/// share it without coordination.
pub struct AppState {
    pub config: ServerConfig,
    pub relay: SkillRelay,
}

impl AppState {
    /// State backed by the HTTP delivery client for the configured webhook
    pub fn new(config: ServerConfig) -> DeliveryResult<Arc<Self>> {
        let client = DeliveryClient::new(config.relay_config())?;
        Ok(Self::with_endpoint(config, Arc::new(client)))
    }

    /// State backed by any workflow endpoint
    pub fn with_endpoint(config: ServerConfig, endpoint: Arc<dyn WorkflowEndpoint>) -> Arc<Self> {
        let relay = SkillRelay::new(config.intent_router(), endpoint);
        Arc::new(Self { config, relay })
    }
}

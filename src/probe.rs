//! One-shot workflow probe behind the `skill-relay probe` CLI command.
//!
//! Sends the same health probe as `GET /n8n-status` without starting the
//! server, which makes it usable as a container readiness check:
//!
//! ```text
//! $ N8N_WEBHOOK_URL=https://n8n.example.com/webhook/skill skill-relay probe
//! ```

use anyhow::{Result, anyhow};

use crate::config::ServerConfig;
use crate::relay::{DeliveryClient, WorkflowEndpoint};

/// Probe the configured webhook; errors when it is not healthy.
pub async fn run(config: &ServerConfig) -> Result<()> {
    let client = DeliveryClient::new(config.relay_config())?;

    tracing::info!(url = %client.webhook_url(), "Probing workflow webhook");

    if client.health_check().await {
        println!("n8n_integration: healthy ({})", client.webhook_url());
        Ok(())
    } else {
        Err(anyhow!(
            "n8n_integration: unhealthy ({})",
            client.webhook_url()
        ))
    }
}

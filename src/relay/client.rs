//! Workflow webhook delivery client

use std::time::Duration;

use async_trait::async_trait;
use http::{StatusCode, header::CONTENT_TYPE};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, error, info, warn};

use super::config::RelayConfig;
use super::envelope::{InboundEnvelope, OutboundEnvelope};
use super::error::{DeliveryError, DeliveryResult};
use super::payload::{DeliveryPayload, EventPayload, health_probe};
use super::reply::WorkflowReply;

/// The workflow side of the relay
///
/// Apart from [`try_deliver`](Self::try_deliver), none of these operations fail
/// from the caller's point of view; failures are logged and folded into the
/// return value.
#[async_trait]
pub trait WorkflowEndpoint: Send + Sync {
    /// URL requests are delivered to
    fn webhook_url(&self) -> &str;

    /// Forward one skill request; the error says why no reply was usable
    async fn try_deliver(&self, envelope: &InboundEnvelope) -> DeliveryResult<OutboundEnvelope>;

    /// Forward one skill request and map the reply (or failure) to an envelope
    async fn deliver(&self, envelope: &InboundEnvelope) -> OutboundEnvelope;

    /// Whether the workflow answers a probe with HTTP 200
    async fn health_check(&self) -> bool;

    /// Post an auxiliary event; `None` when it could not be delivered
    async fn send_custom_event(&self, event_type: &str, data: Value) -> Option<Value>;
}

/// HTTP delivery to a workflow webhook
pub struct DeliveryClient {
    config: RelayConfig,
    client: reqwest::Client,
}

impl DeliveryClient {
    pub fn new(config: RelayConfig) -> DeliveryResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DeliveryError::ClientBuild(e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Envelope spoken when the workflow cannot produce an answer
    pub fn apology(&self) -> OutboundEnvelope {
        OutboundEnvelope::speak(self.config.speech.apology.clone())
            .with_reprompt(self.config.speech.apology_reprompt.clone())
    }

    /// Send the relay payload and classify the reply
    pub async fn fetch_reply(&self, payload: &DeliveryPayload<'_>) -> DeliveryResult<WorkflowReply> {
        info!(
            request_id = %payload.request_id,
            url = %self.config.webhook_url,
            "Forwarding request to workflow"
        );
        if tracing::enabled!(tracing::Level::DEBUG) {
            debug!(
                request_id = %payload.request_id,
                payload = %serde_json::to_string(payload).unwrap_or_default(),
                "Workflow payload"
            );
        }

        let response = self.post(payload, self.config.timeout).await?;
        info!(
            request_id = %payload.request_id,
            status = %response.status(),
            "Workflow replied"
        );

        let body = self.read_json(response, self.config.timeout).await?;
        debug!(request_id = %payload.request_id, body = %body, "Workflow reply body");

        Ok(WorkflowReply::classify(body))
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        body: &T,
        timeout: Duration,
    ) -> DeliveryResult<reqwest::Response> {
        self.client
            .post(&self.config.webhook_url)
            .timeout(timeout)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| self.request_error(e, timeout))
    }

    async fn read_json(
        &self,
        response: reqwest::Response,
        timeout: Duration,
    ) -> DeliveryResult<Value> {
        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Status {
                url: self.config.webhook_url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.request_error(e, timeout))?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(DeliveryError::EmptyBody {
                url: self.config.webhook_url.clone(),
            });
        }

        serde_json::from_slice(&body).map_err(|e| DeliveryError::InvalidBody {
            url: self.config.webhook_url.clone(),
            error: e.to_string(),
        })
    }

    fn request_error(&self, e: reqwest::Error, timeout: Duration) -> DeliveryError {
        if e.is_timeout() {
            DeliveryError::Timeout {
                url: self.config.webhook_url.clone(),
                timeout_secs: timeout.as_secs(),
            }
        } else {
            DeliveryError::Transport {
                url: self.config.webhook_url.clone(),
                error: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl WorkflowEndpoint for DeliveryClient {
    fn webhook_url(&self) -> &str {
        &self.config.webhook_url
    }

    async fn try_deliver(&self, envelope: &InboundEnvelope) -> DeliveryResult<OutboundEnvelope> {
        let payload = DeliveryPayload::new(envelope, &self.config.markers);

        match self.fetch_reply(&payload).await {
            Ok(reply) => Ok(reply.into_envelope(&self.config.speech)),
            Err(e) => {
                error!(
                    request_id = %payload.request_id,
                    kind = %envelope.kind,
                    error = %e,
                    "Workflow delivery failed"
                );
                Err(e)
            }
        }
    }

    async fn deliver(&self, envelope: &InboundEnvelope) -> OutboundEnvelope {
        self.try_deliver(envelope)
            .await
            .unwrap_or_else(|_| self.apology())
    }

    async fn health_check(&self) -> bool {
        match self.post(&health_probe(), self.config.health_timeout).await {
            Ok(response) => {
                let healthy = response.status() == StatusCode::OK;
                if !healthy {
                    warn!(status = %response.status(), "Workflow health probe returned non-200");
                }
                healthy
            }
            Err(e) => {
                warn!(error = %e, "Workflow health probe failed");
                false
            }
        }
    }

    async fn send_custom_event(&self, event_type: &str, data: Value) -> Option<Value> {
        let payload = EventPayload::new(event_type, &data);
        info!(event_type = %event_type, url = %self.config.webhook_url, "Sending custom event");

        let result = match self.post(&payload, self.config.timeout).await {
            Ok(response) => self.read_json(response, self.config.timeout).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(body) => Some(body),
            // Accepted, but nothing parseable to hand back
            Err(DeliveryError::EmptyBody { .. }) | Err(DeliveryError::InvalidBody { .. }) => {
                Some(json!({ "status": "received" }))
            }
            Err(e) => {
                error!(event_type = %event_type, error = %e, "Custom event delivery failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unreachable_client() -> DeliveryClient {
        // Port 1 is reserved and refuses connections on test hosts
        let config = RelayConfig::new("http://127.0.0.1:1/webhook")
            .with_timeout(Duration::from_secs(2))
            .with_health_timeout(Duration::from_secs(1));
        DeliveryClient::new(config).unwrap()
    }

    #[test]
    fn test_apology_envelope() {
        let client = unreachable_client();
        let apology = client.apology();

        assert_eq!(apology.speech_text(), Some(client.config().speech.apology.as_str()));
        assert_eq!(
            apology.reprompt_text(),
            Some(client.config().speech.apology_reprompt.as_str())
        );
        assert!(!apology.should_end_session());
    }

    #[tokio::test]
    async fn test_unreachable_webhook_degrades() {
        let client = unreachable_client();
        let envelope = InboundEnvelope::from_value(json!({
            "request": { "type": "LaunchRequest" }
        }));

        assert_eq!(client.deliver(&envelope).await, client.apology());
        assert!(matches!(
            client.try_deliver(&envelope).await,
            Err(DeliveryError::Transport { .. })
        ));
        assert!(!client.health_check().await);
        assert!(client.send_custom_event("test_event", json!({})).await.is_none());
    }

    #[test]
    fn test_timeout_error_classification() {
        let err = DeliveryError::Timeout {
            url: "https://hooks.example.com".to_string(),
            timeout_secs: 10,
        };
        assert!(err.is_timeout());
        assert_eq!(
            err.to_string(),
            "Webhook https://hooks.example.com did not answer within 10s"
        );
    }
}

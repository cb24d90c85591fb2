//! Delivery error types
//!
//! These never reach the skill caller: the delivery client folds every variant
//! into the apology envelope. `/test-alexa-request` reports them as HTTP 500.

use thiserror::Error;

pub type DeliveryResult<T> = Result<T, DeliveryError>;

#[derive(Error, Debug)]
pub enum DeliveryError {
    /// The HTTP client could not be built (TLS backend setup)
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Webhook {url} did not answer within {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    #[error("Webhook request to {url} failed: {error}")]
    Transport { url: String, error: String },

    #[error("Webhook {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Webhook {url} returned an empty body")]
    EmptyBody { url: String },

    #[error("Webhook {url} returned a body that is not JSON: {error}")]
    InvalidBody { url: String, error: String },
}

impl DeliveryError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

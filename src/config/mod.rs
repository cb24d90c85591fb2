//! Configuration module for the skill relay
//!
//! This module handles server configuration from various sources: .env files, YAML files,
//! and environment variables. Priority: YAML > ENV vars > .env values > defaults.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Merging YAML and environment configurations
//! - `validation`: Configuration validation logic
//!
//! # Example
//! ```rust,no_run
//! use skill_relay::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable overrides
//! let config_path = PathBuf::from("config.yaml");
//! let config = ServerConfig::from_file(&config_path)?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::relay::{IntentAction, IntentRouter, Markers, RelayConfig, SpeechTexts};
use crate::utils::UrlValidationError;

mod env;
mod merge;
mod validation;
mod yaml;

pub use yaml::YamlConfig;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: '{value}' ({reason})")]
    InvalidEnvValue {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid webhook URL: {0}")]
    InvalidWebhookUrl(#[from] UrlValidationError),

    #[error("{name} must be between {min} and {max} seconds, got {value}")]
    TimeoutOutOfRange {
        name: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    #[error("TLS requires both a certificate path and a key path")]
    IncompleteTls,

    #[error("Invalid route prefix '{0}': must start with '/' and contain no wildcards")]
    InvalidRoutePrefix(String),
}

/// TLS configuration for HTTPS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    /// Path to the TLS certificate file (PEM format)
    pub cert_path: PathBuf,
    /// Path to the TLS private key file (PEM format)
    pub key_path: PathBuf,
}

/// Server configuration
///
/// Contains all configuration needed to run the relay, including:
/// - Server settings (host, port, TLS, route prefix)
/// - Workflow webhook settings (URL, timeouts)
/// - Spoken texts and utterance markers
/// - Local intent table
/// - Security settings (CORS, rate limiting)
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    // TLS configuration (optional)
    pub tls: Option<TlsConfig>,

    /// Extra mount points for every route (e.g. `/api`); empty mounts at the root only
    pub route_prefixes: Vec<String>,

    // Workflow webhook
    pub webhook_url: String,
    /// Bound on each relay POST, in seconds
    pub timeout_seconds: u64,
    /// Bound on the health probe, in seconds
    pub health_timeout_seconds: u64,

    // Skill behaviour
    pub markers: Markers,
    pub speech: SpeechTexts,
    /// Overrides for the built-in intent table
    pub intents: HashMap<String, IntentAction>,

    // Security configuration
    /// CORS allowed origins (comma-separated list or "*" for all)
    /// Default: None (CORS disabled, same-origin only)
    pub cors_allowed_origins: Option<String>,

    // Rate limiting configuration
    /// Maximum requests per second per IP address
    /// Default: 60
    pub rate_limit_requests_per_second: u32,
    /// Maximum burst size for rate limiting
    /// Default: 10
    pub rate_limit_burst_size: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables only
    ///
    /// The .env file, if any, must already have been loaded (main.rs does this at startup).
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = merge::merge_config(None)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file with environment variable base
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// After loading and merging, performs validation on the final configuration.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - Configuration validation fails
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let yaml_config = yaml::YamlConfig::from_file(path)?;
        let config = merge::merge_config(Some(yaml_config))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_webhook_url(&self.webhook_url)?;
        validation::validate_timeout("webhook timeout", self.timeout_seconds)?;
        validation::validate_timeout("health check timeout", self.health_timeout_seconds)?;
        Ok(())
    }

    /// Get the server address as a string
    ///
    /// Returns the address in the format "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if TLS is enabled
    pub fn is_tls_enabled(&self) -> bool {
        self.tls.is_some()
    }

    /// Immutable settings for the delivery client
    pub fn relay_config(&self) -> RelayConfig {
        RelayConfig {
            webhook_url: self.webhook_url.clone(),
            timeout: Duration::from_secs(self.timeout_seconds),
            health_timeout: Duration::from_secs(self.health_timeout_seconds),
            markers: self.markers.clone(),
            speech: self.speech.clone(),
        }
    }

    /// Built-in intent table with the configured overrides applied
    pub fn intent_router(&self) -> IntentRouter {
        IntentRouter::new(&self.speech).with_overrides(self.intents.clone())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        let relay = RelayConfig::default();
        Self {
            host: env::DEFAULT_HOST.to_string(),
            port: env::DEFAULT_PORT,
            tls: None,
            route_prefixes: env::DEFAULT_ROUTE_PREFIXES.map(String::from).to_vec(),
            webhook_url: relay.webhook_url,
            timeout_seconds: relay.timeout.as_secs(),
            health_timeout_seconds: relay.health_timeout.as_secs(),
            markers: relay.markers,
            speech: relay.speech,
            intents: HashMap::new(),
            cors_allowed_origins: None,
            rate_limit_requests_per_second: env::DEFAULT_RATE_LIMIT_RPS,
            rate_limit_burst_size: env::DEFAULT_RATE_LIMIT_BURST,
        }
    }
}

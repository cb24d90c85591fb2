use std::path::PathBuf;
use std::str::FromStr;

use super::{ConfigError, ServerConfig, TlsConfig, validation};

pub(super) const DEFAULT_HOST: &str = "0.0.0.0";
pub(super) const DEFAULT_PORT: u16 = 5000;
pub(super) const DEFAULT_ROUTE_PREFIXES: [&str; 2] = ["/api", "/alexa"];
pub(super) const DEFAULT_RATE_LIMIT_RPS: u32 = 60;
pub(super) const DEFAULT_RATE_LIMIT_BURST: u32 = 10;

/// Non-empty value of an environment variable
fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_var(name) {
        Some(value) => value
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvValue {
                name,
                value,
                reason: e.to_string(),
            }),
        None => Ok(default),
    }
}

/// Build a configuration from environment variables, falling back to defaults
pub(super) fn load_from_env() -> Result<ServerConfig, ConfigError> {
    let defaults = ServerConfig::default();

    let tls = match (env_var("TLS_CERT_PATH"), env_var("TLS_KEY_PATH")) {
        (Some(cert), Some(key)) => Some(TlsConfig {
            cert_path: PathBuf::from(cert),
            key_path: PathBuf::from(key),
        }),
        (None, None) => None,
        _ => return Err(ConfigError::IncompleteTls),
    };

    let route_prefixes = match std::env::var("ROUTE_PREFIX") {
        Ok(raw) => validation::normalize_route_prefixes(&raw)?,
        Err(_) => defaults.route_prefixes.clone(),
    };

    Ok(ServerConfig {
        host: env_var("HOST").unwrap_or(defaults.host.clone()),
        port: parse_env("PORT", defaults.port)?,
        tls,
        route_prefixes,
        webhook_url: env_var("N8N_WEBHOOK_URL").unwrap_or(defaults.webhook_url.clone()),
        timeout_seconds: parse_env("N8N_TIMEOUT_SECONDS", defaults.timeout_seconds)?,
        health_timeout_seconds: parse_env(
            "N8N_HEALTH_TIMEOUT_SECONDS",
            defaults.health_timeout_seconds,
        )?,
        cors_allowed_origins: env_var("CORS_ALLOWED_ORIGINS"),
        rate_limit_requests_per_second: parse_env(
            "RATE_LIMIT_REQUESTS_PER_SECOND",
            defaults.rate_limit_requests_per_second,
        )?,
        rate_limit_burst_size: parse_env("RATE_LIMIT_BURST_SIZE", defaults.rate_limit_burst_size)?,
        ..defaults
    })
}

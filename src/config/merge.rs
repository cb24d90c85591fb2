use std::path::PathBuf;

use super::yaml::YamlConfig;
use super::{ConfigError, ServerConfig, TlsConfig, env, validation};

/// Environment configuration with YAML values layered on top
pub(super) fn merge_config(yaml: Option<YamlConfig>) -> Result<ServerConfig, ConfigError> {
    let mut config = env::load_from_env()?;

    let Some(yaml) = yaml else {
        return Ok(config);
    };

    if let Some(server) = yaml.server {
        if let Some(host) = server.host {
            config.host = host;
        }
        if let Some(port) = server.port {
            config.port = port;
        }
        if let Some(prefix) = server.route_prefix {
            config.route_prefixes = validation::normalize_route_prefixes(&prefix)?;
        }
        if let Some(tls) = server.tls {
            config.tls = match (tls.enabled, tls.cert_path, tls.key_path) {
                (Some(false), _, _) => None,
                (_, Some(cert), Some(key)) => Some(TlsConfig {
                    cert_path: PathBuf::from(cert),
                    key_path: PathBuf::from(key),
                }),
                (Some(true), _, _) => return Err(ConfigError::IncompleteTls),
                // Section present but empty: keep whatever the environment set
                (None, None, None) => config.tls.take(),
                (None, _, _) => return Err(ConfigError::IncompleteTls),
            };
        }
    }

    if let Some(relay) = yaml.relay {
        if let Some(url) = relay.webhook_url {
            config.webhook_url = url;
        }
        if let Some(timeout) = relay.timeout_seconds {
            config.timeout_seconds = timeout;
        }
        if let Some(timeout) = relay.health_timeout_seconds {
            config.health_timeout_seconds = timeout;
        }
    }

    if let Some(markers) = yaml.markers {
        config.markers = markers;
    }
    if let Some(speech) = yaml.speech {
        config.speech = speech;
    }
    config.intents.extend(yaml.intents);

    if let Some(security) = yaml.security {
        if let Some(origins) = security.cors_allowed_origins {
            config.cors_allowed_origins = Some(origins);
        }
        if let Some(rps) = security.rate_limit_requests_per_second {
            config.rate_limit_requests_per_second = rps;
        }
        if let Some(burst) = security.rate_limit_burst_size {
            config.rate_limit_burst_size = burst;
        }
    }

    Ok(config)
}

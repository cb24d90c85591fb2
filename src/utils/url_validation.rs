//! Webhook URL validation
//!
//! The workflow webhook URL comes from operator configuration, so it is checked
//! for shape rather than reachability:
//! - it must parse
//! - the scheme must be `http` or `https`
//! - it must have a host
//!
//! Plain `http` is accepted (self-hosted workflow engines often sit next to the
//! relay) but logged when the host is not loopback, since skill payloads carry
//! user identifiers.

use thiserror::Error;
use tracing::warn;
use url::{Host, Url};

/// Errors that can occur during URL validation
#[derive(Debug, Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(#[from] url::ParseError),

    #[error("URL scheme must be http or https, got: {0}")]
    UnsupportedScheme(String),

    #[error("URL must have a host")]
    MissingHost,
}

/// Whether the URL points at this machine
pub fn is_loopback_host(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}

/// Validates a webhook URL and returns it parsed
///
/// # Example
/// ```rust
/// use skill_relay::utils::url_validation::validate_webhook_url;
///
/// assert!(validate_webhook_url("https://n8n.example.com/webhook/abc").is_ok());
/// assert!(validate_webhook_url("http://localhost:5678/webhook/abc").is_ok());
/// assert!(validate_webhook_url("ftp://n8n.example.com/webhook").is_err());
/// ```
pub fn validate_webhook_url(url: &str) -> Result<Url, UrlValidationError> {
    let parsed = Url::parse(url)?;

    let scheme = parsed.scheme();
    if scheme != "https" && scheme != "http" {
        return Err(UrlValidationError::UnsupportedScheme(scheme.to_string()));
    }

    if parsed.host().is_none() {
        return Err(UrlValidationError::MissingHost);
    }

    if scheme == "http" && !is_loopback_host(&parsed) {
        warn!(
            host = parsed.host_str().unwrap_or_default(),
            "Webhook URL uses plain HTTP to a remote host; payloads will travel unencrypted"
        );
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_webhook_url_invalid_format() {
        assert!(matches!(
            validate_webhook_url("not-a-url"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_validate_webhook_url_scheme() {
        assert!(validate_webhook_url("https://n8n.example.com/webhook/abc").is_ok());
        assert!(validate_webhook_url("http://n8n.internal:5678/webhook/abc").is_ok());
        assert!(matches!(
            validate_webhook_url("ws://n8n.example.com/webhook"),
            Err(UrlValidationError::UnsupportedScheme(s)) if s == "ws"
        ));
    }

    #[test]
    fn test_validate_webhook_url_socket_path() {
        assert!(matches!(
            validate_webhook_url("unix:/var/run/n8n.sock"),
            Err(UrlValidationError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_is_loopback_host() {
        let loopback = [
            "http://localhost:5678/hook",
            "http://LOCALHOST/hook",
            "http://127.0.0.1:8080/hook",
            "http://[::1]/hook",
        ];
        for url in loopback {
            assert!(is_loopback_host(&Url::parse(url).unwrap()), "{url}");
        }

        assert!(!is_loopback_host(
            &Url::parse("https://n8n.example.com/hook").unwrap()
        ));
        assert!(!is_loopback_host(&Url::parse("http://10.0.0.5/hook").unwrap()));
    }
}

use super::ConfigError;
use crate::utils::url_validation;

pub(super) const MIN_TIMEOUT_SECONDS: u64 = 1;
pub(super) const MAX_TIMEOUT_SECONDS: u64 = 120;

pub(super) fn validate_webhook_url(url: &str) -> Result<(), ConfigError> {
    url_validation::validate_webhook_url(url)?;
    Ok(())
}

pub(super) fn validate_timeout(name: &'static str, seconds: u64) -> Result<(), ConfigError> {
    if !(MIN_TIMEOUT_SECONDS..=MAX_TIMEOUT_SECONDS).contains(&seconds) {
        return Err(ConfigError::TimeoutOutOfRange {
            name,
            value: seconds,
            min: MIN_TIMEOUT_SECONDS,
            max: MAX_TIMEOUT_SECONDS,
        });
    }
    Ok(())
}

/// Normalize a comma-separated prefix list; blank entries are skipped, duplicates dropped.
pub(super) fn normalize_route_prefixes(raw: &str) -> Result<Vec<String>, ConfigError> {
    let mut prefixes = Vec::new();
    for part in raw.split(',') {
        if let Some(prefix) = normalize_route_prefix(part)? {
            if !prefixes.contains(&prefix) {
                prefixes.push(prefix);
            }
        }
    }
    Ok(prefixes)
}

/// Normalize a route prefix: `""` and `"/"` disable it, trailing slashes are dropped.
pub(super) fn normalize_route_prefix(raw: &str) -> Result<Option<String>, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(None);
    }

    if !trimmed.starts_with('/') || trimmed.contains(['{', '}', '*']) {
        return Err(ConfigError::InvalidRoutePrefix(raw.to_string()));
    }

    Ok(Some(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_timeout_bounds() {
        assert!(validate_timeout("t", 1).is_ok());
        assert!(validate_timeout("t", 120).is_ok());
        assert!(validate_timeout("t", 0).is_err());
        assert!(validate_timeout("t", 121).is_err());
    }

    #[test]
    fn test_normalize_route_prefix() {
        assert_eq!(normalize_route_prefix("").unwrap(), None);
        assert_eq!(normalize_route_prefix("/").unwrap(), None);
        assert_eq!(normalize_route_prefix(" /api/ ").unwrap().as_deref(), Some("/api"));
        assert_eq!(normalize_route_prefix("/v1/skill").unwrap().as_deref(), Some("/v1/skill"));
        assert!(normalize_route_prefix("api").is_err());
        assert!(normalize_route_prefix("/{tenant}").is_err());
    }

    #[test]
    fn test_normalize_route_prefixes() {
        assert_eq!(
            normalize_route_prefixes("/api, /alexa/,/api").unwrap(),
            vec!["/api".to_string(), "/alexa".to_string()]
        );
        assert!(normalize_route_prefixes("").unwrap().is_empty());
        assert!(normalize_route_prefixes("/, ").unwrap().is_empty());
        assert!(normalize_route_prefixes("/api,alexa").is_err());
    }

    #[test]
    fn test_validate_webhook_url() {
        assert!(validate_webhook_url("https://hooks.example.com/webhook/abc").is_ok());
        assert!(validate_webhook_url("http://localhost:5678/webhook/abc").is_ok());
        assert!(validate_webhook_url("not a url").is_err());
    }
}

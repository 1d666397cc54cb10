use crate::config::types::{Config, HttpConfig, ProbeConfig, ProxyConfig, TargetConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_probe_config(&config.probe)?;
    validate_target_config(&config.target)?;
    validate_proxy_config(&config.proxy, config.probe.use_proxy)?;
    validate_http_config(&config.http)?;
    Ok(())
}

/// Validates probe pipeline configuration
fn validate_probe_config(config: &ProbeConfig) -> Result<(), ConfigError> {
    if config.concurrency_limit < 1 || config.concurrency_limit > 100 {
        return Err(ConfigError::Validation(format!(
            "concurrency-limit must be between 1 and 100, got {}",
            config.concurrency_limit
        )));
    }

    if config.request_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-ms must be >= 100ms, got {}ms",
            config.request_timeout_ms
        )));
    }

    Ok(())
}

/// Validates target site configuration
fn validate_target_config(config: &TargetConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url must use an http(s) scheme, got '{}'",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::Validation(
            "base-url must include a host".to_string(),
        ));
    }

    if config.login_redirect_marker.is_empty() {
        return Err(ConfigError::Validation(
            "login-redirect-marker cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates proxy supplier configuration
///
/// The endpoint is only required when proxying is actually enabled.
fn validate_proxy_config(config: &ProxyConfig, use_proxy: bool) -> Result<(), ConfigError> {
    if !use_proxy {
        return Ok(());
    }

    if config.endpoint.is_empty() {
        return Err(ConfigError::Validation(
            "proxy.endpoint is required when probe.use-proxy is enabled".to_string(),
        ));
    }

    let url = Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid proxy endpoint: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "proxy.endpoint must use an http(s) scheme, got '{}'",
            url.scheme()
        )));
    }

    if config.timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "proxy.timeout-ms must be >= 100ms, got {}ms",
            config.timeout_ms
        )));
    }

    Ok(())
}

/// Validates outbound header configuration
///
/// Header values must be visible ASCII to be representable on the wire.
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    validate_header_value("user-agent", &config.user_agent)?;
    validate_header_value("accept", &config.accept)?;
    validate_header_value("accept-language", &config.accept_language)?;
    Ok(())
}

fn validate_header_value(name: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!(
            "http.{} cannot be empty",
            name
        )));
    }

    if !value.chars().all(|c| (' '..='~').contains(&c)) {
        return Err(ConfigError::Validation(format!(
            "http.{} contains non-ASCII or control characters",
            name
        )));
    }

    Ok(())
}

//! HTTP fetcher implementation
//!
//! This module handles the outbound side of a probe:
//! - Building HTTP clients with browser-imitating headers
//! - Optional routing through a leased proxy
//! - A single bounded GET for the profile page
//! - Error classification into the transport taxonomy
//!
//! The fetcher performs exactly one network call per invocation; retry is a
//! caller decision, not a fetcher behavior.

use crate::config::{HttpConfig, ProbeConfig};
use crate::proxy::ProxyHandle;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// A fetch that failed on the wire
///
/// Covers connection failures, timeouts, and non-2xx responses. The HTTP
/// status is preserved whenever the server answered at all.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    /// Human-readable failure description
    pub message: String,

    /// HTTP status code, when one was received
    pub http_status: Option<u16>,
}

/// A successfully fetched profile page
#[derive(Debug)]
pub struct FetchedPage {
    /// HTTP status code of the final response
    pub http_status: u16,

    /// Raw page markup
    pub body: String,
}

/// Builds an HTTP client for profile fetches
///
/// The target site serves the metadata-bearing profile page only to requests
/// that present browser-like headers, so Accept, Accept-Language, and
/// User-Agent come from configuration. When a proxy lease is given, the
/// client routes through it for its whole (single-fetch) lifetime, matching
/// the one-lease-per-fetch contract.
///
/// # Arguments
///
/// * `probe` - Probe configuration (supplies the request timeout)
/// * `http` - Outbound header configuration
/// * `proxy` - Optional proxy lease to route through
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    probe: &ProbeConfig,
    http: &HttpConfig,
    proxy: Option<&ProxyHandle>,
) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();

    // Config validation guarantees visible-ASCII values; a value that still
    // fails conversion is dropped rather than failing the probe.
    if let Ok(value) = HeaderValue::from_str(&http.accept) {
        headers.insert(ACCEPT, value);
    }
    if let Ok(value) = HeaderValue::from_str(&http.accept_language) {
        headers.insert(ACCEPT_LANGUAGE, value);
    }

    let mut builder = Client::builder()
        .user_agent(http.user_agent.clone())
        .default_headers(headers)
        .timeout(Duration::from_millis(probe.request_timeout_ms))
        .connect_timeout(Duration::from_millis(probe.request_timeout_ms))
        .gzip(true)
        .brotli(true);

    if let Some(handle) = proxy {
        builder = builder.proxy(reqwest::Proxy::all(handle.proxy_url())?);
    }

    builder.build()
}

/// Fetches a profile page
///
/// Issues a single GET with the client's configured timeout. Redirects are
/// followed; the login-wall redirect is detected later from the alternate
/// link embedded in the served markup, not from the redirect chain.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The profile URL to fetch
///
/// # Returns
///
/// * `Ok(FetchedPage)` - 2xx response with its body
/// * `Err(TransportError)` - Connection failure, timeout, or non-2xx status
pub async fn fetch_profile(client: &Client, url: &Url) -> Result<FetchedPage, TransportError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(classify_request_error)?;

    let status = response.status();

    if !status.is_success() {
        return Err(TransportError {
            message: format!("target answered HTTP {}", status.as_u16()),
            http_status: Some(status.as_u16()),
        });
    }

    let body = response.text().await.map_err(|e| TransportError {
        message: format!("failed to read response body: {}", e),
        http_status: Some(status.as_u16()),
    })?;

    Ok(FetchedPage {
        http_status: status.as_u16(),
        body,
    })
}

/// Classifies a reqwest error into the transport taxonomy
fn classify_request_error(error: reqwest::Error) -> TransportError {
    let message = if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else {
        error.to_string()
    };

    TransportError {
        message,
        http_status: error.status().map(|s| s.as_u16()),
    }
}

//! Proxy supplier for Profile-Scout
//!
//! When proxying is enabled, every fetch leases its own proxy endpoint from
//! an external proxy-listing service. Leases are independent: no caching, no
//! pooling, and no distinctness guarantee between concurrent fetches.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while acquiring a proxy lease
///
/// Proxy failures are never fatal to a batch; the orchestrator converts them
/// into the affected username's own indeterminate result.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("proxy listing request failed: {0}")]
    Request(String),

    #[error("proxy listing service answered HTTP {0}")]
    Status(u16),

    #[error("proxy listing response was not valid JSON: {0}")]
    Malformed(String),

    #[error("proxy listing response carried no proxy address")]
    MissingAddress,
}

/// A single-use proxy lease
///
/// Held for exactly one fetch attempt and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyHandle {
    /// Proxy endpoint as host:port
    pub address: String,

    /// When the lease was acquired
    pub acquired_at: DateTime<Utc>,
}

impl ProxyHandle {
    /// Creates a handle leased at the current instant
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            acquired_at: Utc::now(),
        }
    }

    /// The proxy address in URL form, as reqwest expects it
    pub fn proxy_url(&self) -> String {
        if self.address.contains("://") {
            self.address.clone()
        } else {
            format!("http://{}", self.address)
        }
    }
}

/// Source of proxy leases
///
/// The engine only depends on this trait, so tests can substitute a
/// deterministic supplier for the live listing service.
#[async_trait]
pub trait ProxySource: Send + Sync {
    /// Acquires a fresh proxy lease
    async fn acquire(&self) -> Result<ProxyHandle, ProxyError>;
}

/// Shape of the listing service response; only the address field matters
#[derive(Debug, Deserialize)]
struct ProxyListing {
    proxy: Option<String>,
}

/// Proxy source backed by an HTTP proxy-listing service
///
/// Issues one GET per acquisition and expects a JSON object with a `proxy`
/// field holding a host:port address.
pub struct ListingProxySource {
    client: Client,
    endpoint: String,
}

impl ListingProxySource {
    /// Creates a listing-backed proxy source
    ///
    /// # Arguments
    ///
    /// * `endpoint` - The listing service URL
    /// * `timeout` - Acquisition request timeout
    ///
    /// # Returns
    ///
    /// * `Ok(ListingProxySource)` - Ready to lease proxies
    /// * `Err(reqwest::Error)` - Failed to build the HTTP client
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl ProxySource for ListingProxySource {
    async fn acquire(&self) -> Result<ProxyHandle, ProxyError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| ProxyError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProxyError::Request(e.to_string()))?;

        let listing: ProxyListing =
            serde_json::from_str(&body).map_err(|e| ProxyError::Malformed(e.to_string()))?;

        let address = listing
            .proxy
            .filter(|a| !a.is_empty())
            .ok_or(ProxyError::MissingAddress)?;

        tracing::debug!("Leased proxy {}", address);
        Ok(ProxyHandle::new(address))
    }
}

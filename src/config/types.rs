use serde::Deserialize;

/// Main configuration structure for Profile-Scout
///
/// Every section has defaults, so the prober runs without a config file.
/// The three historical engine variants (direct fetch, proxied fetch,
/// batch-only no-metadata fetch) are expressed as knobs on one pipeline:
/// `use-proxy`, `retain-metadata`, and `concurrency-limit`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub probe: ProbeConfig,
    pub target: TargetConfig,
    pub proxy: ProxyConfig,
    pub http: HttpConfig,
}

/// Probe pipeline behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Route each fetch through a freshly acquired proxy
    #[serde(rename = "use-proxy")]
    pub use_proxy: bool,

    /// Attach the extracted metadata bundle to active results
    #[serde(rename = "retain-metadata")]
    pub retain_metadata: bool,

    /// Keep the raw fetched markup inside the metadata bundle
    #[serde(rename = "retain-raw-markup")]
    pub retain_raw_markup: bool,

    /// Maximum number of concurrently in-flight probes
    #[serde(rename = "concurrency-limit")]
    pub concurrency_limit: u32,

    /// Per-fetch request timeout (milliseconds)
    #[serde(rename = "request-timeout-ms")]
    pub request_timeout_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            use_proxy: false,
            retain_metadata: true,
            retain_raw_markup: false,
            concurrency_limit: 16,
            request_timeout_ms: 5000,
        }
    }
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Base URL of the target site; profiles live at `<base-url>/<username>/`
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// URL fragment that marks a redirect to the site's login wall
    #[serde(rename = "login-redirect-marker")]
    pub login_redirect_marker: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.instagram.com".to_string(),
            login_redirect_marker: "instagram.com/accounts/login".to_string(),
        }
    }
}

/// Proxy supplier configuration
///
/// Only consulted when `probe.use-proxy` is on.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Proxy-listing service endpoint returning a JSON object with a
    /// `proxy` address field
    pub endpoint: String,

    /// Acquisition request timeout (milliseconds)
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            timeout_ms: 5000,
        }
    }
}

/// Outbound HTTP header configuration
///
/// The target serves the metadata-bearing profile page only to requests that
/// look like a regular browser, so the defaults imitate one.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header value
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Accept header value
    pub accept: String,

    /// Accept-Language header value
    #[serde(rename = "accept-language")]
    pub accept_language: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                         AppleWebKit/537.36 (KHTML, like Gecko) \
                         Chrome/129.0.0.0 Safari/537.36"
                .to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,\
                     image/avif,image/webp,image/apng,*/*;q=0.8"
                .to_string(),
            accept_language: "en-US,en;q=0.7".to_string(),
        }
    }
}

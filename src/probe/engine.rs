//! Probe engine - batch orchestration logic
//!
//! This module fans a list of usernames out to the fetch-classify-decide
//! pipeline concurrently and collects one result per username. Failures are
//! isolated: a transport error, proxy error, or login wall on one username
//! becomes that username's own indeterminate result and never disturbs its
//! batch-mates. Only a dead worker task fails the whole call.

use crate::config::{validate, Config};
use crate::probe::classifier::extract_signals;
use crate::probe::decider::{decide, Verdict};
use crate::probe::fetcher::{build_http_client, fetch_profile};
use crate::proxy::{ListingProxySource, ProxySource};
use crate::status::{AccountStatus, ProbeRequest, ProbeResult, ProfileMetadata};
use crate::target::profile_url;
use crate::{InputError, ScoutError};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// The configurable probe pipeline
///
/// One engine holds one explicitly constructed HTTP client, reused by every
/// direct fetch it performs. Proxied fetches build a short-lived client per
/// proxy lease instead, because a proxy is bound to a client at construction
/// time and leases are single-use.
///
/// The engine is cheap to clone; clones share the client and proxy source.
#[derive(Clone)]
pub struct ProbeEngine {
    config: Arc<Config>,
    base_url: Url,
    client: Client,
    proxy_source: Option<Arc<dyn ProxySource>>,
}

impl ProbeEngine {
    /// Creates an engine from a validated configuration
    ///
    /// # Arguments
    ///
    /// * `config` - The probe configuration
    ///
    /// # Returns
    ///
    /// * `Ok(ProbeEngine)` - Ready to probe
    /// * `Err(ScoutError)` - Configuration invalid or client construction failed
    ///
    /// # Example
    ///
    /// ```no_run
    /// use profile_scout::config::Config;
    /// use profile_scout::probe::ProbeEngine;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let engine = ProbeEngine::new(Config::default())?;
    /// let results = engine.probe_all(&["realuser1".to_string()]).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: Config) -> Result<Self, ScoutError> {
        validate(&config)?;

        let base_url = Url::parse(&config.target.base_url).map_err(|e| {
            crate::ConfigError::InvalidUrl(format!("Invalid base-url: {}", e))
        })?;

        let client = build_http_client(&config.probe, &config.http, None)?;

        let proxy_source: Option<Arc<dyn ProxySource>> = if config.probe.use_proxy {
            let source = ListingProxySource::new(
                &config.proxy.endpoint,
                Duration::from_millis(config.proxy.timeout_ms),
            )?;
            Some(Arc::new(source))
        } else {
            None
        };

        Ok(Self {
            config: Arc::new(config),
            base_url,
            client,
            proxy_source,
        })
    }

    /// Replaces the proxy source
    ///
    /// Tests use this to substitute a deterministic supplier for the live
    /// listing service. Setting a source implies proxied fetching regardless
    /// of the `use-proxy` flag.
    pub fn with_proxy_source(mut self, source: Arc<dyn ProxySource>) -> Self {
        self.proxy_source = Some(source);
        self
    }

    /// Probes a single username
    ///
    /// The username is validated at the boundary; past that point every
    /// failure is captured into the returned result.
    ///
    /// # Arguments
    ///
    /// * `username` - The username to probe
    ///
    /// # Returns
    ///
    /// * `Ok(ProbeResult)` - The classification outcome
    /// * `Err(ScoutError)` - The username was empty (no network call made)
    pub async fn probe_one(&self, username: &str) -> Result<ProbeResult, ScoutError> {
        let request = ProbeRequest::new(username).map_err(ScoutError::Input)?;
        Ok(self.run_probe(&request).await)
    }

    /// Probes a batch of usernames concurrently
    ///
    /// Every username is validated before any network call is made; an empty
    /// batch or an empty username rejects the whole call up front. After
    /// that, one task per username runs under the configured concurrency
    /// limit, and exactly one result per submitted username is returned, in
    /// unspecified order. Duplicates are probed independently.
    ///
    /// Dropping the returned future aborts in-flight fetches.
    ///
    /// # Arguments
    ///
    /// * `usernames` - The usernames to probe
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ProbeResult>)` - One result per input username
    /// * `Err(ScoutError)` - Invalid input, or a worker task died
    pub async fn probe_all(&self, usernames: &[String]) -> Result<Vec<ProbeResult>, ScoutError> {
        if usernames.is_empty() {
            return Err(InputError::EmptyBatch.into());
        }

        // Boundary validation: reject the batch before any task launches
        let requests = usernames
            .iter()
            .map(|u| ProbeRequest::new(u))
            .collect::<Result<Vec<_>, _>>()
            .map_err(ScoutError::Input)?;

        let total = requests.len();
        tracing::info!(
            "Probing {} usernames (concurrency limit {})",
            total,
            self.config.probe.concurrency_limit
        );
        let start_time = std::time::Instant::now();

        let semaphore = Arc::new(Semaphore::new(
            self.config.probe.concurrency_limit as usize,
        ));
        let mut tasks = JoinSet::new();

        for request in requests {
            let engine = self.clone();
            let semaphore = Arc::clone(&semaphore);

            tasks.spawn(async move {
                match semaphore.acquire_owned().await {
                    Ok(_permit) => engine.run_probe(&request).await,
                    // The semaphore outlives the batch; a closed semaphore
                    // still must yield a result rather than drop the request.
                    Err(_) => ProbeResult::failure(
                        request.username(),
                        "probe scheduler shut down",
                        None,
                    ),
                }
            });
        }

        let mut results = Vec::with_capacity(total);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => {
                    tracing::debug!(
                        "Completed {}/{}: {} -> {}",
                        results.len() + 1,
                        total,
                        result.username,
                        result.status
                    );
                    results.push(result);
                }
                // A panicked or cancelled worker is the one fault that fails
                // the whole batch. Dropping the JoinSet aborts the rest.
                Err(e) => return Err(ScoutError::Task(e.to_string())),
            }
        }

        tracing::info!(
            "Probed {} usernames in {:?}",
            results.len(),
            start_time.elapsed()
        );

        Ok(results)
    }

    /// Runs the fetch-classify-decide pipeline for one request
    ///
    /// Infallible by design: every failure mode is folded into the result.
    async fn run_probe(&self, request: &ProbeRequest) -> ProbeResult {
        let username = request.username();
        tracing::debug!("Probing profile of {}", username);

        let url = match profile_url(&self.base_url, username) {
            Ok(url) => url,
            Err(e) => return ProbeResult::failure(username, e.to_string(), None),
        };

        let client = match self.fetch_client().await {
            Ok(client) => client,
            Err(message) => {
                tracing::warn!("Probe of {} failed before fetch: {}", username, message);
                return ProbeResult::failure(username, message, None);
            }
        };

        let page = match fetch_profile(&client, &url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Fetch failed for {}: {}", username, e);
                return ProbeResult::failure(username, e.message, e.http_status);
            }
        };

        let signals = extract_signals(&page.body);

        match decide(&signals, &self.config.target.login_redirect_marker) {
            Verdict::LoginWall { location } => {
                tracing::warn!("Profile request for {} hit the login wall", username);
                ProbeResult::failure(
                    username,
                    format!("profile request redirected to login page: {}", location),
                    Some(page.http_status),
                )
            }

            Verdict::Suspended => ProbeResult::classified(
                username,
                AccountStatus::Suspended,
                Some(page.http_status),
                None,
            ),

            Verdict::Active => {
                let metadata = if self.config.probe.retain_metadata {
                    Some(ProfileMetadata {
                        title: signals.title,
                        description: signals.description,
                        image: signals.image,
                        kind: signals.kind,
                        canonical_url: signals.canonical_url,
                        raw_markup: self
                            .config
                            .probe
                            .retain_raw_markup
                            .then(|| page.body.clone()),
                    })
                } else {
                    None
                };

                ProbeResult::classified(
                    username,
                    AccountStatus::Active,
                    Some(page.http_status),
                    metadata,
                )
            }
        }
    }

    /// Supplies the client for one fetch attempt
    ///
    /// Direct configurations reuse the shared client; proxied configurations
    /// lease a proxy and bind a fresh client to it.
    async fn fetch_client(&self) -> Result<Client, String> {
        match &self.proxy_source {
            Some(source) => {
                let handle = source
                    .acquire()
                    .await
                    .map_err(|e| format!("proxy acquisition failed: {}", e))?;

                tracing::debug!("Fetching through proxy {}", handle.address);

                build_http_client(&self.config.probe, &self.config.http, Some(&handle))
                    .map_err(|e| format!("failed to build proxied client: {}", e))
            }
            None => Ok(self.client.clone()),
        }
    }
}

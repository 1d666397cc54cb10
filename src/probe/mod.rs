//! Probe module for profile fetching and classification
//!
//! This module contains the core probing pipeline, including:
//! - HTTP fetching with optional proxy routing
//! - Metadata signal extraction from fetched markup
//! - The status decision policy
//! - Concurrent batch orchestration

mod classifier;
mod decider;
mod engine;
mod fetcher;

pub use classifier::{extract_signals, PageSignals};
pub use decider::{decide, Verdict};
pub use engine::ProbeEngine;
pub use fetcher::{build_http_client, fetch_profile, FetchedPage, TransportError};

use crate::config::Config;
use crate::status::ProbeResult;
use crate::Result;

/// Probes a batch of usernames with a one-shot engine
///
/// This is the main entry point for callers that don't need to reuse the
/// engine across batches. It will:
/// 1. Validate the configuration and build the HTTP client
/// 2. Validate every username at the boundary
/// 3. Fan the batch out under the configured concurrency limit
/// 4. Return one result per username
///
/// # Arguments
///
/// * `config` - The probe configuration
/// * `usernames` - The usernames to probe
///
/// # Returns
///
/// * `Ok(Vec<ProbeResult>)` - One result per input username
/// * `Err(ScoutError)` - Invalid configuration or input, or a dead worker
pub async fn probe_all(config: Config, usernames: &[String]) -> Result<Vec<ProbeResult>> {
    let engine = ProbeEngine::new(config)?;
    engine.probe_all(usernames).await
}

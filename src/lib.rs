//! Profile-Scout: a bulk account-status prober
//!
//! This crate probes public social-media profile pages in bulk and classifies
//! each username as active, suspended, or indeterminate based on the metadata
//! embedded in the served page.

pub mod config;
pub mod probe;
pub mod proxy;
pub mod report;
pub mod status;
pub mod target;

use thiserror::Error;

/// Main error type for Profile-Scout operations
///
/// Per-username probe failures never surface here: they are captured into the
/// affected username's own [`status::ProbeResult`]. This type covers failures
/// that stop a call before it starts (configuration, input) and the one
/// failure allowed to abort a whole batch (a dead worker task).
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Probe task failed: {0}")]
    Task(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Input errors, rejected at the boundary before any network call
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("username must be a non-empty string")]
    EmptyUsername,

    #[error("username list must contain at least one entry")]
    EmptyBatch,

    #[error("username '{username}' cannot form a profile URL")]
    MalformedUsername { username: String },
}

/// Result type alias for Profile-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use probe::{ProbeEngine, TransportError};
pub use proxy::{ProxyError, ProxyHandle, ProxySource};
pub use status::{AccountStatus, ProbeRequest, ProbeResult, ProfileMetadata};

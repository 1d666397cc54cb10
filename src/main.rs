//! Profile-Scout main entry point
//!
//! This is the command-line interface for the Profile-Scout account-status
//! prober.

use anyhow::{bail, Context};
use clap::Parser;
use profile_scout::config::{load_config, Config};
use profile_scout::probe::ProbeEngine;
use profile_scout::report::{print_json, print_results, print_statistics, ProbeStatistics};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Profile-Scout: a bulk account-status prober
///
/// Profile-Scout fetches public profile pages for a list of usernames and
/// classifies each account as active, suspended, or indeterminate from the
/// metadata embedded in the served page.
#[derive(Parser, Debug)]
#[command(name = "profile-scout")]
#[command(version = "1.0.0")]
#[command(about = "A bulk account-status prober", long_about = None)]
struct Cli {
    /// Usernames to probe
    #[arg(value_name = "USERNAME")]
    usernames: Vec<String>,

    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Read additional usernames from a file, one per line
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Emit results as a JSON array instead of text lines
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be probed without probing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path).context("failed to load configuration")?
        }
        None => Config::default(),
    };

    // Assemble the username list from arguments and the optional file
    let mut usernames = cli.usernames.clone();
    if let Some(path) = &cli.file {
        usernames.extend(read_username_file(path)?);
    }

    if usernames.is_empty() {
        bail!("no usernames provided; pass them as arguments or via --file");
    }

    if cli.dry_run {
        handle_dry_run(&config, &usernames);
        return Ok(());
    }

    handle_probe(config, &usernames, cli.json).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("profile_scout=info,warn"),
            1 => EnvFilter::new("profile_scout=debug,info"),
            2 => EnvFilter::new("profile_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Reads usernames from a file, one per line
///
/// Blank lines and `#` comment lines are skipped.
fn read_username_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read username file {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Handles the --dry-run mode: validates config and shows what would be probed
fn handle_dry_run(config: &Config, usernames: &[String]) {
    println!("=== Profile-Scout Dry Run ===\n");

    println!("Probe Configuration:");
    println!("  Use proxy: {}", config.probe.use_proxy);
    println!("  Retain metadata: {}", config.probe.retain_metadata);
    println!("  Retain raw markup: {}", config.probe.retain_raw_markup);
    println!("  Concurrency limit: {}", config.probe.concurrency_limit);
    println!("  Request timeout: {}ms", config.probe.request_timeout_ms);

    println!("\nTarget:");
    println!("  Base URL: {}", config.target.base_url);
    println!(
        "  Login redirect marker: {}",
        config.target.login_redirect_marker
    );

    if config.probe.use_proxy {
        println!("\nProxy:");
        println!("  Endpoint: {}", config.proxy.endpoint);
        println!("  Timeout: {}ms", config.proxy.timeout_ms);
    }

    println!("\nUsernames ({}):", usernames.len());
    for username in usernames {
        println!("  - {}", username);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would probe {} profiles", usernames.len());
}

/// Handles the main probe operation
async fn handle_probe(config: Config, usernames: &[String], json: bool) -> anyhow::Result<()> {
    let engine = ProbeEngine::new(config)?;
    let results = engine.probe_all(usernames).await?;

    if json {
        print_json(&results)?;
    } else {
        print_results(&results);
        print_statistics(&ProbeStatistics::from_results(&results));
    }

    Ok(())
}

//! Result reporting for Profile-Scout
//!
//! Presentation glue for the CLI: plain-text result lines, JSON output, and
//! a summary count by status. The engine itself never prints.

use crate::status::{AccountStatus, ProbeResult};

/// Aggregate counts over a batch of probe results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeStatistics {
    /// Total number of results
    pub total: usize,

    /// Accounts classified as active
    pub active: usize,

    /// Accounts classified as suspended
    pub suspended: usize,

    /// Probes that could not classify the account
    pub indeterminate: usize,
}

impl ProbeStatistics {
    /// Tallies statistics from a slice of results
    pub fn from_results(results: &[ProbeResult]) -> Self {
        let mut stats = Self {
            total: results.len(),
            ..Default::default()
        };

        for result in results {
            match result.status {
                AccountStatus::Active => stats.active += 1,
                AccountStatus::Suspended => stats.suspended += 1,
                AccountStatus::Indeterminate => stats.indeterminate += 1,
            }
        }

        stats
    }
}

/// Prints one line per result to stdout
pub fn print_results(results: &[ProbeResult]) {
    for result in results {
        match (&result.error, result.http_status) {
            (Some(error), Some(status)) => {
                println!(
                    "{:<32} {:<14} (HTTP {}: {})",
                    result.username, result.status, status, error
                );
            }
            (Some(error), None) => {
                println!("{:<32} {:<14} ({})", result.username, result.status, error);
            }
            _ => {
                println!("{:<32} {}", result.username, result.status);
            }
        }
    }
}

/// Prints the whole batch as a JSON array to stdout
pub fn print_json(results: &[ProbeResult]) -> Result<(), serde_json::Error> {
    let rendered = serde_json::to_string_pretty(results)?;
    println!("{}", rendered);
    Ok(())
}

/// Prints summary statistics to stdout in a formatted manner
pub fn print_statistics(stats: &ProbeStatistics) {
    println!("\n=== Probe Summary ===");
    println!("  Total:         {}", stats.total);
    println!("  Active:        {}", stats.active);
    println!("  Suspended:     {}", stats.suspended);
    println!("  Indeterminate: {}", stats.indeterminate);
}

//! Classification and result types for Profile-Scout
//!
//! This module defines the tri-state account classification and the
//! per-username request/result records the engine trades in.

mod account_status;
mod result;

pub use account_status::AccountStatus;
pub use result::{ProbeRequest, ProbeResult, ProfileMetadata};

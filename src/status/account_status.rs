/// Account status definitions for probe classification
///
/// This module defines the tri-state classification a probe can assign to a
/// username after inspecting its profile page.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a username's account on the target site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// The profile page carried its title metadata: the account is live
    Active,

    /// The profile page was served without title metadata, the strongest
    /// public signal of a suspended account
    Suspended,

    /// The probe could not establish status: the fetch failed, the proxy
    /// lease failed, or the site answered with its login wall
    Indeterminate,
}

impl AccountStatus {
    /// Returns true if the account was classified as live
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns true if the account was classified as suspended
    pub fn is_suspended(&self) -> bool {
        matches!(self, Self::Suspended)
    }

    /// Returns true if the probe could not classify the account
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Self::Indeterminate)
    }

    /// Returns true if this is a confident classification rather than a
    /// degraded-confidence outcome
    pub fn is_confident(&self) -> bool {
        !self.is_indeterminate()
    }

    /// String representation used in reports and serialized results
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Indeterminate => "indeterminate",
        }
    }

    /// Parses a status from its string representation
    ///
    /// Returns None if the string doesn't match any known status.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "suspended" => Some(Self::Suspended),
            "indeterminate" => Some(Self::Indeterminate),
            _ => None,
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(AccountStatus::Active.is_active());
        assert!(!AccountStatus::Active.is_suspended());
        assert!(AccountStatus::Active.is_confident());

        assert!(AccountStatus::Suspended.is_suspended());
        assert!(AccountStatus::Suspended.is_confident());

        assert!(AccountStatus::Indeterminate.is_indeterminate());
        assert!(!AccountStatus::Indeterminate.is_confident());
    }

    #[test]
    fn test_as_str() {
        assert_eq!(AccountStatus::Active.as_str(), "active");
        assert_eq!(AccountStatus::Suspended.as_str(), "suspended");
        assert_eq!(AccountStatus::Indeterminate.as_str(), "indeterminate");
    }

    #[test]
    fn test_from_str() {
        assert_eq!(AccountStatus::from_str("active"), Some(AccountStatus::Active));
        assert_eq!(
            AccountStatus::from_str("suspended"),
            Some(AccountStatus::Suspended)
        );
        assert_eq!(
            AccountStatus::from_str("indeterminate"),
            Some(AccountStatus::Indeterminate)
        );
        assert_eq!(AccountStatus::from_str("banned"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", AccountStatus::Active), "active");
        assert_eq!(format!("{}", AccountStatus::Indeterminate), "indeterminate");
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&AccountStatus::Suspended).unwrap();
        assert_eq!(json, r#""suspended""#);
    }
}

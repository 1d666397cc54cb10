//! Probe request and result types
//!
//! A [`ProbeRequest`] is created per submitted username; the engine answers
//! every request with exactly one [`ProbeResult`], whatever happened on the
//! wire. Results are plain data, owned by the caller once returned.

use crate::status::AccountStatus;
use crate::InputError;
use serde::Serialize;

/// A single username submitted for probing
///
/// Immutable once created. Duplicates are permitted and probed independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    username: String,
}

impl ProbeRequest {
    /// Creates a request, rejecting empty usernames at the boundary
    pub fn new(username: &str) -> Result<Self, InputError> {
        crate::target::validate_username(username)?;
        Ok(Self {
            username: username.trim().to_string(),
        })
    }

    /// The username this request probes
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Metadata extracted from a successfully fetched, non-redirected profile page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileMetadata {
    /// og:title content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// og:description content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// og:image content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// og:type content
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// og:url content (the canonical profile URL)
    #[serde(rename = "url", skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,

    /// The raw fetched markup, retained only when configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_markup: Option<String>,
}

/// The outcome of probing one username
#[derive(Debug, Clone, Serialize)]
pub struct ProbeResult {
    /// The probed username
    pub username: String,

    /// The assigned classification
    pub status: AccountStatus,

    /// Diagnostic message for indeterminate outcomes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// HTTP status code, when the target answered at all
    #[serde(rename = "http-status", skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,

    /// Extracted page metadata, attached to active results when retention
    /// is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ProfileMetadata>,
}

impl ProbeResult {
    /// Builds a confident classification result
    pub fn classified(
        username: &str,
        status: AccountStatus,
        http_status: Option<u16>,
        metadata: Option<ProfileMetadata>,
    ) -> Self {
        Self {
            username: username.to_string(),
            status,
            error: None,
            http_status,
            metadata,
        }
    }

    /// Builds an indeterminate result carrying the failure diagnostics
    pub fn failure(username: &str, message: impl Into<String>, http_status: Option<u16>) -> Self {
        Self {
            username: username.to_string(),
            status: AccountStatus::Indeterminate,
            error: Some(message.into()),
            http_status,
            metadata: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_rejects_empty_username() {
        assert_eq!(ProbeRequest::new("").unwrap_err(), InputError::EmptyUsername);
        assert_eq!(
            ProbeRequest::new("  ").unwrap_err(),
            InputError::EmptyUsername
        );
    }

    #[test]
    fn test_request_trims_username() {
        let request = ProbeRequest::new(" realuser1 ").unwrap();
        assert_eq!(request.username(), "realuser1");
    }

    #[test]
    fn test_failure_result_is_indeterminate() {
        let result = ProbeResult::failure("ghost", "request timed out", None);
        assert_eq!(result.status, AccountStatus::Indeterminate);
        assert_eq!(result.error.as_deref(), Some("request timed out"));
        assert!(result.metadata.is_none());
    }

    #[test]
    fn test_serialization_omits_absent_fields() {
        let result = ProbeResult::classified("realuser1", AccountStatus::Suspended, Some(200), None);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains(r#""status":"suspended""#));
        assert!(json.contains(r#""http-status":200"#));
        assert!(!json.contains("metadata"));
        assert!(!json.contains("error"));
    }

    #[test]
    fn test_metadata_type_field_rename() {
        let metadata = ProfileMetadata {
            title: Some("Real User (@realuser1)".to_string()),
            kind: Some("profile".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&metadata).unwrap();
        assert!(json.contains(r#""type":"profile""#));
        assert!(!json.contains("kind"));
    }
}

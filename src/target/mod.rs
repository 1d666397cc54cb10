//! Target URL handling for Profile-Scout
//!
//! Builds the profile URL probed for each username and enforces the one
//! input rule the engine has: usernames must be non-empty. Anything beyond
//! that is left to the target site, which answers malformed names with an
//! HTTP error or a metadata-free page.

use crate::InputError;
use url::Url;

/// Validates a username at the engine boundary
///
/// The only requirement is a non-empty string after trimming. Usernames are
/// deliberately not sanitized further.
///
/// # Arguments
///
/// * `username` - The username to validate
///
/// # Returns
///
/// * `Ok(())` - Username is acceptable
/// * `Err(InputError)` - Username is empty
pub fn validate_username(username: &str) -> Result<(), InputError> {
    if username.trim().is_empty() {
        return Err(InputError::EmptyUsername);
    }
    Ok(())
}

/// Builds the profile URL for a username
///
/// Profiles live at `<base>/<username>/` with a trailing slash.
///
/// # Arguments
///
/// * `base` - The target site base URL
/// * `username` - The username to probe
///
/// # Returns
///
/// * `Ok(Url)` - The absolute profile URL
/// * `Err(InputError)` - The username cannot form a valid URL path segment
///
/// # Example
///
/// ```
/// use profile_scout::target::profile_url;
/// use url::Url;
///
/// let base = Url::parse("https://www.instagram.com").unwrap();
/// let url = profile_url(&base, "realuser1").unwrap();
/// assert_eq!(url.as_str(), "https://www.instagram.com/realuser1/");
/// ```
pub fn profile_url(base: &Url, username: &str) -> Result<Url, InputError> {
    validate_username(username)?;

    base.join(&format!("{}/", username.trim()))
        .map_err(|_| InputError::MalformedUsername {
            username: username.to_string(),
        })
}

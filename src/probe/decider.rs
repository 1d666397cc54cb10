//! Status decision policy
//!
//! Applies the classification rules, in order:
//! 1. Alternate link pointing at the login wall: the site is challenging the
//!    anonymous session rather than serving the profile, so nothing can be
//!    concluded.
//! 2. Missing og:title: the strongest public signal of a suspended account.
//! 3. Otherwise the account is live.
//!
//! The login-wall check runs first because a challenged session also lacks
//! the title tag and would otherwise be miscounted as suspended.

use crate::probe::classifier::PageSignals;

/// The decision reached for a successfully fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The page is the site's login wall, not the requested profile
    LoginWall {
        /// Where the alternate link pointed
        location: String,
    },

    /// The page carried no title metadata
    Suspended,

    /// The page carried title metadata
    Active,
}

/// Decides an account's status from the extracted page signals
///
/// This heuristic is a best-effort signal, not a ground-truth oracle: a
/// changed page layout or an unrecognized block page can still produce a
/// wrong answer. The policy deliberately matches what is observable from the
/// page and nothing more.
///
/// # Arguments
///
/// * `signals` - Signals extracted from the fetched markup
/// * `login_marker` - URL fragment identifying the site's login wall
///
/// # Returns
///
/// The verdict for this page
pub fn decide(signals: &PageSignals, login_marker: &str) -> Verdict {
    if let Some(href) = &signals.alternate_href {
        if href.contains(login_marker) {
            return Verdict::LoginWall {
                location: href.clone(),
            };
        }
    }

    if signals.title.is_none() {
        return Verdict::Suspended;
    }

    Verdict::Active
}

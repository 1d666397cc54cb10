//! Markup classifier for profile pages
//!
//! Extracts the small set of signals the status policy needs: the
//! alternate-link redirect target and the Open Graph metadata tags. This is
//! a pure transformation over the markup text; missing or mangled tags yield
//! absent signals, never errors.

use scraper::{Html, Selector};

/// Signals extracted from a fetched profile page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSignals {
    /// href of the `<link rel="alternate">` element, used for login-redirect
    /// detection
    pub alternate_href: Option<String>,

    /// og:title content
    pub title: Option<String>,

    /// og:description content
    pub description: Option<String>,

    /// og:image content
    pub image: Option<String>,

    /// og:type content
    pub kind: Option<String>,

    /// og:url content
    pub canonical_url: Option<String>,
}

/// Extracts classification signals from profile page markup
///
/// All extractions are best-effort: the function is total over arbitrary
/// input, including truncated or hostile markup.
///
/// # Arguments
///
/// * `markup` - The fetched page markup
///
/// # Returns
///
/// The extracted signals, with absent fields for anything not found
///
/// # Example
///
/// ```
/// use profile_scout::probe::extract_signals;
///
/// let html = r#"<html><head>
///   <meta property="og:title" content="Real User (@realuser1)" />
/// </head></html>"#;
/// let signals = extract_signals(html);
/// assert_eq!(signals.title.as_deref(), Some("Real User (@realuser1)"));
/// assert!(signals.alternate_href.is_none());
/// ```
pub fn extract_signals(markup: &str) -> PageSignals {
    let document = Html::parse_document(markup);

    PageSignals {
        alternate_href: link_href(&document, "alternate"),
        title: meta_content(&document, "og:title"),
        description: meta_content(&document, "og:description"),
        image: meta_content(&document, "og:image"),
        kind: meta_content(&document, "og:type"),
        canonical_url: meta_content(&document, "og:url"),
    }
}

/// Extracts the content attribute of the first `<meta property="...">` match
fn meta_content(document: &Html, property: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[property="{}"]"#, property)).ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(str::to_string)
}

/// Extracts the href attribute of the first `<link rel="...">` match
fn link_href(document: &Html, rel: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"link[rel="{}"]"#, rel)).ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .map(str::to_string)
}

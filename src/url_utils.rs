//! URL Utility Functions
//!
//! Link resolution and comparison helpers used by the link normaliser, the
//! ads pruner and the link extractor. Every comparison against the current
//! page ignores the fragment, so same-page `#anchors` count as the page itself.

use url::Url;

/// Parse the page URL that the document was fetched from.
///
/// # Returns
/// * The parsed URL, or `None` when it is not an absolute URL
#[must_use]
pub fn parse_page_url(url_str: &str) -> Option<Url> {
    Url::parse(url_str.trim()).ok()
}

/// Resolve an `href` against the page URL, the way a browser computes `a.href`.
///
/// # Arguments
/// * `href` - Raw attribute value (relative or absolute)
/// * `base` - Page URL, if it could be parsed
///
/// # Returns
/// * The absolute URL string, or the parse error when the link cannot be resolved
pub fn resolve_link(href: &str, base: Option<&Url>) -> Result<String, url::ParseError> {
    let href = href.trim();

    match base {
        Some(base) => base.join(href).map(String::from),
        None => Url::parse(href).map(String::from),
    }
}

/// Resolve an `href`, falling back to the raw value when resolution fails.
#[must_use]
pub fn resolve_or_raw(href: &str, base: Option<&Url>) -> String {
    resolve_link(href, base).unwrap_or_else(|_| href.trim().to_string())
}

/// Drop the `#fragment` part of a URL string.
#[must_use]
pub fn strip_fragment(url_str: &str) -> &str {
    url_str.split('#').next().unwrap_or(url_str)
}

/// Check whether `href` points at the current page, ignoring fragments.
///
/// # Examples
///
/// ```
/// use tranquil_reader::url_utils::is_same_page;
///
/// assert!(is_same_page("https://a.com/post#toc", "https://a.com/post"));
/// assert!(!is_same_page("https://a.com/other", "https://a.com/post"));
/// ```
#[must_use]
pub fn is_same_page(href: &str, page_url: &str) -> bool {
    strip_fragment(href) == strip_fragment(page_url)
}

/// Check whether a link target uses the script protocol.
#[must_use]
pub fn is_script_url(href: &str) -> bool {
    href.trim_start()
        .get(..10)
        .is_some_and(|p| p.eq_ignore_ascii_case("javascript"))
}

//! # tranquil-reader
//!
//! Reading-view extraction for web pages.
//!
//! Turns a cluttered HTML page into a distraction-free reading view: hidden
//! elements, scripts, ads and link rails are pruned by visibility and
//! text-density heuristics, redundant wrappers are collapsed, images dropped
//! by the pruners are put back near their original position, and the result
//! is wrapped in a reading-view scaffold with pagination and "more links"
//! panels.
//!
//! ## Quick Start
//!
//! ```rust
//! use tranquil_reader::tranquilize;
//!
//! let html = r#"<html><head><title>My Article</title></head>
//! <body><article><h1>Headline</h1><p>Main content here.</p></article></body></html>"#;
//!
//! let result = tranquilize(html, "https://example.com/post")?;
//! assert_eq!(result.title.as_deref(), Some("My Article"));
//! assert!(result.content_text.contains("Main content here."));
//! # Ok::<(), tranquil_reader::Error>(())
//! ```
//!
//! ## Stages
//!
//! Every stage lives in [`extractor`] as a public function over a parsed
//! document, so callers can run a subset or test one heuristic in isolation.

mod error;
mod result;

/// Pipeline constants and runtime options.
pub mod options;

/// Compiled regex patterns shared by the stages.
pub mod patterns;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Resolved-style approximation (user-agent sheet, `<style>` rules, inline styles).
pub mod style;

/// Reading-view extraction stages and the pipeline that chains them.
pub mod extractor;

/// URL resolution and comparison helpers.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

// Public API - re-exports
pub use error::{Error, Result};
pub use extractor::{ImageRecord, LinkRecord};
pub use options::{Labels, Options};
pub use result::TranquilResult;

use extractor::assembly::{INNER_CONTAINER_ID, NAV_LINKS_ID, ORIGINAL_URL_DIV_ID};
use extractor::pipeline::{self, PipelineContext, PipelineOutput};

/// Builds the reading view of an HTML page using default options.
///
/// # Arguments
///
/// * `html` - The page's HTML
/// * `url` - The URL the page was fetched from; relative links resolve against it
///
/// # Example
///
/// ```rust
/// use tranquil_reader::tranquilize;
///
/// let html = "<html><body><p>Some readable text on the page.</p></body></html>";
/// let result = tranquilize(html, "https://example.com/")?;
/// assert!(result.html.contains("tranquility_container"));
/// # Ok::<(), tranquil_reader::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn tranquilize(html: &str, url: &str) -> Result<TranquilResult> {
    tranquilize_with_options(html, url, &Options::default())
}

/// Builds the reading view of an HTML page with custom options.
///
/// # Example
///
/// ```rust
/// use tranquil_reader::{tranquilize_with_options, Options};
///
/// let html = "<html><body><p>Some readable text on the page.</p></body></html>";
/// let options = Options {
///     build_reading_view: false,
///     ..Options::default()
/// };
/// let result = tranquilize_with_options(html, "https://example.com/", &options)?;
/// assert!(!result.html.contains("tranquility_container"));
/// # Ok::<(), tranquil_reader::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn tranquilize_with_options(html: &str, url: &str, options: &Options) -> Result<TranquilResult> {
    let doc = dom::parse(html);
    run_document(&doc, url, options)
}

/// Builds the reading view from raw bytes.
///
/// The bytes are decoded with `charset_hint` when it names a known encoding
/// (the HTTP `Content-Type` charset, typically). Otherwise the charset is
/// read from the page's `<meta>` declarations, with UTF-8 as the fallback.
/// Invalid sequences become U+FFFD rather than errors.
///
/// # Example
///
/// ```rust
/// use tranquil_reader::tranquilize_bytes;
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><p>Caf\xE9 au lait</p></body></html>";
/// let result = tranquilize_bytes(html, "https://example.com/", None)?;
/// assert!(result.content_text.contains("Café"));
/// # Ok::<(), tranquil_reader::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn tranquilize_bytes(html: &[u8], url: &str, charset_hint: Option<&str>) -> Result<TranquilResult> {
    tranquilize_bytes_with_options(html, url, charset_hint, &Options::default())
}

/// Builds the reading view from raw bytes with custom options.
#[allow(clippy::missing_errors_doc)]
pub fn tranquilize_bytes_with_options(
    html: &[u8],
    url: &str,
    charset_hint: Option<&str>,
    options: &Options,
) -> Result<TranquilResult> {
    let html_str = encoding::transcode_to_utf8(html, charset_hint);
    tranquilize_with_options(&html_str, url, options)
}

/// Builds the reading view of a user selection.
///
/// The page's body is replaced by `selection_html` before the pipeline runs,
/// so the page's head (title, styles) still applies.
///
/// # Errors
///
/// Returns [`Error::EmptySelection`] when the selection holds no element and
/// no visible text, and [`Error::NoContent`] when the page has no body.
pub fn tranquilize_selection(
    page_html: &str,
    selection_html: &str,
    url: &str,
    options: &Options,
) -> Result<TranquilResult> {
    if selection_html.trim().is_empty() {
        return Err(Error::EmptySelection);
    }

    let doc = dom::parse(page_html);
    let body = dom::body(&doc).ok_or(Error::NoContent)?;
    dom::Selection::from(body).set_html(selection_html);

    if pipeline::check_body(&doc).is_err() {
        return Err(Error::EmptySelection);
    }
    run_document(&doc, url, options)
}

/// Check whether a document already carries the reading-view scaffolding.
///
/// Callers use this to toggle back to the original page instead of running
/// the pipeline a second time.
#[must_use]
pub fn is_tranquilized(html: &str) -> bool {
    let doc = dom::parse(html);
    let Some(body) = dom::body(&doc) else {
        return false;
    };
    let body = dom::Selection::from(body);
    body.select(".tranquility").exists() || body.select(&format!("#{INNER_CONTAINER_ID}")).exists()
}

fn run_document(doc: &dom::Document, url: &str, options: &Options) -> Result<TranquilResult> {
    let ctx = PipelineContext::new(url, options);
    let PipelineOutput {
        images,
        reinserted_images,
        more_links,
        nav_links,
        warnings,
    } = pipeline::run(doc, &ctx)?;

    Ok(TranquilResult {
        html: doc.html().to_string(),
        title: page_title(doc),
        content_text: content_text(doc),
        images: images.into_vec(),
        reinserted_images,
        more_links: more_links.into_vec(),
        nav_links: nav_links.into_vec(),
        warnings,
    })
}

fn page_title(doc: &dom::Document) -> Option<String> {
    let title = squash_whitespace(&doc.select("head title").text());
    (!title.is_empty()).then_some(title)
}

/// Text of the reading container without the source line and pagination bar.
fn content_text(doc: &dom::Document) -> String {
    let root = doc
        .select(&format!("#{INNER_CONTAINER_ID}"))
        .nodes()
        .first()
        .copied()
        .or_else(|| dom::body(doc));
    let Some(root) = root else {
        return String::new();
    };

    let mut text = String::new();
    for child in dom::child_nodes(&root) {
        let id = dom::get_attribute(&child, "id");
        if matches!(id.as_deref(), Some(ORIGINAL_URL_DIV_ID | NAV_LINKS_ID)) {
            continue;
        }
        text.push_str(&dom::Selection::from(child).text());
        text.push(' ');
    }
    squash_whitespace(&text)
}

fn squash_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

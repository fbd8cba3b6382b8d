//! Reading-view pipeline.
//!
//! Runs every stage, in order, over one parsed document. The page URL and the
//! options travel in a [`PipelineContext`]; the harvested images and links
//! come back in a [`PipelineOutput`] so callers never depend on shared state.

use url::Url;

use crate::dom::{self, Document};
use crate::error::{Error, Result};
use crate::options::Options;
use crate::url_utils::parse_page_url;

use super::images::{harvest_images, reinsert_images, ImageCollection};
use super::links::{
    body_link_targets, convert_links_absolute, extract_supporting_links, remove_click_handler_links, MoreLinksSet,
    NavLinksSet,
};
use super::{ads, assembly, cleanup, collapse, indexer, pruning, tags, visibility};

/// Inputs shared by every stage of one run.
#[derive(Debug)]
pub struct PipelineContext<'o> {
    /// The URL the document was fetched from.
    pub page_url: String,
    /// `page_url` parsed, when it is an absolute URL.
    pub base: Option<Url>,
    pub options: &'o Options,
}

impl<'o> PipelineContext<'o> {
    #[must_use]
    pub fn new(page_url: &str, options: &'o Options) -> Self {
        let base = parse_page_url(page_url);
        if base.is_none() {
            tracing::debug!(page_url, "page URL is not absolute, relative links stay unresolved");
        }
        Self {
            page_url: page_url.trim().to_string(),
            base,
            options,
        }
    }
}

/// Everything a run produces besides the mutated document.
#[derive(Debug, Default)]
pub struct PipelineOutput {
    /// Harvested images still wanted in the reading view.
    pub images: ImageCollection,
    /// Images put back by the reinserter.
    pub reinserted_images: usize,
    pub more_links: MoreLinksSet,
    pub nav_links: NavLinksSet,
    /// Non-fatal issues, such as links that could not be resolved.
    pub warnings: Vec<String>,
}

/// Reject documents with nothing to read.
///
/// # Errors
///
/// Returns [`Error::NoContent`] when `<body>` is missing, or holds neither an
/// element nor any non-whitespace text.
pub fn check_body(doc: &Document) -> Result<()> {
    let body = dom::body(doc).ok_or(Error::NoContent)?;
    let has_element = dom::child_nodes(&body).iter().any(|n| n.is_element());
    if !has_element && dom::compute_size(&body) == 0 {
        return Err(Error::NoContent);
    }
    Ok(())
}

/// Run the whole pipeline over `doc`, mutating it in place.
///
/// # Errors
///
/// Returns [`Error::NoContent`] when the document has no body content.
pub fn run(doc: &Document, ctx: &PipelineContext) -> Result<PipelineOutput> {
    check_body(doc)?;

    let page_url = ctx.page_url.as_str();
    let base = ctx.base.as_ref();
    let options = ctx.options;
    let mut out = PipelineOutput::default();

    let removed = tags::strip_scripts(doc);
    tracing::debug!(removed, "scripts stripped");

    let removed = visibility::delete_hidden_elements(doc);
    tracing::debug!(removed, "hidden elements removed");

    let removed = visibility::delete_zero_size_images(doc);
    tracing::debug!(removed, "zero-size images removed");

    let indexed = indexer::index_body(doc);
    tracing::debug!(indexed, "tree indexed");

    out.images = harvest_images(doc, base);
    tracing::debug!(images = out.images.len(), "images harvested");

    let converted = convert_links_absolute(doc, base, &mut out.warnings);
    tracing::debug!(converted, failed = out.warnings.len(), "links made absolute");

    let removed = remove_click_handler_links(doc);
    tracing::debug!(removed, "click-handler links removed");

    let links = extract_supporting_links(doc, page_url, base, options);
    out.more_links = links.more;
    out.nav_links = links.nav;

    if options.single_article_shortcut && cleanup::keep_single_article(doc) {
        tracing::debug!("single article kept as body");
    }

    let changed = cleanup::normalize_whitespace_and_comments(doc);
    tracing::debug!(changed, "whitespace and comments normalised");

    let removed = tags::strip_disallowed_tags(doc);
    tracing::debug!(removed, "disallowed tags stripped");

    let removed = tags::reformat_head(doc);
    tracing::debug!(removed, "head reformatted");

    let removed = ads::prune_ads(doc, page_url, base, &mut out.images);
    tracing::debug!(removed, images = out.images.len(), "ads pruned");

    let removed = pruning::prune_content(doc);
    tracing::debug!(removed, "content pruned");

    let collapsed = collapse::collapse_wrappers(doc);
    tracing::debug!(collapsed, "wrappers collapsed");

    let touched = tags::reformat_tags(doc);
    tracing::debug!(touched, "tags reformatted");

    out.reinserted_images = reinsert_images(doc, &out.images, base);
    tracing::debug!(reinserted = out.reinserted_images, "images reinserted");

    if options.build_reading_view {
        assembly::assemble(doc, page_url, base, &mut out.more_links, &out.nav_links, options);
    } else {
        let dropped = out.more_links.filter(&body_link_targets(doc, base), page_url);
        tracing::debug!(dropped, "more links filtered");
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_body_content_is_rejected() {
        let doc = dom::parse("<html><head><title>No Body</title></head></html>");
        assert!(matches!(check_body(&doc), Err(Error::NoContent)));

        let doc = dom::parse("<html><body>   </body></html>");
        assert!(matches!(check_body(&doc), Err(Error::NoContent)));
    }

    #[test]
    fn bare_text_or_element_is_content() {
        assert!(check_body(&dom::parse("<body>hello</body>")).is_ok());
        assert!(check_body(&dom::parse("<body><img src='a.png'></body>")).is_ok());
    }

    #[test]
    fn context_keeps_unparseable_url_without_base() {
        let options = Options::default();
        let ctx = PipelineContext::new("not a url", &options);
        assert!(ctx.base.is_none());
        let ctx = PipelineContext::new(" https://example.com/a ", &options);
        assert_eq!(ctx.page_url, "https://example.com/a");
        assert!(ctx.base.is_some());
    }

    #[test]
    fn run_produces_reading_view() {
        let html = r#"<html><head><title>T</title><script>x()</script></head><body>
            <div><div><h1>Headline</h1><p>Paragraph one with enough words to keep.</p></div></div>
            </body></html>"#;
        let doc = dom::parse(html);
        let options = Options::default();
        let ctx = PipelineContext::new("https://example.com/a", &options);
        let out = run(&doc, &ctx).unwrap();
        assert!(out.warnings.is_empty());
        assert!(doc.select("#tranquility_innercontainer h1").exists());
        assert!(!doc.select("script").exists());
    }
}

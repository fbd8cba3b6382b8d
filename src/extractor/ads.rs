//! Ads pruner.
//!
//! Containers whose visible text is mostly off-page anchor text are link
//! clutter (ad blocks, related-story rails, tag clouds). They go, along with
//! the images they hold, unless they make up the bulk of the page.

use url::Url;

use crate::dom::{self, Document, NodeRef};
use crate::options::{ADS_LINK_DENSITY_THRESHOLD, MAJORITY_CONTENT_FRACTION};
use crate::url_utils::is_same_page;

use super::images::{purge_images_within, ImageCollection};
use super::links::anchor_href;

/// Containers examined by the ads pruner, in pass order.
pub const ADS_CANDIDATE_TAGS: [&str; 4] = ["ul", "div", "article", "section"];

/// Visible size of the anchors under `container` that leave the page.
#[must_use]
pub fn offsite_anchor_size(container: &NodeRef, page_url: &str, base: Option<&Url>) -> usize {
    dom::snapshot_within(container, "a")
        .iter()
        .filter(|a| !is_same_page(&anchor_href(a, base), page_url))
        .map(dom::compute_size)
        .sum()
}

/// One pass of the ads pruner over every `tag` element.
///
/// `total_size` is the document size measured when the pass starts. Empty
/// containers are removed outright. A container below the majority share of
/// the document whose off-page anchor ratio reaches `threshold` is removed
/// and its images are purged from `images`. Heading holders are skipped.
pub fn prune_ads_tag(
    doc: &Document,
    page_url: &str,
    base: Option<&Url>,
    tag: &str,
    threshold: f64,
    total_size: usize,
    images: &mut ImageCollection,
) -> usize {
    let mut removed = 0;
    for node in dom::snapshot(doc, tag).iter().rev() {
        if !dom::is_connected(node, doc) || dom::contains_heading(node) {
            continue;
        }

        let size = dom::compute_size(node);
        if size == 0 {
            dom::remove(node);
            removed += 1;
            continue;
        }

        let share = size as f64 / total_size as f64;
        if share >= MAJORITY_CONTENT_FRACTION {
            continue;
        }

        let link_ratio = offsite_anchor_size(node, page_url, base) as f64 / size as f64;
        if link_ratio >= threshold {
            tracing::trace!(tag, size, link_ratio, "link block removed");
            purge_images_within(node, images, base);
            dom::remove(node);
            removed += 1;
        }
    }
    removed
}

/// Run the ads pruner over all candidate tags.
pub fn prune_ads(doc: &Document, page_url: &str, base: Option<&Url>, images: &mut ImageCollection) -> usize {
    ADS_CANDIDATE_TAGS
        .iter()
        .map(|tag| {
            let total = dom::document_size(doc);
            prune_ads_tag(doc, page_url, base, tag, ADS_LINK_DENSITY_THRESHOLD, total, images)
        })
        .sum()
}

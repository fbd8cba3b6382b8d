//! Content pruner.
//!
//! Removes containers that are mostly markup and little text. Runs three
//! passes: a broad one over common block tags, a narrow one over wrappers,
//! then the broad list again to sweep up what the narrow pass exposed.

use crate::dom::{self, Document};
use crate::options::{CONTENT_PRUNE_PCTG, CONTENT_RATIO_THRESHOLD, PRUNE_MIN_SIZES};

/// Tags examined by the first and third pass.
pub const BROAD_PRUNE_TAGS: [&str; 10] = [
    "li", "div", "ol", "ul", "form", "table", "article", "section", "span", "p",
];

/// Tags examined by the second pass.
pub const NARROW_PRUNE_TAGS: [&str; 4] = ["form", "div", "article", "section"];

/// Decide whether a container should be pruned.
///
/// `size` is the visible text size, `markup_len` the raw length of its
/// children. An empty container always goes. Otherwise it goes when its
/// text-to-markup ratio is under [`CONTENT_RATIO_THRESHOLD`] while its share
/// of the document is under `threshold_pctg`, or when it is no larger than
/// `min_size`.
#[must_use]
pub fn should_prune(size: usize, markup_len: usize, total_size: usize, threshold_pctg: f64, min_size: usize) -> bool {
    if size == 0 {
        return true;
    }
    let ratio = size as f64 / (markup_len + 1) as f64;
    let pctg = size as f64 / total_size as f64;
    (ratio < CONTENT_RATIO_THRESHOLD && pctg < threshold_pctg) || size <= min_size
}

/// One pruning pass over every `tag` element. Heading holders are skipped.
pub fn prune_tag(doc: &Document, tag: &str, threshold_pctg: f64, min_size: usize, total_size: usize) -> usize {
    let mut removed = 0;
    for node in dom::snapshot(doc, tag).iter().rev() {
        if !dom::is_connected(node, doc) || dom::contains_heading(node) {
            continue;
        }
        let size = dom::compute_size(node);
        let markup = dom::markup_len(node);
        if should_prune(size, markup, total_size, threshold_pctg, min_size) {
            tracing::trace!(tag, size, markup, "container pruned");
            dom::remove(node);
            removed += 1;
        }
    }
    removed
}

/// Run the three content-pruning passes. The document size is re-measured
/// before every tag.
pub fn prune_content(doc: &Document) -> usize {
    let passes: [&[&str]; 3] = [&BROAD_PRUNE_TAGS, &NARROW_PRUNE_TAGS, &BROAD_PRUNE_TAGS];
    let mut removed = 0;
    for (tags, min_size) in passes.iter().zip(PRUNE_MIN_SIZES) {
        for tag in *tags {
            let total = dom::document_size(doc);
            removed += prune_tag(doc, tag, CONTENT_PRUNE_PCTG, min_size, total);
        }
    }
    removed
}

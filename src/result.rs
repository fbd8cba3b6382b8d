//! Result type for the reading-view pipeline.

use serde::Serialize;

use crate::extractor::{ImageRecord, LinkRecord};

/// Output of one reading-view run.
///
/// `html` is the whole transformed document. The remaining fields expose what
/// the pipeline gathered along the way so a caller can render menus or panels
/// without re-parsing the output.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TranquilResult {
    /// Serialized output document.
    pub html: String,

    /// Page title from `<head><title>`.
    pub title: Option<String>,

    /// Whitespace-collapsed text of the reading container.
    pub content_text: String,

    /// Harvested images that were not purged as link clutter, in harvest order.
    pub images: Vec<ImageRecord>,

    /// Number of images put back after pruning.
    pub reinserted_images: usize,

    /// Long-caption links shown behind the "more links" button.
    pub more_links: Vec<LinkRecord>,

    /// Pagination links shown around the content.
    pub nav_links: Vec<LinkRecord>,

    /// Non-fatal issues met during the run.
    pub warnings: Vec<String>,
}

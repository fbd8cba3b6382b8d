//! Image harvesting and reinsertion.
//!
//! Images are recorded with their pre-order index before any pruning. Once the
//! pruners are done, images that went missing are put back next to the
//! surviving element whose index is closest, unless the ads pruner purged them
//! as part of a link-heavy block.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use url::Url;

use crate::dom::{self, Document, NodeRef, Selection};
use crate::options::INDEX_ATTR;
use crate::url_utils::resolve_or_raw;

use super::indexer::preorder_index;

/// An image seen in the original document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    /// Source URL, resolved against the page URL.
    pub src: String,
    /// Alternate text (empty when absent).
    pub alt: String,
    /// Pre-order index of the `<img>` in the original body.
    pub index: usize,
}

/// Images keyed by source URL, in first-seen order.
///
/// A later image with the same source replaces the earlier record in place.
#[derive(Debug, Clone, Default)]
pub struct ImageCollection {
    records: Vec<Option<ImageRecord>>,
    positions: HashMap<String, usize>,
}

impl ImageCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the record for `record.src`.
    pub fn insert(&mut self, record: ImageRecord) {
        match self.positions.get(&record.src) {
            Some(&pos) => self.records[pos] = Some(record),
            None => {
                self.positions.insert(record.src.clone(), self.records.len());
                self.records.push(Some(record));
            }
        }
    }

    /// Drop the record for `src`, if any.
    pub fn remove(&mut self, src: &str) -> Option<ImageRecord> {
        let pos = self.positions.remove(src)?;
        self.records[pos].take()
    }

    #[must_use]
    pub fn get(&self, src: &str) -> Option<&ImageRecord> {
        self.positions
            .get(src)
            .and_then(|&pos| self.records[pos].as_ref())
    }

    #[must_use]
    pub fn contains(&self, src: &str) -> bool {
        self.positions.contains_key(src)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageRecord> {
        self.records.iter().flatten()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<ImageRecord> {
        self.records.into_iter().flatten().collect()
    }
}

/// Resolved source of an `<img>`; `None` when it has no usable `src`.
#[must_use]
pub fn image_source(img: &NodeRef, base: Option<&Url>) -> Option<String> {
    let src = img.attr("src")?;
    let src = src.trim();
    if src.is_empty() {
        return None;
    }
    Some(resolve_or_raw(src, base))
}

/// Record every image in the body. Must run after the tree indexer.
///
/// Each `src` is rewritten to its resolved form, so images that survive in
/// place carry the same absolute URL as reinserted ones.
#[must_use]
pub fn harvest_images(doc: &Document, base: Option<&Url>) -> ImageCollection {
    let mut images = ImageCollection::new();
    let Some(body) = dom::body(doc) else {
        return images;
    };

    for img in dom::snapshot_within(&body, "img") {
        let Some(src) = image_source(&img, base) else {
            continue;
        };
        let Some(index) = preorder_index(&img) else {
            tracing::trace!(src = %src, "image without index skipped");
            continue;
        };
        img.set_attr("src", &src);
        images.insert(ImageRecord {
            src,
            alt: img.attr("alt").map(|a| a.to_string()).unwrap_or_default(),
            index,
        });
    }
    images
}

/// Forget every image inside `container` (called before the container is removed).
pub fn purge_images_within(container: &NodeRef, images: &mut ImageCollection, base: Option<&Url>) {
    for img in dom::snapshot_within(container, "img") {
        if let Some(src) = image_source(&img, base) {
            if images.remove(&src).is_some() {
                tracing::trace!(src = %src, "image purged with link block");
            }
        }
    }
}

/// Put back harvested images that are no longer in the body.
///
/// Each missing image goes right before the surviving element with the
/// smallest index greater than its own; failing that, right after the one
/// with the largest smaller index. With neither, the image is dropped.
/// Returns the number of images reinserted.
pub fn reinsert_images(doc: &Document, images: &ImageCollection, base: Option<&Url>) -> usize {
    let Some(body) = dom::body(doc) else {
        return 0;
    };

    let mut present: HashSet<String> = dom::snapshot_within(&body, "img")
        .iter()
        .filter_map(|img| image_source(img, base))
        .collect();

    let mut reinserted = 0;
    for record in images.iter() {
        if present.contains(&record.src) {
            continue;
        }

        let mut next: Option<(usize, NodeRef)> = None;
        let mut prev: Option<(usize, NodeRef)> = None;
        for el in Selection::from(body).select("*").nodes() {
            let Some(idx) = preorder_index(el) else {
                continue;
            };
            if idx > record.index && next.as_ref().is_none_or(|(n, _)| idx < *n) {
                next = Some((idx, *el));
            } else if idx < record.index && prev.as_ref().is_none_or(|(p, _)| idx > *p) {
                prev = Some((idx, *el));
            }
        }

        let index = record.index.to_string();
        let img = dom::create_element(
            doc,
            "img",
            &[
                ("src", record.src.as_str()),
                ("alt", record.alt.as_str()),
                (INDEX_ATTR, index.as_str()),
            ],
        );
        match (next, prev) {
            (Some((_, anchor)), _) => anchor.insert_before(&img),
            (None, Some((_, anchor))) => anchor.insert_after(&img),
            (None, None) => {
                tracing::trace!(src = %record.src, "no surviving neighbour, image dropped");
                continue;
            }
        }
        present.insert(record.src.clone());
        reinserted += 1;
    }
    reinserted
}

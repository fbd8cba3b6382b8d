//! Link normalisation and extraction.
//!
//! Anchors are rewritten to absolute URLs, click-handler widgets are cut out,
//! and two supporting link sets are harvested before pruning: long-caption
//! "more links" and short pagination links for the navigation bar.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use url::Url;

use crate::dom::{self, Document, NodeRef};
use crate::options::{Options, MORE_LINK_MIN_TEXT_LEN};
use crate::patterns::{ANY_WHITESPACE, INTEGER_TEXT, RAW_URL_PREFIX};
use crate::url_utils::{is_same_page, is_script_url, resolve_link, resolve_or_raw, strip_fragment};

/// A copy of an anchor harvested before pruning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRecord {
    /// Absolute target.
    pub href: String,
    /// Text content with whitespace runs collapsed.
    pub text: String,
    /// Non-whitespace length of `text`.
    pub text_len: usize,
    /// Remaining attributes of the anchor, for rendering.
    #[serde(skip)]
    pub attrs: Vec<(String, String)>,
}

impl LinkRecord {
    /// Copy an anchor. `href` is the already-resolved target.
    #[must_use]
    pub fn from_anchor(anchor: &NodeRef, href: String) -> Self {
        let text = dom::collapsed_text(anchor);
        let text_len = text.chars().filter(|c| !c.is_whitespace()).count();
        let attrs = anchor
            .attrs()
            .iter()
            .map(|a| (a.name.local.to_string(), a.value.to_string()))
            .filter(|(name, _)| name != "href")
            .collect();
        Self {
            href,
            text,
            text_len,
            attrs,
        }
    }

    /// Text with every whitespace character removed.
    #[must_use]
    pub fn compact_text(&self) -> String {
        ANY_WHITESPACE.replace_all(&self.text, "").into_owned()
    }
}

// === Link normalisation ===

/// Resolved target of an anchor, as a browser reports `a.href`.
///
/// An anchor without `href` yields an empty string.
#[must_use]
pub fn anchor_href(anchor: &NodeRef, base: Option<&Url>) -> String {
    anchor
        .attr("href")
        .map(|h| resolve_or_raw(&h, base))
        .unwrap_or_default()
}

/// Rewrite every anchor `href` to its absolute form.
///
/// A link that cannot be resolved keeps its raw value; the failure is logged
/// and pushed onto `warnings`. Returns the number of rewritten links.
pub fn convert_links_absolute(doc: &Document, base: Option<&Url>, warnings: &mut Vec<String>) -> usize {
    let mut converted = 0;
    for anchor in dom::snapshot(doc, "a") {
        let Some(href) = anchor.attr("href") else {
            continue;
        };
        match resolve_link(&href, base) {
            Ok(absolute) => {
                anchor.set_attr("href", &absolute);
                converted += 1;
            }
            Err(err) => {
                tracing::warn!(href = %href, error = %err, "could not resolve link");
                warnings.push(format!("could not resolve link {:?}: {err}", href.to_string()));
            }
        }
    }
    converted
}

/// Remove anchors that carry an `onclick` handler, with their husk.
///
/// Ancestors whose visible size equals the anchor's hold nothing else and go
/// too. The walk stops below `<body>`.
pub fn remove_click_handler_links(doc: &Document) -> usize {
    let mut removed = 0;
    for anchor in dom::snapshot(doc, "a").iter().rev() {
        if anchor.attr("onclick").is_none() || !dom::is_connected(anchor, doc) {
            continue;
        }
        let husk = outermost_husk(anchor);
        tracing::trace!(tag = ?dom::tag_name(&husk), "click-handler widget removed");
        dom::remove(&husk);
        removed += 1;
    }
    removed
}

fn outermost_husk<'a>(node: &NodeRef<'a>) -> NodeRef<'a> {
    let size = dom::compute_size(node);
    let mut target = *node;
    while let Some(parent) = target.parent() {
        if !parent.is_element() || dom::is_tag(&parent, "body") || dom::is_tag(&parent, "html") {
            break;
        }
        if dom::compute_size(&parent) != size {
            break;
        }
        target = parent;
    }
    target
}

/// Mark anchors as reading-view links.
///
/// Every anchor except the link back to the original page loses `target`,
/// `class` and `onmousedown`, then gets the `tranquil_browsing_mode_link` class.
pub fn normalize_anchor_attributes(doc: &Document) -> usize {
    let mut touched = 0;
    for anchor in dom::snapshot(doc, "a") {
        if is_original_link(&anchor) {
            continue;
        }
        for name in ["target", "class", "onmousedown"] {
            anchor.remove_attr(name);
        }
        anchor.set_attr("class", "tranquil_browsing_mode_link");
        touched += 1;
    }
    touched
}

fn is_original_link(anchor: &NodeRef) -> bool {
    dom::get_attribute(anchor, "id").is_some_and(|id| id == "tranquility_original_link_anchor")
}

// === Supporting link sets ===

/// Anchors with long captions, shown behind the "more links" button.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct MoreLinksSet {
    links: Vec<LinkRecord>,
}

impl MoreLinksSet {
    pub fn push(&mut self, link: LinkRecord) {
        self.links.push(link);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LinkRecord> {
        self.links.iter()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<LinkRecord> {
        self.links
    }

    /// Drop entries the reader would not want to follow.
    ///
    /// Removed: links already present in the body, script links, links to the
    /// current page, captions that start with a raw URL, and repeated targets
    /// (the earliest copy is kept). Returns the number removed.
    pub fn filter(&mut self, body_hrefs: &HashSet<String>, page_url: &str) -> usize {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for link in &self.links {
            *counts.entry(link.href.clone()).or_default() += 1;
        }

        let mut keep = vec![true; self.links.len()];
        for (i, link) in self.links.iter().enumerate().rev() {
            let drop = if body_hrefs.contains(&link.href)
                || is_script_url(&link.href)
                || is_same_page(&link.href, page_url)
                || RAW_URL_PREFIX.is_match(&link.text)
            {
                true
            } else {
                match counts.get_mut(&link.href) {
                    Some(count) if *count > 1 => {
                        *count -= 1;
                        true
                    }
                    _ => false,
                }
            };
            keep[i] = !drop;
        }

        let before = self.links.len();
        let mut flags = keep.into_iter();
        self.links.retain(|_| flags.next().unwrap_or(false));
        before - self.links.len()
    }
}

/// Pagination anchors ("Next", "2", "»") shown above and below the content.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct NavLinksSet {
    links: Vec<LinkRecord>,
}

impl NavLinksSet {
    pub fn push(&mut self, link: LinkRecord) {
        self.links.push(link);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LinkRecord> {
        self.links.iter()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<LinkRecord> {
        self.links
    }

    /// Combined visible size of all captions.
    #[must_use]
    pub fn total_size(&self) -> usize {
        self.links.iter().map(|l| l.text_len).sum()
    }

    /// Number of entries whose caption is a bare integer.
    #[must_use]
    pub fn integer_link_count(&self) -> usize {
        self.links
            .iter()
            .filter(|l| INTEGER_TEXT.is_match(&l.compact_text()))
            .count()
    }

    /// Drop implausible page numbers, repeated captions and self links.
    ///
    /// A page number larger than the integer-link count plus one is not a
    /// neighbouring page. For repeated captions the first occurrence wins.
    /// Returns the number removed.
    pub fn cleanup(&mut self, page_url: &str) -> usize {
        let limit = self.integer_link_count() as u64 + 1;
        let mut seen: HashSet<String> = HashSet::new();

        let before = self.links.len();
        self.links.retain(|link| {
            let compact = link.compact_text();
            let too_large = INTEGER_TEXT.is_match(&compact)
                && compact.parse::<u64>().map_or(true, |n| n > limit);
            let duplicate = !seen.insert(compact);
            !(too_large || duplicate || is_same_page(&link.href, page_url))
        });
        before - self.links.len()
    }
}

/// Both supporting link sets.
#[derive(Debug, Clone, Default)]
pub struct SupportingLinks {
    pub more: MoreLinksSet,
    pub nav: NavLinksSet,
}

/// Harvest the supporting link sets from every anchor in the document.
///
/// Runs before pruning, after links are absolute. The navigation set is
/// cleaned up here; the more-links set is filtered at assembly time against
/// the final body.
#[must_use]
pub fn extract_supporting_links(
    doc: &Document,
    page_url: &str,
    base: Option<&Url>,
    options: &Options,
) -> SupportingLinks {
    let mut links = SupportingLinks::default();

    for anchor in dom::snapshot(doc, "a") {
        let href = anchor_href(&anchor, base);
        let record = LinkRecord::from_anchor(&anchor, href);

        if record.text.chars().count() >= MORE_LINK_MIN_TEXT_LEN {
            links.more.push(record.clone());
        }

        let compact = record.compact_text();
        if compact.is_empty() {
            continue;
        }
        let is_nav_caption = options.is_navigation_word(&compact) || INTEGER_TEXT.is_match(&compact);
        if is_nav_caption && anchor.attr("onclick").is_none() && is_followable(&anchor, &record.href, page_url) {
            links.nav.push(record);
        }
    }

    let dropped = links.nav.cleanup(page_url);
    tracing::debug!(
        more = links.more.len(),
        nav = links.nav.len(),
        nav_dropped = dropped,
        "supporting links harvested"
    );
    links
}

fn is_followable(anchor: &NodeRef, href: &str, page_url: &str) -> bool {
    let Some(raw) = anchor.attr("href") else {
        return false;
    };
    let raw = raw.trim();
    if raw.is_empty() || raw.starts_with('#') || href.is_empty() {
        return false;
    }
    if href == format!("{}#", strip_fragment(page_url)) {
        return false;
    }
    !is_script_url(href)
}

/// Resolved targets of every anchor currently in the body.
#[must_use]
pub fn body_link_targets(doc: &Document, base: Option<&Url>) -> HashSet<String> {
    dom::body(doc)
        .map(|body| {
            dom::snapshot_within(&body, "a")
                .iter()
                .map(|a| anchor_href(a, base))
                .collect()
        })
        .unwrap_or_default()
}

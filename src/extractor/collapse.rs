//! Parent collapser.
//!
//! A `div` inside a `div` (or `span` inside a `span`) that carries all of its
//! parent's text makes the parent redundant. The child takes the parent's
//! place and the parent, with whatever empty siblings it held, goes away.

use std::cmp::Reverse;

use crate::dom::{self, Document, NodeRef};
use crate::options::{COLLAPSE_ITERATIONS, COLLAPSE_THRESHOLD};

/// Tags the collapser works on.
pub const COLLAPSE_TAGS: [&str; 2] = ["div", "span"];

/// Collapse `node` into its parent when it holds more than `threshold` of the
/// parent's visible text and both share the same tag.
///
/// With a grandparent, the child moves to the parent's position and the
/// parent is removed. A parent without its own parent (a detached root) keeps
/// only the child. Returns whether anything changed.
pub fn collapse_into_parent(node: &NodeRef, threshold: f64) -> bool {
    let (Some(tag), Some(parent)) = (dom::tag_name(node), node.parent()) else {
        return false;
    };
    if !dom::is_tag(&parent, &tag) {
        return false;
    }

    let parent_size = dom::compute_size(&parent);
    if parent_size == 0 {
        return false;
    }
    let ratio = dom::compute_size(node) as f64 / parent_size as f64;
    if ratio <= threshold {
        return false;
    }

    if parent.parent().is_some() {
        node.remove_from_parent();
        parent.insert_before(node);
        parent.remove_from_parent();
    } else {
        for sibling in dom::child_nodes(&parent) {
            if sibling.id != node.id {
                sibling.remove_from_parent();
            }
        }
    }
    true
}

/// One collapse round over every `tag` element.
///
/// Elements are ordered by markup length, largest first, then visited from
/// the back so the innermost wrappers collapse first.
pub fn replace_parent(doc: &Document, tag: &str, threshold: f64) -> usize {
    let mut elements = dom::snapshot(doc, tag);
    elements.sort_by_key(|n| Reverse(dom::markup_len(n)));

    let mut collapsed = 0;
    for node in elements.iter().rev() {
        if !dom::is_connected(node, doc) {
            continue;
        }
        if collapse_into_parent(node, threshold) {
            collapsed += 1;
        }
    }
    collapsed
}

/// Run every collapse round.
pub fn collapse_wrappers(doc: &Document) -> usize {
    let mut collapsed = 0;
    for _ in 0..COLLAPSE_ITERATIONS {
        for tag in COLLAPSE_TAGS {
            collapsed += replace_parent(doc, tag, COLLAPSE_THRESHOLD);
        }
    }
    collapsed
}

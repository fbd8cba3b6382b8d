//! Tag stripping and reformatting.
//!
//! Catalogs of the tags the pipeline removes or restyles, plus the stages that
//! act on them: script stripping, the disallowed-tag stripper, the head
//! reformat and the final tag reformat that tags survivors with the reading
//! view's classes.

use crate::dom::{self, Document, NodeRef};
use crate::options::RESERVED_ID_PREFIX;
use crate::patterns::EMBED_ALLOW_LIST;

/// Script-bearing tags removed right after the body check.
pub const SCRIPT_TAGS: [&str; 2] = ["script", "noscript"];

/// Tags removed wholesale by the tag stripper.
pub const DISALLOWED_TAGS: [&str; 18] = [
    "style", "link", "meta", "script", "noscript", "iframe", "select", "dd", "input", "textarea",
    "header", "footer", "nav", "form", "button", "picture", "figure", "svg",
];

/// Tags whose presentation attributes are replaced by the reading-view class.
pub const REFORMAT_TAGS: [&str; 14] = [
    "ul", "ol", "li", "div", "span", "p", "font", "body", "h1", "h2", "h3", "table", "article",
    "section",
];

/// Class given to reformatted elements.
pub const REFORMAT_CLASS: &str = "tranquility";

/// Class given to `<pre>` elements.
pub const REFORMAT_PRE_CLASS: &str = "tranquility_pre";

/// Check whether an element must survive tag stripping.
///
/// Headings (and anything holding one), pipeline scaffolding and embedded
/// frames from trusted video hosts are kept.
#[must_use]
pub fn is_protected(node: &NodeRef, tag: &str) -> bool {
    if tag == "iframe"
        && node
            .attr("src")
            .is_some_and(|src| EMBED_ALLOW_LIST.is_match(&src))
    {
        return true;
    }
    if dom::get_attribute(node, "id").is_some_and(|id| id.starts_with(RESERVED_ID_PREFIX)) {
        return true;
    }
    dom::contains_heading(node)
}

/// Remove every unprotected element with the given tag. Returns the number removed.
pub fn remove_tag(doc: &Document, tag: &str) -> usize {
    let mut removed = 0;
    for node in dom::snapshot(doc, tag).iter().rev() {
        if is_protected(node, tag) {
            continue;
        }
        dom::remove(node);
        removed += 1;
    }
    removed
}

/// Remove script and noscript elements.
pub fn strip_scripts(doc: &Document) -> usize {
    SCRIPT_TAGS.iter().map(|tag| remove_tag(doc, tag)).sum()
}

/// Remove every disallowed tag.
pub fn strip_disallowed_tags(doc: &Document) -> usize {
    DISALLOWED_TAGS.iter().map(|tag| remove_tag(doc, tag)).sum()
}

/// Remove everything in `<head>` except the title.
pub fn reformat_head(doc: &Document) -> usize {
    let Some(head) = dom::head(doc) else {
        return 0;
    };
    let mut removed = 0;
    for child in dom::child_nodes(&head) {
        if dom::is_tag(&child, "title") {
            continue;
        }
        dom::remove(&child);
        removed += 1;
    }
    removed
}

/// Replace presentation attributes with the reading-view classes.
///
/// `class`, `style` and `width` are dropped from every reformat tag.
pub fn reformat_tags(doc: &Document) -> usize {
    let mut touched = 0;
    for tag in REFORMAT_TAGS {
        for node in dom::snapshot(doc, tag) {
            reset_presentation(&node, REFORMAT_CLASS);
            touched += 1;
        }
    }
    for node in dom::snapshot(doc, "pre") {
        reset_presentation(&node, REFORMAT_PRE_CLASS);
        touched += 1;
    }
    touched
}

fn reset_presentation(node: &NodeRef, class: &str) {
    node.remove_attr("style");
    node.remove_attr("width");
    node.set_attr("class", class);
}

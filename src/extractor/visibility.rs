//! Visibility filters.
//!
//! Removes elements the page would not render: anything whose resolved style
//! hides it, and images declared with a zero width or height (tracking pixels).

use crate::dom::{self, Document, NodeRef};
use crate::style::ResolvedStyles;

/// Elements never removed by the hidden-element filter.
pub const PROTECTED_TAGS: [&str; 4] = ["html", "head", "title", "body"];

/// Remove every element whose resolved style hides it.
///
/// Styles are resolved once, before any removal. Elements are visited from
/// the end of the document so descendants go before their ancestors.
pub fn delete_hidden_elements(doc: &Document) -> usize {
    let styles = ResolvedStyles::resolve(doc);
    let mut removed = 0;

    for node in dom::snapshot(doc, "*").iter().rev() {
        let Some(tag) = dom::tag_name(node) else {
            continue;
        };
        if PROTECTED_TAGS.contains(&tag.as_str()) {
            continue;
        }
        if styles.is_hidden(node) {
            tracing::trace!(tag = %tag, "hidden element removed");
            dom::remove(node);
            removed += 1;
        }
    }
    removed
}

/// Remove images whose `height` or `width` attribute parses to zero.
pub fn delete_zero_size_images(doc: &Document) -> usize {
    let mut removed = 0;
    for img in dom::snapshot(doc, "img").iter().rev() {
        if has_zero_dimension(img) {
            dom::remove(img);
            removed += 1;
        }
    }
    removed
}

fn has_zero_dimension(img: &NodeRef) -> bool {
    ["height", "width"]
        .iter()
        .filter_map(|name| img.attr(name))
        .any(|value| parse_leading_int(&value) == Some(0))
}

/// Integer prefix of an attribute value, the way browsers read `width="0px"`.
fn parse_leading_int(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (sign, digits) = match value.as_bytes().first() {
        Some(b'-') => (-1, &value[1..]),
        Some(b'+') => (1, &value[1..]),
        _ => (1, value),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

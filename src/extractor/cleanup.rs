//! Text and structure cleanup stages.

use crate::dom::{self, Document, NodeRef};
use crate::patterns::WHITESPACE_RUN;

/// Replace the body with the document's only `<article>`, if there is exactly one.
///
/// Returns whether the shortcut was taken.
pub fn keep_single_article(doc: &Document) -> bool {
    let articles = dom::snapshot(doc, "article");
    let ([article], Some(body)) = (articles.as_slice(), dom::body(doc)) else {
        return false;
    };
    if !dom::is_connected(article, doc) {
        return false;
    }

    dom::remove(article);
    for child in dom::child_nodes(&body) {
        dom::remove(&child);
    }
    body.append_child(article);
    true
}

/// Collapse whitespace runs in text nodes and drop comments.
///
/// Only the body is walked; text inside `<pre>` is left untouched.
pub fn normalize_whitespace_and_comments(doc: &Document) -> usize {
    let Some(root) = dom::body(doc) else {
        return 0;
    };

    let mut changed = 0;
    let mut stack: Vec<NodeRef> = vec![root];
    while let Some(node) = stack.pop() {
        for child in dom::child_nodes(&node) {
            if child.is_element() {
                if !dom::is_tag(&child, "pre") {
                    stack.push(child);
                }
            } else if child.is_text() {
                let text = child.text();
                if WHITESPACE_RUN.is_match(&text) {
                    let collapsed = WHITESPACE_RUN.replace_all(&text, " ");
                    dom::replace_text(&child, doc, &collapsed);
                    changed += 1;
                }
            } else {
                dom::remove(&child);
                changed += 1;
            }
        }
    }
    changed
}

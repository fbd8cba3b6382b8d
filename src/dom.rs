//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate used by every pipeline stage.
//! `dom_query` keeps nodes in an arena: a `NodeRef` is an id into the tree
//! plus a borrow of it, parents are navigation links only, and detaching a
//! node detaches its whole subtree in one step.

// Re-export core types for external use
pub use dom_query::{Document, NodeId, NodeRef, Selection};

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(node: &NodeRef) -> Option<String> {
    if !node.is_element() {
        return None;
    }
    node.node_name().map(|t| t.to_ascii_lowercase())
}

/// Check whether `node` is an element with the given (lowercase) tag name
#[must_use]
pub fn is_tag(node: &NodeRef, tag: &str) -> bool {
    tag_name(node).is_some_and(|t| t == tag)
}

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(node: &NodeRef, name: &str) -> Option<String> {
    node.attr(name).map(|s| s.to_string())
}

// === Measurements ===

/// Visible text size: text content with every whitespace character removed.
///
/// This is the size metric shared by the ads pruner, the content pruner and
/// the parent collapser.
#[must_use]
pub fn compute_size(node: &NodeRef) -> usize {
    if !node.is_element() && !node.is_text() {
        return 0;
    }
    Selection::from(*node)
        .text()
        .chars()
        .filter(|c| !c.is_whitespace())
        .count()
}

/// Visible text size of a whole document (from its root element).
#[must_use]
pub fn document_size(doc: &Document) -> usize {
    doc.select("html")
        .nodes()
        .first()
        .map_or(0, compute_size)
}

/// Raw markup length of an element's children (tags, attributes and text).
#[must_use]
pub fn markup_len(node: &NodeRef) -> usize {
    Selection::from(*node).inner_html().chars().count()
}

/// Text content with runs of whitespace collapsed to one space.
#[must_use]
pub fn collapsed_text(node: &NodeRef) -> String {
    let text = Selection::from(*node).text();
    crate::patterns::WHITESPACE_RUN
        .replace_all(&text, " ")
        .into_owned()
}

/// Check whether an element is, or contains, a top-level heading.
#[must_use]
pub fn contains_heading(node: &NodeRef) -> bool {
    is_tag(node, "h1") || Selection::from(*node).select("h1").exists()
}

// === Tree Navigation ===

/// The document's `<body>` element, if present
#[must_use]
pub fn body(doc: &Document) -> Option<NodeRef<'_>> {
    doc.select("body").nodes().first().copied()
}

/// The document's `<head>` element, if present
#[must_use]
pub fn head(doc: &Document) -> Option<NodeRef<'_>> {
    doc.select("head").nodes().first().copied()
}

/// Direct child nodes (elements, text and comments) in document order
#[must_use]
pub fn child_nodes<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut out = Vec::new();
    let mut child = node.first_child();
    while let Some(c) = child {
        child = c.next_sibling();
        out.push(c);
    }
    out
}

/// Check whether a node is still attached under the document root.
///
/// Stages work on snapshots; an entry whose ancestor was removed earlier in
/// the same pass is detached and must be skipped.
#[must_use]
pub fn is_connected(node: &NodeRef, doc: &Document) -> bool {
    let root_id = doc.root().id;
    let mut current = *node;
    while let Some(parent) = current.parent() {
        current = parent;
    }
    current.id == root_id
}

/// Snapshot every element with the given tag name, in document order.
///
/// Deleting while iterating a live query skips or revisits elements; every
/// stage iterates over this copy instead.
#[must_use]
pub fn snapshot<'a>(doc: &'a Document, tag: &str) -> Vec<NodeRef<'a>> {
    doc.select(tag).nodes().to_vec()
}

/// Snapshot matching descendants of a single node, in document order.
#[must_use]
pub fn snapshot_within<'a>(node: &NodeRef<'a>, tag: &str) -> Vec<NodeRef<'a>> {
    Selection::from(*node).select(tag).nodes().to_vec()
}

/// Every element and leaf under `root` (inclusive) in pre-order.
#[must_use]
pub fn preorder<'a>(root: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut out = Vec::new();
    let mut stack = vec![*root];
    while let Some(node) = stack.pop() {
        out.push(node);
        let mut children = child_nodes(&node);
        children.reverse();
        stack.extend(children);
    }
    out
}

// === Tree Manipulation ===

/// Detach a node and its whole subtree
#[inline]
pub fn remove(node: &NodeRef) {
    node.remove_from_parent();
}

/// Insert `child` as the first child of `parent`
pub fn prepend(parent: &NodeRef, child: &NodeRef) {
    match parent.first_child() {
        Some(first) => first.insert_before(child),
        None => parent.append_child(child),
    }
}

/// Replace a text node's contents
pub fn replace_text(node: &NodeRef, doc: &Document, text: &str) {
    let replacement = doc.tree.new_text(text);
    node.insert_before(&replacement);
    node.remove_from_parent();
}

/// Create a detached element with attributes
#[must_use]
pub fn create_element<'a>(doc: &'a Document, tag: &str, attrs: &[(&str, &str)]) -> NodeRef<'a> {
    let el = doc.tree.new_element(tag);
    for (name, value) in attrs {
        el.set_attr(name, value);
    }
    el
}

/// Create a detached element holding a single text node
#[must_use]
pub fn create_text_element<'a>(
    doc: &'a Document,
    tag: &str,
    attrs: &[(&str, &str)],
    text: &str,
) -> NodeRef<'a> {
    let el = create_element(doc, tag, attrs);
    el.append_child(&doc.tree.new_text(text));
    el
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

//! Tree indexer.
//!
//! Stamps every element under a root with its pre-order position, so later
//! stages can put removed images back near where they were.

use crate::dom::{self, Document, NodeRef};
use crate::options::INDEX_ATTR;

/// Stamp pre-order indices under `root` (inclusive), starting at `start`.
///
/// Text and comment nodes consume an index but carry no attribute, so the
/// stamped values are unique and strictly increasing in document order but
/// not contiguous. Returns the next unused index.
pub fn index_tree(root: &NodeRef, start: usize) -> usize {
    let mut next = start;
    for node in dom::preorder(root) {
        if node.is_element() {
            node.set_attr(INDEX_ATTR, &next.to_string());
        }
        next += 1;
    }
    next
}

/// Index the document body starting from 1. Returns the number of positions used.
pub fn index_body(doc: &Document) -> usize {
    dom::body(doc).map_or(0, |body| index_tree(&body, 1) - 1)
}

/// Read back the index stamped on an element.
#[must_use]
pub fn preorder_index(node: &NodeRef) -> Option<usize> {
    node.attr(INDEX_ATTR)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_increase_in_document_order() {
        let doc = dom::parse("<body><div><p>a</p><p>b<i>c</i></p></div><img src='x.png'></body>");
        index_body(&doc);

        let indices: Vec<usize> = dom::snapshot(&doc, "body *")
            .iter()
            .map(|n| preorder_index(n).unwrap())
            .collect();
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(preorder_index(&dom::body(&doc).unwrap()), Some(1));
    }

    #[test]
    fn text_nodes_consume_positions() {
        let doc = dom::parse("<body><p>a</p><p>b</p></body>");
        let used = index_body(&doc);
        let ps = dom::snapshot(&doc, "p");
        assert_eq!(preorder_index(&ps[0]), Some(2));
        assert_eq!(preorder_index(&ps[1]), Some(4));
        assert_eq!(used, 5);
    }

    #[test]
    fn reindexing_after_mutation_restarts() {
        let doc = dom::parse("<body><p id='a'>a</p><p id='b'>b</p></body>");
        index_body(&doc);
        dom::remove(&doc.select("#a").nodes()[0]);
        index_body(&doc);
        assert_eq!(preorder_index(&doc.select("#b").nodes()[0]), Some(2));
    }

    #[test]
    fn missing_or_garbled_index_reads_as_none() {
        let doc = dom::parse("<body><p id='a' data-dfs-index='x'>a</p><p id='b'>b</p></body>");
        assert_eq!(preorder_index(&doc.select("#a").nodes()[0]), None);
        assert_eq!(preorder_index(&doc.select("#b").nodes()[0]), None);
    }
}

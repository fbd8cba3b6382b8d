//! Resolved-style approximation for the visibility filter.
//!
//! There is no layout engine here, so "resolved style" means the cascade of
//! three origins over the four properties the filter cares about
//! (`display`, `visibility`, `height`, `width`):
//!
//! 1. a user-agent sheet (elements that never render, `[hidden]`)
//! 2. the document's own `<style>` elements, top-level rules only
//! 3. inline `style` attributes
//!
//! Ranking follows CSS: `!important` first, then origin, then selector
//! specificity, then source order. Stylesheets are tokenised by `cssparser`
//! and selectors are parsed by `selectors`, which also supplies specificity.
//! Matching is left to `dom_query`.

mod selector_impl;
mod stylesheet;

use std::collections::HashMap;

use crate::dom::{Document, NodeId, NodeRef, Selection};
use crate::patterns::ZERO_LENGTH;

pub use stylesheet::{parse_inline, parse_stylesheet, Declaration, Property, StyleRule};

/// User-agent defaults: elements that never produce a box.
const UA_STYLESHEET: &str =
    "script, style, noscript, template, meta, link, base, datalist, param, [hidden] { display: none }";

const ORIGIN_UA: u8 = 0;
const ORIGIN_AUTHOR: u8 = 1;
const ORIGIN_INLINE: u8 = 2;

/// (important, origin, specificity, source order)
type Rank = (bool, u8, stylesheet::Specificity, usize);

#[derive(Debug, Clone)]
struct Cascaded {
    value: String,
    rank: Rank,
}

/// Winning values of the tracked properties for one element.
#[derive(Debug, Clone, Default)]
pub struct ResolvedStyle {
    display: Option<Cascaded>,
    visibility: Option<Cascaded>,
    height: Option<Cascaded>,
    width: Option<Cascaded>,
}

impl ResolvedStyle {
    fn slot(&mut self, property: Property) -> &mut Option<Cascaded> {
        match property {
            Property::Display => &mut self.display,
            Property::Visibility => &mut self.visibility,
            Property::Height => &mut self.height,
            Property::Width => &mut self.width,
        }
    }

    fn apply(&mut self, decl: &Declaration, rank: Rank) {
        let slot = self.slot(decl.property);
        if slot.as_ref().is_none_or(|current| rank >= current.rank) {
            *slot = Some(Cascaded {
                value: decl.value.clone(),
                rank,
            });
        }
    }

    /// Resolved `display` value, if any origin declared one.
    #[must_use]
    pub fn display(&self) -> Option<&str> {
        self.display.as_ref().map(|c| c.value.as_str())
    }

    /// Resolved `visibility` value, if any origin declared one.
    #[must_use]
    pub fn visibility(&self) -> Option<&str> {
        self.visibility.as_ref().map(|c| c.value.as_str())
    }

    /// Whether the style makes the element effectively invisible.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        let zero = |c: &Option<Cascaded>| c.as_ref().is_some_and(|c| ZERO_LENGTH.is_match(&c.value));

        self.display() == Some("none")
            || matches!(self.visibility(), Some("hidden" | "collapse"))
            || zero(&self.height)
            || zero(&self.width)
    }
}

/// Resolved styles for every element that any origin touched.
#[derive(Debug, Default)]
pub struct ResolvedStyles {
    by_node: HashMap<NodeId, ResolvedStyle>,
}

impl ResolvedStyles {
    /// Resolve the cascade over the whole document.
    ///
    /// Runs once, before any removal, so deleting a `<style>` element later
    /// cannot change what earlier decisions saw.
    #[must_use]
    pub fn resolve(doc: &Document) -> Self {
        let mut styles = Self::default();
        let mut order = 0usize;

        styles.apply_sheet(doc, &parse_stylesheet(UA_STYLESHEET), ORIGIN_UA, &mut order);

        for style_el in doc.select("style").nodes() {
            let css = Selection::from(*style_el).text();
            styles.apply_sheet(doc, &parse_stylesheet(&css), ORIGIN_AUTHOR, &mut order);
        }

        for node in doc.select("[style]").nodes() {
            let Some(inline) = node.attr("style") else {
                continue;
            };
            order += 1;
            for decl in parse_inline(&inline) {
                let rank = (decl.important, ORIGIN_INLINE, (0, 0, 0), order);
                styles.by_node.entry(node.id).or_default().apply(&decl, rank);
            }
        }

        styles
    }

    fn apply_sheet(&mut self, doc: &Document, rules: &[StyleRule], origin: u8, order: &mut usize) {
        for rule in rules {
            for selector in &rule.selectors {
                *order += 1;
                let Some(matched) = doc.try_select(&selector.css) else {
                    tracing::trace!(selector = %selector.css, "ignoring unsupported selector");
                    continue;
                };
                for node in matched.nodes() {
                    let style = self.by_node.entry(node.id).or_default();
                    for decl in &rule.declarations {
                        style.apply(decl, (decl.important, origin, selector.specificity, *order));
                    }
                }
            }
        }
    }

    /// Resolved style of an element, if any origin declared a tracked property.
    #[must_use]
    pub fn get(&self, node: &NodeRef) -> Option<&ResolvedStyle> {
        self.by_node.get(&node.id)
    }

    /// Whether the element is effectively hidden.
    #[must_use]
    pub fn is_hidden(&self, node: &NodeRef) -> bool {
        self.get(node).is_some_and(ResolvedStyle::is_hidden)
    }
}

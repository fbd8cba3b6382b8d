//! Reading-view assembly.
//!
//! Wraps the pruned body in the reading-view scaffolding: a centred container
//! with a menu and an inner container for the content, pagination links
//! around the content, a hidden "more links" panel and a quick link back to
//! the original page. Every id and class used here starts with
//! `tranquility`, which the tag stripper never touches.

use url::Url;

use crate::dom::{self, Document, NodeRef};
use crate::options::{Options, INDEX_ATTR};

use super::links::{body_link_targets, normalize_anchor_attributes, LinkRecord, MoreLinksSet, NavLinksSet};

pub const CONTAINER_ID: &str = "tranquility_container";
pub const MENU_ID: &str = "tranquility_menu";
pub const INNER_CONTAINER_ID: &str = "tranquility_innercontainer";
pub const MASKER_ID: &str = "tranquility_masker";
pub const NAV_LINKS_ID: &str = "tranquility_nav_links_bot";
pub const MORE_LINKS_ID: &str = "tranquility_links";
pub const OFFLINE_LINKS_ID: &str = "tranquility_offline_links";
pub const QUICK_TOOLS_ID: &str = "tranquility_quick_tools_div";
pub const ORIGINAL_LINK_DIV_ID: &str = "tranquility_original_link_div";
pub const ORIGINAL_LINK_ANCHOR_ID: &str = "tranquility_original_link_anchor";
pub const ORIGINAL_URL_DIV_ID: &str = "tranquility_original_url_div";

const HIDDEN: &str = "visibility: hidden;";
const LINK_SYMBOL: &str = "\u{26d3}";

/// The scaffolding nodes the rest of assembly hangs content on.
#[derive(Debug, Clone, Copy)]
pub struct Scaffold<'a> {
    pub menu: NodeRef<'a>,
    pub inner: NodeRef<'a>,
}

/// Build the container, menu, inner container and masker, and move the
/// body's existing children into the inner container.
pub fn build_scaffold<'a>(doc: &'a Document, body: &NodeRef<'a>) -> Scaffold<'a> {
    let container = dom::create_element(
        doc,
        "div",
        &[("id", CONTAINER_ID), ("class", CONTAINER_ID), ("align", "center")],
    );
    let menu = dom::create_element(doc, "div", &[("id", MENU_ID), ("class", MENU_ID), ("align", "center")]);
    let inner = dom::create_element(doc, "div", &[("id", INNER_CONTAINER_ID), ("class", INNER_CONTAINER_ID)]);
    container.append_child(&menu);
    container.append_child(&inner);

    let existing = dom::child_nodes(body);
    body.append_child(&container);
    body.append_child(&dom::create_element(doc, "div", &[("id", MASKER_ID), ("class", MASKER_ID)]));

    for child in existing {
        child.remove_from_parent();
        inner.append_child(&child);
    }

    Scaffold { menu, inner }
}

/// Render one link record as an anchor.
///
/// The source anchor's tree index is not carried over: panel links are not
/// part of the indexed content.
fn render_link<'a>(doc: &'a Document, link: &LinkRecord) -> NodeRef<'a> {
    let anchor = dom::create_text_element(doc, "a", &[("href", link.href.as_str())], &link.text);
    for (name, value) in link.attrs.iter().filter(|(name, _)| name != INDEX_ATTR) {
        anchor.set_attr(name, value);
    }
    anchor
}

/// Put the pagination links above and below the content.
///
/// Nothing is added when the links carry no visible text.
pub fn add_nav_links(doc: &Document, inner: &NodeRef, nav: &NavLinksSet) -> bool {
    if nav.total_size() == 0 {
        return false;
    }

    dom::prepend(inner, &dom::create_element(doc, "p", &[]));
    inner.append_child(&dom::create_element(doc, "p", &[]));

    let bar = dom::create_element(doc, "div", &[("id", NAV_LINKS_ID), ("class", "tranquility_nav_links")]);
    for link in nav.iter() {
        bar.append_child(&render_link(doc, link));
        bar.append_child(&doc.tree.new_text("  "));
    }
    inner.append_child(&bar);
    true
}

/// Add a menu button with a caption.
fn add_menu_button<'a>(doc: &'a Document, menu: &NodeRef<'a>, id: &str, caption: &str) -> NodeRef<'a> {
    let button = dom::create_text_element(doc, "div", &[("id", id), ("class", id), ("title", caption)], caption);
    menu.append_child(&button);
    button
}

/// Build the hidden "more links" panel.
fn more_links_panel<'a>(doc: &'a Document, more: &MoreLinksSet) -> NodeRef<'a> {
    let panel = dom::create_element(
        doc,
        "div",
        &[("id", MORE_LINKS_ID), ("class", MORE_LINKS_ID), ("style", HIDDEN)],
    );
    for link in more.iter() {
        let p = dom::create_element(doc, "p", &[("class", MORE_LINKS_ID)]);
        p.append_child(&render_link(doc, link));
        panel.append_child(&p);
    }
    panel
}

/// Build the quick link back to the original page.
fn quick_tools<'a>(doc: &'a Document, page_url: &str, options: &Options) -> NodeRef<'a> {
    let tools = dom::create_element(doc, "div", &[("id", QUICK_TOOLS_ID), ("class", QUICK_TOOLS_ID)]);
    let label = options.labels.original_link.as_str();
    let link_div = dom::create_element(
        doc,
        "div",
        &[("id", ORIGINAL_LINK_DIV_ID), ("class", ORIGINAL_LINK_DIV_ID), ("title", label)],
    );
    let anchor = dom::create_text_element(
        doc,
        "a",
        &[("id", ORIGINAL_LINK_ANCHOR_ID), ("href", page_url), ("title", label)],
        LINK_SYMBOL,
    );
    link_div.append_child(&anchor);
    tools.append_child(&link_div);
    tools
}

/// Add `<base href>` to the head, creating the head when it is missing.
fn add_base(doc: &Document, page_url: &str) {
    let base = dom::create_element(doc, "base", &[("href", page_url)]);
    if let Some(head) = dom::head(doc) {
        head.append_child(&base);
        return;
    }
    if let Some(html) = doc.select("html").nodes().first() {
        let head = dom::create_element(doc, "head", &[]);
        head.append_child(&base);
        dom::prepend(html, &head);
    }
}

/// Wrap the pruned document in the reading view.
///
/// The more-links set is filtered here, against the body as it stands once
/// the content and pagination links are in place. Returns the number of
/// more-links entries dropped by that filter.
pub fn assemble(
    doc: &Document,
    page_url: &str,
    base: Option<&Url>,
    more: &mut MoreLinksSet,
    nav: &NavLinksSet,
    options: &Options,
) -> usize {
    let Some(body) = dom::body(doc) else {
        return 0;
    };
    let labels = &options.labels;

    let scaffold = build_scaffold(doc, &body);
    let nav_added = add_nav_links(doc, &scaffold.inner, nav);

    add_menu_button(doc, &scaffold.menu, "tranquility_more_links_btn", &labels.more_links);

    let dropped = more.filter(&body_link_targets(doc, base), page_url);
    body.append_child(&more_links_panel(doc, more));

    add_menu_button(doc, &scaffold.menu, "tranquility_read_later_btn", &labels.read_later);
    let offline = add_menu_button(doc, &scaffold.menu, "tranquility_offline_links_btn", &labels.offline_links);
    offline.set_attr("data-active-link", page_url);
    body.append_child(&dom::create_element(
        doc,
        "div",
        &[("id", OFFLINE_LINKS_ID), ("class", OFFLINE_LINKS_ID), ("style", HIDDEN)],
    ));
    add_menu_button(doc, &scaffold.menu, "tranquility_viewnotes_btn", &labels.view_notes);

    dom::prepend(&body, &quick_tools(doc, page_url, options));
    normalize_anchor_attributes(doc);

    let source = dom::create_text_element(
        doc,
        "div",
        &[("id", ORIGINAL_URL_DIV_ID), ("class", "tranquility_annotation_selection")],
        &format!("Source : {page_url}"),
    );
    dom::prepend(&scaffold.inner, &source);
    add_base(doc, page_url);

    tracing::debug!(nav_added, more_links = more.len(), dropped, "reading view assembled");
    dropped
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "https://example.com/story";

    fn nav_link(href: &str, text: &str) -> LinkRecord {
        LinkRecord {
            href: href.to_string(),
            text: text.to_string(),
            text_len: text.len(),
            attrs: Vec::new(),
        }
    }

    #[test]
    fn content_moves_into_inner_container() {
        let doc = dom::parse("<html><head><title>T</title></head><body><p id='a'>one</p><p id='b'>two</p></body></html>");
        let mut more = MoreLinksSet::default();
        assemble(&doc, PAGE, None, &mut more, &NavLinksSet::default(), &Options::default());

        assert!(doc.select("#tranquility_container > #tranquility_menu").exists());
        assert!(doc.select("#tranquility_innercontainer > #a + #b").exists());
        assert!(doc.select("body > #tranquility_masker").exists());
        assert!(doc.select("body > #tranquility_quick_tools_div #tranquility_original_link_anchor").exists());
        assert!(doc.select("head > base[href='https://example.com/story']").exists());
        assert!(!doc.select("#tranquility_nav_links_bot").exists());
        let source = doc.select("#tranquility_innercontainer > #tranquility_original_url_div");
        assert_eq!(source.text().to_string(), "Source : https://example.com/story");
    }

    #[test]
    fn menu_buttons_are_present() {
        let doc = dom::parse("<body><p>x</p></body>");
        let mut more = MoreLinksSet::default();
        assemble(&doc, PAGE, None, &mut more, &NavLinksSet::default(), &Options::default());
        for id in [
            "tranquility_more_links_btn",
            "tranquility_read_later_btn",
            "tranquility_offline_links_btn",
            "tranquility_viewnotes_btn",
        ] {
            assert!(doc.select(&format!("#tranquility_menu > #{id}")).exists(), "{id} missing");
        }
        let offline = doc.select("#tranquility_offline_links_btn").nodes()[0];
        assert_eq!(dom::get_attribute(&offline, "data-active-link").as_deref(), Some(PAGE));
    }

    #[test]
    fn nav_links_wrap_the_content() {
        let doc = dom::parse("<body><p>x</p></body>");
        let mut nav = NavLinksSet::default();
        nav.push(nav_link("https://example.com/story/2", "2"));
        nav.push(nav_link("https://example.com/story/2", "Next"));
        let mut more = MoreLinksSet::default();
        assemble(&doc, PAGE, None, &mut more, &nav, &Options::default());

        assert_eq!(doc.select("#tranquility_nav_links_bot > a").length(), 2);
        assert_eq!(doc.select("#tranquility_innercontainer > p").length(), 3);
    }

    #[test]
    fn more_links_already_in_body_are_filtered() {
        let doc = dom::parse(r#"<body><p><a href="https://other.com/a">inline link</a></p></body>"#);
        let mut more = MoreLinksSet::default();
        more.push(nav_link("https://other.com/a", "A link that is already in the body"));
        more.push(nav_link("https://other.com/b", "A link that only lives in the panel"));
        let dropped = assemble(&doc, PAGE, None, &mut more, &NavLinksSet::default(), &Options::default());

        assert_eq!(dropped, 1);
        assert_eq!(doc.select("#tranquility_links > p.tranquility_links > a").length(), 1);
        let panel = doc.select("#tranquility_links").nodes()[0];
        assert_eq!(dom::get_attribute(&panel, "style").as_deref(), Some(HIDDEN));
    }

    #[test]
    fn anchors_are_marked_except_the_original_link() {
        let doc = dom::parse(r#"<body><a id="x" href="https://other.com/" target="_top">x</a></body>"#);
        let mut more = MoreLinksSet::default();
        assemble(&doc, PAGE, None, &mut more, &NavLinksSet::default(), &Options::default());
        let a = doc.select("#x").nodes()[0];
        assert_eq!(dom::get_attribute(&a, "class").as_deref(), Some("tranquil_browsing_mode_link"));
        let original = doc.select("#tranquility_original_link_anchor").nodes()[0];
        assert!(original.attr("class").is_none());
    }

    #[test]
    fn original_link_shows_chain_symbol() {
        let doc = dom::parse("<body><p>x</p></body>");
        let mut more = MoreLinksSet::default();
        assemble(&doc, PAGE, None, &mut more, &NavLinksSet::default(), &Options::default());
        let anchor = doc.select("#tranquility_original_link_anchor");
        assert_eq!(anchor.text().to_string(), "\u{26d3}");
        let div = doc.select("#tranquility_original_link_div").nodes()[0];
        assert_eq!(
            dom::get_attribute(&div, "title").as_deref(),
            Some("Link to the original webpage")
        );
    }

    #[test]
    fn rendered_links_drop_the_tree_index() {
        let doc = dom::parse("<body><p>x</p></body>");
        let mut link = nav_link("https://other.com/b", "A link that only lives in the panel");
        link.attrs = vec![
            (INDEX_ATTR.to_string(), "12".to_string()),
            ("rel".to_string(), "author".to_string()),
        ];
        let rendered = render_link(&doc, &link);
        assert!(rendered.attr(INDEX_ATTR).is_none());
        assert_eq!(dom::get_attribute(&rendered, "rel").as_deref(), Some("author"));
        assert_eq!(dom::get_attribute(&rendered, "href").as_deref(), Some("https://other.com/b"));
    }
}

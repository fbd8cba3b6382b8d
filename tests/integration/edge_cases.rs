//! Edge case integration tests
//!
//! Tests for unusual inputs, boundary conditions, and error handling.

#![allow(clippy::expect_used)] // expect() is appropriate in tests for clear panic messages

use std::fmt::Write as _;

use tranquil_reader::{dom, tranquilize, tranquilize_with_options, Error, Options};

const PAGE: &str = "https://example.com/edge";

#[test]
fn test_minimal_html() {
    let html = "<html><body><p>Minimal content.</p></body></html>";

    match tranquilize(html, PAGE) {
        Ok(result) => {
            assert!(result.content_text.contains("Minimal"), "Should keep minimal content");
            assert!(result.title.is_none());
        }
        Err(err) => panic!("Pipeline failed: {err:?}"),
    }
}

#[test]
fn test_empty_body() {
    let html = "<html><body></body></html>";
    assert!(matches!(tranquilize(html, PAGE), Err(Error::NoContent)));
}

#[test]
fn test_no_body() {
    // html5ever synthesises an empty body for a head-only document
    let html = "<html><head><title>No Body</title></head></html>";
    assert!(matches!(tranquilize(html, PAGE), Err(Error::NoContent)));
}

#[test]
fn test_comment_only_body() {
    let html = "<html><body><!-- nothing here --></body></html>";
    assert!(matches!(tranquilize(html, PAGE), Err(Error::NoContent)));
}

#[test]
fn test_fragment_without_html_wrapper() {
    let result = tranquilize("<p>Just a fragment of text.</p>", PAGE).expect("pipeline failed");
    assert!(result.content_text.contains("fragment of text"));
}

#[test]
fn test_malformed_html() {
    let html = "<html><body><p>Unclosed paragraph<div>Nested<p>Badly</body>";

    match tranquilize(html, PAGE) {
        Ok(result) => {
            assert!(result.content_text.contains("Unclosed paragraph"));
            assert!(result.content_text.contains("Badly"));
        }
        Err(err) => panic!("Pipeline failed on malformed HTML: {err:?}"),
    }
}

#[test]
fn test_whitespace_only_container() {
    let html = "<html><body><div>   \n\t  </div></body></html>";

    // The body has an element, so the pipeline runs and prunes it away.
    let result = tranquilize(html, PAGE).expect("pipeline failed");
    assert!(result.content_text.is_empty());
}

#[test]
fn test_deeply_nested_wrappers() {
    let depth = 60;
    let mut html = String::from("<html><body>");
    html.push_str(&"<div>".repeat(depth));
    html.push_str("<p>Deep content at the bottom of many wrappers.</p>");
    html.push_str(&"</div>".repeat(depth));
    html.push_str("</body></html>");

    let options = Options {
        build_reading_view: false,
        ..Options::default()
    };
    let result = tranquilize_with_options(&html, PAGE, &options).expect("pipeline failed");
    assert!(result.content_text.contains("Deep content"));

    let remaining = dom::parse(&result.html).select("div").length();
    assert!(remaining < depth, "collapsing should remove wrappers, {remaining} left");
}

#[test]
fn test_large_document() {
    let mut html = String::from("<html><head><title>Large</title></head><body><div class=\"content\">");
    for i in 0..1500 {
        let _ = write!(html, "<p>Paragraph number {i} with a little text to measure.</p>");
    }
    html.push_str("</div></body></html>");

    let result = tranquilize(&html, PAGE).expect("pipeline failed");
    assert!(result.content_text.contains("Paragraph number 0 "));
    assert!(result.content_text.contains("Paragraph number 1499 "));
}

#[test]
fn test_non_english_content() {
    let html = r#"<html lang="ja"><head><title>東京の天気</title></head><body>
        <article><h1>今日の天気</h1><p>東京は晴れのち曇り、最高気温は二十五度の予想です。</p></article>
        </body></html>"#;

    let result = tranquilize(html, PAGE).expect("pipeline failed");
    assert_eq!(result.title.as_deref(), Some("東京の天気"));
    assert!(result.content_text.contains("最高気温"));
}

#[test]
fn test_right_to_left_content() {
    let html = r#"<html dir="rtl"><body><p>هذا نص عربي طويل بما يكفي ليبقى في الصفحة.</p></body></html>"#;
    let result = tranquilize(html, PAGE).expect("pipeline failed");
    assert!(result.content_text.contains("نص عربي"));
}

#[test]
fn test_important_declaration_beats_inline_style() {
    let html = r#"<html><head><style>.promo { display: none !important; }</style></head><body>
        <p>The visible article text that should be kept in the view.</p>
        <div class="promo" style="display: block">Limited offer, today only</div>
        </body></html>"#;

    let result = tranquilize(html, PAGE).expect("pipeline failed");
    assert!(!result.content_text.contains("Limited offer"));
    assert!(result.content_text.contains("visible article text"));
}

#[test]
fn test_inline_style_beats_stylesheet() {
    let html = r#"<html><head><style>.note { display: none; }</style></head><body>
        <p class="note" style="display: block">An inline override keeps this note visible.</p>
        </body></html>"#;

    let result = tranquilize(html, PAGE).expect("pipeline failed");
    assert!(result.content_text.contains("inline override"));
}

#[test]
fn test_invalid_selector_in_stylesheet_is_ignored() {
    let html = r#"<html><head><style>p:::broken { display: none; } .gone { display: none; }</style></head>
        <body><p>Text that survives a broken stylesheet rule.</p><p class="gone">Hidden text</p></body></html>"#;

    let result = tranquilize(html, PAGE).expect("pipeline failed");
    assert!(result.content_text.contains("survives a broken"));
    assert!(!result.content_text.contains("Hidden text"));
}

#[test]
fn test_images_without_source() {
    let html = r#"<html><body><p>Text beside an image that never loaded properly.</p>
        <img alt="missing"><img src="">
        </body></html>"#;

    let result = tranquilize(html, PAGE).expect("pipeline failed");
    assert!(result.images.is_empty());
}

#[test]
fn test_page_url_with_fragment() {
    let html = r##"<html><body><p>Text with a <a href="#notes">jump to the notes section of this page</a>
        and a <a href="https://example.com/edge#intro">link back to the introduction</a>.</p></body></html>"##;

    let result = tranquilize(html, "https://example.com/edge#top").expect("pipeline failed");
    assert!(result.nav_links.is_empty());
    assert!(result.content_text.contains("jump to the notes"));
    assert!(result.more_links.is_empty());
}

#[test]
fn test_existing_tranquility_ids_do_not_break_assembly() {
    let html = r#"<html><body><div id="tranquility_container"><p>Page already using our ids,
        with enough text to keep.</p></div></body></html>"#;

    let result = tranquilize(html, PAGE).expect("pipeline failed");
    assert!(result.content_text.contains("already using our ids"));
}

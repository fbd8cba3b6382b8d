//! Realistic page integration tests
//!
//! Full pages with the usual clutter: cookie banners, newsletter modals,
//! share widgets, related-story rails, ad slots, comment threads.

#![allow(clippy::expect_used)] // expect() is appropriate in tests for clear panic messages

use tranquil_reader::{dom, tranquilize, tranquilize_with_options, Options};

const NEWS_HTML: &str = include_str!("fixtures/news_article.html");
const NEWS_URL: &str = "https://www.dailytide.example/science/ocean-floor-map";

const BLOG_HTML: &str = include_str!("fixtures/blog_post.html");
const BLOG_URL: &str = "https://workshop.example.org/posts/profiling-a-slow-build";

#[test]
fn test_news_article_keeps_story_text() {
    match tranquilize(NEWS_HTML, NEWS_URL) {
        Ok(result) => {
            assert_eq!(
                result.title.as_deref(),
                Some("Scientists map the deep ocean floor | The Daily Tide")
            );
            assert!(result.content_text.contains("unprecedented detail"));
            assert!(result.content_text.contains("multibeam sonar"));
            assert!(result.content_text.contains("undersea cables"));
        }
        Err(err) => panic!("Pipeline failed: {err:?}"),
    }
}

#[test]
fn test_news_article_drops_hidden_and_scripted_clutter() {
    let result = tranquilize(NEWS_HTML, NEWS_URL).expect("pipeline failed");

    // inline display:none, stylesheet visibility:hidden, stylesheet display:none
    assert!(!result.content_text.contains("uses cookies"));
    assert!(!result.content_text.contains("Subscribe to our newsletter"));
    assert!(!result.content_text.contains("Advertisement"));

    assert!(!result.html.contains("trackPageView"));
    assert!(!result.html.contains("analytics.js"));
    assert!(!result.content_text.contains("All rights reserved"));
    assert!(!result.content_text.contains("Share"));
}

#[test]
fn test_news_article_media_query_rules_do_not_hide_content() {
    let result = tranquilize(NEWS_HTML, NEWS_URL).expect("pipeline failed");
    assert!(result.content_text.contains("eleven months"));
}

#[test]
fn test_news_article_images() {
    let result = tranquilize(NEWS_HTML, NEWS_URL).expect("pipeline failed");
    let doc = dom::parse(&result.html);

    let srcs: Vec<&str> = result.images.iter().map(|img| img.src.as_str()).collect();
    assert_eq!(srcs, ["https://www.dailytide.example/images/ocean-floor.jpg"]);

    assert!(doc
        .select("#tranquility_innercontainer img[src='https://www.dailytide.example/images/ocean-floor.jpg']")
        .exists());
    assert!(!result.html.contains("banner-728x90.png"), "ad image should be purged");
    assert!(!result.html.contains("pixel.gif"), "tracking pixel should be removed");
}

#[test]
fn test_news_article_pagination_bar() {
    let result = tranquilize(NEWS_HTML, NEWS_URL).expect("pipeline failed");

    let texts: Vec<&str> = result.nav_links.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, ["2", "Next"]);

    let doc = dom::parse(&result.html);
    assert_eq!(doc.select("#tranquility_nav_links_bot a").length(), 2);
    assert!(!result.content_text.contains("Next"));
}

#[test]
fn test_news_article_related_links_move_to_panel() {
    let result = tranquilize(NEWS_HTML, NEWS_URL).expect("pipeline failed");
    let doc = dom::parse(&result.html);

    let hrefs: Vec<&str> = result.more_links.iter().map(|l| l.href.as_str()).collect();
    assert!(hrefs.contains(&"https://www.dailytide.example/science/coral-reefs-recovery"));
    assert!(hrefs.contains(&"https://partner.example.org/deep-sea-mining"));

    let body_hrefs: Vec<String> = doc
        .select("#tranquility_innercontainer a")
        .nodes()
        .iter()
        .filter_map(|a| dom::get_attribute(a, "href"))
        .collect();
    for href in &hrefs {
        assert!(
            !body_hrefs.iter().any(|b| b == href),
            "{href} is both in the body and the more-links panel"
        );
    }
    assert_eq!(doc.select("#tranquility_links a").length(), hrefs.len());
}

#[test]
fn test_blog_post_single_article_wins() {
    let result = tranquilize(BLOG_HTML, BLOG_URL).expect("pipeline failed");

    assert!(result.content_text.contains("Profiling a slow build step"));
    assert!(result.content_text.contains("forty seconds"));
    assert!(result.content_text.contains("5m 31s"));

    assert!(!result.content_text.contains("Great write-up"));
    assert!(!result.content_text.contains("performance"));
    assert!(!result.content_text.contains("static site generator"));
}

#[test]
fn test_blog_post_preserves_preformatted_text() {
    let result = tranquilize(BLOG_HTML, BLOG_URL).expect("pipeline failed");
    let doc = dom::parse(&result.html);

    let pre = doc.select("pre.tranquility_pre");
    assert!(pre.exists());
    let text = pre.text();
    assert!(text.contains("real    6m12.408s"), "pre whitespace collapsed: {text:?}");
    assert!(text.contains('\n'));
}

#[test]
fn test_blog_post_links_and_pagination() {
    let result = tranquilize(BLOG_HTML, BLOG_URL).expect("pipeline failed");
    let doc = dom::parse(&result.html);

    let follow_up = doc
        .select("#tranquility_innercontainer a[href='https://workshop.example.org/posts/schema-cache-design']")
        .nodes()
        .first()
        .copied()
        .expect("follow-up link kept in the content");
    assert!(follow_up.attr("target").is_none());
    assert_eq!(
        dom::get_attribute(&follow_up, "class").as_deref(),
        Some("tranquil_browsing_mode_link")
    );

    let nav: Vec<&str> = result.nav_links.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(nav, ["Older posts"]);

    // kept in the body, so not repeated in the panel; hidden, so never harvested
    assert!(result.more_links.iter().all(|l| !l.href.ends_with("/posts/schema-cache-design")));
    assert!(result.more_links.iter().all(|l| !l.href.ends_with("/posts/one")));
}

#[test]
fn test_blog_post_without_article_shortcut_keeps_comments() {
    let options = Options {
        single_article_shortcut: false,
        ..Options::default()
    };
    let result = tranquilize_with_options(BLOG_HTML, BLOG_URL, &options).expect("pipeline failed");

    assert!(result.content_text.contains("forty seconds"));
    assert!(result.content_text.contains("Great write-up"));
}

#[test]
fn test_pipeline_is_deterministic() {
    let first = tranquilize(NEWS_HTML, NEWS_URL).expect("pipeline failed");
    let second = tranquilize(NEWS_HTML, NEWS_URL).expect("pipeline failed");
    assert_eq!(first.html, second.html);
    assert_eq!(first.content_text, second.content_text);
}

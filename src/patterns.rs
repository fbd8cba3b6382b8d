//! Compiled regex patterns used across the pipeline.
//!
//! All patterns are compiled once at first use via `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Text normalisation
// =============================================================================

/// Runs of two or more whitespace characters (collapsed to one space).
pub static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("WHITESPACE_RUN regex"));

/// Any whitespace, stripped from link captions before they are compared.
pub static ANY_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s").expect("ANY_WHITESPACE regex"));

// =============================================================================
// Link classification
// =============================================================================

/// Anchor text that is a bare page number ("1", "2", ...).
pub static INTEGER_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("INTEGER_TEXT regex"));

/// Anchor text that starts with a pasted raw URL (comment-style links).
pub static RAW_URL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*https?:").expect("RAW_URL_PREFIX regex"));

// =============================================================================
// Tag stripper allow-list
// =============================================================================

/// Embedded frames kept even though `iframe` is stripped (trusted video hosts).
pub static EMBED_ALLOW_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)youtube(-nocookie)?\.com|youtu\.be").expect("EMBED_ALLOW_LIST regex")
});

// =============================================================================
// Stylesheets
// =============================================================================

/// A zero length: `0`, `0px`, `0.0em`, `0%`, ...
pub static ZERO_LENGTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?0*\.?0+(px|em|rem|ex|ch|vh|vw|vmin|vmax|pt|pc|cm|mm|in|%)?$")
        .expect("ZERO_LENGTH regex")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_lengths() {
        for v in ["0", "0px", "0.0em", "00", "0%", ".0rem"] {
            assert!(ZERO_LENGTH.is_match(v), "{v} should be zero");
        }
        for v in ["10px", "auto", "0.5px", "100%", "1"] {
            assert!(!ZERO_LENGTH.is_match(v), "{v} should not be zero");
        }
    }

    #[test]
    fn youtube_frames_are_allowed() {
        assert!(EMBED_ALLOW_LIST.is_match("https://www.youtube.com/embed/abc"));
        assert!(EMBED_ALLOW_LIST.is_match("https://www.youtube-nocookie.com/embed/abc"));
        assert!(!EMBED_ALLOW_LIST.is_match("https://ads.example.com/frame"));
    }

    #[test]
    fn page_numbers_are_ascii_digits() {
        assert!(INTEGER_TEXT.is_match("12"));
        assert!(!INTEGER_TEXT.is_match("\u{663}"));
        assert!(!INTEGER_TEXT.is_match("\u{ff12}"));
        assert!(!INTEGER_TEXT.is_match("2a"));
    }

    #[test]
    fn raw_url_prefix() {
        assert!(RAW_URL_PREFIX.is_match("  http://spam.example.com great post"));
        assert!(RAW_URL_PREFIX.is_match("HTTPS://x.y"));
        assert!(!RAW_URL_PREFIX.is_match("Read more about http"));
    }
}

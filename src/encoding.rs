//! Character encoding detection and transcoding.
//!
//! The fetch layer hands over raw bytes plus an optional charset hint (the
//! `Content-Type` charset or the page's own `document.characterSet`). The
//! hint wins when it names a known label; otherwise the charset is sniffed
//! from meta tags, and UTF-8 is the fallback.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("valid regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">` tag
#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#).expect("valid regex")
});

/// Resolve a charset label (`"utf-8"`, `"ISO-8859-1"`, ...) to an encoding.
///
/// Latin-1 labels map to windows-1252, as browsers do.
#[must_use]
pub fn encoding_for_label(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

/// Detect character encoding from HTML bytes.
///
/// Looks for charset declarations in the following order:
/// 1. `<meta http-equiv="Content-Type" content="...; charset=...">`
/// 2. `<meta charset="...">`
/// 3. Defaults to UTF-8 if no declaration found
///
/// Only examines the first 1024 bytes.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    let head = &html[..html.len().min(1024)];
    let head_str = String::from_utf8_lossy(head);

    let declared = CONTENT_TYPE_CHARSET_RE
        .captures(&head_str)
        .or_else(|| CHARSET_META_RE.captures(&head_str))
        .and_then(|c| c.get(1))
        .and_then(|m| encoding_for_label(m.as_str()));

    declared.unwrap_or(UTF_8)
}

/// Transcode HTML bytes to a UTF-8 string.
///
/// Invalid sequences become U+FFFD rather than errors.
///
/// # Examples
///
/// ```
/// use tranquil_reader::encoding::transcode_to_utf8;
///
/// let html = b"<html><body>Caf\xE9</body></html>";
/// let utf8_str = transcode_to_utf8(html, Some("windows-1252"));
/// assert!(utf8_str.contains("Café"));
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8], charset_hint: Option<&str>) -> String {
    let encoding = match charset_hint.and_then(encoding_for_label) {
        Some(hinted) => hinted,
        None => {
            if let Some(label) = charset_hint {
                tracing::debug!(label, "unknown charset hint, sniffing instead");
            }
            detect_encoding(html)
        }
    };

    if encoding == UTF_8 {
        return String::from_utf8_lossy(html).into_owned();
    }

    let (decoded, _encoding_used, had_errors) = encoding.decode(html);
    if had_errors {
        tracing::debug!(encoding = encoding.name(), "replaced malformed sequences");
    }
    decoded.into_owned()
}

//! Character encoding detection and decoding of raw page bytes.
//!
//! The charset is taken from a byte order mark, else from the page's own
//! `<meta>` declaration, else UTF-8. Decoding never fails: undecodable bytes
//! become U+FFFD and the result says so, which surfaces later as an
//! encoding-anomaly warning on the article.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// How far into the document charset declarations are looked for.
const SNIFF_LIMIT: usize = 1024;

/// `<meta charset="...">`
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("valid regex")
});

/// `<meta http-equiv="Content-Type" content="...; charset=...">`
#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#).expect("valid regex")
});

/// Page text decoded to UTF-8.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedHtml {
    pub html: String,
    /// Encoding the bytes were decoded from.
    pub encoding: &'static Encoding,
    /// Some bytes were invalid in that encoding and were replaced.
    pub had_errors: bool,
}

/// Detect the character encoding of HTML bytes.
///
/// Looks, in order, at:
/// 1. a byte order mark
/// 2. `<meta http-equiv="Content-Type" content="...; charset=...">`
/// 3. `<meta charset="...">`
///
/// and falls back to UTF-8. Only the first 1024 bytes are examined.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LIMIT)]);
    [&*CONTENT_TYPE_CHARSET_RE, &*CHARSET_META_RE]
        .into_iter()
        .filter_map(|re| declared_charset(re, &head))
        .find_map(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8)
}

fn declared_charset(re: &Regex, head: &str) -> Option<String> {
    re.captures(head)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Decode HTML bytes to UTF-8.
///
/// # Example
///
/// ```
/// use simple_article::encoding::decode_html;
///
/// let decoded = decode_html(b"<meta charset=\"windows-1252\"><p>Caf\xE9</p>");
/// assert!(decoded.html.contains("Café"));
/// assert!(!decoded.had_errors);
/// ```
#[must_use]
pub fn decode_html(html: &[u8]) -> DecodedHtml {
    let encoding = detect_encoding(html);
    // decode() strips a BOM and may switch encodings because of it
    let (decoded, used, had_errors) = encoding.decode(html);
    if had_errors {
        log::warn!("invalid {} byte sequences replaced while decoding", used.name());
    }
    DecodedHtml {
        html: decoded.into_owned(),
        encoding: used,
        had_errors,
    }
}

//! Text normalization and punctuation-aware joining.
//!
//! Every text run that reaches the output goes through [`normalize`], and
//! every pair of neighbouring runs is glued with [`join`]. Together they
//! decide where spaces appear in the canonical output, so their rules are
//! kept small and exact:
//!
//! - runs are NFKC-normalized, scrubbed of control characters and Unicode
//!   noncharacters, whitespace-collapsed and trimmed;
//! - two runs are joined with one space, unless the right run starts with a
//!   closing punctuation mark, which then hugs the left run.

use unicode_normalization::UnicodeNormalization;

use crate::patterns::WHITESPACE_NORMALIZE;

/// Characters that attach to the preceding run without a space.
pub const CLOSING_PUNCTUATION: [char; 6] = ['.', ',', '!', ':', ';', '?'];

/// Something in a text run could not be represented canonically.
///
/// Normalization still produced a best-effort result; this only records that
/// it had to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anomaly {
    /// U+FFFD was present, the source was decoded lossily upstream.
    ReplacementCharacter,
    /// A control character other than whitespace was removed.
    ControlCharacter,
    /// A Unicode noncharacter (U+FDD0..U+FDEF, U+xFFFE, U+xFFFF) was removed.
    Noncharacter,
}

impl std::fmt::Display for Anomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let what = match self {
            Anomaly::ReplacementCharacter => "replacement character in text",
            Anomaly::ControlCharacter => "control character removed from text",
            Anomaly::Noncharacter => "unicode noncharacter removed from text",
        };
        write!(f, "encoding anomaly: {what}")
    }
}

/// Canonical form of a text run.
///
/// # Example
///
/// ```
/// use simple_article::text::normalize;
///
/// assert_eq!(normalize("\n    Some\u{a0} example\ttext  "), "Some example text");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    normalize_checked(text).0
}

/// [`normalize`], also reporting the first anomaly met on the way.
#[must_use]
pub fn normalize_checked(text: &str) -> (String, Option<Anomaly>) {
    let mut anomaly = None;
    let scrubbed: String = text
        .nfkc()
        .filter(|&c| {
            if c == '\u{FFFD}' {
                anomaly.get_or_insert(Anomaly::ReplacementCharacter);
                return true;
            }
            if is_noncharacter(c) {
                anomaly.get_or_insert(Anomaly::Noncharacter);
                return false;
            }
            if c.is_control() && !c.is_whitespace() {
                anomaly.get_or_insert(Anomaly::ControlCharacter);
                return false;
            }
            true
        })
        .collect();

    let collapsed = WHITESPACE_NORMALIZE.replace_all(&scrubbed, " ");
    (collapsed.trim().to_string(), anomaly)
}

fn is_noncharacter(c: char) -> bool {
    let cp = u32::from(c);
    (0xFDD0..=0xFDEF).contains(&cp) || (cp & 0xFFFE) == 0xFFFE
}

/// Whether `text` starts with a closing punctuation mark.
#[must_use]
pub fn starts_with_closing_punctuation(text: &str) -> bool {
    text.starts_with(CLOSING_PUNCTUATION)
}

/// Join two adjacent, already-normalized runs.
///
/// # Example
///
/// ```
/// use simple_article::text::join;
///
/// assert_eq!(join("like this", ". with punctuation."), "like this. with punctuation.");
/// assert_eq!(join("Some text", "like this"), "Some text like this");
/// ```
#[must_use]
pub fn join(left: &str, right: &str) -> String {
    if left.is_empty() {
        return right.to_string();
    }
    if right.is_empty() {
        return left.to_string();
    }

    let mut joined = String::with_capacity(left.len() + right.len() + 1);
    joined.push_str(left);
    if !starts_with_closing_punctuation(right) {
        joined.push(' ');
    }
    joined.push_str(right);
    joined
}

/// Normalize every fragment, drop the empty ones and fold the rest with [`join`].
#[must_use]
pub fn join_all<'a, I>(fragments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    join_all_checked(fragments).0
}

/// [`join_all`], also collecting anomalies met while normalizing.
#[must_use]
pub fn join_all_checked<'a, I>(fragments: I) -> (String, Vec<Anomaly>)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut anomalies = Vec::new();
    let mut joined = String::new();
    for fragment in fragments {
        let (normalized, anomaly) = normalize_checked(fragment);
        anomalies.extend(anomaly);
        if normalized.is_empty() {
            continue;
        }
        joined = join(&joined, &normalized);
    }
    (joined, anomalies)
}

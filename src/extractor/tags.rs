//! Tag catalogs.
//!
//! Arrays for iteration and `HashSet`s for O(1) lookup, the same split the
//! rest of the crate relies on when it classifies elements.

use std::collections::HashSet;
use std::sync::LazyLock;

// === Tag Lists (arrays for iteration) ===

/// Elements that may serve as the root of the canonical tree as-is.
pub static CONTAINER_TAGS: [&str; 4] = ["div", "article", "section", "main"];

/// Elements flattened to a single text run during canonicalization.
pub static LEAF_TAGS: [&str; 2] = ["p", "li"];

/// List elements, projected to one paragraph each in plain text.
pub static LIST_TAGS: [&str; 2] = ["ul", "ol"];

/// Parts of a table that the HTML parser only keeps inside a `<table>`.
pub static TABLE_PART_TAGS: [&str; 7] = ["caption", "tbody", "thead", "tfoot", "tr", "td", "th"];

/// Elements whose contents never render as text.
pub static UNRENDERABLE_TAGS: [&str; 10] = [
    "script", "style", "noscript", "template", "iframe", "svg", "canvas", "object", "embed",
    "math",
];

/// Void elements: no children, no end tag.
pub static VOID_TAGS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Phrasing (inline) elements, unwrapped into their parent's text.
pub static PHRASING_TAGS: [&str; 30] = [
    "a", "abbr", "b", "bdi", "bdo", "cite", "code", "data", "del", "dfn", "em", "font", "i",
    "ins", "kbd", "label", "mark", "q", "s", "samp", "small", "span", "strike", "strong", "sub",
    "sup", "time", "tt", "u", "var",
];

/// Block-level elements. A `div` with none of these as children reads as a paragraph.
pub static BLOCK_TAGS: [&str; 30] = [
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table", "ul",
];

// === Tag Sets (HashSets for O(1) lookup) ===

static CONTAINER_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| CONTAINER_TAGS.into_iter().collect());

static LEAF_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| LEAF_TAGS.into_iter().collect());

static TABLE_PART_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| TABLE_PART_TAGS.into_iter().collect());

static UNRENDERABLE_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| UNRENDERABLE_TAGS.into_iter().collect());

static VOID_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| VOID_TAGS.into_iter().collect());

static PHRASING_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| PHRASING_TAGS.into_iter().collect());

static BLOCK_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| BLOCK_TAGS.into_iter().collect());

// === Helper Functions ===

#[inline]
#[must_use]
pub fn is_container(tag: &str) -> bool {
    CONTAINER_TAG_SET.contains(tag)
}

#[inline]
#[must_use]
pub fn is_leaf(tag: &str) -> bool {
    LEAF_TAG_SET.contains(tag)
}

#[inline]
#[must_use]
pub fn is_list(tag: &str) -> bool {
    LIST_TAGS.contains(&tag)
}

#[inline]
#[must_use]
pub fn is_table_part(tag: &str) -> bool {
    TABLE_PART_TAG_SET.contains(tag)
}

#[inline]
#[must_use]
pub fn is_unrenderable(tag: &str) -> bool {
    UNRENDERABLE_TAG_SET.contains(tag)
}

#[inline]
#[must_use]
pub fn is_void(tag: &str) -> bool {
    VOID_TAG_SET.contains(tag)
}

#[inline]
#[must_use]
pub fn is_phrasing(tag: &str) -> bool {
    PHRASING_TAG_SET.contains(tag)
}

#[inline]
#[must_use]
pub fn is_block(tag: &str) -> bool {
    BLOCK_TAG_SET.contains(tag)
}

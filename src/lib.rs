//! # simple-article
//!
//! Main-article extraction and canonicalization for HTML pages.
//!
//! This library locates the article inside a web page, drops navigation,
//! advertisements and other boilerplate, and rewrites what is left into a
//! small, stable tree: one container root, flattened paragraphs, normalized
//! text, no comments. That tree can be annotated with content digests and
//! original-position indexes, serialized to compact HTML, persisted as JSON
//! and projected to plain-text paragraphs.
//!
//! ## Quick Start
//!
//! ```rust
//! use simple_article::{extract, Options};
//!
//! let paragraph = "<p>The committee met on Tuesday, after a long delay, to discuss the \
//!     budget, the schedule, and the plans for next year in some detail.</p>";
//! let html = format!(
//!     "<html><head><title>Committee meets</title></head><body>\
//!      <nav><a href='/'>Home</a></nav><div class='story'>{paragraph}{paragraph}{paragraph}</div>\
//!      </body></html>"
//! );
//!
//! let extraction = extract(&html, &Options::default())?;
//! let article = extraction.article().expect("an article");
//! assert!(article.content.starts_with("<div><p>The committee met"));
//! # Ok::<(), simple_article::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Candidate scoring**: Readability-style scoring with data-driven weight tables
//! - **Canonicalization**: Whitespace and punctuation-aware text joining, wrapper elimination
//! - **Annotations**: Content digests (SHA-256) and original-position node indexes
//! - **Plain text**: Paragraph projection of a stored article
//! - **`readability` feature**: Locate the article with `dom_smoothie` instead

mod error;
mod extract;
mod options;
mod patterns;
mod result;

/// HTML parsing into the owned node tree.
pub mod dom;

/// The owned node tree and node indexes.
pub mod node;

/// Text normalization and punctuation-aware joining.
pub mod text;

/// Comment and non-rendering element removal.
pub mod strip;

/// Article location helpers (tag catalogs, pruning, Readability backend).
pub mod extractor;

/// Candidate scoring and article selection.
pub mod scorer;

/// Title and byline detection (JSON-LD, meta tags, DOM).
pub mod metadata;

/// Link density measurements.
pub mod link_density;

/// Tree canonicalization.
pub mod canonical;

/// Content digests and node indexes.
pub mod annotate;

/// Compact HTML output and article packaging.
pub mod serialize;

/// Plain-text paragraph projection.
pub mod plain_text;

/// Character encoding detection and transcoding.
pub mod encoding;

// Public API - re-exports
pub use error::{Error, Result};
pub use node::{Node, NodeIndex};
pub use options::{Options, DEFAULT_MAX_TREE_DEPTH};
pub use plain_text::extract_paragraphs_as_plain_text;
pub use result::{Extraction, Paragraph, SimpleArticle};
pub use scorer::ScoringConfig;

/// Extracts the article from an HTML document.
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] when the parsed tree is deeper than
/// [`Options::max_tree_depth`] and [`Error::InvalidConfig`] when a scoring
/// pattern does not compile. A page without an article is
/// [`Extraction::NotAnArticle`], not an error.
///
/// # Example
///
/// ```rust
/// use simple_article::{extract, Extraction, Options};
///
/// let html = "<html><body><nav><a href='/'>Home</a></nav></body></html>";
/// assert_eq!(extract(html, &Options::default())?, Extraction::NotAnArticle);
/// # Ok::<(), simple_article::Error>(())
/// ```
pub fn extract(html: &str, options: &Options) -> Result<Extraction> {
    let tree = dom::parse_html_with_limit(html, options.max_tree_depth)?;
    extract::extract_tree(tree, options, Some(html))
}

/// Extracts the article from HTML bytes with automatic encoding detection.
///
/// The charset comes from a byte order mark or the page's `<meta>`
/// declaration, else UTF-8. Undecodable bytes are replaced with U+FFFD and
/// reported in [`SimpleArticle::warnings`].
///
/// # Errors
///
/// As [`extract`].
///
/// # Example
///
/// ```rust
/// use simple_article::{extract_bytes, Options};
///
/// let html = b"<html><head><meta charset=\"windows-1252\"></head><body><div><p>Caf\xE9</p></div></body></html>";
/// let options = Options { use_scoring: false, ..Options::default() };
/// let extraction = extract_bytes(html, &options)?;
/// assert_eq!(extraction.article().map(|a| a.content.as_str()), Some("<div><p>Café</p></div>"));
/// # Ok::<(), simple_article::Error>(())
/// ```
pub fn extract_bytes(html: &[u8], options: &Options) -> Result<Extraction> {
    let decoded = encoding::decode_html(html);
    let mut extraction = extract(&decoded.html, options)?;
    if decoded.had_errors {
        if let Extraction::Article(article) = &mut extraction {
            article.warnings.insert(
                0,
                format!("invalid {} byte sequences were replaced", decoded.encoding.name()),
            );
        }
    }
    Ok(extraction)
}

/// Extracts the article from an already parsed tree.
///
/// Trees built by hand are accepted; when their elements carry no recorded
/// positions, node indexes are derived from the tree's own shape.
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] when the tree nests a document node
/// below its root, has an element with an empty tag name, or is deeper than
/// [`Options::max_tree_depth`].
///
/// # Example
///
/// ```rust
/// use simple_article::node::Element;
/// use simple_article::{extract_tree, Node, Options};
///
/// let tree = Node::Element(Element::new("p").with_child(Node::text("Alone")));
/// let options = Options { use_scoring: false, ..Options::default() };
/// let article = extract_tree(tree, &options)?.into_article().expect("an article");
/// assert_eq!(article.content, "<div><p>Alone</p></div>");
/// # Ok::<(), simple_article::Error>(())
/// ```
pub fn extract_tree(tree: Node, options: &Options) -> Result<Extraction> {
    extract::extract_tree(tree, options, None)
}

/// Canonical HTML of a whole document, without scoring or annotations.
///
/// # Errors
///
/// As [`extract`].
///
/// # Example
///
/// ```rust
/// let html = "\n<div>\n    <p>\n        Some example text here.\n    </p>\n</div>";
/// assert_eq!(simple_article::canonical_html(html)?, "<div><p>Some example text here.</p></div>");
/// # Ok::<(), simple_article::Error>(())
/// ```
pub fn canonical_html(html: &str) -> Result<String> {
    let options = Options {
        use_scoring: false,
        ..Options::default()
    };
    Ok(extract(html, &options)?
        .into_article()
        .map(|article| article.content)
        .unwrap_or_default())
}

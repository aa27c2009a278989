//! Readability backend.
//!
//! Locates the article with `dom_smoothie` (a port of Mozilla's
//! Readability.js) instead of the built-in scorer. Its output is parsed back
//! into a [`Node`] tree, so canonicalization and annotation run unchanged.
//! Node indexes of an article found this way refer to positions in
//! Readability's output, not in the source page.

use dom_smoothie::Readability;

use crate::dom::parse_html;
use crate::node::Node;

/// What Readability found: its content re-parsed, plus its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadabilityArticle {
    pub title: Option<String>,
    pub byline: Option<String>,
    /// Parsed article content, a document whose body holds the article.
    pub content: Node,
}

/// Run Readability over a page.
///
/// Returns `None` when Readability finds no article.
#[must_use]
pub fn readability_article(html: &str) -> Option<ReadabilityArticle> {
    let mut reader = match Readability::new(html, None, None) {
        Ok(reader) => reader,
        Err(err) => {
            log::debug!("readability rejected the page: {err}");
            return None;
        }
    };
    let article = match reader.parse() {
        Ok(article) => article,
        Err(err) => {
            log::debug!("readability found no article: {err}");
            return None;
        }
    };

    let title = Some(article.title.trim().to_string()).filter(|t| !t.is_empty());
    let byline = article
        .byline
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty());

    Some(ReadabilityArticle {
        title,
        byline,
        content: parse_html(&article.content),
    })
}

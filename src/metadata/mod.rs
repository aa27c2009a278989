//! Metadata extraction module.
//!
//! Title and byline of an article page, gathered from three sources in
//! decreasing order of trust:
//! 1. JSON-LD (Schema.org article objects)
//! 2. HTML meta tags (Dublin Core, Open Graph, Twitter, plain `author`)
//! 3. The DOM itself (`<title>`, the sole `<h1>`, byline elements)
//!
//! A byline element found in the DOM is removed from the tree, so the author
//! line does not end up in the article text as well.

pub mod dom_extraction;
pub mod json_ld;
pub mod meta_tags;

use crate::node::Node;

pub use dom_extraction::{examine_title_element, take_dom_byline};
pub use json_ld::extract_json_ld;
pub use meta_tags::{examine_meta, MetaValues};

/// Title and byline of an article.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: Option<String>,
    pub byline: Option<String>,
}

/// Extract title and byline from a parsed document.
///
/// Must run before non-rendering elements are stripped, since JSON-LD lives
/// in `<script>` elements. May remove one byline element from `doc`.
pub fn extract_metadata(doc: &mut Node) -> Metadata {
    // 1. Extract from JSON-LD (highest priority for structured data)
    let mut metadata = json_ld::extract_json_ld(doc);

    // 2. Extract from HTML meta tags
    let meta = meta_tags::examine_meta(doc);
    if metadata.title.is_none() {
        metadata.title = meta.title();
    }
    if metadata.byline.is_none() {
        metadata.byline = meta.byline();
    }

    // 3. Extract from DOM (fallback for missing fields)
    if metadata.title.is_none() {
        metadata.title = dom_extraction::examine_title_element(doc);
    }
    if metadata.byline.is_none() {
        metadata.byline = dom_extraction::take_dom_byline(doc);
    }

    log::debug!("metadata: title={:?} byline={:?}", metadata.title, metadata.byline);
    metadata
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn test_json_ld_wins_over_meta() {
        let mut doc = parse_html(
            r#"<html><head>
                <meta property="og:title" content="Open Graph Title">
                <script type="application/ld+json">
                  {"@context": "https://schema.org", "@type": "NewsArticle",
                   "headline": "Structured Headline", "author": {"@type": "Person", "name": "Ada Lovelace"}}
                </script>
                <title>Page Title - Site</title>
            </head><body><p>Body</p></body></html>"#,
        );
        let metadata = extract_metadata(&mut doc);

        assert_eq!(metadata.title.as_deref(), Some("Structured Headline"));
        assert_eq!(metadata.byline.as_deref(), Some("Ada Lovelace"));
    }

    #[test]
    fn test_falls_back_to_dom() {
        let mut doc = parse_html(
            r#"<html><head><title>A fairly descriptive article title | Example News</title></head>
            <body><div class="byline">By Grace Hopper</div><p>Body</p></body></html>"#,
        );
        let metadata = extract_metadata(&mut doc);

        assert_eq!(metadata.title.as_deref(), Some("A fairly descriptive article title"));
        assert_eq!(metadata.byline.as_deref(), Some("Grace Hopper"));
        // The byline element has been taken out of the document.
        assert!(doc.elements().all(|el| el.attr("class") != Some("byline")));
    }

    #[test]
    fn test_meta_byline_keeps_dom_untouched() {
        let mut doc = parse_html(
            r#"<html><head><meta name="author" content="Alan Turing"></head>
            <body><div class="byline">By Someone Else</div></body></html>"#,
        );
        let metadata = extract_metadata(&mut doc);

        assert_eq!(metadata.byline.as_deref(), Some("Alan Turing"));
        assert!(doc.elements().any(|el| el.attr("class") == Some("byline")));
        assert_eq!(metadata.title, None);
    }
}

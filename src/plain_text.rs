//! Plain-text paragraph projection.
//!
//! Walks a finished article tree and yields one [`Paragraph`] per
//! paragraph-level node: every `p`, and every `ul`/`ol` list, whose items
//! become `* item, ` entries run together. Nothing is re-scored or
//! re-canonicalized; node indexes are copied as they are.

use unicode_normalization::UnicodeNormalization;

use crate::error::Result;
use crate::extractor::tags;
use crate::node::{Element, Node};
use crate::result::{Paragraph, SimpleArticle};

/// Lazy iterator over the paragraphs of a tree, in document order.
///
/// Clone it before iterating to walk the same paragraphs again.
#[derive(Debug, Clone)]
pub struct Paragraphs<'a> {
    stack: Vec<&'a Node>,
}

/// Paragraphs of a tree.
///
/// # Example
///
/// ```
/// use simple_article::node::{Element, Node};
/// use simple_article::plain_text::paragraphs;
///
/// let tree = Node::Element(
///     Element::new("div")
///         .with_child(Node::Element(Element::new("p").with_child(Node::text("Intro."))))
///         .with_child(Node::Element(
///             Element::new("ul")
///                 .with_child(Node::Element(Element::new("li").with_child(Node::text("one"))))
///                 .with_child(Node::Element(Element::new("li").with_child(Node::text("two")))),
///         )),
/// );
/// let texts: Vec<String> = paragraphs(&tree).map(|p| p.text).collect();
/// assert_eq!(texts, vec!["Intro.", "* one, * two,"]);
/// ```
#[must_use]
pub fn paragraphs(tree: &Node) -> Paragraphs<'_> {
    Paragraphs { stack: vec![tree] }
}

/// Paragraphs of a structured article.
#[must_use]
pub fn from_article(article: &SimpleArticle) -> Paragraphs<'_> {
    paragraphs(&article.plain_content)
}

/// Project an article persisted as JSON to its paragraphs.
pub fn extract_paragraphs_as_plain_text(json: &str) -> Result<Vec<Paragraph>> {
    let article = SimpleArticle::from_json(json)?;
    Ok(from_article(&article).collect())
}

impl Iterator for Paragraphs<'_> {
    type Item = Paragraph;

    fn next(&mut self) -> Option<Paragraph> {
        while let Some(node) = self.stack.pop() {
            let Node::Element(el) = node else {
                self.stack.extend(node.children().iter().rev());
                continue;
            };

            let text = if el.tag == "p" {
                plain_text(node)
            } else if tags::is_list(&el.tag) {
                // Nested lists are covered by their outer list's items
                list_text(node)
            } else {
                self.stack.extend(el.children.iter().rev());
                continue;
            };

            if !text.is_empty() {
                return Some(paragraph(el, text));
            }
        }
        None
    }
}

fn paragraph(el: &Element, text: String) -> Paragraph {
    Paragraph {
        text,
        node_index: el.node_index.clone(),
    }
}

/// All text of a subtree, NFKC-normalized and trimmed.
fn plain_text(node: &Node) -> String {
    let raw = node.text_fragments().concat();
    let normalized: String = raw.nfkc().collect();
    normalized.trim().to_string()
}

fn list_text(list: &Node) -> String {
    let items: String = list
        .descendants()
        .filter(|n| n.tag() == Some("li"))
        .map(plain_text)
        .filter(|item| !item.is_empty())
        .map(|item| format!("* {item}, "))
        .collect();
    items.trim().to_string()
}

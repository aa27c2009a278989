//! Canonical serialization.
//!
//! [`to_html`] writes a tree as compact HTML: no whitespace between tags,
//! attributes in a fixed order, void elements without end tags, comments
//! never. Parsing that output and canonicalizing it again yields the same
//! bytes.

use crate::extractor::tags;
use crate::node::{Element, Node};
use crate::options::Options;
use crate::plain_text;
use crate::result::SimpleArticle;

const DIGEST_ATTRIBUTE: &str = "data-content-digest";
const INDEX_ATTRIBUTE: &str = "data-node-index";

/// Write a tree as compact HTML.
///
/// Attributes come in this order: preserved source attributes sorted by
/// name, then `data-content-digest`, then `data-node-index`.
///
/// # Example
///
/// ```
/// use simple_article::node::{Element, Node};
/// use simple_article::serialize::to_html;
///
/// let tree = Node::Element(Element::new("p").with_child(Node::text("Fish & chips")));
/// assert_eq!(to_html(&tree), "<p>Fish &amp; chips</p>");
/// ```
#[must_use]
pub fn to_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Document(doc) => {
            for child in &doc.children {
                write_node(child, out);
            }
        }
        Node::Element(el) => write_element(el, out),
        Node::Text(t) => escape_text(&t.text, out),
        Node::Comment(_) => {}
    }
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);

    for (name, value) in &el.attributes {
        let annotated = (name == DIGEST_ATTRIBUTE && el.content_digest.is_some())
            || (name == INDEX_ATTRIBUTE && el.node_index.is_some());
        if !annotated {
            write_attribute(name, value, out);
        }
    }
    if let Some(digest) = &el.content_digest {
        write_attribute(DIGEST_ATTRIBUTE, digest, out);
    }
    if let Some(index) = &el.node_index {
        write_attribute(INDEX_ATTRIBUTE, &index.to_string(), out);
    }
    out.push('>');

    if tags::is_void(&el.tag) {
        return;
    }
    for child in &el.children {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}

fn write_attribute(name: &str, value: &str, out: &mut String) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    escape_attribute(value, out);
    out.push('"');
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

/// Package a finished (canonical, annotated) tree as a [`SimpleArticle`].
///
/// The paragraph projection is included when [`Options::plain_text`] is set.
#[must_use]
pub fn serialize(
    tree: Node,
    title: Option<String>,
    byline: Option<String>,
    options: &Options,
) -> SimpleArticle {
    let content = to_html(&tree);
    let plain_text = options
        .plain_text
        .then(|| plain_text::paragraphs(&tree).collect());

    SimpleArticle {
        title,
        byline,
        content,
        plain_content: tree,
        plain_text,
        warnings: Vec::new(),
    }
}

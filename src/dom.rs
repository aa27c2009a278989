//! HTML parsing adapter.
//!
//! Parsing is delegated to `dom_query` (html5ever underneath); this module
//! only converts its node graph into the crate's owned [`Node`] tree. The
//! conversion is lossless for what the engine cares about: element names,
//! attributes, text and comments. Doctypes and processing instructions are
//! dropped.
//!
//! The parser follows the HTML5 specification, so an implicit `<html>`,
//! `<head>` and `<body>` are synthesised when missing.

use dom_query::{Document as DomDocument, NodeData, NodeRef};
use tendril::StrTendril;

use crate::error::{Error, Result};
use crate::node::{Element, Node, NodeIndex};
use crate::options::DEFAULT_MAX_TREE_DEPTH;

/// Parse an HTML string into a [`Node::Document`] tree.
///
/// Every element's position in the parsed document is recorded, so node
/// indexes can later refer back to it. A page nested deeper than
/// [`DEFAULT_MAX_TREE_DEPTH`] levels yields an empty document; use
/// [`parse_html_with_limit`] to see that as an error.
///
/// # Example
///
/// ```
/// use simple_article::dom::parse_html;
///
/// let doc = parse_html("<div><p>hello</p></div>");
/// assert_eq!(doc.find("p").map(|p| p.text_content()), Some("hello".to_string()));
/// ```
#[must_use]
pub fn parse_html(html: &str) -> Node {
    parse_html_with_limit(html, DEFAULT_MAX_TREE_DEPTH).unwrap_or_else(|err| {
        log::debug!("discarding parsed page: {err}");
        Node::document(Vec::new())
    })
}

/// Parse an HTML string, refusing trees nested deeper than `max_depth`.
///
/// The depth is checked while converting, so an over-deep page is never
/// materialized as a [`Node`] tree.
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] when some node sits more than
/// `max_depth` levels below the document.
pub fn parse_html_with_limit(html: &str, max_depth: usize) -> Result<Node> {
    let document = DomDocument::from(html);
    let mut root = convert(&document.root(), max_depth)?.unwrap_or_else(|| Node::document(Vec::new()));
    root.stamp_origins(&NodeIndex::document());
    Ok(root)
}

/// Convert a `dom_query` subtree without recursing.
///
/// Each stack entry is a node under construction plus its unvisited
/// children; the stack length is the depth of the next child.
fn convert<'a>(root: &NodeRef<'a>, max_depth: usize) -> Result<Option<Node>> {
    let Some(shell) = shallow(root) else {
        return Ok(None);
    };
    let mut stack: Vec<(Node, std::vec::IntoIter<NodeRef<'a>>)> = vec![(shell, root.children().into_iter())];

    while let Some((_, pending)) = stack.last_mut() {
        let Some(child) = pending.next() else {
            let Some((done, _)) = stack.pop() else { break };
            match stack.last_mut() {
                Some((parent, _)) => adopt(parent, done),
                None => return Ok(Some(done)),
            }
            continue;
        };

        let Some(node) = shallow(&child) else {
            continue;
        };
        if stack.len() > max_depth {
            return Err(Error::MalformedInput(format!("tree deeper than {max_depth} levels")));
        }
        if matches!(node, Node::Element(_) | Node::Document(_)) {
            stack.push((node, child.children().into_iter()));
        } else if let Some((parent, _)) = stack.last_mut() {
            adopt(parent, node);
        }
    }

    Ok(None)
}

/// Convert one `dom_query` node, leaving its children out.
///
/// Returns `None` for node kinds the engine has no use for.
fn shallow(node: &NodeRef) -> Option<Node> {
    if node.is_element() {
        let tag = node.node_name()?.to_ascii_lowercase();
        let mut element = Element::new(&tag);
        for attr in node.attrs() {
            element
                .attributes
                .insert(attr.name.local.to_ascii_lowercase().to_string(), attr.value.to_string());
        }
        return Some(Node::Element(element));
    }

    if node.is_text() {
        let text: StrTendril = node.text();
        return Some(Node::text(text.to_string()));
    }

    node.query(|tree_node| match &tree_node.data {
        NodeData::Document | NodeData::Fragment => Some(Node::document(Vec::new())),
        NodeData::Comment { contents } => Some(Node::comment(contents.to_string())),
        _ => None,
    })
    .flatten()
}

fn adopt(parent: &mut Node, child: Node) {
    if let Some(children) = parent.children_mut() {
        children.push(child);
    }
}

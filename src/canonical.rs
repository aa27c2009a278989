//! Tree canonicalization.
//!
//! Rewrites a selected candidate into the canonical article tree:
//!
//! 1. comments are dropped;
//! 2. the root becomes exactly one container element (`div`, `article`,
//!    `section`, `main`), reusing the candidate when it already is one;
//! 3. `p` and `li` are flattened to a single text run, inline elements are
//!    unwrapped into their parent, and neighbouring text runs are joined;
//! 4. elements left with neither text nor children are removed;
//! 5. source attributes are dropped unless listed in
//!    [`Options::preserve_attributes`].
//!
//! Document order is preserved throughout, and so are element origins, which
//! node indexes are later derived from.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::extractor::tags;
use crate::node::{Element, Node, NodeIndex};
use crate::options::Options;
use crate::text::{self, Anomaly};

/// A canonical tree and the warnings collected while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct Canonical {
    /// Root container element.
    pub root: Node,
    /// Encoding anomalies met while normalizing text, deduplicated.
    pub warnings: Vec<String>,
}

/// Canonicalize a candidate subtree.
///
/// `wrapper_origin` is the origin given to a `div` synthesized around a
/// candidate that is not a container itself, normally the candidate's
/// parent's origin.
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] when the candidate is a lone comment.
///
/// # Example
///
/// ```
/// use simple_article::canonical::canonicalize;
/// use simple_article::dom::parse_html;
/// use simple_article::serialize::to_html;
/// use simple_article::Options;
///
/// let doc = parse_html("<div>\n  <p>\n    Some example text here.\n  </p>\n</div>");
/// let canonical = canonicalize(doc, None, &Options::default())?;
/// assert_eq!(to_html(&canonical.root), "<div><p>Some example text here.</p></div>");
/// # Ok::<(), simple_article::Error>(())
/// ```
pub fn canonicalize(
    candidate: Node,
    wrapper_origin: Option<NodeIndex>,
    options: &Options,
) -> Result<Canonical> {
    let mut canonicalizer = Canonicalizer {
        preserve: &options.preserve_attributes,
        anomalies: Vec::new(),
        tables: 0,
    };

    let root = select_root(candidate, wrapper_origin)?;
    let root = canonicalizer.rebuild_root(root);

    let mut warnings: Vec<String> = Vec::new();
    for anomaly in canonicalizer.anomalies {
        let message = anomaly.to_string();
        if !warnings.contains(&message) {
            log::warn!("{message}");
            warnings.push(message);
        }
    }

    Ok(Canonical {
        root: Node::Element(root),
        warnings,
    })
}

/// Pick or synthesize the root container.
fn select_root(candidate: Node, wrapper_origin: Option<NodeIndex>) -> Result<Element> {
    match candidate {
        Node::Document(doc) => {
            let document = Node::document(doc.children);
            match document.find_path("body") {
                Some(path) => match take(document, &path) {
                    Some(Node::Element(body)) => Ok(root_from_body(body.children, body.origin)),
                    _ => Ok(wrap(Vec::new(), wrapper_origin)),
                },
                // A hand-built document without a body
                None => {
                    let Node::Document(doc) = document else {
                        return Ok(wrap(Vec::new(), wrapper_origin));
                    };
                    Ok(root_from_body(doc.children, Some(NodeIndex::document())))
                }
            }
        }
        Node::Element(el) if el.tag == "body" => Ok(root_from_body(el.children, el.origin)),
        Node::Element(el) if tags::is_container(&el.tag) => Ok(el),
        // Cells, rows and bare list items stand alone as a `div`
        Node::Element(mut el) if tags::is_table_part(&el.tag) || el.tag == "li" => {
            el.tag = "div".to_string();
            Ok(el)
        }
        Node::Element(el) => Ok(wrap(vec![Node::Element(el)], wrapper_origin)),
        text @ Node::Text(_) => Ok(wrap(vec![text], wrapper_origin)),
        Node::Comment(_) => Err(Error::MalformedInput(
            "a comment cannot be an article root".to_string(),
        )),
    }
}

/// A body's lone container child becomes the root; anything else gets a
/// `div` standing in for the body.
fn root_from_body(children: Vec<Node>, body_origin: Option<NodeIndex>) -> Element {
    let children: Vec<Node> = children.into_iter().filter(is_kept).collect();

    let mut elements = children.iter().filter(|c| c.is_element());
    let lone_container = match (elements.next(), elements.next()) {
        (Some(only), None) => only.tag().is_some_and(tags::is_container),
        _ => false,
    };
    let text_beside = children
        .iter()
        .any(|c| matches!(c, Node::Text(t) if !text::normalize(&t.text).is_empty()));

    if lone_container && !text_beside {
        if let Some(Node::Element(el)) = children.into_iter().find(Node::is_element) {
            return el;
        }
        return wrap(Vec::new(), body_origin);
    }
    wrap(children, body_origin)
}

fn wrap(children: Vec<Node>, origin: Option<NodeIndex>) -> Element {
    Element {
        tag: "div".to_string(),
        children,
        origin,
        ..Element::default()
    }
}

/// Detach the node at `path`, consuming the tree.
fn take(mut tree: Node, path: &[usize]) -> Option<Node> {
    let (position, parent_path) = path.split_last()?;
    let children = tree.get_mut(parent_path)?.children_mut()?;
    (*position < children.len()).then(|| children.swap_remove(*position))
}

/// Comments and never-rendering elements do not survive canonicalization.
fn is_kept(node: &Node) -> bool {
    match node {
        Node::Comment(_) => false,
        Node::Element(el) => !tags::is_unrenderable(&el.tag),
        Node::Text(_) | Node::Document(_) => true,
    }
}

struct Canonicalizer<'a> {
    preserve: &'a [String],
    anomalies: Vec<Anomaly>,
    /// Open `table` elements above the node being rebuilt.
    tables: usize,
}

impl Canonicalizer<'_> {
    fn rebuild_root(&mut self, root: Element) -> Element {
        let Element {
            tag,
            attributes,
            children,
            origin,
            ..
        } = root;

        let children = self.rebuild_children(children);
        self.element(tag, attributes, children, origin)
    }

    fn rebuild_children(&mut self, children: Vec<Node>) -> Vec<Node> {
        let mut out = Vec::with_capacity(children.len());
        for child in children {
            self.rebuild_into(child, &mut out);
        }
        out
    }

    fn rebuild_into(&mut self, node: Node, out: &mut Vec<Node>) {
        match node {
            Node::Comment(_) => {}
            Node::Text(t) => {
                let (normalized, anomaly) = text::normalize_checked(&t.text);
                self.anomalies.extend(anomaly);
                push_text(out, &normalized);
            }
            // Nested documents fail validation, their children are spliced in
            Node::Document(doc) => {
                for child in doc.children {
                    self.rebuild_into(child, out);
                }
            }
            Node::Element(mut el) => {
                if tags::is_unrenderable(&el.tag) {
                    return;
                }
                if tags::is_phrasing(&el.tag) {
                    for child in el.children {
                        self.rebuild_into(child, out);
                    }
                    return;
                }
                // The parser drops table parts found outside a table
                if self.tables == 0 && tags::is_table_part(&el.tag) {
                    el.tag = "div".to_string();
                }
                if tags::is_leaf(&el.tag) {
                    let Some(text) = self.flatten(&el.children) else {
                        return;
                    };
                    out.push(Node::Element(self.element(el.tag, el.attributes, vec![text], el.origin)));
                    return;
                }

                let is_table = el.tag == "table";
                self.tables += usize::from(is_table);
                let children = self.rebuild_children(el.children);
                self.tables -= usize::from(is_table);
                if children.is_empty() {
                    return;
                }
                out.push(Node::Element(self.element(el.tag, el.attributes, children, el.origin)));
            }
        }
    }

    /// All text below `children` as one normalized run, `None` if empty.
    fn flatten(&mut self, children: &[Node]) -> Option<Node> {
        let fragments = children
            .iter()
            .filter(|child| is_kept(child))
            .flat_map(Node::text_fragments);
        let (joined, anomalies) = text::join_all_checked(fragments);
        self.anomalies.extend(anomalies);
        (!joined.is_empty()).then(|| Node::text(joined))
    }

    fn element(
        &self,
        tag: String,
        mut attributes: BTreeMap<String, String>,
        children: Vec<Node>,
        origin: Option<NodeIndex>,
    ) -> Element {
        attributes.retain(|name, _| self.preserve.iter().any(|kept| kept == name));
        Element {
            tag,
            attributes,
            children,
            content_digest: None,
            node_index: None,
            origin,
        }
    }
}

/// Append a normalized run, joining it onto a preceding text sibling.
fn push_text(out: &mut Vec<Node>, normalized: &str) {
    if normalized.is_empty() {
        return;
    }
    if let Some(Node::Text(last)) = out.last_mut() {
        last.text = text::join(&last.text, normalized);
        return;
    }
    out.push(Node::text(normalized));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;
    use crate::serialize::to_html;

    fn canonical_html(html: &str) -> String {
        let canonical = canonicalize(parse_html(html), None, &Options::default())
            .unwrap_or_else(|err| panic!("canonicalize failed: {err}"));
        to_html(&canonical.root)
    }

    #[test]
    fn test_reuses_container_root() {
        let html = "\n<div>\n    <p>\n        Some example text here.\n    </p>\n</div>";
        assert_eq!(canonical_html(html), "<div><p>Some example text here.</p></div>");
    }

    #[test]
    fn test_wraps_non_container_root() {
        assert_eq!(canonical_html("<p>Alone</p>"), "<div><p>Alone</p></div>");
        assert_eq!(
            canonical_html("Loose text <div>and a block</div>"),
            "<div>Loose text<div>and a block</div></div>"
        );
    }

    #[test]
    fn test_punctuation_hugs_inline_text() {
        for mark in text::CLOSING_PUNCTUATION {
            let html = format!(
                r#"<div><p>Some text <a href="example.com">like this</a>{mark} with punctuation.</p></div>"#
            );
            assert_eq!(
                canonical_html(&html),
                format!("<div><p>Some text like this{mark} with punctuation.</p></div>")
            );
        }
    }

    #[test]
    fn test_comments_removed_inside_leaf() {
        let html = "<p>Some <!-- --> text <!-- with a comment --> here <!--or here-->.<!----></p>";
        assert_eq!(canonical_html(html), "<div><p>Some text here.</p></div>");
    }

    #[test]
    fn test_inline_elements_unwrapped_and_text_merged() {
        let html = "<div><h2>Hello <em>big</em> <strong>world</strong>!</h2><span>tail</span></div>";
        assert_eq!(canonical_html(html), "<div><h2>Hello big world!</h2>tail</div>");
    }

    #[test]
    fn test_empty_elements_removed() {
        let html = r#"<div><p>Kept</p><div><span> </span><img src="x.png"></div><p></p></div>"#;
        assert_eq!(canonical_html(html), "<div><p>Kept</p></div>");
    }

    #[test]
    fn test_lists_keep_items() {
        let html = "<div><ul><li>One <b>bold</b></li><li>Two</li><li> </li></ul></div>";
        assert_eq!(canonical_html(html), "<div><ul><li>One bold</li><li>Two</li></ul></div>");
    }

    #[test]
    fn test_preserved_attributes() {
        let options = Options {
            preserve_attributes: vec!["lang".to_string()],
            ..Options::default()
        };
        let doc = parse_html(r#"<article lang="en" class="x"><p id="a">Text</p></article>"#);
        let canonical = canonicalize(doc, None, &options)
            .unwrap_or_else(|err| panic!("canonicalize failed: {err}"));
        assert_eq!(to_html(&canonical.root), r#"<article lang="en"><p>Text</p></article>"#);
    }

    #[test]
    fn test_wrapper_carries_given_origin() {
        let mut h2 = Node::Element(Element::new("h2").with_child(Node::text("heading")));
        h2.stamp_origins(&"1.2.3".parse().unwrap_or_default());
        let origin: NodeIndex = "1.2".parse().unwrap_or_default();
        let canonical = canonicalize(h2, Some(origin.clone()), &Options::default())
            .unwrap_or_else(|err| panic!("canonicalize failed: {err}"));

        let root = canonical.root.as_element().unwrap_or_else(|| panic!("root is an element"));
        assert_eq!(root.tag, "div");
        assert_eq!(root.origin(), Some(&origin));
        assert_eq!(to_html(&canonical.root), "<div><h2>heading</h2></div>");
    }

    #[test]
    fn test_table_part_root_becomes_div() {
        let own: NodeIndex = "1.2.1.1.1".parse().unwrap_or_default();
        let mut tr = Node::Element(
            Element::new("tr")
                .with_child(Node::Element(Element::new("td").with_child(Node::text("first"))))
                .with_child(Node::Element(Element::new("td").with_child(Node::text("second")))),
        );
        tr.stamp_origins(&own);
        let canonical = canonicalize(tr, "1.2.1.1".parse().ok(), &Options::default())
            .unwrap_or_else(|err| panic!("canonicalize failed: {err}"));

        let root = canonical.root.as_element().unwrap_or_else(|| panic!("root is an element"));
        assert_eq!(root.origin(), Some(&own));
        assert_eq!(to_html(&canonical.root), "<div><div>first</div><div>second</div></div>");
    }

    #[test]
    fn test_bare_list_item_root_becomes_div() {
        let li = Node::Element(Element::new("li").with_child(Node::text("item")));
        let canonical = canonicalize(li, None, &Options::default())
            .unwrap_or_else(|err| panic!("canonicalize failed: {err}"));
        assert_eq!(to_html(&canonical.root), "<div>item</div>");
    }

    #[test]
    fn test_tables_keep_their_parts() {
        let html = "<div><table><tr><td>cell</td></tr></table></div>";
        let expected = "<div><table><tbody><tr><td>cell</td></tr></tbody></table></div>";
        assert_eq!(canonical_html(html), expected);
        assert_eq!(canonical_html(expected), expected);
    }

    #[test]
    fn test_anomalies_become_warnings() {
        let canonical = canonicalize(
            parse_html("<div><p>bad \u{FFFD} byte</p><p>again \u{FFFD}</p></div>"),
            None,
            &Options::default(),
        )
        .unwrap_or_else(|err| panic!("canonicalize failed: {err}"));

        assert_eq!(canonical.warnings.len(), 1);
        assert!(canonical.warnings[0].starts_with("encoding anomaly"));
    }

    #[test]
    fn test_comment_root_is_malformed() {
        assert!(matches!(
            canonicalize(Node::comment("x"), None, &Options::default()),
            Err(Error::MalformedInput(_))
        ));
    }
}

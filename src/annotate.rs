//! Optional tree annotations.
//!
//! Two independent passes over a finished tree. Each only fills its own
//! field, so they can run in either order, together or alone:
//!
//! - [`with_digests`] hashes content bottom-up: a text digest covers the
//!   text, an element digest covers its tag and its children's digests.
//! - [`with_indexes`] records where each element sat in the parsed document,
//!   relative to the article root (`0`).

use sha2::{Digest, Sha256};

use crate::node::{Node, NodeIndex};
use crate::text;

/// Separates the tag from the child digests.
const TAG_SEPARATOR: u8 = 0x00;

/// Separates consecutive child digests.
const CHILD_SEPARATOR: u8 = 0x1f;

/// Attach a SHA-256 `content_digest` (lowercase hex) to every text and
/// element node.
///
/// Digests depend only on content, never on `node_index`, so they are
/// stable across runs and against changes elsewhere in the document.
///
/// # Example
///
/// ```
/// use simple_article::annotate::with_digests;
/// use simple_article::node::{Element, Node};
///
/// let tree = Node::Element(Element::new("p").with_child(Node::text("hello")));
/// let a = with_digests(tree.clone());
/// let b = with_digests(tree);
/// assert_eq!(a, b);
/// assert_eq!(a.as_element().and_then(|p| p.content_digest.as_ref()).map(String::len), Some(64));
/// ```
#[must_use]
pub fn with_digests(mut tree: Node) -> Node {
    digest_node(&mut tree);
    tree
}

fn digest_node(node: &mut Node) -> Option<String> {
    match node {
        Node::Text(t) => {
            let digest = format!("{:x}", Sha256::digest(text::normalize(&t.text).as_bytes()));
            t.content_digest = Some(digest.clone());
            Some(digest)
        }
        Node::Element(el) => {
            let child_digests: Vec<String> = el.children.iter_mut().filter_map(digest_node).collect();

            let mut hasher = Sha256::new();
            hasher.update(el.tag.as_bytes());
            hasher.update([TAG_SEPARATOR]);
            for (i, child) in child_digests.iter().enumerate() {
                if i > 0 {
                    hasher.update([CHILD_SEPARATOR]);
                }
                hasher.update(child.as_bytes());
            }

            let digest = format!("{:x}", hasher.finalize());
            el.content_digest = Some(digest.clone());
            Some(digest)
        }
        Node::Document(doc) => {
            for child in &mut doc.children {
                digest_node(child);
            }
            None
        }
        Node::Comment(_) => None,
    }
}

/// Attach a `node_index` to every element.
///
/// The index is the element's recorded origin re-expressed relative to the
/// root's origin, so the root is `0` and `0.2.1` is the first element child
/// of the root's second element child in the parsed document. When origins
/// are missing or would not index the tree in strict pre-order (a hand-built
/// tree, for example), the tree is indexed by its current shape instead.
#[must_use]
pub fn with_indexes(mut tree: Node) -> Node {
    let base = match &tree {
        Node::Element(el) => el.origin.clone(),
        Node::Document(_) => Some(NodeIndex::document()),
        Node::Text(_) | Node::Comment(_) => return tree,
    };

    let base = match base {
        Some(base) if origins_index_in_order(&tree, &base) => base,
        _ => {
            log::debug!("indexing by tree shape, origins unusable");
            let base = if tree.is_element() { NodeIndex::root() } else { NodeIndex::document() };
            tree.stamp_origins(&base);
            base
        }
    };

    assign_indexes(&mut tree, &base);
    tree
}

/// Every element has an origin under `base`, strictly increasing in pre-order.
fn origins_index_in_order(tree: &Node, base: &NodeIndex) -> bool {
    let mut previous: Option<NodeIndex> = None;
    for element in tree.elements() {
        let Some(index) = element.origin().and_then(|origin| origin.relative_to(base)) else {
            return false;
        };
        if previous.as_ref().is_some_and(|prev| *prev >= index) {
            return false;
        }
        previous = Some(index);
    }
    true
}

fn assign_indexes(node: &mut Node, base: &NodeIndex) {
    if let Node::Element(el) = node {
        el.node_index = el.origin.as_ref().and_then(|origin| origin.relative_to(base));
    }
    if let Some(children) = node.children_mut() {
        for child in children {
            assign_indexes(child, base);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Element;

    fn article() -> Node {
        Node::Element(
            Element::new("div")
                .with_child(Node::Element(Element::new("p").with_child(Node::text("First paragraph."))))
                .with_child(Node::Element(
                    Element::new("ul")
                        .with_child(Node::Element(Element::new("li").with_child(Node::text("one"))))
                        .with_child(Node::Element(Element::new("li").with_child(Node::text("two")))),
                )),
        )
    }

    fn digest_of(node: &Node) -> Option<&str> {
        match node {
            Node::Element(el) => el.content_digest.as_deref(),
            Node::Text(t) => t.content_digest.as_deref(),
            _ => None,
        }
    }

    #[test]
    fn test_text_digest_is_sha256_hex() {
        let tree = with_digests(Node::text("hello"));
        // sha256("hello")
        assert_eq!(
            digest_of(&tree),
            Some("2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824")
        );
    }

    #[test]
    fn test_digests_change_with_content_only() {
        let a = with_digests(article());
        let mut changed = article();
        if let Some(Node::Text(t)) = changed.get_mut(&[1, 1, 0]) {
            t.text = "three".to_string();
        }
        let b = with_digests(changed);

        // The untouched paragraph keeps its digest, the edited branch does not.
        assert_eq!(a.get(&[0]).and_then(digest_of), b.get(&[0]).and_then(digest_of));
        assert_ne!(a.get(&[1]).and_then(digest_of), b.get(&[1]).and_then(digest_of));
        assert_ne!(digest_of(&a), digest_of(&b));
    }

    #[test]
    fn test_digest_covers_tag() {
        let p = with_digests(Node::Element(Element::new("p").with_child(Node::text("x"))));
        let li = with_digests(Node::Element(Element::new("li").with_child(Node::text("x"))));
        assert_ne!(digest_of(&p), digest_of(&li));
    }

    #[test]
    fn test_indexes_by_shape_without_origins() {
        let tree = with_indexes(article());
        let indexes: Vec<String> = tree
            .elements()
            .filter_map(|el| el.node_index.as_ref().map(ToString::to_string))
            .collect();
        assert_eq!(indexes, vec!["0", "0.1", "0.2", "0.2.1", "0.2.2"]);
    }

    #[test]
    fn test_indexes_follow_origins() {
        let mut tree = article();
        tree.stamp_origins(&"1.2.4".parse().unwrap_or_default());
        // Pretend a dropped sibling used to sit before the list.
        if let Some(Node::Element(ul)) = tree.get_mut(&[1]) {
            ul.origin = Some("1.2.4.3".parse().unwrap_or_default());
            for (i, li) in ul.children.iter_mut().enumerate() {
                li.stamp_origins(&format!("1.2.4.3.{}", i + 1).parse().unwrap_or_default());
            }
        }
        let tree = with_indexes(tree);
        let indexes: Vec<String> = tree
            .elements()
            .filter_map(|el| el.node_index.as_ref().map(ToString::to_string))
            .collect();
        assert_eq!(indexes, vec!["0", "0.1", "0.3", "0.3.1", "0.3.2"]);
    }

    #[test]
    fn test_passes_compose_in_any_order() {
        let both = with_indexes(with_digests(article()));
        let reversed = with_digests(with_indexes(article()));
        assert_eq!(both, reversed);

        let digests_only = with_digests(article());
        let digests: Vec<_> = both.elements().map(|el| el.content_digest.clone()).collect();
        let expected: Vec<_> = digests_only.elements().map(|el| el.content_digest.clone()).collect();
        assert_eq!(digests, expected);
    }
}

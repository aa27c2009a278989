//! Owned document tree.
//!
//! Every node owns its children exclusively, so the tree can never contain a
//! cycle or a shared subtree. Structural edits (removal, merging, splicing)
//! are plain `Vec` operations on a parent's children.
//!
//! Elements carry an `origin`: their absolute position in the tree as it was
//! parsed. Origins are recorded once, before any cleaning, and survive every
//! later edit; node indexes are derived from them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::text;

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// Document root. Only valid at the top of a tree.
    Document(Document),
    /// An element with a tag name, attributes and children.
    Element(Element),
    /// A run of text.
    Text(Text),
    /// A markup comment. Present only in input trees.
    Comment(Comment),
}

/// Document root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub children: Vec<Node>,
}

/// An element node.
#[derive(Debug, Clone, Default, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Lowercase tag name.
    pub tag: String,

    /// Attributes; keys are unique and kept sorted.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,

    /// Digest attached by [`crate::annotate::with_digests`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_digest: Option<String>,

    /// Index attached by [`crate::annotate::with_indexes`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_index: Option<NodeIndex>,

    /// Absolute position in the parsed document. Not serialized.
    #[serde(skip)]
    pub(crate) origin: Option<NodeIndex>,
}

// Origins are bookkeeping, two trees with the same content compare equal
// whether or not they went through a JSON round trip.
impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
            && self.attributes == other.attributes
            && self.children == other.children
            && self.content_digest == other.content_digest
            && self.node_index == other.node_index
    }
}

/// A text node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_digest: Option<String>,
}

/// A comment node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
}

impl Element {
    /// Create an empty element. The tag is lowercased.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    /// Builder-style child appender.
    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Position of this element in the parsed document, if it was recorded.
    #[must_use]
    pub fn origin(&self) -> Option<&NodeIndex> {
        self.origin.as_ref()
    }

    /// `class` and `id` joined by a space, the string class/id patterns run against.
    #[must_use]
    pub fn match_string(&self) -> String {
        let class = self.attr("class").unwrap_or_default();
        let id = self.attr("id").unwrap_or_default();
        format!("{class} {id}")
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    /// An element node with no attributes or children.
    #[must_use]
    pub fn element(tag: &str) -> Self {
        Node::Element(Element::new(tag))
    }

    /// A text node holding `text` verbatim.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(Text {
            text: text.into(),
            content_digest: None,
        })
    }

    /// A comment node.
    #[must_use]
    pub fn comment(text: impl Into<String>) -> Self {
        Node::Comment(Comment { text: text.into() })
    }

    /// A document root holding `children`.
    #[must_use]
    pub fn document(children: Vec<Node>) -> Self {
        Node::Document(Document { children })
    }

    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Tag name for elements, `None` otherwise.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.as_element().map(|el| el.tag.as_str())
    }

    #[must_use]
    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    #[must_use]
    pub fn is_comment(&self) -> bool {
        matches!(self, Node::Comment(_))
    }

    /// Children of documents and elements; empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document(doc) => &doc.children,
            Node::Element(el) => &el.children,
            Node::Text(_) | Node::Comment(_) => &[],
        }
    }

    /// Mutable children of documents and elements.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Document(doc) => Some(&mut doc.children),
            Node::Element(el) => Some(&mut el.children),
            Node::Text(_) | Node::Comment(_) => None,
        }
    }

    /// Node reached by following child positions from `self`.
    #[must_use]
    pub fn get(&self, path: &[usize]) -> Option<&Node> {
        path.iter()
            .try_fold(self, |node, &position| node.children().get(position))
    }

    pub fn get_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        let mut node = self;
        for &position in path {
            node = node.children_mut()?.get_mut(position)?;
        }
        Some(node)
    }

    /// Child-position path of the first element named `tag`, in pre-order.
    #[must_use]
    pub fn find_path(&self, tag: &str) -> Option<Vec<usize>> {
        fn walk(node: &Node, tag: &str, path: &mut Vec<usize>) -> bool {
            if node.tag() == Some(tag) {
                return true;
            }
            for (i, child) in node.children().iter().enumerate() {
                path.push(i);
                if walk(child, tag, path) {
                    return true;
                }
                path.pop();
            }
            false
        }

        let mut path = Vec::new();
        walk(self, tag, &mut path).then_some(path)
    }

    /// First element named `tag`, in pre-order.
    #[must_use]
    pub fn find(&self, tag: &str) -> Option<&Node> {
        self.find_path(tag).and_then(|path| self.get(&path))
    }

    /// Pre-order iterator over this node and all of its descendants.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Pre-order iterator over elements only.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.descendants().filter_map(Node::as_element)
    }

    /// Raw text runs of the subtree in document order. Comments are skipped.
    #[must_use]
    pub fn text_fragments(&self) -> Vec<&str> {
        self.descendants()
            .filter_map(|node| match node {
                Node::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Normalized text content: every run normalized, then joined with
    /// [`text::join`].
    #[must_use]
    pub fn text_content(&self) -> String {
        text::join_all(self.text_fragments())
    }

    /// Check the structural assumptions the engine relies on.
    ///
    /// A `Document` may only appear at the root, element tags must be
    /// non-empty, and nesting may not exceed `max_depth`.
    pub fn validate(&self, max_depth: usize) -> Result<()> {
        fn check(node: &Node, depth: usize, max_depth: usize) -> Result<()> {
            if depth > max_depth {
                return Err(Error::MalformedInput(format!(
                    "tree deeper than {max_depth} levels"
                )));
            }
            match node {
                Node::Document(_) if depth > 0 => {
                    return Err(Error::MalformedInput(
                        "document node below the root".to_string(),
                    ));
                }
                Node::Element(el) if el.tag.is_empty() => {
                    return Err(Error::MalformedInput("element with empty tag name".to_string()));
                }
                _ => {}
            }
            node.children()
                .iter()
                .try_for_each(|child| check(child, depth + 1, max_depth))
        }

        check(self, 0, max_depth)
    }

    /// Record every element's absolute position, treating `self` as the
    /// position `base`.
    ///
    /// Positions count element siblings only, starting at 1, so comments and
    /// text never shift them.
    pub fn stamp_origins(&mut self, base: &NodeIndex) {
        if let Node::Element(el) = self {
            el.origin = Some(base.clone());
        }
        let Some(children) = self.children_mut() else {
            return;
        };
        let mut position = 0;
        for child in children.iter_mut().filter(|c| c.is_element()) {
            position += 1;
            child.stamp_origins(&base.child(position));
        }
    }

    /// Whether every element in the subtree has a recorded origin.
    #[must_use]
    pub fn has_origins(&self) -> bool {
        self.elements().all(|el| el.origin.is_some())
    }
}

/// Pre-order traversal over a subtree.
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// Dot-separated path of child positions, e.g. `0.2.1`.
///
/// Ordering is lexicographic over components, which is document pre-order.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(Vec<u32>);

impl NodeIndex {
    /// The empty path (the document itself).
    #[must_use]
    pub fn document() -> Self {
        Self(Vec::new())
    }

    /// The path `0`, used for the root of an extracted article.
    #[must_use]
    pub fn root() -> Self {
        Self(vec![0])
    }

    #[must_use]
    pub fn from_components(components: Vec<u32>) -> Self {
        Self(components)
    }

    /// Path of the `position`-th element child of this node.
    #[must_use]
    pub fn child(&self, position: u32) -> Self {
        let mut components = self.0.clone();
        components.push(position);
        Self(components)
    }

    #[must_use]
    pub fn components(&self) -> &[u32] {
        &self.0
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Re-express this absolute path relative to `base`, which becomes `0`.
    ///
    /// Returns `None` when `self` is not inside `base`.
    #[must_use]
    pub fn relative_to(&self, base: &NodeIndex) -> Option<NodeIndex> {
        let rest = self.0.strip_prefix(base.0.as_slice())?;
        let mut components = Vec::with_capacity(rest.len() + 1);
        components.push(0);
        components.extend_from_slice(rest);
        Some(Self(components))
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

impl FromStr for NodeIndex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::MalformedInput("empty node index".to_string()));
        }
        s.split('.')
            .map(|part| {
                part.parse::<u32>()
                    .map_err(|_| Error::MalformedInput(format!("invalid node index `{s}`")))
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}

impl Serialize for NodeIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::document(vec![Node::Element(
            Element::new("body")
                .with_child(Node::comment(" nav "))
                .with_child(Node::Element(
                    Element::new("div").with_child(Node::text("  Hello ")),
                ))
                .with_child(Node::text("\n"))
                .with_child(Node::Element(
                    Element::new("p").with_child(Node::text("world")),
                )),
        )])
    }

    #[test]
    fn node_index_display_and_parse() {
        let index: NodeIndex = "0.2.10".parse().unwrap();
        assert_eq!(index.components(), &[0, 2, 10]);
        assert_eq!(index.to_string(), "0.2.10");
    }

    #[test]
    fn node_index_rejects_garbage() {
        assert!(matches!("0..1".parse::<NodeIndex>(), Err(Error::MalformedInput(_))));
        assert!(matches!("".parse::<NodeIndex>(), Err(Error::MalformedInput(_))));
        assert!(matches!("0.a".parse::<NodeIndex>(), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn node_index_orders_in_preorder() {
        let a: NodeIndex = "0.1".parse().unwrap();
        let b: NodeIndex = "0.1.5".parse().unwrap();
        let c: NodeIndex = "0.2".parse().unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn relative_to_rebases_onto_zero() {
        let base: NodeIndex = "1.2".parse().unwrap();
        let inner: NodeIndex = "1.2.3.1".parse().unwrap();
        assert_eq!(inner.relative_to(&base).unwrap().to_string(), "0.3.1");
        assert_eq!(base.relative_to(&base).unwrap().to_string(), "0");
        let outside: NodeIndex = "1.3".parse().unwrap();
        assert!(outside.relative_to(&base).is_none());
    }

    #[test]
    fn stamp_origins_counts_elements_only() {
        let mut doc = sample();
        doc.stamp_origins(&NodeIndex::document());
        let origins: Vec<String> = doc
            .elements()
            .map(|el| el.origin().unwrap().to_string())
            .collect();
        assert_eq!(origins, vec!["1", "1.1", "1.2"]);
    }

    #[test]
    fn text_content_joins_normalized_runs() {
        assert_eq!(sample().text_content(), "Hello world");
    }

    #[test]
    fn find_and_get_follow_paths() {
        let doc = sample();
        let path = doc.find_path("p").unwrap();
        assert_eq!(path, vec![0, 3]);
        assert_eq!(doc.get(&path).and_then(Node::tag), Some("p"));
        assert!(doc.find("table").is_none());
    }

    #[test]
    fn validate_rejects_nested_documents_and_empty_tags() {
        let nested = Node::document(vec![Node::document(Vec::new())]);
        assert!(matches!(nested.validate(10), Err(Error::MalformedInput(_))));

        let empty_tag = Node::Element(Element::default());
        assert!(matches!(empty_tag.validate(10), Err(Error::MalformedInput(_))));

        assert!(sample().validate(10).is_ok());
        assert!(matches!(sample().validate(1), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn json_round_trip_ignores_origins() {
        let mut doc = sample();
        doc.stamp_origins(&NodeIndex::document());
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains(r#""type":"element""#));
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
        assert!(!back.has_origins());
    }
}

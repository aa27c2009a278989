//! Flattened view of a tree for scoring.
//!
//! Slots are laid out in pre-order, so slot ids order like document
//! positions and every parent id is smaller than its children's. Text
//! measures are gathered bottom-up in the same walk, each text run being
//! normalized once.

use crate::extractor::tags;
use crate::node::{Element, Node};
use crate::text;

/// Comma-like characters counted as clause separators.
const COMMAS: [char; 9] = [
    '\u{002C}', '\u{060C}', '\u{FE50}', '\u{FE10}', '\u{FE11}', '\u{2E41}', '\u{2E34}',
    '\u{2E32}', '\u{FF0C}',
];

#[derive(Debug)]
pub(crate) struct Slot<'a> {
    /// Child positions from the scored root.
    pub path: Vec<usize>,
    pub parent: Option<usize>,
    /// Element children, in document order.
    pub children: Vec<usize>,
    pub node: &'a Node,
    pub element: &'a Element,
    /// Characters of normalized text.
    pub text_len: usize,
    /// Characters of link text.
    pub link_len: usize,
    pub commas: usize,
    pub has_block_child: bool,
}

impl Slot<'_> {
    pub fn link_density(&self) -> f64 {
        if self.text_len == 0 {
            return 0.0;
        }
        (self.link_len as f64 / self.text_len as f64).min(1.0)
    }
}

/// What [`Node::text_content`] of a subtree would measure, without building it.
#[derive(Debug, Default, Clone, Copy)]
struct Measure {
    chars: usize,
    /// The first non-empty run starts with closing punctuation.
    hugs_left: bool,
    commas: usize,
    link_chars: usize,
}

impl Measure {
    fn of_text(raw: &str) -> Self {
        let normalized = text::normalize(raw);
        Measure {
            chars: normalized.chars().count(),
            hugs_left: text::starts_with_closing_punctuation(&normalized),
            commas: normalized.chars().filter(|c| COMMAS.contains(c)).count(),
            link_chars: 0,
        }
    }

    /// Account for `next` following `self`, as `text::join` glues runs.
    fn append(&mut self, next: Measure) {
        self.link_chars += next.link_chars;
        if next.chars == 0 {
            return;
        }
        if self.chars == 0 {
            self.hugs_left = next.hugs_left;
        } else if !next.hugs_left {
            self.chars += 1;
        }
        self.chars += next.chars;
        self.commas += next.commas;
    }
}

#[derive(Debug)]
pub(crate) struct Arena<'a> {
    slots: Vec<Slot<'a>>,
}

impl<'a> Arena<'a> {
    pub fn build(root: &'a Node) -> Self {
        let mut arena = Arena { slots: Vec::new() };
        let mut path = Vec::new();
        arena.visit(root, None, &mut path);
        arena
    }

    fn visit(&mut self, node: &'a Node, parent: Option<usize>, path: &mut Vec<usize>) -> Measure {
        let element = match node {
            Node::Text(t) => return Measure::of_text(&t.text),
            Node::Comment(_) => return Measure::default(),
            Node::Element(element) => Some(element),
            Node::Document(_) => None,
        };

        let mut own = None;
        if let Some(element) = element {
            let id = self.slots.len();
            self.slots.push(Slot {
                path: path.clone(),
                parent,
                children: Vec::new(),
                node,
                element,
                text_len: 0,
                link_len: 0,
                commas: 0,
                has_block_child: element
                    .children
                    .iter()
                    .any(|child| child.tag().is_some_and(tags::is_block)),
            });
            if let Some(parent_id) = parent {
                self.slots[parent_id].children.push(id);
            }
            own = Some(id);
        }

        let mut measure = Measure::default();
        for (position, child) in node.children().iter().enumerate() {
            path.push(position);
            measure.append(self.visit(child, own.or(parent), path));
            path.pop();
        }

        if let (Some(id), Some(element)) = (own, element) {
            // Nested links count once per link, as in `collect_link_info`
            if element.tag == "a" {
                measure.link_chars += measure.chars;
            }
            let slot = &mut self.slots[id];
            slot.text_len = measure.chars;
            slot.link_len = measure.link_chars;
            slot.commas = measure.commas;
        }
        measure
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, id: usize) -> &Slot<'a> {
        &self.slots[id]
    }

    pub fn slots(&self) -> impl Iterator<Item = (usize, &Slot<'a>)> {
        self.slots.iter().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn test_arena_is_preorder_with_parents() {
        let doc = parse_html("<div><p>one, two</p><p>three</p></div>");
        let arena = Arena::build(&doc);
        let tags: Vec<&str> = arena.slots().map(|(_, s)| s.element.tag.as_str()).collect();
        assert_eq!(tags, vec!["html", "head", "body", "div", "p", "p"]);

        let div = arena.slot(3);
        assert_eq!(div.parent, Some(2));
        assert_eq!(div.children, vec![4, 5]);
        assert!(div.has_block_child);
        assert_eq!(div.path, vec![0, 1, 0]);
        assert_eq!(arena.slot(4).commas, 1);
        assert!(!arena.slot(4).has_block_child);
    }

    #[test]
    fn test_arena_measures_links() {
        let doc = parse_html(r#"<p>Read <a href="/x">this link</a> now</p>"#);
        let arena = Arena::build(&doc);
        let (_, p) = arena
            .slots()
            .find(|(_, s)| s.element.tag == "p")
            .unwrap_or_else(|| panic!("no paragraph slot"));

        assert_eq!(p.text_len, "Read this link now".len());
        assert_eq!(p.link_len, "this link".len());
        assert!(p.link_density() > 0.4 && p.link_density() < 0.6);
    }

    #[test]
    fn test_arena_matches_text_content() {
        let doc = parse_html(
            r#"<div>
                <p>Lead , with <a href="/a">a <b>bold</b> link</a>. And more</p>
                <ul><li>One, two</li><li><a href="/b">Three</a>; four</li></ul>
                <!-- note --><p>  <span>spaced</span>   out ,  </p>
            </div>"#,
        );
        let arena = Arena::build(&doc);

        for (_, slot) in arena.slots() {
            let text = slot.node.text_content();
            assert_eq!(slot.text_len, text.chars().count(), "<{}>", slot.element.tag);
            assert_eq!(slot.commas, text.chars().filter(|c| COMMAS.contains(c)).count());
            assert_eq!(
                slot.link_len,
                crate::link_density::collect_link_info(slot.node).link_length,
                "<{}>",
                slot.element.tag
            );
        }
    }
}

//! Comment and non-rendering markup removal.
//!
//! Runs before scoring so neither comments nor script/style text can count
//! as content. Text nodes are never touched.

use crate::extractor::tags;
use crate::node::Node;

/// Remove every comment node at any depth.
///
/// Returns the number of comments removed.
pub fn strip_comments(node: &mut Node) -> usize {
    remove_matching(node, &Node::is_comment)
}

/// Remove elements whose contents never render (`script`, `style`, `svg`...).
///
/// Returns the number of elements removed.
pub fn strip_unrenderable(node: &mut Node) -> usize {
    remove_matching(node, &|n: &Node| n.tag().is_some_and(tags::is_unrenderable))
}

/// Remove every descendant for which `doomed` holds, together with its subtree.
pub(crate) fn remove_matching<F>(node: &mut Node, doomed: &F) -> usize
where
    F: Fn(&Node) -> bool,
{
    let Some(children) = node.children_mut() else {
        return 0;
    };

    let before = children.len();
    children.retain(|child| !doomed(child));
    let mut removed = before - children.len();

    for child in children.iter_mut() {
        removed += remove_matching(child, doomed);
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Element;

    #[test]
    fn strips_nested_comments_and_keeps_text() {
        let mut tree = Node::Element(
            Element::new("div")
                .with_child(Node::comment(" top "))
                .with_child(Node::Element(
                    Element::new("p")
                        .with_child(Node::text("Some "))
                        .with_child(Node::comment(" "))
                        .with_child(Node::text(" text")),
                ))
                .with_child(Node::Element(
                    Element::new("span").with_child(Node::comment("only child")),
                )),
        );

        assert_eq!(strip_comments(&mut tree), 3);
        assert!(tree.descendants().all(|n| !n.is_comment()));
        let fragments = tree.text_fragments();
        assert_eq!(fragments, vec!["Some ", " text"]);
        // The emptied span is still there; dropping it is canonicalization's job.
        assert!(tree.find("span").is_some());
    }

    #[test]
    fn strips_scripts_and_styles() {
        let mut tree = Node::Element(
            Element::new("body")
                .with_child(Node::Element(
                    Element::new("script").with_child(Node::text("var x = 1;")),
                ))
                .with_child(Node::Element(
                    Element::new("p").with_child(Node::text("Visible")),
                ))
                .with_child(Node::Element(
                    Element::new("style").with_child(Node::text("p { color: red }")),
                )),
        );

        assert_eq!(strip_unrenderable(&mut tree), 2);
        assert_eq!(tree.text_content(), "Visible");
    }

    #[test]
    fn leaves_are_untouched() {
        let mut leaf = Node::text("plain");
        assert_eq!(strip_comments(&mut leaf), 0);
        assert_eq!(leaf, Node::text("plain"));
    }
}

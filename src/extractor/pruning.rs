//! Section pruning.
//!
//! Removes elements that are very unlikely to be part of the article
//! (navigation, sidebars, comment threads, hidden blocks, link farms) from a
//! copy of the tree before scoring, so they can neither win nor feed points
//! to the wrong ancestor.

use crate::link_density::link_density_test;
use crate::node::{Element, Node};
use crate::scorer::ScoringTable;
use crate::strip::remove_matching;

/// Blocks tested for link density.
const LINK_DENSITY_TAGS: [&str; 4] = ["div", "section", "ul", "ol"];

/// Return a pruned copy of `tree`.
///
/// Unlikely candidates and hidden elements go first, then short blocks made
/// mostly of links (two passes, the first can expose new ones). When pruning
/// removes more than ~85% of the text the page was probably misjudged and the
/// untouched copy is returned instead.
#[must_use]
pub fn prune_unwanted_sections(tree: &Node, table: &ScoringTable) -> Node {
    let mut pruned = tree.clone();

    let unlikely = remove_matching(&mut pruned, &|node: &Node| {
        node.as_element()
            .is_some_and(|el| table.is_unlikely(el) || is_hidden(el))
    });

    let mut link_heavy = 0;
    for _ in 0..2 {
        link_heavy += prune_link_heavy(&mut pruned);
    }

    let old_len = tree.text_content().chars().count();
    let new_len = pruned.text_content().chars().count();
    if old_len > 0 && new_len <= old_len / 7 {
        log::debug!("pruning left {new_len} of {old_len} characters, keeping the original");
        return tree.clone();
    }

    log::debug!("pruned {unlikely} unlikely and {link_heavy} link-heavy elements");
    pruned
}

/// Whether an element is hidden from readers.
#[must_use]
pub fn is_hidden(element: &Element) -> bool {
    if element.attributes.contains_key("hidden") {
        return true;
    }
    if element.attr("aria-hidden").is_some_and(|v| v.trim() == "true") {
        return true;
    }
    element.attr("style").is_some_and(|style| {
        let compact: String = style.chars().filter(|c| !c.is_whitespace()).collect();
        let compact = compact.to_ascii_lowercase();
        compact.contains("display:none") || compact.contains("visibility:hidden")
    })
}

fn prune_link_heavy(node: &mut Node) -> usize {
    let Some(children) = node.children_mut() else {
        return 0;
    };

    let doomed: Vec<bool> = children
        .iter()
        .enumerate()
        .map(|(i, child)| {
            child.tag().is_some_and(|tag| LINK_DENSITY_TAGS.contains(&tag))
                && link_density_test(child, children[i + 1..].iter().any(Node::is_element))
        })
        .collect();

    let before = children.len();
    let mut flags = doomed.into_iter();
    children.retain(|_| !flags.next().unwrap_or(false));
    let mut removed = before - children.len();

    for child in children.iter_mut() {
        removed += prune_link_heavy(child);
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;
    use crate::scorer::ScoringConfig;

    const PROSE: &str = "A long enough paragraph of article prose that should survive every \
        pruning pass because it is neither hidden nor made of links.";

    fn table() -> ScoringTable {
        ScoringConfig::default()
            .compile()
            .unwrap_or_else(|err| panic!("default table: {err}"))
    }

    #[test]
    fn test_removes_navigation_and_sidebars() {
        let doc = parse_html(&format!(
            r#"<nav>Site navigation</nav>
               <div class="sidebar">Related stories</div>
               <div role="complementary">Aside</div>
               <article><p>{PROSE}</p></article>
               <footer>Copyright</footer>"#
        ));
        let pruned = prune_unwanted_sections(&doc, &table());

        assert!(pruned.find("nav").is_none());
        assert!(pruned.find("footer").is_none());
        assert_eq!(pruned.elements().filter(|el| el.tag == "div").count(), 0);
        assert_eq!(pruned.find("article").map(Node::text_content), Some(PROSE.to_string()));
    }

    #[test]
    fn test_removes_hidden_elements() {
        let doc = parse_html(&format!(
            r#"<div style="display: none">Hidden text</div>
               <div aria-hidden="true">Also hidden</div>
               <p hidden>Hidden paragraph</p>
               <p>{PROSE}</p>"#
        ));
        let pruned = prune_unwanted_sections(&doc, &table());

        assert_eq!(pruned.find("body").map(Node::text_content), Some(PROSE.to_string()));
    }

    #[test]
    fn test_removes_link_lists() {
        let doc = parse_html(&format!(
            r#"<ul><li><a href="/a">One</a></li><li><a href="/b">Two</a></li></ul>
               <p>{PROSE}</p>"#
        ));
        let pruned = prune_unwanted_sections(&doc, &table());

        assert!(pruned.find("ul").is_none());
        assert!(pruned.find("p").is_some());
    }

    #[test]
    fn test_restores_when_nearly_everything_goes() {
        let doc = parse_html(&format!(r#"<div class="comments"><p>{PROSE}</p></div><p>Hi</p>"#));
        let pruned = prune_unwanted_sections(&doc, &table());

        assert_eq!(pruned, doc);
    }
}

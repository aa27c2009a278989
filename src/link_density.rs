//! Link density measurements.
//!
//! Blocks whose text is mostly hyperlinks are navigation, tag clouds or ad
//! slots far more often than prose. These helpers measure that, both as a
//! ratio (used to damp candidate scores) and as a yes/no test for short
//! link-rich blocks (used to prune them before scoring).

use crate::node::Node;

/// Aggregate link statistics of a subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkInfo {
    /// Total characters of link text.
    pub link_length: usize,
    /// Links with fewer than 10 characters of text.
    pub short_links: usize,
    /// Links with any text at all.
    pub non_empty_links: usize,
    /// All links, empty or not.
    pub links: usize,
}

/// Collect heuristics on link text.
#[must_use]
pub fn collect_link_info(node: &Node) -> LinkInfo {
    let mut info = LinkInfo::default();
    for link in node.descendants().filter(|n| n.tag() == Some("a")) {
        info.links += 1;
        let text_length = link.text_content().chars().count();
        if text_length == 0 {
            continue;
        }
        info.link_length += text_length;
        if text_length < 10 {
            info.short_links += 1;
        }
        info.non_empty_links += 1;
    }
    info
}

/// Share of a node's text that sits inside links, between 0 and 1.
#[must_use]
pub fn link_density(node: &Node) -> f64 {
    let text_length = node.text_content().chars().count();
    if text_length == 0 {
        return 0.0;
    }
    let info = collect_link_info(node);
    (info.link_length as f64 / text_length as f64).min(1.0)
}

/// Whether a block is short and made mostly of links (probably boilerplate).
///
/// `has_next_sibling` loosens the length limit for the last block of a run,
/// which tends to be a lone "read more" paragraph rather than a menu.
#[must_use]
pub fn link_density_test(node: &Node, has_next_sibling: bool) -> bool {
    let info = collect_link_info(node);
    if info.links == 0 {
        return false;
    }

    let text_length = node.text_content().chars().count();

    // Shortcut for a single link carrying nearly all of a long text
    if info.links == 1 && info.link_length > 100 && (info.link_length as f64) > (text_length as f64) * 0.9 {
        return true;
    }

    let limit_length: usize = if node.tag() == Some("p") {
        if has_next_sibling { 30 } else { 60 }
    } else if has_next_sibling {
        100
    } else {
        300
    };

    if text_length >= limit_length {
        return false;
    }

    if info.non_empty_links == 0 {
        return true;
    }

    // Link text > 80% of total text
    if (info.link_length as f64) > (text_length as f64) * 0.8 {
        return true;
    }

    // More than 80% of links are short - typical of nav menus
    info.non_empty_links > 1 && (info.short_links as f64) / (info.non_empty_links as f64) > 0.8
}

//! Title and byline from the document body.

use crate::node::{Element, Node};
use crate::patterns::{BYLINE_CLASS, BYLINE_PREFIX, TITLE_HIERARCHY_SEPARATOR, TITLE_SEPARATOR};
use crate::text;

// ============================================================
// TITLE EXTRACTION
// ============================================================

/// Extract the article title from the `<title>` element.
///
/// Site names are cut off (`Article | Site` gives `Article`) unless that
/// leaves too little of the title. A title that is very short or very long
/// is replaced by the page's only `<h1>`, if it has exactly one.
#[must_use]
pub fn examine_title_element(doc: &Node) -> Option<String> {
    let original = doc.find("title").map(Node::text_content).unwrap_or_default();
    let mut title = original.clone();
    let mut hierarchical = false;

    if let Some(last) = TITLE_SEPARATOR.find_iter(&original).last() {
        hierarchical = TITLE_HIERARCHY_SEPARATOR.is_match(&original);
        title = original[..last.start()].to_string();

        if word_count(&title) < 3 {
            if let Some(first) = TITLE_SEPARATOR.find(&original) {
                title = original[first.end()..].to_string();
            }
        }
    } else if original.contains(": ") {
        if !has_matching_heading(doc, &original) {
            if let Some((_, after)) = original.rsplit_once(':') {
                title = after.to_string();
            }
            if word_count(&title) < 3 {
                if let Some((_, after)) = original.split_once(':') {
                    title = after.to_string();
                }
            } else if original
                .split_once(':')
                .is_some_and(|(before, _)| word_count(before) > 5)
            {
                title = original.clone();
            }
        }
    } else {
        let length = original.chars().count();
        if !(15..=150).contains(&length) {
            if let Some(heading) = single_h1(doc) {
                title = heading;
            }
        }
    }

    let mut title = text::normalize(&title);

    // Cutting left too little behind, the original reads better
    let words = word_count(&title);
    if words <= 4 {
        let separators_removed = TITLE_SEPARATOR.replace_all(&original, " ");
        if !hierarchical || words + 1 != word_count(&separators_removed) {
            title.clone_from(&original);
        }
    }

    (!title.is_empty()).then_some(title)
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn has_matching_heading(doc: &Node, title: &str) -> bool {
    doc.descendants()
        .filter(|n| matches!(n.tag(), Some("h1" | "h2")))
        .any(|heading| heading.text_content() == title)
}

fn single_h1(doc: &Node) -> Option<String> {
    let mut headings = doc.descendants().filter(|n| n.tag() == Some("h1"));
    let first = headings.next()?;
    if headings.next().is_some() {
        return None;
    }
    Some(first.text_content())
}

// ============================================================
// AUTHOR EXTRACTION
// ============================================================

/// Find a byline element in the body, remove it and return its text.
///
/// A byline element is marked with `rel="author"`, an `itemprop` mentioning
/// `author`, or a byline-like class/id, and holds less than 100 characters
/// of text.
pub fn take_dom_byline(doc: &mut Node) -> Option<String> {
    let body_path = doc.find_path("body")?;
    let body = doc.get(&body_path)?;

    let mut found = None;
    let mut stack = vec![(body, body_path.clone())];
    while let Some((node, path)) = stack.pop() {
        if let Some(byline) = node.as_element().filter(|el| is_byline_element(el)).and_then(|_| {
            let byline = node.text_content();
            let length = byline.chars().count();
            (length > 0 && length < 100).then_some(byline)
        }) {
            found = Some((path, byline));
            break;
        }
        for (position, child) in node.children().iter().enumerate().rev() {
            let mut child_path = path.clone();
            child_path.push(position);
            stack.push((child, child_path));
        }
    }

    let (path, byline) = found?;
    let (position, parent_path) = path.split_last()?;
    if let Some(children) = doc.get_mut(parent_path).and_then(Node::children_mut) {
        children.remove(*position);
    }

    let byline = BYLINE_PREFIX.replace(&byline, "").trim().to_string();
    (!byline.is_empty()).then_some(byline)
}

fn is_byline_element(element: &Element) -> bool {
    if element.tag == "body" {
        return false;
    }
    if element.attr("rel") == Some("author") {
        return true;
    }
    if element.attr("itemprop").is_some_and(|v| v.contains("author")) {
        return true;
    }
    BYLINE_CLASS.is_match(&element.match_string())
}

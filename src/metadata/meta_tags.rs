//! HTML meta tag parsing.
//!
//! Collects `<meta name|property=... content=...>` pairs under normalized
//! keys (`dc.title` and `DC:Title` both become `dc:title`) and answers title
//! and byline lookups from them.

use std::collections::HashMap;

use crate::node::Node;
use crate::text;

/// Meta keys that hold the article title, best first.
const TITLE_KEYS: [&str; 6] = [
    "dc:title",
    "dcterm:title",
    "og:title",
    "weibo:article:title",
    "twitter:title",
    "parsely-title",
];

/// Meta keys that hold the author, best first.
const BYLINE_KEYS: [&str; 5] = [
    "dc:creator",
    "dcterm:creator",
    "author",
    "parsely-author",
    "article:author",
];

/// Normalized meta values of a document. The first value of a key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaValues(HashMap<String, String>);

impl MetaValues {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn title(&self) -> Option<String> {
        TITLE_KEYS.iter().find_map(|key| self.get(key)).map(ToString::to_string)
    }

    /// Author from meta tags. `article:author` often holds a profile URL
    /// rather than a name; those are ignored.
    #[must_use]
    pub fn byline(&self) -> Option<String> {
        BYLINE_KEYS
            .iter()
            .filter_map(|key| self.get(key))
            .find(|value| !looks_like_url(value))
            .map(ToString::to_string)
    }
}

/// Collect the meta values of a document.
#[must_use]
pub fn examine_meta(doc: &Node) -> MetaValues {
    let mut values = HashMap::new();

    for meta in doc.elements().filter(|el| el.tag == "meta") {
        let Some(content) = meta.attr("content").map(text::normalize) else {
            continue;
        };
        if content.is_empty() {
            continue;
        }

        // property may list several space-separated keys
        let keys = meta
            .attr("property")
            .into_iter()
            .flat_map(str::split_whitespace)
            .chain(meta.attr("name").map(str::trim));

        for key in keys {
            let key = normalize_key(key);
            if !key.is_empty() {
                values.entry(key).or_insert_with(|| content.clone());
            }
        }
    }

    MetaValues(values)
}

fn normalize_key(key: &str) -> String {
    key.trim()
        .to_ascii_lowercase()
        .replace('.', ":")
        .split_whitespace()
        .collect()
}

fn looks_like_url(value: &str) -> bool {
    value.contains("://") || value.starts_with('/') || value.starts_with("www.")
}

//! JSON-LD metadata parsing.
//!
//! Reads Schema.org objects embedded in `<script type="application/ld+json">`
//! and takes title and byline from the first article-typed one.

use serde_json::{Map, Value};

use super::Metadata;
use crate::node::{Element, Node};
use crate::patterns::JSON_LD_ARTICLE_TYPE;
use crate::text;

/// Extract metadata from JSON-LD scripts.
///
/// Scripts that fail to parse, or hold no article object, are skipped.
#[must_use]
pub fn extract_json_ld(doc: &Node) -> Metadata {
    let scripts = doc
        .descendants()
        .filter(|node| node.as_element().is_some_and(is_json_ld_script));
    for script in scripts {
        let raw = script.text_fragments().concat();
        let json = raw
            .trim()
            .trim_start_matches("<![CDATA[")
            .trim_end_matches("]]>")
            .trim();
        if json.is_empty() {
            continue;
        }

        let data: Value = match serde_json::from_str(json) {
            Ok(v) => v,
            Err(err) => {
                log::trace!("skipping unparsable JSON-LD: {err}");
                continue;
            }
        };

        if let Some(article) = find_article(&data) {
            return Metadata {
                title: get_single_string_value(article, "headline")
                    .or_else(|| get_single_string_value(article, "name")),
                byline: get_author_names(article),
            };
        }
    }
    Metadata::default()
}

fn is_json_ld_script(element: &Element) -> bool {
    element.tag == "script"
        && element
            .attr("type")
            .is_some_and(|t| t.trim().eq_ignore_ascii_case("application/ld+json"))
}

/// First article object in a JSON-LD value, looking into arrays and `@graph`.
fn find_article(value: &Value) -> Option<&Map<String, Value>> {
    match value {
        Value::Array(items) => items.iter().find_map(find_article),
        Value::Object(map) => {
            if is_article_type(map) && has_schema_context(map) {
                return Some(map);
            }
            map.get("@graph").and_then(find_article)
        }
        _ => None,
    }
}

fn is_article_type(map: &Map<String, Value>) -> bool {
    match map.get("@type") {
        Some(Value::String(t)) => JSON_LD_ARTICLE_TYPE.is_match(t),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| JSON_LD_ARTICLE_TYPE.is_match(t)),
        _ => false,
    }
}

/// Objects nested in a `@graph` usually inherit the context, so a missing
/// one is accepted.
fn has_schema_context(map: &Map<String, Value>) -> bool {
    match map.get("@context") {
        None => true,
        Some(Value::String(context)) => context.contains("schema.org"),
        Some(Value::Object(context)) => context
            .get("@vocab")
            .and_then(Value::as_str)
            .is_some_and(|vocab| vocab.contains("schema.org")),
        Some(_) => false,
    }
}

fn get_single_string_value(data: &Map<String, Value>, key: &str) -> Option<String> {
    let value = text::normalize(data.get(key)?.as_str()?);
    (!value.is_empty()).then_some(value)
}

/// Author names, joined with `, ` when there are several.
fn get_author_names(data: &Map<String, Value>) -> Option<String> {
    let names: Vec<String> = match data.get("author")? {
        Value::String(name) => vec![text::normalize(name)],
        Value::Object(author) => get_single_string_value(author, "name").into_iter().collect(),
        Value::Array(authors) => authors
            .iter()
            .filter_map(|author| match author {
                Value::String(name) => Some(text::normalize(name)),
                Value::Object(author) => get_single_string_value(author, "name"),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };

    let names: Vec<String> = names.into_iter().filter(|n| !n.is_empty()).collect();
    (!names.is_empty()).then(|| names.join(", "))
}

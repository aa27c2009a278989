mod common;

use common::NEWS_PAGE;
use simple_article::node::Element;
use simple_article::{extract, NodeIndex, Options, SimpleArticle};

fn article(options: &Options) -> SimpleArticle {
    extract(NEWS_PAGE, options)
        .unwrap_or_else(|err| panic!("extraction failed: {err}"))
        .into_article()
        .unwrap_or_else(|| panic!("expected an article"))
}

fn digests() -> Options {
    Options {
        content_digests: true,
        ..Options::default()
    }
}

fn indexes() -> Options {
    Options {
        node_indexes: true,
        ..Options::default()
    }
}

fn element_indexes(article: &SimpleArticle) -> Vec<Option<NodeIndex>> {
    article
        .plain_content
        .elements()
        .map(|el: &Element| el.node_index.clone())
        .collect()
}

#[test]
fn test_digests_are_deterministic() {
    let first = article(&digests());
    let second = article(&digests());

    assert_eq!(first.content, second.content);
    assert_eq!(first.plain_content, second.plain_content);
    assert!(first
        .plain_content
        .elements()
        .all(|el| el.content_digest.as_ref().is_some_and(|d| d.len() == 64)));
}

#[test]
fn test_digests_ignore_surrounding_page() {
    let reworded = NEWS_PAGE
        .replace("<a href=\"/news\">News</a>", "<a href=\"/world\">World</a>")
        .replace("Copyright 2026", "Copyright 2027");
    let a = article(&digests());
    let b = extract(&reworded, &digests())
        .unwrap_or_else(|err| panic!("extraction failed: {err}"))
        .into_article()
        .unwrap_or_else(|| panic!("expected an article"));

    assert_eq!(a.content, b.content);
}

#[test]
fn test_digest_attribute_is_serialized() {
    let article = article(&digests());
    let root_digest = article
        .plain_content
        .as_element()
        .and_then(|root| root.content_digest.clone())
        .unwrap_or_else(|| panic!("root digest missing"));

    assert!(article
        .content
        .starts_with(&format!(r#"<main data-content-digest="{root_digest}"><article data-content-digest=""#)));
    assert!(!article.content.contains("data-node-index"));
}

#[test]
fn test_indexes_follow_original_positions() {
    let article = article(&indexes());
    let found: Vec<String> = element_indexes(&article)
        .into_iter()
        .map(|index| index.map(|i| i.to_string()).unwrap_or_default())
        .collect();

    assert_eq!(
        found,
        vec![
            "0", "0.1", "0.1.1", "0.1.2", "0.1.3", "0.1.4", "0.1.5", "0.1.6", "0.1.6.1", "0.1.6.2",
            "0.1.7"
        ]
    );
    assert!(article.content.starts_with(r#"<main data-node-index="0"><article data-node-index="0.1">"#));
}

#[test]
fn test_indexes_strictly_increase() {
    let article = article(&indexes());
    let found: Vec<NodeIndex> = element_indexes(&article).into_iter().flatten().collect();

    assert_eq!(found.len(), article.plain_content.elements().count());
    assert!(found.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_digests_and_indexes_compose() {
    let both = article(&Options {
        content_digests: true,
        node_indexes: true,
        ..Options::default()
    });
    let only_digests = article(&digests());
    let only_indexes = article(&indexes());

    let digests_of = |article: &SimpleArticle| -> Vec<Option<String>> {
        article.plain_content.elements().map(|el| el.content_digest.clone()).collect()
    };

    assert_eq!(digests_of(&both), digests_of(&only_digests));
    assert_eq!(element_indexes(&both), element_indexes(&only_indexes));
    assert!(both
        .plain_content
        .elements()
        .all(|el| el.content_digest.is_some() && el.node_index.is_some()));
    assert!(both.content.contains(r#"data-content-digest=""#));
    assert!(both.content.contains(r#"data-node-index="0.1.7""#));
}

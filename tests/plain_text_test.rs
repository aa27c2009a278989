mod common;

use common::NEWS_PAGE;
use simple_article::plain_text::{from_article, paragraphs};
use simple_article::{extract, extract_paragraphs_as_plain_text, Options, Paragraph, SimpleArticle};

fn article(options: &Options) -> SimpleArticle {
    extract(NEWS_PAGE, options)
        .unwrap_or_else(|err| panic!("extraction failed: {err}"))
        .into_article()
        .unwrap_or_else(|| panic!("expected an article"))
}

fn indexed_plain_text() -> Options {
    Options {
        node_indexes: true,
        plain_text: true,
        ..Options::default()
    }
}

#[test]
fn test_paragraphs_in_order_with_indexes() {
    let article = article(&indexed_plain_text());
    let found: Vec<(String, String)> = article
        .plain_text
        .clone()
        .unwrap_or_default()
        .into_iter()
        .map(|p| (p.node_index.map(|i| i.to_string()).unwrap_or_default(), p.text))
        .collect();

    let expected = [
        ("0.1.2", "The city council voted on Monday night to approve a new budget, which raises spending on parks, libraries, and road repairs by four percent."),
        ("0.1.3", "Supporters said the plan was overdue, pointing to years of deferred maintenance, crowded branches, and potholes that never seemed to get fixed."),
        ("0.1.4", "Critics on the council argued that the increase, while modest, would be hard to sustain if tax revenue falls short of the projections again."),
        ("0.1.5", "The budget takes effect in July, and the first projects, including the resurfacing of Main Street, are expected to begin later this summer."),
        ("0.1.6", "* Parks, libraries and pools, * Road repairs,"),
        ("0.1.7", "Short closing line."),
    ];
    let expected: Vec<(String, String)> = expected
        .iter()
        .map(|(index, text)| ((*index).to_string(), (*text).to_string()))
        .collect();

    assert_eq!(found, expected);
}

#[test]
fn test_paragraph_indexes_match_article_nodes() {
    let article = article(&indexed_plain_text());
    let node_indexes: Vec<_> = article
        .plain_content
        .elements()
        .filter(|el| matches!(el.tag.as_str(), "p" | "ul" | "ol"))
        .map(|el| el.node_index.clone())
        .collect();
    let paragraph_indexes: Vec<_> = article
        .plain_text
        .unwrap_or_default()
        .into_iter()
        .map(|p| p.node_index)
        .collect();

    assert_eq!(paragraph_indexes, node_indexes);
}

#[test]
fn test_projection_survives_json_round_trip() {
    let article = article(&indexed_plain_text());
    let json = article.to_json().unwrap_or_else(|err| panic!("encoding failed: {err}"));

    let projected = extract_paragraphs_as_plain_text(&json).unwrap_or_else(|err| panic!("projection failed: {err}"));
    assert_eq!(Some(projected), article.plain_text);

    let restored = SimpleArticle::from_json(&json).unwrap_or_else(|err| panic!("decoding failed: {err}"));
    assert_eq!(restored, article);
}

#[test]
fn test_paragraphs_without_indexes() {
    let article = article(&Options::default());
    let found: Vec<Paragraph> = from_article(&article).collect();

    assert_eq!(found.len(), 6);
    assert!(found.iter().all(|p| p.node_index.is_none()));
}

#[test]
fn test_iterator_is_lazy_and_restartable() {
    let article = article(&indexed_plain_text());
    let mut iter = paragraphs(&article.plain_content);
    let restart = iter.clone();

    let first = iter.next().map(|p| p.text);
    assert!(first.is_some_and(|text| text.starts_with("The city council voted")));
    assert_eq!(restart.count(), 6);
    assert_eq!(iter.count(), 5);
}

#[test]
fn test_malformed_json_is_error() {
    assert!(matches!(
        extract_paragraphs_as_plain_text("{ not json"),
        Err(simple_article::Error::Json(_))
    ));
}

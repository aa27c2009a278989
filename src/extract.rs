//! Extraction pipeline.
//!
//! Ties the stages together: validation, comment stripping, metadata,
//! pruning, scoring, canonicalization, annotation and serialization. A page
//! without an article comes back as [`Extraction::NotAnArticle`], never as an
//! error.

use crate::annotate;
use crate::canonical::canonicalize;
use crate::error::Result;
use crate::extractor::pruning::prune_unwanted_sections;
use crate::metadata::{self, Metadata};
use crate::node::{Element, Node, NodeIndex};
use crate::options::Options;
use crate::result::Extraction;
use crate::scorer::{select_article, ArticleSelection, ScoringTable, Verdict};
use crate::serialize::serialize;
use crate::strip::{strip_comments, strip_unrenderable};

/// Where the article is located in the tree being extracted from.
struct Located {
    candidate: Node,
    /// Origin for a `div` synthesized around a non-container candidate.
    wrapper_origin: Option<NodeIndex>,
    metadata: Metadata,
    /// Whether the article passed a scorer and must meet the text minimum.
    scored: bool,
}

/// Run the full pipeline over a parsed tree.
///
/// `source` is the page the tree was parsed from, when there is one; only
/// the Readability backend reads it.
pub(crate) fn extract_tree(mut tree: Node, options: &Options, source: Option<&str>) -> Result<Extraction> {
    tree.validate(options.max_tree_depth)?;
    if !tree.has_origins() {
        let base = if tree.is_element() { NodeIndex::root() } else { NodeIndex::document() };
        tree.stamp_origins(&base);
    }

    let removed = strip_comments(&mut tree);
    log::debug!("stripped {removed} comments");

    let located = if options.use_readability {
        locate_with_readability(tree, options, source)?
    } else if options.use_scoring {
        locate_with_scorer(tree, options)?
    } else {
        strip_unrenderable(&mut tree);
        Some(Located {
            candidate: tree,
            wrapper_origin: None,
            metadata: Metadata::default(),
            scored: false,
        })
    };

    let Some(located) = located else {
        return Ok(Extraction::NotAnArticle);
    };

    let canonical = canonicalize(located.candidate, located.wrapper_origin, options)?;

    if located.scored {
        let text_len = canonical.root.text_content().chars().count();
        if text_len < options.scoring.min_text_length {
            log::debug!(
                "article text is {text_len} characters, below {}",
                options.scoring.min_text_length
            );
            return Ok(Extraction::NotAnArticle);
        }
    }

    let mut root = canonical.root;
    if options.content_digests {
        root = annotate::with_digests(root);
    }
    if options.node_indexes {
        root = annotate::with_indexes(root);
    }

    let Metadata { title, byline } = located.metadata;
    let mut article = serialize(root, title, byline, options);
    article.warnings = canonical.warnings;
    Ok(Extraction::Article(Box::new(article)))
}

fn locate_with_scorer(mut tree: Node, options: &Options) -> Result<Option<Located>> {
    let table = options.scoring.compile()?;

    // Metadata reads scripts and meta tags, so it goes before they are stripped
    let metadata = metadata::extract_metadata(&mut tree);
    strip_unrenderable(&mut tree);

    let Some((tree, selection)) = select(tree, &table, options.strip_unlikelys) else {
        return Ok(None);
    };
    let (candidate, wrapper_origin) = candidate_from(&tree, &selection);

    Ok(Some(Located {
        candidate,
        wrapper_origin,
        metadata,
        scored: true,
    }))
}

/// Score the pruned tree, then the untouched one if pruning left no article.
fn select(tree: Node, table: &ScoringTable, strip_unlikelys: bool) -> Option<(Node, ArticleSelection)> {
    if strip_unlikelys {
        let pruned = prune_unwanted_sections(&tree, table);
        if let Verdict::Article(selection) = select_article(&pruned, table) {
            return Some((pruned, selection));
        }
        log::debug!("no article after pruning, scoring again without it");
    }

    match select_article(&tree, table) {
        Verdict::Article(selection) => Some((tree, selection)),
        Verdict::NotAnArticle => None,
    }
}

/// Cut the selected article out of the scored tree.
///
/// A lone top candidate is returned as is; with siblings kept beside it, the
/// members are gathered under a `div` standing in for their parent.
fn candidate_from(tree: &Node, selection: &ArticleSelection) -> (Node, Option<NodeIndex>) {
    let parent_origin = selection
        .parent_path
        .as_deref()
        .and_then(|path| tree.get(path))
        .and_then(Node::as_element)
        .and_then(|parent| parent.origin().cloned());

    if let [only] = selection.members.as_slice() {
        let candidate = tree.get(only).cloned().unwrap_or_else(|| Node::element("div"));
        return (candidate, parent_origin);
    }

    let children = selection
        .members
        .iter()
        .filter_map(|path| tree.get(path).cloned())
        .collect();
    let wrapper = Element {
        tag: "div".to_string(),
        children,
        origin: parent_origin.clone(),
        ..Element::default()
    };
    (Node::Element(wrapper), parent_origin)
}

#[cfg(feature = "readability")]
fn locate_with_readability(tree: Node, options: &Options, source: Option<&str>) -> Result<Option<Located>> {
    use crate::extractor::readability::readability_article;

    let html = source.map_or_else(|| crate::serialize::to_html(&tree), str::to_string);
    drop(tree);

    let Some(article) = readability_article(&html) else {
        return Ok(None);
    };
    let mut content = article.content;
    strip_comments(&mut content);
    strip_unrenderable(&mut content);
    content.validate(options.max_tree_depth)?;

    Ok(Some(Located {
        candidate: content,
        wrapper_origin: None,
        metadata: Metadata {
            title: article.title,
            byline: article.byline,
        },
        scored: true,
    }))
}

#[cfg(not(feature = "readability"))]
fn locate_with_readability(tree: Node, options: &Options, _source: Option<&str>) -> Result<Option<Located>> {
    log::warn!("built without the `readability` feature, using the built-in scorer");
    locate_with_scorer(tree, options)
}

//! Candidate scoring.
//!
//! Locates the element most likely to hold the article body. Paragraph-like
//! elements earn points for their length and comma count; the points flow up
//! to a few ancestors with decreasing weight, each ancestor starting from a
//! base score given by its tag and class/id. The best-scoring ancestor,
//! damped by its link density, is the article root. Siblings that look like
//! part of the same article are kept alongside it.
//!
//! All weights and thresholds come from a [`ScoringTable`].

mod arena;
pub mod table;

pub use table::{ScoringConfig, ScoringTable};

use crate::link_density::link_density;
use crate::patterns::SENTENCE_END;
use crate::node::Node;

use arena::{Arena, Slot};

/// An element that received points during scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    /// Child positions from the scored root.
    pub path: Vec<usize>,
    pub tag: String,
    /// Tag weight plus class/id weight.
    pub base: f64,
    /// Points received from descendant paragraphs.
    pub propagated: f64,
    /// `(base + propagated) * (1 - link density)`.
    pub score: f64,
}

/// The chosen article: a top candidate and the siblings kept with it.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleSelection {
    pub top: ScoredCandidate,
    /// Path of the top candidate's parent, `None` when the top is the scored root.
    pub parent_path: Option<Vec<usize>>,
    /// Paths of the kept elements in document order, the top included.
    pub members: Vec<Vec<usize>>,
}

/// Outcome of [`select_article`].
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Article(ArticleSelection),
    NotAnArticle,
}

/// Score every candidate under `root` and select the article.
///
/// # Example
///
/// ```
/// use simple_article::dom::parse_html;
/// use simple_article::scorer::{select_article, ScoringConfig, Verdict};
///
/// let doc = parse_html("<nav><a href='/'>Home</a></nav>");
/// let table = ScoringConfig::default().compile()?;
/// assert_eq!(select_article(&doc, &table), Verdict::NotAnArticle);
/// # Ok::<(), simple_article::Error>(())
/// ```
#[must_use]
pub fn select_article(root: &Node, table: &ScoringTable) -> Verdict {
    let config = table.config();
    let arena = Arena::build(root);

    // (base, propagated) per slot, initialised on first contribution
    let mut tallies: Vec<Option<(f64, f64)>> = vec![None; arena.len()];

    for (_, slot) in arena.slots() {
        if !is_paragraph_like(slot, table) || slot.text_len < config.min_paragraph_length {
            continue;
        }
        let length_bonus = slot
            .text_len
            .checked_div(config.length_bonus_step)
            .unwrap_or(0)
            .min(config.max_length_bonus);
        let points = (1 + slot.commas + length_bonus) as f64;

        let mut ancestor = slot.parent;
        for level in 0..config.ancestor_depth {
            let Some(id) = ancestor else { break };
            let candidate = arena.slot(id);
            // The document element never competes
            if candidate.element.tag == "html" {
                break;
            }
            let divider = match level {
                0 => 1.0,
                1 => 2.0,
                n => (n * 3) as f64,
            };
            let tally = tallies[id].get_or_insert_with(|| (table.base_score(candidate.element), 0.0));
            tally.1 += points / divider;
            ancestor = candidate.parent;
        }
    }

    let scored: Vec<Option<ScoredCandidate>> = tallies
        .iter()
        .enumerate()
        .map(|(id, tally)| {
            tally.map(|(base, propagated)| {
                let slot = arena.slot(id);
                ScoredCandidate {
                    path: slot.path.clone(),
                    tag: slot.element.tag.clone(),
                    base,
                    propagated,
                    score: (base + propagated) * (1.0 - slot.link_density()),
                }
            })
        })
        .collect();

    // Strictly greater, so ties go to the earliest candidate
    let mut best: Option<usize> = None;
    for (id, candidate) in scored.iter().enumerate() {
        let Some(candidate) = candidate else { continue };
        log::trace!("candidate <{}> at {:?}: {:.2}", candidate.tag, candidate.path, candidate.score);
        let better = best
            .and_then(|b| scored[b].as_ref())
            .is_none_or(|current| candidate.score > current.score);
        if better {
            best = Some(id);
        }
    }

    let Some(mut top_id) = best else {
        log::debug!("no scoring candidates");
        return Verdict::NotAnArticle;
    };
    let Some(mut top) = scored[top_id].clone() else {
        return Verdict::NotAnArticle;
    };
    if top.score < config.min_candidate_score {
        log::debug!(
            "top candidate <{}> scored {:.2}, below {:.2}",
            top.tag,
            top.score,
            config.min_candidate_score
        );
        return Verdict::NotAnArticle;
    }

    // A lone child says nothing its parent doesn't
    while let Some(parent_id) = arena.slot(top_id).parent {
        let parent = arena.slot(parent_id);
        if matches!(parent.element.tag.as_str(), "body" | "html") || parent.children.len() != 1 {
            break;
        }
        let previous = top.score;
        top = scored[parent_id].clone().unwrap_or_else(|| ScoredCandidate {
            path: parent.path.clone(),
            tag: parent.element.tag.clone(),
            base: table.base_score(parent.element),
            propagated: 0.0,
            score: previous,
        });
        top.score = top.score.max(previous);
        top_id = parent_id;
    }

    log::debug!("top candidate <{}> at {:?} scored {:.2}", top.tag, top.path, top.score);

    let Some(parent_id) = arena.slot(top_id).parent else {
        return Verdict::Article(ArticleSelection {
            members: vec![top.path.clone()],
            top,
            parent_path: None,
        });
    };

    let members = arena
        .slot(parent_id)
        .children
        .iter()
        .filter(|&&id| id == top_id || keeps_sibling(&arena, &scored, id, top_id, &top, table))
        .map(|&id| arena.slot(id).path.clone())
        .collect();

    Verdict::Article(ArticleSelection {
        parent_path: Some(arena.slot(parent_id).path.clone()),
        members,
        top,
    })
}

fn is_paragraph_like(slot: &Slot<'_>, table: &ScoringTable) -> bool {
    let tag = slot.element.tag.as_str();
    table.is_paragraph_tag(tag) || (tag == "div" && !slot.has_block_child)
}

fn keeps_sibling(
    arena: &Arena<'_>,
    scored: &[Option<ScoredCandidate>],
    id: usize,
    top_id: usize,
    top: &ScoredCandidate,
    table: &ScoringTable,
) -> bool {
    let config = table.config();
    let sibling = arena.slot(id);
    let threshold = config.sibling_min_score.max(top.score * config.sibling_score_ratio);

    let top_class = arena.slot(top_id).element.attr("class").unwrap_or_default();
    let bonus = if !top_class.is_empty() && sibling.element.attr("class") == Some(top_class) {
        top.score * 0.2
    } else {
        0.0
    };

    if let Some(candidate) = &scored[id] {
        if candidate.score + bonus >= threshold {
            log::trace!("sibling <{}> kept on score {:.2}", candidate.tag, candidate.score);
            return true;
        }
    }

    if sibling.element.tag != "p" {
        return false;
    }

    let density = link_density(sibling.node);
    if sibling.text_len > 80 {
        density < 0.25
    } else {
        sibling.text_len > 0
            && density == 0.0
            && SENTENCE_END.is_match(&sibling.node.text_content())
    }
}

//! Scoring tables.
//!
//! The weights and thresholds the scorer runs on are plain data:
//! [`ScoringConfig`] can be built in code, tweaked with struct-update syntax
//! or loaded from JSON, and is compiled once per extraction into a
//! [`ScoringTable`] holding the ready-to-use regexes.

use std::collections::{BTreeMap, HashSet};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::node::Element;
use crate::patterns::{
    MAYBE_CANDIDATE_SOURCE, NEGATIVE_CLASS_SOURCE, POSITIVE_CLASS_SOURCE,
    UNLIKELY_CANDIDATE_SOURCE,
};

/// Tunable data behind the candidate scorer.
///
/// # Example
///
/// ```rust
/// use simple_article::scorer::ScoringConfig;
///
/// let config = ScoringConfig::from_json(r#"{ "min_candidate_score": 5.0 }"#)?;
/// assert_eq!(config.min_candidate_score, 5.0);
/// // Fields missing from the JSON keep their defaults.
/// assert_eq!(config.class_weight, 25.0);
/// # Ok::<(), simple_article::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Base score of a candidate by tag name. Missing tags weigh 0.
    pub tag_weights: BTreeMap<String, f64>,

    /// Tags scored as paragraphs. A `div` without block children always is.
    pub paragraph_tags: Vec<String>,

    /// Class/id pattern adding `class_weight`.
    pub positive_pattern: String,

    /// Class/id pattern subtracting `class_weight`.
    pub negative_pattern: String,

    /// Class/id pattern of elements pruned before scoring.
    pub unlikely_pattern: String,

    /// Class/id pattern that exempts an element from `unlikely_pattern`.
    pub maybe_pattern: String,

    /// Tags pruned before scoring regardless of class.
    pub unlikely_tags: Vec<String>,

    /// ARIA roles pruned before scoring.
    pub unlikely_roles: Vec<String>,

    /// Score added or removed per class/id pattern match.
    pub class_weight: f64,

    /// Paragraphs with less text (in characters) are not scored.
    pub min_paragraph_length: usize,

    /// A paragraph earns one point per this many characters...
    pub length_bonus_step: usize,

    /// ...up to this many points.
    pub max_length_bonus: usize,

    /// How many ancestors a paragraph's points reach.
    pub ancestor_depth: usize,

    /// A top candidate scoring below this means the page is not an article.
    pub min_candidate_score: f64,

    /// A canonical article with less text than this is not an article.
    pub min_text_length: usize,

    /// Siblings scoring at least this share of the top score join the article.
    pub sibling_score_ratio: f64,

    /// Floor of the sibling threshold.
    pub sibling_min_score: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let tag_weights = [
            ("div", 5.0),
            ("article", 8.0),
            ("main", 5.0),
            ("pre", 3.0),
            ("td", 3.0),
            ("blockquote", 3.0),
            ("section", 2.0),
            ("address", -3.0),
            ("ol", -3.0),
            ("ul", -3.0),
            ("dl", -3.0),
            ("dd", -3.0),
            ("dt", -3.0),
            ("li", -3.0),
            ("form", -3.0),
            ("nav", -10.0),
            ("h1", -5.0),
            ("h2", -5.0),
            ("h3", -5.0),
            ("h4", -5.0),
            ("h5", -5.0),
            ("h6", -5.0),
            ("th", -5.0),
        ]
        .into_iter()
        .map(|(tag, weight)| (tag.to_string(), weight))
        .collect();

        let strings = |items: &[&str]| items.iter().map(ToString::to_string).collect();

        Self {
            tag_weights,
            paragraph_tags: strings(&["p", "pre", "td", "section", "h2", "h3", "h4", "h5", "h6"]),
            positive_pattern: POSITIVE_CLASS_SOURCE.to_string(),
            negative_pattern: NEGATIVE_CLASS_SOURCE.to_string(),
            unlikely_pattern: UNLIKELY_CANDIDATE_SOURCE.to_string(),
            maybe_pattern: MAYBE_CANDIDATE_SOURCE.to_string(),
            unlikely_tags: strings(&["nav", "aside", "footer"]),
            unlikely_roles: strings(&[
                "menu",
                "menubar",
                "complementary",
                "navigation",
                "alert",
                "alertdialog",
                "dialog",
            ]),
            class_weight: 25.0,
            min_paragraph_length: 25,
            length_bonus_step: 100,
            max_length_bonus: 3,
            ancestor_depth: 5,
            min_candidate_score: 20.0,
            min_text_length: 140,
            sibling_score_ratio: 0.2,
            sibling_min_score: 10.0,
        }
    }
}

impl ScoringConfig {
    /// Load a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Compile the patterns and lookup sets.
    pub fn compile(&self) -> Result<ScoringTable> {
        let compile = |name: &str, source: &str| {
            Regex::new(source)
                .map_err(|err| Error::InvalidConfig(format!("{name} does not compile: {err}")))
        };

        Ok(ScoringTable {
            positive: compile("positive_pattern", &self.positive_pattern)?,
            negative: compile("negative_pattern", &self.negative_pattern)?,
            unlikely: compile("unlikely_pattern", &self.unlikely_pattern)?,
            maybe: compile("maybe_pattern", &self.maybe_pattern)?,
            paragraph_tags: self.paragraph_tags.iter().cloned().collect(),
            unlikely_tags: self.unlikely_tags.iter().cloned().collect(),
            unlikely_roles: self.unlikely_roles.iter().cloned().collect(),
            config: self.clone(),
        })
    }
}

/// A compiled [`ScoringConfig`].
#[derive(Debug, Clone)]
pub struct ScoringTable {
    config: ScoringConfig,
    positive: Regex,
    negative: Regex,
    unlikely: Regex,
    maybe: Regex,
    paragraph_tags: HashSet<String>,
    unlikely_tags: HashSet<String>,
    unlikely_roles: HashSet<String>,
}

impl ScoringTable {
    /// The configuration this table was compiled from.
    #[must_use]
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    #[must_use]
    pub fn tag_weight(&self, tag: &str) -> f64 {
        self.config.tag_weights.get(tag).copied().unwrap_or(0.0)
    }

    /// Class and id are judged separately, each worth ±`class_weight`.
    #[must_use]
    pub fn class_weight(&self, element: &Element) -> f64 {
        let weight = self.config.class_weight;
        let mut total = 0.0;
        for value in [element.attr("class"), element.attr("id")].into_iter().flatten() {
            if value.is_empty() {
                continue;
            }
            if self.negative.is_match(value) {
                total -= weight;
            }
            if self.positive.is_match(value) {
                total += weight;
            }
        }
        total
    }

    /// Score an ancestor starts from before any paragraph points arrive.
    #[must_use]
    pub fn base_score(&self, element: &Element) -> f64 {
        self.tag_weight(&element.tag) + self.class_weight(element)
    }

    #[must_use]
    pub fn is_paragraph_tag(&self, tag: &str) -> bool {
        self.paragraph_tags.contains(tag)
    }

    /// Whether pruning should remove this element before scoring.
    #[must_use]
    pub fn is_unlikely(&self, element: &Element) -> bool {
        if matches!(element.tag.as_str(), "html" | "body" | "a" | "article" | "main") {
            return false;
        }
        if self.unlikely_tags.contains(&element.tag) {
            return true;
        }
        if element
            .attr("role")
            .is_some_and(|role| self.unlikely_roles.contains(role.trim()))
        {
            return true;
        }
        let match_string = element.match_string();
        self.unlikely.is_match(&match_string) && !self.maybe.is_match(&match_string)
    }
}

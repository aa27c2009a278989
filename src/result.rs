//! Result types for extraction output.
//!
//! This module defines the structured output of article extraction and of
//! the plain-text projection. Both serialize to JSON, so an article can be
//! stored and projected to paragraphs later.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::node::{Node, NodeIndex};

/// Outcome of an extraction.
///
/// A page without an article is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// The page holds an article.
    Article(Box<SimpleArticle>),
    /// No block of the page is dense enough in prose to be an article.
    NotAnArticle,
}

impl Extraction {
    #[must_use]
    pub fn is_article(&self) -> bool {
        matches!(self, Extraction::Article(_))
    }

    #[must_use]
    pub fn article(&self) -> Option<&SimpleArticle> {
        match self {
            Extraction::Article(article) => Some(article),
            Extraction::NotAnArticle => None,
        }
    }

    #[must_use]
    pub fn into_article(self) -> Option<SimpleArticle> {
        match self {
            Extraction::Article(article) => Some(*article),
            Extraction::NotAnArticle => None,
        }
    }
}

/// A simplified article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleArticle {
    /// Article title, if one was found.
    pub title: Option<String>,

    /// Author line, if one was found.
    pub byline: Option<String>,

    /// Canonical HTML of the article.
    pub content: String,

    /// Canonical tree of the article, annotated as requested.
    pub plain_content: Node,

    /// Paragraph projection, present only when requested.
    pub plain_text: Option<Vec<Paragraph>>,

    /// Non-fatal issues met during extraction, such as text that could not
    /// be normalized cleanly.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl SimpleArticle {
    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load an article persisted with [`SimpleArticle::to_json`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One paragraph of plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,

    /// Index of the paragraph's element, when the article was indexed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_index: Option<NodeIndex>,
}

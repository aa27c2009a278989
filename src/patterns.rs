//! Compiled regex patterns and default pattern sources.
//!
//! Fixed patterns are compiled once using `LazyLock`. The class/id patterns
//! used for scoring are only *sources* here: they are defaults of
//! [`crate::scorer::ScoringConfig`] and get compiled per table, so callers
//! can replace them.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Text Cleaning Patterns
// =============================================================================

/// Matches runs of whitespace for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex")
});

/// Matches a sentence end inside or at the end of a run.
pub static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.( |$)").expect("SENTENCE_END regex")
});

// =============================================================================
// Metadata Patterns
// =============================================================================

/// Separators between an article title and the site name (`Title | Site`).
pub static TITLE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r" [|\-–—\\/>»] ").expect("TITLE_SEPARATOR regex")
});

/// Separators that imply a breadcrumb-like hierarchy rather than a suffix.
pub static TITLE_HIERARCHY_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r" [\\/>»] ").expect("TITLE_HIERARCHY_SEPARATOR regex")
});

/// Class/id names of byline containers.
pub static BYLINE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)byline|author|dateline|writtenby|p-author").expect("BYLINE_CLASS regex")
});

/// Schema.org types describing an article, for JSON-LD metadata.
pub static JSON_LD_ARTICLE_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(Article|AdvertiserContentArticle|NewsArticle|AnalysisNewsArticle|AskPublicNewsArticle|BackgroundNewsArticle|BlogPosting|DiscussionForumPosting|LiveBlogPosting|OpinionNewsArticle|ReportageNewsArticle|ReviewNewsArticle|Report|SatiricalArticle|ScholarlyArticle|MedicalScholarlyArticle|SocialMediaPosting|TechArticle)$",
    )
    .expect("JSON_LD_ARTICLE_TYPE regex")
});

/// Byline prefixes stripped from author text (`By Jane Doe`).
pub static BYLINE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(written\s+)?by\s*:?\s+").expect("BYLINE_PREFIX regex")
});

// =============================================================================
// Scoring Pattern Sources
// =============================================================================

/// Class/id tokens that suggest article content.
pub const POSITIVE_CLASS_SOURCE: &str =
    r"(?i)article|body|content|entry|hentry|h-entry|main|page|pagination|post|text|blog|story";

/// Class/id tokens that suggest boilerplate.
pub const NEGATIVE_CLASS_SOURCE: &str = r"(?i)-ad-|hidden|^hid$| hid$| hid |^hid |banner|combx|comment|com-|contact|footer|gdpr|masthead|media|meta|outbrain|promo|related|scroll|share|shoutbox|sidebar|skyscraper|sponsor|shopping|tags|widget";

/// Class/id tokens of elements that are very unlikely to hold the article.
pub const UNLIKELY_CANDIDATE_SOURCE: &str = r"(?i)-ad-|ai2html|banner|breadcrumbs|combx|comment|community|cover-wrap|disqus|extra|footer|gdpr|header|legends|menu|related|remark|replies|rss|shoutbox|sidebar|skyscraper|social|sponsor|supplemental|ad-break|agegate|pagination|pager|popup|yom-remote";

/// Class/id tokens that rescue an otherwise unlikely element.
pub const MAYBE_CANDIDATE_SOURCE: &str = r"(?i)and|article|body|column|content|main|mathjax|shadow";

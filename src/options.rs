//! Configuration options for article extraction.
//!
//! The `Options` struct controls which annotations are attached, whether the
//! candidate scorer runs at all, and the scoring tables it uses.

use crate::scorer::ScoringConfig;

/// Default for [`Options::max_tree_depth`].
pub const DEFAULT_MAX_TREE_DEPTH: usize = 512;

/// Configuration options for article extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use simple_article::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     content_digests: true,
///     node_indexes: true,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Attach a `content_digest` to every node of the canonical tree.
    ///
    /// Default: `false`
    pub content_digests: bool,

    /// Attach a `node_index` (position in the original document) to every
    /// element of the canonical tree.
    ///
    /// Default: `false`
    pub node_indexes: bool,

    /// Populate `SimpleArticle::plain_text` with the paragraph projection.
    ///
    /// Default: `false`
    pub plain_text: bool,

    /// Run the candidate scorer to locate the article.
    ///
    /// When disabled the whole `<body>` is canonicalized, which is what you
    /// want for markup that is already just the article.
    ///
    /// Default: `true`
    pub use_scoring: bool,

    /// Remove navigation, sidebars, footers and similar elements (by tag,
    /// ARIA role and class/id) before scoring.
    ///
    /// If nothing viable is left, scoring is retried without this step.
    ///
    /// Default: `true`
    pub strip_unlikelys: bool,

    /// Source attributes kept on canonical elements. Everything else is dropped.
    ///
    /// Default: empty
    pub preserve_attributes: Vec<String>,

    /// Maximum nesting depth accepted in an input tree.
    ///
    /// Deeper trees are rejected as malformed input.
    ///
    /// Default: `512`
    pub max_tree_depth: usize,

    /// Locate the article with the Readability backend instead of the
    /// built-in scorer.
    ///
    /// Requires the `readability` feature; ignored (with a warning log)
    /// without it.
    ///
    /// Default: `false`
    pub use_readability: bool,

    /// Weight tables and thresholds for the candidate scorer.
    pub scoring: ScoringConfig,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            content_digests: false,
            node_indexes: false,
            plain_text: false,
            use_scoring: true,
            strip_unlikelys: true,
            preserve_attributes: Vec::new(),
            max_tree_depth: DEFAULT_MAX_TREE_DEPTH,
            use_readability: false,
            scoring: ScoringConfig::default(),
        }
    }
}

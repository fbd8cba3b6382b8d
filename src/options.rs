//! Configuration for the reading-view pipeline.
//!
//! The heuristic thresholds are fixed constants; they are not meant to be
//! tuned at runtime. `Options` only carries the knobs that change what the
//! surrounding reader shows: navigation vocabulary, the single-article
//! shortcut, and the scaffolding captions.

/// Anchor-text share of a container above which it is treated as link clutter.
pub const ADS_LINK_DENSITY_THRESHOLD: f64 = 0.7;

/// Share of the whole document above which a container is never ads-pruned.
pub const MAJORITY_CONTENT_FRACTION: f64 = 0.8;

/// Text-to-markup ratio below which the content pruner may remove a container.
pub const CONTENT_RATIO_THRESHOLD: f64 = 0.5;

/// Document share paired with [`CONTENT_RATIO_THRESHOLD`] in every configured pass.
pub const CONTENT_PRUNE_PCTG: f64 = 0.0;

/// Child/parent size ratio above which a same-tag wrapper is collapsed.
pub const COLLAPSE_THRESHOLD: f64 = 0.99999;

/// Number of parent-collapse rounds; each round removes one wrapper level.
pub const COLLAPSE_ITERATIONS: usize = 5;

/// Minimum size per content-pruner pass (broad, narrow, broad sweep).
pub const PRUNE_MIN_SIZES: [usize; 3] = [0, 5, 0];

/// Minimum collapsed text length for an anchor to enter the "more links" set.
pub const MORE_LINK_MIN_TEXT_LEN: usize = 20;

/// Id prefix reserved for scaffolding created by the pipeline itself.
pub const RESERVED_ID_PREFIX: &str = "tranquility";

/// Attribute carrying the pre-order index stamped by the tree indexer.
pub const INDEX_ATTR: &str = "data-dfs-index";

/// Captions for the reading-view menu buttons.
#[derive(Debug, Clone)]
pub struct Labels {
    /// "More links" button.
    pub more_links: String,
    /// "Read later" button.
    pub read_later: String,
    /// "Offline links" button.
    pub offline_links: String,
    /// "View notes" button.
    pub view_notes: String,
    /// Tooltip of the link back to the original page.
    pub original_link: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            more_links: "More Links".to_string(),
            read_later: "Read Later".to_string(),
            offline_links: "Offline Links".to_string(),
            view_notes: "View Notes".to_string(),
            original_link: "Link to the original webpage".to_string(),
        }
    }
}

/// Configuration options for the reading-view pipeline.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use tranquil_reader::Options;
///
/// let options = Options {
///     single_article_shortcut: false,
///     ..Options::default()
/// };
/// assert!(options.build_reading_view);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Navigation words (uppercase) that mark pagination anchors.
    ///
    /// Anchor text is stripped of all whitespace and uppercased before the
    /// comparison, so multi-word captions are listed without spaces.
    ///
    /// Default: NEXT, PREV, PREVIOUS, NEXTPAGE, PREVIOUSPAGE, OLDER, NEWER, ...
    pub navigation_words: Vec<String>,

    /// Replace the body with the document's only `<article>` when there is
    /// exactly one.
    ///
    /// Default: `true`
    pub single_article_shortcut: bool,

    /// Wrap the pruned content in the reading-view scaffolding.
    ///
    /// When `false` the pruned document is returned as-is and the more-links
    /// filter runs against the pruned body.
    ///
    /// Default: `true`
    pub build_reading_view: bool,

    /// Button captions used by the scaffolding.
    pub labels: Labels,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            navigation_words: [
                "NEXT",
                "PREV",
                "PREVIOUS",
                "NEXTPAGE",
                "PREVIOUSPAGE",
                "PREVPAGE",
                "OLDER",
                "NEWER",
                "OLDERPOSTS",
                "NEWERPOSTS",
                "FIRST",
                "LAST",
                "NEXT»",
                "«PREV",
                "«PREVIOUS",
                "»",
                "«",
                "›",
                "‹",
            ]
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
            single_article_shortcut: true,
            build_reading_view: true,
            labels: Labels::default(),
        }
    }
}

impl Options {
    /// Check whether whitespace-stripped anchor text is a navigation word.
    #[must_use]
    pub fn is_navigation_word(&self, compact_text: &str) -> bool {
        let upper = compact_text.to_uppercase();
        self.navigation_words.iter().any(|w| *w == upper)
    }
}

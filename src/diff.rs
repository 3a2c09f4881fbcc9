//! Diff entry point
//!
//! ```text
//! before, after
//!     |  identical? ──────────────> before
//!     v
//! tokenize ──> calculate_operations ──> render ──> html
//! ```
//!
//! [`HtmlDiff`] bundles a [`Tokenizer`] and a [`RenderConfig`]; the free
//! [`diff`] function runs it with defaults and an optional class name.

use compact_str::CompactString;

use crate::algo::{OperationStats, calculate_operations};
use crate::render::RenderConfig;
use crate::tokenizer::Tokenizer;

// =============================================================================
// DiffOutput
// =============================================================================

/// Rendered diff plus token statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct DiffOutput {
    /// Combined HTML with `<ins>`/`<del>` markers
    pub html: String,
    /// Token counts per action. Zero when the inputs were identical, since
    /// the fast path skips tokenization.
    pub stats: OperationStats,
}

impl DiffOutput {
    /// Check if any content was inserted or deleted
    pub fn has_changes(&self) -> bool {
        !self.stats.is_empty()
    }
}

// =============================================================================
// HtmlDiff
// =============================================================================

/// Configured HTML differ.
///
/// ```
/// use tola_htmldiff::HtmlDiff;
///
/// let differ = HtmlDiff::new().with_class("diff");
/// let html = differ.diff("<p>a b c</p>", "<p>a c</p>");
/// assert_eq!(html, "<p>a <del class=\"diff\">b </del>c</p>");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlDiff {
    tokenizer: Tokenizer,
    render: RenderConfig,
}

impl HtmlDiff {
    /// Differ with default atomic elements and `<ins>`/`<del>` markers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom tokenizer (e.g. a different atomic element set).
    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Use a custom render configuration.
    pub fn with_render_config(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }

    /// Set the class attribute value for markers.
    pub fn with_class(mut self, class_name: impl Into<CompactString>) -> Self {
        self.render = self.render.with_class(class_name);
        self
    }

    /// The tokenizer in use
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// The render configuration in use
    pub fn render_config(&self) -> &RenderConfig {
        &self.render
    }

    /// Diff two HTML strings.
    pub fn diff(&self, before: &str, after: &str) -> String {
        self.diff_with_stats(before, after).html
    }

    /// Diff two HTML strings, also reporting token statistics.
    pub fn diff_with_stats(&self, before: &str, after: &str) -> DiffOutput {
        if before == after {
            return DiffOutput {
                html: before.to_owned(),
                stats: OperationStats::default(),
            };
        }

        let before_tokens = self.tokenizer.tokenize(before);
        let after_tokens = self.tokenizer.tokenize(after);
        let ops = calculate_operations(&before_tokens, &after_tokens);
        let stats = OperationStats::from_operations(&ops);
        let html = self.render.render(&before_tokens, &after_tokens, &ops);

        tracing::debug!(
            before_tokens = before_tokens.len(),
            after_tokens = after_tokens.len(),
            operations = ops.len(),
            kept = stats.kept,
            inserted = stats.inserted,
            deleted = stats.deleted,
            "html diff computed"
        );

        DiffOutput { html, stats }
    }
}

/// Diff two HTML strings with `<ins>`/`<del>` markers.
///
/// `class_name`, when given, becomes the `class` attribute of every marker.
/// Identical inputs are returned unchanged without tokenizing.
///
/// ```
/// let html = tola_htmldiff::diff(
///     "<p>this is some text</p>",
///     "<p>this is some more text</p>",
///     None,
/// );
/// assert_eq!(html, "<p>this is some <ins>more </ins>text</p>");
/// ```
pub fn diff(before: &str, after: &str, class_name: Option<&str>) -> String {
    let differ = match class_name {
        Some(class_name) => HtmlDiff::new().with_class(class_name),
        None => HtmlDiff::new(),
    };
    differ.diff(before, after)
}

// =============================================================================
// Tests
// =============================================================================

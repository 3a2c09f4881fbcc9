//! tola-htmldiff - Token-level visual diff for HTML
//!
//! Compares a "before" and an "after" HTML string and returns one combined
//! document: removed content wrapped in `<del>`, added content wrapped in
//! `<ins>`, unchanged markup left as it was.
//!
//! ## Pipeline
//!
//! ```text
//! &str ──tokenize──> [Token] ──find_matching_blocks──> [Match]
//!                                                        │
//!        String <──render_operations── [Operation] <─────┘ calculate_operations
//! ```
//!
//! Everything works on a flat token stream. Tags are compared by name only
//! (`<p>` equals `<p class="x">`), whitespace runs compare equal regardless of
//! length, and atomic elements (`svg`, `math`, `script`, `iframe`, `object`)
//! are single opaque tokens that are either kept or replaced whole.
//!
//! ## Modules
//! - `token`: Token type and comparison keys
//! - `tokenizer`: HTML tokenizer
//! - `algo`: Segments, match search, alignment, edit operations
//! - `render`: Tag-aware rendering of operations
//! - `diff`: Entry point and `HtmlDiff` facade
//! - `error`: Error types
//!
//! ## Usage
//!
//! ```
//! use tola_htmldiff::diff;
//!
//! let html = diff("<p>a b c</p>", "<p>a c</p>", None);
//! assert_eq!(html, "<p>a <del>b </del>c</p>");
//! ```

// =============================================================================
// Modules
// =============================================================================

/// Token type and comparison keys
pub mod token;

/// HTML tokenizer
pub mod tokenizer;

/// Algorithms: segments, matching, alignment, operations
pub mod algo;

/// Operation rendering
pub mod render;

/// Diff entry point
pub mod diff;

/// Error types
pub mod error;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Tokens
pub use token::{key_of, Token, TokenKind, DEFAULT_ATOMIC_TAGS};
pub use tokenizer::{tokenize, Tokenizer};

// Algorithms
pub use algo::{
    calculate_operations, find_matching_blocks, try_calculate_operations, Action, Match,
    Operation, OperationStats,
};

// Rendering
pub use render::{render_operations, RenderConfig};

// Entry point
pub use diff::{diff, DiffOutput, HtmlDiff};

// Error types
pub use error::{DiffError, DiffResult, Side};

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(Token: Send, Sync);
    static_assertions::assert_impl_all!(HtmlDiff: Send, Sync, Clone);
    static_assertions::assert_impl_all!(DiffError: Send, Sync, std::error::Error);
    static_assertions::assert_impl_all!(Operation: Send, Sync, Copy);

    const SAMPLES: &[(&str, &str)] = &[
        ("<p>this is some text</p>", "<p>this is some more text</p>"),
        ("<p>a b c</p>", "<p>a c</p>"),
        ("<p>red</p>", "<p>blue</p>"),
        ("<h1>Title</h1>\n<p>First, para.</p>", "<h1>New title</h1>\n<p>First para!</p>\n<p>Second</p>"),
        ("<ul><li>one</li><li>two</li></ul>", "<ul><li>two</li><li>three</li></ul>"),
        ("<p>x <svg><circle r=\"1\"/></svg> y</p>", "<p>x <svg><circle r=\"2\"/></svg> y</p>"),
        ("", "<p>all new</p>"),
        ("<p>all gone</p>", ""),
        ("one two three four five", "four five one two three"),
        ("a&nbsp;b <!-- note -->c", "a b c"),
    ];

    #[test]
    fn test_scenario_insert() {
        assert_eq!(
            diff("<p>this is some text</p>", "<p>this is some more text</p>", None),
            "<p>this is some <ins>more </ins>text</p>"
        );
    }

    #[test]
    fn test_scenario_insert_with_class() {
        assert_eq!(
            diff("<p>this is some text</p>", "<p>this is some more text</p>", Some("diff-class")),
            "<p>this is some <ins class=\"diff-class\">more </ins>text</p>"
        );
    }

    #[test]
    fn test_scenario_delete() {
        assert_eq!(diff("<p>a b c</p>", "<p>a c</p>", None), "<p>a <del>b </del>c</p>");
    }

    #[test]
    fn test_scenario_replace() {
        assert_eq!(diff("<p>red</p>", "<p>blue</p>", None), "<p><del>red</del><ins>blue</ins></p>");
    }

    #[test]
    fn test_scenario_attribute_change_only() {
        let after = "<div class=\"x\">same text</div>";
        assert_eq!(diff("<div>same text</div>", after, None), after);
    }

    #[test]
    fn test_identity() {
        for (before, after) in SAMPLES {
            assert_eq!(diff(before, before, None), *before);
            assert_eq!(diff(after, after, Some("c")), *after);
        }
    }

    #[test]
    fn test_lossless_tokenization() {
        for (before, after) in SAMPLES {
            for input in [before, after] {
                let joined: String = tokenize(input).iter().map(Token::text).collect();
                assert_eq!(&joined, input);
            }
        }
    }

    #[test]
    fn test_operations_cover_both_documents() {
        for (before, after) in SAMPLES {
            let (b, a) = (tokenize(before), tokenize(after));
            let ops = calculate_operations(&b, &a);
            let (mut pos_b, mut pos_a) = (0, 0);
            for op in &ops {
                assert_eq!((op.start_in_before, op.start_in_after), (pos_b, pos_a));
                pos_b = op.end_in_before;
                pos_a = op.end_in_after;
            }
            assert_eq!((pos_b, pos_a), (b.len(), a.len()));
        }
    }

    #[test]
    fn test_matches_strictly_increasing() {
        for (before, after) in SAMPLES {
            let matches = find_matching_blocks(&tokenize(before), &tokenize(after));
            for pair in matches.windows(2) {
                assert!(pair[0].precedes(&pair[1]));
            }
        }
    }

    #[test]
    fn test_atomic_element_never_split() {
        let html = diff(
            "<p>x <svg><circle r=\"1\"/></svg> y</p>",
            "<p>x <svg><circle r=\"2\"/></svg> y</p>",
            None,
        );
        assert_eq!(
            html,
            "<p>x <del><svg><circle r=\"1\"/></svg></del><ins><svg><circle r=\"2\"/></svg></ins> y</p>"
        );
    }

    #[test]
    fn test_whitespace_only_change_vanishes() {
        // The inserted newline run is pure whitespace, so no marker is emitted.
        let html = diff("<p>a</p><p>b</p>", "<p>a</p>\n<p>b</p>", None);
        assert_eq!(html, "<p>a</p><p>b</p>");
    }

    #[test]
    fn test_structural_tags_stay_outside_markers() {
        let html = diff("<p>first</p>", "<p>first</p><p>second</p>", None);
        assert_eq!(html, "<p>first</p><p><ins>second</ins></p>");
    }

    #[test]
    fn test_whole_document_replaced() {
        assert_eq!(diff("", "<p>all new</p>", None), "<p><ins>all new</ins></p>");
        assert_eq!(diff("<p>all gone</p>", "", None), "<p><del>all gone</del></p>");
    }
}

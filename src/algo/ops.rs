//! Edit operations derived from an alignment
//!
//! Walks the ordered matches and classifies the gap in front of each one:
//!
//! | before gap | after gap | operation |
//! |------------|-----------|-----------|
//! | empty      | empty     | none      |
//! | empty      | non-empty | `Insert`  |
//! | non-empty  | empty     | `Delete`  |
//! | non-empty  | non-empty | `Replace` |
//!
//! then emits an `Equal` for the match itself. A zero-length sentinel at the
//! end of both sequences closes the final gap.
//!
//! A post-pass folds a `Replace` into a directly preceding `Replace`, and
//! folds a one-token whitespace `Equal` into a preceding `Replace`, so
//! "replace, keep a space, replace" renders as one replacement.

use std::fmt;
use std::ops::Range;

use crate::error::{DiffError, DiffResult, Side};
use crate::token::Token;

use super::align::find_matching_blocks;
use super::matcher::Match;

// =============================================================================
// Public Types
// =============================================================================

/// Kind of edit an operation describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Tokens unchanged between documents
    Equal,
    /// Tokens present only in the after document
    Insert,
    /// Tokens present only in the before document
    Delete,
    /// Before tokens replaced by after tokens
    Replace,
}

impl Action {
    /// Lowercase name, also the `Display` form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Insert => "insert",
            Self::Delete => "delete",
            Self::Replace => "replace",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified edit span.
///
/// Ranges are half-open token index ranges. An `Insert` has an empty before
/// range and a `Delete` an empty after range; both still carry the position
/// where the empty range sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub action: Action,
    pub start_in_before: usize,
    pub end_in_before: usize,
    pub start_in_after: usize,
    pub end_in_after: usize,
}

impl Operation {
    /// Before token range covered by this operation
    #[inline]
    pub fn before_range(&self) -> Range<usize> {
        self.start_in_before..self.end_in_before
    }

    /// After token range covered by this operation
    #[inline]
    pub fn after_range(&self) -> Range<usize> {
        self.start_in_after..self.end_in_after
    }

    fn equal(m: &Match) -> Self {
        Self {
            action: Action::Equal,
            start_in_before: m.start_in_before,
            end_in_before: m.end_in_before(),
            start_in_after: m.start_in_after,
            end_in_after: m.end_in_after(),
        }
    }

    /// Gap operation from the current positions up to `m`, if there is a gap.
    fn gap(position_in_before: usize, position_in_after: usize, m: &Match) -> Option<Self> {
        let before_gap = position_in_before != m.start_in_before;
        let after_gap = position_in_after != m.start_in_after;
        let action = match (before_gap, after_gap) {
            (false, false) => return None,
            (false, true) => Action::Insert,
            (true, false) => Action::Delete,
            (true, true) => Action::Replace,
        };
        Some(Self {
            action,
            start_in_before: position_in_before,
            end_in_before: m.start_in_before,
            start_in_after: position_in_after,
            end_in_after: m.start_in_after,
        })
    }
}

/// Token counts per action.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct OperationStats {
    /// Tokens covered by `Equal` operations (after side)
    pub kept: usize,
    /// After tokens inside `Insert`/`Replace` operations
    pub inserted: usize,
    /// Before tokens inside `Delete`/`Replace` operations
    pub deleted: usize,
}

impl OperationStats {
    /// Tally an operation list.
    pub fn from_operations(ops: &[Operation]) -> Self {
        ops.iter().fold(Self::default(), |mut stats, op| {
            match op.action {
                Action::Equal => stats.kept += op.after_range().len(),
                Action::Insert => stats.inserted += op.after_range().len(),
                Action::Delete => stats.deleted += op.before_range().len(),
                Action::Replace => {
                    stats.inserted += op.after_range().len();
                    stats.deleted += op.before_range().len();
                }
            }
            stats
        })
    }

    /// Total number of changed tokens
    pub fn edit_count(&self) -> usize {
        self.inserted + self.deleted
    }

    /// Check if there are no changes
    pub fn is_empty(&self) -> bool {
        self.edit_count() == 0
    }
}

// =============================================================================
// Main API
// =============================================================================

/// Compute the edit operations turning `before` into `after`.
///
/// The result partitions `0..before.len()` and `0..after.len()` in order.
pub fn calculate_operations(before: &[Token], after: &[Token]) -> Vec<Operation> {
    let mut matches = find_matching_blocks(before, after);
    matches.push(Match::new(before.len(), after.len(), 0));

    let mut ops = Vec::with_capacity(matches.len() * 2);
    let mut position_in_before = 0;
    let mut position_in_after = 0;

    for m in &matches {
        if let Some(gap) = Operation::gap(position_in_before, position_in_after, m) {
            ops.push(gap);
        }
        if !m.is_empty() {
            ops.push(Operation::equal(m));
        }
        position_in_before = m.end_in_before();
        position_in_after = m.end_in_after();
    }

    merge_replacements(before, ops)
}

/// [`calculate_operations`] for callers whose token sequences may be absent.
///
/// # Errors
///
/// [`DiffError::MissingTokens`] when either side is `None`. An empty
/// sequence is valid input; an absent one is not.
pub fn try_calculate_operations(
    before: Option<&[Token]>,
    after: Option<&[Token]>,
) -> DiffResult<Vec<Operation>> {
    let before = before.ok_or_else(|| DiffError::missing(Side::Before))?;
    let after = after.ok_or_else(|| DiffError::missing(Side::After))?;
    Ok(calculate_operations(before, after))
}

fn merge_replacements(before: &[Token], ops: Vec<Operation>) -> Vec<Operation> {
    let mut merged: Vec<Operation> = Vec::with_capacity(ops.len());

    for op in ops {
        if let Some(last) = merged.last_mut() {
            let absorbs = op.action == Action::Replace || is_single_whitespace(before, &op);
            if last.action == Action::Replace && absorbs {
                last.end_in_before = op.end_in_before;
                last.end_in_after = op.end_in_after;
                continue;
            }
        }
        merged.push(op);
    }

    merged
}

/// An `Equal` spanning exactly one whitespace token.
fn is_single_whitespace(before: &[Token], op: &Operation) -> bool {
    op.action == Action::Equal
        && op.before_range().len() == 1
        && before[op.start_in_before].is_whitespace()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn ops(before: &str, after: &str) -> Vec<Operation> {
        calculate_operations(&tokenize(before), &tokenize(after))
    }

    fn actions(ops: &[Operation]) -> Vec<Action> {
        ops.iter().map(|op| op.action).collect()
    }

    fn assert_partition(ops: &[Operation], before_len: usize, after_len: usize) {
        let (mut b, mut a) = (0, 0);
        for op in ops {
            assert_eq!(op.start_in_before, b, "gap in before at {op:?}");
            assert_eq!(op.start_in_after, a, "gap in after at {op:?}");
            match op.action {
                Action::Insert => assert!(op.before_range().is_empty()),
                Action::Delete => assert!(op.after_range().is_empty()),
                Action::Equal => assert_eq!(op.before_range().len(), op.after_range().len()),
                Action::Replace => {}
            }
            b = op.end_in_before;
            a = op.end_in_after;
        }
        assert_eq!((b, a), (before_len, after_len));
    }

    #[test]
    fn test_empty_sequences() {
        assert!(ops("", "").is_empty());
    }

    #[test]
    fn test_equal_only() {
        let result = ops("<p>same</p>", "<p>same</p>");
        assert_eq!(actions(&result), [Action::Equal]);
        assert_eq!(result[0].before_range(), 0..3);
    }

    #[test]
    fn test_insert() {
        let result = ops("<p>this is some text</p>", "<p>this is some more text</p>");
        assert_eq!(actions(&result), [Action::Equal, Action::Insert, Action::Equal]);
        assert_eq!(result[1].after_range(), 7..9);
        assert_eq!(result[1].before_range(), 7..7);
    }

    #[test]
    fn test_delete() {
        let result = ops("<p>a b c</p>", "<p>a c</p>");
        assert_eq!(actions(&result), [Action::Equal, Action::Delete, Action::Equal]);
        assert_eq!(result[1].before_range(), 3..5);
        assert_eq!(result[1].after_range(), 3..3);
    }

    #[test]
    fn test_replace() {
        let result = ops("<p>red</p>", "<p>blue</p>");
        assert_eq!(actions(&result), [Action::Equal, Action::Replace, Action::Equal]);
        assert_eq!(result[1].before_range(), 1..2);
        assert_eq!(result[1].after_range(), 1..2);
    }

    #[test]
    fn test_everything_inserted_or_deleted() {
        assert_eq!(actions(&ops("", "new words")), [Action::Insert]);
        assert_eq!(actions(&ops("old words", "")), [Action::Delete]);
        assert_eq!(actions(&ops("red", "blue")), [Action::Replace]);
    }

    #[test]
    fn test_whitespace_between_replacements_is_merged() {
        let before = [Token::new("a"), Token::new(" "), Token::new("b")];
        let ops = vec![
            Operation { action: Action::Replace, start_in_before: 0, end_in_before: 1, start_in_after: 0, end_in_after: 1 },
            Operation { action: Action::Equal, start_in_before: 1, end_in_before: 2, start_in_after: 1, end_in_after: 2 },
            Operation { action: Action::Replace, start_in_before: 2, end_in_before: 3, start_in_after: 2, end_in_after: 3 },
        ];
        let merged = merge_replacements(&before, ops);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].action, Action::Replace);
        assert_eq!(merged[0].before_range(), 0..3);
        assert_eq!(merged[0].after_range(), 0..3);
    }

    #[test]
    fn test_word_equal_is_not_merged() {
        let before = [Token::new("a"), Token::new("b"), Token::new("c")];
        let ops = vec![
            Operation { action: Action::Replace, start_in_before: 0, end_in_before: 1, start_in_after: 0, end_in_after: 1 },
            Operation { action: Action::Equal, start_in_before: 1, end_in_before: 2, start_in_after: 1, end_in_after: 2 },
            Operation { action: Action::Replace, start_in_before: 2, end_in_before: 3, start_in_after: 2, end_in_after: 3 },
        ];
        let merged = merge_replacements(&before, ops);
        assert_eq!(actions(&merged), [Action::Replace, Action::Equal, Action::Replace]);
    }

    #[test]
    fn test_operations_partition_tokens() {
        let cases = [
            ("<p>this is some text</p>", "<p>this is some more text</p>"),
            ("the cat sat on the mat", "the dog sat on a mat"),
            ("<ul><li>a</li><li>b</li></ul>", "<ul><li>b</li><li>a</li><li>c</li></ul>"),
            ("one two three four", "three four one two"),
            ("a a a a b", "b a a a a"),
            ("", "<p>new</p>"),
            ("<p>gone</p>", ""),
        ];
        for (before, after) in cases {
            let (b, a) = (tokenize(before), tokenize(after));
            assert_partition(&calculate_operations(&b, &a), b.len(), a.len());
        }
    }

    #[test]
    fn test_try_calculate_operations() {
        let tokens = tokenize("x");
        assert!(matches!(
            try_calculate_operations(None, Some(tokens.as_slice())),
            Err(DiffError::MissingTokens { side: Side::Before })
        ));
        assert!(matches!(
            try_calculate_operations(Some(tokens.as_slice()), None),
            Err(DiffError::MissingTokens { side: Side::After })
        ));
        let ops = try_calculate_operations(Some(&[][..]), Some(tokens.as_slice())).unwrap();
        assert_eq!(actions(&ops), [Action::Insert]);
    }

    #[test]
    fn test_stats() {
        let stats = OperationStats::from_operations(&ops("<p>red</p>", "<p>blue sky</p>"));
        assert_eq!(stats.kept, 2);
        assert_eq!(stats.deleted, 1);
        assert_eq!(stats.inserted, 3);
        assert_eq!(stats.edit_count(), 4);
        assert!(OperationStats::from_operations(&ops("a", "a")).is_empty());
    }

    #[test]
    fn test_action_names() {
        assert_eq!(Action::Equal.as_str(), "equal");
        assert_eq!(Action::Replace.as_str(), "replace");
        assert_eq!(Action::Insert.to_string(), "insert");
    }
}

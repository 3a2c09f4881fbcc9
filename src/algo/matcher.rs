//! Longest common run search within one segment
//!
//! # Algorithm
//!
//! Scan `before` left to right. For each token, every position in `after`
//! holding the same key is a candidate start, and each candidate is extended
//! forward while keys keep matching. The longest candidate wins; on a tie the
//! first one found (lowest before index, then lowest after index) stays.
//!
//! Whitespace is too common to be a useful anchor, so a whitespace token never
//! starts a candidate. When the token right after it does, the candidate may
//! *look behind* and absorb one whitespace token on both sides.
//!
//! # Pruning
//!
//! - Stop scanning once the best match is longer than what is left of `before`.
//! - Before extending a candidate, compare the keys `best_len` tokens ahead: if
//!   they differ the candidate cannot beat the current best.
//!
//! Neither shortcut changes which match is returned.

use super::segment::Segment;

// =============================================================================
// Match
// =============================================================================

/// A contiguous run of key-equal tokens shared by both documents.
///
/// Positions are global token indices. Ends are exclusive, so the closing
/// sentinel `(before_len, after_len, 0)` is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Match {
    /// First matched index in the before sequence
    pub start_in_before: usize,
    /// First matched index in the after sequence
    pub start_in_after: usize,
    /// Number of matched tokens
    pub length: usize,
}

impl Match {
    /// Create a match.
    #[inline]
    pub const fn new(start_in_before: usize, start_in_after: usize, length: usize) -> Self {
        Self {
            start_in_before,
            start_in_after,
            length,
        }
    }

    /// One past the last matched before index.
    #[inline]
    pub const fn end_in_before(&self) -> usize {
        self.start_in_before + self.length
    }

    /// One past the last matched after index.
    #[inline]
    pub const fn end_in_after(&self) -> usize {
        self.start_in_after + self.length
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Whether `self` ends before `other` starts in both sequences.
    #[inline]
    pub const fn precedes(&self, other: &Match) -> bool {
        self.end_in_before() <= other.start_in_before && self.end_in_after() <= other.start_in_after
    }

    /// Shift a segment-local match into global coordinates.
    #[inline]
    const fn offset(self, before_offset: usize, after_offset: usize) -> Self {
        Self::new(
            self.start_in_before + before_offset,
            self.start_in_after + after_offset,
            self.length,
        )
    }
}

// =============================================================================
// Search
// =============================================================================

/// Find the best match in `segment`, in global coordinates.
pub fn find_best_match(segment: &Segment<'_>) -> Option<Match> {
    let before = segment.before;
    let mut best: Option<Match> = None;
    let mut last_space: Option<usize> = None;

    for (index, token) in before.iter().enumerate() {
        if let Some(best) = &best {
            if before.len() - index < best.length {
                break;
            }
        }

        if token.is_whitespace() {
            last_space = Some(index);
            continue;
        }

        let look_behind = index > 0 && last_space == Some(index - 1);

        let Some(positions) = segment.after_positions(token.key()) else {
            continue;
        };

        for &after_index in positions {
            let best_len = best.map_or(0, |m| m.length);
            if let Some(candidate) = extend_match(segment, index, after_index, best_len, look_behind) {
                if candidate.length > best_len {
                    best = Some(candidate);
                }
            }
        }
    }

    best.map(|m| m.offset(segment.before_offset, segment.after_offset))
}

/// Grow a candidate starting at local `(before_start, after_start)`.
///
/// Returns `None` when the candidate provably cannot exceed `min_len`.
fn extend_match(
    segment: &Segment<'_>,
    before_start: usize,
    after_start: usize,
    min_len: usize,
    look_behind: bool,
) -> Option<Match> {
    let (before, after) = (segment.before, segment.after);

    let min_before = before_start + min_len;
    let min_after = after_start + min_len;
    if min_before >= before.len() || min_after >= after.len() {
        return None;
    }
    if min_len > 0 && before[min_before].key() != after[min_after].key() {
        return None;
    }

    let mut length = 1 + before[before_start + 1..]
        .iter()
        .zip(&after[after_start + 1..])
        .take_while(|(b, a)| b.key() == a.key())
        .count();

    let (mut before_start, mut after_start) = (before_start, after_start);
    if look_behind
        && before_start > 0
        && after_start > 0
        && before[before_start - 1].is_whitespace()
        && after[after_start - 1].is_whitespace()
    {
        before_start -= 1;
        after_start -= 1;
        length += 1;
    }

    Some(Match::new(before_start, after_start, length))
}

// =============================================================================
// Tests
// =============================================================================

//! Divide-and-conquer alignment of two token sequences
//!
//! # Algorithm
//!
//! 1. Seed a worklist with the segment covering both documents
//! 2. Pop a segment and find its best match
//! 3. Push the unmatched prefix and suffix as new segments when both sides
//!    of the piece are non-empty (a one-sided piece is a pure insert or
//!    delete, recovered later from the gaps between matches)
//! 4. File the match in the [`MatchStore`]
//!
//! The worklist is an explicit stack, so document size never translates
//! into call depth. Processing order differs from output order; the store
//! keeps matches sorted as they arrive.

use crate::token::Token;

use super::matcher::{Match, find_best_match};
use super::segment::Segment;

// =============================================================================
// MatchStore
// =============================================================================

/// Matches kept in left-to-right order in both sequences at once.
///
/// A match is accepted only where it lies strictly after its predecessor
/// and strictly before its successor in *both* coordinate spaces. A match
/// whose position relative to a stored one is ambiguous (it criss-crosses
/// it) is dropped and the stored one stays.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MatchStore {
    matches: Vec<Match>,
}

impl MatchStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `m` at its ordered position.
    ///
    /// Returns `false` when `m` was dropped for criss-crossing a stored match.
    pub fn insert(&mut self, m: Match) -> bool {
        // Stored matches strictly increase in both coordinates, so the ones
        // preceding `m` form a prefix.
        let index = self.matches.partition_point(|stored| stored.precedes(&m));

        if let Some(next) = self.matches.get(index) {
            if !m.precedes(next) {
                return false;
            }
        }

        self.matches.insert(index, m);
        true
    }

    /// Number of stored matches
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Check if no match is stored
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Stored matches in order
    pub fn iter(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter()
    }

    /// Consume the store, yielding matches in order
    pub fn into_vec(self) -> Vec<Match> {
        self.matches
    }
}

// =============================================================================
// Alignment
// =============================================================================

/// Find the ordered, non-overlapping matching blocks of two token sequences.
///
/// Matches are in global coordinates and strictly increasing in both
/// sequences. No closing sentinel is appended.
pub fn find_matching_blocks(before: &[Token], after: &[Token]) -> Vec<Match> {
    let mut store = MatchStore::new();
    let mut segments = vec![Segment::whole(before, after)];

    while let Some(segment) = segments.pop() {
        if segment.is_empty() {
            continue;
        }
        let Some(found) = find_best_match(&segment) else {
            continue;
        };
        if found.is_empty() {
            continue;
        }

        let (seg_before, seg_after) = (segment.before, segment.after);
        let local_before = found.start_in_before - segment.before_offset;
        let local_after = found.start_in_after - segment.after_offset;

        if local_before > 0 && local_after > 0 {
            segments.push(Segment::new(
                &seg_before[..local_before],
                &seg_after[..local_after],
                segment.before_offset,
                segment.after_offset,
            ));
        }

        let end_before = local_before + found.length;
        let end_after = local_after + found.length;
        if end_before < seg_before.len() && end_after < seg_after.len() {
            segments.push(Segment::new(
                &seg_before[end_before..],
                &seg_after[end_after..],
                segment.before_offset + end_before,
                segment.after_offset + end_after,
            ));
        }

        if !store.insert(found) {
            tracing::trace!(
                "dropped criss-crossing match: before={}..{} after={}..{}",
                found.start_in_before,
                found.end_in_before(),
                found.start_in_after,
                found.end_in_after()
            );
        }
    }

    store.into_vec()
}

// =============================================================================
// Tests
// =============================================================================

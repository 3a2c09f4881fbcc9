//! Segments: paired sub-ranges of the two token sequences
//!
//! The aligner never searches the whole document twice. Every match it finds
//! splits the current segment, and only the unmatched pieces on either side
//! are searched again. A segment borrows its tokens from the global
//! sequences and remembers where it starts in each of them.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::token::Token;

/// Local positions of one key, in ascending order.
pub type Positions = SmallVec<[usize; 4]>;

/// Key -> every local index where a token with that key occurs.
pub type KeyMap<'a> = FxHashMap<&'a str, Positions>;

/// Build the key map for a token slice in one pass.
///
/// Duplicate keys accumulate positions in insertion order.
pub fn build_map(tokens: &[Token]) -> KeyMap<'_> {
    let mut map = KeyMap::default();
    for (index, token) in tokens.iter().enumerate() {
        map.entry(token.key()).or_default().push(index);
    }
    map
}

/// A bounded view of both token sequences under active consideration.
#[derive(Debug)]
pub struct Segment<'a> {
    pub before: &'a [Token],
    pub after: &'a [Token],
    pub before_map: KeyMap<'a>,
    pub after_map: KeyMap<'a>,
    /// Global index of `before[0]`
    pub before_offset: usize,
    /// Global index of `after[0]`
    pub after_offset: usize,
}

impl<'a> Segment<'a> {
    /// Create a segment and index both sides by key.
    pub fn new(
        before: &'a [Token],
        after: &'a [Token],
        before_offset: usize,
        after_offset: usize,
    ) -> Self {
        Self {
            before,
            after,
            before_map: build_map(before),
            after_map: build_map(after),
            before_offset,
            after_offset,
        }
    }

    /// Segment covering both documents entirely.
    pub fn whole(before: &'a [Token], after: &'a [Token]) -> Self {
        Self::new(before, after, 0, 0)
    }

    /// Positions in `after` whose key equals `key`.
    #[inline]
    pub fn after_positions(&self, key: &str) -> Option<&Positions> {
        self.after_map.get(key)
    }

    /// Check if either side has no tokens
    pub fn is_empty(&self) -> bool {
        self.before.is_empty() || self.after.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    #[test]
    fn test_build_map_collects_positions() {
        let tokens = tokenize("a b a");
        let map = build_map(&tokens);

        assert_eq!(map["a"].as_slice(), &[0, 4]);
        assert_eq!(map["b"].as_slice(), &[2]);
        assert_eq!(map[" "].as_slice(), &[1, 3]);
        assert!(!map.contains_key("c"));
    }

    #[test]
    fn test_build_map_uses_keys() {
        let tokens = tokenize("<p class=\"x\"><P>");
        let map = build_map(&tokens);
        assert_eq!(map["<p>"].as_slice(), &[0, 1]);
    }

    #[test]
    fn test_segment_offsets() {
        let before = tokenize("x y z");
        let after = tokenize("y z");
        let segment = Segment::new(&before[2..], &after, 2, 0);

        assert_eq!(segment.before.len(), 3);
        assert_eq!(segment.before_offset, 2);
        assert_eq!(segment.after_positions("z").map(|p| p.as_slice()), Some(&[2][..]));
        assert!(segment.after_positions("x").is_none());
        assert!(!segment.is_empty());
        assert!(Segment::whole(&before, &[]).is_empty());
    }
}

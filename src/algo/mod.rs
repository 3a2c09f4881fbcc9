//! Alignment algorithms for token sequences.
//!
//! - `segment`: paired sub-ranges of both sequences with key maps
//! - `matcher`: longest common run search within a segment
//! - `align`: divide-and-conquer alignment with an ordered match store
//! - `ops`: edit operations derived from the alignment

mod align;
mod matcher;
mod ops;
mod segment;

pub use align::{find_matching_blocks, MatchStore};
pub use matcher::{find_best_match, Match};
pub use ops::{calculate_operations, try_calculate_operations, Action, Operation, OperationStats};
pub use segment::{build_map, KeyMap, Positions, Segment};

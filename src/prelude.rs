//! Prelude module for common imports.
//!
//! ```
//! use tola_htmldiff::prelude::*;
//!
//! let html = HtmlDiff::new().diff("<p>old</p>", "<p>new</p>");
//! assert_eq!(html, "<p><del>old</del><ins>new</ins></p>");
//! ```

// Tokens
pub use crate::token::{Token, TokenKind};
pub use crate::tokenizer::{tokenize, Tokenizer};

// Algorithms
pub use crate::algo::{
    calculate_operations, find_matching_blocks, try_calculate_operations, Action, Match,
    Operation, OperationStats,
};

// Render
pub use crate::render::{render_operations, RenderConfig, DEFAULT_DELETE_TAG, DEFAULT_INSERT_TAG};

// Entry point
pub use crate::diff::{diff, DiffOutput, HtmlDiff};

// Error
pub use crate::error::{DiffError, DiffResult, Side};

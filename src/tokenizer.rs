//! HTML tokenizer
//!
//! Splits markup into a flat, lossless sequence of [`Token`]s with a single
//! left-to-right scan. Nothing is parsed into a tree and nothing is rejected:
//! stray brackets and unbalanced tags are tokenized like anything else.
//!
//! # Modes
//!
//! ```text
//!            '<'                 '>'
//!   Char ---------> Tag -------------------> Char
//!    ^  \            |  "<svg" + ' ' / '>'
//!    |   \ ws        +------------------> AtomicTag --"</svg>"--> Char
//!    |    v          |  "<!--"
//!    +- Whitespace   +------------------> HtmlComment --"-->"--> Char (no flush)
//! ```
//!
//! Invariant: concatenating the text of every emitted token reproduces the
//! input byte for byte. Comments are kept but do not end the pending token,
//! so `<!-- note -->word` is one token. Its key is `word`.

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::token::{COMMENT_CLOSE, COMMENT_OPEN, DEFAULT_ATOMIC_TAGS, Token, TokenKind, classify};

// =============================================================================
// Tokenizer
// =============================================================================

/// Configurable HTML tokenizer.
///
/// The only knob is the set of atomic elements: elements whose entire
/// subtree becomes one opaque token and is diffed as a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenizer {
    atomic_tags: SmallVec<[CompactString; 5]>,
}

impl Tokenizer {
    /// Tokenizer with the default atomic elements
    /// (`iframe`, `object`, `math`, `svg`, `script`).
    pub fn new() -> Self {
        Self::with_atomic_tags(DEFAULT_ATOMIC_TAGS.iter().copied())
    }

    /// Tokenizer with a custom set of atomic element names.
    ///
    /// Names are matched case-sensitively against the opening tag.
    pub fn with_atomic_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        Self {
            atomic_tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Atomic element names in configuration order.
    pub fn atomic_tags(&self) -> impl Iterator<Item = &str> {
        self.atomic_tags.iter().map(CompactString::as_str)
    }

    /// Split `html` into tokens.
    pub fn tokenize(&self, html: &str) -> Vec<Token> {
        let mut scanner = Scanner::new(html, &self.atomic_tags);
        for (pos, c) in html.char_indices() {
            scanner.step(pos, c);
        }
        let tokens = scanner.finish();
        tracing::trace!("tokenized {} bytes into {} tokens", html.len(), tokens.len());
        tokens
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Split `html` into tokens using the default atomic elements.
pub fn tokenize(html: &str) -> Vec<Token> {
    Tokenizer::new().tokenize(html)
}

// =============================================================================
// Scanner
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode<'t> {
    Char,
    Tag,
    /// Inside an atomic element; carries the element name.
    AtomicTag(&'t str),
    /// Inside a comment whose body starts at the given byte offset.
    HtmlComment { body: usize },
    Whitespace,
}

struct Scanner<'s, 't> {
    html: &'s str,
    atomic_tags: &'t [CompactString],
    tokens: Vec<Token>,
    /// Byte offset where the pending token starts.
    start: usize,
    mode: Mode<'t>,
}

impl<'s, 't> Scanner<'s, 't> {
    fn new(html: &'s str, atomic_tags: &'t [CompactString]) -> Self {
        Self {
            html,
            atomic_tags,
            tokens: Vec::new(),
            start: 0,
            mode: Mode::Char,
        }
    }

    /// Feed the character `c` found at byte offset `pos`.
    fn step(&mut self, pos: usize, c: char) {
        let end = pos + c.len_utf8();
        match self.mode {
            Mode::Char => self.step_char(pos, c),
            Mode::Tag => self.step_tag(pos, end, c),
            Mode::AtomicTag(name) => {
                if c == '>' && closes_atomic(&self.html[self.start..pos], name) {
                    self.emit(end, Some(TokenKind::AtomicTag));
                    self.mode = Mode::Char;
                }
            }
            Mode::HtmlComment { body } => {
                if self.html[body..end].ends_with(COMMENT_CLOSE) {
                    // The comment stays pending and joins the next token.
                    self.mode = Mode::Char;
                }
            }
            Mode::Whitespace => {
                if c == '<' {
                    self.emit(pos, None);
                    self.mode = Mode::Tag;
                } else if !c.is_whitespace() {
                    self.emit(pos, None);
                    self.mode = Mode::Char;
                    self.step_char(pos, c);
                }
            }
        }
    }

    fn step_char(&mut self, pos: usize, c: char) {
        if c == '<' {
            self.emit(pos, None);
            self.mode = Mode::Tag;
        } else if c.is_whitespace() {
            self.emit(pos, None);
            self.mode = Mode::Whitespace;
        } else if is_word_char(c) {
            // keep accumulating
        } else if c == '&' {
            self.emit(pos, None);
        } else {
            self.emit(pos + c.len_utf8(), None);
        }
    }

    fn step_tag(&mut self, pos: usize, end: usize, c: char) {
        let pending = &self.html[self.start..pos];

        // `<name` is complete once whitespace or `>` follows it.
        if c.is_whitespace() || c == '>' {
            if let Some(name) = self.opened_atomic(pending) {
                self.mode = Mode::AtomicTag(name);
                return;
            }
        }

        if pending == COMMENT_OPEN {
            self.mode = Mode::HtmlComment { body: pos };
            return;
        }

        if c == '>' {
            self.emit(end, None);
            self.mode = Mode::Char;
        }
    }

    /// Atomic element name when `pending` is exactly `<name`.
    fn opened_atomic(&self, pending: &str) -> Option<&'t str> {
        let name = pending.strip_prefix('<')?;
        self.atomic_tags
            .iter()
            .map(CompactString::as_str)
            .find(|tag| *tag == name)
    }

    /// Push the pending token ending at byte offset `end`, if it is non-empty.
    fn emit(&mut self, end: usize, kind: Option<TokenKind>) {
        if self.start < end {
            let text = &self.html[self.start..end];
            let kind = kind.unwrap_or_else(|| classify(text, self.atomic_tags));
            self.tokens.push(Token::with_kind(CompactString::from(text), kind));
        }
        self.start = end;
    }

    fn finish(mut self) -> Vec<Token> {
        let len = self.html.len();
        self.emit(len, None);
        self.tokens
    }
}

/// Letters, digits and the characters that stay inside a word.
#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '#' | '@')
}

/// Whether `pending` ends with `</name`.
#[inline]
fn closes_atomic(pending: &str, name: &str) -> bool {
    pending
        .strip_suffix(name)
        .is_some_and(|head| head.ends_with("</"))
}

// =============================================================================
// Tests
// =============================================================================

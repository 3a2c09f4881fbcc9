//! Tokens and comparison keys
//!
//! A [`Token`] pairs the exact source text of one lexical unit (tag, word,
//! whitespace run, entity, punctuation mark or atomic element) with the
//! normalized key used to compare it against tokens of the other document.
//!
//! # Keys
//!
//! | Token            | Key                                         |
//! |------------------|---------------------------------------------|
//! | `<p class="x">`  | `<p>` (name only, lowercased)               |
//! | `</P>`           | `</p>`                                      |
//! | `<br/>`          | `<br>`                                      |
//! | `<svg>..</svg>`  | whole element, whitespace collapsed         |
//! | `a \n b`, `&nbsp;` | text with whitespace runs collapsed to `" "` |
//! | `<!-- c -->word` | `word` (comments removed)                  |
//!
//! Attribute changes therefore never show up as differences, while the
//! original `text` is still there for lossless rendering.

use std::borrow::Cow;
use std::fmt;

use compact_str::CompactString;

/// Elements tokenized as a single opaque token, opening tag to closing tag.
pub const DEFAULT_ATOMIC_TAGS: &[&str] = &["iframe", "object", "math", "svg", "script"];

pub(crate) const COMMENT_OPEN: &str = "<!--";
pub(crate) const COMMENT_CLOSE: &str = "-->";

const NBSP_NAMED: &str = "&nbsp;";
const NBSP_NUMERIC: &str = "&#160;";

/// Key shared by every whitespace-only token.
pub(crate) const WHITESPACE_KEY: &str = " ";

// =============================================================================
// TokenKind
// =============================================================================

/// Lexical class of a token, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Word, entity, punctuation or anything else that is not markup
    Text,
    /// A run of whitespace characters
    Whitespace,
    /// A structural tag (`<p>`, `</div>`, a comment on its own)
    Tag,
    /// A void or self-closing tag (`<img>`, `<br/>`)
    VoidTag,
    /// A whole atomic element (`<svg>...</svg>`)
    AtomicTag,
}

impl TokenKind {
    /// Whether tokens of this kind may sit inside an `<ins>`/`<del>` marker.
    ///
    /// Only plain structural tags are excluded: wrapping them would
    /// produce markers that straddle element boundaries.
    #[inline]
    pub fn is_wrappable(self) -> bool {
        !matches!(self, TokenKind::Tag)
    }
}

// =============================================================================
// Token
// =============================================================================

/// One lexical unit of an HTML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    text: CompactString,
    key: CompactString,
    kind: TokenKind,
}

impl Token {
    /// Create a token from its source text, classifying it against the
    /// default atomic tag set.
    pub fn new(text: impl Into<CompactString>) -> Self {
        let text = text.into();
        let kind = classify(&text, DEFAULT_ATOMIC_TAGS);
        Self::with_kind(text, kind)
    }

    /// Create a token whose kind is already known to the caller.
    pub(crate) fn with_kind(text: CompactString, kind: TokenKind) -> Self {
        let key = key_for(&text, kind);
        Self { text, key, kind }
    }

    /// Exact source text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Normalized comparison key.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Lexical class.
    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// True when the key is a single space: literal whitespace as well as
    /// non-breaking space entities.
    #[inline]
    pub fn is_whitespace(&self) -> bool {
        self.key == WHITESPACE_KEY
    }

    /// See [`TokenKind::is_wrappable`].
    #[inline]
    pub fn is_wrappable(&self) -> bool {
        self.kind.is_wrappable()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Classify token text. `atomic_tags` decides which elements are opaque.
pub(crate) fn classify(text: &str, atomic_tags: &[impl AsRef<str>]) -> TokenKind {
    if atomic_tag_name(text, atomic_tags).is_some() && text.ends_with('>') {
        return TokenKind::AtomicTag;
    }
    if is_tag(text) {
        if is_void_tag(text) {
            return TokenKind::VoidTag;
        }
        return TokenKind::Tag;
    }
    if !text.is_empty() && text.chars().all(char::is_whitespace) {
        return TokenKind::Whitespace;
    }
    TokenKind::Text
}

/// `^\s*<[^>]+>\s*$`
fn is_tag(text: &str) -> bool {
    let trimmed = text.trim();
    match trimmed.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        Some(inner) => !inner.is_empty() && !inner.contains('>'),
        None => false,
    }
}

fn is_void_tag(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.ends_with("/>") {
        return true;
    }
    let name = tag_name(trimmed);
    is_void_element(&name.to_ascii_lowercase())
}

/// Check if element is a void element (no closing tag).
fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Name of the atomic element `text` opens, if any.
///
/// Matching is case-sensitive and requires the name to be complete:
/// `<svg>` and `<svg width="1">` open an atomic element, `<svgx>` and the
/// self-closing `<svg/>` do not.
pub(crate) fn atomic_tag_name<'a, S: AsRef<str>>(text: &str, atomic_tags: &'a [S]) -> Option<&'a str> {
    let rest = text.strip_prefix('<')?;
    atomic_tags.iter().map(AsRef::as_ref).find(|name| {
        rest.strip_prefix(name)
            .and_then(|after| after.chars().next())
            .is_some_and(|c| c.is_whitespace() || c == '>')
    })
}

/// Raw tag name: the text after `<` up to whitespace or `>`, with a
/// self-closing slash removed.
fn tag_name(tag: &str) -> &str {
    let inner = tag.trim_start();
    let inner = inner.strip_prefix('<').unwrap_or(inner);
    let end = inner
        .find(|c: char| c.is_whitespace() || c == '>')
        .unwrap_or(inner.len());
    let name = &inner[..end];
    match name.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => name,
    }
}

// =============================================================================
// Keys
// =============================================================================

/// Derive the comparison key for a token.
pub fn key_of(text: &str) -> CompactString {
    key_for(text, classify(text, DEFAULT_ATOMIC_TAGS))
}

fn key_for(text: &str, kind: TokenKind) -> CompactString {
    match kind {
        TokenKind::Tag | TokenKind::VoidTag => {
            let name = tag_name(text);
            let mut key = CompactString::with_capacity(name.len() + 2);
            key.push('<');
            key.push_str(&name.to_lowercase());
            key.push('>');
            key
        }
        TokenKind::Whitespace => CompactString::const_new(WHITESPACE_KEY),
        TokenKind::Text => collapse_whitespace(&strip_comments(text)),
        TokenKind::AtomicTag => collapse_whitespace(text),
    }
}

/// Remove `<!--...-->` spans. An unterminated comment runs to the end.
fn strip_comments(text: &str) -> Cow<'_, str> {
    if !text.contains(COMMENT_OPEN) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find(COMMENT_OPEN) {
        out.push_str(&rest[..open]);
        let body = &rest[open + COMMENT_OPEN.len()..];
        rest = match body.find(COMMENT_CLOSE) {
            Some(close) => &body[close + COMMENT_CLOSE.len()..],
            None => "",
        };
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Collapse each run of whitespace and non-breaking space entities into a
/// single space.
fn collapse_whitespace(text: &str) -> CompactString {
    let mut out = CompactString::with_capacity(text.len());
    let mut rest = text;
    let mut in_space = false;

    while let Some(c) = rest.chars().next() {
        let space_len = if c.is_whitespace() {
            c.len_utf8()
        } else if rest.starts_with(NBSP_NAMED) {
            NBSP_NAMED.len()
        } else if rest.starts_with(NBSP_NUMERIC) {
            NBSP_NUMERIC.len()
        } else {
            0
        };

        if space_len > 0 {
            if !in_space {
                out.push(' ');
                in_space = true;
            }
            rest = &rest[space_len..];
        } else {
            out.push(c);
            in_space = false;
            rest = &rest[c.len_utf8()..];
        }
    }

    out
}

// =============================================================================
// Tests
// =============================================================================

//! HTML rendering of edit operations
//!
//! Turns an operation list back into one HTML string. Unchanged spans are
//! copied through; inserted and deleted spans are wrapped in marker
//! elements.
//!
//! # Wrapping
//!
//! Only *wrappable* tokens (text, whitespace, void tags, atomic elements) go
//! inside a marker. Structural tags are emitted bare between marker runs, so
//! a marker never straddles an element boundary:
//!
//! ```text
//! tokens:  "new"  "</p>"  "<p>"  "para"
//! output:  <ins>new</ins></p><p><ins>para</ins>
//! ```
//!
//! A run made only of whitespace is dropped from the output entirely.

use std::fmt::Write;

use compact_str::CompactString;

use crate::algo::{Action, Operation};
use crate::token::Token;

// =============================================================================
// RenderConfig
// =============================================================================

/// Default marker element for inserted content.
pub const DEFAULT_INSERT_TAG: &str = "ins";

/// Default marker element for deleted content.
pub const DEFAULT_DELETE_TAG: &str = "del";

/// Configuration for operation rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Value of the `class` attribute on every marker, passed through as is.
    pub class_name: Option<CompactString>,
    /// Marker element for inserted content (default: "ins").
    pub insert_tag: CompactString,
    /// Marker element for deleted content (default: "del").
    pub delete_tag: CompactString,
    /// When set, every marker carries `data-{prefix}operation-index="N"`,
    /// N being the index of the operation it renders. The deletion and
    /// insertion halves of one replacement share the same N.
    pub operation_index_prefix: Option<CompactString>,
}

impl RenderConfig {
    /// `<ins>`/`<del>` markers, no attributes.
    pub const DEFAULT: Self = Self {
        class_name: None,
        insert_tag: CompactString::const_new(DEFAULT_INSERT_TAG),
        delete_tag: CompactString::const_new(DEFAULT_DELETE_TAG),
        operation_index_prefix: None,
    };

    /// Create the default config.
    pub fn new() -> Self {
        Self::DEFAULT
    }

    /// Set the class attribute value for markers.
    pub fn with_class(mut self, class_name: impl Into<CompactString>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Set custom marker element names.
    pub fn with_markers(
        mut self,
        insert_tag: impl Into<CompactString>,
        delete_tag: impl Into<CompactString>,
    ) -> Self {
        self.insert_tag = insert_tag.into();
        self.delete_tag = delete_tag.into();
        self
    }

    /// Emit `data-{prefix}operation-index` on markers. Pass `""` for
    /// a plain `data-operation-index`.
    pub fn with_operation_index(mut self, prefix: impl Into<CompactString>) -> Self {
        self.operation_index_prefix = Some(prefix.into());
        self
    }

    /// Render `ops` against the token sequences they were computed from.
    ///
    /// # Panics
    ///
    /// Panics if an operation's range lies outside `before` or `after`.
    /// Operations from [`calculate_operations`](crate::algo::calculate_operations)
    /// on the same tokens are always in range.
    pub fn render(&self, before: &[Token], after: &[Token], ops: &[Operation]) -> String {
        let mut output = String::new();
        for (index, op) in ops.iter().enumerate() {
            self.render_operation(before, after, op, index, &mut output);
        }
        output
    }

    fn render_operation(
        &self,
        before: &[Token],
        after: &[Token],
        op: &Operation,
        index: usize,
        output: &mut String,
    ) {
        match op.action {
            Action::Equal => {
                for token in &after[op.after_range()] {
                    output.push_str(token.text());
                }
            }
            Action::Insert => {
                self.wrap(&self.insert_tag, &after[op.after_range()], index, output);
            }
            Action::Delete => {
                self.wrap(&self.delete_tag, &before[op.before_range()], index, output);
            }
            Action::Replace => {
                self.wrap(&self.delete_tag, &before[op.before_range()], index, output);
                self.wrap(&self.insert_tag, &after[op.after_range()], index, output);
            }
        }
    }

    /// Alternate between marker-wrapped runs of wrappable tokens and bare
    /// runs of structural tags.
    fn wrap(&self, marker: &str, tokens: &[Token], index: usize, output: &mut String) {
        let mut rest = tokens;

        while !rest.is_empty() {
            let wrappable = rest.iter().take_while(|t| t.is_wrappable()).count();
            let (run, tail) = rest.split_at(wrappable);
            if run.iter().any(|t| !t.text().trim().is_empty()) {
                self.open_marker(marker, index, output);
                for token in run {
                    output.push_str(token.text());
                }
                output.push_str("</");
                output.push_str(marker);
                output.push('>');
            }

            let tags = tail.iter().take_while(|t| !t.is_wrappable()).count();
            let (tag_run, tail) = tail.split_at(tags);
            for token in tag_run {
                output.push_str(token.text());
            }

            rest = tail;
        }
    }

    fn open_marker(&self, marker: &str, index: usize, output: &mut String) {
        output.push('<');
        output.push_str(marker);
        if let Some(class_name) = &self.class_name {
            output.push_str(" class=\"");
            output.push_str(class_name);
            output.push('"');
        }
        if let Some(prefix) = &self.operation_index_prefix {
            output.push_str(" data-");
            output.push_str(prefix);
            // Writing into a String cannot fail.
            let _ = write!(output, "operation-index=\"{index}\"");
        }
        output.push('>');
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Render `ops` with `<ins>`/`<del>` markers, optionally carrying `class_name`.
///
/// # Panics
///
/// Panics if an operation's range lies outside `before` or `after`, as
/// [`RenderConfig::render`] does.
pub fn render_operations(
    before: &[Token],
    after: &[Token],
    ops: &[Operation],
    class_name: Option<&str>,
) -> String {
    let config = match class_name {
        Some(class_name) => RenderConfig::new().with_class(class_name),
        None => RenderConfig::new(),
    };
    config.render(before, after, ops)
}

// =============================================================================
// Tests
// =============================================================================

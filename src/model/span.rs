//! Bracket spans — one per matched `(...)` pair of an AMR body.

use std::fmt;

/// Discovery index of a span within one block.
///
/// Doubles as the arena slot of the node resolved from the span, so nodes are
/// keyed by occurrence and never by their text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpanId(pub usize);

impl fmt::Display for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A maximal substring from a `(` to its matching `)`, verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketSpan {
    pub id: SpanId,
    /// Exact text, both parentheses included.
    pub text: String,
    /// Byte offset of the opening `(` in the block body.
    pub start: usize,
    /// Byte offset one past the closing `)`.
    pub end: usize,
    /// Nesting depth, 1 for a top-level span.
    pub depth: usize,
    /// Innermost enclosing span, `None` at top level.
    pub parent: Option<SpanId>,
}

impl BracketSpan {
    /// Number of `(` in the span (equal to the number of `)`).
    pub fn pair_count(&self) -> usize {
        self.text.bytes().filter(|&b| b == b'(').count()
    }

    /// A leaf span holds exactly one pair of parentheses.
    pub fn is_leaf(&self) -> bool {
        self.pair_count() == 1
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether `other` lies strictly inside this span.
    pub fn contains(&self, other: &BracketSpan) -> bool {
        self.start < other.start && other.end <= self.end
    }
}

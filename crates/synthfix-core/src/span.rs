//! Source location tracking.
//!
//! Provides [`Span`], a byte range into the document that declared a type or
//! member. Cursor-based symbol resolution is containment over these ranges.

use std::fmt;

/// A byte range of source text.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Start offset in bytes.
    pub start: u32,
    /// Length in bytes.
    pub len: u32,
}

impl Span {
    /// Create a new span from a start offset and length.
    #[inline]
    pub fn new(start: u32, len: u32) -> Self {
        Self { start, len }
    }

    /// Exclusive end offset.
    #[inline]
    pub fn end(&self) -> u32 {
        self.start.saturating_add(self.len)
    }

    /// Whether this span is empty (zero length).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The length of this span in bytes.
    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Whether `offset` falls inside this span (end inclusive, so a cursor
    /// placed right after the last character still counts).
    #[inline]
    pub fn contains(&self, offset: u32) -> bool {
        offset >= self.start && offset <= self.end()
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

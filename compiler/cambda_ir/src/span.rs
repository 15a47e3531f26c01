//! Source location spans.
//!
//! A span is the line and column where a construct starts plus its width on
//! that line. Constructs that cross a line boundary have no single-line width
//! and carry [`Span::MULTILINE`] instead.

use std::fmt;

/// Source location span.
///
/// Layout: 12 bytes total
/// - line: u32 - 1-based line of the first character
/// - col: u32 - 1-based column of the first character
/// - len: u32 - width in columns, or [`Span::MULTILINE`]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(C)]
pub struct Span {
    pub line: u32,
    pub col: u32,
    pub len: u32,
}

impl Span {
    /// Length sentinel for spans that cross a line boundary.
    pub const MULTILINE: u32 = u32::MAX;

    /// Dummy span for synthesized nodes (natives, placeholders).
    pub const DUMMY: Span = Span {
        line: 0,
        col: 0,
        len: 0,
    };

    /// Create a new span.
    #[inline]
    pub const fn new(line: u32, col: u32, len: u32) -> Self {
        Span { line, col, len }
    }

    /// Create a zero-width span at a position.
    #[inline]
    pub const fn point(line: u32, col: u32) -> Self {
        Span { line, col, len: 0 }
    }

    /// Create a span that starts at a position and crosses a line boundary.
    #[inline]
    pub const fn multiline(line: u32, col: u32) -> Self {
        Span {
            line,
            col,
            len: Self::MULTILINE,
        }
    }

    /// Whether the spanned text crosses a line boundary.
    #[inline]
    pub const fn is_multiline(&self) -> bool {
        self.len == Self::MULTILINE
    }

    /// Column one past the last spanned character, if the span is single-line.
    #[inline]
    pub const fn end_col(&self) -> Option<u32> {
        if self.is_multiline() {
            None
        } else {
            Some(self.col + self.len)
        }
    }

    /// Check whether a single-line span covers `(line, col)`.
    pub fn contains(&self, line: u32, col: u32) -> bool {
        match self.end_col() {
            Some(end) => line == self.line && col >= self.col && col < end,
            None => line == self.line && col >= self.col,
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_multiline() {
            write!(f, "{}:{}+multiline", self.line, self.col)
        } else {
            write!(f, "{}:{}+{}", self.line, self.col, self.len)
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Span;
    crate::static_assert_size!(Span, 12);
}

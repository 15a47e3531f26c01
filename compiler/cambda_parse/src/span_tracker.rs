//! Span tracking for nested constructs.
//!
//! The parser calls [`SpanTracker::start`] when a construct begins and
//! [`SpanTracker::end`] when it is complete; starts and ends nest like the
//! constructs themselves.

use cambda_ir::Span;
use cambda_lexer_core::Position;
use smallvec::SmallVec;

/// Stack of construct start positions.
#[derive(Clone, Debug, Default)]
pub struct SpanTracker {
    starts: SmallVec<[Position; 16]>,
}

impl SpanTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a construct at `position`.
    #[inline]
    pub fn start(&mut self, position: Position) {
        self.starts.push(position);
    }

    /// Close the innermost construct at `position` (one past its last
    /// character).
    ///
    /// Returns `None` if no construct is open.
    pub fn end(&mut self, position: Position) -> Option<Span> {
        let start = self.starts.pop()?;
        Some(Self::between(start, position))
    }

    /// Span from `start` up to (not including) `end`.
    ///
    /// Same line gives `len = end.col - start.col`; otherwise the span is
    /// multiline.
    pub fn between(start: Position, end: Position) -> Span {
        if start.line == end.line {
            Span::new(start.line, start.col, end.col.saturating_sub(start.col))
        } else {
            Span::multiline(start.line, start.col)
        }
    }

    /// Number of open constructs.
    #[inline]
    pub fn depth(&self) -> usize {
        self.starts.len()
    }

    /// Drop every open construct, e.g. after an error unwound the parser.
    pub fn clear(&mut self) {
        self.starts.clear();
    }
}

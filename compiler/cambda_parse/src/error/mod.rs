//! Parse error types.
//!
//! A [`ParseError`] is a [`ParseErrorKind`] (what went wrong), the span where
//! it went wrong and, when known, the [`ErrorContext`] naming the construct
//! being parsed. [`ParseError::to_diagnostic`] turns it into a
//! [`Diagnostic`] for rendering.

mod context;
mod kind;


pub use context::ErrorContext;
pub use kind::ParseErrorKind;

use std::fmt;

use cambda_diagnostic::{Diagnostic, ErrorCode};
use cambda_ir::{ArenaError, Span};

/// Error produced while parsing or resolving an expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    /// Innermost construct being parsed when the error occurred.
    pub context: Option<ErrorContext>,
}

impl ParseError {
    #[cold]
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError {
            kind,
            span,
            context: None,
        }
    }

    /// Attach `context` unless a more specific one is already set.
    #[must_use]
    pub fn in_context(mut self, context: ErrorContext) -> Self {
        if self.context.is_none() {
            self.context = Some(context);
        }
        self
    }

    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    /// Convert into a renderable diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic =
            Diagnostic::error(self.code(), self.span).with_message(self.kind.to_string());
        match self.context {
            Some(context) => {
                diagnostic.with_note(format!("while parsing {}", context.description()))
            }
            None => diagnostic,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.span)
    }
}

impl std::error::Error for ParseError {}

impl From<(ArenaError, Span)> for ParseError {
    fn from((error, span): (ArenaError, Span)) -> Self {
        ParseError::new(ParseErrorKind::OutOfMemory(error), span)
    }
}

//! Core diagnostic record.

use cambda_ir::Span;
use std::fmt;

use crate::ErrorCode;

/// A reported problem: code, location and an optional formatted message.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Where it went wrong.
    pub span: Span,
    /// Formatted message; `None` falls back to the code's description.
    pub message: Option<String>,
    /// Additional notes providing context.
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[cold]
    pub fn error(code: ErrorCode, span: Span) -> Self {
        Diagnostic {
            code,
            span,
            message: None,
            notes: Vec::new(),
        }
    }

    /// Set the formatted message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Add a note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// The message to print: the formatted one, or the code's description.
    pub fn text(&self) -> &str {
        self.message
            .as_deref()
            .unwrap_or_else(|| self.code.description())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error[{}]: {} at {}",
            self.code,
            self.text(),
            self.span
        )
    }
}

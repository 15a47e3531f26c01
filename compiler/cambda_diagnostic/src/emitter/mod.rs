//! Diagnostic Emitters
//!
//! Only terminal output exists today: human-readable text with optional ANSI
//! colour.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use cambda_lexer_core::SourceBuffer;

use crate::Diagnostic;

/// Source a diagnostic points into, for printing the offending line.
#[derive(Copy, Clone, Debug)]
pub struct SourceInfo<'a> {
    /// Display name: a file path, or `<repl>`.
    pub path: &'a str,
    pub source: &'a SourceBuffer,
}

impl<'a> SourceInfo<'a> {
    pub fn new(path: &'a str, source: &'a SourceBuffer) -> Self {
        SourceInfo { path, source }
    }
}

/// Trait for emitting diagnostics.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic, with its source line when `source` is given.
    fn emit(&mut self, diagnostic: &Diagnostic, source: Option<SourceInfo<'_>>);

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Emit the closing summary line; nothing when `error_count` is zero.
    fn emit_summary(&mut self, error_count: usize);
}

//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support:
//!
//! ```text
//! error[E1001]: missing right parenthesis
//!  --> <repl>:1:1
//!   |
//! 1 | (foo
//!   | ^
//! ```

use std::io::{self, Write};

use cambda_ir::Span;

use crate::Diagnostic;

use super::{DiagnosticEmitter, SourceInfo};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const BOLD: &str = "\x1b[1m";
    pub const GUTTER: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Colour when the output is a terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean; `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

impl std::str::FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            other => Err(format!(
                "invalid color mode `{other}` (expected auto, always or never)"
            )),
        }
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter with explicit color mode.
    ///
    /// `is_tty` says whether `writer` is a terminal, for `ColorMode::Auto`.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    /// Consume the emitter, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write text with optional ANSI color codes.
    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_header(&mut self, diagnostic: &Diagnostic) {
        self.write_colored("error", colors::ERROR);
        let code = format!("[{}]", diagnostic.code);
        self.write_colored(&code, colors::BOLD);
        let _ = writeln!(self.writer, ": {}", diagnostic.text());
    }

    fn write_snippet(&mut self, diagnostic: &Diagnostic, source: SourceInfo<'_>) {
        let span = diagnostic.span;
        let gutter_width = span.line.to_string().len();
        let pad = " ".repeat(gutter_width);

        let _ = write!(self.writer, "{pad}");
        self.write_colored("-->", colors::GUTTER);
        let _ = writeln!(self.writer, " {}:{}:{}", source.path, span.line, span.col);

        let Some(text) = source.source.line_text(span.line) else {
            return;
        };
        let bar = format!("{pad} |");
        self.write_colored(&bar, colors::GUTTER);
        let _ = writeln!(self.writer);
        let numbered = format!("{} |", span.line);
        self.write_colored(&numbered, colors::GUTTER);
        let _ = writeln!(self.writer, " {text}");
        self.write_colored(&bar, colors::GUTTER);
        let (indent, carets) = underline(text, span);
        let _ = write!(self.writer, " {indent}");
        self.write_colored(&carets, colors::ERROR);
        let _ = writeln!(self.writer);
    }
}

/// Indentation and caret run underlining `span` within `line`.
///
/// Tabs in the indentation are kept so the carets line up. Multiline spans
/// underline to the end of the line; the run is never empty.
fn underline(line: &str, span: Span) -> (String, String) {
    let start = span.col.saturating_sub(1) as usize;
    let indent: String = line
        .chars()
        .take(start)
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect();
    let line_len = line.chars().count();
    let width = if span.is_multiline() {
        line_len.saturating_sub(start)
    } else {
        span.len as usize
    };
    (indent, "^".repeat(width.max(1)))
}

impl TerminalEmitter<io::Stderr> {
    /// Create a terminal emitter for stderr with explicit color mode.
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        Self::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic, source: Option<SourceInfo<'_>>) {
        self.write_header(diagnostic);
        match source {
            Some(source) => self.write_snippet(diagnostic, source),
            None => {
                let _ = write!(self.writer, " ");
                self.write_colored("-->", colors::GUTTER);
                let _ = writeln!(self.writer, " {}", diagnostic.span);
            }
        }
        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            self.write_colored("note", colors::BOLD);
            let _ = writeln!(self.writer, ": {note}");
        }
        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize) {
        if error_count == 0 {
            return;
        }
        self.write_colored("error", colors::ERROR);
        if error_count == 1 {
            let _ = writeln!(self.writer, ": aborting due to previous error");
        } else {
            let _ = writeln!(self.writer, ": aborting due to {error_count} previous errors");
        }
    }
}

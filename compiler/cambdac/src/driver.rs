//! Parse-and-print pipeline shared by file mode and the REPL.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use cambda_diagnostic::emitter::{DiagnosticEmitter, SourceInfo, TerminalEmitter};
use cambda_lexer_core::SourceBuffer;
use cambda_parse::{ParseContext, ParseError};
use thiserror::Error;
use tracing::debug;

use crate::args::Options;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("cannot write output: {0}")]
    Io(#[from] io::Error),
}

/// Parse every top-level expression of `source` into `context`, resolving
/// each one when `resolve` is set, and print its tree to `out`.
///
/// Stops at the first error. Returns the number of expressions printed.
pub fn process(
    context: &mut ParseContext,
    source: &SourceBuffer,
    resolve: bool,
    out: &mut impl Write,
) -> Result<usize, DriverError> {
    let mut parser = context.parser(source);
    let mut count = 0;
    while let Some(root) = parser.next_expr()? {
        if resolve {
            parser.resolve(root)?;
        }
        writeln!(out, "{}", parser.display(root))?;
        count += 1;
    }
    debug!(count, "source processed");
    Ok(count)
}

/// Render a parse error against its source.
pub fn report(
    emitter: &mut impl DiagnosticEmitter,
    error: &ParseError,
    path: &str,
    source: &SourceBuffer,
) {
    emitter.emit(&error.to_diagnostic(), Some(SourceInfo::new(path, source)));
    emitter.flush();
}

/// File mode: parse `path`, print its trees, report the first error.
pub fn run_file(path: &Path, options: &Options, is_tty: bool) -> ExitCode {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("error: cannot read {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
    };
    let source = SourceBuffer::new(&text);
    let mut context = ParseContext::new(options.parse);
    let mut emitter = TerminalEmitter::stderr(options.color, is_tty);
    let mut stdout = io::stdout().lock();

    match process(&mut context, &source, options.resolve, &mut stdout) {
        Ok(_) => ExitCode::SUCCESS,
        Err(DriverError::Parse(error)) => {
            report(&mut emitter, &error, &path.display().to_string(), &source);
            emitter.emit_summary(1);
            ExitCode::FAILURE
        }
        Err(DriverError::Io(err)) => {
            eprintln!("error: cannot write output: {err}");
            ExitCode::FAILURE
        }
    }
}

//! Interactive mode.
//!
//! Lines are collected until every opened parenthesis is closed, then the
//! whole entry is parsed in one context that lives for the session, so
//! earlier definitions stay visible. After an error is reported the context
//! is reset to a fresh arena, interner and scope chain. `,reset` does the
//! same on request.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use cambda_diagnostic::emitter::TerminalEmitter;
use cambda_lexer_core::SourceBuffer;
use cambda_parse::ParseContext;
use tracing::debug;

use crate::args::Options;
use crate::driver::{process, report, DriverError};

const PROMPT: &str = "cambda> ";
const CONTINUATION: &str = "   ...> ";
const RESET_COMMAND: &str = ",reset";

/// Whether `input` is a complete entry: no parenthesis left open.
///
/// Extra closing parentheses also complete the entry so the parser can
/// report them.
pub fn input_finished(input: &str) -> bool {
    let mut depth: i64 = 0;
    for byte in input.bytes() {
        match byte {
            b'(' => depth += 1,
            b')' => depth -= 1,
            _ => {}
        }
    }
    depth <= 0
}

pub fn run(options: &Options, is_tty: bool) -> ExitCode {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let mut emitter = TerminalEmitter::stderr(options.color, is_tty);
    let mut context = ParseContext::new(options.parse);
    let mut entry = String::new();

    loop {
        let prompt = if entry.is_empty() { PROMPT } else { CONTINUATION };
        if write!(stdout, "{prompt}").and_then(|()| stdout.flush()).is_err() {
            return ExitCode::FAILURE;
        }

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => {
                let _ = writeln!(stdout);
                return ExitCode::SUCCESS;
            }
            Ok(_) => {}
            Err(err) => {
                eprintln!("error: cannot read input: {err}");
                return ExitCode::FAILURE;
            }
        }

        if entry.is_empty() && line.trim() == RESET_COMMAND {
            context.reset();
            continue;
        }
        entry.push_str(&line);
        if !input_finished(&entry) {
            continue;
        }

        let source = SourceBuffer::new(&entry);
        match process(&mut context, &source, options.resolve, &mut stdout) {
            Ok(_) => {}
            Err(DriverError::Parse(error)) => {
                report(&mut emitter, &error, "<repl>", &source);
                debug!(code = %error.code(), "resetting context after error");
                context.reset();
            }
            Err(DriverError::Io(err)) => {
                eprintln!("error: cannot write output: {err}");
                return ExitCode::FAILURE;
            }
        }
        entry.clear();
    }
}

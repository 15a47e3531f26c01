//! Command-line options.
//!
//! Flags are parsed by hand: `--color=<mode>`, `--arena-capacity=<nodes>`,
//! `--no-resolve` and `--help`. The first non-flag argument is the input file.

use std::path::PathBuf;

use cambda_diagnostic::emitter::ColorMode;
use cambda_parse::ParseConfig;
use thiserror::Error;

pub const USAGE: &str = "\
Usage: cambda [options] [file]

Parses `file` (or a REPL when omitted) and prints each top-level expression.

Options:
  --color=<mode>           Diagnostic colours: auto, always, never (default: auto)
  --arena-capacity=<n>     Nodes available to parsed source (default: 4096)
  --no-resolve             Skip name resolution
  -h, --help               Show this message

Environment:
  NO_COLOR                 Disable colours unless --color=always
  RUST_LOG                 Enable tracing output, e.g. RUST_LOG=cambda_parse=debug";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("unknown option `{0}`")]
    UnknownFlag(String),
    #[error("{0}")]
    InvalidColor(String),
    #[error("invalid arena capacity `{0}` (expected a positive integer)")]
    InvalidCapacity(String),
    #[error("unexpected argument `{0}`: only one input file is accepted")]
    ExtraPath(String),
}

/// Parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub path: Option<PathBuf>,
    pub color: ColorMode,
    pub parse: ParseConfig,
    /// Run name resolution after parsing each expression.
    pub resolve: bool,
    pub help: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            path: None,
            color: ColorMode::Auto,
            parse: ParseConfig::default(),
            resolve: true,
            help: false,
        }
    }
}

impl Options {
    /// Parse arguments (without the program name).
    ///
    /// `no_color` reflects `NO_COLOR`; it turns `auto` into `never` but an
    /// explicit `--color=always` wins.
    pub fn parse<I>(args: I, no_color: bool) -> Result<Self, ArgsError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut options = Options::default();
        let mut explicit_color = false;

        for arg in args {
            let arg: String = arg.into();
            if let Some(mode) = arg.strip_prefix("--color=") {
                options.color = mode.parse().map_err(ArgsError::InvalidColor)?;
                explicit_color = true;
            } else if let Some(value) = arg.strip_prefix("--arena-capacity=") {
                options.parse.arena_capacity = match value.parse::<usize>() {
                    Ok(capacity) if capacity > 0 => capacity,
                    _ => return Err(ArgsError::InvalidCapacity(value.to_owned())),
                };
            } else if arg == "--no-resolve" {
                options.resolve = false;
            } else if arg == "--help" || arg == "-h" {
                options.help = true;
            } else if arg.starts_with('-') {
                return Err(ArgsError::UnknownFlag(arg));
            } else if options.path.is_none() {
                options.path = Some(PathBuf::from(arg));
            } else {
                return Err(ArgsError::ExtraPath(arg));
            }
        }

        if no_color && !explicit_color {
            options.color = ColorMode::Never;
        }
        Ok(options)
    }
}

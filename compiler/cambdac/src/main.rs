//! Cambda CLI
//!
//! `cambda [options] [file]` parses a file and prints each top-level tree;
//! without a file it starts a REPL.

mod args;
mod driver;
mod repl;

use std::io::IsTerminal;
use std::process::ExitCode;

use args::{Options, USAGE};

fn main() -> ExitCode {
    init_tracing();

    let no_color = std::env::var_os("NO_COLOR").is_some();
    let options = match Options::parse(std::env::args().skip(1), no_color) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };
    if options.help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let is_tty = std::io::stderr().is_terminal();
    match &options.path {
        Some(path) => driver::run_file(path, &options, is_tty),
        None => repl::run(&options, is_tty),
    }
}

/// Install a hierarchical tracing subscriber when `RUST_LOG` is set, e.g.
/// `RUST_LOG=cambda_parse=trace`.
fn init_tracing() {
    use tracing_subscriber::{prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        let filter = EnvFilter::from_default_env();
        tracing_subscriber::registry()
            .with(
                tracing_tree::HierarchicalLayer::new(2)
                    .with_targets(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .init();
    }
}

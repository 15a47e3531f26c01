//! Parser tests.
//!
//! - `parser`: grammar, special forms, spans and error reporting
//! - `properties`: property tests over generated programs

mod parser;
mod properties;

use cambda_ir::ExprId;

use crate::{ParseContext, ParseError};

/// Parse `source` in a fresh context, expecting exactly one root.
fn parse_one(source: &str) -> (ParseContext, ExprId) {
    let mut context = ParseContext::default();
    let roots = context.parse_str(source).unwrap();
    assert_eq!(roots.len(), 1, "expected one root in {source:?}");
    (context, roots[0])
}

/// Parse `source` in a fresh context, expecting an error.
fn parse_err(source: &str) -> ParseError {
    ParseContext::default().parse_str(source).unwrap_err()
}

/// Parse `source` and print its single root back.
fn reprint(source: &str) -> String {
    let (context, root) = parse_one(source);
    context.display(root).to_string()
}

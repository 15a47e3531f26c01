//! Recursive descent parser for Cambda.
//!
//! Turns source text into a flat AST in an [`ExprArena`](cambda_ir::ExprArena).
//! A [`ParseContext`] owns everything one parse touches (arena, interner,
//! scope chain); [`ParseContext::parser`] hands out a [`Parser`] over a
//! source buffer that yields one top-level expression at a time.
//!
//! Special forms (`let`, `if`, `lambda`, `do`) are elaborated while parsing.
//! Ordinary applications stay `UnresolvedApp` until [`resolve`] checks them
//! against the scope chain.

mod context;
mod error;
mod grammar;
pub mod resolve;
mod scope;
mod span_tracker;
mod stack;

pub use context::{ParseConfig, ParseContext, NATIVES};
pub use error::{ErrorContext, ParseError, ParseErrorKind};
pub use grammar::Parser;
pub use scope::{Binding, ScopeChain};
pub use span_tracker::SpanTracker;

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

//! Grammar productions.
//!
//! Each module extends [`Parser`] with methods for one part of the grammar:
//!
//! - [`expr`]: expression dispatch, identifiers and `:keyword` literals
//! - [`number`]: integer and float literals
//! - [`call`]: applications and special-form elaboration
//!
//! ```text
//! expr   := '(' call ')' | ident | ':' ident | number
//! call   := headexpr argexpr*
//! number := ['-'] digits ['.' digits] ['e' ('+'|'-') digits]
//! ```

mod call;
mod expr;
mod number;

use cambda_ir::{Expr, ExprArena, ExprDisplay, ExprId, ExprKind, Span, StringInterner};
use cambda_lexer_core::{Cursor, Position, SourceBuffer};
use tracing::debug;

use crate::{ErrorContext, ParseError, ParseErrorKind, ScopeChain, SpanTracker};

/// Recursive descent parser over one source buffer.
///
/// Borrows the arena, interner and scope chain of a
/// [`ParseContext`](crate::ParseContext); nodes it allocates outlive it.
pub struct Parser<'ctx, 'src> {
    cursor: Cursor<'src>,
    spans: SpanTracker,
    arena: &'ctx mut ExprArena,
    interner: &'ctx mut StringInterner,
    scopes: &'ctx mut ScopeChain,
}

impl<'ctx, 'src> Parser<'ctx, 'src> {
    pub(crate) fn new(
        source: &'src SourceBuffer,
        arena: &'ctx mut ExprArena,
        interner: &'ctx mut StringInterner,
        scopes: &'ctx mut ScopeChain,
    ) -> Self {
        Parser {
            cursor: source.cursor(),
            spans: SpanTracker::new(),
            arena,
            interner,
            scopes,
        }
    }

    /// Parse the next top-level expression.
    ///
    /// Returns `Ok(None)` once only whitespace remains. Each expression is
    /// parsed inside an arena section and a scope section: on error every
    /// node it allocated is rolled back, every binding it made or overwrote
    /// is restored, and the cursor is left where the error occurred.
    pub fn next_expr(&mut self) -> Result<Option<ExprId>, ParseError> {
        if self.cursor.skip_whitespace() {
            return Ok(None);
        }
        let floor = self.arena.len();
        self.arena.push_section();
        self.scopes.push_section();
        match self.parse_expr() {
            Ok(root) => {
                self.arena.commit_section();
                self.scopes.commit_section();
                debug!(?root, nodes = self.arena.len() - floor, "parsed top-level expression");
                Ok(Some(root))
            }
            Err(error) => {
                self.arena.pop_section();
                self.scopes.pop_section();
                self.spans.clear();
                debug!(code = %error.code(), span = %error.span, "top-level expression rolled back");
                Err(error)
            }
        }
    }

    /// Resolve names under `root` against the scope chain as it stands now,
    /// so only definitions parsed before `root` are visible.
    pub fn resolve(&mut self, root: ExprId) -> Result<(), ParseError> {
        crate::resolve::resolve(&*self.arena, &*self.interner, &mut *self.scopes, root)
    }

    /// Print the tree under `root`.
    pub fn display(&self, root: ExprId) -> ExprDisplay<'_, StringInterner> {
        ExprDisplay::new(&*self.arena, &*self.interner, root)
    }

    /// Current source position.
    #[inline]
    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    /// Whether only whitespace remains.
    pub fn is_finished(&self) -> bool {
        let mut probe = self.cursor;
        probe.skip_whitespace()
    }

    // ===== Helpers =====

    fn alloc(&mut self, kind: ExprKind, span: Span) -> Result<ExprId, ParseError> {
        self.arena
            .alloc_expr(Expr::new(kind, span))
            .map_err(|error| ParseError::from((error, span)))
    }

    /// Close the innermost span at the current position.
    fn end_span(&mut self) -> Span {
        self.spans
            .end(self.cursor.position())
            .unwrap_or(Span::DUMMY)
    }

    /// One-column span at the current character.
    fn here(&self) -> Span {
        let position = self.cursor.position();
        Span::new(position.line, position.col, 1)
    }

    /// Error for the current character: `UnexpectedEndOfInput` at EOF,
    /// otherwise `UnexpectedChar`.
    fn unexpected_here(&self) -> ParseError {
        match self.cursor.current_char() {
            Some(found) => ParseError::new(ParseErrorKind::UnexpectedChar { found }, self.here()),
            None => {
                let position = self.cursor.position();
                ParseError::new(
                    ParseErrorKind::UnexpectedEndOfInput,
                    Span::point(position.line, position.col),
                )
            }
        }
    }

    /// Run `f`, tagging any error it returns with `context` unless a more
    /// specific context is already attached.
    fn in_error_context<T>(
        &mut self,
        context: ErrorContext,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        f(self).map_err(|error| error.in_context(context))
    }

    /// Run `f` in a fresh scope frame, popping it on every exit path.
    fn with_scope<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.scopes.push();
        let result = f(self);
        self.scopes.pop();
        result
    }
}

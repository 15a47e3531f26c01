//! Expression dispatch, identifiers and `:keyword` literals.

use cambda_ir::{keywords, ExprId, ExprKind, Literal, Name};
use cambda_lexer_core::is_ident_byte;
use tracing::trace;

use crate::stack::ensure_sufficient_stack;
use crate::{ErrorContext, ParseError, ParseErrorKind, Parser};

impl Parser<'_, '_> {
    /// Parse one expression.
    ///
    /// Every nested expression goes through here, so deep nesting grows the
    /// stack instead of overflowing it.
    pub(crate) fn parse_expr(&mut self) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| self.parse_expr_inner())
    }

    fn parse_expr_inner(&mut self) -> Result<ExprId, ParseError> {
        self.cursor.skip_whitespace();
        if self.cursor.is_eof() {
            return Err(self.unexpected_here().in_context(ErrorContext::Expression));
        }
        match self.cursor.current() {
            b'(' => self.parse_call(),
            b':' => self.in_error_context(ErrorContext::HashLiteral, Self::parse_hash),
            b'-' if self.cursor.peek().is_ascii_digit() => {
                self.in_error_context(ErrorContext::Number, Self::parse_number)
            }
            b'0'..=b'9' => self.in_error_context(ErrorContext::Number, Self::parse_number),
            byte if is_ident_byte(byte) => self.parse_ident(),
            _ => Err(self.unexpected_here()),
        }
    }

    fn parse_ident(&mut self) -> Result<ExprId, ParseError> {
        self.spans.start(self.cursor.position());
        let text = self.cursor.eat_ident();
        let name = self.interner.register(text);
        let span = self.end_span();
        trace!(text, %span, "identifier");
        self.alloc(ident_kind(name), span)
    }

    /// `:ident`
    fn parse_hash(&mut self) -> Result<ExprId, ParseError> {
        let colon = self.here();
        self.spans.start(self.cursor.position());
        self.cursor.advance();
        let text = self.cursor.eat_ident();
        if text.is_empty() {
            return Err(ParseError::new(ParseErrorKind::EmptyKeyword, colon));
        }
        let name = self.interner.register(text);
        let span = self.end_span();
        self.alloc(ExprKind::Literal(Literal::Hash(name)), span)
    }
}

/// Classify an identifier: literal keyword, reserved form or variable.
fn ident_kind(name: Name) -> ExprKind {
    match name {
        keywords::TRUE => ExprKind::Literal(Literal::True),
        keywords::FALSE => ExprKind::Literal(Literal::False),
        keywords::NIL => ExprKind::Literal(Literal::Nil),
        name if keywords::is_form_keyword(name) => ExprKind::Keyword(name),
        name => ExprKind::Var(name),
    }
}

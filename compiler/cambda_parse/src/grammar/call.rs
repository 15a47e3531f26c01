//! Applications and special forms.
//!
//! A call allocates an `Invalid` placeholder at `(` so the call node comes
//! before its children in the arena. A head that is a bare `let`, `if`,
//! `lambda` or `do` is recognised before anything is allocated for it and the
//! rest of the form is elaborated; any other head is parsed as an ordinary
//! expression. At `)` the placeholder is replaced with the final variant.

use cambda_ir::{keywords, Expr, ExprId, ExprKind, FnValue, Literal, Name, Span};
use cambda_lexer_core::{is_ident_byte, Position};
use smallvec::SmallVec;
use tracing::trace;

use crate::span_tracker::SpanTracker;
use crate::{Binding, ErrorContext, ParseError, ParseErrorKind, Parser};

type Args = SmallVec<[ExprId; 8]>;

impl Parser<'_, '_> {
    /// `'(' call ')'`
    pub(super) fn parse_call(&mut self) -> Result<ExprId, ParseError> {
        let open = self.cursor.position();
        let open_span = self.here();
        self.spans.start(open);
        self.cursor.advance();
        let placeholder = self.alloc(ExprKind::Invalid, open_span)?;

        let kind = self
            .in_error_context(ErrorContext::Call, |p| p.parse_call_kind(open))
            .map_err(|error| unclosed_at_eof(error, open))?;
        let span = self.end_span();
        self.arena.replace(placeholder, Expr::new(kind, span));
        Ok(placeholder)
    }

    fn parse_call_kind(&mut self, open: Position) -> Result<ExprKind, ParseError> {
        if self.cursor.skip_whitespace() {
            return Err(missing_right_paren(open));
        }
        if self.cursor.current() == b')' {
            return Err(self.unexpected_here());
        }

        if let Some((name, context)) = self.eat_form_keyword() {
            trace!(form = context.description(), "elaborating special form");
            return self.in_error_context(context, |p| p.parse_form(name, open));
        }

        let head = self.parse_expr()?;
        let args = self.parse_args(open)?;
        Ok(ExprKind::UnresolvedApp {
            callee: head,
            args: self.arena.alloc_expr_list(&args),
        })
    }

    /// Consume the head if it is a bare special-form keyword.
    fn eat_form_keyword(&mut self) -> Option<(Name, ErrorContext)> {
        let mut probe = self.cursor;
        let name = Name::of(probe.eat_ident());
        let context = match name {
            keywords::LET => ErrorContext::LetForm,
            keywords::IF => ErrorContext::IfForm,
            keywords::LAMBDA => ErrorContext::LambdaForm,
            keywords::DO => ErrorContext::DoForm,
            _ => return None,
        };
        self.cursor = probe;
        Some((name, context))
    }

    fn parse_form(&mut self, name: Name, open: Position) -> Result<ExprKind, ParseError> {
        match name {
            keywords::LET => self.parse_let(open),
            keywords::IF => self.parse_if(open),
            keywords::LAMBDA => self.parse_lambda(open),
            _ => self.parse_do(open),
        }
    }

    /// Parse arguments up to and including the closing `)`.
    fn parse_args(&mut self, open: Position) -> Result<Args, ParseError> {
        let mut args = Args::new();
        loop {
            if self.cursor.skip_whitespace() {
                return Err(missing_right_paren(open));
            }
            if self.cursor.current() == b')' {
                self.cursor.advance();
                return Ok(args);
            }
            args.push(self.parse_expr()?);
        }
    }

    /// Parse exactly `expected` arguments of `form`.
    fn parse_fixed_args(
        &mut self,
        form: &'static str,
        expected: usize,
        open: Position,
    ) -> Result<Args, ParseError> {
        let args = self.parse_args(open)?;
        if args.len() == expected {
            Ok(args)
        } else {
            Err(ParseError::new(
                ParseErrorKind::WrongArgumentCount {
                    form,
                    expected,
                    actual: args.len(),
                },
                SpanTracker::between(open, self.cursor.position()),
            ))
        }
    }

    /// `(let <ident> <expr>)`
    ///
    /// The name is bound in the current frame as soon as the form is
    /// complete, so later siblings see it.
    fn parse_let(&mut self, open: Position) -> Result<ExprKind, ParseError> {
        let args = self.parse_fixed_args("let", 2, open)?;
        let ExprKind::Var(name) = *self.arena.kind(args[0]) else {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedIdentifier,
                self.arena.span(args[0]),
            ));
        };
        let value = args[1];
        *self.scopes.define(name) = Binding::Value(value);
        Ok(ExprKind::Let { name, value })
    }

    /// `(if <cond> <then> <else>)`
    fn parse_if(&mut self, open: Position) -> Result<ExprKind, ParseError> {
        let args = self.parse_fixed_args("if", 3, open)?;
        Ok(ExprKind::If {
            cond: args[0],
            then_branch: args[1],
            else_branch: args[2],
        })
    }

    /// `(do <expr>*)`, children parsed in their own frame.
    fn parse_do(&mut self, open: Position) -> Result<ExprKind, ParseError> {
        let exprs = self.with_scope(|p| p.parse_args(open))?;
        Ok(ExprKind::Do {
            exprs: self.arena.alloc_expr_list(&exprs),
        })
    }

    /// `(lambda (<ident>*) <body>)`
    fn parse_lambda(&mut self, open: Position) -> Result<ExprKind, ParseError> {
        let params = self.in_error_context(ErrorContext::LambdaParams, |p| p.parse_params(open))?;
        let bodies = self.with_scope(|p| {
            for &param in &params {
                *p.scopes.define(param) = Binding::Param;
            }
            p.parse_args(open)
        })?;
        let [body] = bodies[..] else {
            return Err(ParseError::new(
                ParseErrorKind::WrongArgumentCount {
                    form: "lambda",
                    expected: 2,
                    actual: 1 + bodies.len(),
                },
                SpanTracker::between(open, self.cursor.position()),
            ));
        };
        let span = SpanTracker::between(open, self.cursor.position());
        let function = self
            .arena
            .alloc_fn(FnValue::Lambda {
                params: params.into_vec(),
                body,
            })
            .map_err(|error| ParseError::from((error, span)))?;
        Ok(ExprKind::Literal(Literal::Fn(function)))
    }

    /// Parenthesised list of bare, non-reserved identifiers.
    fn parse_params(&mut self, open: Position) -> Result<SmallVec<[Name; 4]>, ParseError> {
        if self.cursor.skip_whitespace() {
            return Err(missing_right_paren(open));
        }
        if self.cursor.current() != b'(' {
            return Err(ParseError::new(ParseErrorKind::ExpectedIdentifier, self.here()));
        }
        let list_open = self.cursor.position();
        self.cursor.advance();

        let mut params = SmallVec::new();
        loop {
            if self.cursor.skip_whitespace() {
                return Err(missing_right_paren(list_open));
            }
            if self.cursor.current() == b')' {
                self.cursor.advance();
                return Ok(params);
            }
            let start = self.cursor.position();
            if !is_ident_byte(self.cursor.current()) {
                return Err(ParseError::new(ParseErrorKind::ExpectedIdentifier, self.here()));
            }
            let text = self.cursor.eat_ident();
            if keywords::RESERVED.contains(&text) {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedIdentifier,
                    SpanTracker::between(start, self.cursor.position()),
                ));
            }
            params.push(self.interner.register(text));
        }
    }
}

/// Input that ends inside an open call is a missing `)`, whichever
/// production ran out.
fn unclosed_at_eof(error: ParseError, open: Position) -> ParseError {
    if error.kind != ParseErrorKind::UnexpectedEndOfInput {
        return error;
    }
    ParseError {
        context: error.context,
        ..missing_right_paren(open)
    }
}

fn missing_right_paren(open: Position) -> ParseError {
    ParseError::new(
        ParseErrorKind::MissingRightParen,
        Span::new(open.line, open.col, 1),
    )
}

//! Number literals.
//!
//! ```text
//! number := ['-'] digits ['.' digits] ['e' ('+'|'-') digits]
//! ```
//!
//! A literal with a fraction or an exponent is a float; anything else is a
//! 64-bit integer.

use cambda_ir::{ExprId, ExprKind, Literal};

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_, '_> {
    pub(super) fn parse_number(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.pos();
        self.spans.start(self.cursor.position());
        if self.cursor.current() == b'-' {
            self.cursor.advance();
        }
        self.expect_digits()?;

        let mut is_float = false;
        if self.cursor.current() == b'.' {
            is_float = true;
            self.cursor.advance();
            if self.cursor.current() == b'e' {
                return Err(ParseError::new(
                    ParseErrorKind::ExponentAfterDecimalPoint,
                    self.here(),
                ));
            }
            self.expect_digits()?;
        }
        if self.cursor.current() == b'e' {
            is_float = true;
            self.cursor.advance();
            if !matches!(self.cursor.current(), b'+' | b'-') {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedSignAfterExponent,
                    self.here(),
                ));
            }
            self.cursor.advance();
            self.expect_digits()?;
        }

        let text = self.cursor.slice_from(start);
        let span = self.end_span();
        let too_large = || {
            ParseError::new(
                ParseErrorKind::LiteralTooLarge {
                    literal: text.to_owned(),
                },
                span,
            )
        };
        let literal = if is_float {
            match text.parse::<f64>() {
                Ok(value) if value.is_finite() => Literal::float(value),
                _ => return Err(too_large()),
            }
        } else {
            Literal::Int(text.parse::<i64>().map_err(|_| too_large())?)
        };
        self.alloc(ExprKind::Literal(literal), span)
    }

    /// Consume a non-empty run of digits.
    fn expect_digits(&mut self) -> Result<(), ParseError> {
        if self.cursor.eat_digits().is_empty() {
            Err(self.unexpected_here())
        } else {
            Ok(())
        }
    }
}

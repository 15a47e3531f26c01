//! Parse error variants.

use cambda_diagnostic::ErrorCode;
use cambda_ir::ArenaError;
use thiserror::Error;

/// What went wrong.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("unexpected character `{found}`")]
    UnexpectedChar { found: char },

    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    #[error("expected `+` or `-` after exponent")]
    ExpectedSignAfterExponent,

    #[error("exponent directly after decimal point")]
    ExponentAfterDecimalPoint,

    #[error("number literal `{literal}` is out of range")]
    LiteralTooLarge { literal: String },

    #[error("empty keyword after `:`")]
    EmptyKeyword,

    #[error("missing right parenthesis")]
    MissingRightParen,

    #[error("expected identifier")]
    ExpectedIdentifier,

    #[error("`{form}` takes {expected} arguments but {actual} were given")]
    WrongArgumentCount {
        form: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("variable `{name}` not found")]
    VariableNotFound { name: String },

    #[error("`{callee}` is not callable")]
    NotCallable { callee: String },

    #[error("incompatible types")]
    IncompatibleTypes,

    #[error("out of memory: {0}")]
    OutOfMemory(#[from] ArenaError),
}

impl ParseErrorKind {
    /// Error code for this kind.
    pub fn code(&self) -> ErrorCode {
        match self {
            ParseErrorKind::UnexpectedChar { .. } => ErrorCode::E0001,
            ParseErrorKind::UnexpectedEndOfInput => ErrorCode::E0002,
            ParseErrorKind::ExpectedSignAfterExponent => ErrorCode::E0003,
            ParseErrorKind::ExponentAfterDecimalPoint => ErrorCode::E0004,
            ParseErrorKind::LiteralTooLarge { .. } => ErrorCode::E0005,
            ParseErrorKind::EmptyKeyword => ErrorCode::E0006,
            ParseErrorKind::MissingRightParen => ErrorCode::E1001,
            ParseErrorKind::ExpectedIdentifier => ErrorCode::E1002,
            ParseErrorKind::WrongArgumentCount { .. } => ErrorCode::E1003,
            ParseErrorKind::VariableNotFound { .. } => ErrorCode::E2001,
            ParseErrorKind::NotCallable { .. } => ErrorCode::E2002,
            ParseErrorKind::IncompatibleTypes => ErrorCode::E2003,
            ParseErrorKind::OutOfMemory(_) => ErrorCode::E9001,
        }
    }
}

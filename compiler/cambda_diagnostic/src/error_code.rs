use std::fmt;

/// Error codes for all front-end diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: Lexical errors (characters, numbers, keywords)
/// - E1xxx: Parser errors (forms, delimiters, arity)
/// - E2xxx: Resolution errors
/// - E9xxx: Internal limits
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexical Errors (E0xxx)
    /// Unexpected character
    E0001,
    /// Unexpected end of input
    E0002,
    /// Expected `+` or `-` after exponent
    E0003,
    /// Exponent directly after decimal point
    E0004,
    /// Integer literal too large
    E0005,
    /// Empty keyword after `:`
    E0006,

    // Parser Errors (E1xxx)
    /// Missing right parenthesis
    E1001,
    /// Expected identifier
    E1002,
    /// Wrong number of arguments to a special form
    E1003,

    // Resolution Errors (E2xxx)
    /// Variable not found
    E2001,
    /// Callee is not callable
    E2002,
    /// Incompatible types (reserved for a type checker)
    E2003,

    // Internal Limits (E9xxx)
    /// Expression arena out of memory
    E9001,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    ///
    /// Kept in sync with `as_str()`; `test_all_variants_listed` catches
    /// omissions.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E0006,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E9001,
    ];

    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// Short human-readable description, used when a diagnostic has no
    /// message of its own.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unexpected character",
            ErrorCode::E0002 => "unexpected end of input",
            ErrorCode::E0003 => "expected sign after exponent",
            ErrorCode::E0004 => "exponent after decimal point",
            ErrorCode::E0005 => "literal too large",
            ErrorCode::E0006 => "empty keyword",
            ErrorCode::E1001 => "missing right parenthesis",
            ErrorCode::E1002 => "expected identifier",
            ErrorCode::E1003 => "wrong argument count",
            ErrorCode::E2001 => "variable not found",
            ErrorCode::E2002 => "not callable",
            ErrorCode::E2003 => "incompatible types",
            ErrorCode::E9001 => "out of memory",
        }
    }

    /// Check if this is a lexical error (E0xxx).
    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    /// Check if this is a parser error (E1xxx).
    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Check if this is a resolution error (E2xxx).
    pub fn is_resolve_error(&self) -> bool {
        self.as_str().starts_with("E2")
    }

    /// Check if this is an internal-limit error (E9xxx).
    pub fn is_internal_error(&self) -> bool {
        self.as_str().starts_with("E9")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E1001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;

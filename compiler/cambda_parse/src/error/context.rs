//! Error context for "while parsing X" notes.

/// Construct being parsed when an error occurred.
///
/// ```ignore
/// self.in_error_context(ErrorContext::IfForm, |p| p.parse_if(open))
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorContext {
    /// Parsing an expression (generic).
    Expression,
    /// Parsing an application `(f args...)`.
    Call,
    /// Parsing `(let name value)`.
    LetForm,
    /// Parsing `(if cond then else)`.
    IfForm,
    /// Parsing `(lambda (params) body)`.
    LambdaForm,
    /// Parsing a lambda parameter list.
    LambdaParams,
    /// Parsing `(do ...)`.
    DoForm,
    /// Parsing a number literal.
    Number,
    /// Parsing a `:keyword` literal.
    HashLiteral,
}

impl ErrorContext {
    /// Phrase suitable for "while parsing {description}".
    pub fn description(self) -> &'static str {
        match self {
            Self::Expression => "an expression",
            Self::Call => "a function call",
            Self::LetForm => "a let form",
            Self::IfForm => "an if form",
            Self::LambdaForm => "a lambda",
            Self::LambdaParams => "lambda parameters",
            Self::DoForm => "a do block",
            Self::Number => "a number literal",
            Self::HashLiteral => "a keyword literal",
        }
    }
}

//! Expression types.
//!
//! Every node is an [`Expr`] in the arena: a [`ExprKind`] plus its span.
//! Children are indices, not boxes.

use std::fmt;

use crate::{ExprId, ExprRange, FnId, Name, Span};

/// Expression node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    #[inline]
    pub const fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Expression variants.
///
/// `UnresolvedApp` is what the parser builds for every call. Once the head is
/// recognised as a special form the node is replaced by `Let`, `If`, `Do` or a
/// `Literal(Fn)`; any other head stays an application for name resolution.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum ExprKind {
    /// Placeholder for a node whose construction failed.
    #[default]
    Invalid,

    /// Variable reference.
    Var(Name),

    /// Reserved identifier (`let`, `car`, ...) in expression position.
    Keyword(Name),

    Literal(Literal),

    /// Call whose callee has not been resolved yet.
    UnresolvedApp { callee: ExprId, args: ExprRange },

    /// `(let name value)`
    Let { name: Name, value: ExprId },

    /// `(do e1 e2 ...)`
    Do { exprs: ExprRange },

    /// `(if cond then else)`
    If {
        cond: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
    },
}

impl ExprKind {
    /// Whether this node may head a call.
    ///
    /// Non-function literals are never callable; everything else is decided
    /// later by what it resolves to.
    pub fn is_callable(&self) -> bool {
        !matches!(self, ExprKind::Literal(lit) if !matches!(lit, Literal::Fn(_)))
    }
}

/// Literal values.
///
/// Floats are stored as their bit pattern so the type stays `Eq + Hash`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub enum Literal {
    True,
    False,
    Nil,
    Int(i64),
    Float(u64),
    /// Interned string text.
    Str(Name),
    /// `:ident` symbol.
    Hash(Name),
    Fn(FnId),
}

impl Literal {
    #[inline]
    pub fn float(value: f64) -> Self {
        Literal::Float(value.to_bits())
    }

    /// Float value, if this is a float literal.
    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Literal::Float(bits) => Some(f64::from_bits(*bits)),
            _ => None,
        }
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::True => write!(f, "True"),
            Literal::False => write!(f, "False"),
            Literal::Nil => write!(f, "Nil"),
            Literal::Int(value) => write!(f, "Int({value})"),
            Literal::Float(bits) => write!(f, "Float({})", f64::from_bits(*bits)),
            Literal::Str(name) => write!(f, "Str({name:?})"),
            Literal::Hash(name) => write!(f, "Hash({name:?})"),
            Literal::Fn(id) => write!(f, "Fn({id:?})"),
        }
    }
}

/// Function value.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum FnValue {
    /// Primitive provided by the backend, identified by name only.
    Native { name: Name },
    /// User function: ordered parameter names and a single body.
    Lambda { params: Vec<Name>, body: ExprId },
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Literal;
    crate::static_assert_size!(Literal, 16);
}

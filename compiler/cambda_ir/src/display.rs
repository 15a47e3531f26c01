//! S-expression printer for arena trees.
//!
//! Prints a tree back as source-like text: `(if true 1 2)`,
//! `(lambda (x) (+ x 1))`. Names are looked up through a [`StringLookup`].

use std::fmt;

use crate::{ExprArena, ExprId, ExprKind, ExprRange, FnValue, Literal, StringLookup};

/// Display adapter for one expression tree.
pub struct ExprDisplay<'a, L: StringLookup + ?Sized> {
    arena: &'a ExprArena,
    lookup: &'a L,
    root: ExprId,
}

impl<'a, L: StringLookup + ?Sized> ExprDisplay<'a, L> {
    pub fn new(arena: &'a ExprArena, lookup: &'a L, root: ExprId) -> Self {
        ExprDisplay {
            arena,
            lookup,
            root,
        }
    }

    fn with_root(&self, root: ExprId) -> Self {
        ExprDisplay { root, ..*self }
    }

    fn write_list(&self, f: &mut fmt::Formatter<'_>, head: &str, list: ExprRange) -> fmt::Result {
        write!(f, "({head}")?;
        for &id in self.arena.get_expr_list(list) {
            write!(f, " {}", self.with_root(id))?;
        }
        write!(f, ")")
    }

    fn write_literal(&self, f: &mut fmt::Formatter<'_>, literal: Literal) -> fmt::Result {
        match literal {
            Literal::True => write!(f, "true"),
            Literal::False => write!(f, "false"),
            Literal::Nil => write!(f, "nil"),
            Literal::Int(value) => write!(f, "{value}"),
            Literal::Float(bits) => write!(f, "{:?}", f64::from_bits(bits)),
            Literal::Str(name) => write!(f, "{:?}", self.lookup.display_name(name)),
            Literal::Hash(name) => write!(f, ":{}", self.lookup.display_name(name)),
            Literal::Fn(id) => match self.arena.get_fn(id) {
                FnValue::Native { name } => write!(f, "<native {}>", self.lookup.display_name(*name)),
                FnValue::Lambda { params, body } => {
                    write!(f, "(lambda (")?;
                    for (i, param) in params.iter().enumerate() {
                        if i > 0 {
                            write!(f, " ")?;
                        }
                        write!(f, "{}", self.lookup.display_name(*param))?;
                    }
                    write!(f, ") {})", self.with_root(*body))
                }
            },
        }
    }
}

impl<L: StringLookup + ?Sized> Clone for ExprDisplay<'_, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L: StringLookup + ?Sized> Copy for ExprDisplay<'_, L> {}

impl<L: StringLookup + ?Sized> fmt::Display for ExprDisplay<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self.arena.kind(self.root) {
            ExprKind::Invalid => write!(f, "<invalid>"),
            ExprKind::Var(name) | ExprKind::Keyword(name) => {
                write!(f, "{}", self.lookup.display_name(name))
            }
            ExprKind::Literal(literal) => self.write_literal(f, literal),
            ExprKind::UnresolvedApp { callee, args } => {
                let head = self.with_root(callee).to_string();
                self.write_list(f, &head, args)
            }
            ExprKind::Let { name, value } => write!(
                f,
                "(let {} {})",
                self.lookup.display_name(name),
                self.with_root(value)
            ),
            ExprKind::Do { exprs } => self.write_list(f, "do", exprs),
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => write!(
                f,
                "(if {} {} {})",
                self.with_root(cond),
                self.with_root(then_branch),
                self.with_root(else_branch)
            ),
        }
    }
}
